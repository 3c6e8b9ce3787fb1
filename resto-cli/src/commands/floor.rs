use anyhow::Result;
use resto_client::{HttpClient, TableBrowser};

use super::Context;
use crate::render;

pub async fn floors<C: HttpClient>(ctx: &Context<C>) -> Result<()> {
    let mut browser = TableBrowser::new();
    browser.load_floors(&ctx.api).await?;
    if browser.floors().is_empty() {
        println!("No floors");
        return Ok(());
    }
    println!("{}", render::floors(browser.floors(), browser.selected_floor()));
    Ok(())
}

pub async fn tables<C: HttpClient>(ctx: &Context<C>, floor: Option<String>) -> Result<()> {
    let browser = load_browser(ctx, floor).await?;
    let Some(selected) = browser.selected_floor() else {
        println!("No floors");
        return Ok(());
    };

    let name = browser
        .floors()
        .iter()
        .find(|f| f.id.to_string() == selected)
        .map(|f| f.name.as_str())
        .unwrap_or(selected);
    println!("Floor: {name}");
    if browser.tables().is_empty() {
        println!("No tables on this floor");
    } else {
        println!("{}", render::dining_tables(browser.tables()));
    }
    println!("{}", render::quick_stats(&browser.quick_stats()));
    Ok(())
}

/// Browser with the given floor selected, or the default one.
pub(crate) async fn load_browser<C: HttpClient>(
    ctx: &Context<C>,
    floor: Option<String>,
) -> Result<TableBrowser> {
    let mut browser = TableBrowser::new();
    browser.load(&ctx.api).await?;
    if let Some(floor) = floor {
        browser.select_floor(&ctx.api, floor).await?;
    }
    Ok(browser)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing;
    use resto_mock::MockState;

    #[tokio::test]
    async fn test_load_browser_switches_floor() {
        let state = MockState::seeded();
        let (ctx, _dir) = testing::context(&state).await;

        let browser = load_browser(&ctx, None).await.unwrap();
        assert_eq!(browser.selected_floor(), Some("1"));

        let browser = load_browser(&ctx, Some("2".into())).await.unwrap();
        assert_eq!(browser.tables().len(), 2);
        tables(&ctx, Some("2".into())).await.unwrap();
    }
}
