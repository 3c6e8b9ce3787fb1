use anyhow::{Result, bail};
use resto_client::{ClientError, FoodCatalog, HttpClient, RestoApi};

use super::{Context, confirmed};
use crate::cli::FoodCommand;
use crate::render;

pub async fn run<C: HttpClient>(ctx: &mut Context<C>, command: FoodCommand) -> Result<()> {
    ctx.require_login()?;
    let api = &ctx.api;
    let mut catalog = FoodCatalog::new();

    match command {
        FoodCommand::List { page, search } => {
            catalog.load_page(api, page.page).await?;
            catalog.search = search.unwrap_or_default();
            let visible = catalog.visible();
            if visible.is_empty() {
                println!("No food found");
            } else {
                println!("{}", render::menu(&visible));
            }
            println!("{}", render::page_footer(catalog.page()));
        }
        FoodCommand::Create {
            name,
            category,
            price,
        } => {
            let form = catalog.open_create();
            form.name = name;
            form.category = Some(category);
            form.price = price;
            let food = catalog.save(api).await?;
            println!("Created food #{} {}", food.id, food.name);
        }
        FoodCommand::Edit {
            id,
            name,
            category,
            price,
            page,
        } => {
            locate(&mut catalog, api, id, page.page).await?;
            let form = catalog.open_edit(id)?;
            if let Some(name) = name {
                form.name = name;
            }
            if category.is_some() {
                form.category = category;
            }
            if let Some(price) = price {
                form.price = price;
            }
            let food = catalog.save(api).await?;
            println!("Updated food #{} {}", food.id, food.name);
        }
        FoodCommand::Delete { id, confirm, page } => {
            locate(&mut catalog, api, id, page.page).await?;
            let name = catalog
                .foods()
                .iter()
                .find(|f| f.id == id)
                .map(|f| f.name.clone())
                .unwrap_or_default();
            let question = format!("Delete \"{name}\"?");
            if catalog.delete(api, id, || confirmed(confirm.yes, &question)).await? {
                println!("Deleted food #{id}");
            } else {
                println!("Kept food #{id}");
            }
        }
    }
    Ok(())
}

/// Load pages from `start` on until `food_id` is on the current one.
async fn locate<C: HttpClient>(
    catalog: &mut FoodCatalog,
    api: &RestoApi<C>,
    food_id: i64,
    start: u32,
) -> Result<()> {
    catalog.load_page(api, start).await?;
    loop {
        if catalog.foods().iter().any(|f| f.id == food_id) {
            return Ok(());
        }
        if !catalog.next_page(api).await? {
            bail!(ClientError::NotFound(format!("food {food_id}")));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{ConfirmArgs, PageArgs};
    use crate::commands::testing;
    use resto_client::models::FoodCategory;
    use resto_mock::MockState;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_food_commands() {
        let state = MockState::seeded();
        let (mut ctx, _dir) = testing::context(&state).await;

        run(
            &mut ctx,
            FoodCommand::Create {
                name: "Soto Ayam".into(),
                category: FoodCategory::MainCourse,
                price: "30000".into(),
            },
        )
        .await
        .unwrap();

        // id 13 sits on page 2; edit finds it from page 1
        run(
            &mut ctx,
            FoodCommand::Edit {
                id: 13,
                name: None,
                category: None,
                price: Some("32000".into()),
                page: PageArgs { page: 1 },
            },
        )
        .await
        .unwrap();
        let soto = state.foods().into_iter().find(|f| f.id == 13).unwrap();
        assert_eq!(soto.name, "Soto Ayam");
        assert_eq!(soto.price, Decimal::from(32_000));

        run(
            &mut ctx,
            FoodCommand::Delete {
                id: 13,
                confirm: ConfirmArgs { yes: true },
                page: PageArgs { page: 1 },
            },
        )
        .await
        .unwrap();
        assert!(state.foods().iter().all(|f| f.id != 13));
    }

    #[tokio::test]
    async fn test_bad_price_is_rejected_locally() {
        let state = MockState::seeded();
        let (mut ctx, _dir) = testing::context(&state).await;
        let err = run(
            &mut ctx,
            FoodCommand::Create {
                name: "Es Kelapa".into(),
                category: FoodCategory::Beverages,
                price: "cheap".into(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ClientError>(),
            Some(ClientError::Validation(_))
        ));
        assert!(state.requests().is_empty());
    }
}
