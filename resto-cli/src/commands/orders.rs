use anyhow::{Result, bail};
use resto_client::{ClientError, HttpClient, OrderList, RestoApi};

use super::{Context, confirmed};
use crate::cli::OrdersCommand;
use crate::render;

pub async fn run<C: HttpClient>(ctx: &mut Context<C>, command: OrdersCommand) -> Result<()> {
    ctx.require_login()?;
    let api = &ctx.api;
    let mut list = OrderList::new();

    match command {
        OrdersCommand::List { page } => {
            list.load_page(api, page.page).await?;
            if list.orders().is_empty() {
                println!("No orders");
            } else {
                println!("{}", render::orders(list.orders()));
            }
            println!("{}", render::page_footer(list.page()));
        }
        OrdersCommand::Status { id, status, page } => {
            locate(&mut list, api, id, page.page).await?;
            let order = list.change_status(api, id, status).await?;
            println!("Order #{} is now {}", order.id, order.status);
        }
        OrdersCommand::Delete { id, confirm, page } => {
            locate(&mut list, api, id, page.page).await?;
            let question = format!("Delete order #{id}?");
            if list.delete(api, id, || confirmed(confirm.yes, &question)).await? {
                println!("Deleted order #{id}");
            } else {
                println!("Kept order #{id}");
            }
        }
        OrdersCommand::Detail { id, page } => {
            locate(&mut list, api, id, page.page).await?;
            if let Some(route) = list.detail(id) {
                println!("{route}");
                println!("Add items with: resto order add \"{route}\" <FOOD_ID>...");
            }
        }
    }
    Ok(())
}

/// Load pages from `start` on until `order_id` is on the current one.
async fn locate<C: HttpClient>(
    list: &mut OrderList,
    api: &RestoApi<C>,
    order_id: i64,
    start: u32,
) -> Result<()> {
    list.load_page(api, start).await?;
    loop {
        if list.order(order_id).is_some() {
            return Ok(());
        }
        if !list.next_page(api).await? {
            bail!(ClientError::NotFound(format!("order {order_id}")));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{ConfirmArgs, PageArgs};
    use crate::commands::testing;
    use resto_client::models::OrderStatus;
    use resto_mock::MockState;

    #[tokio::test]
    async fn test_status_and_delete() {
        let state = MockState::seeded().with_per_page(1);
        let (mut ctx, _dir) = testing::context(&state).await;

        // order 2 is on page 2
        run(
            &mut ctx,
            OrdersCommand::Status {
                id: 2,
                status: OrderStatus::Canceled,
                page: PageArgs { page: 1 },
            },
        )
        .await
        .unwrap();
        let sari = state.orders().into_iter().find(|o| o.id == 2).unwrap();
        assert_eq!(sari.status, OrderStatus::Canceled);

        run(
            &mut ctx,
            OrdersCommand::Delete {
                id: 1,
                confirm: ConfirmArgs { yes: true },
                page: PageArgs { page: 1 },
            },
        )
        .await
        .unwrap();
        assert_eq!(state.orders().len(), 1);

        let err = run(
            &mut ctx,
            OrdersCommand::Detail {
                id: 1,
                page: PageArgs { page: 1 },
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ClientError>(),
            Some(ClientError::NotFound(_))
        ));
    }
}
