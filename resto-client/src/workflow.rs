//! Order workflow
//!
//! Drives one table from "no order" through order creation to item entry:
//!
//! ```text
//! NoOrder --create_order--> OrderOpen --add_item--> OrderOpen (+1 item)
//!    ^                        |
//!    +--------reset-----------+
//! ```
//!
//! Closing an order (completed/canceled) is not part of this machine; that
//! happens from the order list.

use rust_decimal::Decimal;
use shared::models::{DiningTable, Food, OrderCreate, OrderItem, OrderItemCreate};

use crate::api::RestoApi;
use crate::client::HttpClient;
use crate::menu::MenuFilter;
use crate::route::Route;
use crate::{ClientError, ClientResult, audit_log};

/// Quantity sent for every add action
pub const ADD_QUANTITY: u32 = 1;

/// Workflow phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderPhase {
    #[default]
    NoOrder,
    OrderOpen { order_id: i64, table_id: i64 },
}

impl OrderPhase {
    /// Item-entry route for an open order.
    pub fn route(&self) -> Option<Route> {
        match *self {
            OrderPhase::NoOrder => None,
            OrderPhase::OrderOpen { order_id, table_id } => Some(Route::Order { order_id, table_id }),
        }
    }
}

/// State of the item-entry screen
#[derive(Debug, Clone, Default)]
pub struct OrderWorkflow {
    phase: OrderPhase,
    items: Vec<OrderItem>,
    menu: Vec<Food>,
    pub filter: MenuFilter,
}

impl OrderWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> OrderPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        matches!(self.phase, OrderPhase::OrderOpen { .. })
    }

    /// Line items, in the order they were added.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn running_total(&self) -> Decimal {
        self.items.iter().map(OrderItem::line_total).sum()
    }

    fn open_order_id(&self) -> ClientResult<i64> {
        match self.phase {
            OrderPhase::OrderOpen { order_id, .. } => Ok(order_id),
            OrderPhase::NoOrder => Err(ClientError::NoOpenOrder),
        }
    }

    /// Create an order for `table` and open it.
    ///
    /// Fails without touching the server when the name is blank or the table
    /// is inactive. On any failure the phase is left as it was.
    pub async fn create_order<C: HttpClient>(
        &mut self,
        api: &RestoApi<C>,
        table: &DiningTable,
        customer_name: &str,
    ) -> ClientResult<Route> {
        if customer_name.trim().is_empty() {
            return Err(ClientError::Validation("Customer name is required".into()));
        }
        if !table.is_interactive() {
            return Err(ClientError::TableInactive(table.id));
        }

        let payload = OrderCreate {
            customer_name: customer_name.to_string(),
            table_id: table.id,
        };
        let order = api.create_order(&payload).await.inspect_err(|e| {
            tracing::error!(table_id = table.id, error = %e, "Error creating order");
        })?;

        audit_log!("create", format!("order:{}", order.id), format!("table:{}", table.id));
        tracing::info!(order_id = order.id, table_id = table.id, "Order opened");

        self.phase = OrderPhase::OrderOpen {
            order_id: order.id,
            table_id: table.id,
        };
        self.items = order.order_items;
        Ok(Route::Order {
            order_id: order.id,
            table_id: table.id,
        })
    }

    /// Re-enter an existing order (e.g. "Detail" from the order list) and
    /// load its items from the server. If the fetch fails the workflow stays
    /// on whatever it had open before.
    pub async fn resume<C: HttpClient>(
        &mut self,
        api: &RestoApi<C>,
        order_id: i64,
        table_id: i64,
    ) -> ClientResult<()> {
        let items = fetch_items(api, order_id).await?;
        self.phase = OrderPhase::OrderOpen { order_id, table_id };
        self.items = items;
        Ok(())
    }

    /// Re-enter through a route; anything but [`Route::Order`] is rejected.
    pub async fn enter<C: HttpClient>(&mut self, api: &RestoApi<C>, route: Route) -> ClientResult<()> {
        match route {
            Route::Order { order_id, table_id } => self.resume(api, order_id, table_id).await,
            other => Err(ClientError::Validation(format!("not an order route: {other}"))),
        }
    }

    /// Replace the item list with what the server has for the open order.
    pub async fn load_order_items<C: HttpClient>(&mut self, api: &RestoApi<C>) -> ClientResult<()> {
        let order_id = self.open_order_id()?;
        self.items = fetch_items(api, order_id).await?;
        Ok(())
    }

    /// Add one unit of `food` to the open order.
    ///
    /// The appended line is the server's response, never a local guess, and
    /// repeated adds of the same food stay separate lines.
    pub async fn add_item<C: HttpClient>(
        &mut self,
        api: &RestoApi<C>,
        food: &Food,
    ) -> ClientResult<&OrderItem> {
        let order_id = self.open_order_id()?;
        let payload = OrderItemCreate {
            order_id,
            food_id: food.id,
            quantity: ADD_QUANTITY,
        };
        let item = api.add_order_item(&payload).await.inspect_err(|e| {
            tracing::error!(order_id, food_id = food.id, error = %e, "Error adding food");
        })?;

        audit_log!("add_item", format!("order:{order_id}"), format!("food:{}", food.id));
        self.items.push(item);
        Ok(&self.items[self.items.len() - 1])
    }

    /// Back to the dashboard: forget the open order.
    pub fn reset(&mut self) {
        self.phase = OrderPhase::NoOrder;
        self.items.clear();
    }

    // ========== Menu panel ==========

    /// Load the first page of food for the menu panel.
    pub async fn load_menu<C: HttpClient>(&mut self, api: &RestoApi<C>) -> ClientResult<()> {
        let page = api.foods(1).await.inspect_err(|e| {
            tracing::error!(error = %e, "Error fetching foods");
        })?;
        self.menu = page.data;
        Ok(())
    }

    pub fn menu(&self) -> &[Food] {
        &self.menu
    }

    /// Menu rows passing the current filter.
    pub fn visible_menu(&self) -> Vec<&Food> {
        self.filter.apply(&self.menu)
    }

    pub fn menu_item(&self, food_id: i64) -> Option<&Food> {
        self.menu.iter().find(|f| f.id == food_id)
    }
}

async fn fetch_items<C: HttpClient>(api: &RestoApi<C>, order_id: i64) -> ClientResult<Vec<OrderItem>> {
    let order = api.order(order_id).await.inspect_err(|e| {
        tracing::error!(order_id, error = %e, "Error fetching order items");
    })?;
    Ok(order.order_items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_route() {
        assert_eq!(OrderPhase::NoOrder.route(), None);
        assert_eq!(
            OrderPhase::OrderOpen {
                order_id: 10,
                table_id: 7
            }
            .route()
            .map(|r| r.path()),
            Some("/order/10?table=7".to_string())
        );
    }

    #[test]
    fn test_new_workflow_has_no_order() {
        let workflow = OrderWorkflow::new();
        assert_eq!(workflow.phase(), OrderPhase::NoOrder);
        assert!(!workflow.is_open());
        assert!(workflow.items().is_empty());
        assert_eq!(workflow.running_total(), Decimal::ZERO);
        assert!(matches!(workflow.open_order_id(), Err(ClientError::NoOpenOrder)));
    }
}
