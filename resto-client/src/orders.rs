//! Order list manager
//!
//! Paginated list of every order with a status-only edit dialog, delete, and
//! a "Detail" jump back into the [`crate::OrderWorkflow`].

use shared::models::{Order, OrderStatus};

use crate::api::RestoApi;
use crate::client::HttpClient;
use crate::pagination::PageState;
use crate::route::Route;
use crate::{ClientError, ClientResult, audit_log};

/// Edit-status dialog
#[derive(Debug, Clone, PartialEq)]
pub struct StatusDialog {
    pub order: Order,
    pub selected: OrderStatus,
}

/// Order List screen state
#[derive(Debug, Clone, Default)]
pub struct OrderList {
    orders: Vec<Order>,
    page: PageState,
    dialog: Option<StatusDialog>,
}

impl OrderList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn order(&self, order_id: i64) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == order_id)
    }

    pub fn page(&self) -> PageState {
        self.page
    }

    pub fn dialog(&self) -> Option<&StatusDialog> {
        self.dialog.as_ref()
    }

    pub async fn load_page<C: HttpClient>(&mut self, api: &RestoApi<C>, page: u32) -> ClientResult<()> {
        let result = api.orders(page).await.inspect_err(|e| {
            tracing::error!(page, error = %e, "Error fetching orders");
        })?;
        self.page = PageState::from_paginated(&result);
        self.orders = result.data;
        Ok(())
    }

    pub async fn next_page<C: HttpClient>(&mut self, api: &RestoApi<C>) -> ClientResult<bool> {
        match self.page.next() {
            Some(page) => self.load_page(api, page).await.map(|_| true),
            None => Ok(false),
        }
    }

    pub async fn previous_page<C: HttpClient>(&mut self, api: &RestoApi<C>) -> ClientResult<bool> {
        match self.page.previous() {
            Some(page) => self.load_page(api, page).await.map(|_| true),
            None => Ok(false),
        }
    }

    /// Open the status dialog, preselecting the order's current status.
    pub fn open_edit(&mut self, order_id: i64) -> ClientResult<&mut StatusDialog> {
        let order = self
            .order(order_id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(format!("order {order_id} is not on this page")))?;
        let selected = order.status;
        Ok(self.dialog.insert(StatusDialog { order, selected }))
    }

    pub fn select_status(&mut self, status: OrderStatus) {
        if let Some(dialog) = &mut self.dialog {
            dialog.selected = status;
        }
    }

    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    /// PUT the full order with the selected status and swap the server's
    /// version into the list. The dialog stays open on failure.
    pub async fn save_status<C: HttpClient>(&mut self, api: &RestoApi<C>) -> ClientResult<&Order> {
        let dialog = self
            .dialog
            .as_ref()
            .ok_or_else(|| ClientError::Validation("No order selected".into()))?;
        let order = Order {
            status: dialog.selected,
            ..dialog.order.clone()
        };

        let updated = api.update_order(&order).await.inspect_err(|e| {
            tracing::error!(order_id = order.id, error = %e, "Error updating order");
        })?;

        audit_log!("change_status", format!("order:{}", order.id), order.status);
        self.dialog = None;

        let index = match self.orders.iter().position(|o| o.id == order.id) {
            Some(i) => {
                self.orders[i] = updated;
                i
            }
            // Row vanished (page reloaded meanwhile); still show the result
            None => {
                self.orders.push(updated);
                self.orders.len() - 1
            }
        };
        Ok(&self.orders[index])
    }

    /// Edit + select + save in one go.
    pub async fn change_status<C: HttpClient>(
        &mut self,
        api: &RestoApi<C>,
        order_id: i64,
        status: OrderStatus,
    ) -> ClientResult<&Order> {
        self.open_edit(order_id)?;
        self.select_status(status);
        self.save_status(api).await
    }

    /// Delete an order after `confirm` agrees. Returns whether anything was
    /// deleted.
    pub async fn delete<C: HttpClient>(
        &mut self,
        api: &RestoApi<C>,
        order_id: i64,
        confirm: impl FnOnce() -> bool,
    ) -> ClientResult<bool> {
        if !confirm() {
            return Ok(false);
        }
        api.delete_order(order_id).await.inspect_err(|e| {
            tracing::error!(order_id, error = %e, "Error deleting order");
        })?;
        audit_log!("delete", format!("order:{order_id}"));
        self.orders.retain(|o| o.id != order_id);
        Ok(true)
    }

    /// Route for the "Detail" button of a row.
    pub fn detail(&self, order_id: i64) -> Option<Route> {
        self.order(order_id).map(|o| Route::Order {
            order_id: o.id,
            table_id: o.table_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn order(id: i64, table_id: i64) -> Order {
        Order {
            id,
            customer_name: format!("Guest {id}"),
            status: OrderStatus::Progress,
            total_price: Decimal::ZERO,
            table_id,
            user_id: Some(1),
            order_items: vec![],
            table: None,
            user: None,
        }
    }

    #[test]
    fn test_open_edit_preselects_current_status() {
        let mut completed = order(2, 4);
        completed.status = OrderStatus::Completed;
        let mut list = OrderList {
            orders: vec![order(1, 3), completed],
            ..OrderList::default()
        };

        let dialog = list.open_edit(2).unwrap();
        assert_eq!(dialog.selected, OrderStatus::Completed);

        list.select_status(OrderStatus::Canceled);
        assert_eq!(list.dialog().map(|d| d.selected), Some(OrderStatus::Canceled));
        // the row itself is untouched until the server answers
        assert_eq!(list.order(2).map(|o| o.status), Some(OrderStatus::Completed));

        assert!(matches!(list.open_edit(9), Err(ClientError::NotFound(_))));
    }

    #[test]
    fn test_detail_route() {
        let list = OrderList {
            orders: vec![order(10, 7)],
            ..OrderList::default()
        };
        assert_eq!(
            list.detail(10),
            Some(Route::Order {
                order_id: 10,
                table_id: 7
            })
        );
        assert_eq!(list.detail(11), None);
    }
}
