// resto-client/tests/management.rs
// Food catalog and order list against the mock backend

mod common;

use resto_client::models::{FoodCategory, OrderStatus, TableStatus};
use resto_client::{ClientError, FoodCatalog, FormMode, OrderList};
use resto_mock::MockState;
use rust_decimal::Decimal;
use serde_json::json;

#[tokio::test]
async fn test_catalog_pagination() {
    let state = MockState::seeded().with_per_page(5);
    let api = common::logged_in(&state).await;
    let mut catalog = FoodCatalog::new();

    catalog.load_page(&api, 1).await.unwrap();
    assert_eq!(catalog.foods().len(), 5);
    assert!(!catalog.page().has_previous());
    assert!(catalog.page().has_next());
    assert!(!catalog.previous_page(&api).await.unwrap());

    assert!(catalog.next_page(&api).await.unwrap());
    assert!(catalog.next_page(&api).await.unwrap());
    assert_eq!(catalog.page().page, 3);
    assert_eq!(catalog.foods().len(), 2);
    assert!(!catalog.next_page(&api).await.unwrap());

    assert!(catalog.previous_page(&api).await.unwrap());
    assert_eq!(catalog.foods()[0].id, 6);
}

#[tokio::test]
async fn test_catalog_search_stays_on_page() {
    let state = MockState::seeded().with_per_page(5);
    let api = common::logged_in(&state).await;
    let mut catalog = FoodCatalog::new();
    catalog.load_page(&api, 1).await.unwrap();

    catalog.search = "goreng".into();
    // Pisang Goreng lives on page 2
    let names: Vec<&str> = catalog.visible().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Nasi Goreng"]);
}

#[tokio::test]
async fn test_create_food() {
    let state = MockState::seeded();
    let api = common::logged_in(&state).await;
    let mut catalog = FoodCatalog::new();
    catalog.load_page(&api, 2).await.unwrap();

    let form = catalog.open_create();
    form.name = "Soto Betawi".into();
    form.category = Some(FoodCategory::MainCourse);
    form.price = "38000".into();

    let saved = catalog.save(&api).await.unwrap().clone();
    assert_eq!(saved.id, 13);
    assert_eq!(saved.price, Decimal::from(38_000));
    assert!(catalog.form().is_none());
    assert_eq!(catalog.foods().last().map(|f| f.id), Some(13));

    assert_eq!(
        common::bodies(&state, "POST", "/food"),
        vec![json!({"name": "Soto Betawi", "category": "main_course", "price": "38000"})]
    );
    assert!(state.foods().iter().any(|f| f.name == "Soto Betawi"));
}

#[tokio::test]
async fn test_edit_food_replaces_row() {
    let state = MockState::seeded();
    let api = common::logged_in(&state).await;
    let mut catalog = FoodCatalog::new();
    catalog.load_page(&api, 1).await.unwrap();

    let form = catalog.open_edit(3).unwrap();
    assert_eq!(form.mode, FormMode::Edit(3));
    form.price = "90000".into();
    catalog.save(&api).await.unwrap();

    let pizza = catalog.foods().iter().find(|f| f.id == 3).unwrap();
    assert_eq!(pizza.price, Decimal::from(90_000));
    assert_eq!(pizza.name, "Pizza Margherita");
    assert_eq!(catalog.foods().len(), 10);
    assert_eq!(common::bodies(&state, "PUT", "/food/3").len(), 1);
}

#[tokio::test]
async fn test_invalid_form_is_not_sent() {
    let state = MockState::seeded();
    let api = common::logged_in(&state).await;
    let mut catalog = FoodCatalog::new();

    let form = catalog.open_create();
    form.name = "Es Jeruk".into();
    form.price = "7000".into();

    let err = catalog.save(&api).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    assert!(catalog.form().is_some());
    assert!(state.requests().is_empty());
}

#[tokio::test]
async fn test_delete_food_needs_confirmation() {
    let state = MockState::seeded();
    let api = common::logged_in(&state).await;
    let mut catalog = FoodCatalog::new();
    catalog.load_page(&api, 1).await.unwrap();

    assert!(!catalog.delete(&api, 5, || false).await.unwrap());
    assert!(state.requests().is_empty());
    assert_eq!(catalog.foods().len(), 10);

    assert!(catalog.delete(&api, 5, || true).await.unwrap());
    assert!(catalog.foods().iter().all(|f| f.id != 5));
    assert!(state.foods().iter().all(|f| f.id != 5));
}

#[tokio::test]
async fn test_order_list_rows() {
    let state = MockState::seeded();
    let api = common::logged_in(&state).await;
    let mut list = OrderList::new();
    list.load_page(&api, 1).await.unwrap();

    assert_eq!(list.orders().len(), 2);
    let budi = list.order(1).unwrap();
    assert_eq!(budi.table_label(), "2");
    assert_eq!(budi.user.as_ref().map(|u| u.name.as_str()), Some("Kasir"));
    assert_eq!(budi.total_price, Decimal::from(70_000));
    assert_eq!(list.order(2).unwrap().table_label(), "R2");
}

#[tokio::test]
async fn test_change_order_status() {
    let state = MockState::seeded();
    let api = common::logged_in(&state).await;
    let mut list = OrderList::new();
    list.load_page(&api, 1).await.unwrap();

    let updated = list
        .change_status(&api, 1, OrderStatus::Completed)
        .await
        .unwrap();
    assert_eq!(updated.status, OrderStatus::Completed);
    assert_eq!(list.order(1).map(|o| o.status), Some(OrderStatus::Completed));
    assert!(list.dialog().is_none());

    let sent = common::bodies(&state, "PUT", "/order/1");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0]["status"], "completed");
    assert_eq!(sent[0]["customer_name"], "Budi");

    let table = state.tables().into_iter().find(|t| t.id == 2).unwrap();
    assert_eq!(table.status, TableStatus::Available);
}

#[tokio::test]
async fn test_cancel_status_dialog_sends_nothing() {
    let state = MockState::seeded();
    let api = common::logged_in(&state).await;
    let mut list = OrderList::new();
    list.load_page(&api, 1).await.unwrap();

    list.open_edit(1).unwrap();
    list.select_status(OrderStatus::Canceled);
    list.close_dialog();

    assert!(state.requests().is_empty());
    assert_eq!(list.order(1).map(|o| o.status), Some(OrderStatus::Progress));
}

#[tokio::test]
async fn test_delete_order() {
    let state = MockState::seeded();
    let api = common::logged_in(&state).await;
    let mut list = OrderList::new();
    list.load_page(&api, 1).await.unwrap();

    assert!(!list.delete(&api, 2, || false).await.unwrap());
    assert_eq!(list.orders().len(), 2);

    assert!(list.delete(&api, 2, || true).await.unwrap());
    assert!(list.order(2).is_none());
    assert_eq!(state.orders().len(), 1);

    let err = list.delete(&api, 2, || true).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { code: 404, .. }));
}
