use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use shared::client::{LoginRequest, LoginResponse};
use shared::models::{
    DiningTable, FoodPayload, Order, OrderCreate, OrderItem, OrderItemCreate, OrderStatus,
    TableStatus,
};
use shared::{ApiEnvelope, Paginated};

use crate::error::{MockError, MockResult};
use crate::state::{MockState, Store};

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    page: Option<u32>,
}

impl PageQuery {
    fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }
}

/// `{meta: {code: 200, ...}, result}`
fn meta<T: Serialize>(data: T, message: &str) -> Response {
    Json(ApiEnvelope::meta_ok(data, message)).into_response()
}

/// `{status: "success", message, data}`
fn status_ok<T: Serialize>(data: T, message: &str) -> Response {
    Json(ApiEnvelope::status_ok(data, message)).into_response()
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// User id behind the request's bearer token.
fn authorize(store: &Store, headers: &HeaderMap) -> Result<i64, MockError> {
    bearer(headers)
        .and_then(|token| store.user_for_token(token))
        .map(|user| user.id)
        .ok_or(MockError::Unauthenticated)
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, MockError> {
    serde_json::to_value(value).map_err(|e| MockError::Internal(e.to_string()))
}

/// Rewrite a numeric field as a string, the way the real backend
/// sometimes returns freshly inserted foreign keys.
fn stringify(body: &mut Value, field: &str) {
    if let Some(slot) = body.get_mut(field)
        && !slot.is_string()
    {
        *slot = Value::String(slot.to_string());
    }
}

// ========== Auth ==========

async fn login(State(state): State<MockState>, Json(req): Json<LoginRequest>) -> MockResult {
    let mut store = state.lock();
    let Some((token, user)) = store.authenticate(&req.email, &req.password) else {
        tracing::warn!(email = %req.email, "Rejected login");
        return Err(MockError::InvalidCredentials);
    };
    tracing::info!(user_id = user.id, "Login");
    Ok(meta(
        LoginResponse {
            access_token: Some(token),
            token_type: Some("Bearer".to_string()),
            user: Some(user),
        },
        "Authenticated",
    ))
}

// ========== Floors & tables (public) ==========

async fn floors(State(state): State<MockState>) -> Response {
    let store = state.lock();
    // This endpoint carries neither status nor message
    Json(json!({ "data": Paginated::single(store.floors.clone()) })).into_response()
}

fn table_row(table: &DiningTable) -> Value {
    let number = table
        .number
        .parse::<i64>()
        .map(Value::from)
        .unwrap_or_else(|_| Value::from(table.number.clone()));
    json!({
        "id": table.id,
        "number": number,
        "status": table.status.as_str(),
        "floor_id": table.floor_id.to_string(),
    })
}

async fn tables(State(state): State<MockState>) -> Response {
    let store = state.lock();
    let rows: Vec<Value> = store.tables.iter().map(table_row).collect();
    status_ok(Paginated::single(rows), "Tables retrieved")
}

// ========== Food ==========

fn check_food(payload: &FoodPayload) -> Result<(), MockError> {
    if payload.name.trim().is_empty() {
        return Err(MockError::Validation("The name field is required.".into()));
    }
    if payload.price.is_sign_negative() {
        return Err(MockError::Validation("The price must be at least 0.".into()));
    }
    Ok(())
}

async fn foods(
    State(state): State<MockState>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> MockResult {
    let store = state.lock();
    authorize(&store, &headers)?;
    let page = Paginated::slice(&store.foods, query.page(), state.per_page());
    Ok(status_ok(page, "Foods retrieved"))
}

async fn create_food(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(payload): Json<FoodPayload>,
) -> MockResult {
    let mut store = state.lock();
    authorize(&store, &headers)?;
    store.record("POST", "/food", to_json(&payload)?);
    check_food(&payload)?;

    let food = shared::models::Food {
        id: store.next_food_id(),
        name: payload.name.trim().to_string(),
        category: payload.category,
        price: payload.price,
    };
    store.foods.push(food.clone());
    Ok(meta(food, "Food created"))
}

async fn update_food(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(payload): Json<FoodPayload>,
) -> MockResult {
    let mut store = state.lock();
    authorize(&store, &headers)?;
    store.record("PUT", format!("/food/{id}"), to_json(&payload)?);
    check_food(&payload)?;

    let food = store
        .foods
        .iter_mut()
        .find(|f| f.id == id)
        .ok_or_else(|| MockError::NotFound("Food".into()))?;
    food.name = payload.name.trim().to_string();
    food.category = payload.category;
    food.price = payload.price;
    let food = food.clone();
    Ok(meta(food, "Food updated"))
}

async fn delete_food(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> MockResult {
    let mut store = state.lock();
    authorize(&store, &headers)?;
    store.record("DELETE", format!("/food/{id}"), Value::Null);

    let before = store.foods.len();
    store.foods.retain(|f| f.id != id);
    if store.foods.len() == before {
        return Err(MockError::NotFound("Food".into()));
    }
    Ok(meta(Value::Null, "Food deleted"))
}

// ========== Orders ==========

async fn orders(
    State(state): State<MockState>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> MockResult {
    let store = state.lock();
    authorize(&store, &headers)?;
    let views: Vec<Order> = store.orders.iter().map(|o| store.order_view(o)).collect();
    let page = Paginated::slice(&views, query.page(), state.per_page());
    Ok(meta(page, "Orders retrieved"))
}

async fn show_order(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> MockResult {
    let store = state.lock();
    authorize(&store, &headers)?;
    let order = store
        .orders
        .iter()
        .find(|o| o.id == id)
        .ok_or_else(|| MockError::NotFound("Order".into()))?;
    Ok(meta(store.order_view(order), "Order retrieved"))
}

async fn create_order(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(payload): Json<OrderCreate>,
) -> MockResult {
    let mut store = state.lock();
    let user_id = authorize(&store, &headers)?;
    store.record("POST", "/order", to_json(&payload)?);

    if payload.customer_name.trim().is_empty() {
        return Err(MockError::Validation("The customer name field is required.".into()));
    }
    let table = store
        .table_mut(payload.table_id)
        .ok_or_else(|| MockError::NotFound("Table".into()))?;
    if !table.is_interactive() {
        return Err(MockError::Validation("The selected table is inactive.".into()));
    }
    table.status = TableStatus::Occupied;

    let order = Order {
        id: store.next_order_id(),
        customer_name: payload.customer_name.trim().to_string(),
        status: OrderStatus::Progress,
        total_price: Decimal::ZERO,
        table_id: payload.table_id,
        user_id: Some(user_id),
        order_items: vec![],
        table: None,
        user: None,
    };
    store.orders.push(order.clone());
    tracing::info!(order_id = order.id, table_id = order.table_id, "Order created");

    let mut body = to_json(&order)?;
    stringify(&mut body, "table_id");
    Ok(meta(body, "Order created"))
}

async fn update_order(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> MockResult {
    let mut store = state.lock();
    authorize(&store, &headers)?;
    store.record("PUT", format!("/order/{id}"), body.clone());

    let status = match body.get("status") {
        Some(value) => Some(
            serde_json::from_value::<OrderStatus>(value.clone())
                .map_err(|_| MockError::Validation("The selected status is invalid.".into()))?,
        ),
        None => None,
    };
    let customer_name = body
        .get("customer_name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string);

    let order = store
        .order_mut(id)
        .ok_or_else(|| MockError::NotFound("Order".into()))?;
    let was_closed = order.status.is_closed();
    if let Some(status) = status {
        order.status = status;
    }
    if let Some(name) = customer_name {
        order.customer_name = name;
    }
    let order = order.clone();

    match (was_closed, order.status.is_closed()) {
        (false, true) => store.set_table_status(order.table_id, TableStatus::Available),
        (true, false) => store.set_table_status(order.table_id, TableStatus::Occupied),
        _ => {}
    }
    Ok(meta(store.order_view(&order), "Order updated"))
}

async fn delete_order(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> MockResult {
    let mut store = state.lock();
    authorize(&store, &headers)?;
    store.record("DELETE", format!("/order/{id}"), Value::Null);

    let index = store
        .orders
        .iter()
        .position(|o| o.id == id)
        .ok_or_else(|| MockError::NotFound("Order".into()))?;
    let order = store.orders.remove(index);
    if !order.status.is_closed() {
        store.set_table_status(order.table_id, TableStatus::Available);
    }
    Ok(meta(Value::Null, "Order deleted"))
}

async fn add_order_item(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(payload): Json<OrderItemCreate>,
) -> MockResult {
    let mut store = state.lock();
    authorize(&store, &headers)?;
    store.record("POST", "/orderitem", to_json(&payload)?);

    if payload.quantity == 0 {
        return Err(MockError::Validation("The quantity must be at least 1.".into()));
    }
    let food = store
        .foods
        .iter()
        .find(|f| f.id == payload.food_id)
        .cloned()
        .ok_or_else(|| MockError::NotFound("Food".into()))?;
    let item_id = store.next_item_id();

    let order = store
        .order_mut(payload.order_id)
        .ok_or_else(|| MockError::NotFound("Order".into()))?;
    if order.status.is_closed() {
        return Err(MockError::Validation("The order is already closed.".into()));
    }
    let item = OrderItem {
        id: item_id,
        order_id: Some(order.id),
        food_id: Some(food.id),
        quantity: payload.quantity,
        price: food.price,
        food,
    };
    order.order_items.push(item.clone());
    order.total_price = order
        .order_items
        .iter()
        .map(|i| i.price * Decimal::from(i.quantity))
        .sum();

    let mut body = to_json(&item)?;
    stringify(&mut body, "order_id");
    stringify(&mut body, "quantity");
    Ok(meta(body, "Item added"))
}

/// Routes as served under the backend's `/api` prefix.
pub fn router(state: MockState) -> Router {
    use tower::limit::ConcurrencyLimitLayer;

    Router::new()
        .route("/login", post(login))
        .route("/floor", get(floors))
        .route("/table", get(tables))
        .route("/food", get(foods).post(create_food))
        .route("/food/{id}", put(update_food).delete(delete_food))
        .route("/order", get(orders).post(create_order))
        .route(
            "/order/{id}",
            get(show_order).put(update_order).delete(delete_order),
        )
        .route("/orderitem", post(add_order_item))
        .layer(ConcurrencyLimitLayer::new(100))
        .with_state(state)
}
