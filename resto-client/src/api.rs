//! Typed endpoints of the restaurant API
//!
//! Every call goes through [`ApiEnvelope::normalize`], so callers only ever
//! see decoded payloads or a [`ClientError`].

use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::client::{LoginRequest, LoginResponse};
use shared::models::{
    DiningTable, Floor, Food, FoodPayload, Order, OrderCreate, OrderItem, OrderItemCreate,
};
use shared::{ApiEnvelope, Paginated};

use crate::client::{HttpClient, NetworkHttpClient};
use crate::{ClientConfig, ClientResult};

/// Typed API client over any [`HttpClient`] transport
#[derive(Debug, Clone)]
pub struct RestoApi<C: HttpClient> {
    http: C,
}

impl RestoApi<NetworkHttpClient> {
    /// Network client built from configuration.
    pub fn connect(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::new(NetworkHttpClient::new(config)?))
    }
}

impl<C: HttpClient> RestoApi<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    pub fn transport(&self) -> &C {
        &self.http
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.http.set_token(token);
    }

    pub fn token(&self) -> Option<&str> {
        self.http.token()
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let envelope: ApiEnvelope<T> = self.http.get(path).await?;
        Ok(envelope.normalize().into_data()?)
    }

    async fn send_post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let envelope: ApiEnvelope<T> = self.http.post(path, body).await?;
        Ok(envelope.normalize().into_data()?)
    }

    async fn send_put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let envelope: ApiEnvelope<T> = self.http.put(path, body).await?;
        Ok(envelope.normalize().into_data()?)
    }

    async fn send_delete(&self, path: &str) -> ClientResult<()> {
        let envelope: ApiEnvelope<serde_json::Value> = self.http.delete(path).await?;
        envelope.normalize().into_optional()?;
        Ok(())
    }

    // ========== Auth ==========

    /// `POST /login`. Returns the raw payload; see [`crate::Session::login`]
    /// for the checked version that also stores the token.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.send_post("login", &req).await
    }

    // ========== Floors & tables ==========

    pub async fn floors(&self) -> ClientResult<Vec<Floor>> {
        let page: Paginated<Floor> = self.fetch("floor").await?;
        Ok(page.data)
    }

    /// All tables on all floors; filtering by floor is done client-side.
    pub async fn tables(&self) -> ClientResult<Vec<DiningTable>> {
        let page: Paginated<DiningTable> = self.fetch("table").await?;
        Ok(page.data)
    }

    // ========== Food ==========

    pub async fn foods(&self, page: u32) -> ClientResult<Paginated<Food>> {
        self.fetch(&format!("food?page={page}")).await
    }

    pub async fn create_food(&self, payload: &FoodPayload) -> ClientResult<Food> {
        self.send_post("food", payload).await
    }

    pub async fn update_food(&self, id: i64, payload: &FoodPayload) -> ClientResult<Food> {
        self.send_put(&format!("food/{id}"), payload).await
    }

    pub async fn delete_food(&self, id: i64) -> ClientResult<()> {
        self.send_delete(&format!("food/{id}")).await
    }

    // ========== Orders ==========

    pub async fn orders(&self, page: u32) -> ClientResult<Paginated<Order>> {
        self.fetch(&format!("order?page={page}")).await
    }

    pub async fn order(&self, id: i64) -> ClientResult<Order> {
        self.fetch(&format!("order/{id}")).await
    }

    pub async fn create_order(&self, payload: &OrderCreate) -> ClientResult<Order> {
        self.send_post("order", payload).await
    }

    /// `PUT /order/:id` with the full order as body.
    pub async fn update_order(&self, order: &Order) -> ClientResult<Order> {
        self.send_put(&format!("order/{}", order.id), order).await
    }

    pub async fn delete_order(&self, id: i64) -> ClientResult<()> {
        self.send_delete(&format!("order/{id}")).await
    }

    pub async fn add_order_item(&self, payload: &OrderItemCreate) -> ClientResult<OrderItem> {
        self.send_post("orderitem", payload).await
    }
}
