//! In-memory backend state

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rust_decimal::Decimal;
use serde_json::Value;
use shared::models::{
    DiningTable, Floor, Food, FoodCategory, Order, OrderItem, OrderStatus, Role, TableRef,
    TableStatus, User, UserRef,
};

/// Rows per page when nothing else is configured
pub const DEFAULT_PER_PAGE: u32 = 10;

/// A mutating request as the mock received it
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: Value,
}

struct Account {
    user: User,
    password: String,
}

#[derive(Default)]
pub(crate) struct Store {
    accounts: Vec<Account>,
    tokens: HashMap<String, i64>,
    pub(crate) floors: Vec<Floor>,
    pub(crate) tables: Vec<DiningTable>,
    pub(crate) foods: Vec<Food>,
    pub(crate) orders: Vec<Order>,
    pub(crate) requests: Vec<RecordedRequest>,
    next_food_id: i64,
    next_order_id: i64,
    next_item_id: i64,
    issued: u64,
}

impl Store {
    pub(crate) fn authenticate(&mut self, email: &str, password: &str) -> Option<(String, User)> {
        let user = self
            .accounts
            .iter()
            .find(|a| a.user.email.eq_ignore_ascii_case(email) && a.password == password)
            .map(|a| a.user.clone())?;
        self.issued += 1;
        let token = format!("{}|mock-token-{}", self.issued, user.id);
        self.tokens.insert(token.clone(), user.id);
        Some((token, user))
    }

    pub(crate) fn user_for_token(&self, token: &str) -> Option<&User> {
        let user_id = self.tokens.get(token)?;
        self.accounts
            .iter()
            .map(|a| &a.user)
            .find(|u| u.id == *user_id)
    }

    pub(crate) fn record(&mut self, method: &str, path: impl Into<String>, body: Value) {
        self.requests.push(RecordedRequest {
            method: method.to_string(),
            path: path.into(),
            body,
        });
    }

    pub(crate) fn table_mut(&mut self, table_id: i64) -> Option<&mut DiningTable> {
        self.tables.iter_mut().find(|t| t.id == table_id)
    }

    pub(crate) fn set_table_status(&mut self, table_id: i64, status: TableStatus) {
        if let Some(table) = self.table_mut(table_id) {
            table.status = status;
        }
    }

    pub(crate) fn table_ref(&self, table_id: i64) -> Option<TableRef> {
        self.tables.iter().find(|t| t.id == table_id).map(|t| TableRef {
            id: t.id,
            number: t.number.clone(),
            status: t.status.clone(),
        })
    }

    pub(crate) fn user_ref(&self, user_id: i64) -> Option<UserRef> {
        self.accounts
            .iter()
            .find(|a| a.user.id == user_id)
            .map(|a| UserRef {
                id: a.user.id,
                name: a.user.name.clone(),
            })
    }

    /// Order as the list endpoints return it, with table and user embedded.
    pub(crate) fn order_view(&self, order: &Order) -> Order {
        Order {
            table: self.table_ref(order.table_id),
            user: order.user_id.and_then(|id| self.user_ref(id)),
            ..order.clone()
        }
    }

    pub(crate) fn order_mut(&mut self, order_id: i64) -> Option<&mut Order> {
        self.orders.iter_mut().find(|o| o.id == order_id)
    }

    pub(crate) fn next_food_id(&mut self) -> i64 {
        self.next_food_id += 1;
        self.next_food_id
    }

    pub(crate) fn next_order_id(&mut self) -> i64 {
        self.next_order_id += 1;
        self.next_order_id
    }

    pub(crate) fn next_item_id(&mut self) -> i64 {
        self.next_item_id += 1;
        self.next_item_id
    }
}

/// Shared state behind the mock router
#[derive(Clone)]
pub struct MockState {
    store: Arc<Mutex<Store>>,
    per_page: u32,
}

impl MockState {
    /// No floors, tables, foods or orders; one cashier account.
    pub fn empty() -> Self {
        let store = Store {
            accounts: accounts(),
            ..Store::default()
        };
        Self {
            store: Arc::new(Mutex::new(store)),
            per_page: DEFAULT_PER_PAGE,
        }
    }

    /// Two floors, a handful of tables, two pages of food and two orders.
    pub fn seeded() -> Self {
        let floors = vec![floor(2, "Rooftop"), floor(1, "Ground Floor")];
        let tables = vec![
            table(1, "1", "available", 1),
            table(2, "2", "occupied", 1),
            table(3, "3", "reserved", 1),
            table(4, "4", "inactive", 1),
            table(7, "7", "available", 1),
            table(5, "R1", "available", 2),
            table(6, "R2", "occupied", 2),
        ];
        let foods = vec![
            food(1, "Lumpia Semarang", FoodCategory::Appetizers, 18_000),
            food(2, "Nasi Goreng", FoodCategory::MainCourse, 35_000),
            food(3, "Pizza Margherita", FoodCategory::MainCourse, 85_000),
            food(4, "Sate Ayam", FoodCategory::MainCourse, 40_000),
            food(5, "Es Teh Manis", FoodCategory::Beverages, 8_000),
            food(6, "Jus Alpukat", FoodCategory::Beverages, 20_000),
            food(7, "Es Campur", FoodCategory::Desserts, 22_000),
            food(8, "Pisang Goreng", FoodCategory::Desserts, 15_000),
            food(9, "Gado-Gado", FoodCategory::Salads, 25_000),
            food(10, "Caesar Salad", FoodCategory::Salads, 45_000),
            food(11, "Tahu Isi", FoodCategory::Appetizers, 12_000),
            food(12, "Kopi Tubruk", FoodCategory::Beverages, 10_000),
        ];

        let mut budi = order(1, "Budi", 2, OrderStatus::Progress);
        budi.order_items.push(OrderItem {
            id: 1,
            order_id: Some(1),
            food_id: Some(2),
            quantity: 2,
            price: foods[1].price,
            food: foods[1].clone(),
        });
        budi.total_price = foods[1].price * Decimal::from(2);
        let sari = order(2, "Sari", 6, OrderStatus::Completed);

        let store = Store {
            accounts: accounts(),
            floors,
            tables,
            foods,
            orders: vec![budi, sari],
            next_food_id: 12,
            // the first order created through the API gets id 10
            next_order_id: 9,
            next_item_id: 1,
            ..Store::default()
        };
        Self {
            store: Arc::new(Mutex::new(store)),
            per_page: DEFAULT_PER_PAGE,
        }
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mutating requests received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    pub fn tables(&self) -> Vec<DiningTable> {
        self.lock().tables.clone()
    }

    pub fn foods(&self) -> Vec<Food> {
        self.lock().foods.clone()
    }

    pub fn orders(&self) -> Vec<Order> {
        self.lock().orders.clone()
    }
}

fn accounts() -> Vec<Account> {
    vec![
        Account {
            user: User {
                id: 1,
                name: "Kasir".to_string(),
                email: "kasir@resto.test".to_string(),
                roles: vec![Role {
                    id: 2,
                    name: "cashier".to_string(),
                }],
            },
            password: "password".to_string(),
        },
        Account {
            user: User {
                id: 2,
                name: "Admin".to_string(),
                email: "admin@resto.test".to_string(),
                roles: vec![Role {
                    id: 1,
                    name: "admin".to_string(),
                }],
            },
            password: "secret".to_string(),
        },
    ]
}

fn floor(id: i64, name: &str) -> Floor {
    Floor {
        id,
        name: name.to_string(),
    }
}

fn table(id: i64, number: &str, status: &str, floor_id: i64) -> DiningTable {
    DiningTable {
        id,
        number: number.to_string(),
        status: TableStatus::from(status),
        floor_id,
    }
}

fn food(id: i64, name: &str, category: FoodCategory, price: i64) -> Food {
    Food {
        id,
        name: name.to_string(),
        category,
        price: Decimal::from(price),
    }
}

fn order(id: i64, customer_name: &str, table_id: i64, status: OrderStatus) -> Order {
    Order {
        id,
        customer_name: customer_name.to_string(),
        status,
        total_price: Decimal::ZERO,
        table_id,
        user_id: Some(1),
        order_items: vec![],
        table: None,
        user: None,
    }
}
