//! Food (menu item) Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::util::lenient_i64;

/// Menu category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodCategory {
    Appetizers,
    MainCourse,
    Desserts,
    Beverages,
    Salads,
}

impl FoodCategory {
    /// All categories, in the order the menu chips are shown.
    pub const ALL: [FoodCategory; 5] = [
        FoodCategory::Appetizers,
        FoodCategory::MainCourse,
        FoodCategory::Desserts,
        FoodCategory::Beverages,
        FoodCategory::Salads,
    ];

    /// Wire value, e.g. `main_course`
    pub fn as_str(&self) -> &'static str {
        match self {
            FoodCategory::Appetizers => "appetizers",
            FoodCategory::MainCourse => "main_course",
            FoodCategory::Desserts => "desserts",
            FoodCategory::Beverages => "beverages",
            FoodCategory::Salads => "salads",
        }
    }

    /// Display label, e.g. `main course`
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl std::fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FoodCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(' ', "_");
        FoodCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| format!("unknown food category: {s}"))
    }
}

/// Food entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    #[serde(deserialize_with = "lenient_i64")]
    pub id: i64,
    pub name: String,
    pub category: FoodCategory,
    /// Unit price in rupiah
    pub price: Decimal,
}

/// Create/update food payload (same body for POST and PUT)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodPayload {
    pub name: String,
    pub category: FoodCategory,
    pub price: Decimal,
}

impl From<&Food> for FoodPayload {
    fn from(food: &Food) -> Self {
        Self {
            name: food.name.clone(),
            category: food.category,
            price: food.price,
        }
    }
}
