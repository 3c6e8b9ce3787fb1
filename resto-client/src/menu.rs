//! Client-side menu filtering
//!
//! Filtering never goes to the server: it narrows whatever page of food is
//! currently loaded.

use shared::models::{Food, FoodCategory};

/// Case-insensitive substring match on a food name. An empty needle matches
/// everything.
pub fn name_matches(name: &str, needle: &str) -> bool {
    name.to_lowercase().contains(&needle.to_lowercase())
}

/// Category chip + search box of the item-entry screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuFilter {
    pub category: Option<FoodCategory>,
    pub search: String,
}

impl MenuFilter {
    /// Clicking the active chip again clears it.
    pub fn toggle_category(&mut self, category: FoodCategory) {
        self.category = match self.category {
            Some(current) if current == category => None,
            _ => Some(category),
        };
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    pub fn matches(&self, food: &Food) -> bool {
        self.category.is_none_or(|c| food.category == c) && name_matches(&food.name, &self.search)
    }

    /// Rows of `foods` that pass the filter, in their original order.
    pub fn apply<'a>(&self, foods: &'a [Food]) -> Vec<&'a Food> {
        foods.iter().filter(|f| self.matches(f)).collect()
    }
}
