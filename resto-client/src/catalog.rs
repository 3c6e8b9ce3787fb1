//! Food catalog manager ("Master Food")
//!
//! Paginated list with one shared create/edit form. The search box only
//! narrows the page that is currently loaded.

use rust_decimal::Decimal;
use shared::models::{Food, FoodCategory, FoodPayload};

use crate::api::RestoApi;
use crate::client::HttpClient;
use crate::menu::name_matches;
use crate::pagination::PageState;
use crate::{ClientError, ClientResult, audit_log};

/// Whether the form POSTs a new food or PUTs an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

/// Add/Edit food form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodForm {
    pub mode: FormMode,
    pub name: String,
    pub category: Option<FoodCategory>,
    /// Raw price input, parsed on save
    pub price: String,
}

impl FoodForm {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            name: String::new(),
            category: None,
            price: String::new(),
        }
    }

    pub fn edit(food: &Food) -> Self {
        Self {
            mode: FormMode::Edit(food.id),
            name: food.name.clone(),
            category: Some(food.category),
            price: food.price.to_string(),
        }
    }

    /// Check the inputs and build the request body.
    pub fn validate(&self) -> ClientResult<FoodPayload> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ClientError::Validation("Name is required".into()));
        }
        let category = self
            .category
            .ok_or_else(|| ClientError::Validation("Category is required".into()))?;
        let price: Decimal = self
            .price
            .trim()
            .parse()
            .map_err(|_| ClientError::Validation(format!("Invalid price: {:?}", self.price)))?;
        if price.is_sign_negative() {
            return Err(ClientError::Validation("Price cannot be negative".into()));
        }
        Ok(FoodPayload {
            name: name.to_string(),
            category,
            price,
        })
    }
}

/// Master Food screen state
#[derive(Debug, Clone, Default)]
pub struct FoodCatalog {
    foods: Vec<Food>,
    page: PageState,
    pub search: String,
    form: Option<FoodForm>,
}

impl FoodCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows of the loaded page.
    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    pub fn page(&self) -> PageState {
        self.page
    }

    /// Loaded rows whose name contains the search text.
    pub fn visible(&self) -> Vec<&Food> {
        self.foods
            .iter()
            .filter(|f| name_matches(&f.name, &self.search))
            .collect()
    }

    pub async fn load_page<C: HttpClient>(&mut self, api: &RestoApi<C>, page: u32) -> ClientResult<()> {
        let result = api.foods(page).await.inspect_err(|e| {
            tracing::error!(page, error = %e, "Error fetching foods");
        })?;
        self.page = PageState::from_paginated(&result);
        self.foods = result.data;
        Ok(())
    }

    /// Go to the next page. Returns `false` when already on the last one.
    pub async fn next_page<C: HttpClient>(&mut self, api: &RestoApi<C>) -> ClientResult<bool> {
        match self.page.next() {
            Some(page) => self.load_page(api, page).await.map(|_| true),
            None => Ok(false),
        }
    }

    /// Go to the previous page. Returns `false` when already on the first one.
    pub async fn previous_page<C: HttpClient>(&mut self, api: &RestoApi<C>) -> ClientResult<bool> {
        match self.page.previous() {
            Some(page) => self.load_page(api, page).await.map(|_| true),
            None => Ok(false),
        }
    }

    // ========== Form ==========

    pub fn form(&self) -> Option<&FoodForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut FoodForm> {
        self.form.as_mut()
    }

    pub fn open_create(&mut self) -> &mut FoodForm {
        self.form.insert(FoodForm::create())
    }

    /// Open the form on a row of the loaded page.
    pub fn open_edit(&mut self, food_id: i64) -> ClientResult<&mut FoodForm> {
        let food = self
            .foods
            .iter()
            .find(|f| f.id == food_id)
            .ok_or_else(|| ClientError::NotFound(format!("food {food_id} is not on this page")))?;
        Ok(self.form.insert(FoodForm::edit(food)))
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Submit the form: POST in create mode, PUT in edit mode.
    ///
    /// The server's row is appended (create) or swapped in by id (edit) and
    /// the form closes. On failure the form stays open.
    pub async fn save<C: HttpClient>(&mut self, api: &RestoApi<C>) -> ClientResult<&Food> {
        let form = self
            .form
            .as_ref()
            .ok_or_else(|| ClientError::Validation("No food form open".into()))?;
        let payload = form.validate()?;
        let mode = form.mode;

        let saved = match mode {
            FormMode::Create => api.create_food(&payload).await,
            FormMode::Edit(id) => api.update_food(id, &payload).await,
        }
        .inspect_err(|e| {
            tracing::error!(?mode, error = %e, "Error saving food");
        })?;

        audit_log!("save", format!("food:{}", saved.id), format!("{mode:?}"));
        self.form = None;

        let index = match mode {
            FormMode::Edit(id) => self.foods.iter().position(|f| f.id == id),
            FormMode::Create => None,
        };
        let index = match index {
            Some(i) => {
                self.foods[i] = saved;
                i
            }
            None => {
                self.foods.push(saved);
                self.foods.len() - 1
            }
        };
        Ok(&self.foods[index])
    }

    /// Delete a food after `confirm` agrees. Returns whether anything was
    /// deleted.
    pub async fn delete<C: HttpClient>(
        &mut self,
        api: &RestoApi<C>,
        food_id: i64,
        confirm: impl FnOnce() -> bool,
    ) -> ClientResult<bool> {
        if !confirm() {
            return Ok(false);
        }
        api.delete_food(food_id).await.inspect_err(|e| {
            tracing::error!(food_id, error = %e, "Error deleting food");
        })?;
        audit_log!("delete", format!("food:{food_id}"));
        self.foods.retain(|f| f.id != food_id);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn food(id: i64, name: &str) -> Food {
        Food {
            id,
            name: name.to_string(),
            category: FoodCategory::MainCourse,
            price: Decimal::new(50_000, 0),
        }
    }

    #[test]
    fn test_search_is_page_local_and_case_insensitive() {
        let mut catalog = FoodCatalog {
            foods: vec![food(1, "Pizza Margherita"), food(2, "Nasi Goreng")],
            ..FoodCatalog::default()
        };
        catalog.search = "piz".into();
        let names: Vec<&str> = catalog.visible().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Pizza Margherita"]);

        catalog.search = "GORENG".into();
        assert_eq!(catalog.visible().len(), 1);

        catalog.search.clear();
        assert_eq!(catalog.visible().len(), 2);
    }

    #[test]
    fn test_form_validation() {
        let mut form = FoodForm::create();
        assert!(matches!(form.validate(), Err(ClientError::Validation(_))));

        form.name = "  Es Teh ".into();
        form.category = Some(FoodCategory::Beverages);
        form.price = "abc".into();
        assert!(matches!(form.validate(), Err(ClientError::Validation(_))));

        form.price = "-1".into();
        assert!(matches!(form.validate(), Err(ClientError::Validation(_))));

        form.price = "8000.00".into();
        let payload = form.validate().unwrap();
        assert_eq!(payload.name, "Es Teh");
        assert_eq!(payload.price, Decimal::new(8000, 0));
    }

    #[test]
    fn test_open_edit_prefills_from_row() {
        let mut catalog = FoodCatalog {
            foods: vec![food(4, "Sate Ayam")],
            ..FoodCatalog::default()
        };
        let form = catalog.open_edit(4).unwrap();
        assert_eq!(form.mode, FormMode::Edit(4));
        assert_eq!(form.name, "Sate Ayam");
        assert_eq!(form.category, Some(FoodCategory::MainCourse));

        assert!(catalog.open_edit(99).is_err());
        assert_eq!(catalog.form().map(|f| f.mode), Some(FormMode::Edit(4)));
    }
}
