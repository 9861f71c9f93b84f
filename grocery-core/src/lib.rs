//! Grocery Planner Core Library
//!
//! Shared types, the REST gateway and the view state used by Grocery Planner
//! front-ends.

pub mod forms;
pub mod gateway;
pub mod models;
pub mod views;

#[cfg(test)]
mod testing;

pub use forms::{
    AddItemForm, FieldError, FormFactory, FormField, FormTree, GroceryForm, GroceryItemGroup,
    ItemDefaults, ValidationError, Validator,
};
pub use gateway::{GatewayError, GroceryGateway, HttpGateway, DEFAULT_API_URL};
pub use models::{
    available_items, CreateGroceryPayload, Grocery, GroceryItem, GroceryItemPayload, Item,
    ItemType, UpdateGroceryItemPayload,
};
pub use views::{Confirm, ListState, ListView, Outcome, PlannerState, PlannerStatus, PlannerView};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
