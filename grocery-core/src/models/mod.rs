mod grocery;
mod item;
mod payload;

pub use grocery::{available_items, Grocery, GroceryItem};
pub use item::{Item, ItemType};
pub use payload::{CreateGroceryPayload, GroceryItemPayload, UpdateGroceryItemPayload};
