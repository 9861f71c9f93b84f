//! In-memory gateway for view tests.
//!
//! Behaves like a tiny backend: it records every call, applies mutations to its
//! own copy of the data, can be switched to fail, and can hold the next call
//! open until a oneshot sender fires.

use std::cell::{Cell, RefCell};

use chrono::NaiveDate;
use futures::channel::oneshot;

use crate::gateway::{GatewayError, GroceryGateway};
use crate::models::{
    CreateGroceryPayload, Grocery, GroceryItem, GroceryItemPayload, Item,
    UpdateGroceryItemPayload,
};

const CREATED_AT: &str = "2025-01-01T10:00:00";

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListItems,
    ListGroceries,
    CreateGrocery(CreateGroceryPayload),
    AddItem(i64, GroceryItemPayload),
    UpdateItem(i64, UpdateGroceryItemPayload),
    DeleteItem(i64),
    DeleteGrocery(i64),
}

pub fn line(id: i64, grocery_id: i64, item_id: i64, quantity: i64, purchased: bool) -> GroceryItem {
    GroceryItem {
        id,
        grocery_id,
        item_id,
        quantity,
        purchased,
        created_at: CREATED_AT.to_string(),
        item: None,
    }
}

pub fn grocery(id: i64, grocery_items: Vec<GroceryItem>) -> Grocery {
    Grocery {
        id,
        family_id: 1,
        grocery_date: NaiveDate::from_ymd_opt(2025, 1, 4).unwrap(),
        created_at: CREATED_AT.to_string(),
        grocery_items,
    }
}

pub fn catalog() -> Vec<Item> {
    vec![
        Item::new(10, "Apples", 1),
        Item::new(20, "Bread", 2),
        Item::new(30, "Cheese", 3),
    ]
}

pub struct FakeGateway {
    pub catalog: RefCell<Vec<Item>>,
    pub groceries: RefCell<Vec<Grocery>>,
    calls: RefCell<Vec<Call>>,
    failing: Cell<bool>,
    gate: RefCell<Option<oneshot::Receiver<()>>>,
    next_id: Cell<i64>,
}

impl FakeGateway {
    pub fn new(catalog: Vec<Item>, groceries: Vec<Grocery>) -> Self {
        Self {
            catalog: RefCell::new(catalog),
            groceries: RefCell::new(groceries),
            calls: RefCell::new(Vec::new()),
            failing: Cell::new(false),
            gate: RefCell::new(None),
            next_id: Cell::new(100),
        }
    }

    /// Makes every following call fail with a 500.
    pub fn fail(&self, failing: bool) {
        self.failing.set(failing);
    }

    /// Holds the next call open until the returned sender fires or is dropped.
    pub fn hold_next(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.gate.borrow_mut() = Some(rx);
        tx
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn next_id(&self) -> i64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    async fn respond<T>(
        &self,
        call: Call,
        handle: impl FnOnce(&Self) -> Result<T, GatewayError>,
    ) -> Result<T, GatewayError> {
        self.calls.borrow_mut().push(call);

        let gate = self.gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        if self.failing.get() {
            return Err(status(500));
        }
        handle(self)
    }

    fn new_line(&self, grocery_id: i64, payload: &GroceryItemPayload) -> GroceryItem {
        let mut created = line(
            self.next_id(),
            grocery_id,
            payload.item_id,
            payload.quantity,
            payload.purchased.unwrap_or(false),
        );
        created.item = self
            .catalog
            .borrow()
            .iter()
            .find(|item| item.id == payload.item_id)
            .cloned();
        created
    }
}

fn status(status: u16) -> GatewayError {
    GatewayError::Status {
        url: "fake://grocery-api".to_string(),
        status,
    }
}

impl GroceryGateway for FakeGateway {
    async fn list_items(&self) -> Result<Vec<Item>, GatewayError> {
        self.respond(Call::ListItems, |fake| Ok(fake.catalog.borrow().clone()))
            .await
    }

    async fn list_groceries(&self) -> Result<Vec<Grocery>, GatewayError> {
        self.respond(Call::ListGroceries, |fake| {
            Ok(fake.groceries.borrow().clone())
        })
        .await
    }

    async fn create_grocery(
        &self,
        payload: &CreateGroceryPayload,
    ) -> Result<Grocery, GatewayError> {
        self.respond(Call::CreateGrocery(payload.clone()), |fake| {
            let date = NaiveDate::parse_from_str(&payload.grocery_date, "%Y-%m-%d")
                .map_err(|_| status(422))?;
            let id = fake.next_id();
            let mut created = grocery(id, Vec::new());
            created.family_id = payload.family_id;
            created.grocery_date = date;
            created.grocery_items = payload
                .grocery_items
                .iter()
                .map(|p| fake.new_line(id, p))
                .collect();
            fake.groceries.borrow_mut().push(created.clone());
            Ok(created)
        })
        .await
    }

    async fn add_item(
        &self,
        grocery_id: i64,
        payload: &GroceryItemPayload,
    ) -> Result<GroceryItem, GatewayError> {
        self.respond(Call::AddItem(grocery_id, payload.clone()), |fake| {
            let created = fake.new_line(grocery_id, payload);
            let mut groceries = fake.groceries.borrow_mut();
            let target = groceries
                .iter_mut()
                .find(|g| g.id == grocery_id)
                .ok_or_else(|| status(404))?;
            target.grocery_items.push(created.clone());
            Ok(created)
        })
        .await
    }

    async fn update_grocery_item(
        &self,
        grocery_item_id: i64,
        changes: &UpdateGroceryItemPayload,
    ) -> Result<GroceryItem, GatewayError> {
        self.respond(Call::UpdateItem(grocery_item_id, changes.clone()), |fake| {
            let mut groceries = fake.groceries.borrow_mut();
            let item = groceries
                .iter_mut()
                .flat_map(|g| g.grocery_items.iter_mut())
                .find(|gi| gi.id == grocery_item_id)
                .ok_or_else(|| status(404))?;
            if let Some(item_id) = changes.item_id {
                item.item_id = item_id;
            }
            if let Some(quantity) = changes.quantity {
                item.quantity = quantity;
            }
            if let Some(purchased) = changes.purchased {
                item.purchased = purchased;
            }
            Ok(item.clone())
        })
        .await
    }

    async fn delete_grocery_item(&self, grocery_item_id: i64) -> Result<(), GatewayError> {
        self.respond(Call::DeleteItem(grocery_item_id), |fake| {
            let mut groceries = fake.groceries.borrow_mut();
            let owner = groceries
                .iter_mut()
                .find(|g| g.find_item(grocery_item_id).is_some())
                .ok_or_else(|| status(404))?;
            owner.grocery_items.retain(|gi| gi.id != grocery_item_id);
            Ok(())
        })
        .await
    }

    async fn delete_grocery(&self, grocery_id: i64) -> Result<(), GatewayError> {
        self.respond(Call::DeleteGrocery(grocery_id), |fake| {
            let mut groceries = fake.groceries.borrow_mut();
            let before = groceries.len();
            groceries.retain(|g| g.id != grocery_id);
            if groceries.len() == before {
                return Err(status(404));
            }
            Ok(())
        })
        .await
    }
}
