//! Saved-lists screen: browse, edit and delete groceries and their items.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashSet;

use super::guard::{on_exit, ScopeGuard};
use super::{Confirm, Outcome};
use crate::forms::{AddItemForm, FormFactory, FormTree};
use crate::gateway::{GatewayError, GroceryGateway};
use crate::models::{available_items, Grocery, GroceryItem, Item, UpdateGroceryItemPayload};

const LOAD_FAILED: &str = "Unable to load grocery lists. Please try again later.";
const ADD_FAILED: &str = "Unable to add the selected item. Please try again.";
const TOGGLE_FAILED: &str = "Could not update the purchased state. Please retry.";
const QUANTITY_FAILED: &str = "Unable to change the quantity right now.";
const REMOVE_ITEM_FAILED: &str = "Unable to remove the item. Please try again.";
const DELETE_GROCERY_FAILED: &str = "Unable to delete that grocery list. Please try again.";

#[derive(Debug)]
pub struct ListState {
    pub groceries: Vec<Grocery>,
    pub catalog: Vec<Item>,
    pub loading: bool,
    /// Message for the most recent failed action
    pub error_message: Option<String>,
    /// Grocery the add-item sub-form is open for
    pub active_add_for: Option<i64>,
    pub new_item_form: AddItemForm,
    pub adding_item_pending: bool,
    item_busy: HashSet<i64>,
    grocery_busy: HashSet<i64>,
}

impl ListState {
    pub fn find_grocery(&self, grocery_id: i64) -> Option<&Grocery> {
        self.groceries.iter().find(|g| g.id == grocery_id)
    }

    fn find_grocery_mut(&mut self, grocery_id: i64) -> Option<&mut Grocery> {
        self.groceries.iter_mut().find(|g| g.id == grocery_id)
    }

    fn find_item(&self, grocery_id: i64, grocery_item_id: i64) -> Option<&GroceryItem> {
        self.find_grocery(grocery_id)?.find_item(grocery_item_id)
    }

    pub fn is_item_busy(&self, grocery_item_id: i64) -> bool {
        self.item_busy.contains(&grocery_item_id)
    }

    pub fn is_grocery_busy(&self, grocery_id: i64) -> bool {
        self.grocery_busy.contains(&grocery_id)
    }

    /// Display name for a line: embedded snapshot, then catalog, then a fallback.
    fn item_label(&self, item: &GroceryItem) -> String {
        item.item_name()
            .or_else(|| {
                self.catalog
                    .iter()
                    .find(|c| c.id == item.item_id)
                    .map(|c| c.name.as_str())
            })
            .unwrap_or("this item")
            .to_string()
    }
}

/// Owns the collection of saved groceries and the mutations on it.
///
/// Every mutation is locked per entity id: while a request for an item or
/// grocery is in flight, further actions on that id are skipped. Locks are
/// released on every exit path.
pub struct ListView<G> {
    gateway: G,
    confirm: Box<dyn Confirm>,
    state: RefCell<ListState>,
}

impl<G: GroceryGateway> ListView<G> {
    pub fn new(gateway: G, confirm: Box<dyn Confirm>) -> Self {
        let state = ListState {
            groceries: Vec::new(),
            catalog: Vec::new(),
            loading: false,
            error_message: None,
            active_add_for: None,
            new_item_form: FormFactory::new().create_add_item(),
            adding_item_pending: false,
            item_busy: HashSet::new(),
            grocery_busy: HashSet::new(),
        };
        Self {
            gateway,
            confirm,
            state: RefCell::new(state),
        }
    }

    pub fn state(&self) -> Ref<'_, ListState> {
        self.state.borrow()
    }

    /// Mutable access to the add-item sub-form for user edits.
    pub fn new_item_form_mut(&self) -> RefMut<'_, AddItemForm> {
        RefMut::map(self.state.borrow_mut(), |state| &mut state.new_item_form)
    }

    pub fn is_item_busy(&self, grocery_item_id: i64) -> bool {
        self.state.borrow().is_item_busy(grocery_item_id)
    }

    pub fn is_grocery_busy(&self, grocery_id: i64) -> bool {
        self.state.borrow().is_grocery_busy(grocery_id)
    }

    /// Loads both the groceries and the catalog.
    pub async fn mount(&self) -> Outcome {
        let (outcome, _) = futures::join!(self.load_groceries(), self.load_items());
        outcome
    }

    /// Replaces the collection from the server. On failure the previous
    /// collection is kept and an error message is set.
    pub async fn load_groceries(&self) -> Outcome {
        {
            let mut state = self.state.borrow_mut();
            state.loading = true;
            state.error_message = None;
        }

        let result = self.gateway.list_groceries().await;

        let mut state = self.state.borrow_mut();
        state.loading = false;
        match result {
            Ok(groceries) => {
                state.groceries = groceries;
                Outcome::Applied
            }
            Err(e) => {
                tracing::error!("Failed to load groceries: {}", e);
                state.error_message = Some(LOAD_FAILED.to_string());
                Outcome::Failed
            }
        }
    }

    /// Fetches the catalog. Failures are only logged.
    pub async fn load_items(&self) -> Outcome {
        match self.gateway.list_items().await {
            Ok(items) => {
                self.state.borrow_mut().catalog = items;
                Outcome::Applied
            }
            Err(e) => {
                tracing::warn!("Failed to load items: {}", e);
                Outcome::Failed
            }
        }
    }

    /// Opens the add-item sub-form for a grocery with fresh defaults.
    pub fn open_add_item(&self, grocery_id: i64) {
        let mut state = self.state.borrow_mut();
        state.active_add_for = Some(grocery_id);
        state.new_item_form.reset();
    }

    pub fn cancel_add_item(&self) {
        let mut state = self.state.borrow_mut();
        state.active_add_for = None;
        state.adding_item_pending = false;
    }

    /// Adds the sub-form's item to a grocery.
    ///
    /// On failure the sub-form stays open with its values for a retry.
    pub async fn submit_new_item(&self, grocery_id: i64) -> Outcome {
        let payload = {
            let mut state = self.state.borrow_mut();
            if state.adding_item_pending || state.find_grocery(grocery_id).is_none() {
                return Outcome::Skipped;
            }
            if !state.new_item_form.is_valid() {
                state.new_item_form.mark_all_touched();
                return Outcome::Invalid;
            }
            match state.new_item_form.to_payload() {
                Ok(payload) => payload,
                Err(_) => {
                    state.new_item_form.mark_all_touched();
                    return Outcome::Invalid;
                }
            }
        };
        let _pending = self.lock_add_item();

        let result = self.gateway.add_item(grocery_id, &payload).await;

        let mut state = self.state.borrow_mut();
        match result {
            Ok(created) => {
                if let Some(grocery) = state.find_grocery_mut(grocery_id) {
                    grocery.push_item(created);
                }
                state.active_add_for = None;
                state.new_item_form.reset();
                Outcome::Applied
            }
            Err(e) => {
                tracing::error!("Failed to add grocery item: {}", e);
                state.error_message = Some(ADD_FAILED.to_string());
                Outcome::Failed
            }
        }
    }

    /// Flips an item's purchased flag.
    pub async fn toggle_purchased(&self, grocery_id: i64, grocery_item_id: i64) -> Outcome {
        let Some(purchased) = self
            .state
            .borrow()
            .find_item(grocery_id, grocery_item_id)
            .map(|item| item.purchased)
        else {
            return Outcome::Skipped;
        };
        let Some(_busy) = self.lock_item(grocery_item_id) else {
            return Outcome::Skipped;
        };

        let changes = UpdateGroceryItemPayload::purchased(!purchased);
        let result = self
            .gateway
            .update_grocery_item(grocery_item_id, &changes)
            .await;
        self.reconcile_update(grocery_id, result, TOGGLE_FAILED, "purchased status")
    }

    /// Adjusts an item's quantity by `delta`. Never goes below 1.
    pub async fn change_quantity(&self, grocery_id: i64, grocery_item_id: i64, delta: i64) -> Outcome {
        let Some(quantity) = self
            .state
            .borrow()
            .find_item(grocery_id, grocery_item_id)
            .map(|item| item.quantity)
        else {
            return Outcome::Skipped;
        };
        let Some(new_quantity) = quantity.checked_add(delta).filter(|q| *q >= 1) else {
            return Outcome::Skipped;
        };
        let Some(_busy) = self.lock_item(grocery_item_id) else {
            return Outcome::Skipped;
        };

        let changes = UpdateGroceryItemPayload::quantity(new_quantity);
        let result = self
            .gateway
            .update_grocery_item(grocery_item_id, &changes)
            .await;
        self.reconcile_update(grocery_id, result, QUANTITY_FAILED, "quantity")
    }

    /// Removes an item from a grocery after the user confirms.
    pub async fn delete_item(&self, grocery_id: i64, grocery_item_id: i64) -> Outcome {
        let label = {
            let state = self.state.borrow();
            let Some(item) = state.find_item(grocery_id, grocery_item_id) else {
                return Outcome::Skipped;
            };
            if state.is_item_busy(grocery_item_id) {
                return Outcome::Skipped;
            }
            state.item_label(item)
        };
        let prompt = format!("Remove {} from grocery list #{}?", label, grocery_id);
        if !self.confirm.confirm(&prompt) {
            return Outcome::Declined;
        }
        let Some(_busy) = self.lock_item(grocery_item_id) else {
            return Outcome::Skipped;
        };

        let result = self.gateway.delete_grocery_item(grocery_item_id).await;

        let mut state = self.state.borrow_mut();
        match result {
            Ok(()) => {
                if let Some(grocery) = state.find_grocery_mut(grocery_id) {
                    grocery.remove_item(grocery_item_id);
                }
                Outcome::Applied
            }
            Err(e) => {
                tracing::error!("Failed to delete grocery item: {}", e);
                state.error_message = Some(REMOVE_ITEM_FAILED.to_string());
                Outcome::Failed
            }
        }
    }

    /// Deletes a grocery and all of its items after the user confirms.
    pub async fn delete_grocery(&self, grocery_id: i64) -> Outcome {
        {
            let state = self.state.borrow();
            if state.find_grocery(grocery_id).is_none() || state.is_grocery_busy(grocery_id) {
                return Outcome::Skipped;
            }
        }
        let prompt = format!(
            "Delete grocery list #{}? This will remove all of its items.",
            grocery_id
        );
        if !self.confirm.confirm(&prompt) {
            return Outcome::Declined;
        }
        let Some(_busy) = self.lock_grocery(grocery_id) else {
            return Outcome::Skipped;
        };

        let result = self.gateway.delete_grocery(grocery_id).await;

        let mut state = self.state.borrow_mut();
        match result {
            Ok(()) => {
                state.groceries = state
                    .groceries
                    .iter()
                    .filter(|g| g.id != grocery_id)
                    .cloned()
                    .collect();
                Outcome::Applied
            }
            Err(e) => {
                tracing::error!("Failed to delete grocery list: {}", e);
                state.error_message = Some(DELETE_GROCERY_FAILED.to_string());
                Outcome::Failed
            }
        }
    }

    /// Catalog items not yet on the grocery; empty for an unknown grocery.
    pub fn available_items_for(&self, grocery_id: i64) -> Vec<Item> {
        let state = self.state.borrow();
        state
            .find_grocery(grocery_id)
            .map(|grocery| available_items(&state.catalog, grocery))
            .unwrap_or_default()
    }

    fn reconcile_update(
        &self,
        grocery_id: i64,
        result: Result<GroceryItem, GatewayError>,
        message: &str,
        what: &str,
    ) -> Outcome {
        let mut state = self.state.borrow_mut();
        match result {
            Ok(updated) => {
                if let Some(grocery) = state.find_grocery_mut(grocery_id) {
                    grocery.replace_item(updated);
                }
                Outcome::Applied
            }
            Err(e) => {
                tracing::error!("Failed to change {}: {}", what, e);
                state.error_message = Some(message.to_string());
                Outcome::Failed
            }
        }
    }

    /// Marks an item busy and clears the last error. `None` if already busy.
    fn lock_item(&self, id: i64) -> Option<ScopeGuard<'_, ListState, impl FnOnce(&mut ListState)>> {
        {
            let mut state = self.state.borrow_mut();
            if !state.item_busy.insert(id) {
                return None;
            }
            state.error_message = None;
        }
        Some(on_exit(&self.state, move |state: &mut ListState| {
            state.item_busy.remove(&id);
        }))
    }

    fn lock_grocery(
        &self,
        id: i64,
    ) -> Option<ScopeGuard<'_, ListState, impl FnOnce(&mut ListState)>> {
        {
            let mut state = self.state.borrow_mut();
            if !state.grocery_busy.insert(id) {
                return None;
            }
            state.error_message = None;
        }
        Some(on_exit(&self.state, move |state: &mut ListState| {
            state.grocery_busy.remove(&id);
        }))
    }

    fn lock_add_item(&self) -> ScopeGuard<'_, ListState, impl FnOnce(&mut ListState)> {
        {
            let mut state = self.state.borrow_mut();
            state.adding_item_pending = true;
            state.error_message = None;
        }
        on_exit(&self.state, |state: &mut ListState| {
            state.adding_item_pending = false;
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{catalog, grocery, line, Call, FakeGateway};
    use futures::join;
    use std::rc::Rc;

    type Prompts = Rc<RefCell<Vec<String>>>;

    fn recording(answer: bool) -> (Box<dyn Confirm>, Prompts) {
        let prompts: Prompts = Rc::new(RefCell::new(Vec::new()));
        let seen = prompts.clone();
        let confirm = move |message: &str| {
            seen.borrow_mut().push(message.to_string());
            answer
        };
        (Box::new(confirm), prompts)
    }

    fn backend() -> FakeGateway {
        let mut named = line(6, 1, 20, 3, false);
        named.item = Some(Item::new(20, "Wholegrain Bread", 2));
        FakeGateway::new(
            catalog(),
            vec![
                grocery(1, vec![line(5, 1, 10, 2, false), named]),
                grocery(2, vec![line(7, 2, 30, 1, true), line(8, 2, 99, 1, false)]),
            ],
        )
    }

    async fn loaded(fake: &FakeGateway, confirm: Box<dyn Confirm>) -> ListView<&FakeGateway> {
        let view = ListView::new(fake, confirm);
        assert_eq!(view.mount().await, Outcome::Applied);
        view
    }

    fn mutations(fake: &FakeGateway) -> Vec<Call> {
        fake.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::ListItems | Call::ListGroceries))
            .collect()
    }

    fn item(view: &ListView<&FakeGateway>, grocery_id: i64, id: i64) -> Option<GroceryItem> {
        view.state().find_item(grocery_id, id).cloned()
    }

    #[tokio::test]
    async fn test_mount_loads_groceries_and_catalog() {
        let fake = backend();
        let view = loaded(&fake, Box::new(|_: &str| true)).await;

        let state = view.state();
        assert_eq!(state.groceries.len(), 2);
        assert_eq!(state.catalog.len(), 3);
        assert!(!state.loading);
        assert!(state.error_message.is_none());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_collection() {
        let fake = backend();
        let view = loaded(&fake, Box::new(|_: &str| true)).await;

        fake.fail(true);
        assert_eq!(view.load_groceries().await, Outcome::Failed);
        {
            let state = view.state();
            assert_eq!(state.groceries.len(), 2);
            assert!(!state.loading);
            assert_eq!(state.error_message.as_deref(), Some(LOAD_FAILED));
        }

        fake.fail(false);
        fake.groceries.borrow_mut().pop();
        assert_eq!(view.load_groceries().await, Outcome::Applied);
        let state = view.state();
        assert_eq!(state.groceries.len(), 1);
        assert!(state.error_message.is_none());
    }

    #[tokio::test]
    async fn test_loading_flag_set_while_in_flight() {
        let fake = backend();
        let view = ListView::new(&fake, Box::new(|_: &str| true));
        let release = fake.hold_next();

        let (outcome, _) = join!(view.load_groceries(), async {
            assert!(view.state().loading);
            release.send(()).unwrap();
        });

        assert_eq!(outcome, Outcome::Applied);
        assert!(!view.state().loading);
    }

    #[tokio::test]
    async fn test_catalog_failure_is_silent() {
        let fake = backend();
        fake.fail(true);
        let view = ListView::new(&fake, Box::new(|_: &str| true));

        assert_eq!(view.load_items().await, Outcome::Failed);
        assert!(view.state().catalog.is_empty());
        assert!(view.state().error_message.is_none());
    }

    #[tokio::test]
    async fn test_open_and_cancel_add_item() {
        let fake = backend();
        let view = loaded(&fake, Box::new(|_: &str| true)).await;

        view.new_item_form_mut().item_id.set_value("30");
        view.open_add_item(1);
        {
            let state = view.state();
            assert_eq!(state.active_add_for, Some(1));
            assert_eq!(state.new_item_form, FormFactory::new().create_add_item());
        }

        view.cancel_add_item();
        let state = view.state();
        assert_eq!(state.active_add_for, None);
        assert!(!state.adding_item_pending);
        assert!(mutations(&fake).is_empty());
    }

    #[tokio::test]
    async fn test_submit_new_item_invalid_sends_nothing() {
        let fake = backend();
        let view = loaded(&fake, Box::new(|_: &str| true)).await;
        view.open_add_item(1);

        assert_eq!(view.submit_new_item(1).await, Outcome::Invalid);

        assert!(mutations(&fake).is_empty());
        let state = view.state();
        assert!(state.new_item_form.item_id.shows_error());
        assert!(state.new_item_form.quantity.touched());
        assert_eq!(state.active_add_for, Some(1));
    }

    #[tokio::test]
    async fn test_submit_new_item_appends_and_closes() {
        let fake = backend();
        let view = loaded(&fake, Box::new(|_: &str| true)).await;
        view.open_add_item(1);
        {
            let mut form = view.new_item_form_mut();
            form.item_id.set_value("30");
            form.quantity.set_value("2");
        }

        assert_eq!(view.submit_new_item(1).await, Outcome::Applied);

        assert_eq!(
            mutations(&fake),
            vec![Call::AddItem(
                1,
                crate::models::GroceryItemPayload {
                    item_id: 30,
                    quantity: 2,
                    purchased: Some(false)
                }
            )]
        );
        let state = view.state();
        let items = &state.find_grocery(1).unwrap().grocery_items;
        assert_eq!(items.len(), 3);
        assert_eq!(items[2].item_id, 30);
        assert_eq!(items[2].quantity, 2);
        assert_eq!(state.active_add_for, None);
        assert!(!state.adding_item_pending);
        assert_eq!(state.new_item_form, FormFactory::new().create_add_item());
    }

    #[tokio::test]
    async fn test_submit_new_item_failure_keeps_form_open() {
        let fake = backend();
        let view = loaded(&fake, Box::new(|_: &str| true)).await;
        view.open_add_item(2);
        view.new_item_form_mut().item_id.set_value("10");
        fake.fail(true);

        assert_eq!(view.submit_new_item(2).await, Outcome::Failed);

        let state = view.state();
        assert_eq!(state.error_message.as_deref(), Some(ADD_FAILED));
        assert_eq!(state.active_add_for, Some(2));
        assert_eq!(state.new_item_form.item_id.value(), "10");
        assert!(!state.adding_item_pending);
        assert_eq!(state.find_grocery(2).unwrap().grocery_items.len(), 2);
    }

    #[tokio::test]
    async fn test_add_item_pending_while_in_flight() {
        let fake = backend();
        let view = loaded(&fake, Box::new(|_: &str| true)).await;
        view.open_add_item(1);
        view.new_item_form_mut().item_id.set_value("30");
        let release = fake.hold_next();

        let (first, second) = join!(view.submit_new_item(1), async {
            assert!(view.state().adding_item_pending);
            let outcome = view.submit_new_item(1).await;
            release.send(()).unwrap();
            outcome
        });

        assert_eq!(first, Outcome::Applied);
        assert_eq!(second, Outcome::Skipped);
        assert_eq!(mutations(&fake).len(), 1);
        assert!(!view.state().adding_item_pending);
    }

    #[tokio::test]
    async fn test_toggle_purchased_replaces_item_with_response() {
        let fake = backend();
        let view = loaded(&fake, Box::new(|_: &str| true)).await;

        assert_eq!(view.toggle_purchased(1, 5).await, Outcome::Applied);

        assert_eq!(
            mutations(&fake),
            vec![Call::UpdateItem(5, UpdateGroceryItemPayload::purchased(true))]
        );
        assert_eq!(item(&view, 1, 5), Some(line(5, 1, 10, 2, true)));
        assert!(!view.is_item_busy(5));
    }

    #[tokio::test]
    async fn test_concurrent_toggle_same_item_is_skipped() {
        let fake = backend();
        let view = loaded(&fake, Box::new(|_: &str| true)).await;
        let release = fake.hold_next();

        let (first, second) = join!(view.toggle_purchased(1, 5), async {
            assert!(view.is_item_busy(5));
            let outcome = view.toggle_purchased(1, 5).await;
            release.send(()).unwrap();
            outcome
        });

        assert_eq!(first, Outcome::Applied);
        assert_eq!(second, Outcome::Skipped);
        assert_eq!(mutations(&fake).len(), 1);
        assert!(!view.is_item_busy(5));
        assert!(item(&view, 1, 5).unwrap().purchased);
    }

    #[tokio::test]
    async fn test_concurrent_actions_on_different_items_both_apply() {
        let fake = backend();
        let view = loaded(&fake, Box::new(|_: &str| true)).await;
        let release = fake.hold_next();

        let (first, second) = join!(view.toggle_purchased(1, 5), async {
            let outcome = view.change_quantity(1, 6, 1).await;
            release.send(()).unwrap();
            outcome
        });

        assert_eq!(first, Outcome::Applied);
        assert_eq!(second, Outcome::Applied);
        assert!(item(&view, 1, 5).unwrap().purchased);
        assert_eq!(item(&view, 1, 6).unwrap().quantity, 4);
        assert!(!view.is_item_busy(5));
        assert!(!view.is_item_busy(6));
    }

    #[tokio::test]
    async fn test_toggle_failure_sets_error_and_releases_item() {
        let fake = backend();
        let view = loaded(&fake, Box::new(|_: &str| true)).await;
        fake.fail(true);

        assert_eq!(view.toggle_purchased(1, 5).await, Outcome::Failed);

        assert_eq!(view.state().error_message.as_deref(), Some(TOGGLE_FAILED));
        assert!(!view.is_item_busy(5));
        assert!(!item(&view, 1, 5).unwrap().purchased);
    }

    #[tokio::test]
    async fn test_next_action_clears_stale_error() {
        let fake = backend();
        let view = loaded(&fake, Box::new(|_: &str| true)).await;
        fake.fail(true);
        assert_eq!(view.change_quantity(1, 5, 1).await, Outcome::Failed);
        assert_eq!(view.state().error_message.as_deref(), Some(QUANTITY_FAILED));

        fake.fail(false);
        assert_eq!(view.toggle_purchased(1, 5).await, Outcome::Applied);
        assert!(view.state().error_message.is_none());
    }

    #[tokio::test]
    async fn test_change_quantity_below_one_is_noop() {
        let fake = backend();
        let view = loaded(&fake, Box::new(|_: &str| true)).await;

        assert_eq!(view.change_quantity(1, 6, -5).await, Outcome::Skipped);
        assert_eq!(view.change_quantity(1, 6, -3).await, Outcome::Skipped);

        assert!(mutations(&fake).is_empty());
        assert!(!view.is_item_busy(6));
        assert_eq!(item(&view, 1, 6).unwrap().quantity, 3);
    }

    #[tokio::test]
    async fn test_change_quantity_overflow_is_noop() {
        let fake = backend();
        let view = loaded(&fake, Box::new(|_: &str| true)).await;

        assert_eq!(view.change_quantity(1, 5, i64::MAX).await, Outcome::Skipped);
        assert_eq!(view.change_quantity(1, 5, i64::MIN).await, Outcome::Skipped);

        assert!(mutations(&fake).is_empty());
        assert!(!view.is_item_busy(5));
        assert_eq!(item(&view, 1, 5).unwrap().quantity, 2);
    }

    #[tokio::test]
    async fn test_change_quantity_patches_new_value() {
        let fake = backend();
        let view = loaded(&fake, Box::new(|_: &str| true)).await;

        assert_eq!(view.change_quantity(1, 6, -2).await, Outcome::Applied);

        assert_eq!(
            mutations(&fake),
            vec![Call::UpdateItem(6, UpdateGroceryItemPayload::quantity(1))]
        );
        assert_eq!(item(&view, 1, 6).unwrap().quantity, 1);
    }

    #[tokio::test]
    async fn test_unknown_ids_are_skipped() {
        let fake = backend();
        let view = loaded(&fake, Box::new(|_: &str| true)).await;

        assert_eq!(view.toggle_purchased(1, 7).await, Outcome::Skipped);
        assert_eq!(view.change_quantity(9, 5, 1).await, Outcome::Skipped);
        assert_eq!(view.delete_item(1, 99).await, Outcome::Skipped);
        assert_eq!(view.delete_grocery(9).await, Outcome::Skipped);
        assert_eq!(view.submit_new_item(9).await, Outcome::Skipped);
        assert!(mutations(&fake).is_empty());
    }

    #[tokio::test]
    async fn test_delete_item_prompt_names_item() {
        let fake = backend();
        let (confirm, prompts) = recording(false);
        let view = loaded(&fake, confirm).await;

        assert_eq!(view.delete_item(1, 5).await, Outcome::Declined);
        assert_eq!(view.delete_item(1, 6).await, Outcome::Declined);
        assert_eq!(view.delete_item(2, 8).await, Outcome::Declined);

        assert_eq!(
            *prompts.borrow(),
            vec![
                "Remove Apples from grocery list #1?".to_string(),
                "Remove Wholegrain Bread from grocery list #1?".to_string(),
                "Remove this item from grocery list #2?".to_string(),
            ]
        );
        assert!(mutations(&fake).is_empty());
        assert_eq!(view.state().find_grocery(1).unwrap().grocery_items.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_item_removes_line() {
        let fake = backend();
        let view = loaded(&fake, Box::new(|_: &str| true)).await;

        assert_eq!(view.delete_item(1, 5).await, Outcome::Applied);

        assert_eq!(mutations(&fake), vec![Call::DeleteItem(5)]);
        assert!(item(&view, 1, 5).is_none());
        assert!(item(&view, 1, 6).is_some());
        assert!(!view.is_item_busy(5));
    }

    #[tokio::test]
    async fn test_delete_item_failure_keeps_line() {
        let fake = backend();
        let view = loaded(&fake, Box::new(|_: &str| true)).await;
        fake.fail(true);

        assert_eq!(view.delete_item(2, 7).await, Outcome::Failed);

        assert_eq!(view.state().error_message.as_deref(), Some(REMOVE_ITEM_FAILED));
        assert!(item(&view, 2, 7).is_some());
        assert!(!view.is_item_busy(7));
    }

    #[tokio::test]
    async fn test_delete_grocery_declined_sends_nothing() {
        let fake = backend();
        let (confirm, prompts) = recording(false);
        let view = loaded(&fake, confirm).await;

        assert_eq!(view.delete_grocery(1).await, Outcome::Declined);

        assert_eq!(
            *prompts.borrow(),
            vec!["Delete grocery list #1? This will remove all of its items.".to_string()]
        );
        assert!(mutations(&fake).is_empty());
        assert_eq!(view.state().groceries.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_grocery_removes_from_collection() {
        let fake = backend();
        let view = loaded(&fake, Box::new(|_: &str| true)).await;

        assert_eq!(view.delete_grocery(1).await, Outcome::Applied);

        assert_eq!(mutations(&fake), vec![Call::DeleteGrocery(1)]);
        let state = view.state();
        assert_eq!(state.groceries.len(), 1);
        assert_eq!(state.groceries[0].id, 2);
        assert!(!state.is_grocery_busy(1));
    }

    #[tokio::test]
    async fn test_delete_grocery_busy_is_skipped() {
        let fake = backend();
        let view = loaded(&fake, Box::new(|_: &str| true)).await;
        let release = fake.hold_next();

        let (first, second) = join!(view.delete_grocery(2), async {
            assert!(view.is_grocery_busy(2));
            let outcome = view.delete_grocery(2).await;
            release.send(()).unwrap();
            outcome
        });

        assert_eq!(first, Outcome::Applied);
        assert_eq!(second, Outcome::Skipped);
        assert_eq!(mutations(&fake), vec![Call::DeleteGrocery(2)]);
    }

    #[tokio::test]
    async fn test_delete_grocery_failure_preserves_collection() {
        let fake = backend();
        let view = loaded(&fake, Box::new(|_: &str| true)).await;
        fake.fail(true);

        assert_eq!(view.delete_grocery(2).await, Outcome::Failed);

        let state = view.state();
        assert_eq!(state.error_message.as_deref(), Some(DELETE_GROCERY_FAILED));
        assert_eq!(state.groceries.len(), 2);
        assert!(!state.is_grocery_busy(2));
    }

    #[tokio::test]
    async fn test_available_items_excludes_items_on_list() {
        let fake = backend();
        let view = loaded(&fake, Box::new(|_: &str| true)).await;

        assert_eq!(view.available_items_for(1), vec![Item::new(30, "Cheese", 3)]);
        assert_eq!(
            view.available_items_for(2)
                .into_iter()
                .map(|i| i.id)
                .collect::<Vec<_>>(),
            vec![10, 20]
        );
        assert!(view.available_items_for(9).is_empty());
    }
}
