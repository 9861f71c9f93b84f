//! Create-grocery screen.

use std::cell::{Ref, RefCell, RefMut};
use std::time::Duration;

use tokio::time::Instant;

use super::guard::on_exit;
use super::Outcome;
use crate::forms::{FormFactory, FormTree, GroceryForm, ItemDefaults};
use crate::gateway::GroceryGateway;
use crate::models::Item;

/// How long the "saved" indicator stays up after a successful submit.
pub const SAVE_SUCCESS_DURATION: Duration = Duration::from_millis(3000);

const SAVE_FAILED: &str = "Failed to save grocery";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerStatus {
    Idle,
    Submitting,
}

#[derive(Debug)]
pub struct PlannerState {
    pub form: GroceryForm,
    /// Catalog for the item selector; empty when it could not be fetched
    pub catalog: Vec<Item>,
    pub status: PlannerStatus,
    /// Failure notice from the last submit
    pub notice: Option<String>,
    success_until: Option<Instant>,
}

impl PlannerState {
    /// Whether the success indicator is showing. It clears itself after
    /// [`SAVE_SUCCESS_DURATION`].
    pub fn save_success(&self) -> bool {
        self.success_until
            .is_some_and(|until| Instant::now() < until)
    }

    pub fn is_submitting(&self) -> bool {
        self.status == PlannerStatus::Submitting
    }
}

/// Owns the create-grocery form lifecycle: `Idle -> Submitting -> Idle`.
pub struct PlannerView<G> {
    gateway: G,
    factory: FormFactory,
    state: RefCell<PlannerState>,
}

impl<G: GroceryGateway> PlannerView<G> {
    pub fn new(gateway: G, factory: FormFactory) -> Self {
        let state = PlannerState {
            form: factory.create_list(),
            catalog: Vec::new(),
            status: PlannerStatus::Idle,
            notice: None,
            success_until: None,
        };
        Self {
            gateway,
            factory,
            state: RefCell::new(state),
        }
    }

    pub fn state(&self) -> Ref<'_, PlannerState> {
        self.state.borrow()
    }

    /// Mutable access to the form for user edits.
    pub fn form_mut(&self) -> RefMut<'_, GroceryForm> {
        RefMut::map(self.state.borrow_mut(), |state| &mut state.form)
    }

    /// Fetches the item catalog. Failure leaves it empty; the form stays usable.
    pub async fn mount(&self) -> Outcome {
        match self.gateway.list_items().await {
            Ok(items) => {
                self.state.borrow_mut().catalog = items;
                Outcome::Applied
            }
            Err(e) => {
                tracing::warn!("Error fetching items: {}", e);
                Outcome::Failed
            }
        }
    }

    pub fn add_item(&self) {
        self.add_item_with(None);
    }

    pub fn add_item_with(&self, initial: Option<ItemDefaults>) {
        self.state
            .borrow_mut()
            .form
            .add_item(&self.factory, initial);
    }

    /// Removes an item group; refused when only one is left.
    pub fn remove_item(&self, index: usize) -> bool {
        self.state.borrow_mut().form.remove_item(index)
    }

    /// Validates and submits the form.
    ///
    /// Invalid input marks every field touched and sends nothing. On success
    /// the form is reset to a single fresh item group; on failure the entered
    /// values are kept for a retry.
    pub async fn submit_form(&self) -> Outcome {
        let payload = {
            let mut state = self.state.borrow_mut();
            if state.is_submitting() {
                return Outcome::Skipped;
            }
            if !state.form.is_valid() {
                state.form.mark_all_touched();
                return Outcome::Invalid;
            }
            let payload = match state.form.to_payload() {
                Ok(payload) => payload,
                Err(e) => {
                    tracing::debug!("Form passed validation but did not convert: {}", e);
                    state.form.mark_all_touched();
                    return Outcome::Invalid;
                }
            };
            state.notice = None;
            state.status = PlannerStatus::Submitting;
            payload
        };
        let _idle = on_exit(&self.state, |state: &mut PlannerState| {
            state.status = PlannerStatus::Idle;
        });

        let result = self.gateway.create_grocery(&payload).await;

        let mut state = self.state.borrow_mut();
        match result {
            Ok(created) => {
                tracing::info!(
                    "Created grocery list #{} with {} item(s)",
                    created.id,
                    created.grocery_items.len()
                );
                state.success_until = Some(Instant::now() + SAVE_SUCCESS_DURATION);
                state.form = self.factory.create_list();
                state.form.mark_pristine();
                Outcome::Applied
            }
            Err(e) => {
                tracing::error!("Error saving grocery: {}", e);
                state.notice = Some(SAVE_FAILED.to_string());
                Outcome::Failed
            }
        }
    }
}
