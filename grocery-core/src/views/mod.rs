//! View state for the two grocery screens.
//!
//! Both views keep their state in a `RefCell` and expose `&self` async
//! handlers. State is only borrowed between awaits, so several handlers can be
//! in flight on one thread while each reconciles only its own record.

mod guard;
mod list;
mod planner;

pub use list::{ListState, ListView};
pub use planner::{PlannerState, PlannerStatus, PlannerView, SAVE_SUCCESS_DURATION};

/// What a handler did with a user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The gateway call succeeded and local state was reconciled
    Applied,
    /// Validation failed; fields were marked touched and nothing was sent
    Invalid,
    /// Guarded out (busy entity, bad quantity, unknown id); nothing was sent
    Skipped,
    /// The user declined the confirmation prompt
    Declined,
    /// The gateway call failed; a user-visible message was set
    Failed,
}

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}
