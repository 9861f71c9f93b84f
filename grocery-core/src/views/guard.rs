use std::cell::RefCell;

/// Runs `release` against the view state when dropped, on every exit path.
pub(crate) struct ScopeGuard<'a, S, F: FnOnce(&mut S)> {
    state: &'a RefCell<S>,
    release: Option<F>,
}

pub(crate) fn on_exit<S, F: FnOnce(&mut S)>(state: &RefCell<S>, release: F) -> ScopeGuard<'_, S, F> {
    ScopeGuard {
        state,
        release: Some(release),
    }
}

impl<S, F: FnOnce(&mut S)> Drop for ScopeGuard<'_, S, F> {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            match self.state.try_borrow_mut() {
                Ok(mut state) => release(&mut *state),
                Err(_) => tracing::warn!("View state still borrowed on exit; release skipped"),
            }
        }
    }
}
