//! Read accessors projecting slices out of [`AppState`].

use crate::types::{AppState, Todo};

/// The todo list, in API order
#[must_use]
pub fn get_todos(state: &AppState) -> &[Todo] {
    &state.todos
}

/// Whether the first load is still in flight
#[must_use]
pub const fn get_loading(state: &AppState) -> bool {
    state.ui.loading
}

/// Message of the last failed load, if any
#[must_use]
pub fn get_error(state: &AppState) -> Option<&str> {
    state.ui.error.as_deref()
}
