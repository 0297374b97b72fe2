//! Reducer for the UI slice.

use crate::actions::AppAction;
use crate::types::UiState;
use essential_todos_core::{effect::Effect, reducer::Reducer, SmallVec};

/// Reducer for the UI slice
///
/// `loading` starts `true` and is cleared by the first finished load,
/// successful or not. `PageLoaded` does not touch it.
#[derive(Clone, Debug, Default)]
pub struct UiReducer;

impl UiReducer {
    /// Creates a new `UiReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for UiReducer {
    type State = UiState;
    type Action = AppAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AppAction::LoadTodosSuccess(_) => {
                state.loading = false;
                state.error = None;
            },
            AppAction::LoadTodosFailed(error) => {
                state.loading = false;
                state.error = Some(error);
            },
            AppAction::PageLoaded | AppAction::LoadTodos | AppAction::PutTodo(_) => {},
        }

        SmallVec::new()
    }
}
