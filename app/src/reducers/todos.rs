//! Reducer for the todo list slice.

use crate::actions::AppAction;
use crate::types::{Todo, TodosState};
use essential_todos_core::{effect::Effect, reducer::Reducer, SmallVec};

/// Reducer for the todo list slice
///
/// Loaded lists are stored exactly as the API returned them; ids are not
/// de-duplicated. `PutTodo` replaces the first entry with a matching id.
#[derive(Clone, Debug, Default)]
pub struct TodosReducer;

impl TodosReducer {
    /// Creates a new `TodosReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Replaces the first entry with the same id; unknown ids are ignored
    fn replace(state: &mut TodosState, todo: Todo) {
        if let Some(existing) = state.iter_mut().find(|t| t.id == todo.id) {
            *existing = todo;
        } else {
            tracing::debug!(id = %todo.id, "PutTodo for unknown id ignored");
        }
    }
}

impl Reducer for TodosReducer {
    type State = TodosState;
    type Action = AppAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AppAction::LoadTodosSuccess(todos) => *state = todos,
            AppAction::PutTodo(todo) => Self::replace(state, todo),
            AppAction::PageLoaded | AppAction::LoadTodos | AppAction::LoadTodosFailed(_) => {},
        }

        SmallVec::new()
    }
}
