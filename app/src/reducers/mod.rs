//! Reducers for Essential Todos.
//!
//! Each slice of [`AppState`] has its own reducer; [`AppReducer`] scopes them
//! onto their slices and runs them in turn for every action.

mod todos;
mod ui;

pub use todos::TodosReducer;
pub use ui::UiReducer;

use crate::actions::AppAction;
use crate::types::AppState;
use essential_todos_core::composition::{combine_reducers, scope_reducer, BoxedReducer, CombinedReducer};
use essential_todos_core::{effect::Effect, reducer::Reducer, SmallVec};

/// Root reducer over the whole [`AppState`]
#[derive(Clone)]
pub struct AppReducer {
    inner: CombinedReducer<AppState, AppAction, ()>,
}

impl AppReducer {
    /// Creates the root reducer from the slice reducers
    #[must_use]
    pub fn new() -> Self {
        let slices: Vec<BoxedReducer<AppState, AppAction, ()>> = vec![
            Box::new(scope_reducer(
                TodosReducer::new(),
                |s: &AppState| &s.todos,
                |s: &mut AppState, todos| s.todos = todos,
            )),
            Box::new(scope_reducer(
                UiReducer::new(),
                |s: &AppState| &s.ui,
                |s: &mut AppState, ui| s.ui = ui,
            )),
        ];

        Self {
            inner: combine_reducers(slices),
        }
    }
}

impl Default for AppReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AppReducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppReducer").field("slices", &self.inner.len()).finish()
    }
}

impl Reducer for AppReducer {
    type State = AppState;
    type Action = AppAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        self.inner.reduce(state, action, env)
    }
}
