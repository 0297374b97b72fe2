//! Load-todos flow: fetch the list from the API.

use crate::actions::{load_todos_failed, load_todos_success, AppAction};
use crate::services::Services;
use crate::types::AppState;
use essential_todos_core::async_effect;
use essential_todos_core::middleware::{Context, Middleware};
use std::sync::Arc;

/// Middleware reacting to [`AppAction::LoadTodos`]
///
/// Schedules one API call per `LoadTodos`. The call runs as an effect after
/// the dispatch completes; its result comes back as `LoadTodosSuccess` or
/// `LoadTodosFailed`. There is no retry, cancellation or de-duplication.
#[derive(Debug)]
pub struct TodosMiddleware {
    services: Services,
}

impl TodosMiddleware {
    /// Creates the middleware with its services
    #[must_use]
    pub const fn new(services: Services) -> Self {
        Self { services }
    }
}

impl Middleware for TodosMiddleware {
    type State = AppState;
    type Action = AppAction;

    fn handle(&self, cx: &mut Context<'_, AppState, AppAction>, action: AppAction) {
        let load = matches!(action, AppAction::LoadTodos);
        cx.next(action);

        if load {
            let api = Arc::clone(&self.services.api);
            cx.effect(async_effect! {
                match api.get_all().await {
                    Ok(todos) => {
                        tracing::debug!(count = todos.len(), "Todos loaded");
                        Some(load_todos_success(todos))
                    },
                    Err(error) => {
                        tracing::error!(%error, "Failed to load todos");
                        Some(load_todos_failed(error.to_string()))
                    },
                }
            });
        }
    }
}
