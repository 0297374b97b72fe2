//! Page-loaded flow: log the page load and request the todo list.

use crate::actions::{load_todos, AppAction};
use crate::services::Services;
use crate::types::AppState;
use essential_todos_core::middleware::{Context, Middleware};

/// Middleware reacting to [`AppAction::PageLoaded`]
#[derive(Debug)]
pub struct UiMiddleware {
    services: Services,
}

impl UiMiddleware {
    /// Creates the middleware with its services
    #[must_use]
    pub const fn new(services: Services) -> Self {
        Self { services }
    }
}

impl Middleware for UiMiddleware {
    type State = AppState;
    type Action = AppAction;

    fn handle(&self, cx: &mut Context<'_, AppState, AppAction>, action: AppAction) {
        let page_loaded = matches!(action, AppAction::PageLoaded);
        cx.next(action);

        if page_loaded {
            self.services.logger.log("page loaded");
            cx.dispatch(load_todos());
        }
    }
}
