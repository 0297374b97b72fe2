//! Store assembly.

use crate::actions::AppAction;
use crate::middleware::{TodosMiddleware, UiMiddleware};
use crate::reducers::AppReducer;
use crate::services::Services;
use crate::types::AppState;
use essential_todos_runtime::Store;
use std::sync::Arc;

/// The application store
pub type AppStore = Store<AppState, AppAction, (), AppReducer>;

/// Build the application store
///
/// Starts from [`AppState::default`] with the middleware chain
/// `[UiMiddleware, TodosMiddleware]`. Both middleware share `services`.
#[must_use]
pub fn create_store(services: Services) -> AppStore {
    Store::new(AppState::default(), AppReducer::new(), ())
        .with_middleware(Arc::new(UiMiddleware::new(services.clone())))
        .with_middleware(Arc::new(TodosMiddleware::new(services)))
}
