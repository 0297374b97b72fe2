//! Essential Todos: a to-do list driven by a store, reducers and middleware.
//!
//! The application state lives in a single [`AppStore`]. Every action passes
//! through the middleware chain (`UiMiddleware`, then `TodosMiddleware`)
//! before the reducers update the `todos` and `ui` slices. The API call runs
//! as an effect and its result is fed back into the store as another action.
//!
//! Control flow on startup:
//!
//! 1. [`TodoListView::mount`] sends `PageLoaded`
//! 2. `UiMiddleware` logs "page loaded" and dispatches `LoadTodos`
//! 3. `TodosMiddleware` schedules the `get_all` API call
//! 4. The result comes back as `LoadTodosSuccess` (or `LoadTodosFailed`)
//! 5. Reducers replace the list and clear `loading`; subscribers are notified
//!
//! # Quick Start
//!
//! ```no_run
//! use essential_todos::{create_store, InMemoryTodosApi, Services, Todo, TodoListView, TracingLogger};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let api = InMemoryTodosApi::with_todos(vec![Todo::new("1", "buy milk", false)]);
//! let store = create_store(Services::new(Arc::new(api), Arc::new(TracingLogger)));
//!
//! let mut view = TodoListView::new();
//! if let Some(mut handle) = view.mount(&store).await? {
//!     handle.wait().await;
//! }
//!
//! println!("{}", TodoListView::current(&store).await);
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod reducers;
pub mod selectors;
pub mod services;
pub mod store;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use actions::AppAction;
pub use api::{HttpTodosApi, InMemoryTodosApi, TodosApi};
pub use config::Config;
pub use error::ApiError;
pub use middleware::{TodosMiddleware, UiMiddleware};
pub use reducers::{AppReducer, TodosReducer, UiReducer};
pub use services::{Services, TracingLogger};
pub use store::{create_store, AppStore};
pub use types::{AppState, Todo, TodoId, TodosState, UiState};
pub use view::{Screen, TodoListView};
