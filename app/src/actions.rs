//! Actions and action creators.
//!
//! Every state transition starts as an [`AppAction`]. On the wire an action
//! is `{"type": "...", "payload": ...}`; payload-free actions carry only the
//! type.

use crate::types::Todo;
use serde::{Deserialize, Serialize};

/// Wire type of [`AppAction::PageLoaded`]
pub const PAGE_LOADED: &str = "PAGE_LOADED";
/// Wire type of [`AppAction::LoadTodos`]
pub const LOAD_TODOS: &str = "LOAD_TODOS";
/// Wire type of [`AppAction::LoadTodosSuccess`]
pub const LOAD_TODOS_SUCCESS: &str = "LOAD_TODOS_SUCCESS";
/// Wire type of [`AppAction::LoadTodosFailed`]
pub const LOAD_TODOS_FAILED: &str = "LOAD_TODOS_FAILED";
/// Wire type of [`AppAction::PutTodo`]
pub const PUT_TODO: &str = "PUT_TODO";

/// All actions understood by the application
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum AppAction {
    /// The view was mounted
    #[serde(rename = "PAGE_LOADED")]
    PageLoaded,

    /// Fetch all todos from the API
    #[serde(rename = "LOAD_TODOS")]
    LoadTodos,

    /// The API returned the full todo list
    #[serde(rename = "LOAD_TODOS_SUCCESS")]
    LoadTodosSuccess(Vec<Todo>),

    /// The API call failed
    #[serde(rename = "LOAD_TODOS_FAILED")]
    LoadTodosFailed(String),

    /// Replace the todo with the same id
    #[serde(rename = "PUT_TODO")]
    PutTodo(Todo),
}

impl AppAction {
    /// The wire type of this action
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::PageLoaded => PAGE_LOADED,
            Self::LoadTodos => LOAD_TODOS,
            Self::LoadTodosSuccess(_) => LOAD_TODOS_SUCCESS,
            Self::LoadTodosFailed(_) => LOAD_TODOS_FAILED,
            Self::PutTodo(_) => PUT_TODO,
        }
    }
}

/// Creates a [`AppAction::PageLoaded`] action
#[must_use]
pub const fn page_loaded() -> AppAction {
    AppAction::PageLoaded
}

/// Creates a [`AppAction::LoadTodos`] action
#[must_use]
pub const fn load_todos() -> AppAction {
    AppAction::LoadTodos
}

/// Creates a [`AppAction::LoadTodosSuccess`] action
#[must_use]
pub const fn load_todos_success(todos: Vec<Todo>) -> AppAction {
    AppAction::LoadTodosSuccess(todos)
}

/// Creates a [`AppAction::LoadTodosFailed`] action
#[must_use]
pub fn load_todos_failed(error: impl Into<String>) -> AppAction {
    AppAction::LoadTodosFailed(error.into())
}

/// Creates a [`AppAction::PutTodo`] action
#[must_use]
pub const fn put_todo(todo: Todo) -> AppAction {
    AppAction::PutTodo(todo)
}
