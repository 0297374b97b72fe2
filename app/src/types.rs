//! Domain types for Essential Todos.
//!
//! The application state is a single [`AppState`] value split into two
//! slices: the todo list and the UI flags.

use serde::{Deserialize, Serialize};

/// Identifier of a todo, assigned by the remote API
///
/// Serialized as a string. Deserialization also accepts an integer id,
/// which is stored as its decimal string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawTodoId")]
pub struct TodoId(String);

/// Wire forms accepted for a [`TodoId`]
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTodoId {
    Text(String),
    Number(u64),
}

impl From<RawTodoId> for TodoId {
    fn from(raw: RawTodoId) -> Self {
        match raw {
            RawTodoId::Text(id) => Self(id),
            RawTodoId::Number(id) => Self(id.to_string()),
        }
    }
}

impl TodoId {
    /// Creates a `TodoId` from any string-like value
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TodoId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier
    pub id: TodoId,
    /// Title as returned by the API (display capitalization is the view's job)
    pub title: String,
    /// Whether the todo is completed
    pub completed: bool,
}

impl Todo {
    /// Creates a new todo item
    #[must_use]
    pub fn new(id: impl Into<TodoId>, title: impl Into<String>, completed: bool) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            completed,
        }
    }
}

/// The todo list slice, in API response order
pub type TodosState = Vec<Todo>;

/// The UI slice
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    /// True until the first load finishes
    pub loading: bool,
    /// Message of the last failed load
    pub error: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            loading: true,
            error: None,
        }
    }
}

/// The whole application state
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    /// Todo list slice
    pub todos: TodosState,
    /// UI slice
    pub ui: UiState,
}
