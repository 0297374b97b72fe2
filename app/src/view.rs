//! Text view of the todo list.
//!
//! [`TodoListView`] follows the same contract a UI component would: it
//! dispatches `PageLoaded` once on mount, renders from selectors, and turns
//! clicks into `PutTodo` actions.

use crate::actions::{page_loaded, put_todo, AppAction};
use crate::selectors::{get_error, get_loading, get_todos};
use crate::store::AppStore;
use crate::types::{AppState, Todo, TodoId};
use essential_todos_runtime::{EffectHandle, StoreError};
use std::fmt;

/// Heading printed above every screen
pub const HEADING: &str = "Essential Todos";

/// Body shown while the first load is in flight
pub const LOADING_TEXT: &str = "Loading todos...";

/// One rendered todo
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    /// Id of the todo this row shows
    pub id: TodoId,
    /// Title with its first letter capitalized
    pub title: String,
    /// Completed todos are struck through
    pub struck: bool,
}

/// What the view shows for a given state
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    /// First load still in flight
    Loading,
    /// The todo list
    List(Vec<Row>),
    /// The load failed
    Failed(String),
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{HEADING}")?;
        match self {
            Self::Loading => writeln!(f, "{LOADING_TEXT}"),
            Self::List(rows) => {
                for row in rows {
                    if row.struck {
                        writeln!(f, "~~{}~~", row.title)?;
                    } else {
                        writeln!(f, "{}", row.title)?;
                    }
                }
                Ok(())
            },
            Self::Failed(error) => writeln!(f, "Failed to load todos: {error}"),
        }
    }
}

/// The todo list view
#[derive(Debug, Default)]
pub struct TodoListView {
    mounted: bool,
}

impl TodoListView {
    /// Creates an unmounted view
    #[must_use]
    pub const fn new() -> Self {
        Self { mounted: false }
    }

    /// Whether `mount` has run
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Mount the view, sending `PageLoaded` the first time only
    ///
    /// Returns the handle of the `PageLoaded` send on the first call and
    /// `None` afterwards.
    ///
    /// # Errors
    ///
    /// Propagates [`StoreError`] from the store.
    pub async fn mount(&mut self, store: &AppStore) -> Result<Option<EffectHandle>, StoreError> {
        if self.mounted {
            return Ok(None);
        }
        self.mounted = true;
        tracing::debug!("Mounting todo list view");

        store.send(page_loaded()).await.map(Some)
    }

    /// Render `state`
    #[must_use]
    pub fn render(state: &AppState) -> Screen {
        if get_loading(state) {
            return Screen::Loading;
        }
        if let Some(error) = get_error(state) {
            return Screen::Failed(error.to_string());
        }

        Screen::List(
            get_todos(state)
                .iter()
                .map(|todo| Row {
                    id: todo.id.clone(),
                    title: capitalize_first(&todo.title),
                    struck: todo.completed,
                })
                .collect(),
        )
    }

    /// Render the store's current state
    pub async fn current(store: &AppStore) -> Screen {
        store.state(Self::render).await
    }

    /// Toggle the todo with `id`
    ///
    /// Sends `PutTodo` with the todo's `completed` flag inverted. Unknown
    /// ids send nothing and return `None`.
    ///
    /// # Errors
    ///
    /// Propagates [`StoreError`] from the store.
    pub async fn click(&self, store: &AppStore, id: &TodoId) -> Result<Option<EffectHandle>, StoreError> {
        let todo = store
            .state(|s| get_todos(s).iter().find(|t| t.id == *id).cloned())
            .await;

        match todo {
            Some(todo) => store.send(Self::toggled(&todo)).await.map(Some),
            None => {
                tracing::debug!(%id, "Click on unknown todo ignored");
                Ok(None)
            },
        }
    }

    /// The action a click on `todo` sends
    #[must_use]
    pub fn toggled(todo: &Todo) -> AppAction {
        put_todo(Todo {
            completed: !todo.completed,
            ..todo.clone()
        })
    }
}

/// Uppercase the first character, leaving the rest unchanged
fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UiState;

    fn loaded(todos: Vec<Todo>) -> AppState {
        AppState {
            todos,
            ui: UiState {
                loading: false,
                error: None,
            },
        }
    }

    #[test]
    fn capitalize_first_handles_edge_cases() {
        assert_eq!(capitalize_first("buy milk"), "Buy milk");
        assert_eq!(capitalize_first("Already"), "Already");
        assert_eq!(capitalize_first(""), "");
        assert_eq!(capitalize_first("élan"), "Élan");
    }

    #[test]
    fn renders_loading_while_loading() {
        let screen = TodoListView::render(&AppState::default());

        assert_eq!(screen, Screen::Loading);
        assert_eq!(screen.to_string(), "Essential Todos\nLoading todos...\n");
    }

    #[test]
    fn renders_capitalized_rows_with_strikethrough() {
        let state = loaded(vec![Todo::new("1", "buy milk", false), Todo::new("2", "walk dog", true)]);

        let screen = TodoListView::render(&state);

        assert_eq!(
            screen,
            Screen::List(vec![
                Row {
                    id: TodoId::new("1"),
                    title: "Buy milk".to_string(),
                    struck: false,
                },
                Row {
                    id: TodoId::new("2"),
                    title: "Walk dog".to_string(),
                    struck: true,
                },
            ])
        );
        assert_eq!(screen.to_string(), "Essential Todos\nBuy milk\n~~Walk dog~~\n");
    }

    #[test]
    fn renders_failure() {
        let state = AppState {
            todos: vec![],
            ui: UiState {
                loading: false,
                error: Some("offline".to_string()),
            },
        };

        let screen = TodoListView::render(&state);

        assert_eq!(screen, Screen::Failed("offline".to_string()));
        assert_eq!(screen.to_string(), "Essential Todos\nFailed to load todos: offline\n");
    }

    #[test]
    fn toggled_inverts_completion_only() {
        let todo = Todo::new("1", "buy milk", false);

        assert_eq!(TodoListView::toggled(&todo), put_todo(Todo::new("1", "buy milk", true)));
        assert_eq!(
            TodoListView::toggled(&Todo::new("1", "buy milk", true)),
            put_todo(todo)
        );
    }
}
