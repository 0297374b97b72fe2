//! In-memory implementation of [`TodosApi`]

use super::TodosApi;
use crate::error::ApiError;
use crate::types::Todo;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Todos API serving a fixed answer
///
/// Every call returns the same list (or the same failure) and is counted.
#[derive(Debug)]
pub struct InMemoryTodosApi {
    response: Result<Vec<Todo>, String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl InMemoryTodosApi {
    /// API that always returns `todos`
    #[must_use]
    pub const fn with_todos(todos: Vec<Todo>) -> Self {
        Self {
            response: Ok(todos),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// API that always fails with `message`
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            response: Err(message.into()),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Wait `delay` before answering each call
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of `get_all` calls so far
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TodosApi for InMemoryTodosApi {
    async fn get_all(&self) -> Result<Vec<Todo>, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.response.clone().map_err(ApiError::RequestFailed)
    }
}
