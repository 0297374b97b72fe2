//! The remote todos API.
//!
//! Middleware only depends on the [`TodosApi`] trait; [`HttpTodosApi`] talks
//! to a real server and [`InMemoryTodosApi`] serves a fixed answer.

mod http;
mod in_memory;

pub use http::HttpTodosApi;
pub use in_memory::InMemoryTodosApi;

use crate::error::ApiError;
use crate::types::Todo;
use async_trait::async_trait;

/// Access to the remote todo list
#[async_trait]
pub trait TodosApi: Send + Sync {
    /// Fetch every todo, in server order
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails, the server answers with a
    /// non-success status, or the body is not a todo list.
    async fn get_all(&self) -> Result<Vec<Todo>, ApiError>;
}
