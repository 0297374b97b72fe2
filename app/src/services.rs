//! Services injected into middleware at construction time.

use crate::api::TodosApi;
use essential_todos_core::environment::Logger;
use std::sync::Arc;

/// Everything the middleware needs from the outside world
#[derive(Clone)]
pub struct Services {
    /// Remote todos API
    pub api: Arc<dyn TodosApi>,
    /// Fire-and-forget message sink
    pub logger: Arc<dyn Logger>,
}

impl Services {
    /// Bundle an API client and a logger
    #[must_use]
    pub fn new(api: Arc<dyn TodosApi>, logger: Arc<dyn Logger>) -> Self {
        Self { api, logger }
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}

/// Logger writing through `tracing` at info level
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, message: &str) {
        tracing::info!(target: "essential_todos::log", "{message}");
    }
}
