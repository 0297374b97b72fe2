//! # Essential Todos Testing
//!
//! Testing utilities and helpers for Essential Todos.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - Given-When-Then harnesses for reducers and middleware
//! - Effect resolution and store helpers for async tests
//!
//! ## Example
//!
//! ```ignore
//! use essential_todos_testing::{helpers, mocks::RecordingLogger};
//!
//! #[tokio::test]
//! async fn test_page_load() {
//!     let logger = RecordingLogger::new();
//!     let store = create_store(services_with(logger.clone()));
//!
//!     store.send(page_loaded()).await?;
//!     helpers::wait_for_state(&store, |s| !s.ui.loading, Duration::from_secs(1)).await?;
//!
//!     assert_eq!(logger.messages(), vec!["page loaded"]);
//! }
//! ```

pub mod middleware_test;

/// Mock implementations of Environment traits
pub mod mocks {
    use essential_todos_core::environment::Logger;
    use std::sync::{Arc, Mutex, PoisonError};

    /// Logger that records every message
    ///
    /// Clones share the same record, so a clone can be handed to the code
    /// under test while this handle is kept for assertions.
    ///
    /// # Example
    ///
    /// ```
    /// use essential_todos_testing::mocks::RecordingLogger;
    /// use essential_todos_core::environment::Logger;
    ///
    /// let logger = RecordingLogger::new();
    /// logger.clone().log("page loaded");
    /// assert_eq!(logger.messages(), vec!["page loaded".to_string()]);
    /// ```
    #[derive(Debug, Clone, Default)]
    pub struct RecordingLogger {
        messages: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingLogger {
        /// Create an empty recording logger
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// All messages logged so far, oldest first
        #[must_use]
        pub fn messages(&self) -> Vec<String> {
            self.messages.lock().unwrap_or_else(PoisonError::into_inner).clone()
        }

        /// How many times `message` was logged
        #[must_use]
        pub fn count(&self, message: &str) -> usize {
            self.messages
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .iter()
                .filter(|m| m.as_str() == message)
                .count()
        }
    }

    impl Logger for RecordingLogger {
        fn log(&self, message: &str) {
            self.messages
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(message.to_string());
        }
    }
}

/// Test helpers and utilities
pub mod helpers {
    use essential_todos_core::{effect::Effect, reducer::Reducer};
    use essential_todos_runtime::{Store, StoreError};
    use std::collections::VecDeque;
    use std::time::Duration;

    /// Execute effects in order and collect the actions they produce
    ///
    /// `Effect::Parallel` is flattened in place, so resolution is
    /// deterministic: nested effects run in the order they were listed.
    pub async fn resolve_effects<A, I>(effects: I) -> Vec<A>
    where
        I: IntoIterator<Item = Effect<A>>,
    {
        let mut queue: VecDeque<Effect<A>> = effects.into_iter().collect();
        let mut actions = Vec::new();

        while let Some(effect) = queue.pop_front() {
            match effect {
                Effect::None => {},
                Effect::Parallel(nested) => {
                    for effect in nested.into_iter().rev() {
                        queue.push_front(effect);
                    }
                },
                Effect::Future(fut) => {
                    if let Some(action) = fut.await {
                        actions.push(action);
                    }
                },
            }
        }

        actions
    }

    /// Wait until the store's state satisfies `predicate`
    ///
    /// Re-checks after every state change notification.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Timeout`] if the state does not match in time
    /// - [`StoreError::ChannelClosed`] if the store is gone
    pub async fn wait_for_state<S, A, E, R, F>(
        store: &Store<S, A, E, R>,
        predicate: F,
        timeout: Duration,
    ) -> Result<(), StoreError>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + Sync + Clone + 'static,
        S: Send + Sync + 'static,
        E: Send + Sync + 'static,
        F: Fn(&S) -> bool,
    {
        let mut changes = store.subscribe();

        tokio::time::timeout(timeout, async {
            while !store.state(&predicate).await {
                changes.changed().await.map_err(|_| StoreError::ChannelClosed)?;
            }
            Ok(())
        })
        .await
        .map_err(|_| StoreError::Timeout)?
    }

    /// Install a test-friendly tracing subscriber
    ///
    /// Honors `RUST_LOG`; safe to call from every test.
    pub fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }
}

// Re-export commonly used items
pub use middleware_test::{MiddlewareOutcome, MiddlewareTest};
pub use mocks::RecordingLogger;
pub use reducer_test::{assertions, ReducerTest};
