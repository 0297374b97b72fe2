//! # Essential Todos Core
//!
//! Core traits and types for the Essential Todos state container.
//!
//! This crate provides the fundamental abstractions for driving a UI from a
//! single state value: reducers own state transitions, middleware intercepts
//! dispatched actions to perform side effects, and effects describe the
//! asynchronous work the runtime executes on their behalf.
//!
//! ## Core Concepts
//!
//! - **State**: Application state, split into slices
//! - **Action**: Tagged description of an intended state transition
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Middleware**: Interceptor between dispatch and the reducer
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies via traits
//!
//! ## Example
//!
//! ```
//! use essential_todos_core::{effect::Effect, reducer::Reducer, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct UiState {
//!     loading: bool,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum UiAction {
//!     Loaded,
//! }
//!
//! struct UiReducer;
//!
//! impl Reducer for UiReducer {
//!     type State = UiState;
//!     type Action = UiAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut UiState,
//!         action: UiAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<UiAction>; 4]> {
//!         match action {
//!             UiAction::Loaded => state.loading = false,
//!         }
//!         SmallVec::new()
//!     }
//! }
//!
//! let mut state = UiState { loading: true };
//! let effects = UiReducer.reduce(&mut state, UiAction::Loaded, &());
//! assert!(!state.loading);
//! assert!(effects.is_empty());
//! ```

pub use smallvec::{smallvec, SmallVec};

/// Declarative macros for effect construction
pub mod effect_macros;

/// Reducer composition utilities (`combine_reducers`, `scope_reducer`)
pub mod composition;

/// Middleware trait and the per-dispatch chain context
pub mod middleware;

/// Reducer module - The core trait for state transitions
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all state transition logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for state transitions
    ///
    /// # Type Parameters
    ///
    /// - `State`: The state (or state slice) this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// Updates state in place and returns effect descriptions to be
        /// executed by the runtime. Actions a reducer does not recognise must
        /// leave state untouched.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values (not execution) and are composable.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should happen,
    /// returned from reducers or scheduled by middleware and executed by the Store runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects in parallel
        Parallel(Vec<Effect<Action>>),

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is dispatched back into the store
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Returns `true` if executing this effect does nothing
        #[must_use]
        pub fn is_none(&self) -> bool {
            match self {
                Effect::None => true,
                Effect::Parallel(effects) => effects.iter().all(Effect::is_none),
                Effect::Future(_) => false,
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// External capabilities used by middleware are abstracted behind traits and
/// injected through constructors, so tests can substitute recording mocks.
pub mod environment {
    /// Logger trait - fire-and-forget message sink
    ///
    /// # Examples
    ///
    /// ```ignore
    /// struct StdoutLogger;
    /// impl Logger for StdoutLogger {
    ///     fn log(&self, message: &str) {
    ///         println!("{message}");
    ///     }
    /// }
    /// ```
    pub trait Logger: Send + Sync {
        /// Record a message. No result is consumed by callers.
        fn log(&self, message: &str);
    }
}
