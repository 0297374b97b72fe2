//! Middleware - interceptors between dispatch and the reducer
//!
//! A middleware sees every dispatched action before the reducer does. It may
//! forward the action down the chain with [`Context::next`], dispatch new
//! actions with [`Context::dispatch`], read state with [`Context::state`] and
//! schedule asynchronous work with [`Context::effect`].
//!
//! Services a middleware needs (API clients, loggers) are passed to its
//! constructor; the chain itself only carries the store accessors.
//!
//! # Ordering
//!
//! - Middleware run in chain order; the end of the chain is the reducer.
//! - Actions passed to `dispatch` are queued and re-enter the whole chain
//!   after the current action has been fully processed.
//! - Effects run after the chain returns and the state lock is released.
//!
//! # Example
//!
//! ```
//! use essential_todos_core::middleware::{run_chain, Context, Effects, Middleware, MiddlewareRef};
//! use essential_todos_core::SmallVec;
//! use std::sync::Arc;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum Action {
//!     Ping,
//!     Pong,
//! }
//!
//! struct PingPong;
//!
//! impl Middleware for PingPong {
//!     type State = u32;
//!     type Action = Action;
//!
//!     fn handle(&self, cx: &mut Context<'_, u32, Action>, action: Action) {
//!         let reply = action == Action::Ping;
//!         cx.next(action);
//!         if reply {
//!             cx.dispatch(Action::Pong);
//!         }
//!     }
//! }
//!
//! fn count_pings(count: &mut u32, action: Action) -> Effects<Action> {
//!     if action == Action::Ping {
//!         *count += 1;
//!     }
//!     SmallVec::new()
//! }
//!
//! let chain: Vec<MiddlewareRef<u32, Action>> = vec![Arc::new(PingPong)];
//! let mut pings = 0;
//! let outcome = run_chain(&chain, &mut pings, &count_pings, Action::Ping);
//!
//! assert_eq!(pings, 1);
//! assert_eq!(outcome.dispatched, vec![Action::Pong]);
//! ```

use crate::effect::Effect;
use smallvec::SmallVec;
use std::sync::Arc;

/// Effects collected during one pass through the chain.
pub type Effects<A> = SmallVec<[Effect<A>; 4]>;

/// The terminal step of a chain: applies an action to state.
pub type ReduceFn<'a, S, A> = &'a dyn Fn(&mut S, A) -> Effects<A>;

/// A shared, type-erased middleware.
pub type MiddlewareRef<S, A> = Arc<dyn Middleware<State = S, Action = A>>;

/// The Middleware trait - intercepts every dispatched action
///
/// Implementations must call [`Context::next`] to let the action reach the
/// reducer; an action that is not forwarded is swallowed.
pub trait Middleware: Send + Sync {
    /// The state type of the store this middleware is installed in
    type State;

    /// The action type this middleware intercepts
    type Action;

    /// Handle one dispatched action
    fn handle(&self, cx: &mut Context<'_, Self::State, Self::Action>, action: Self::Action);
}

/// Per-dispatch handle passed to each middleware in the chain.
pub struct Context<'a, S, A> {
    chain: &'a [MiddlewareRef<S, A>],
    position: usize,
    state: &'a mut S,
    reduce: ReduceFn<'a, S, A>,
    effects: Effects<A>,
    dispatched: Vec<A>,
    reduced: usize,
}

impl<'a, S, A> Context<'a, S, A> {
    /// Create a context positioned at the start of `chain`
    pub fn new(chain: &'a [MiddlewareRef<S, A>], state: &'a mut S, reduce: ReduceFn<'a, S, A>) -> Self {
        Self {
            chain,
            position: 0,
            state,
            reduce,
            effects: SmallVec::new(),
            dispatched: Vec::new(),
            reduced: 0,
        }
    }

    /// Forward an action to the next middleware, or to the reducer at the end of the chain
    pub fn next(&mut self, action: A) {
        let chain = self.chain;
        if let Some(middleware) = chain.get(self.position) {
            self.position += 1;
            middleware.handle(self, action);
            self.position -= 1;
        } else {
            let effects = (self.reduce)(&mut *self.state, action);
            self.effects.extend(effects);
            self.reduced += 1;
        }
    }

    /// Queue an action to be dispatched through the full chain once the current one completes
    pub fn dispatch(&mut self, action: A) {
        self.dispatched.push(action);
    }

    /// Schedule an effect to be executed by the runtime
    pub fn effect(&mut self, effect: Effect<A>) {
        self.effects.push(effect);
    }

    /// Read the current state
    ///
    /// Before `next` has been called this is the state the action will be
    /// applied to; afterwards it includes the action's changes.
    #[must_use]
    pub fn state(&self) -> &S {
        &*self.state
    }

    /// Consume the context, returning what the pass produced
    #[must_use]
    pub fn finish(self) -> ChainOutcome<A> {
        ChainOutcome {
            effects: self.effects,
            dispatched: self.dispatched,
            reduced: self.reduced,
        }
    }
}

/// Result of running one action through a middleware chain.
pub struct ChainOutcome<A> {
    /// Effects returned by reducers or scheduled by middleware, in order
    pub effects: Effects<A>,
    /// Actions dispatched by middleware, in order
    pub dispatched: Vec<A>,
    /// How many times the action (or a rewrite of it) reached the reducer
    pub reduced: usize,
}

impl<A> std::fmt::Debug for ChainOutcome<A>
where
    A: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainOutcome")
            .field("effects", &self.effects)
            .field("dispatched", &self.dispatched)
            .field("reduced", &self.reduced)
            .finish()
    }
}

/// Run a single action through `chain`, ending in `reduce`
pub fn run_chain<S, A>(
    chain: &[MiddlewareRef<S, A>],
    state: &mut S,
    reduce: ReduceFn<'_, S, A>,
    action: A,
) -> ChainOutcome<A> {
    let mut cx = Context::new(chain, state, reduce);
    cx.next(action);
    cx.finish()
}
