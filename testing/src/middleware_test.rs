//! Given-When-Then harness for a single middleware
//!
//! The middleware runs alone in a chain whose terminal step records every
//! action that reaches it instead of reducing it. The outcome exposes what
//! the middleware forwarded, dispatched and scheduled.

#![allow(clippy::module_name_repetitions)] // MiddlewareTest is the natural name

use crate::helpers::resolve_effects;
use essential_todos_core::effect::Effect;
use essential_todos_core::middleware::{run_chain, Effects, Middleware, MiddlewareRef};
use std::cell::RefCell;
use std::sync::Arc;

/// Type alias for hooks run when an action reaches the end of the chain
type NextHook<A> = Box<dyn Fn(&A)>;

/// Fluent API for testing one middleware
///
/// # Example
///
/// ```ignore
/// use essential_todos_testing::MiddlewareTest;
///
/// let logger = RecordingLogger::new();
/// let outcome = MiddlewareTest::new(UiMiddleware::new(services))
///     .given_state(AppState::default())
///     .when_action(AppAction::PageLoaded)
///     .on_next({
///         let logger = logger.clone();
///         move |_| assert!(logger.messages().is_empty())
///     })
///     .run();
///
/// assert_eq!(outcome.forwarded, vec![AppAction::PageLoaded]);
/// assert_eq!(outcome.dispatched, vec![AppAction::LoadTodos]);
/// ```
pub struct MiddlewareTest<M, S, A>
where
    M: Middleware<State = S, Action = A>,
{
    middleware: M,
    initial_state: Option<S>,
    action: Option<A>,
    next_hooks: Vec<NextHook<A>>,
}

impl<M, S, A> MiddlewareTest<M, S, A>
where
    M: Middleware<State = S, Action = A> + 'static,
    S: 'static,
    A: Clone + 'static,
{
    /// Create a new middleware test
    #[must_use]
    pub const fn new(middleware: M) -> Self {
        Self {
            middleware,
            initial_state: None,
            action: None,
            next_hooks: Vec::new(),
        }
    }

    /// Set the state the middleware observes (Given)
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Set the action to dispatch (When)
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.action = Some(action);
        self
    }

    /// Run `hook` at the moment an action reaches the end of the chain
    ///
    /// Lets a test check what the middleware had or had not done yet when it
    /// forwarded the action.
    #[must_use]
    pub fn on_next<F>(mut self, hook: F) -> Self
    where
        F: Fn(&A) + 'static,
    {
        self.next_hooks.push(Box::new(hook));
        self
    }

    /// Run the middleware once
    ///
    /// # Panics
    ///
    /// Panics if the initial state or the action is not set, or if a hook panics.
    #[allow(clippy::expect_used)] // Test code can use expect
    #[must_use]
    pub fn run(self) -> MiddlewareOutcome<S, A> {
        let mut state = self
            .initial_state
            .expect("Initial state must be set with given_state()");
        let action = self.action.expect("Action must be set with when_action()");

        let forwarded = RefCell::new(Vec::new());
        let hooks = self.next_hooks;
        let record = |_state: &mut S, action: A| -> Effects<A> {
            for hook in &hooks {
                hook(&action);
            }
            forwarded.borrow_mut().push(action);
            Effects::new()
        };

        let middleware: MiddlewareRef<S, A> = Arc::new(self.middleware);
        let chain = [middleware];
        let outcome = run_chain(&chain, &mut state, &record, action);

        MiddlewareOutcome {
            state,
            forwarded: forwarded.into_inner(),
            dispatched: outcome.dispatched,
            effects: outcome.effects.into_vec(),
        }
    }
}

/// What a middleware did with one action
pub struct MiddlewareOutcome<S, A> {
    /// State after the run; the recording terminal step never changes it
    pub state: S,
    /// Actions that reached the end of the chain, in order
    pub forwarded: Vec<A>,
    /// Actions the middleware dispatched, in order
    pub dispatched: Vec<A>,
    /// Effects the middleware scheduled, in order
    pub effects: Vec<Effect<A>>,
}

impl<S, A> MiddlewareOutcome<S, A> {
    /// Execute the scheduled effects and return the actions they produce
    pub async fn resolve_effects(self) -> Vec<A> {
        resolve_effects(self.effects).await
    }
}

impl<S, A> std::fmt::Debug for MiddlewareOutcome<S, A>
where
    S: std::fmt::Debug,
    A: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiddlewareOutcome")
            .field("state", &self.state)
            .field("forwarded", &self.forwarded)
            .field("dispatched", &self.dispatched)
            .field("effects", &self.effects)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use essential_todos_core::middleware::Context;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Ask,
        Answer(u32),
        Quiet,
    }

    /// Forwards everything; answers `Ask` with a dispatch and an effect
    struct Responder;

    impl Middleware for Responder {
        type State = u32;
        type Action = TestAction;

        fn handle(&self, cx: &mut Context<'_, u32, TestAction>, action: TestAction) {
            let ask = action == TestAction::Ask;
            cx.next(action);
            if ask {
                let answer = *cx.state();
                cx.dispatch(TestAction::Answer(answer));
                cx.effect(Effect::Future(Box::pin(async move { Some(TestAction::Answer(answer + 1)) })));
            }
        }
    }

    #[test]
    fn test_quiet_action_is_only_forwarded() {
        let outcome = MiddlewareTest::new(Responder)
            .given_state(7)
            .when_action(TestAction::Quiet)
            .run();

        assert_eq!(outcome.forwarded, vec![TestAction::Quiet]);
        assert!(outcome.dispatched.is_empty());
        assert!(outcome.effects.is_empty());
        assert_eq!(outcome.state, 7);
    }

    #[test]
    fn test_on_next_runs_before_dispatch() {
        let seen = Rc::new(Cell::new(0));
        let outcome = MiddlewareTest::new(Responder)
            .given_state(1)
            .when_action(TestAction::Ask)
            .on_next({
                let seen = Rc::clone(&seen);
                move |action| {
                    assert_eq!(*action, TestAction::Ask);
                    seen.set(seen.get() + 1);
                }
            })
            .run();

        assert_eq!(seen.get(), 1);
        assert_eq!(outcome.dispatched, vec![TestAction::Answer(1)]);
    }

    #[tokio::test]
    async fn test_resolve_effects() {
        let outcome = MiddlewareTest::new(Responder)
            .given_state(41)
            .when_action(TestAction::Ask)
            .run();

        assert_eq!(outcome.resolve_effects().await, vec![TestAction::Answer(42)]);
    }
}
