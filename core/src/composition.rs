//! Reducer composition utilities
//!
//! This module provides utilities for composing reducers:
//! - **`combine_reducers`**: Run multiple reducers on the same state/action
//! - **`scope_reducer`**: Focus a reducer on one slice of a larger state
//!
//! Together they assemble an application reducer out of per-slice reducers,
//! each of which only knows about its own slice.
//!
//! # Examples
//!
//! ```
//! use essential_todos_core::{effect::Effect, reducer::Reducer, SmallVec};
//! use essential_todos_core::composition::{combine_reducers, scope_reducer, BoxedReducer};
//!
//! #[derive(Clone, Default)]
//! struct Banner {
//!     busy: bool,
//! }
//!
//! #[derive(Clone, Default)]
//! struct Board {
//!     titles: Vec<String>,
//!     banner: Banner,
//! }
//!
//! #[derive(Clone)]
//! enum BoardAction {
//!     Added(String),
//!     Fetching,
//! }
//!
//! struct TitlesReducer;
//! struct BannerReducer;
//!
//! impl Reducer for TitlesReducer {
//!     type State = Vec<String>;
//!     type Action = BoardAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, titles: &mut Vec<String>, action: BoardAction, _env: &()) -> SmallVec<[Effect<BoardAction>; 4]> {
//!         if let BoardAction::Added(title) = action {
//!             titles.push(title);
//!         }
//!         SmallVec::new()
//!     }
//! }
//!
//! impl Reducer for BannerReducer {
//!     type State = Banner;
//!     type Action = BoardAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, banner: &mut Banner, action: BoardAction, _env: &()) -> SmallVec<[Effect<BoardAction>; 4]> {
//!         if let BoardAction::Fetching = action {
//!             banner.busy = true;
//!         }
//!         SmallVec::new()
//!     }
//! }
//!
//! let reducers: Vec<BoxedReducer<Board, BoardAction, ()>> = vec![
//!     Box::new(scope_reducer(
//!         TitlesReducer,
//!         |s: &Board| &s.titles,
//!         |s: &mut Board, slice| s.titles = slice,
//!     )),
//!     Box::new(scope_reducer(
//!         BannerReducer,
//!         |s: &Board| &s.banner,
//!         |s: &mut Board, slice| s.banner = slice,
//!     )),
//! ];
//! let board = combine_reducers(reducers);
//!
//! let mut state = Board::default();
//! let _ = board.reduce(&mut state, BoardAction::Added("buy milk".to_string()), &());
//! let _ = board.reduce(&mut state, BoardAction::Fetching, &());
//! assert_eq!(state.titles, vec!["buy milk".to_string()]);
//! assert!(state.banner.busy);
//! ```

use crate::effect::Effect;
use crate::reducer::Reducer;
use smallvec::SmallVec;
use std::sync::Arc;

/// A boxed reducer that can be shared across threads.
pub type BoxedReducer<S, A, E> = Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>;

/// Combines multiple reducers that operate on the same state and action types.
///
/// Each reducer is run in sequence with a clone of the action, and all effects
/// are collected and concatenated in reducer order.
#[must_use]
pub fn combine_reducers<S, A, E>(reducers: Vec<BoxedReducer<S, A, E>>) -> CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    CombinedReducer {
        reducers: Arc::from(reducers),
    }
}

/// A combined reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`]. Cloning is cheap: the reducers are shared.
pub struct CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    reducers: Arc<[BoxedReducer<S, A, E>]>,
}

impl<S, A, E> CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    /// Number of reducers in the combination
    #[must_use]
    pub fn len(&self) -> usize {
        self.reducers.len()
    }

    /// Returns `true` if no reducers were combined
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }
}

impl<S, A, E> Clone for CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    fn clone(&self) -> Self {
        Self {
            reducers: Arc::clone(&self.reducers),
        }
    }
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut all_effects = SmallVec::new();

        for reducer in self.reducers.iter() {
            let effects = reducer.reduce(state, action.clone(), env);
            all_effects.extend(effects);
        }

        all_effects
    }
}

/// Scopes a reducer to operate on a slice of a larger state.
///
/// The slice is read with `get_state`, reduced, and written back with
/// `set_state`. Everything outside the slice is left untouched.
pub fn scope_reducer<S, SubS, A, E, R>(
    reducer: R,
    get_state: fn(&S) -> &SubS,
    set_state: fn(&mut S, SubS),
) -> ScopedReducer<S, SubS, A, E, R>
where
    S: 'static,
    SubS: Clone + 'static,
    A: 'static,
    E: 'static,
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    ScopedReducer {
        reducer,
        get_state,
        set_state,
        _phantom: std::marker::PhantomData,
    }
}

/// A scoped reducer that operates on a slice of state.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, SubS, A, E, R>
where
    S: 'static,
    SubS: Clone + 'static,
    A: 'static,
    E: 'static,
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    reducer: R,
    get_state: fn(&S) -> &SubS,
    set_state: fn(&mut S, SubS),
    _phantom: std::marker::PhantomData<fn(A, &E)>,
}

impl<S, SubS, A, E, R> Clone for ScopedReducer<S, SubS, A, E, R>
where
    S: 'static,
    SubS: Clone + 'static,
    A: 'static,
    E: 'static,
    R: Reducer<State = SubS, Action = A, Environment = E> + Clone,
{
    fn clone(&self) -> Self {
        Self {
            reducer: self.reducer.clone(),
            get_state: self.get_state,
            set_state: self.set_state,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<S, SubS, A, E, R> Reducer for ScopedReducer<S, SubS, A, E, R>
where
    S: 'static,
    SubS: Clone + 'static,
    A: 'static,
    E: 'static,
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut slice = (self.get_state)(state).clone();

        let effects = self.reducer.reduce(&mut slice, action, env);

        (self.set_state)(state, slice);

        effects
    }
}
