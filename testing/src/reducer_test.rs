//! Ergonomic testing utilities for reducers
//!
//! This module provides a fluent API for testing reducers with readable Given-When-Then syntax.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use reactive_todo_core::reducer::{Reducer, StateChange};

/// Type alias for state assertion functions
type StateAssertion<S> = Box<dyn FnOnce(&S)>;

/// Fluent API for testing reducers with Given-When-Then syntax
///
/// # Example
///
/// ```
/// use reactive_todo_testing::ReducerTest;
/// use reactive_todo_core::{StateChange, TodoAction, TodoReducer, TodoState};
///
/// ReducerTest::new(TodoReducer::new())
///     .given_state(TodoState::new())
///     .when_action(TodoAction::NewTodo { text: "buy milk".into() })
///     .then_change(StateChange::Changed)
///     .then_state(|state| {
///         assert_eq!(state.count(), 1);
///     })
///     .run();
/// ```
pub struct ReducerTest<R, S, A>
where
    R: Reducer<State = S, Action = A>,
{
    reducer: R,
    initial_state: Option<S>,
    action: Option<A>,
    state_assertions: Vec<StateAssertion<S>>,
    expected_change: Option<StateChange>,
}

impl<R, S, A> ReducerTest<R, S, A>
where
    R: Reducer<State = S, Action = A>,
{
    /// Create a new reducer test with the given reducer
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            initial_state: None,
            action: None,
            state_assertions: Vec::new(),
            expected_change: None,
        }
    }

    /// Set the initial state (Given)
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Set the action to test (When)
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.action = Some(action);
        self
    }

    /// Add an assertion about the resulting state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Assert the [`StateChange`] reported by the transition (Then)
    #[must_use]
    pub const fn then_change(mut self, expected: StateChange) -> Self {
        self.expected_change = Some(expected);
        self
    }

    /// Run the test and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if initial state or action is not set, or if any assertion fails.
    #[allow(clippy::panic)] // Test code can panic
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) {
        let mut state = self
            .initial_state
            .expect("Initial state must be set with given_state()");

        let action = self.action.expect("Action must be set with when_action()");

        // Execute reducer
        let change = self.reducer.reduce(&mut state, action);

        // Check the reported change
        if let Some(expected) = self.expected_change {
            assert_eq!(
                change, expected,
                "Reducer reported {change:?}, expected {expected:?}"
            );
        }

        // Run state assertions
        for assertion in self.state_assertions {
            assertion(&state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct TestState {
        count: i32,
    }

    #[derive(Clone, Debug)]
    enum TestAction {
        Increment,
        Nothing,
    }

    struct TestReducer;

    impl Reducer for TestReducer {
        type State = TestState;
        type Action = TestAction;

        fn reduce(&self, state: &mut Self::State, action: Self::Action) -> StateChange {
            match action {
                TestAction::Increment => {
                    state.count += 1;
                    StateChange::Changed
                }
                TestAction::Nothing => StateChange::Unchanged,
            }
        }
    }

    #[test]
    fn test_reducer_test_increment() {
        ReducerTest::new(TestReducer)
            .given_state(TestState { count: 0 })
            .when_action(TestAction::Increment)
            .then_change(StateChange::Changed)
            .then_state(|state| {
                assert_eq!(state.count, 1);
            })
            .run();
    }

    #[test]
    fn test_reducer_test_noop() {
        ReducerTest::new(TestReducer)
            .given_state(TestState { count: 5 })
            .when_action(TestAction::Nothing)
            .then_change(StateChange::Unchanged)
            .then_state(|state| {
                assert_eq!(state.count, 5);
            })
            .run();
    }
}
