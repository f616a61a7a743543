//! # Reactive Todo Testing
//!
//! Testing utilities and helpers for the reactive todo store.
//!
//! This crate provides:
//! - [`ReducerTest`]: fluent Given-When-Then helper for reducer tests
//! - [`fixtures`]: snapshot builders that go through the real reducer
//! - [`strategies`]: proptest strategies for actions and snapshots
//!
//! ## Example
//!
//! ```
//! use reactive_todo_testing::fixtures;
//! use reactive_todo_core::views;
//!
//! let state = fixtures::state_with_done(&[("foobar", true), ("bar", false)]);
//! assert_eq!(views::stats(&state).percent_completed, 50);
//! ```

pub mod reducer_test;

/// Snapshot builders for tests.
///
/// All fixtures are built by folding real actions through [`TodoReducer`],
/// so the id allocator in the resulting snapshot is always consistent with
/// the items it contains.
pub mod fixtures {
    use reactive_todo_core::reducer::{Reducer, TodoReducer};
    use reactive_todo_core::{TodoAction, TodoId, TodoState};

    /// Builds a snapshot containing one pending todo per text, ids 0..n.
    #[must_use]
    pub fn state_with(texts: &[&str]) -> TodoState {
        state_with_done(&texts.iter().map(|t| (*t, false)).collect::<Vec<_>>())
    }

    /// Builds a snapshot from `(text, done)` pairs, ids 0..n.
    #[must_use]
    pub fn state_with_done(items: &[(&str, bool)]) -> TodoState {
        let reducer = TodoReducer::new();
        let mut state = TodoState::new();

        for (index, (text, done)) in items.iter().enumerate() {
            let _ = reducer.reduce(
                &mut state,
                TodoAction::NewTodo {
                    text: (*text).to_string(),
                },
            );
            if *done {
                let _ = reducer.reduce(
                    &mut state,
                    TodoAction::ToggleTodo {
                        id: TodoId::new(u64::try_from(index).unwrap_or(u64::MAX)),
                    },
                );
            }
        }

        state
    }
}

/// Proptest strategies for domain types.
pub mod strategies {
    use proptest::prelude::*;
    use reactive_todo_core::reducer::{Reducer, TodoReducer};
    use reactive_todo_core::{FilterType, TodoAction, TodoId, TodoState};

    /// Any of the three filter values.
    pub fn arb_filter() -> impl Strategy<Value = FilterType> {
        prop_oneof![
            Just(FilterType::All),
            Just(FilterType::Done),
            Just(FilterType::Pending),
        ]
    }

    /// An arbitrary action. Target ids are drawn from `0..=max_id`, so
    /// sequences naturally mix hits on live items with unknown-id no-ops.
    pub fn arb_action(max_id: u64) -> impl Strategy<Value = TodoAction> {
        prop_oneof![
            "[a-z]{1,12}".prop_map(|text| TodoAction::NewTodo { text }),
            (0..=max_id, "[a-z]{1,12}").prop_map(|(id, text)| TodoAction::EditTodo {
                id: TodoId::new(id),
                text,
            }),
            (0..=max_id).prop_map(|id| TodoAction::ToggleTodo { id: TodoId::new(id) }),
            (0..=max_id).prop_map(|id| TodoAction::DeleteTodo { id: TodoId::new(id) }),
        ]
    }

    /// An arbitrary sequence of up to `max_len` actions.
    pub fn arb_actions(max_len: usize) -> impl Strategy<Value = Vec<TodoAction>> {
        let max_id = u64::try_from(max_len).unwrap_or(u64::MAX);
        prop::collection::vec(arb_action(max_id), 0..max_len)
    }

    /// An arbitrary snapshot, produced by folding a random action sequence
    /// into an empty state.
    pub fn arb_state(max_actions: usize) -> impl Strategy<Value = TodoState> {
        arb_actions(max_actions).prop_map(|actions| {
            let reducer = TodoReducer::new();
            let mut state = TodoState::new();
            for action in actions {
                let _ = reducer.reduce(&mut state, action);
            }
            state
        })
    }
}

/// Installs a fmt subscriber for test output, honoring `RUST_LOG`.
///
/// Safe to call from every test; only the first call wins.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// Re-export commonly used items
pub use reducer_test::ReducerTest;
