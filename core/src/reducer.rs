//! The reducer: a pure transition function over snapshots.
//!
//! The store serializes actions into a total order and folds them one at a
//! time through [`Reducer::reduce`]. The reducer never performs I/O and never
//! suspends; each transition is an instantaneous value transformation.

use crate::action::TodoAction;
use crate::types::{Todo, TodoState};

/// Whether a transition changed the snapshot.
///
/// The store uses this to decide whether to publish: no-op transitions
/// (mutations targeting unknown ids, edits that replace text with an equal
/// value) skip publication entirely, so observers are only woken for
/// snapshots that actually differ from the previous one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum StateChange {
    /// The snapshot differs from the previous one and should be published.
    Changed,
    /// The snapshot is unchanged; publication is skipped.
    Unchanged,
}

impl StateChange {
    /// Returns `true` for [`StateChange::Changed`].
    #[must_use]
    pub const fn is_changed(self) -> bool {
        matches!(self, Self::Changed)
    }
}

impl From<bool> for StateChange {
    fn from(changed: bool) -> Self {
        if changed { Self::Changed } else { Self::Unchanged }
    }
}

/// The core abstraction for state transitions.
///
/// A reducer is a pure function `(state, action) -> state'` expressed as an
/// in-place update plus a [`StateChange`] report. It must be total over its
/// action vocabulary: every action maps to a defined transition, and
/// transitions never panic.
///
/// # Example
///
/// ```
/// use reactive_todo_core::reducer::{Reducer, StateChange};
///
/// #[derive(Clone, Debug, Default, PartialEq)]
/// struct Counter(u32);
///
/// enum CounterAction {
///     Increment,
/// }
///
/// struct CounterReducer;
///
/// impl Reducer for CounterReducer {
///     type State = Counter;
///     type Action = CounterAction;
///
///     fn reduce(&self, state: &mut Counter, action: CounterAction) -> StateChange {
///         match action {
///             CounterAction::Increment => {
///                 state.0 += 1;
///                 StateChange::Changed
///             }
///         }
///     }
/// }
/// ```
pub trait Reducer {
    /// The snapshot type this reducer operates on.
    type State;

    /// The action type this reducer processes.
    type Action;

    /// Applies one action to the state, reporting whether anything changed.
    fn reduce(&self, state: &mut Self::State, action: Self::Action) -> StateChange;
}

/// Reducer for the todo collection.
///
/// Unknown-id mutations are uniform no-ops: user-facing interactive state
/// must never crash on a stale id (the item may have been deleted between
/// render and click), and silently corrupting the snapshot is not an option
/// either. The no-op is logged at debug level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;

    fn reduce(&self, state: &mut TodoState, action: TodoAction) -> StateChange {
        match action {
            TodoAction::NewTodo { text } => {
                let id = state.ids.allocate();
                state.todos.insert(id, Todo::new(id, text));
                StateChange::Changed
            }
            TodoAction::EditTodo { id, text } => match state.todos.get_mut(&id) {
                Some(todo) if todo.text == text => StateChange::Unchanged,
                Some(todo) => {
                    todo.text = text;
                    StateChange::Changed
                }
                None => {
                    tracing::debug!(%id, "edit for unknown todo ignored");
                    StateChange::Unchanged
                }
            },
            TodoAction::ToggleTodo { id } => match state.todos.get_mut(&id) {
                Some(todo) => {
                    todo.toggle();
                    StateChange::Changed
                }
                None => {
                    tracing::debug!(%id, "toggle for unknown todo ignored");
                    StateChange::Unchanged
                }
            },
            TodoAction::DeleteTodo { id } => {
                let removed = state.todos.remove(&id).is_some();
                if !removed {
                    tracing::debug!(%id, "delete for unknown todo ignored");
                }
                StateChange::from(removed)
            }
        }
    }
}
