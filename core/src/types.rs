//! Domain types for the todo collection.
//!
//! The collection is a mapping from [`TodoId`] to [`Todo`], held inside a
//! [`TodoState`] snapshot together with the id allocator. Snapshots are plain
//! owned values: the store replaces them wholesale on every transition, so
//! observers always see a complete, consistent point-in-time view.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Unique identifier for a todo item.
///
/// Ids are allocated monotonically by [`IdAllocator`] and are never reused,
/// even after the item they named has been deleted.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TodoId(u64);

impl TodoId {
    /// Creates a `TodoId` from a raw counter value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw counter value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier, stable for the lifetime of the item.
    pub id: TodoId,
    /// Free-form text.
    pub text: String,
    /// Completion flag.
    pub done: bool,
}

impl Todo {
    /// Creates a new pending todo.
    #[must_use]
    pub const fn new(id: TodoId, text: String) -> Self {
        Self {
            id,
            text,
            done: false,
        }
    }

    /// Flips the completion flag.
    pub const fn toggle(&mut self) {
        self.done = !self.done;
    }
}

/// Filter selection for the filtered list view.
///
/// Transient UI state; it selects a projection of the collection but is not
/// part of the collection snapshot itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterType {
    /// All items.
    #[default]
    All,
    /// Only completed items.
    Done,
    /// Only uncompleted items.
    Pending,
}

impl FilterType {
    /// Whether the given todo passes this filter.
    #[must_use]
    pub const fn matches(self, todo: &Todo) -> bool {
        match self {
            Self::All => true,
            Self::Done => todo.done,
            Self::Pending => !todo.done,
        }
    }
}

/// Monotonic id source for [`TodoId`] allocation.
///
/// Owned by the snapshot state rather than living as process-global state, so
/// a store (and every test) is a self-contained unit. The counter is
/// incremented exactly once per allocation and never decremented, which
/// guarantees uniqueness across the lifetime of the store even after
/// deletions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    /// Creates an allocator starting at id 0.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Hands out the next id and advances the counter.
    #[must_use]
    pub const fn allocate(&mut self) -> TodoId {
        let id = TodoId::new(self.next);
        self.next += 1;
        id
    }
}

/// Snapshot of the todo collection at one point in time.
///
/// A `BTreeMap` keeps iteration in ascending id order, which is the
/// deterministic display order required of the filtered view.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoState {
    /// All todos indexed by id, iterated in ascending id order.
    pub todos: BTreeMap<TodoId, Todo>,
    /// Id source for `NewTodo` transitions.
    pub ids: IdAllocator,
}

impl TodoState {
    /// Creates an empty snapshot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            todos: BTreeMap::new(),
            ids: IdAllocator::new(),
        }
    }

    /// Returns the number of todos.
    #[must_use]
    pub fn count(&self) -> usize {
        self.todos.len()
    }

    /// Returns the number of completed todos.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.todos.values().filter(|t| t.done).count()
    }

    /// Returns a todo by id.
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.get(&id)
    }

    /// Checks whether a todo exists.
    #[must_use]
    pub fn exists(&self, id: TodoId) -> bool {
        self.todos.contains_key(&id)
    }
}

/// Aggregate statistics derived from a snapshot.
///
/// Never stored independently; always recomputed as a pure function of the
/// current snapshot (see [`crate::views::stats`]).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoStats {
    /// Total number of items.
    pub total: usize,
    /// Number of completed items.
    pub completed: usize,
    /// Number of uncompleted items (`total - completed`).
    pub uncompleted: usize,
    /// Completion percentage, integer-rounded; 0 when the list is empty.
    pub percent_completed: usize,
}
