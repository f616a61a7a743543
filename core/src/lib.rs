//! # Reactive Todo Core
//!
//! Domain model and pure logic for the reactive todo store.
//!
//! ## Core Concepts
//!
//! - **Snapshot** ([`TodoState`]): an immutable value representing the whole
//!   collection at one instant, including the id allocator.
//! - **Action** ([`TodoAction`]): a discrete mutation request (create, edit,
//!   toggle, delete). A closed vocabulary.
//! - **Reducer** ([`reducer::Reducer`]): the pure transition function folding
//!   one action at a time into successive snapshots.
//! - **Derived views** ([`views`]): stateless projections of a snapshot (the
//!   filtered list and aggregate stats).
//!
//! Everything here is synchronous, in-memory, and free of I/O. The store
//! runtime that serializes actions and publishes snapshots lives in the
//! `reactive-todo-runtime` crate.
//!
//! ## Example
//!
//! ```
//! use reactive_todo_core::{
//!     reducer::{Reducer, TodoReducer},
//!     views, FilterType, TodoAction, TodoState,
//! };
//!
//! let reducer = TodoReducer::new();
//! let mut state = TodoState::new();
//!
//! let _ = reducer.reduce(&mut state, TodoAction::NewTodo { text: "foobar".into() });
//! let _ = reducer.reduce(&mut state, TodoAction::NewTodo { text: "bar".into() });
//!
//! assert_eq!(views::filtered_list(&state, FilterType::All).len(), 2);
//! assert_eq!(views::stats(&state).percent_completed, 0);
//! ```

pub mod action;
pub mod reducer;
pub mod types;
pub mod views;

pub use action::{CommandError, MAX_TEXT_LEN, TodoAction, validate_text};
pub use reducer::{Reducer, StateChange, TodoReducer};
pub use types::{FilterType, IdAllocator, Todo, TodoId, TodoState, TodoStats};
