//! # Reactive Todo Runtime
//!
//! Store runtime and subscription bridge for the reactive todo store.
//!
//! ## Core Components
//!
//! - **Store**: single-writer runtime that serializes actions, folds them
//!   through the reducer, and publishes each new snapshot
//! - **View**: subscription handle holding the latest published value of a
//!   topic (snapshot, derived view, or selected filter)
//! - **`TodoStore`**: the facade presentation code talks to - four
//!   fire-and-forget entry points in, one observable per rendered quantity out
//!
//! ## Example
//!
//! ```
//! use reactive_todo_core::TodoId;
//! use reactive_todo_runtime::TodoStore;
//!
//! # async fn example() {
//! let store = TodoStore::new();
//! let mut stats = store.stats();
//!
//! store.create("buy milk");
//! stats.changed().await.ok();
//! assert_eq!(stats.latest().total, 1);
//!
//! store.toggle(TodoId::new(0));
//! assert_eq!(store.stats().latest().percent_completed, 100);
//! # }
//! ```

/// The single-writer store runtime.
pub mod store;

/// The todo store facade for presentation code.
pub mod todo;

/// Subscription handles and their errors.
pub mod view;

pub use store::Store;
pub use todo::TodoStore;
pub use view::{View, ViewError};
