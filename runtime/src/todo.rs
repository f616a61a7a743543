//! The todo store facade consumed by presentation code.
//!
//! [`TodoStore`] wraps the generic [`Store`] with the todo domain: four
//! fire-and-forget entry points matching the action vocabulary, a filter
//! selection, and one observable per quantity the UI renders (whole
//! collection, filtered list, stats, current filter).

use crate::store::Store;
use crate::view::View;
use reactive_todo_core::{
    FilterType, Todo, TodoAction, TodoId, TodoReducer, TodoState, TodoStats, validate_text, views,
};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};

/// Reactive todo store.
///
/// Cloning produces another handle to the same store; all clones dispatch
/// into the same single-writer runtime and observe the same topics.
///
/// # Example
///
/// ```
/// use reactive_todo_core::{FilterType, TodoId};
/// use reactive_todo_runtime::TodoStore;
///
/// let store = TodoStore::new();
/// store.create("foobar");
/// store.create("bar");
/// store.toggle(TodoId::new(0));
///
/// assert_eq!(store.stats().latest().percent_completed, 50);
/// store.set_filter(FilterType::Done);
/// assert_eq!(store.filtered().latest().len(), 1);
/// ```
#[derive(Clone)]
pub struct TodoStore {
    store: Store<TodoReducer>,
    filter_tx: Arc<watch::Sender<FilterType>>,
    filtered_tx: Arc<watch::Sender<Vec<Todo>>>,
    filtered: View<Vec<Todo>>,
    filter: View<FilterType>,
    stats: View<TodoStats>,
}

impl TodoStore {
    /// Creates a store over an empty collection, with the filter set to
    /// [`FilterType::All`].
    #[must_use]
    pub fn new() -> Self {
        let store = Store::new(TodoState::new(), TodoReducer::new());

        let (filter_tx, filter_rx) = watch::channel(FilterType::default());
        let filter_tx = Arc::new(filter_tx);

        // The filtered list depends on both the snapshot and the selected
        // filter, so it gets a hand-wired topic instead of a plain
        // projection: snapshot changes land here via the store, filter
        // changes via `set_filter`.
        let initial = store.state(|state| views::filtered_list(state, FilterType::default()));
        let (filtered_tx, filtered_rx) = watch::channel(initial);
        let filtered_tx = Arc::new(filtered_tx);
        {
            let filtered_tx = Arc::clone(&filtered_tx);
            let filter_rx = filter_rx.clone();
            store.attach(Box::new(move |state| {
                let filter = *filter_rx.borrow();
                publish_list(&filtered_tx, views::filtered_list(state, filter));
                !filtered_tx.is_closed()
            }));
        }

        let stats = store.project(views::stats);

        Self {
            store,
            filter_tx,
            filtered_tx,
            filtered: View::from_receiver(filtered_rx),
            filter: View::from_receiver(filter_rx),
            stats,
        }
    }

    /// Creates a store pre-seeded with one pending todo per text, in order.
    ///
    /// Seed items go through the normal create path, so they are validated
    /// and allocated ids exactly like user-submitted items.
    #[must_use]
    pub fn seeded<'a, I>(texts: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let store = Self::new();
        for text in texts {
            store.create(text);
        }
        store
    }

    /// Creates a new todo with the given text.
    ///
    /// Malformed text (empty, whitespace-only, or over-long) is silently
    /// ignored apart from a debug log; nothing is published in that case.
    #[tracing::instrument(skip(self, text))]
    pub fn create(&self, text: &str) {
        if let Err(error) = validate_text(text) {
            tracing::debug!(%error, "create rejected");
            return;
        }
        self.store.send(TodoAction::NewTodo {
            text: text.to_string(),
        });
    }

    /// Replaces the text of the todo with the given id. No-op for unknown ids.
    pub fn edit(&self, id: TodoId, text: &str) {
        self.store.send(TodoAction::EditTodo {
            id,
            text: text.to_string(),
        });
    }

    /// Flips the completion flag of the todo with the given id. No-op for
    /// unknown ids.
    pub fn toggle(&self, id: TodoId) {
        self.store.send(TodoAction::ToggleTodo { id });
    }

    /// Removes the todo with the given id. No-op for unknown ids.
    pub fn delete(&self, id: TodoId) {
        self.store.send(TodoAction::DeleteTodo { id });
    }

    /// Selects the filter applied to the filtered list.
    ///
    /// Re-selecting the current filter publishes nothing.
    pub fn set_filter(&self, filter: FilterType) {
        let changed = self.filter_tx.send_if_modified(|current| {
            if *current == filter {
                false
            } else {
                *current = filter;
                true
            }
        });

        if changed {
            self.store
                .state(|state| publish_list(&self.filtered_tx, views::filtered_list(state, filter)));
        }
    }

    /// Observable of the whole collection snapshot.
    #[must_use]
    pub fn todos(&self) -> View<TodoState> {
        self.store.subscribe()
    }

    /// Observable of the filtered list, in ascending id order.
    #[must_use]
    pub fn filtered(&self) -> View<Vec<Todo>> {
        self.filtered.clone()
    }

    /// Observable of the aggregate statistics.
    #[must_use]
    pub fn stats(&self) -> View<TodoStats> {
        self.stats.clone()
    }

    /// Observable of the currently selected filter.
    #[must_use]
    pub fn filter(&self) -> View<FilterType> {
        self.filter.clone()
    }

    /// Lossless, ordered stream of every submitted action.
    #[must_use]
    pub fn subscribe_actions(&self) -> broadcast::Receiver<TodoAction> {
        self.store.subscribe_actions()
    }

    /// Returns a clone of the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> TodoState {
        self.store.snapshot()
    }
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Publishes a recomputed list, skipping publication when it is identical to
/// the previous one.
fn publish_list(tx: &watch::Sender<Vec<Todo>>, list: Vec<Todo>) {
    let _ = tx.send_if_modified(|current| {
        if *current == list {
            false
        } else {
            *current = list;
            true
        }
    });
}
