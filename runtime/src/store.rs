//! The Store: runtime coordinator for a reducer.
//!
//! The store serializes all actions into a strict total order, folds each one
//! through the reducer, and publishes the resulting snapshot to subscribers.
//! It is the single writer of the current snapshot; every observer is a
//! reader of immutable values replaced wholesale, so no observer can ever see
//! a torn or partially applied transition.

use crate::view::View;
use reactive_todo_core::reducer::Reducer;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{broadcast, watch};

/// Default capacity of the action broadcast channel.
const DEFAULT_BROADCAST_CAPACITY: usize = 16;

/// A registered projection topic: recomputes its value from a new snapshot
/// and reports whether it still has subscribers.
pub(crate) type Publisher<S> = Box<dyn Fn(&S) -> bool + Send + Sync>;

/// The Store - single-writer runtime for a [`Reducer`].
///
/// The Store manages:
/// 1. The current snapshot (published through a `watch` channel)
/// 2. The reducer (business logic)
/// 3. Projection topics (derived values, computed once per change)
/// 4. An action broadcast for observers that need the lossless action stream
///
/// # Ordering and atomicity
///
/// `send` calls are serialized by an internal lock: each transition completes,
/// and its snapshot is published, before the next transition begins. No
/// transition is ever interrupted partway and no two transitions interleave,
/// even when `send` is called from multiple threads. All observers therefore
/// see updates in the same relative order as the actions were applied.
///
/// # Publication policy
///
/// A snapshot is published only when the reducer reports
/// [`StateChange::Changed`](reactive_todo_core::StateChange::Changed);
/// no-op transitions wake nobody. Every submitted action is broadcast on the
/// action channel regardless.
///
/// # Example
///
/// ```
/// use reactive_todo_core::{TodoAction, TodoReducer, TodoState};
/// use reactive_todo_runtime::Store;
///
/// let store = Store::new(TodoState::new(), TodoReducer::new());
/// store.send(TodoAction::NewTodo { text: "buy milk".into() });
/// assert_eq!(store.snapshot().count(), 1);
/// ```
pub struct Store<R>
where
    R: Reducer,
{
    inner: Arc<StoreInner<R>>,
}

struct StoreInner<R>
where
    R: Reducer,
{
    reducer: R,
    /// Serializes reduce + publish; this is the single-writer guarantee.
    dispatch: Mutex<()>,
    state_tx: watch::Sender<R::State>,
    action_tx: broadcast::Sender<R::Action>,
    projections: Mutex<Vec<Publisher<R::State>>>,
}

impl<R> Clone for Store<R>
where
    R: Reducer,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R> Store<R>
where
    R: Reducer,
    R::State: Clone + Send + Sync + 'static,
    R::Action: Clone + Send + 'static,
{
    /// Create a new store with an initial snapshot and reducer.
    ///
    /// The initial snapshot is delivered to the first subscriber as-is: a
    /// subscription always starts from the value current at subscription
    /// time, never from a racy in-between state.
    #[must_use]
    pub fn new(initial_state: R::State, reducer: R) -> Self {
        Self::with_broadcast_capacity(initial_state, reducer, DEFAULT_BROADCAST_CAPACITY)
    }

    /// Create a new store with a custom action broadcast capacity.
    ///
    /// Snapshot and projection topics always hold just the latest value and
    /// are unaffected by this; the capacity only buffers the lossless action
    /// stream for [`Store::subscribe_actions`] observers.
    #[must_use]
    pub fn with_broadcast_capacity(
        initial_state: R::State,
        reducer: R,
        capacity: usize,
    ) -> Self {
        let (state_tx, _) = watch::channel(initial_state);
        let (action_tx, _) = broadcast::channel(capacity);

        Self {
            inner: Arc::new(StoreInner {
                reducer,
                dispatch: Mutex::new(()),
                state_tx,
                action_tx,
                projections: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Send an action to the store.
    ///
    /// Fire-and-forget: the effect of the action is only observable through
    /// the subscription bridge. The transition runs synchronously on the
    /// calling thread; concurrent `send` calls serialize at the store.
    #[tracing::instrument(skip(self, action), name = "store_send")]
    pub fn send(&self, action: R::Action) {
        let _guard = self
            .inner
            .dispatch
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let submitted = action.clone();
        let changed = self
            .inner
            .state_tx
            .send_if_modified(|state| self.inner.reducer.reduce(state, action).is_changed());

        if changed {
            metrics::counter!("store.actions.applied").increment(1);
            let state = self.inner.state_tx.borrow();
            self.inner
                .projections
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .retain(|publish| publish(&state));
        } else {
            tracing::trace!("transition was a no-op, skipping publication");
            metrics::counter!("store.actions.noop").increment(1);
        }

        // Broadcast regardless of outcome; no-ops are part of the stream.
        let _ = self.inner.action_tx.send(submitted);
    }

    /// Subscribe to the snapshot itself.
    ///
    /// The returned view starts at the snapshot current at subscription time
    /// and then observes every published transition.
    #[must_use]
    pub fn subscribe(&self) -> View<R::State> {
        View::from_receiver(self.inner.state_tx.subscribe())
    }

    /// Register a derived-view topic computed from every published snapshot.
    ///
    /// `compute` runs exactly once per snapshot change, no matter how many
    /// observers clone the returned view: the computed value is fanned out
    /// through the shared topic. A recomputed value equal to the previous one
    /// is not republished. The topic is dropped once every clone of the view
    /// has been dropped.
    ///
    /// `compute` must be a pure function of the snapshot; in particular it
    /// must not call back into the store.
    #[must_use]
    pub fn project<T, F>(&self, compute: F) -> View<T>
    where
        T: Clone + PartialEq + Send + Sync + 'static,
        F: Fn(&R::State) -> T + Send + Sync + 'static,
    {
        // Hold the dispatch lock so the initial value and the registration
        // happen atomically with respect to in-flight sends.
        let _guard = self
            .inner
            .dispatch
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let initial = compute(&self.inner.state_tx.borrow());
        let (tx, rx) = watch::channel(initial);

        self.attach(Box::new(move |state| {
            let value = compute(state);
            let _ = tx.send_if_modified(|current| {
                if *current == value {
                    false
                } else {
                    *current = value;
                    true
                }
            });
            !tx.is_closed()
        }));

        View::from_receiver(rx)
    }

    /// Subscribe to the lossless, ordered stream of submitted actions.
    ///
    /// Unlike snapshot views, this stream does not conflate: every action is
    /// delivered, in submission order, to every receiver (subject to the
    /// broadcast capacity for lagging receivers).
    #[must_use]
    pub fn subscribe_actions(&self) -> broadcast::Receiver<R::Action> {
        self.inner.action_tx.subscribe()
    }

    /// Returns a clone of the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> R::State {
        self.inner.state_tx.borrow().clone()
    }

    /// Read the current snapshot through a closure, without cloning it.
    pub fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&R::State) -> T,
    {
        f(&self.inner.state_tx.borrow())
    }

    /// Register a raw publisher. Used by facades that need a topic driven by
    /// more inputs than the snapshot alone (e.g. the filtered list, which
    /// also depends on the selected filter).
    pub(crate) fn attach(&self, publisher: Publisher<R::State>) {
        metrics::counter!("store.topics.registered").increment(1);
        self.inner
            .projections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(publisher);
    }
}
