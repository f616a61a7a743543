//! Integration tests for the subscription bridge.
//!
//! Covers initial-value delivery, replay-latest semantics for late
//! subscribers, ordering of the action stream, no-op publication policy,
//! observer isolation, and single-writer serialization across threads.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic
#![allow(clippy::cast_possible_truncation)] // Test counts fit comfortably in usize

use reactive_todo_core::{FilterType, TodoAction, TodoId, TodoStats};
use reactive_todo_runtime::{TodoStore, ViewError};
use reactive_todo_testing::init_tracing;

// ============================================================================
// Scenario
// ============================================================================

#[tokio::test]
async fn example_scenario() {
    init_tracing();
    let store = TodoStore::new();

    store.create("foobar");
    store.create("bar");

    let snapshot = store.snapshot();
    assert_eq!(snapshot.count(), 2);
    let first = snapshot.get(TodoId::new(0)).unwrap();
    let second = snapshot.get(TodoId::new(1)).unwrap();
    assert_eq!(first.text, "foobar");
    assert_eq!(second.text, "bar");
    assert!(!first.done);
    assert!(!second.done);

    store.toggle(TodoId::new(0));
    assert_eq!(
        store.stats().latest(),
        TodoStats {
            total: 2,
            completed: 1,
            uncompleted: 1,
            percent_completed: 50,
        }
    );

    store.delete(TodoId::new(1));
    let snapshot = store.snapshot();
    assert_eq!(snapshot.count(), 1);
    assert!(snapshot.get(TodoId::new(0)).unwrap().done);
    assert_eq!(
        store.stats().latest(),
        TodoStats {
            total: 1,
            completed: 1,
            uncompleted: 0,
            percent_completed: 100,
        }
    );
}

// ============================================================================
// Initial delivery and replay
// ============================================================================

#[tokio::test]
async fn late_subscriber_starts_at_current_value() {
    let store = TodoStore::new();
    store.create("a");
    store.create("b");
    store.toggle(TodoId::new(0));

    // Subscribed well after the actions were applied: the first observed
    // value is the current snapshot, not an empty initial one.
    let todos = store.todos();
    assert_eq!(todos.latest().count(), 2);

    let stats = store.stats();
    assert_eq!(stats.latest().completed, 1);

    let filtered = store.filtered();
    assert_eq!(filtered.latest().len(), 2);
}

#[tokio::test]
async fn views_wake_on_publication() {
    let store = TodoStore::new();
    let mut stats = store.stats();
    let mut todos = store.todos();

    store.create("buy milk");

    stats.changed().await.unwrap();
    assert_eq!(stats.latest().total, 1);

    let snapshot = todos.next().await.unwrap();
    assert_eq!(snapshot.count(), 1);
}

// ============================================================================
// Filtered view
// ============================================================================

#[tokio::test]
async fn filtered_view_tracks_snapshot_and_filter() {
    let store = TodoStore::seeded(["a", "b", "c"]);
    store.toggle(TodoId::new(1));

    let filtered = store.filtered();
    assert_eq!(filtered.latest().len(), 3);

    store.set_filter(FilterType::Done);
    let done: Vec<u64> = filtered.latest().iter().map(|t| t.id.as_u64()).collect();
    assert_eq!(done, vec![1]);

    store.set_filter(FilterType::Pending);
    let pending: Vec<u64> = filtered.latest().iter().map(|t| t.id.as_u64()).collect();
    assert_eq!(pending, vec![0, 2]);

    // A snapshot change while a filter is active recomputes the list.
    store.toggle(TodoId::new(0));
    let pending: Vec<u64> = filtered.latest().iter().map(|t| t.id.as_u64()).collect();
    assert_eq!(pending, vec![2]);
}

// ============================================================================
// Publication policy
// ============================================================================

#[tokio::test]
async fn unknown_id_mutations_do_not_wake_observers() {
    let store = TodoStore::seeded(["a"]);
    let todos = store.todos();
    let stats = store.stats();

    store.edit(TodoId::new(42), "ghost");
    store.toggle(TodoId::new(42));
    store.delete(TodoId::new(42));

    assert_eq!(todos.has_changed(), Ok(false));
    assert_eq!(stats.has_changed(), Ok(false));
    assert_eq!(store.snapshot().count(), 1);
}

#[tokio::test]
async fn stats_topic_skips_equal_values() {
    let store = TodoStore::seeded(["a", "b"]);
    let stats = store.stats();

    // Editing text changes the snapshot but not the stats; the stats topic
    // recomputes, sees an equal value, and publishes nothing.
    store.edit(TodoId::new(0), "renamed");
    assert_eq!(stats.has_changed(), Ok(false));

    store.toggle(TodoId::new(0));
    assert_eq!(stats.has_changed(), Ok(true));
}

// ============================================================================
// Action stream
// ============================================================================

#[tokio::test]
async fn action_stream_preserves_submission_order() {
    let store = TodoStore::new();
    let mut first = store.subscribe_actions();
    let mut second = store.subscribe_actions();

    store.create("a");
    store.toggle(TodoId::new(0));
    store.delete(TodoId::new(0));

    for rx in [&mut first, &mut second] {
        assert!(matches!(
            rx.recv().await.unwrap(),
            TodoAction::NewTodo { .. }
        ));
        assert!(matches!(
            rx.recv().await.unwrap(),
            TodoAction::ToggleTodo { .. }
        ));
        assert!(matches!(
            rx.recv().await.unwrap(),
            TodoAction::DeleteTodo { .. }
        ));
    }
}

// ============================================================================
// Observer isolation and lifecycle
// ============================================================================

#[tokio::test]
async fn panicking_observer_does_not_break_delivery() {
    let store = TodoStore::new();

    let mut doomed = store.stats();
    let observer = tokio::spawn(async move {
        doomed.changed().await.unwrap();
        panic!("observer crashed");
    });

    let healthy = store.stats();
    store.create("a");

    // Let the doomed observer run and crash.
    assert!(observer.await.is_err());

    store.create("b");
    assert_eq!(healthy.latest().total, 2);
    assert_eq!(store.snapshot().count(), 2);
}

#[tokio::test]
async fn unsubscribing_is_dropping_the_view() {
    let store = TodoStore::new();
    let keep = store.stats();
    let dropped = store.stats();
    drop(dropped);

    store.create("a");
    assert_eq!(keep.latest().total, 1);
}

#[tokio::test]
async fn views_report_closure_after_store_is_dropped() {
    let store = TodoStore::seeded(["a"]);
    let mut stats = store.stats();
    let mut todos = store.todos();

    drop(store);

    // The last value stays readable; waiting reports closure.
    assert_eq!(stats.latest().total, 1);
    assert_eq!(stats.changed().await, Err(ViewError::StoreClosed));
    assert_eq!(todos.changed().await, Err(ViewError::StoreClosed));
}

// ============================================================================
// Single-writer serialization
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_sends_serialize_without_losing_updates() {
    const THREADS: u64 = 4;
    const PER_THREAD: u64 = 25;

    let store = TodoStore::new();

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let store = store.clone();
            std::thread::spawn(move || {
                for i in 0..PER_THREAD {
                    store.create(&format!("todo-{t}-{i}"));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let snapshot = store.snapshot();
    assert_eq!(snapshot.count() as u64, THREADS * PER_THREAD);

    // Ids are exactly 0..N: allocated once each, none reused or skipped.
    let ids: Vec<u64> = snapshot.todos.keys().map(|id| id.as_u64()).collect();
    let expected: Vec<u64> = (0..THREADS * PER_THREAD).collect();
    assert_eq!(ids, expected);

    assert_eq!(store.stats().latest().total, (THREADS * PER_THREAD) as usize);
}
