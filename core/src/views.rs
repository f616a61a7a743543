//! Derived views: pure projections over a snapshot.
//!
//! Both views are stateless functions of their inputs and linear in the size
//! of the collection, so recomputing them on every mutation is cheap. Caching
//! and fan-out live in the runtime's subscription bridge, not here.

use crate::types::{FilterType, Todo, TodoState, TodoStats};

/// Returns the todos passing `filter`, in ascending id order.
///
/// `All` returns the whole collection; `Done` and `Pending` return the items
/// whose completion flag matches. Ordering follows the snapshot's ascending-id
/// iteration, so the result is stable across recomputations.
#[must_use]
pub fn filtered_list(state: &TodoState, filter: FilterType) -> Vec<Todo> {
    state
        .todos
        .values()
        .filter(|todo| filter.matches(todo))
        .cloned()
        .collect()
}

/// Computes aggregate statistics for a snapshot.
///
/// `percent_completed` is integer-rounded (half away from zero) and defined
/// as 0 for an empty collection.
#[must_use]
pub fn stats(state: &TodoState) -> TodoStats {
    let total = state.count();
    let completed = state.completed_count();
    // Integer round-half-up of 100 * completed / total.
    let percent_completed = if total == 0 {
        0
    } else {
        (completed * 100 + total / 2) / total
    };

    TodoStats {
        total,
        completed,
        uncompleted: total - completed,
        percent_completed,
    }
}
