//! Subscription handles for observing store values over time.

use thiserror::Error;
use tokio::sync::watch;

/// Errors surfaced to view observers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ViewError {
    /// The store behind this view was dropped; the last observed value stays
    /// readable via [`View::latest`], but no further updates will arrive.
    #[error("store was dropped; no further values will be delivered")]
    StoreClosed,
}

/// A handle observing one published value over time.
///
/// A `View` always holds the latest published value: reading is never
/// blocking, and a view obtained after several actions have been applied
/// starts at the current value, not an initial one. Awaiting
/// [`View::changed`] suspends until the next publication.
///
/// Views are pull-based receivers, so observers are isolated from each other:
/// a slow, stuck, or panicking observer cannot stall the store or delay
/// delivery to anyone else. If an observer lags behind several publications
/// it skips straight to the latest value; updates are never reordered.
///
/// Cloning a `View` creates an independent observer of the same topic; the
/// underlying projection still computes once per snapshot change regardless
/// of how many clones exist. Unsubscribing is just dropping the view, which
/// is safe at any time, including while a publication is in flight.
#[derive(Debug)]
pub struct View<T> {
    rx: watch::Receiver<T>,
}

impl<T> Clone for View<T> {
    /// The clone starts at the value current at clone time, with nothing
    /// pending: its first [`View::changed`] resolves on the next publication,
    /// regardless of what the original view has or has not yet observed.
    fn clone(&self) -> Self {
        let mut rx = self.rx.clone();
        rx.mark_unchanged();
        Self { rx }
    }
}

impl<T: Clone> View<T> {
    pub(crate) const fn from_receiver(rx: watch::Receiver<T>) -> Self {
        Self { rx }
    }

    /// Returns a clone of the latest published value.
    #[must_use]
    pub fn latest(&self) -> T {
        self.rx.borrow().clone()
    }

    /// Waits until a value newer than the last seen one has been published.
    ///
    /// Returns immediately if a publication already happened since this view
    /// last observed one.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::StoreClosed`] if the store was dropped.
    pub async fn changed(&mut self) -> Result<(), ViewError> {
        self.rx.changed().await.map_err(|_| ViewError::StoreClosed)
    }

    /// Waits for the next publication and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::StoreClosed`] if the store was dropped.
    pub async fn next(&mut self) -> Result<T, ViewError> {
        self.changed().await?;
        Ok(self.rx.borrow_and_update().clone())
    }

    /// Whether a value newer than the last seen one has been published.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::StoreClosed`] if the store was dropped.
    pub fn has_changed(&self) -> Result<bool, ViewError> {
        self.rx.has_changed().map_err(|_| ViewError::StoreClosed)
    }

    /// Marks the current value as seen without reading it.
    pub fn mark_seen(&mut self) {
        self.rx.mark_unchanged();
    }
}
