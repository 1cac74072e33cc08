//! # Staged State Changes
//!
//! Two-phase update for view state around a backend call:
//!
//! 1. [`Staged::begin`] snapshots the state and applies the pending marks
//!    (busy flags, disabled buttons).
//! 2. On confirmed success, [`Staged::commit`] applies the real change.
//! 3. On failure, [`Staged::rollback`] restores the snapshot exactly.
//!
//! A `Staged` value must be resolved one way or the other; dropping it leaves
//! the pending marks in place, which is why it is `#[must_use]`.
//!
//! ```rust
//! use rewear_client::app::optimistic::Staged;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Button { busy: bool, clicks: u32 }
//!
//! let mut state = Button { busy: false, clicks: 0 };
//! let staged = Staged::begin(&mut state, |s| s.busy = true);
//! assert!(state.busy);
//!
//! staged.rollback(&mut state);
//! assert_eq!(state, Button { busy: false, clicks: 0 });
//! ```

#[must_use = "a staged change must be committed or rolled back"]
#[derive(Debug)]
pub struct Staged<T: Clone> {
    snapshot: T,
}

impl<T: Clone> Staged<T> {
    /// Snapshot `state`, then apply the pending marks.
    pub fn begin(state: &mut T, pending: impl FnOnce(&mut T)) -> Self {
        let snapshot = state.clone();
        pending(state);
        Self { snapshot }
    }

    /// Apply the confirmed change on top of the current state.
    pub fn commit(self, state: &mut T, confirmed: impl FnOnce(&mut T)) {
        confirmed(state);
    }

    /// Restore the state as it was before [`Staged::begin`].
    pub fn rollback(self, state: &mut T) {
        *state = self.snapshot;
    }

    /// The state as it was before the pending marks.
    pub fn snapshot(&self) -> &T {
        &self.snapshot
    }
}
