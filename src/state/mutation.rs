//! Optimistic mutation tracking
//!
//! A mutation snapshots the value it is about to change, lets the caller
//! apply the change in place, and then either confirms it or restores the
//! snapshot. Restoring happens at most once.

/// Lifecycle of one optimistic change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationState {
    Pending,
    Confirmed,
    RolledBack,
}

#[derive(Debug)]
pub struct Mutation<T: Clone> {
    snapshot: T,
    state: MutationState,
}

impl<T: Clone> Mutation<T> {
    /// Snapshot `current` before changing it
    pub fn begin(current: &T) -> Self {
        Self {
            snapshot: current.clone(),
            state: MutationState::Pending,
        }
    }

    pub fn state(&self) -> MutationState {
        self.state
    }

    /// Keep the change; has no effect unless pending
    pub fn confirm(&mut self) {
        if self.state == MutationState::Pending {
            self.state = MutationState::Confirmed;
        }
    }

    /// Restore the snapshot into `target`
    ///
    /// Returns true if this call restored it; later calls and calls after
    /// `confirm` leave `target` alone.
    pub fn roll_back(&mut self, target: &mut T) -> bool {
        if self.state != MutationState::Pending {
            return false;
        }
        *target = self.snapshot.clone();
        self.state = MutationState::RolledBack;
        true
    }
}
