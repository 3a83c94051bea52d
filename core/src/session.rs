//! Session history of completed duties.
//!
//! Pure storage; the routing decisions live in [`crate::duty::DutyManager`].
//! Duties arrive here once closed and are never mutated again. The history
//! lives for the process lifetime only, nothing is persisted.

use crate::duty::{Duty, Run};

/// Append-only store of finished duties, insertion order = chronological.
#[derive(Debug, Clone, Default)]
pub struct SessionHistory {
    duties: Vec<Duty>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, duty: Duty) {
        self.duties.push(duty);
    }

    pub fn duties(&self) -> &[Duty] {
        &self.duties
    }

    pub fn len(&self) -> usize {
        self.duties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.duties.is_empty()
    }

    pub fn last(&self) -> Option<&Duty> {
        self.duties.last()
    }

    /// Final run of the most recently finished duty.
    pub fn last_run(&self) -> Option<&Run> {
        self.duties.last().and_then(Duty::last_run)
    }
}
