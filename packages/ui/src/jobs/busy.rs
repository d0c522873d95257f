//! Per-row busy tracking for list mutations.

use std::collections::HashMap;

use jobs_core::JobId;

/// Which mutation a row is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusyKind {
    Updating,
    Deleting,
}

/// Busy flags keyed by job id, so one row's mutation never disables another.
///
/// A row can be updating and deleting at the same time; each kind is
/// counted so overlapping mutations of the same kind settle correctly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BusyRows {
    pending: HashMap<(JobId, BusyKind), u32>,
}

impl BusyRows {
    pub fn start(&mut self, id: JobId, kind: BusyKind) {
        *self.pending.entry((id, kind)).or_default() += 1;
    }

    pub fn settle(&mut self, id: JobId, kind: BusyKind) {
        if let Some(count) = self.pending.get_mut(&(id, kind)) {
            *count -= 1;
            if *count == 0 {
                self.pending.remove(&(id, kind));
            }
        }
    }

    pub fn is_busy(&self, id: JobId, kind: BusyKind) -> bool {
        self.pending.contains_key(&(id, kind))
    }

    pub fn is_updating(&self, id: JobId) -> bool {
        self.is_busy(id, BusyKind::Updating)
    }

    pub fn is_deleting(&self, id: JobId) -> bool {
        self.is_busy(id, BusyKind::Deleting)
    }
}
