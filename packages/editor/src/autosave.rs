//! # Autosave Queue
//!
//! Per-component debounce for content edits. Each edit to a persisted
//! component (re)schedules that component's deadline; only the latest
//! content is ever sent because the flush reads current state at fire
//! time. A pending save is cancelled implicitly by rescheduling, or
//! explicitly when its component is removed.
//!
//! The queue holds the rollback baseline for each pending component: the
//! content as last confirmed by the store, captured when the first edit of
//! a batch arrives. A failed flush restores it.

use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

/// One component's coalesced pending save.
#[derive(Debug, Clone)]
pub struct PendingSave {
    pub component_id: i64,
    pub deadline: Instant,
    /// Content to roll back to if the flush fails
    pub baseline: Value,
}

#[derive(Debug)]
pub struct AutosaveQueue {
    delay: Duration,
    pending: HashMap<i64, PendingSave>,
}

impl AutosaveQueue {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: HashMap::new(),
        }
    }

    /// Record an edit to `component_id`. Restarts the component's timer;
    /// the baseline is captured only on the first edit of a batch so a
    /// failed save rolls all coalesced edits back together.
    pub fn schedule(&mut self, component_id: i64, baseline: &Value) {
        let deadline = Instant::now() + self.delay;
        self.pending
            .entry(component_id)
            .and_modify(|save| save.deadline = deadline)
            .or_insert_with(|| PendingSave {
                component_id,
                deadline,
                baseline: baseline.clone(),
            });
    }

    /// Drop the pending save for a removed component.
    pub fn cancel(&mut self, component_id: i64) {
        self.pending.remove(&component_id);
    }

    /// Drop everything pending. Used when the local sequence is replaced
    /// by an authoritative reload and local edits no longer apply.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn is_pending(&self, component_id: i64) -> bool {
        self.pending.contains_key(&component_id)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// The earliest pending deadline, if any save is scheduled.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|save| save.deadline).min()
    }

    /// Remove and return every save due at `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<PendingSave> {
        let due_ids: Vec<i64> = self
            .pending
            .values()
            .filter(|save| save.deadline <= now)
            .map(|save| save.component_id)
            .collect();

        let mut due: Vec<PendingSave> = due_ids
            .into_iter()
            .filter_map(|id| self.pending.remove(&id))
            .collect();
        due.sort_by_key(|save| save.deadline);
        due
    }

    /// Remove and return everything pending, regardless of deadline.
    pub fn take_all(&mut self) -> Vec<PendingSave> {
        let mut all: Vec<PendingSave> = self.pending.drain().map(|(_, save)| save).collect();
        all.sort_by_key(|save| save.deadline);
        all
    }
}
