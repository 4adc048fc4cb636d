use crate::dram::Cycle;
use serde::Serialize;
use std::ops::AddAssign;

/// Counters accumulated across batches. Row hit/miss/conflict classify each
/// serviced request by the row-buffer state found when its RD was scheduled.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct BatchStats {
    submitted: u64,
    rejected: u64,
    batches: u64,
    acts: u64,
    rds: u64,
    pres: u64,
    row_hits: u64,
    row_misses: u64,
    row_conflicts: u64,
    max_schedule_span: Cycle,
}

impl BatchStats {
    pub fn submitted(&self) -> u64 {
        self.submitted
    }

    pub fn rejected(&self) -> u64 {
        self.rejected
    }

    pub fn batches(&self) -> u64 {
        self.batches
    }

    pub fn acts(&self) -> u64 {
        self.acts
    }

    pub fn rds(&self) -> u64 {
        self.rds
    }

    pub fn pres(&self) -> u64 {
        self.pres
    }

    pub fn row_hits(&self) -> u64 {
        self.row_hits
    }

    pub fn row_misses(&self) -> u64 {
        self.row_misses
    }

    pub fn row_conflicts(&self) -> u64 {
        self.row_conflicts
    }

    pub fn max_schedule_span(&self) -> Cycle {
        self.max_schedule_span
    }

    pub fn record_submit(&mut self) {
        self.submitted = self.submitted.saturating_add(1);
    }

    pub fn record_reject(&mut self) {
        self.rejected = self.rejected.saturating_add(1);
    }

    pub fn record_batch(&mut self, span: Cycle) {
        self.batches = self.batches.saturating_add(1);
        self.max_schedule_span = self.max_schedule_span.max(span);
    }

    pub fn record_act(&mut self) {
        self.acts = self.acts.saturating_add(1);
    }

    pub fn record_rd(&mut self) {
        self.rds = self.rds.saturating_add(1);
    }

    pub fn record_pre(&mut self) {
        self.pres = self.pres.saturating_add(1);
    }

    pub fn record_row_hit(&mut self) {
        self.row_hits = self.row_hits.saturating_add(1);
    }

    pub fn record_row_miss(&mut self) {
        self.row_misses = self.row_misses.saturating_add(1);
    }

    pub fn record_row_conflict(&mut self) {
        self.row_conflicts = self.row_conflicts.saturating_add(1);
    }
}

impl AddAssign<&BatchStats> for BatchStats {
    fn add_assign(&mut self, other: &BatchStats) {
        self.submitted = self.submitted.saturating_add(other.submitted);
        self.rejected = self.rejected.saturating_add(other.rejected);
        self.batches = self.batches.saturating_add(other.batches);
        self.acts = self.acts.saturating_add(other.acts);
        self.rds = self.rds.saturating_add(other.rds);
        self.pres = self.pres.saturating_add(other.pres);
        self.row_hits = self.row_hits.saturating_add(other.row_hits);
        self.row_misses = self.row_misses.saturating_add(other.row_misses);
        self.row_conflicts = self.row_conflicts.saturating_add(other.row_conflicts);
        self.max_schedule_span = self.max_schedule_span.max(other.max_schedule_span);
    }
}
