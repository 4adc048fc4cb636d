use log::{debug, info};

use crate::dram::{
    BankTracker, Cycle, ReadRequest, RequestBuffer, SbrTable, ScheduleMemory, ScheduleSlot,
    SrrTable, TimingConfig, MAX_REQUESTS, MAX_SBR_ENTRIES, MAX_SCHEDULE_CYCLES, MAX_SRR_ENTRIES,
};
use crate::sched::batch::{BatchScheduler, BatchSummary};
use crate::sched::error::SchedError;
use crate::sched::generate::ScheduleGenerator;
use crate::sched::stats::BatchStats;

/// Coordinator phases. In this sequential model BATCH and GEN only exist
/// inside `schedule_start`; between calls the coordinator sits in IDLE or
/// DONE, and DONE hands back to IDLE implicitly on the next start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum CoordState {
    #[default]
    Idle,
    Batch,
    Gen,
    Done,
}

/// The scheduler core: owns every table, sequences the two phases, and
/// serves schedule readout. Requests persist across batches; the SRR/SBR
/// tables, bank tracker and schedule memory are scratchpads cleared on every
/// `schedule_start`.
pub struct DramScheduler {
    timing: TimingConfig,
    requests: RequestBuffer,
    srr: SrrTable,
    sbr: SbrTable,
    tracker: BankTracker,
    schedule: ScheduleMemory,
    state: CoordState,
    summary: BatchSummary,
    stats: BatchStats,
}

impl Default for DramScheduler {
    fn default() -> Self {
        Self::new(TimingConfig::default())
    }
}

impl DramScheduler {
    pub fn new(timing: TimingConfig) -> Self {
        Self {
            timing,
            requests: RequestBuffer::new(MAX_REQUESTS),
            srr: SrrTable::new(MAX_SRR_ENTRIES),
            sbr: SbrTable::new(MAX_SBR_ENTRIES),
            tracker: BankTracker::new(),
            schedule: ScheduleMemory::new(MAX_SCHEDULE_CYCLES),
            state: CoordState::default(),
            summary: BatchSummary::default(),
            stats: BatchStats::default(),
        }
    }

    /// Ingest port. Refused (false) when the buffer is full or a batch is
    /// running; accepted requests stay buffered until `reset`.
    pub fn submit(&mut self, req: ReadRequest) -> bool {
        if self.schedule_busy() {
            self.stats.record_reject();
            return false;
        }
        let accepted = self.requests.try_push(req);
        if accepted {
            self.stats.record_submit();
        } else {
            self.stats.record_reject();
        }
        accepted
    }

    /// Runs one batch to completion: clears the scratchpads, builds the
    /// row/bank chains, then emits the command schedule.
    pub fn schedule_start(&mut self) -> Result<(), SchedError> {
        self.clear_scratchpads();

        self.state = CoordState::Batch;
        debug!("batch phase: {} buffered requests", self.requests.len());
        let summary =
            match BatchScheduler::new(&mut self.requests, &mut self.srr, &mut self.sbr).run() {
                Ok(summary) => summary,
                Err(err) => {
                    self.state = CoordState::Idle;
                    return Err(err);
                }
            };

        self.state = CoordState::Gen;
        if let Some(critical) = summary.critical_path {
            let generator = ScheduleGenerator::new(
                self.timing,
                &self.requests,
                &self.srr,
                &self.sbr,
                &mut self.tracker,
                &mut self.schedule,
                &mut self.stats,
            );
            if let Err(err) = generator.run(critical) {
                self.state = CoordState::Idle;
                return Err(err);
            }
        }

        self.summary = summary;
        self.stats.record_batch(self.schedule.max_cycle());
        self.state = CoordState::Done;
        info!(
            "schedule ready: {} commands over {} cycles",
            self.schedule.commands().count(),
            self.schedule.max_cycle() + 1
        );
        Ok(())
    }

    /// Level-high from batch completion until the next `schedule_start`.
    pub fn schedule_done(&self) -> bool {
        self.state == CoordState::Done
    }

    pub fn schedule_busy(&self) -> bool {
        matches!(self.state, CoordState::Batch | CoordState::Gen)
    }

    /// Schedule readout by cycle; meaningful once `schedule_done` is high.
    pub fn read(&self, cycle: Cycle) -> ScheduleSlot {
        self.schedule.read(cycle)
    }

    pub fn max_cycle(&self) -> Cycle {
        self.schedule.max_cycle()
    }

    pub fn num_requests(&self) -> usize {
        self.requests.len()
    }

    pub fn num_srr_entries(&self) -> usize {
        self.summary.num_srr
    }

    pub fn num_sbr_entries(&self) -> usize {
        self.summary.num_sbr
    }

    /// SBR index chosen as the critical path, None for an empty batch.
    pub fn critical_path_bank(&self) -> Option<usize> {
        self.summary.critical_path
    }

    pub fn schedule(&self) -> &ScheduleMemory {
        &self.schedule
    }

    pub fn stats(&self) -> &BatchStats {
        &self.stats
    }

    pub fn timing(&self) -> TimingConfig {
        self.timing
    }

    /// Full reset: drops buffered requests, statistics and the last batch.
    pub fn reset(&mut self) {
        self.requests.clear();
        self.clear_scratchpads();
        self.stats = BatchStats::default();
        self.state = CoordState::Idle;
    }

    fn clear_scratchpads(&mut self) {
        self.requests.reset_chains();
        self.srr.clear();
        self.sbr.clear();
        self.tracker.clear();
        self.schedule.clear();
        self.summary = BatchSummary::default();
    }
}
