use log::{debug, trace};

use crate::dram::{
    bank_index, BankTracker, Cycle, MissTag, ReqId, RequestBuffer, SbrTable, ScheduleMemory,
    ScheduleSlot, SrrTable, TimingConfig, MAX_SCHEDULE_CYCLES, NUM_BANKS,
};
use crate::sched::error::SchedError;
use crate::sched::stats::BatchStats;

/// Single-command-per-cycle arbitration: one occupancy bit per schedule slot.
#[derive(Debug)]
struct CommandBoard {
    taken: Vec<bool>,
}

impl CommandBoard {
    fn new(capacity: usize) -> Self {
        Self {
            taken: vec![false; capacity],
        }
    }

    fn cycle_zero_taken(&self) -> bool {
        self.taken[0]
    }

    /// Claims the first free cycle at or after `from`. None when the board
    /// runs out of slots.
    fn claim(&mut self, from: Cycle) -> Option<Cycle> {
        let mut at = from as usize;
        while *self.taken.get(at)? {
            at += 1;
        }
        self.taken[at] = true;
        Some(at as Cycle)
    }
}

/// Saved traversal position inside one bank cluster, so emission can
/// round-robin across banks without losing its place.
#[derive(Debug, Clone, Copy, Default)]
struct BankCursor {
    srr_ptr: usize,
    req_ptr: Option<ReqId>,
    started: bool,
    row_done: bool,
    finished: bool,
}

/// Phase 2 controller: walks the same-bank chains starting from the critical
/// path and places ACT/PRE/RD commands at the earliest cycles satisfying the
/// DDR timing constraints. All timing state lives here and dies with the run.
pub struct ScheduleGenerator<'a> {
    timing: TimingConfig,
    requests: &'a RequestBuffer,
    srr: &'a SrrTable,
    sbr: &'a SbrTable,
    tracker: &'a mut BankTracker,
    schedule: &'a mut ScheduleMemory,
    stats: &'a mut BatchStats,
    board: CommandBoard,
    cursors: Vec<BankCursor>,
    /// Earliest cycle a further command may target each bank (tRCD after
    /// ACT, tRP after PRE).
    bank_cmd_ready: [Cycle; NUM_BANKS],
    /// Earliest cycle a PRE may target each bank. Running maximum: ACT
    /// raises it by tRAS, RD by tRTP.
    bank_pre_min: [Cycle; NUM_BANKS],
    last_act_time: Cycle,
    last_rd_time: Cycle,
    last_rd_group: Option<u8>,
    last_group: Option<u8>,
}

impl<'a> ScheduleGenerator<'a> {
    pub fn new(
        timing: TimingConfig,
        requests: &'a RequestBuffer,
        srr: &'a SrrTable,
        sbr: &'a SbrTable,
        tracker: &'a mut BankTracker,
        schedule: &'a mut ScheduleMemory,
        stats: &'a mut BatchStats,
    ) -> Self {
        let num_sbr = sbr.len();
        Self {
            timing,
            requests,
            srr,
            sbr,
            tracker,
            schedule,
            stats,
            board: CommandBoard::new(MAX_SCHEDULE_CYCLES),
            cursors: vec![BankCursor::default(); num_sbr],
            bank_cmd_ready: [0; NUM_BANKS],
            bank_pre_min: [0; NUM_BANKS],
            last_act_time: 0,
            last_rd_time: 0,
            last_rd_group: None,
            last_group: None,
        }
    }

    /// Emits the full command schedule for one batch, starting from the
    /// critical-path bank cluster. Every request reachable from the bank
    /// chains receives exactly one RD.
    pub fn run(mut self, critical_path: usize) -> Result<(), SchedError> {
        let num_sbr = self.sbr.len();
        if num_sbr == 0 {
            return Ok(());
        }
        debug!("generating schedule for {num_sbr} bank clusters, critical path {critical_path}");

        let mut cur = critical_path;
        let mut finished = 0;
        loop {
            // Resolve where we stand in the current bank's row chain.
            if !self.cursors[cur].started {
                self.cursors[cur].started = true;
                self.cursors[cur].srr_ptr = self.sbr.entry(cur).head_srr;
            } else if self.cursors[cur].row_done {
                match self.srr.entry(self.cursors[cur].srr_ptr).next_srr {
                    Some(next) => {
                        self.cursors[cur].srr_ptr = next;
                        self.cursors[cur].row_done = false;
                        self.cursors[cur].req_ptr = None;
                    }
                    None => {
                        self.cursors[cur].finished = true;
                        finished += 1;
                        trace!("bank cluster {cur} drained ({finished}/{num_sbr})");
                        if finished == num_sbr {
                            break;
                        }
                        cur = self.next_bank();
                        continue;
                    }
                }
            }

            let entry = *self.srr.entry(self.cursors[cur].srr_ptr);
            let MissTag { group, bank } = self.sbr.entry(cur).tag;
            let row = entry.tag.row;
            let req = self.cursors[cur].req_ptr.unwrap_or(entry.head_req);

            // Open the target row unless the bank already sits on it.
            match self.tracker.query(group, bank) {
                Some(open) if open == row => self.stats.record_row_hit(),
                Some(_) => {
                    self.stats.record_row_conflict();
                    self.emit_pre(group, bank)?;
                    self.emit_act(group, bank, row)?;
                }
                None => {
                    self.stats.record_row_miss();
                    self.emit_act(group, bank, row)?;
                }
            }

            let col = self.requests.get(req).col;
            self.emit_rd(group, bank, row, col, req)?;

            match self.requests.chain_next(req) {
                Some(next) => self.cursors[cur].req_ptr = Some(next),
                None => self.cursors[cur].row_done = true,
            }
            cur = self.next_bank();
        }
        Ok(())
    }

    /// Yield policy: lowest-indexed unfinished bank cluster in a different
    /// bank group from the last command, falling back to the lowest-indexed
    /// unfinished cluster.
    fn next_bank(&self) -> usize {
        let mut fallback = None;
        for idx in 0..self.sbr.len() {
            if self.cursors[idx].finished {
                continue;
            }
            if fallback.is_none() {
                fallback = Some(idx);
            }
            if Some(self.sbr.entry(idx).tag.group) != self.last_group {
                return idx;
            }
        }
        fallback.unwrap_or(0)
    }

    fn claim(&mut self, earliest: Cycle) -> Result<Cycle, SchedError> {
        self.board
            .claim(earliest)
            .ok_or(SchedError::ScheduleOverflow {
                limit: MAX_SCHEDULE_CYCLES,
            })
    }

    /// The global ACT/RD spacing rules only arm once a command exists to
    /// space against; `last_*_time == 0` is ambiguous between "none yet" and
    /// "at cycle 0", which the cycle-0 occupancy bit resolves.
    fn spacing_armed(&self, last_time: Cycle) -> bool {
        last_time > 0 || self.board.cycle_zero_taken()
    }

    fn emit_act(&mut self, group: u8, bank: u8, row: u32) -> Result<Cycle, SchedError> {
        let b = bank_index(group, bank);
        let mut earliest = self.bank_cmd_ready[b];
        if self.spacing_armed(self.last_act_time) {
            earliest = earliest.max(self.last_act_time + self.timing.t_rrd_s);
        }
        let at = self.claim(earliest)?;
        self.schedule.write(at, ScheduleSlot::act(group, bank, row));
        self.bank_cmd_ready[b] = at + self.timing.t_rcd;
        self.bank_pre_min[b] = self.bank_pre_min[b].max(at + self.timing.t_ras);
        self.last_act_time = self.last_act_time.max(at);
        self.last_group = Some(group);
        self.tracker.activate(group, bank, row);
        self.stats.record_act();
        trace!("cycle {at}: ACT bg{group} ba{bank} row {row}");
        Ok(at)
    }

    fn emit_pre(&mut self, group: u8, bank: u8) -> Result<Cycle, SchedError> {
        let b = bank_index(group, bank);
        let earliest = self.bank_cmd_ready[b].max(self.bank_pre_min[b]);
        let at = self.claim(earliest)?;
        self.schedule.write(at, ScheduleSlot::pre(group, bank));
        self.bank_cmd_ready[b] = at + self.timing.t_rp;
        self.last_group = Some(group);
        self.tracker.precharge(group, bank);
        self.stats.record_pre();
        trace!("cycle {at}: PRE bg{group} ba{bank}");
        Ok(at)
    }

    fn emit_rd(
        &mut self,
        group: u8,
        bank: u8,
        row: u32,
        col: u16,
        req: ReqId,
    ) -> Result<Cycle, SchedError> {
        let b = bank_index(group, bank);
        let mut earliest = self.bank_cmd_ready[b];
        if self.spacing_armed(self.last_rd_time) {
            // CAS-to-CAS spacing is wider when both reads stay in one group.
            let spacing = if self.last_rd_group == Some(group) {
                self.timing.t_ccd_l
            } else {
                self.timing.t_ccd_s
            };
            earliest = earliest.max(self.last_rd_time + spacing);
        }
        let at = self.claim(earliest)?;
        self.schedule
            .write(at, ScheduleSlot::rd(group, bank, row, col, req));
        self.bank_pre_min[b] = self.bank_pre_min[b].max(at + self.timing.t_rtp);
        self.last_rd_time = self.last_rd_time.max(at);
        self.last_rd_group = Some(group);
        self.last_group = Some(group);
        self.stats.record_rd();
        trace!("cycle {at}: RD bg{group} ba{bank} row {row} col {col} req {req}");
        Ok(at)
    }
}
