use super::types::{CmdKind, Cycle, ReqId};

/// One cycle's worth of command bus state. The payload fields are only
/// meaningful when `cmd` is not DESELECT.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduleSlot {
    pub cmd: CmdKind,
    pub group: u8,
    pub bank: u8,
    pub row: u32,
    pub col: u16,
    pub request: ReqId,
}

impl ScheduleSlot {
    pub fn act(group: u8, bank: u8, row: u32) -> Self {
        Self {
            cmd: CmdKind::Act,
            group,
            bank,
            row,
            ..Self::default()
        }
    }

    pub fn pre(group: u8, bank: u8) -> Self {
        Self {
            cmd: CmdKind::Pre,
            group,
            bank,
            ..Self::default()
        }
    }

    pub fn rd(group: u8, bank: u8, row: u32, col: u16, request: ReqId) -> Self {
        Self {
            cmd: CmdKind::Rd,
            group,
            bank,
            row,
            col,
            request,
        }
    }

    pub fn is_deselect(&self) -> bool {
        self.cmd == CmdKind::Deselect
    }
}

/// Dense cycle-indexed store of the emitted command sequence.
#[derive(Debug)]
pub struct ScheduleMemory {
    slots: Vec<ScheduleSlot>,
    max_cycle: Cycle,
}

impl ScheduleMemory {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![ScheduleSlot::default(); capacity],
            max_cycle: 0,
        }
    }

    /// Overwrites one slot and tracks the highest cycle written. Callers
    /// bound `cycle` through the command board before writing.
    pub fn write(&mut self, cycle: Cycle, slot: ScheduleSlot) {
        self.slots[cycle as usize] = slot;
        self.max_cycle = self.max_cycle.max(cycle);
    }

    /// Total read: cycles never written (or beyond capacity) read as DESELECT
    /// with a zero payload.
    pub fn read(&self, cycle: Cycle) -> ScheduleSlot {
        self.slots
            .get(cycle as usize)
            .copied()
            .unwrap_or_default()
    }

    pub fn max_cycle(&self) -> Cycle {
        self.max_cycle
    }

    /// Non-DESELECT slots in cycle order.
    pub fn commands(&self) -> impl Iterator<Item = (Cycle, ScheduleSlot)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| !slot.is_deselect())
            .map(|(cycle, slot)| (cycle as Cycle, *slot))
    }

    pub fn clear(&mut self) {
        self.slots.fill(ScheduleSlot::default());
        self.max_cycle = 0;
    }
}
