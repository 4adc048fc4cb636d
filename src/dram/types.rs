use num_derive::FromPrimitive;
use serde::Deserialize;

pub type Cycle = u64;

/// Index of a request in the request buffer. Request ids are assigned in
/// ingest order and carried through to the RD commands in the final schedule.
pub type ReqId = usize;

// Address field widths on the command bus.
pub const BANK_GROUP_WIDTH: u32 = 2;
pub const BANK_WIDTH: u32 = 2;
pub const ROW_WIDTH: u32 = 18;
pub const COLUMN_WIDTH: u32 = 10;
pub const REQUEST_ID_WIDTH: u32 = 6;

pub const NUM_BANK_GROUPS: usize = 1 << BANK_GROUP_WIDTH;
pub const BANKS_PER_GROUP: usize = 1 << BANK_WIDTH;
pub const NUM_BANKS: usize = NUM_BANK_GROUPS * BANKS_PER_GROUP;

pub const MAX_REQUESTS: usize = 1 << REQUEST_ID_WIDTH;
pub const MAX_SRR_ENTRIES: usize = 32;
pub const MAX_SBR_ENTRIES: usize = 16;
pub const MAX_SCHEDULE_CYCLES: usize = 2048;

/// Command bus encoding. WR and REF are part of the encoding but the
/// read-batch core never emits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, FromPrimitive)]
pub enum CmdKind {
    #[default]
    Deselect = 0,
    Act = 1,
    Rd = 2,
    Wr = 3,
    Pre = 4,
    Ref = 5,
}

impl CmdKind {
    pub fn encode(self) -> u8 {
        self as u8
    }

    pub fn short(self) -> &'static str {
        match self {
            CmdKind::Deselect => "DES",
            CmdKind::Act => "ACT",
            CmdKind::Rd => "RD",
            CmdKind::Wr => "WR",
            CmdKind::Pre => "PRE",
            CmdKind::Ref => "REF",
        }
    }
}

/// Row-buffer hit identity: requests sharing this tag target the same open row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HitTag {
    pub group: u8,
    pub bank: u8,
    pub row: u32,
}

/// Bank-sharing identity: row clusters sharing this tag contend for one
/// row buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MissTag {
    pub group: u8,
    pub bank: u8,
}

/// Flat index of (bank group, bank) into the per-bank state arrays.
pub fn bank_index(group: u8, bank: u8) -> usize {
    group as usize * BANKS_PER_GROUP + bank as usize
}

/// DDR timing parameters, in command-clock cycles.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// ACT to RD on the same bank.
    pub t_rcd: Cycle,
    /// PRE to the next command on the same bank.
    pub t_rp: Cycle,
    /// ACT to PRE lower bound on the same bank.
    pub t_ras: Cycle,
    /// RD to PRE on the same bank.
    pub t_rtp: Cycle,
    /// ACT to ACT, different bank group.
    pub t_rrd_s: Cycle,
    /// ACT to ACT, same bank group.
    pub t_rrd_l: Cycle,
    /// RD to RD, different bank group.
    pub t_ccd_s: Cycle,
    /// RD to RD, same bank group.
    pub t_ccd_l: Cycle,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            t_rcd: 14,
            t_rp: 14,
            t_ras: 32,
            t_rtp: 8,
            t_rrd_s: 4,
            t_rrd_l: 4,
            t_ccd_s: 4,
            t_ccd_l: 7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::FromPrimitive;

    #[test]
    fn cmd_encoding_is_bit_exact() {
        assert_eq!(CmdKind::Deselect.encode(), 0);
        assert_eq!(CmdKind::Act.encode(), 1);
        assert_eq!(CmdKind::Rd.encode(), 2);
        assert_eq!(CmdKind::Wr.encode(), 3);
        assert_eq!(CmdKind::Pre.encode(), 4);
        assert_eq!(CmdKind::Ref.encode(), 5);
    }

    #[test]
    fn cmd_decodes_from_raw() {
        assert_eq!(CmdKind::from_u8(4), Some(CmdKind::Pre));
        assert_eq!(CmdKind::from_u8(6), None);
    }

    #[test]
    fn bank_index_is_group_major() {
        assert_eq!(bank_index(0, 0), 0);
        assert_eq!(bank_index(0, 3), 3);
        assert_eq!(bank_index(1, 0), 4);
        assert_eq!(bank_index(3, 3), NUM_BANKS - 1);
    }
}
