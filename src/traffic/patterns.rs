use serde::Deserialize;

use crate::dram::{ReadRequest, BANKS_PER_GROUP, NUM_BANK_GROUPS};

/// Shape of a synthetic request stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// Consecutive columns of one row: pure row-buffer hits.
    RowStream,
    /// Alternating rows of one bank: worst-case row conflicts.
    RowThrash,
    /// Walks bank groups first, then banks, to expose bank parallelism.
    BankInterleave,
    /// Hashed addresses over the whole device.
    Random,
}

impl PatternKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "row_stream" => Some(Self::RowStream),
            "row_thrash" => Some(Self::RowThrash),
            "bank_interleave" => Some(Self::BankInterleave),
            "random" => Some(Self::Random),
            _ => None,
        }
    }
}

/// Section `[traffic]` of the config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrafficConfig {
    pub pattern: PatternKind,
    pub count: usize,
    /// Base address for the directed patterns.
    pub group: u8,
    pub bank: u8,
    pub row: u32,
    /// Distinct rows touched by the thrash pattern.
    pub rows: u32,
    pub seed: u64,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            pattern: PatternKind::BankInterleave,
            count: 16,
            group: 0,
            bank: 0,
            row: 0x100,
            rows: 2,
            seed: 0,
        }
    }
}

/// Produces a deterministic request stream for the configured pattern.
pub fn generate(config: &TrafficConfig) -> Vec<ReadRequest> {
    (0..config.count)
        .map(|idx| request_at(config, idx as u64))
        .collect()
}

fn request_at(config: &TrafficConfig, idx: u64) -> ReadRequest {
    match config.pattern {
        PatternKind::RowStream => {
            ReadRequest::new(config.group, config.bank, config.row, column_of(idx))
        }
        PatternKind::RowThrash => {
            let rows = config.rows.max(1) as u64;
            ReadRequest::new(
                config.group,
                config.bank,
                config.row + (idx % rows) as u32,
                column_of(idx / rows),
            )
        }
        PatternKind::BankInterleave => {
            let groups = NUM_BANK_GROUPS as u64;
            let banks = BANKS_PER_GROUP as u64;
            ReadRequest::new(
                (idx % groups) as u8,
                ((idx / groups) % banks) as u8,
                config.row,
                column_of(idx / (groups * banks)),
            )
        }
        PatternKind::Random => {
            let bits = mix64(config.seed ^ idx.wrapping_mul(0x9e37_79b9_7f4a_7c15));
            ReadRequest::new(
                (bits & 0x3) as u8,
                ((bits >> 2) & 0x3) as u8,
                ((bits >> 4) & 0x3_ffff) as u32,
                ((bits >> 22) & 0x3ff) as u16,
            )
        }
    }
}

// burst-aligned column, wrapped at the column-width boundary
fn column_of(step: u64) -> u16 {
    ((step << 3) & 0x3ff) as u16
}

// MurmurHash3 finalizer, spreading the per-request seed over all fields
fn mix64(mut x: u64) -> u64 {
    x ^= x >> 33;
    x = x.wrapping_mul(0xff51afd7ed558ccd);
    x ^= x >> 33;
    x = x.wrapping_mul(0xc4ceb9fe1a85ec53);
    x ^= x >> 33;
    x
}
