use super::types::{bank_index, NUM_BANKS};

/// Per-bank row-buffer state: `Some(row)` while a row is open.
#[derive(Debug)]
pub struct BankTracker {
    open: Vec<Option<u32>>,
}

impl Default for BankTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl BankTracker {
    pub fn new() -> Self {
        Self {
            open: vec![None; NUM_BANKS],
        }
    }

    pub fn query(&self, group: u8, bank: u8) -> Option<u32> {
        self.open[bank_index(group, bank)]
    }

    pub fn activate(&mut self, group: u8, bank: u8, row: u32) {
        self.open[bank_index(group, bank)] = Some(row);
    }

    pub fn precharge(&mut self, group: u8, bank: u8) {
        self.open[bank_index(group, bank)] = None;
    }

    /// Closes every bank.
    pub fn clear(&mut self) {
        self.open.fill(None);
    }
}
