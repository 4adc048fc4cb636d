use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::dram::ReadRequest;
use crate::sim::top::SimError;

/// One request line of a TOML trace file:
///
/// ```toml
/// [[request]]
/// group = 0
/// bank = 0
/// row = 512
/// col = 8
/// ```
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct TraceRequest {
    pub group: u8,
    pub bank: u8,
    pub row: u32,
    #[serde(default)]
    pub col: u16,
}

#[derive(Debug, Deserialize, Default)]
pub struct TraceFile {
    #[serde(default)]
    pub request: Vec<TraceRequest>,
}

impl TraceFile {
    pub fn load(path: &Path) -> Result<Self, SimError> {
        let text = fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    pub fn requests(&self) -> Vec<ReadRequest> {
        self.request
            .iter()
            .map(|line| ReadRequest::new(line.group, line.bank, line.row, line.col))
            .collect()
    }
}
