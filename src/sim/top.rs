use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{info, warn};
use thiserror::Error;
use toml::Value;

use crate::dram::{ReadRequest, TimingConfig};
use crate::sched::{DramScheduler, SchedError};
use crate::sim::config::{Config, SimConfig};
use crate::sim::dump::ScheduleSink;
use crate::sim::trace::TraceFile;
use crate::traffic::{self, TrafficConfig};

#[derive(Debug, Error)]
pub enum SimError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("scheduler: {0}")]
    Sched(#[from] SchedError),
}

#[derive(Debug, Clone, Default)]
pub struct SynchrotronTopConfig {
    pub sim: SimConfig,
    pub timing: TimingConfig,
    pub traffic: TrafficConfig,
}

impl SynchrotronTopConfig {
    /// Splits a TOML config file into its `[sim]`, `[timing]` and
    /// `[traffic]` sections; missing sections fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self, SimError> {
        let text = fs::read_to_string(path)?;
        let root: Value = toml::from_str(&text)?;
        Ok(Self {
            sim: SimConfig::from_section(root.get("sim"))?,
            timing: TimingConfig::from_section(root.get("timing"))?,
            traffic: TrafficConfig::from_section(root.get("traffic"))?,
        })
    }
}

/// Batch report for one harness run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunReport {
    pub submitted: usize,
    pub refused: usize,
    pub commands: usize,
    pub max_cycle: u64,
}

pub struct SynchrotronTop {
    pub scheduler: DramScheduler,
    config: Arc<SynchrotronTopConfig>,
}

impl SynchrotronTop {
    pub fn new(config: Arc<SynchrotronTopConfig>) -> SynchrotronTop {
        SynchrotronTop {
            scheduler: DramScheduler::new(config.timing),
            config,
        }
    }

    /// Gathers requests from the configured trace (or synthetic traffic),
    /// schedules one batch, and optionally dumps the result as CSV.
    pub fn run(&mut self) -> Result<RunReport, SimError> {
        let requests = self.gather_requests()?;

        let mut report = RunReport::default();
        for req in requests {
            if self.scheduler.submit(req) {
                report.submitted += 1;
            } else {
                report.refused += 1;
            }
        }
        if report.refused > 0 {
            warn!("{} requests refused by the ingest port", report.refused);
        }

        self.scheduler.schedule_start()?;
        report.commands = self.scheduler.schedule().commands().count();
        report.max_cycle = self.scheduler.max_cycle();
        info!(
            "scheduled {} requests into {} commands over {} cycles",
            report.submitted,
            report.commands,
            report.max_cycle + 1
        );

        if !self.config.sim.csv.is_empty() {
            let mut sink = ScheduleSink::new(PathBuf::from(&self.config.sim.csv))?;
            for (cycle, slot) in self.scheduler.schedule().commands() {
                sink.write_slot(cycle, &slot);
            }
        }
        Ok(report)
    }

    fn gather_requests(&self) -> Result<Vec<ReadRequest>, SimError> {
        if !self.config.sim.trace.is_empty() {
            let trace = TraceFile::load(Path::new(&self.config.sim.trace))?;
            return Ok(trace.requests());
        }
        Ok(traffic::generate(&self.config.traffic))
    }
}
