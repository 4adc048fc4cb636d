pub mod config;
pub mod dump;
pub mod top;
pub mod trace;

pub use config::{Config, SimConfig};
pub use dump::ScheduleSink;
pub use top::{RunReport, SimError, SynchrotronTop, SynchrotronTopConfig};
pub use trace::{TraceFile, TraceRequest};
