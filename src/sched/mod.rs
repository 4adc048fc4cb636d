pub mod batch;
pub mod controller;
pub mod error;
pub mod generate;
pub mod stats;

mod unit_tests;

pub use batch::{BatchScheduler, BatchSummary};
pub use controller::DramScheduler;
pub use error::SchedError;
pub use generate::ScheduleGenerator;
pub use stats::BatchStats;
