use thiserror::Error;

/// Fatal batch failures. Ingest overflow is not an error: `submit` refuses
/// the request with a deasserted acceptance signal instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SchedError {
    #[error("same-row table full (capacity {capacity})")]
    SrrTableFull { capacity: usize },
    #[error("same-bank table full (capacity {capacity})")]
    SbrTableFull { capacity: usize },
    #[error("schedule memory exhausted ({limit} cycles)")]
    ScheduleOverflow { limit: usize },
}
