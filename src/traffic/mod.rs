pub mod patterns;

pub use patterns::{generate, PatternKind, TrafficConfig};
