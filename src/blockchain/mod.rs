pub mod header;
pub mod model;

pub use header::Header;
pub use model::{BlockState, Work};

/// Difficulty behind the work target before the rate divisor is applied.
pub const BASE_DIFFICULTY: u64 = 1_000_000;

/// Default rate divisor (scales both target and reported rate).
pub const DEFAULT_RATE_DIV: u64 = 1;

/// Number of the first synthetic block.
pub const INITIAL_NUMBER: u64 = 0x567f01;

pub const INITIAL_GAS_LIMIT: u64 = 0x7a1200;

/// Seconds between timer-driven advances.
pub const ADVANCE_INTERVAL_SECS: u64 = 10;
