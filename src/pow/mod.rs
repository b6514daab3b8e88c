pub mod cache;
pub mod schedule;
pub mod verify;

pub use cache::EpochCache;
pub use schedule::EthashParams;
pub use verify::{Submission, target_for, verify};
