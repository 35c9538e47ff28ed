pub mod orchestration;

pub use orchestration::{run_stamp, StampArgs, StampOutcome};
