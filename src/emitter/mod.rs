//! Size-bounded document emission.
//!
//! - [`writer`] - buffered output with a running byte counter
//! - [`phase`] - repeats entry blocks until a byte or count limit is met

mod phase;
mod writer;

pub use phase::{run_phase, Limit, Phase};
pub use writer::SizedWriter;
