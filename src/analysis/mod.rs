pub mod filter;
pub mod generator;
pub mod summary;

pub use filter::apply_settings;
pub use generator::{generate_segments, probe_duration};
pub use summary::{overall_confidence, summarize, ClassTally, ResultSummary};
