pub mod run;
pub mod segment;

pub use run::{AudioSource, DetectionRun};
pub use segment::{Segment, SegmentClass};
