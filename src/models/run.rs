use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::segment::Segment;

/// An audio file handed to the detector. The pipeline borrows it
/// read-only; the session owns it until it is cleared or replaced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AudioSource {
    pub filename: String,
    pub size_bytes: u64,
}

/// The committed result of one pipeline execution: the post-filter
/// segments and their aggregate confidence. Lives until the next run
/// replaces it or the source is cleared.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionRun {
    pub id: String,
    pub filename: String,
    pub segments: Vec<Segment>,
    pub confidence: u8,
    pub completed_at: DateTime<Utc>,
}
