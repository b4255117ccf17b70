use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SegmentClass {
    Speech,
    Silence,
    Noise,
    Music,
}

impl SegmentClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentClass::Speech => "Speech",
            SegmentClass::Silence => "Silence",
            SegmentClass::Noise => "Noise",
            SegmentClass::Music => "Music",
        }
    }
}

/// A labeled time interval within an audio source. Times are seconds from
/// the start of the recording; `[start_time, end_time)` spans within one
/// result set never overlap.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub start_time: f64,
    pub end_time: f64,
    #[serde(rename = "type")]
    pub class: SegmentClass,
    /// Classifier certainty for the label, integer percent 0-100.
    pub confidence: u8,
    /// Diagnostic attributes from analysis (frequency range, amplitude,
    /// signal-to-noise ratio). Keys are open-ended; consumers must
    /// tolerate ones they don't know.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, String>>,
}

impl Segment {
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}
