use serde::{Deserialize, Serialize};

/// User-tunable detection policy. The pipeline reads a snapshot of these
/// at the moment a run starts; edits made while a run is in flight apply
/// to the next run only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DetectionSettings {
    /// Classifier threshold tuning, 0-100. Reserved for a real analysis
    /// backend; the filter stage does not consult it.
    pub sensitivity: u8,
    /// Drop low-confidence noise segments from results.
    pub filter_noise: bool,
    /// Reserved. Accepted and carried through exports but consulted by no
    /// pipeline stage.
    pub detect_multiple_speakers: bool,
    /// Segments shorter than this many seconds are dropped from results.
    pub min_segment_duration: f64,
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self {
            sensitivity: 75,
            filter_noise: true,
            detect_multiple_speakers: true,
            min_segment_duration: 0.5,
        }
    }
}

impl DetectionSettings {
    /// Shallow-merge a partial update into the current settings.
    pub fn apply(&mut self, patch: &SettingsPatch) {
        if let Some(sensitivity) = patch.sensitivity {
            self.sensitivity = sensitivity;
        }
        if let Some(filter_noise) = patch.filter_noise {
            self.filter_noise = filter_noise;
        }
        if let Some(detect_multiple_speakers) = patch.detect_multiple_speakers {
            self.detect_multiple_speakers = detect_multiple_speakers;
        }
        if let Some(min_segment_duration) = patch.min_segment_duration {
            self.min_segment_duration = min_segment_duration;
        }
    }
}

/// Partial settings update; fields left `None` keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub sensitivity: Option<u8>,
    pub filter_noise: Option<bool>,
    pub detect_multiple_speakers: Option<bool>,
    pub min_segment_duration: Option<f64>,
}
