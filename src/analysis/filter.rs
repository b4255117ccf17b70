use crate::models::segment::{Segment, SegmentClass};
use crate::settings::DetectionSettings;

/// Noise segments at or below this confidence are dropped when noise
/// filtering is enabled. Mock calibration default.
const NOISE_CONFIDENCE_FLOOR: u8 = 60;

/// Apply user policy to a raw segmentation: keep a segment only if it
/// meets the minimum duration, and (with noise filtering on) only if it
/// isn't low-confidence noise.
///
/// Pure projection: relative order is preserved and no segment is
/// mutated. An empty result is a valid "no results" state, not an error.
pub fn apply_settings(segments: &[Segment], settings: &DetectionSettings) -> Vec<Segment> {
    segments
        .iter()
        .filter(|segment| segment.duration() >= settings.min_segment_duration)
        .filter(|segment| passes_noise_policy(segment, settings))
        .cloned()
        .collect()
}

fn passes_noise_policy(segment: &Segment, settings: &DetectionSettings) -> bool {
    if !settings.filter_noise {
        return true;
    }
    segment.class != SegmentClass::Noise || segment.confidence > NOISE_CONFIDENCE_FLOOR
}
