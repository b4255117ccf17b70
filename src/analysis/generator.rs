use rand::Rng;
use std::collections::BTreeMap;

use crate::models::segment::{Segment, SegmentClass};

// Mock calibration constants, not measured acoustic parameters. A real
// analysis backend replaces this module wholesale; downstream stages rely
// only on the output shape and ordering.
const MIN_SOURCE_DURATION_SECS: f64 = 30.0;
const MAX_SOURCE_DURATION_SECS: f64 = 180.0;
const MIN_SEGMENT_SECS: f64 = 0.5;
const MAX_SEGMENT_SECS: f64 = 15.0;

/// Categorical class distribution: speech dominates a typical recording,
/// music is rare.
const CLASS_WEIGHTS: [(SegmentClass, f64); 4] = [
    (SegmentClass::Speech, 0.6),
    (SegmentClass::Silence, 0.2),
    (SegmentClass::Noise, 0.15),
    (SegmentClass::Music, 0.05),
];

/// Draw a stand-in duration for a source we don't actually decode.
pub fn probe_duration(rng: &mut impl Rng) -> f64 {
    rng.gen_range(MIN_SOURCE_DURATION_SECS..MAX_SOURCE_DURATION_SECS)
}

/// Synthesize a labeled segmentation covering `duration` seconds.
///
/// Segments are placed back-to-back from 0; generation stops once the
/// running end reaches `duration` and the final segment is truncated so
/// the sequence never exceeds it. The result is re-sorted by start time
/// before returning, independent of generation order.
pub fn generate_segments(duration: f64, rng: &mut impl Rng) -> Vec<Segment> {
    let target_count = (duration / 10.0).floor().max(5.0) as usize;

    let mut segments = Vec::with_capacity(target_count);
    let mut current_time = 0.0;

    for _ in 0..target_count {
        let mut end_time = current_time + rng.gen_range(MIN_SEGMENT_SECS..=MAX_SEGMENT_SECS);
        let truncated = end_time >= duration;
        if truncated {
            end_time = duration;
        }
        if end_time <= current_time {
            break;
        }

        let class = sample_class(rng);
        segments.push(Segment {
            start_time: current_time,
            end_time,
            class,
            confidence: sample_confidence(class, rng),
            metadata: Some(sample_metadata(class, rng)),
        });

        if truncated {
            break;
        }
        current_time = end_time;
    }

    segments.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
    segments
}

/// Cumulative-weight sampling: walk the classes subtracting each weight
/// from a uniform draw until the remainder hits zero.
fn sample_class(rng: &mut impl Rng) -> SegmentClass {
    let total_weight: f64 = CLASS_WEIGHTS.iter().map(|(_, weight)| weight).sum();
    let mut remaining = rng.gen_range(0.0..total_weight);

    for (class, weight) in CLASS_WEIGHTS {
        remaining -= weight;
        if remaining <= 0.0 {
            return class;
        }
    }

    CLASS_WEIGHTS[CLASS_WEIGHTS.len() - 1].0
}

/// Confidence is label-dependent: speech reads with the most certainty,
/// noise and music with the least.
fn sample_confidence(class: SegmentClass, rng: &mut impl Rng) -> u8 {
    let range: std::ops::Range<f64> = match class {
        SegmentClass::Speech => 70.0..100.0,
        SegmentClass::Silence => 60.0..100.0,
        SegmentClass::Noise => 30.0..80.0,
        SegmentClass::Music => 40.0..80.0,
    };
    rng.gen_range(range).floor() as u8
}

fn sample_metadata(class: SegmentClass, rng: &mut impl Rng) -> BTreeMap<String, String> {
    let frequency_range = match class {
        SegmentClass::Speech => "85-255 Hz",
        SegmentClass::Music => "20-20000 Hz",
        _ => "0-5000 Hz",
    };

    let mut metadata = BTreeMap::new();
    metadata.insert("frequencyRange".to_string(), frequency_range.to_string());
    metadata.insert(
        "amplitude".to_string(),
        format!("{:.2}", rng.gen_range(0.0..1.0f64)),
    );
    metadata.insert(
        "snr".to_string(),
        format!("{:.1}", rng.gen_range(10.0..40.0f64)),
    );
    metadata
}
