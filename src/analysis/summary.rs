use crate::models::segment::{Segment, SegmentClass};

/// Per-class share of a result set.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClassTally {
    pub count: usize,
    pub duration_secs: f64,
}

/// Aggregate view of a filtered result set, computed on demand for
/// presentation and export callers.
#[derive(Debug, Clone, Default)]
pub struct ResultSummary {
    pub total_segments: usize,
    pub total_duration_secs: f64,
    pub speech: ClassTally,
    pub silence: ClassTally,
    pub noise: ClassTally,
    pub music: ClassTally,
    /// Share of total time classified as speech, rounded percent.
    pub speech_percentage: u8,
}

/// Duration-weighted mean confidence, rounded to the nearest integer.
/// Zero when the set spans no time, so an empty result set never divides
/// by zero.
pub fn overall_confidence(segments: &[Segment]) -> u8 {
    let total_duration: f64 = segments.iter().map(Segment::duration).sum();
    if total_duration <= 0.0 {
        return 0;
    }

    let weighted: f64 = segments
        .iter()
        .map(|segment| segment.confidence as f64 * segment.duration())
        .sum();
    (weighted / total_duration).round() as u8
}

/// Tally segment counts and cumulative durations per class.
pub fn summarize(segments: &[Segment]) -> ResultSummary {
    let mut summary = ResultSummary {
        total_segments: segments.len(),
        ..Default::default()
    };

    for segment in segments {
        let tally = match segment.class {
            SegmentClass::Speech => &mut summary.speech,
            SegmentClass::Silence => &mut summary.silence,
            SegmentClass::Noise => &mut summary.noise,
            SegmentClass::Music => &mut summary.music,
        };
        tally.count += 1;
        tally.duration_secs += segment.duration();
        summary.total_duration_secs += segment.duration();
    }

    summary.speech_percentage = if summary.total_duration_secs > 0.0 {
        (100.0 * summary.speech.duration_secs / summary.total_duration_secs).round() as u8
    } else {
        0
    };

    summary
}
