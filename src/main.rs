use std::env;
use std::fs;
use std::path::Path;

use anyhow::Result;
use voxscan::{ProcessOutcome, VoiceDetector};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let filename = env::args()
        .nth(1)
        .unwrap_or_else(|| "sample-recording.wav".to_string());
    // The mock backend never reads the file; use its real size when it
    // exists and a nominal one otherwise.
    let size_bytes = fs::metadata(&filename).map(|m| m.len()).unwrap_or(1_048_576);

    let detector = VoiceDetector::new();
    detector.load_source(&filename, size_bytes).await;

    match detector.process_audio().await {
        ProcessOutcome::Completed {
            segment_count,
            confidence,
        } => {
            println!("Detected {segment_count} segments, overall confidence {confidence}%");
        }
        outcome => {
            println!("Processing ended without results: {outcome:?}");
            return Ok(());
        }
    }

    let summary = detector.summary().await;
    println!(
        "Speech {} ({:.1}s) | Silence {} ({:.1}s) | Noise {} ({:.1}s) | Music {} ({:.1}s)",
        summary.speech.count,
        summary.speech.duration_secs,
        summary.silence.count,
        summary.silence.duration_secs,
        summary.noise.count,
        summary.noise.duration_secs,
        summary.music.count,
        summary.music.duration_secs,
    );
    println!("Speech content: {}%", summary.speech_percentage);

    for (index, segment) in detector.results().await.iter().enumerate() {
        println!(
            "{:>3}  {:7.2}s -> {:7.2}s  {:<7}  {}%",
            index + 1,
            segment.start_time,
            segment.end_time,
            segment.class.as_str(),
            segment.confidence,
        );
    }

    if let Some(path) = detector.export_results(Path::new(".")).await? {
        println!("Results written to {}", path.display());
    }

    Ok(())
}
