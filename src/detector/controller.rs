use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use chrono::Utc;
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::Mutex;
use tokio::time;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::analysis::{
    apply_settings, generate_segments, overall_confidence, probe_duration, summarize,
    ResultSummary,
};
use crate::export::DetectionExport;
use crate::models::run::{AudioSource, DetectionRun};
use crate::models::segment::Segment;
use crate::settings::{DetectionSettings, SettingsPatch};

// Stand-ins for backend latency: upload round-trip and analysis time.
const UPLOAD_DELAY_MS: u64 = 500;
const ANALYSIS_DELAY_MS: u64 = 2000;

/// Terminal outcome of one `process_audio` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// Results were committed to the session.
    Completed { segment_count: usize, confidence: u8 },
    /// Cancellation was observed at a suspension point; prior session
    /// state is untouched.
    Cancelled,
    /// The pipeline failed; processing state was reset and nothing stored.
    Failed,
    /// A run is already in flight; the call was a no-op.
    Busy,
    /// No audio source is loaded.
    NoSource,
}

#[derive(Debug, Default)]
struct DetectorState {
    source: Option<AudioSource>,
    run: Option<DetectionRun>,
    settings: DetectionSettings,
    is_processing: bool,
    is_playing: bool,
    cancel_token: Option<CancellationToken>,
}

/// Session-scoped voice detector: owns the loaded source, the current
/// settings, and the latest run. Clone-able; clones share state.
#[derive(Clone)]
pub struct VoiceDetector {
    state: Arc<Mutex<DetectorState>>,
}

impl VoiceDetector {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(DetectorState::default())),
        }
    }

    /// Load an audio source, replacing any previous one and clearing its
    /// results. No-op while a run is in flight.
    pub async fn load_source(&self, filename: impl Into<String>, size_bytes: u64) {
        let mut state = self.state.lock().await;
        if state.is_processing {
            return;
        }
        state.source = Some(AudioSource {
            filename: filename.into(),
            size_bytes,
        });
        state.run = None;
        state.is_playing = false;
    }

    /// Drop the loaded source and its results. No-op while a run is in
    /// flight.
    pub async fn clear_source(&self) {
        let mut state = self.state.lock().await;
        if state.is_processing {
            return;
        }
        state.source = None;
        state.run = None;
        state.is_playing = false;
    }

    pub async fn source(&self) -> Option<AudioSource> {
        self.state.lock().await.source.clone()
    }

    pub async fn latest_run(&self) -> Option<DetectionRun> {
        self.state.lock().await.run.clone()
    }

    /// Segments of the latest run, empty when there is none.
    pub async fn results(&self) -> Vec<Segment> {
        let state = self.state.lock().await;
        state
            .run
            .as_ref()
            .map(|run| run.segments.clone())
            .unwrap_or_default()
    }

    /// Aggregate confidence of the latest run, 0 when there is none.
    pub async fn confidence(&self) -> u8 {
        let state = self.state.lock().await;
        state.run.as_ref().map(|run| run.confidence).unwrap_or(0)
    }

    /// Per-class breakdown of the latest run's segments.
    pub async fn summary(&self) -> ResultSummary {
        let state = self.state.lock().await;
        let segments = state
            .run
            .as_ref()
            .map(|run| run.segments.as_slice())
            .unwrap_or_default();
        summarize(segments)
    }

    pub async fn settings(&self) -> DetectionSettings {
        self.state.lock().await.settings.clone()
    }

    pub async fn is_processing(&self) -> bool {
        self.state.lock().await.is_processing
    }

    pub async fn is_playing(&self) -> bool {
        self.state.lock().await.is_playing
    }

    /// Shallow-merge a settings patch. Takes effect on the next run; a run
    /// already in flight keeps the snapshot it started with.
    pub async fn update_settings(&self, patch: SettingsPatch) {
        let mut state = self.state.lock().await;
        state.settings.apply(&patch);
    }

    /// Flip the playback flag and return the new value. Stays false when
    /// no source is loaded.
    pub async fn toggle_playback(&self) -> bool {
        let mut state = self.state.lock().await;
        if state.source.is_none() {
            return false;
        }
        state.is_playing = !state.is_playing;
        state.is_playing
    }

    /// Request cancellation of the in-flight run, if any. Idempotent; the
    /// run observes the request at its next suspension point.
    pub async fn cancel_processing(&self) {
        let state = self.state.lock().await;
        if let Some(token) = &state.cancel_token {
            token.cancel();
            info!("cancellation requested");
        }
    }

    /// Run the full detection pipeline against the loaded source.
    ///
    /// Serialized per session: a call while a run is in flight is a no-op
    /// (`Busy`). Cancellation is checked after the simulated upload, after
    /// analysis, and once more before results are committed; a cancelled
    /// run leaves the session exactly as it was.
    pub async fn process_audio(&self) -> ProcessOutcome {
        let (source, settings, cancel_token) = {
            let mut state = self.state.lock().await;
            if state.is_processing {
                return ProcessOutcome::Busy;
            }
            let Some(source) = state.source.clone() else {
                return ProcessOutcome::NoSource;
            };
            let cancel_token = CancellationToken::new();
            state.is_processing = true;
            state.cancel_token = Some(cancel_token.clone());
            (source, state.settings.clone(), cancel_token)
        };

        let result = run_pipeline(&source, &settings, &cancel_token).await;

        let mut state = self.state.lock().await;
        state.is_processing = false;
        state.cancel_token = None;

        match result {
            Ok(Some((segments, confidence))) if !cancel_token.is_cancelled() => {
                let run = DetectionRun {
                    id: Uuid::new_v4().to_string(),
                    filename: source.filename.clone(),
                    segments,
                    confidence,
                    completed_at: Utc::now(),
                };
                let segment_count = run.segments.len();
                info!(
                    "analysis complete: {} segments, overall confidence {}% (run {})",
                    segment_count, run.confidence, run.id
                );
                state.run = Some(run);
                ProcessOutcome::Completed {
                    segment_count,
                    confidence,
                }
            }
            Ok(_) => {
                info!("processing cancelled, partial results discarded");
                ProcessOutcome::Cancelled
            }
            Err(err) => {
                error!("audio processing failed: {err:?}");
                ProcessOutcome::Failed
            }
        }
    }

    /// Serialize the latest results as a downloadable JSON artifact in
    /// `dir`. Returns `Ok(None)` without writing anything when there are
    /// no results to export.
    pub async fn export_results(&self, dir: &Path) -> Result<Option<PathBuf>> {
        let export = {
            let state = self.state.lock().await;
            let Some(run) = &state.run else {
                return Ok(None);
            };
            if run.segments.is_empty() {
                return Ok(None);
            }
            DetectionExport {
                results: run.segments.clone(),
                confidence: run.confidence,
                filename: state.source.as_ref().map(|s| s.filename.clone()),
                timestamp: Utc::now(),
                settings: state.settings.clone(),
            }
        };

        let path = export.write_to_dir(dir)?;
        info!(
            "exported {} results to {}",
            export.results.len(),
            path.display()
        );
        Ok(Some(path))
    }
}

/// The pipeline proper: simulated upload, simulated analysis, then
/// generate → filter → aggregate. `Ok(None)` means cancellation was
/// observed at a suspension point.
async fn run_pipeline(
    source: &AudioSource,
    settings: &DetectionSettings,
    cancel_token: &CancellationToken,
) -> Result<Option<(Vec<Segment>, u8)>> {
    info!(
        "uploading {} ({} bytes) to analysis backend",
        source.filename, source.size_bytes
    );
    if !interruptible_delay(UPLOAD_DELAY_MS, cancel_token).await {
        return Ok(None);
    }

    if source.size_bytes == 0 {
        bail!("audio source {} is empty or unreadable", source.filename);
    }

    info!("starting voice detection analysis for {}", source.filename);
    if !interruptible_delay(ANALYSIS_DELAY_MS, cancel_token).await {
        return Ok(None);
    }

    let mut rng = StdRng::from_entropy();
    let duration = probe_duration(&mut rng);
    let raw = generate_segments(duration, &mut rng);

    if cancel_token.is_cancelled() {
        return Ok(None);
    }

    let filtered = apply_settings(&raw, settings);
    let confidence = overall_confidence(&filtered);
    Ok(Some((filtered, confidence)))
}

/// Sleep standing in for a backend stage; false when cancelled mid-wait.
async fn interruptible_delay(delay_ms: u64, cancel_token: &CancellationToken) -> bool {
    tokio::select! {
        _ = time::sleep(Duration::from_millis(delay_ms)) => true,
        _ = cancel_token.cancelled() => false,
    }
}
