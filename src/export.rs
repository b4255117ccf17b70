use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::segment::Segment;
use crate::settings::DetectionSettings;

/// Immutable snapshot of one detection run, serialized verbatim: the
/// filtered segments, their aggregate confidence, the originating
/// filename (absent when no source was loaded), the settings in effect,
/// and the generation timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionExport {
    pub results: Vec<Segment>,
    pub confidence: u8,
    pub filename: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub settings: DetectionSettings,
}

impl DetectionExport {
    /// File name the artifact is written under, keyed by the snapshot's
    /// own timestamp.
    pub fn artifact_name(&self) -> String {
        format!(
            "voice-detection-results-{}.json",
            self.timestamp.timestamp_millis()
        )
    }

    /// Write the snapshot as pretty-printed JSON into `dir` and return
    /// the full path.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(self.artifact_name());
        let serialized = serde_json::to_string_pretty(self)?;
        fs::write(&path, serialized)
            .with_context(|| format!("Failed to write export to {}", path.display()))?;
        Ok(path)
    }
}
