pub mod analysis;
pub mod detector;
pub mod export;
pub mod models;
pub mod settings;

pub use detector::{ProcessOutcome, VoiceDetector};
pub use export::DetectionExport;
pub use models::{AudioSource, DetectionRun, Segment, SegmentClass};
pub use settings::{DetectionSettings, SettingsPatch};
