pub mod controller;

pub use controller::{ProcessOutcome, VoiceDetector};
