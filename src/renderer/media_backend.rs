use std::path::Path;

use crate::error::PlayerError;
use crate::types::playback_state::MediaState;

/// A decoded RGBA frame ready for upload.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// The media widget the controller drives. Positions and durations are in milliseconds.
pub trait MediaBackend {
    /// Replace the current media with `path`. On failure the current media stays loaded
    /// and keeps its state.
    fn load(&mut self, path: &Path) -> Result<(), PlayerError>;
    fn play(&mut self) -> Result<(), PlayerError>;
    fn pause(&mut self) -> Result<(), PlayerError>;
    fn stop(&mut self) -> Result<(), PlayerError>;
    fn state(&mut self) -> MediaState;
    fn seek(&mut self, position_ms: u64) -> Result<(), PlayerError>;
    fn tell(&mut self) -> u64;
    fn length(&mut self) -> u64;
    /// `volume` is a fraction in `0.0..=1.0`.
    fn set_volume(&mut self, volume: f64) -> Result<(), PlayerError>;

    /// Latest frame decoded since the previous call, if the backend renders video.
    fn poll_frame(&mut self) -> Option<VideoFrame> {
        None
    }

    /// Release the underlying media resources.
    fn shutdown(&mut self) {}
}
