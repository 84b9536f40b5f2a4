use std::path::{Path, PathBuf};

use crate::types::playback_state::PlaybackState;

/// The in-memory record of the loaded file and its playback and mute status.
/// Only the playback controller mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub file_path: Option<PathBuf>,
    pub state: PlaybackState,
    pub is_muted: bool,
    pub previous_volume: u8, // restored on unmute
}

impl Session {
    pub fn new(initial_volume: u8) -> Self {
        Session {
            file_path: None,
            state: PlaybackState::NoFile,
            is_muted: false,
            previous_volume: initial_volume,
        }
    }

    pub fn has_file(&self) -> bool {
        self.file_path.is_some()
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Replaces whatever was loaded before. Mute status survives a reload.
    pub fn loaded(&mut self, path: &Path) {
        self.file_path = Some(path.to_path_buf());
        self.state = PlaybackState::Stopped;
    }
}
