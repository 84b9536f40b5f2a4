use std::path::PathBuf;

use gstreamer as gst;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("unable to load {path:?}: {reason}")]
    LoadFailure { path: PathBuf, reason: String },
    #[error("media playback not supported on this platform: {0}")]
    UnsupportedPlatform(String),
    #[error("{0}")]
    Bool(#[from] gst::glib::BoolError),
    #[error("{0}")]
    StateChange(#[from] gst::StateChangeError),
    #[error("failed to get the gstreamer bus")]
    NoBus,
    #[error("no media loaded")]
    NoMedia,
    #[error("cannot build a file URI from {0:?}")]
    InvalidPath(PathBuf),
    #[error("config: {0}")]
    Io(#[from] std::io::Error),
    #[error("config: {0}")]
    Json(#[from] serde_json::Error),
}

impl PlayerError {
    pub fn load_failure(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        PlayerError::LoadFailure {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
