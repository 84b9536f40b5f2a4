/// Where the controller believes the current session is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    NoFile,
    Stopped,
    Playing,
    Paused,
}

/// State as reported by the media backend itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaState {
    Playing,
    Paused,
    Stopped,
}
