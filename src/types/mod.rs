pub mod config;
pub mod playback_state;
pub mod session;
