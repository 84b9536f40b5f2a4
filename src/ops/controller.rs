use std::path::Path;

use crate::error::PlayerError;
use crate::ops::progress::{self, PROGRESS_MAX, VOLUME_MAX};
use crate::renderer::media_backend::MediaBackend;
use crate::types::playback_state::{MediaState, PlaybackState};
use crate::types::session::Session;

/// What the controls panel should currently display.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlsView {
    pub play_label: &'static str,
    pub mute_label: &'static str,
    pub progress: u16,
    pub volume: u8,
    pub controls_enabled: bool,
}

impl ControlsView {
    fn new(volume: u8) -> Self {
        Self {
            play_label: "Play",
            mute_label: "Mute",
            progress: 0,
            volume,
            controls_enabled: false,
        }
    }
}

/// Owns the [`Session`] and turns UI intents into media backend commands.
///
/// Commands other than `open_file` are best effort: a rejected play, seek or
/// volume change is logged and otherwise leaves the session untouched.
pub struct PlaybackController<B: MediaBackend> {
    media: B,
    session: Session,
    view: ControlsView,
    polling: bool,
}

impl<B: MediaBackend> PlaybackController<B> {
    pub fn new(media: B, initial_volume: u8) -> Self {
        let initial_volume = initial_volume.min(VOLUME_MAX);
        Self {
            media,
            session: Session::new(initial_volume),
            view: ControlsView::new(initial_volume),
            polling: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn view(&self) -> &ControlsView {
        &self.view
    }

    pub fn state(&self) -> PlaybackState {
        self.session.state
    }

    /// Whether the periodic tick should be running.
    pub fn wants_polling(&self) -> bool {
        self.polling
    }

    pub fn media_mut(&mut self) -> &mut B {
        &mut self.media
    }

    /// Load `path`, replacing any previous file. On failure the session is unchanged.
    pub fn open_file(&mut self, path: &Path) -> Result<(), PlayerError> {
        if let Err(e) = self.media.load(path) {
            log::error!("failed to load {:?}: {}", path, e);
            return Err(e);
        }

        self.session.loaded(path);
        // fresh media starts at full volume
        self.send_volume(progress::effective_volume(
            self.view.volume,
            self.session.is_muted,
        ));

        self.view.play_label = "Play";
        self.view.progress = 0;
        self.view.controls_enabled = true;
        self.polling = true;
        log::info!("opened {:?}", path);
        Ok(())
    }

    pub fn toggle_play_pause(&mut self) {
        if !self.session.has_file() {
            return;
        }

        if !self.session.is_playing() {
            match self.media.play() {
                Ok(()) => {
                    self.session.state = PlaybackState::Playing;
                    self.view.play_label = "Pause";
                }
                Err(e) => log::debug!("play rejected: {}", e),
            }
        } else {
            if let Err(e) = self.media.pause() {
                log::debug!("pause rejected: {}", e);
            }
            self.session.state = PlaybackState::Paused;
            self.view.play_label = "Play";
        }
    }

    pub fn stop(&mut self) {
        if self.media.state() == MediaState::Stopped {
            return;
        }
        if let Err(e) = self.media.stop() {
            log::debug!("stop rejected: {}", e);
        }
        if self.session.has_file() {
            self.session.state = PlaybackState::Stopped;
        }
        self.view.play_label = "Play";
        self.view.progress = 0;
    }

    pub fn toggle_mute(&mut self) {
        if !self.session.has_file() {
            return;
        }

        if !self.session.is_muted {
            self.session.previous_volume = self.view.volume;
            self.send_volume(0.0);
            self.view.mute_label = "Unmute";
            self.session.is_muted = true;
        } else {
            self.send_volume(progress::volume_fraction(self.session.previous_volume));
            self.view.mute_label = "Mute";
            self.session.is_muted = false;
        }
    }

    /// The progress slider was moved to `desired` (0..=1000).
    pub fn seek(&mut self, desired: u16) {
        self.view.progress = desired.min(PROGRESS_MAX);
        if !self.session.has_file() || self.media.state() == MediaState::Stopped {
            return;
        }

        let length = self.media.length();
        let target = progress::seek_target(self.view.progress, length);
        match self.media.seek(target) {
            Ok(()) => log::debug!("seek to {} ms of {}", target, length),
            Err(e) => log::debug!("seek rejected: {}", e),
        }
    }

    /// The volume slider was moved to `desired` (0..=100). Ignored by the backend while muted.
    pub fn set_volume(&mut self, desired: u8) {
        self.view.volume = desired.min(VOLUME_MAX);
        if self.session.has_file() && !self.session.is_muted {
            self.send_volume(progress::volume_fraction(self.view.volume));
        }
    }

    /// Periodic poll: refresh the progress slider and stop at end of media.
    pub fn tick(&mut self) {
        if !self.session.is_playing() || self.media.state() != MediaState::Playing {
            return;
        }

        let length = self.media.length();
        let position = self.media.tell();
        if let Some(value) = progress::progress_for(position, length) {
            self.view.progress = value;
        }
        // an unknown length (0) would otherwise stop playback immediately
        if length > 0 && position >= length {
            log::info!("end of media at {} ms", position);
            self.stop();
        }
    }

    /// Stop polling and release the media. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if self.polling {
            log::debug!("stopping playback poll");
        }
        self.polling = false;
        self.media.shutdown();
    }

    fn send_volume(&mut self, volume: f64) {
        if let Err(e) = self.media.set_volume(volume) {
            log::debug!("volume change rejected: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// Scripted stand-in for the media widget.
    #[derive(Debug, Default)]
    struct FakeMedia {
        loadable: bool,
        reject_play: bool,
        state: Option<MediaState>,
        position: u64,
        length: u64,
        volume: Option<f64>,
        seeks: Vec<u64>,
        loads: Vec<PathBuf>,
        stops: usize,
        shut_down: bool,
    }

    impl FakeMedia {
        fn new() -> Self {
            FakeMedia {
                loadable: true,
                length: 10_000,
                ..Default::default()
            }
        }
    }

    impl MediaBackend for FakeMedia {
        fn load(&mut self, path: &Path) -> Result<(), PlayerError> {
            // current media is kept, like GstBackend's fresh-pipeline preroll
            if !self.loadable {
                return Err(PlayerError::load_failure(path, "unsupported format"));
            }
            self.loads.push(path.to_path_buf());
            self.state = Some(MediaState::Stopped);
            self.position = 0;
            Ok(())
        }

        fn play(&mut self) -> Result<(), PlayerError> {
            if self.reject_play || self.state.is_none() {
                return Err(PlayerError::NoMedia);
            }
            self.state = Some(MediaState::Playing);
            Ok(())
        }

        fn pause(&mut self) -> Result<(), PlayerError> {
            self.state = Some(MediaState::Paused);
            Ok(())
        }

        fn stop(&mut self) -> Result<(), PlayerError> {
            self.stops += 1;
            self.state = Some(MediaState::Stopped);
            self.position = 0;
            Ok(())
        }

        fn state(&mut self) -> MediaState {
            self.state.unwrap_or(MediaState::Stopped)
        }

        fn seek(&mut self, position_ms: u64) -> Result<(), PlayerError> {
            self.seeks.push(position_ms);
            self.position = position_ms;
            Ok(())
        }

        fn tell(&mut self) -> u64 {
            self.position
        }

        fn length(&mut self) -> u64 {
            self.length
        }

        fn set_volume(&mut self, volume: f64) -> Result<(), PlayerError> {
            self.volume = Some(volume);
            Ok(())
        }

        fn shutdown(&mut self) {
            self.shut_down = true;
        }
    }

    fn controller() -> PlaybackController<FakeMedia> {
        PlaybackController::new(FakeMedia::new(), 100)
    }

    fn loaded() -> PlaybackController<FakeMedia> {
        let mut c = controller();
        c.open_file(Path::new("clip.mp4")).unwrap();
        c
    }

    fn playing() -> PlaybackController<FakeMedia> {
        let mut c = loaded();
        c.toggle_play_pause();
        c
    }

    #[test]
    fn test_starts_empty_with_controls_disabled() {
        let c = controller();
        assert_eq!(c.state(), PlaybackState::NoFile);
        assert_eq!(c.session().previous_volume, 100);
        assert!(!c.view().controls_enabled);
        assert!(!c.wants_polling());
    }

    #[test]
    fn test_play_without_file_is_ignored() {
        let mut c = controller();
        c.toggle_play_pause();
        assert_eq!(c.state(), PlaybackState::NoFile);
        assert_eq!(c.view().play_label, "Play");
        assert_eq!(c.media_mut().state, None);
    }

    #[test]
    fn test_open_file_enters_stopped() {
        let c = loaded();
        assert_eq!(c.state(), PlaybackState::Stopped);
        assert_eq!(c.session().file_path.as_deref(), Some(Path::new("clip.mp4")));
        assert_eq!(c.view().progress, 0);
        assert!(c.view().controls_enabled);
        assert!(c.wants_polling());
    }

    #[test]
    fn test_failed_load_keeps_prior_session() {
        let mut c = playing();
        let before = c.session().clone();
        c.media_mut().loadable = false;

        let err = c.open_file(Path::new("broken.avi")).unwrap_err();
        assert!(matches!(err, PlayerError::LoadFailure { .. }));
        assert_eq!(c.session(), &before);
        assert_eq!(c.view().play_label, "Pause");
    }

    #[test]
    fn test_failed_reload_keeps_playback_working() {
        let mut c = playing();
        c.media_mut().loadable = false;
        assert!(c.open_file(Path::new("broken.avi")).is_err());
        assert_eq!(c.media_mut().loads, vec![PathBuf::from("clip.mp4")]);

        c.media_mut().position = 4_000;
        c.tick();
        assert_eq!(c.view().progress, 400);

        c.toggle_play_pause();
        assert_eq!(c.state(), PlaybackState::Paused);
        assert_eq!(c.media_mut().state, Some(MediaState::Paused));
        c.toggle_play_pause();
        assert_eq!(c.state(), PlaybackState::Playing);
        assert_eq!(c.media_mut().state, Some(MediaState::Playing));

        c.stop();
        assert_eq!(c.state(), PlaybackState::Stopped);
        assert_eq!(c.media_mut().stops, 1);
    }

    #[test]
    fn test_failed_first_load_leaves_no_file() {
        let mut media = FakeMedia::new();
        media.loadable = false;
        let mut c = PlaybackController::new(media, 100);
        assert!(c.open_file(Path::new("broken.avi")).is_err());
        assert_eq!(c.state(), PlaybackState::NoFile);
        assert!(!c.view().controls_enabled);
        assert!(!c.wants_polling());
    }

    #[test]
    fn test_play_pause_cycle() {
        let mut c = playing();
        assert_eq!(c.state(), PlaybackState::Playing);
        assert_eq!(c.view().play_label, "Pause");

        c.toggle_play_pause();
        assert_eq!(c.state(), PlaybackState::Paused);
        assert_eq!(c.view().play_label, "Play");
        assert_eq!(c.media_mut().state, Some(MediaState::Paused));

        c.toggle_play_pause();
        assert_eq!(c.state(), PlaybackState::Playing);
    }

    #[test]
    fn test_rejected_play_is_silent() {
        let mut c = loaded();
        c.media_mut().reject_play = true;
        c.toggle_play_pause();
        assert_eq!(c.state(), PlaybackState::Stopped);
        assert_eq!(c.view().play_label, "Play");
    }

    #[test]
    fn test_stop_resets_progress() {
        let mut c = playing();
        c.media_mut().position = 5_000;
        c.tick();
        assert_eq!(c.view().progress, 500);

        c.stop();
        assert_eq!(c.state(), PlaybackState::Stopped);
        assert_eq!(c.view().progress, 0);
        assert_eq!(c.view().play_label, "Play");
        assert_eq!(c.media_mut().stops, 1);
    }

    #[test]
    fn test_stop_when_already_stopped_is_noop() {
        let mut c = loaded();
        c.stop();
        assert_eq!(c.media_mut().stops, 0);

        let mut empty = controller();
        empty.stop();
        assert_eq!(empty.state(), PlaybackState::NoFile);
        assert_eq!(empty.media_mut().stops, 0);
    }

    #[test]
    fn test_stop_from_paused() {
        let mut c = playing();
        c.toggle_play_pause();
        c.stop();
        assert_eq!(c.state(), PlaybackState::Stopped);
        assert_eq!(c.media_mut().stops, 1);
    }

    #[test]
    fn test_tick_updates_progress() {
        let mut c = playing();
        c.media_mut().position = 5_000;
        c.tick();
        assert_eq!(c.view().progress, 500);
        assert_eq!(c.state(), PlaybackState::Playing);
    }

    #[test]
    fn test_tick_at_end_of_media_stops() {
        let mut c = playing();
        c.media_mut().position = 10_000;
        c.tick();
        assert_eq!(c.state(), PlaybackState::Stopped);
        assert_eq!(c.view().progress, 0);
        assert_eq!(c.view().play_label, "Play");
        assert_eq!(c.media_mut().stops, 1);
    }

    #[test]
    fn test_tick_ignored_unless_playing() {
        let mut c = playing();
        c.toggle_play_pause();
        c.media_mut().position = 7_000;
        c.tick();
        assert_eq!(c.view().progress, 0);

        // backend disagrees with the session
        let mut c = playing();
        c.media_mut().state = Some(MediaState::Paused);
        c.media_mut().position = 7_000;
        c.tick();
        assert_eq!(c.view().progress, 0);
    }

    #[test]
    fn test_tick_with_unknown_length_keeps_playing() {
        let mut c = playing();
        c.media_mut().length = 0;
        c.media_mut().position = 1_234;
        c.tick();
        assert_eq!(c.state(), PlaybackState::Playing);
        assert_eq!(c.view().progress, 0);
    }

    #[test]
    fn test_mute_round_trip_restores_volume() {
        let mut c = loaded();
        c.set_volume(80);
        assert_eq!(c.media_mut().volume, Some(0.8));

        c.toggle_mute();
        assert!(c.session().is_muted);
        assert_eq!(c.session().previous_volume, 80);
        assert_eq!(c.media_mut().volume, Some(0.0));
        assert_eq!(c.view().mute_label, "Unmute");

        c.toggle_mute();
        assert!(!c.session().is_muted);
        assert_eq!(c.media_mut().volume, Some(0.8));
        assert_eq!(c.view().mute_label, "Mute");
    }

    #[test]
    fn test_mute_without_file_is_ignored() {
        let mut c = controller();
        c.toggle_mute();
        assert!(!c.session().is_muted);
        assert_eq!(c.media_mut().volume, None);
    }

    #[test]
    fn test_volume_while_muted_is_dropped() {
        let mut c = loaded();
        c.set_volume(80);
        c.toggle_mute();
        c.set_volume(30);
        assert_eq!(c.media_mut().volume, Some(0.0));
        assert_eq!(c.view().volume, 30);

        c.toggle_mute();
        // restored from the level saved when muting
        assert_eq!(c.media_mut().volume, Some(0.8));
    }

    #[test]
    fn test_volume_without_file_only_moves_slider() {
        let mut c = controller();
        c.set_volume(40);
        assert_eq!(c.view().volume, 40);
        assert_eq!(c.media_mut().volume, None);
    }

    #[test]
    fn test_seek_maps_progress_to_position() {
        let mut c = playing();
        c.seek(250);
        assert_eq!(c.media_mut().seeks, vec![2_500]);
        c.seek(1000);
        assert_eq!(c.media_mut().seeks, vec![2_500, 10_000]);
    }

    #[test]
    fn test_seek_while_stopped_is_noop() {
        let mut c = loaded();
        c.seek(500);
        assert!(c.media_mut().seeks.is_empty());
        assert_eq!(c.view().progress, 500);

        let mut empty = controller();
        empty.seek(500);
        assert!(empty.media_mut().seeks.is_empty());
    }

    #[test]
    fn test_seek_with_unknown_length_goes_to_start() {
        let mut c = playing();
        c.media_mut().length = 0;
        c.seek(700);
        assert_eq!(c.media_mut().seeks, vec![0]);
    }

    #[test]
    fn test_seek_while_paused() {
        let mut c = playing();
        c.toggle_play_pause();
        c.seek(100);
        assert_eq!(c.media_mut().seeks, vec![1_000]);
    }

    #[test]
    fn test_reload_replaces_session() {
        let mut c = playing();
        c.media_mut().position = 3_000;
        c.tick();
        c.toggle_mute();

        c.open_file(Path::new("other.mkv")).unwrap();
        assert_eq!(c.state(), PlaybackState::Stopped);
        assert_eq!(c.view().play_label, "Play");
        assert_eq!(c.view().progress, 0);
        assert!(c.session().is_muted);
        assert_eq!(c.media_mut().volume, Some(0.0));
        assert_eq!(c.media_mut().loads.len(), 2);
    }

    #[test]
    fn test_shutdown_stops_polling() {
        let mut c = playing();
        c.shutdown();
        assert!(!c.wants_polling());
        assert!(c.media_mut().shut_down);
        c.shutdown();
    }
}
