use std::time::{Duration, Instant};

use eframe::egui;

use crate::ops::controller::PlaybackController;
use crate::ops::tick::TickTimer;
use crate::renderer::gst_backend::GstBackend;
use crate::renderer::media_backend::MediaBackend;
use crate::types::config::PlayerConfig;
use crate::types::playback_state::PlaybackState;
use crate::ui::controls::{ControlEvent, controls_panel};
use crate::ui::dialogs;
use crate::ui::video_view::VideoView;

/// Repaint cadence while frames are arriving.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub struct PlayerApp {
    controller: PlaybackController<GstBackend>,
    timer: TickTimer,
    video: VideoView,
    config: PlayerConfig,
}

impl PlayerApp {
    pub fn new(config: PlayerConfig, media: GstBackend) -> Self {
        Self {
            controller: PlaybackController::new(media, config.initial_volume),
            timer: TickTimer::new(config.tick_interval()),
            video: VideoView::default(),
            config,
        }
    }

    fn handle(&mut self, ctx: &egui::Context, event: ControlEvent) {
        match event {
            ControlEvent::Open => self.open(ctx),
            ControlEvent::PlayPause => self.controller.toggle_play_pause(),
            ControlEvent::Stop => self.controller.stop(),
            ControlEvent::Mute => self.controller.toggle_mute(),
            ControlEvent::Seek(progress) => self.controller.seek(progress),
            ControlEvent::Volume(volume) => self.controller.set_volume(volume),
        }
    }

    fn open(&mut self, ctx: &egui::Context) {
        let Some(path) = dialogs::pick_video_file(&self.config.file_filters) else {
            return;
        };
        match self.controller.open_file(&path) {
            Ok(()) => {
                self.timer.start(Instant::now());
                ctx.send_viewport_cmd(egui::ViewportCommand::Title(self.window_title()));
            }
            Err(_) => dialogs::show_error("Unable to load the file"),
        }
    }

    /// Configured title, suffixed with the loaded file name.
    fn window_title(&self) -> String {
        let file_name = self
            .controller
            .session()
            .file_path
            .as_deref()
            .and_then(|path| path.file_name())
            .map(|name| name.to_string_lossy());
        match file_name {
            Some(name) => format!("{} - {}", self.config.window_title, name),
            None => self.config.window_title.clone(),
        }
    }

    fn shutdown(&mut self) {
        self.timer.stop();
        self.controller.shutdown();
    }
}

impl eframe::App for PlayerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.viewport().close_requested()) {
            self.shutdown();
            return;
        }

        if self.timer.due(Instant::now()) {
            self.controller.tick();
        }
        if let Some(frame) = self.controller.media_mut().poll_frame() {
            self.video.set_frame(ctx, frame);
        }

        let mut events = Vec::new();
        egui::TopBottomPanel::bottom("controls_panel").show(ctx, |ui| {
            events = controls_panel(ui, self.controller.view());
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            self.video.show(ui);
        });
        for event in events {
            self.handle(ctx, event);
        }

        if !self.controller.wants_polling() && self.timer.is_running() {
            log::debug!("stopping tick timer");
            self.timer.stop();
        }
        if let Some(wait) = self.timer.next_deadline(Instant::now()) {
            let wait = if self.controller.state() == PlaybackState::Playing {
                wait.min(FRAME_INTERVAL)
            } else {
                wait
            };
            ctx.request_repaint_after(wait);
        }
    }
}

impl Drop for PlayerApp {
    fn drop(&mut self) {
        self.shutdown();
    }
}
