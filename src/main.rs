mod error;
mod ops;
mod renderer;
mod types;
mod ui;

use eframe::egui;

use crate::renderer::gst_backend::GstBackend;
use crate::types::config::PlayerConfig;
use crate::ui::app::PlayerApp;
use crate::ui::dialogs;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("starting clipview v{}", env!("CARGO_PKG_VERSION"));

    let config = PlayerConfig::from_env();

    let media = match GstBackend::new() {
        Ok(media) => media,
        Err(e) => {
            log::error!("{}", e);
            dialogs::show_error("Media playback not supported on this platform");
            return Ok(());
        }
    };

    let (width, height) = config.window_size;
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window_title.clone())
            .with_inner_size([width, height]),
        ..Default::default()
    };
    let title = config.window_title.clone();
    eframe::run_native(
        &title,
        native_options,
        Box::new(|_cc| Ok(Box::new(PlayerApp::new(config, media)))),
    )
}
