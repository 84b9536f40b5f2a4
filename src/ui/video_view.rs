use eframe::egui;

use crate::renderer::media_backend::VideoFrame;

/// Displays the most recent decoded frame.
#[derive(Default)]
pub struct VideoView {
    texture: Option<egui::TextureHandle>,
}

impl VideoView {
    pub fn set_frame(&mut self, ctx: &egui::Context, frame: VideoFrame) {
        let color_img = egui::ColorImage::from_rgba_unmultiplied(
            [frame.width as usize, frame.height as usize],
            &frame.data,
        );
        match &mut self.texture {
            Some(texture) => texture.set(color_img, egui::TextureOptions::LINEAR),
            None => {
                self.texture =
                    Some(ctx.load_texture("video_frame", color_img, egui::TextureOptions::LINEAR));
            }
        }
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        let Some(texture) = &self.texture else {
            ui.centered_and_justified(|ui| {
                ui.label("No file loaded");
            });
            return;
        };
        let size = fit_size(texture.size_vec2(), ui.available_size());
        ui.centered_and_justified(|ui| {
            ui.add(egui::Image::from_texture(egui::load::SizedTexture::new(
                texture.id(),
                size,
            )));
        });
    }
}

/// Largest size with the frame's aspect ratio that fits in `available`.
fn fit_size(frame: egui::Vec2, available: egui::Vec2) -> egui::Vec2 {
    if frame.x <= 0.0 || frame.y <= 0.0 {
        return egui::Vec2::ZERO;
    }
    let scale = (available.x / frame.x).min(available.y / frame.y).max(0.0);
    frame * scale
}
