use eframe::egui;

use crate::ops::controller::ControlsView;
use crate::ops::progress::{PROGRESS_MAX, VOLUME_MAX};

/// User intents raised by the controls panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    Open,
    PlayPause,
    Stop,
    Mute,
    Seek(u16),
    Volume(u8),
}

/// Draw the progress slider and the button row. Returns the events raised this frame.
pub fn controls_panel(ui: &mut egui::Ui, view: &ControlsView) -> Vec<ControlEvent> {
    let mut events = Vec::new();
    let enabled = view.controls_enabled;

    ui.vertical(|ui| {
        // Seek bar spans the whole panel
        let mut progress = view.progress;
        let full_width = ui.available_width();
        ui.spacing_mut().slider_width = full_width;
        let seek = egui::Slider::new(&mut progress, 0..=PROGRESS_MAX).show_value(false);
        if ui.add(seek).changed() {
            events.push(ControlEvent::Seek(progress));
        }

        ui.horizontal(|ui| {
            if ui.button("Open File").clicked() {
                events.push(ControlEvent::Open);
            }
            if ui
                .add_enabled(enabled, egui::Button::new(view.play_label))
                .clicked()
            {
                events.push(ControlEvent::PlayPause);
            }
            if ui.add_enabled(enabled, egui::Button::new("Stop")).clicked() {
                events.push(ControlEvent::Stop);
            }
            if ui
                .add_enabled(enabled, egui::Button::new(view.mute_label))
                .clicked()
            {
                events.push(ControlEvent::Mute);
            }

            ui.label("Volume:");
            let mut volume = view.volume;
            let volume_width = (ui.available_width() - 48.0).max(60.0);
            ui.spacing_mut().slider_width = volume_width;
            let slider = egui::Slider::new(&mut volume, 0..=VOLUME_MAX);
            if ui.add_enabled(enabled, slider).changed() {
                events.push(ControlEvent::Volume(volume));
            }
        });
    });

    events
}
