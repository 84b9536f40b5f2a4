use std::path::PathBuf;

use crate::types::config::FileFilter;

pub fn pick_video_file(filters: &[FileFilter]) -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new().set_title("Choose a video file");
    for filter in filters {
        dialog = dialog.add_filter(&filter.name, filter.extensions.as_slice());
    }
    dialog.pick_file()
}

/// Blocking error box.
pub fn show_error(description: &str) {
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title("Error")
        .set_description(description)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}
