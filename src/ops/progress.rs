//! Integer mapping between media positions and the slider scales.

/// Upper bound of the progress slider.
pub const PROGRESS_MAX: u16 = 1000;
/// Upper bound of the volume slider.
pub const VOLUME_MAX: u8 = 100;

/// Media position for a progress slider value. An unknown (zero) duration maps to the start.
///
/// The result never exceeds `duration` because `progress` is clamped to [`PROGRESS_MAX`].
pub fn seek_target(progress: u16, duration: u64) -> u64 {
    let progress = u128::from(progress.min(PROGRESS_MAX));
    (progress * u128::from(duration) / u128::from(PROGRESS_MAX)) as u64
}

/// Progress slider value for a position, saturating at [`PROGRESS_MAX`] past the end.
pub fn progress_for(position: u64, duration: u64) -> Option<u16> {
    if duration == 0 {
        return None;
    }
    let ratio = u128::from(position) * u128::from(PROGRESS_MAX) / u128::from(duration);
    Some(ratio.min(u128::from(PROGRESS_MAX)) as u16)
}

/// Fraction handed to the backend for a volume slider value.
pub fn volume_fraction(volume: u8) -> f64 {
    f64::from(volume.min(VOLUME_MAX)) / f64::from(VOLUME_MAX)
}

/// What the backend should actually output, given the mute flag.
pub fn effective_volume(volume: u8, muted: bool) -> f64 {
    if muted { 0.0 } else { volume_fraction(volume) }
}
