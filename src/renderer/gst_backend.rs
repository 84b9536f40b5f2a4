use std::path::Path;

// GStreamer imports for playback
use gst::prelude::*;
use gstreamer as gst;
use gstreamer_app as gst_app;
use gstreamer_video as gst_video;

use crate::error::PlayerError;
use crate::renderer::media_backend::{MediaBackend, VideoFrame};
use crate::types::playback_state::MediaState;

/// How long `load` waits for the pipeline to preroll.
const PREROLL_TIMEOUT_SECS: u64 = 5;

/// One `playbin` with its RGBA appsink and bus.
struct Pipeline {
    playbin: gst::Element,
    app_sink: gst_app::AppSink,
    bus: gst::Bus,
}

impl Pipeline {
    fn build() -> Result<Self, PlayerError> {
        let playbin = gst::ElementFactory::make("playbin").build()?;

        let caps = gst_video::VideoCapsBuilder::new()
            .format(gst_video::VideoFormat::Rgba)
            .build();
        let app_sink = gst_app::AppSink::builder()
            .caps(&caps)
            .max_buffers(1)
            .drop(true)
            .build();
        playbin.set_property("video-sink", app_sink.upcast_ref::<gst::Element>());

        let bus = playbin.bus().ok_or(PlayerError::NoBus)?;
        Ok(Self {
            playbin,
            app_sink,
            bus,
        })
    }

    /// Point the pipeline at `uri` and wait for it to preroll in `Paused`.
    fn preroll(&self, uri: &url::Url) -> Result<(), String> {
        self.playbin.set_property("uri", uri.as_str());
        let prerolled = self
            .playbin
            .set_state(gst::State::Paused)
            .and_then(|_| {
                self.playbin
                    .state(gst::ClockTime::from_seconds(PREROLL_TIMEOUT_SECS))
                    .0
            });
        prerolled.map(|_| ()).map_err(|e| {
            // the bus usually carries a better reason than the state change
            let mut reason = e.to_string();
            while let Some(msg) = self.bus.pop() {
                if let gst::MessageView::Error(err) = msg.view() {
                    reason = err.error().to_string();
                }
            }
            reason
        })
    }

    fn release(&self) {
        if let Err(e) = self.playbin.set_state(gst::State::Null) {
            log::warn!("failed to release pipeline: {}", e);
        }
    }
}

/// A `playbin` pipeline rendering into an RGBA appsink.
///
/// Everything runs on the caller's thread: frames are pulled without blocking
/// and bus messages are drained whenever state or position is queried.
/// Each load prerolls a fresh pipeline, so a file that fails to open leaves the
/// current one untouched.
pub struct GstBackend {
    pipeline: Pipeline,
    loaded: bool,
    stopped: bool,
    eos: bool,
    preroll_pending: bool,
}

impl GstBackend {
    /// Fails with [`PlayerError::UnsupportedPlatform`] if GStreamer or `playbin` is unavailable.
    pub fn new() -> Result<Self, PlayerError> {
        gst::init().map_err(|e| PlayerError::UnsupportedPlatform(e.to_string()))?;
        let pipeline =
            Pipeline::build().map_err(|e| PlayerError::UnsupportedPlatform(e.to_string()))?;

        log::debug!("gstreamer {} ready", gst::version_string());

        Ok(Self {
            pipeline,
            loaded: false,
            stopped: true,
            eos: false,
            preroll_pending: false,
        })
    }

    fn drain_bus(&mut self) {
        use gst::MessageView;
        while let Some(msg) = self.pipeline.bus.pop() {
            match msg.view() {
                MessageView::Eos(..) => {
                    log::debug!("end of stream");
                    self.eos = true;
                }
                MessageView::Error(err) => {
                    log::warn!(
                        "gstreamer error from {:?}: {} ({:?})",
                        err.src().map(|s| s.path_string()),
                        err.error(),
                        err.debug()
                    );
                }
                MessageView::Warning(warning) => {
                    log::warn!("gstreamer warning: {}", warning.error());
                }
                _ => (),
            }
        }
    }

    fn require_loaded(&self) -> Result<(), PlayerError> {
        if self.loaded {
            Ok(())
        } else {
            Err(PlayerError::NoMedia)
        }
    }

    fn unload(&mut self) {
        self.pipeline.release();
        // stale messages belong to the previous uri
        self.drain_bus();
        self.loaded = false;
        self.stopped = true;
        self.eos = false;
        self.preroll_pending = false;
    }
}

impl MediaBackend for GstBackend {
    fn load(&mut self, path: &Path) -> Result<(), PlayerError> {
        let uri = std::path::absolute(path)
            .ok()
            .and_then(|abs| url::Url::from_file_path(abs).ok())
            .ok_or_else(|| PlayerError::InvalidPath(path.to_path_buf()))?;

        let candidate = Pipeline::build().map_err(|e| PlayerError::load_failure(path, e))?;
        if let Err(reason) = candidate.preroll(&uri) {
            candidate.release();
            return Err(PlayerError::load_failure(path, reason));
        }

        self.unload();
        self.pipeline = candidate;
        self.loaded = true;
        self.preroll_pending = true;
        log::info!("loaded {}", uri);
        Ok(())
    }

    fn play(&mut self) -> Result<(), PlayerError> {
        self.require_loaded()?;
        self.pipeline.playbin.set_state(gst::State::Playing)?;
        self.stopped = false;
        Ok(())
    }

    fn pause(&mut self) -> Result<(), PlayerError> {
        self.require_loaded()?;
        self.pipeline.playbin.set_state(gst::State::Paused)?;
        self.stopped = false;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), PlayerError> {
        self.require_loaded()?;
        self.pipeline.playbin.set_state(gst::State::Paused)?;
        self.stopped = true;
        self.eos = false;
        if let Err(e) = self
            .pipeline
            .playbin
            .seek_simple(gst::SeekFlags::FLUSH, gst::ClockTime::ZERO)
        {
            log::debug!("rewind after stop failed: {}", e);
        }
        self.preroll_pending = true;
        Ok(())
    }

    fn state(&mut self) -> MediaState {
        self.drain_bus();
        if !self.loaded || self.stopped {
            return MediaState::Stopped;
        }
        match self.pipeline.playbin.current_state() {
            gst::State::Playing => MediaState::Playing,
            gst::State::Paused => MediaState::Paused,
            _ => MediaState::Stopped,
        }
    }

    fn seek(&mut self, position_ms: u64) -> Result<(), PlayerError> {
        self.require_loaded()?;
        self.pipeline.playbin.seek_simple(
            gst::SeekFlags::FLUSH | gst::SeekFlags::KEY_UNIT,
            gst::ClockTime::from_mseconds(position_ms),
        )?;
        self.eos = false;
        self.preroll_pending = true;
        Ok(())
    }

    fn tell(&mut self) -> u64 {
        self.drain_bus();
        if !self.loaded {
            return 0;
        }
        // position queries can lag behind the end once the sinks have drained
        if self.eos {
            return self.length();
        }
        self.pipeline.playbin
            .query_position::<gst::ClockTime>()
            .map_or(0, |pos| pos.mseconds())
    }

    fn length(&mut self) -> u64 {
        if !self.loaded {
            return 0;
        }
        self.pipeline.playbin
            .query_duration::<gst::ClockTime>()
            .map_or(0, |dur| dur.mseconds())
    }

    fn set_volume(&mut self, volume: f64) -> Result<(), PlayerError> {
        self.pipeline.playbin.set_property("volume", volume.clamp(0.0, 1.0));
        Ok(())
    }

    fn poll_frame(&mut self) -> Option<VideoFrame> {
        if !self.loaded {
            return None;
        }
        let sample = if self.pipeline.playbin.current_state() == gst::State::Playing {
            self.pipeline.app_sink.try_pull_sample(gst::ClockTime::ZERO)?
        } else if self.preroll_pending {
            let sample = self.pipeline.app_sink.try_pull_preroll(gst::ClockTime::ZERO)?;
            self.preroll_pending = false;
            sample
        } else {
            return None;
        };
        frame_from_sample(&sample)
    }

    fn shutdown(&mut self) {
        self.unload();
    }
}

impl Drop for GstBackend {
    fn drop(&mut self) {
        self.unload();
    }
}

/// Copy an RGBA sample into a tightly packed frame, dropping row padding.
fn frame_from_sample(sample: &gst::Sample) -> Option<VideoFrame> {
    let info = gst_video::VideoInfo::from_caps(sample.caps()?).ok()?;
    let buffer = sample.buffer()?;
    let map = buffer.map_readable().ok()?;

    let width = info.width();
    let height = info.height();
    let row = width as usize * 4;
    let stride = usize::try_from(info.stride()[0]).ok()?.max(row);

    let mut data = Vec::with_capacity(row * height as usize);
    for line in map.as_slice().chunks(stride).take(height as usize) {
        data.extend_from_slice(line.get(..row)?);
    }
    if data.len() != row * height as usize {
        log::debug!("short frame: got {} bytes for {}x{}", data.len(), width, height);
        return None;
    }
    Some(VideoFrame {
        data,
        width,
        height,
    })
}
