use std::path::PathBuf;

use anyhow::Context as _;
use image::ImageEncoder as _;

use crate::{
    foundation::{
        core::{Canvas, Fps, FrameNumber},
        error::{CrossreelError, CrossreelResult},
    },
    render::{FrameRGBA, composite::ensure_canvas_sized},
};

/// `ffmpeg` image2 input pattern matching [`frame_file_name`].
pub const FRAME_PATTERN: &str = "%d.png";

/// `{n}.png`, no zero padding.
pub fn frame_file_name(idx: FrameNumber) -> String {
    format!("{}.png", idx.0)
}

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    pub canvas: Canvas,
    pub fps: Fps,
    /// Number of frames that will be pushed.
    pub total_frames: u64,
}

/// Consumer of rendered frames.
///
/// Ordering contract: frames arrive numbered `1, 2, 3, ...` with no gaps or repeats.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> CrossreelResult<()>;

    fn push_frame(&mut self, idx: FrameNumber, frame: &FrameRGBA) -> CrossreelResult<()>;

    /// Push a frame whose pixels are identical to the previously pushed one.
    ///
    /// Sinks may reuse whatever they produced for the previous frame.
    fn repeat_frame(&mut self, idx: FrameNumber, frame: &FrameRGBA) -> CrossreelResult<()> {
        self.push_frame(idx, frame)
    }

    /// Called once after the last frame is pushed.
    fn end(&mut self) -> CrossreelResult<()>;
}

fn check_next(last: Option<FrameNumber>, idx: FrameNumber) -> CrossreelResult<()> {
    let expected = last.map_or(FrameNumber::FIRST, FrameNumber::next);
    if idx != expected {
        return Err(CrossreelError::Other(anyhow::anyhow!(
            "frame {} pushed out of order, expected frame {}",
            idx.0,
            expected.0
        )));
    }
    Ok(())
}

/// Writes each frame to `{dir}/{n}.png`.
#[derive(Debug)]
pub struct PngDirSink {
    dir: PathBuf,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameNumber>,
    last_encoded: Option<Vec<u8>>,
}

impl PngDirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cfg: None,
            last_idx: None,
            last_encoded: None,
        }
    }

    pub fn frame_path(&self, idx: FrameNumber) -> PathBuf {
        self.dir.join(frame_file_name(idx))
    }

    /// Remove `{n}.png` files left by an earlier run. Other files are kept.
    fn remove_stale_frames(&self) -> CrossreelResult<usize> {
        let entries =
            std::fs::read_dir(&self.dir).map_err(|e| CrossreelError::frame_dir(&self.dir, e))?;
        let mut removed = 0usize;
        for entry in entries {
            let entry = entry.map_err(|e| CrossreelError::frame_dir(&self.dir, e))?;
            let name = entry.file_name();
            let Some(stem) = name.to_str().and_then(|n| n.strip_suffix(".png")) else {
                continue;
            };
            if stem.is_empty() || !stem.bytes().all(|b| b.is_ascii_digit()) {
                continue;
            }
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            std::fs::remove_file(&path).map_err(|e| CrossreelError::frame_dir(&path, e))?;
            removed += 1;
        }
        Ok(removed)
    }

    fn write_bytes(&self, idx: FrameNumber, bytes: &[u8]) -> CrossreelResult<()> {
        let path = self.frame_path(idx);
        std::fs::write(&path, bytes).map_err(|e| CrossreelError::write(idx, &path, e))?;
        if let Some(cfg) = self.cfg {
            tracing::debug!(frame = idx.0, total = cfg.total_frames, "wrote frame");
        }
        Ok(())
    }
}

/// PNG-encode an RGBA8 frame with fast compression; frames are intermediates for the encoder.
pub fn encode_png(frame: &FrameRGBA) -> anyhow::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(frame.data.len() / 2);
    image::codecs::png::PngEncoder::new_with_quality(
        &mut buf,
        image::codecs::png::CompressionType::Fast,
        image::codecs::png::FilterType::NoFilter,
    )
    .write_image(
        &frame.data,
        frame.width,
        frame.height,
        image::ExtendedColorType::Rgba8,
    )
    .context("encode png")?;
    Ok(buf)
}

impl FrameSink for PngDirSink {
    fn begin(&mut self, cfg: SinkConfig) -> CrossreelResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| CrossreelError::frame_dir(&self.dir, e))?;
        let removed = self.remove_stale_frames()?;
        if removed > 0 {
            tracing::info!(dir = %self.dir.display(), removed, "removed stale frames");
        }

        self.cfg = Some(cfg);
        self.last_idx = None;
        self.last_encoded = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameNumber, frame: &FrameRGBA) -> CrossreelResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| CrossreelError::Other(anyhow::anyhow!("png sink not started")))?;
        check_next(self.last_idx, idx)?;
        ensure_canvas_sized(frame, cfg.canvas)?;

        let bytes =
            encode_png(frame).map_err(|e| CrossreelError::write(idx, self.frame_path(idx), e))?;
        self.write_bytes(idx, &bytes)?;
        self.last_encoded = Some(bytes);
        self.last_idx = Some(idx);
        Ok(())
    }

    fn repeat_frame(&mut self, idx: FrameNumber, frame: &FrameRGBA) -> CrossreelResult<()> {
        let Some(bytes) = self.last_encoded.take() else {
            return self.push_frame(idx, frame);
        };
        check_next(self.last_idx, idx)?;

        let res = self.write_bytes(idx, &bytes);
        self.last_encoded = Some(bytes);
        res?;
        self.last_idx = Some(idx);
        Ok(())
    }

    fn end(&mut self) -> CrossreelResult<()> {
        let cfg = self
            .cfg
            .take()
            .ok_or_else(|| CrossreelError::Other(anyhow::anyhow!("png sink not started")))?;
        let written = self.last_idx.map_or(0, |i| i.0);
        if written != cfg.total_frames {
            return Err(CrossreelError::Other(anyhow::anyhow!(
                "png sink received {written} frames, expected {}",
                cfg.total_frames
            )));
        }
        self.last_encoded = None;
        tracing::info!(dir = %self.dir.display(), frames = written, "frames written");
        Ok(())
    }
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameNumber, FrameRGBA)>,
    repeats: u64,
    ended: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Frames in push order.
    pub fn frames(&self) -> &[(FrameNumber, FrameRGBA)] {
        &self.frames
    }

    /// How many frames arrived through `repeat_frame`.
    pub fn repeats(&self) -> u64 {
        self.repeats
    }

    pub fn ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> CrossreelResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.repeats = 0;
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameNumber, frame: &FrameRGBA) -> CrossreelResult<()> {
        check_next(self.frames.last().map(|(i, _)| *i), idx)?;
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn repeat_frame(&mut self, idx: FrameNumber, frame: &FrameRGBA) -> CrossreelResult<()> {
        self.push_frame(idx, frame)?;
        self.repeats += 1;
        Ok(())
    }

    fn end(&mut self) -> CrossreelResult<()> {
        self.ended = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
