//! crossreel turns an ordered directory of still images into a cross-faded slideshow video.
//!
//! # Pipeline overview
//!
//! 1. **Plan**: durations and frame rate become per-segment frame counts ([`TimingPlan`])
//! 2. **Supply**: images are listed in numeric file-name order and decoded lazily
//!    ([`DirImageSupplier`])
//! 3. **Composite**: hold frames and linear cross-fade frames are produced on an explicitly owned
//!    canvas ([`Compositor`])
//! 4. **Drive**: frames are numbered from 1 and pushed to a [`FrameSink`]; the tail is padded with
//!    the final image until the frame budget is met ([`render_sequence`])
//! 5. **Encode**: the system `ffmpeg` turns the numbered PNGs into an H.264 MP4 ([`run_encoder`])
#![forbid(unsafe_code)]

mod assets;
mod config;
mod driver;
mod encode;
mod foundation;
mod opacity;
mod pipeline;
mod render;
mod timing;

pub use assets::decode::decode_image;
pub use assets::source::SourceImage;
pub use assets::supplier::{DirImageSupplier, ImageSupplier, InMemorySupplier, numeric_file_key};
pub use config::SlideshowConfig;
pub use driver::{RenderStats, render_sequence};
pub use encode::ffmpeg::{
    DEFAULT_CRF, EncodeConfig, default_mp4_config, encoder_command, is_ffmpeg_on_path, run_encoder,
};
pub use encode::sink::{
    FRAME_PATTERN, FrameSink, InMemorySink, PngDirSink, SinkConfig, encode_png, frame_file_name,
};
pub use foundation::core::{Canvas, Fps, FrameNumber, parse_clock_duration};
pub use foundation::error::{CrossreelError, CrossreelResult, Stage};
pub use opacity::{OpacityRamp, opacity_at_step, opacity_for_progress};
pub use pipeline::{RunOpts, RunSummary, plan_slideshow, run_slideshow};
pub use render::FrameRGBA;
pub use render::composite::{Compositor, over_with_alpha};
pub use timing::{Segment, TimingPlan};
