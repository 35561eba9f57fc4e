use std::path::PathBuf;

use crate::{
    assets::supplier::{DirImageSupplier, ImageSupplier},
    config::SlideshowConfig,
    driver::{RenderStats, render_sequence},
    encode::{ffmpeg::run_encoder, sink::PngDirSink},
    foundation::error::CrossreelResult,
    render::composite::Compositor,
    timing::TimingPlan,
};

/// Options for [`run_slideshow`].
#[derive(Clone, Copy, Debug)]
pub struct RunOpts {
    /// Run the encoder after the frames are written.
    pub encode: bool,
}

impl Default for RunOpts {
    fn default() -> Self {
        Self { encode: true }
    }
}

#[derive(Clone, Debug)]
pub struct RunSummary {
    pub plan: TimingPlan,
    pub stats: RenderStats,
    /// Encoded video path, when the encoder ran.
    pub video: Option<PathBuf>,
}

/// List the inputs and derive the timing plan, without touching any output.
pub fn plan_slideshow(cfg: &SlideshowConfig) -> CrossreelResult<(DirImageSupplier, TimingPlan)> {
    cfg.validate()?;
    let supplier = DirImageSupplier::open(&cfg.inputs_dir, cfg.canvas()?)?;
    let plan = TimingPlan::new(
        cfg.total_ms()?,
        supplier.len(),
        cfg.transition_ms,
        cfg.frame_rate()?,
    )?;
    Ok((supplier, plan))
}

/// Plan, render every frame into `cfg.frames_dir`, then optionally encode.
///
/// Configuration problems surface before any frame is written.
#[tracing::instrument(skip_all, fields(inputs = %cfg.inputs_dir.display()))]
pub fn run_slideshow(cfg: &SlideshowConfig, opts: RunOpts) -> CrossreelResult<RunSummary> {
    let (mut supplier, plan) = plan_slideshow(cfg)?;
    tracing::info!(
        budget = plan.frame_budget,
        hold_ms = plan.hold_ms,
        transition_ms = plan.transition_ms,
        padding = plan.padding_frames(),
        "timing plan"
    );

    let mut compositor = Compositor::new(cfg.canvas()?);
    let mut sink = PngDirSink::new(&cfg.frames_dir);
    let stats = render_sequence(&plan, &mut supplier, &mut compositor, &mut sink)?;

    let video = if opts.encode {
        run_encoder(&cfg.encode_config()?)?;
        Some(cfg.output.clone())
    } else {
        None
    };

    Ok(RunSummary { plan, stats, video })
}
