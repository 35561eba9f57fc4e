use crate::{
    assets::{source::SourceImage, supplier::ImageSupplier},
    encode::sink::{FrameSink, SinkConfig},
    foundation::{
        core::FrameNumber,
        error::{CrossreelError, CrossreelResult},
    },
    opacity::OpacityRamp,
    render::composite::Compositor,
    timing::{Segment, TimingPlan},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub frames_total: u64,
    pub hold_frames: u64,
    pub transition_frames: u64,
    /// Frames of the final image appended to reach the frame budget.
    pub padded_frames: u64,
}

/// Numbers frames and tracks what the sink last received.
struct Emitter<'a> {
    sink: &'a mut dyn FrameSink,
    next: FrameNumber,
    /// Image whose hold frame was pushed last, if the last frame was a hold frame.
    last_hold: Option<usize>,
}

impl Emitter<'_> {
    fn emitted(&self) -> u64 {
        self.next.0 - 1
    }

    fn hold(
        &mut self,
        compositor: &mut Compositor,
        image: &SourceImage,
        frames: u64,
    ) -> CrossreelResult<()> {
        if frames == 0 {
            return Ok(());
        }
        let frame = compositor.composite_hold_frame(image)?;
        for _ in 0..frames {
            if self.last_hold == Some(image.index) {
                self.sink.repeat_frame(self.next, frame)?;
            } else {
                self.sink.push_frame(self.next, frame)?;
                self.last_hold = Some(image.index);
            }
            self.next = self.next.next();
        }
        Ok(())
    }

    fn transition(
        &mut self,
        compositor: &mut Compositor,
        incoming: &SourceImage,
        outgoing: &SourceImage,
        frames: u64,
    ) -> CrossreelResult<()> {
        for opacity in OpacityRamp::new(frames) {
            let frame = compositor.composite_transition_frame(incoming, outgoing, opacity)?;
            self.sink.push_frame(self.next, frame)?;
            self.last_hold = None;
            self.next = self.next.next();
        }
        Ok(())
    }
}

/// Render the full frame sequence described by `plan` into `sink`.
///
/// Holds and transitions are emitted in order, then the final image is repeated until exactly
/// `plan.frame_budget` frames exist. At most two decoded images are alive at any time.
#[tracing::instrument(skip_all, fields(images = plan.item_count, budget = plan.frame_budget))]
pub fn render_sequence(
    plan: &TimingPlan,
    supplier: &mut dyn ImageSupplier,
    compositor: &mut Compositor,
    sink: &mut dyn FrameSink,
) -> CrossreelResult<RenderStats> {
    if supplier.len() != plan.item_count {
        return Err(CrossreelError::config(format!(
            "timing plan covers {} images but the supplier has {}",
            plan.item_count,
            supplier.len()
        )));
    }
    let planned = plan.planned_frames();
    if planned > plan.frame_budget {
        return Err(CrossreelError::Other(anyhow::anyhow!(
            "planned {planned} frames exceeds the budget of {}",
            plan.frame_budget
        )));
    }

    compositor.reset();
    sink.begin(SinkConfig {
        canvas: compositor.canvas(),
        fps: plan.fps,
        total_frames: plan.frame_budget,
    })?;

    let mut emitter = Emitter {
        sink: &mut *sink,
        next: FrameNumber::FIRST,
        last_hold: None,
    };
    let mut stats = RenderStats::default();
    let mut current: Option<SourceImage> = None;

    for segment in plan.segments() {
        match segment {
            Segment::Hold { image, frames } => {
                let img = match current.take() {
                    Some(img) if img.index == image => img,
                    _ => supplier.load(image)?,
                };
                tracing::info!(image, frames, "hold");
                emitter.hold(compositor, &img, frames)?;
                stats.hold_frames += frames;
                current = Some(img);
            }
            Segment::Transition { from, to, frames } => {
                let outgoing = match current.take() {
                    Some(img) if img.index == from => img,
                    _ => supplier.load(from)?,
                };
                let incoming = supplier.load(to)?;
                tracing::info!(from, to, frames, "transition");
                emitter.transition(compositor, &incoming, &outgoing, frames)?;
                stats.transition_frames += frames;
                current = Some(incoming);
            }
        }
    }

    let padding = plan.frame_budget - emitter.emitted();
    if padding > 0 {
        let last = match current.take() {
            Some(img) => img,
            None => supplier.load(plan.item_count - 1)?,
        };
        tracing::info!(image = last.index, frames = padding, "padding with final image");
        emitter.hold(compositor, &last, padding)?;
        stats.padded_frames = padding;
    }

    stats.frames_total = emitter.emitted();
    drop(emitter);
    sink.end()?;

    tracing::info!(
        frames = stats.frames_total,
        holds = stats.hold_frames,
        transitions = stats.transition_frames,
        padded = stats.padded_frames,
        "sequence rendered"
    );
    Ok(stats)
}
