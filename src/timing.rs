use crate::foundation::{
    core::Fps,
    error::{CrossreelError, CrossreelResult},
};

/// Frame counts derived from the configured durations.
///
/// Every count is `floor(duration_ms * fps / 1000)`, so per-segment truncation can leave the
/// summed segments a few frames short of `frame_budget`. The driver pads that shortfall.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimingPlan {
    pub fps: Fps,
    pub item_count: usize,
    pub hold_ms: u64,
    pub transition_ms: u64,
    pub frame_budget: u64,
    pub first_hold_frames: u64,
    pub hold_frames: u64,
    pub transition_frames: u64,
}

/// One span of the output sequence. Image indices refer to the supplier's order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment {
    Hold { image: usize, frames: u64 },
    Transition { from: usize, to: usize, frames: u64 },
}

impl Segment {
    pub fn frames(self) -> u64 {
        match self {
            Self::Hold { frames, .. } | Self::Transition { frames, .. } => frames,
        }
    }
}

impl TimingPlan {
    /// Each item gets `floor(total_ms / item_count)`, minus the transition that leads into the
    /// next item. The last item pays for a transition it never has.
    pub fn new(
        total_ms: u64,
        item_count: usize,
        transition_ms: u64,
        fps: Fps,
    ) -> CrossreelResult<Self> {
        if item_count == 0 {
            return Err(CrossreelError::config("at least one input image is required"));
        }

        let slot_ms = total_ms / item_count as u64;
        let hold_ms = slot_ms.checked_sub(transition_ms).ok_or_else(|| {
            CrossreelError::config(format!(
                "hold duration is negative: {item_count} images over {total_ms} ms leaves \
                 {slot_ms} ms per image, less than the {transition_ms} ms transition"
            ))
        })?;

        Ok(Self {
            fps,
            item_count,
            hold_ms,
            transition_ms,
            frame_budget: fps.frames_for_ms(total_ms)?,
            first_hold_frames: fps.frames_for_ms(hold_ms + transition_ms)?,
            hold_frames: fps.frames_for_ms(hold_ms)?,
            transition_frames: fps.frames_for_ms(transition_ms)?,
        })
    }

    /// `Hold(0), Transition(0 -> 1), Hold(1), ..., Hold(n - 1)`.
    pub fn segments(&self) -> Vec<Segment> {
        let mut out = Vec::with_capacity(self.item_count * 2 - 1);
        out.push(Segment::Hold {
            image: 0,
            frames: self.first_hold_frames,
        });
        for image in 1..self.item_count {
            out.push(Segment::Transition {
                from: image - 1,
                to: image,
                frames: self.transition_frames,
            });
            out.push(Segment::Hold {
                image,
                frames: self.hold_frames,
            });
        }
        out
    }

    /// Sum of all segment frame counts, before tail padding.
    pub fn planned_frames(&self) -> u64 {
        let rest = self.item_count as u64 - 1;
        self.first_hold_frames + rest * (self.transition_frames + self.hold_frames)
    }

    pub fn padding_frames(&self) -> u64 {
        self.frame_budget.saturating_sub(self.planned_frames())
    }
}

#[cfg(test)]
#[path = "../tests/unit/timing.rs"]
mod tests;
