//! Linear opacity curve for cross-fade transitions.

/// `round(255 * progress)`, clamped to `[0, 255]`.
pub fn opacity_for_progress(progress: f64) -> u8 {
    if progress.is_nan() {
        return 0;
    }
    (progress * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Opacity of 1-based transition step `step` out of `steps`.
///
/// Computed as `round(255 * step / steps)` in integers (halves round up), so the final step is
/// exactly 255 regardless of `steps`.
pub fn opacity_at_step(step: u64, steps: u64) -> u8 {
    if steps == 0 {
        return 255;
    }
    let step = step.min(steps);
    ((510 * step + steps) / (2 * steps)) as u8
}

/// Iterator over the opacities of a transition with `steps` frames.
#[derive(Clone, Debug)]
pub struct OpacityRamp {
    next: u64,
    steps: u64,
}

impl OpacityRamp {
    pub fn new(steps: u64) -> Self {
        Self { next: 1, steps }
    }
}

impl Iterator for OpacityRamp {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.next > self.steps {
            return None;
        }
        let out = opacity_at_step(self.next, self.steps);
        self.next += 1;
        Some(out)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.steps + 1).saturating_sub(self.next) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for OpacityRamp {}

#[cfg(test)]
#[path = "../tests/unit/opacity.rs"]
mod tests;
