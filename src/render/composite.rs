use std::sync::Arc;

use crate::{
    assets::source::SourceImage,
    foundation::{
        core::Canvas,
        error::{CrossreelError, CrossreelResult},
    },
    render::FrameRGBA,
};

pub type StraightRgba8 = [u8; 4];

/// Source-over of `src` onto `dst` with `src`'s alpha replaced by `alpha`.
///
/// Both pixels are straight (non-premultiplied). The colour channels of `src` are used as-is.
pub fn over_with_alpha(dst: StraightRgba8, src: StraightRgba8, alpha: u8) -> StraightRgba8 {
    let sa = u32::from(alpha);
    if sa == 255 {
        return [src[0], src[1], src[2], 255];
    }

    // Weights scaled by 255: the source contributes sa * 255, the destination da * (255 - sa).
    let src_w = sa * 255;
    let dst_w = u32::from(dst[3]) * (255 - sa);
    let total = src_w + dst_w;
    if total == 0 {
        return [0, 0, 0, 0];
    }

    let mut out = [0u8; 4];
    for i in 0..3 {
        let num = u32::from(src[i]) * src_w + u32::from(dst[i]) * dst_w;
        out[i] = ((num + total / 2) / total) as u8;
    }
    out[3] = ((total + 127) / 255) as u8;
    out
}

/// Owns the canvas buffers frames are composited into.
///
/// Results are lent out as `&FrameRGBA`; the borrow has to end before the next composite call,
/// which keeps composition strictly sequential.
#[derive(Debug)]
pub struct Compositor {
    canvas: Canvas,
    scratch: FrameRGBA,
    hold: FrameRGBA,
    /// Index and pixel buffer of the image `hold` was drawn from.
    hold_image: Option<(usize, Arc<Vec<u8>>)>,
}

impl Compositor {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            scratch: FrameRGBA::transparent(canvas),
            hold: FrameRGBA::transparent(canvas),
            hold_image: None,
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Draw `outgoing` as-is, then `incoming` on top with its alpha forced to `opacity`.
    pub fn composite_transition_frame(
        &mut self,
        incoming: &SourceImage,
        outgoing: &SourceImage,
        opacity: u8,
    ) -> CrossreelResult<&FrameRGBA> {
        incoming.ensure_matches(self.canvas)?;
        outgoing.ensure_matches(self.canvas)?;

        // Drawing onto a cleared canvas reproduces `outgoing` exactly.
        self.scratch.data.copy_from_slice(&outgoing.rgba8);
        for (d, s) in self
            .scratch
            .data
            .chunks_exact_mut(4)
            .zip(incoming.rgba8.chunks_exact(4))
        {
            let out =
                over_with_alpha([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
            d.copy_from_slice(&out);
        }
        Ok(&self.scratch)
    }

    /// `image` drawn on a cleared canvas.
    ///
    /// Cached until an image with a different index or pixel buffer is requested.
    pub fn composite_hold_frame(&mut self, image: &SourceImage) -> CrossreelResult<&FrameRGBA> {
        if let Some((index, pixels)) = &self.hold_image
            && *index == image.index
            && Arc::ptr_eq(pixels, &image.rgba8)
        {
            return Ok(&self.hold);
        }
        image.ensure_matches(self.canvas)?;

        self.hold.data.copy_from_slice(&image.rgba8);
        self.hold_image = Some((image.index, Arc::clone(&image.rgba8)));
        Ok(&self.hold)
    }

    /// Forget the cached hold frame.
    pub fn reset(&mut self) {
        self.hold_image = None;
    }

    /// The cached hold frame, if any.
    pub fn last_hold_frame(&self) -> Option<&FrameRGBA> {
        self.hold_image.as_ref().map(|_| &self.hold)
    }
}

/// Check that `frame` covers exactly `canvas`.
pub fn ensure_canvas_sized(frame: &FrameRGBA, canvas: Canvas) -> CrossreelResult<()> {
    if frame.width != canvas.width
        || frame.height != canvas.height
        || frame.data.len() != canvas.byte_len()
    {
        return Err(CrossreelError::config(format!(
            "frame is {}x{} ({} bytes), expected {canvas}",
            frame.width,
            frame.height,
            frame.data.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
