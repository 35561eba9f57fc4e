use std::sync::Arc;

use crate::foundation::{
    core::Canvas,
    error::{CrossreelError, CrossreelResult},
};

/// A decoded input image: straight-alpha RGBA8, never mutated after decode.
#[derive(Clone, Debug)]
pub struct SourceImage {
    /// Position in the supplier's ordering.
    pub index: usize,
    pub width: u32,
    pub height: u32,
    pub rgba8: Arc<Vec<u8>>,
}

impl SourceImage {
    pub fn from_rgba8(
        index: usize,
        width: u32,
        height: u32,
        rgba8: Vec<u8>,
    ) -> CrossreelResult<Self> {
        let expected = width as usize * height as usize * 4;
        if rgba8.len() != expected {
            return Err(CrossreelError::config(format!(
                "image {index}: rgba8 buffer is {} bytes, expected {expected} for {width}x{height}",
                rgba8.len()
            )));
        }
        Ok(Self {
            index,
            width,
            height,
            rgba8: Arc::new(rgba8),
        })
    }

    /// A `width x height` image filled with one straight-alpha colour.
    pub fn solid(index: usize, width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self {
            index,
            width,
            height,
            rgba8: Arc::new(rgba.repeat(width as usize * height as usize)),
        }
    }

    pub fn ensure_matches(&self, canvas: Canvas) -> CrossreelResult<()> {
        if self.width != canvas.width || self.height != canvas.height {
            return Err(CrossreelError::config(format!(
                "image {} is {}x{}, but the canvas is {canvas}; inputs are not resized",
                self.index, self.width, self.height
            )));
        }
        if self.rgba8.len() != canvas.byte_len() {
            return Err(CrossreelError::config(format!(
                "image {}: rgba8 buffer is {} bytes, expected {} for {canvas}",
                self.index,
                self.rgba8.len(),
                canvas.byte_len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
