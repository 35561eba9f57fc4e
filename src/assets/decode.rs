use std::sync::Arc;

use anyhow::Context as _;

use crate::assets::source::SourceImage;

/// Decode encoded image bytes (any format the `image` crate was built with) into RGBA8.
pub fn decode_image(index: usize, bytes: &[u8]) -> anyhow::Result<SourceImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(SourceImage {
        index,
        width,
        height,
        rgba8: Arc::new(rgba.into_raw()),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
