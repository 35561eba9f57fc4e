use std::path::{Path, PathBuf};

use crate::{
    assets::{decode::decode_image, source::SourceImage},
    foundation::{
        core::Canvas,
        error::{CrossreelError, CrossreelResult},
    },
};

/// Ordered source of input images.
///
/// Images are requested by position, in ascending order. The driver keeps no more than two
/// decoded at a time.
pub trait ImageSupplier {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decode image `index`. Implementations must return canvas-sized images.
    fn load(&mut self, index: usize) -> CrossreelResult<SourceImage>;
}

/// Leading decimal digits of a file name, e.g. `"12.png"` -> `12`, `"3-beach.jpg"` -> `3`.
pub fn numeric_file_key(name: &str) -> Option<u64> {
    let digits_end = name
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(name.len(), |(i, _)| i);
    name[..digits_end].parse().ok()
}

/// Supplies the files of one directory, ordered by the number their names start with.
///
/// Hidden files (leading `.`) and subdirectories are ignored. Any other file whose name does not
/// start with a number fails [`DirImageSupplier::open`].
#[derive(Debug)]
pub struct DirImageSupplier {
    canvas: Canvas,
    entries: Vec<(u64, PathBuf)>,
}

impl DirImageSupplier {
    pub fn open(dir: impl Into<PathBuf>, canvas: Canvas) -> CrossreelResult<Self> {
        let dir = dir.into();
        let read_dir = std::fs::read_dir(&dir).map_err(|e| CrossreelError::read(&dir, e))?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| CrossreelError::read(&dir, e))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with('.') {
                continue;
            }
            let key = numeric_file_key(&name).ok_or_else(|| {
                CrossreelError::config(format!(
                    "input file '{}' does not have a numeric name",
                    path.display()
                ))
            })?;
            entries.push((key, path));
        }

        entries.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
        if let Some(w) = entries.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(CrossreelError::config(format!(
                "input files '{}' and '{}' share the sequence number {}",
                w[0].1.display(),
                w[1].1.display(),
                w[0].0
            )));
        }

        tracing::info!(dir = %dir.display(), images = entries.len(), "listed input images");
        Ok(Self {
            canvas,
            entries,
        })
    }

    /// Input paths in supply order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(|(_, p)| p.as_path())
    }
}

impl ImageSupplier for DirImageSupplier {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn load(&mut self, index: usize) -> CrossreelResult<SourceImage> {
        let (_, path) = self.entries.get(index).ok_or_else(|| {
            CrossreelError::config(format!(
                "image index {index} out of range ({} inputs)",
                self.entries.len()
            ))
        })?;

        let bytes = std::fs::read(path).map_err(|e| CrossreelError::decode(path, e))?;
        let image = decode_image(index, &bytes).map_err(|e| CrossreelError::decode(path, e))?;
        image.ensure_matches(self.canvas)?;

        tracing::debug!(index, path = %path.display(), "decoded input image");
        Ok(image)
    }
}

/// Supplier over already decoded images.
#[derive(Clone, Debug, Default)]
pub struct InMemorySupplier {
    images: Vec<SourceImage>,
}

impl InMemorySupplier {
    pub fn new(images: Vec<SourceImage>) -> Self {
        Self { images }
    }
}

impl ImageSupplier for InMemorySupplier {
    fn len(&self) -> usize {
        self.images.len()
    }

    fn load(&mut self, index: usize) -> CrossreelResult<SourceImage> {
        let mut image = self
            .images
            .get(index)
            .cloned()
            .ok_or_else(|| CrossreelError::config(format!("image index {index} out of range")))?;
        image.index = index;
        Ok(image)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/supplier.rs"]
mod tests;
