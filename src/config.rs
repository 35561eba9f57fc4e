use std::path::{Path, PathBuf};

use crate::{
    encode::ffmpeg::{DEFAULT_CRF, EncodeConfig, default_mp4_config},
    foundation::{
        core::{Canvas, Fps, parse_clock_duration},
        error::{CrossreelError, CrossreelResult},
    },
};

/// Run configuration. Every field is optional in the JSON form and falls back to the default.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlideshowConfig {
    pub width: u32,
    pub height: u32,
    /// Cross-fade length in milliseconds.
    pub transition_ms: u64,
    pub fps: u32,
    /// Total video length as `mm:ss`.
    pub duration: String,
    pub inputs_dir: PathBuf,
    pub frames_dir: PathBuf,
    pub output: PathBuf,
    pub crf: u8,
    pub overwrite: bool,
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1088,
            transition_ms: 2000,
            fps: 30,
            duration: "0:20".to_string(),
            inputs_dir: PathBuf::from("./inputs"),
            frames_dir: PathBuf::from("./frames"),
            output: PathBuf::from("result.mp4"),
            crf: DEFAULT_CRF,
            overwrite: true,
        }
    }
}

impl SlideshowConfig {
    pub fn from_json_str(s: &str) -> CrossreelResult<Self> {
        serde_json::from_str(s).map_err(|e| CrossreelError::config(format!("config json: {e}")))
    }

    pub fn from_json_file(path: &Path) -> CrossreelResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            CrossreelError::config(format!("open config '{}': {e}", path.display()))
        })?;
        serde_json::from_str(&text)
            .map_err(|e| CrossreelError::config(format!("config '{}': {e}", path.display())))
    }

    pub fn canvas(&self) -> CrossreelResult<Canvas> {
        Canvas::new(self.width, self.height)
    }

    pub fn frame_rate(&self) -> CrossreelResult<Fps> {
        Fps::new(self.fps)
    }

    pub fn total_ms(&self) -> CrossreelResult<u64> {
        parse_clock_duration(&self.duration)
    }

    /// Checks everything that can be checked without looking at the inputs.
    pub fn validate(&self) -> CrossreelResult<()> {
        let fps = self.frame_rate()?;
        let total_ms = self.total_ms()?;
        if fps.frames_for_ms(total_ms)? == 0 {
            return Err(CrossreelError::config(format!(
                "duration '{}' at {} fps yields no frames",
                self.duration,
                fps.get()
            )));
        }
        self.encode_config()?.validate()
    }

    pub fn encode_config(&self) -> CrossreelResult<EncodeConfig> {
        let mut enc = default_mp4_config(
            &self.frames_dir,
            &self.output,
            self.canvas()?,
            self.frame_rate()?,
        );
        enc.crf = self.crf;
        enc.overwrite = self.overwrite;
        Ok(enc)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
