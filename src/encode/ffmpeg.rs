use std::{
    io::Read,
    path::{Path, PathBuf},
    process::{Command, Stdio},
    thread::JoinHandle,
};

use crate::{
    encode::sink::FRAME_PATTERN,
    foundation::{
        core::{Canvas, Fps},
        error::{CrossreelError, CrossreelResult},
    },
};

/// Constant-quality H.264 encode of a directory of `{n}.png` frames.
#[derive(Clone, Debug)]
pub struct EncodeConfig {
    pub width: u32,
    pub height: u32,
    pub fps: Fps,
    pub frames_dir: PathBuf,
    pub out_path: PathBuf,
    /// x264 constant rate factor, 0..=51.
    pub crf: u8,
    pub overwrite: bool,
    /// Encoder executable; `ffmpeg` resolved through `PATH` by default.
    pub program: PathBuf,
}

pub const DEFAULT_CRF: u8 = 10;

impl EncodeConfig {
    pub fn validate(&self) -> CrossreelResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CrossreelError::config(
                "encode width/height must be non-zero",
            ));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            // 4:2:0 chroma subsampling needs even dimensions.
            return Err(CrossreelError::config(
                "encode width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        if self.crf > 51 {
            return Err(CrossreelError::config("encode crf must be within 0..=51"));
        }
        Ok(())
    }
}

pub fn default_mp4_config(
    frames_dir: impl Into<PathBuf>,
    out_path: impl Into<PathBuf>,
    canvas: Canvas,
    fps: Fps,
) -> EncodeConfig {
    EncodeConfig {
        width: canvas.width,
        height: canvas.height,
        fps,
        frames_dir: frames_dir.into(),
        out_path: out_path.into(),
        crf: DEFAULT_CRF,
        overwrite: true,
        program: PathBuf::from("ffmpeg"),
    }
}

pub fn is_ffmpeg_on_path() -> bool {
    is_program_available(Path::new("ffmpeg"))
}

fn is_program_available(program: &Path) -> bool {
    Command::new(program)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

pub fn ensure_parent_dir(path: &Path) -> CrossreelResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// The encoder command line, without stdio wiring.
pub fn encoder_command(cfg: &EncodeConfig) -> Command {
    let mut cmd = Command::new(&cfg.program);
    cmd.arg(if cfg.overwrite { "-y" } else { "-n" });
    cmd.args([
        "-r",
        &cfg.fps.get().to_string(),
        "-f",
        "image2",
        "-s",
        &format!("{}x{}", cfg.width, cfg.height),
        "-i",
    ])
    .arg(cfg.frames_dir.join(FRAME_PATTERN))
    .args([
        "-vcodec",
        "libx264",
        "-crf",
        &cfg.crf.to_string(),
        "-pix_fmt",
        "yuv420p",
    ])
    .arg(&cfg.out_path);
    cmd
}

fn forward_to_stdout<R: Read + Send + 'static>(mut reader: R) -> JoinHandle<std::io::Result<u64>> {
    std::thread::spawn(move || std::io::copy(&mut reader, &mut std::io::stdout()))
}

/// Run the encoder once over the frames directory and block until it exits.
///
/// The encoder's stdout and stderr are both streamed to this process's stdout. Frames are left
/// on disk whether or not the encode succeeds.
#[tracing::instrument(skip(cfg), fields(out = %cfg.out_path.display()))]
pub fn run_encoder(cfg: &EncodeConfig) -> CrossreelResult<()> {
    cfg.validate()?;
    ensure_parent_dir(&cfg.out_path)?;

    if !cfg.overwrite && cfg.out_path.exists() {
        return Err(CrossreelError::config(format!(
            "output file '{}' already exists",
            cfg.out_path.display()
        )));
    }

    if !is_program_available(&cfg.program) {
        return Err(CrossreelError::encode(format!(
            "'{}' is required for MP4 encoding, but could not be run",
            cfg.program.display()
        )));
    }

    let mut cmd = encoder_command(cfg);
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    tracing::info!(command = ?cmd, "starting encoder");

    let mut child = cmd.spawn().map_err(|e| {
        CrossreelError::encode(format!(
            "failed to spawn '{}': {e}",
            cfg.program.display()
        ))
    })?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| CrossreelError::encode("failed to open encoder stdout (unexpected)"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| CrossreelError::encode("failed to open encoder stderr (unexpected)"))?;
    let drains = [forward_to_stdout(stdout), forward_to_stdout(stderr)];

    let status = child
        .wait()
        .map_err(|e| CrossreelError::encode(format!("failed to wait for encoder: {e}")))?;

    for drain in drains {
        match drain.join() {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => {
                return Err(CrossreelError::encode(format!(
                    "failed to forward encoder output: {e}"
                )));
            }
            Err(_) => return Err(CrossreelError::encode("encoder output thread panicked")),
        }
    }

    if !status.success() {
        return Err(CrossreelError::encode(format!(
            "encoder exited with {status}; frames were left in '{}'",
            cfg.frames_dir.display()
        )));
    }

    tracing::info!("encoder finished");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
