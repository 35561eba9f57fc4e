use crate::foundation::error::{CrossreelError, CrossreelResult};

/// 1-based frame number. Frame `n` is persisted as `{n}.png`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameNumber(pub u64);

impl FrameNumber {
    pub const FIRST: Self = Self(1);

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Whole frames per second. The encoder is configured with the same integer rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Fps(u32);

impl Fps {
    pub fn new(fps: u32) -> CrossreelResult<Self> {
        if fps == 0 {
            return Err(CrossreelError::config("fps must be > 0"));
        }
        Ok(Self(fps))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// `floor(ms * fps / 1000)`. Fails when `ms * fps` does not fit in a `u64`.
    pub fn frames_for_ms(self, ms: u64) -> CrossreelResult<u64> {
        ms.checked_mul(u64::from(self.0))
            .map(|scaled| scaled / 1000)
            .ok_or_else(|| {
                CrossreelError::config(format!(
                    "{ms} ms at {} fps overflows the frame count",
                    self.0
                ))
            })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> CrossreelResult<Self> {
        if width == 0 || height == 0 {
            return Err(CrossreelError::config(
                "canvas width/height must be non-zero",
            ));
        }
        Ok(Self { width, height })
    }

    pub fn byte_len(self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

impl std::fmt::Display for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Parse a `mm:ss` clock string into milliseconds.
///
/// Minutes may exceed 59 (`"90:00"` is an hour and a half); seconds may not.
pub fn parse_clock_duration(s: &str) -> CrossreelResult<u64> {
    let trimmed = s.trim();
    let (minutes, seconds) = trimmed.split_once(':').ok_or_else(|| {
        CrossreelError::config(format!("duration '{trimmed}' must be in mm:ss form"))
    })?;

    let parse = |part: &str, what: &str| -> CrossreelResult<u64> {
        let part = part.trim();
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CrossreelError::config(format!(
                "duration '{trimmed}' has a non-numeric {what} field"
            )));
        }
        part.parse::<u64>().map_err(|e| {
            CrossreelError::config(format!("duration '{trimmed}' {what} out of range: {e}"))
        })
    };

    let minutes = parse(minutes, "minutes")?;
    let seconds = parse(seconds, "seconds")?;
    if seconds >= 60 {
        return Err(CrossreelError::config(format!(
            "duration '{trimmed}' seconds must be < 60"
        )));
    }

    minutes
        .checked_mul(60)
        .and_then(|s| s.checked_add(seconds))
        .and_then(|s| s.checked_mul(1000))
        .ok_or_else(|| CrossreelError::config(format!("duration '{trimmed}' is too large")))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
