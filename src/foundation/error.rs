use std::path::PathBuf;

use crate::foundation::core::FrameNumber;

/// Convenience alias used across the crate.
pub type CrossreelResult<T> = Result<T, CrossreelError>;

/// Pipeline stage a [`CrossreelError`] originated from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Configuration and timing plan validation.
    Plan,
    /// Listing the input directory.
    Read,
    /// Decoding a source image.
    Decode,
    /// Persisting a frame.
    Write,
    /// Running the external encoder.
    Encode,
    /// Anything not attributed to a specific stage.
    Other,
}

impl Stage {
    /// Short lowercase stage name for user-facing messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plan => "plan",
            Self::Read => "read",
            Self::Decode => "decode",
            Self::Write => "write",
            Self::Encode => "encode",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every failure aborts the run; there is no retry path.
#[derive(thiserror::Error, Debug)]
pub enum CrossreelError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to read input directory '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image '{}': {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to write frame {} to '{}': {source}", .frame.0, .path.display())]
    Write {
        frame: FrameNumber,
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to prepare frame directory '{}': {source}", .path.display())]
    FrameDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("encoder error: {0}")]
    Encode(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CrossreelError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    pub fn decode(path: impl Into<PathBuf>, source: impl Into<anyhow::Error>) -> Self {
        Self::Decode {
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn write(
        frame: FrameNumber,
        path: impl Into<PathBuf>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Self::Write {
            frame,
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn frame_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FrameDir {
            path: path.into(),
            source,
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            Self::Config(_) => Stage::Plan,
            Self::Read { .. } => Stage::Read,
            Self::Decode { .. } => Stage::Decode,
            Self::Write { .. } | Self::FrameDir { .. } => Stage::Write,
            Self::Encode(_) => Stage::Encode,
            Self::Other(_) => Stage::Other,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
