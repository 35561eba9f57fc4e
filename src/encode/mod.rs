//! Frame persistence and the external video encoder.

/// `ffmpeg` invocation over a directory of numbered frames.
pub mod ffmpeg;
/// Frame sink trait and built-in sinks.
pub mod sink;
