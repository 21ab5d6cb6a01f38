use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Mp3DurationError>;

/// Everything that can stop a duration calculation.
///
/// Any of these aborts the whole scan; no partial duration is returned.
#[derive(Debug, Error)]
pub enum Mp3DurationError {
    #[error("byte source is not open")]
    StreamNotOpen,
    #[error("cannot open {}: {source}", path.display())]
    InvalidFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("forbidden MPEG version bits {0:#04b}")]
    ForbiddenVersion(u32),
    #[error("forbidden layer")]
    ForbiddenLayer,
    #[error("forbidden channel mode")]
    ForbiddenMode,
    #[error("invalid bitrate index {0}")]
    InvalidBitrate(u32),
    #[error("invalid sampling rate index {0}")]
    InvalidSamplingRate(u32),
    #[error("unexpected frame {0:#010x}")]
    UnexpectedFrame(u32),
    #[error("read error: {0}")]
    ReadError(#[source] io::Error),
}
