//! Playback length of MP3 files, read from frame headers without decoding.
//!
//! ```no_run
//! let duration = mp3dur::calculate_duration("episode-42.mp3")?;
//! println!("{}", duration); // 00:52:17
//! # Ok::<(), mp3dur::Mp3DurationError>(())
//! ```

pub mod analyzer;
pub mod calculator;
pub mod config;
pub mod duration;
pub mod error;
pub mod logging;
pub mod mp3;
pub mod report;

pub use analyzer::{Analyzer, DurationEntry};
pub use calculator::{
    calculate_duration, DurationSource, Mp3DurationCalculator, ScanOptions, ScanSummary,
};
pub use config::Config;
pub use duration::Duration;
pub use error::{Mp3DurationError, Result};
