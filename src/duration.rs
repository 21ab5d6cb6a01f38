//! Playback duration
//!
//! Time is kept as whole nanoseconds so that summing tens of thousands of
//! frame durations does not drift. Seconds and minutes are derived views.

use std::fmt;

const NANOS_PER_SEC: u64 = 1_000_000_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration {
    nanos: u64,
}

impl Duration {
    pub const ZERO: Duration = Duration { nanos: 0 };

    pub fn from_parts(seconds: u64, nanoseconds: u64) -> Self {
        Duration {
            nanos: seconds
                .saturating_mul(NANOS_PER_SEC)
                .saturating_add(nanoseconds),
        }
    }

    /// Length of `samples` samples played at `sampling_rate` Hz.
    pub fn from_samples(samples: u64, sampling_rate: u32) -> Self {
        let rate = u64::from(sampling_rate.max(1));
        let seconds = samples / rate;
        let remainder = samples % rate;
        Duration::from_parts(seconds, remainder * NANOS_PER_SEC / rate)
    }

    /// Only ever grows.
    pub fn add_nanos(&mut self, nanoseconds: u64) {
        self.nanos = self.nanos.saturating_add(nanoseconds);
    }

    pub fn as_nanos(&self) -> u64 {
        self.nanos
    }

    pub fn seconds(&self) -> f64 {
        self.nanos as f64 / NANOS_PER_SEC as f64
    }

    pub fn minutes(&self) -> f64 {
        self.seconds() / 60.0
    }
}

impl From<Duration> for std::time::Duration {
    fn from(d: Duration) -> Self {
        std::time::Duration::from_nanos(d.nanos)
    }
}

impl std::ops::Add for Duration {
    type Output = Duration;

    fn add(mut self, rhs: Duration) -> Duration {
        self.add_nanos(rhs.nanos);
        self
    }
}

impl std::iter::Sum for Duration {
    fn sum<I: Iterator<Item = Duration>>(iter: I) -> Self {
        iter.fold(Duration::ZERO, |acc, d| acc + d)
    }
}

/// `HH:MM:SS`, zero padded. Hours do not roll over into days.
impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.nanos / NANOS_PER_SEC;
        let hours = total / 3600;
        let minutes = (total / 60) % 60;
        let seconds = total % 60;
        write!(f, "{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}
