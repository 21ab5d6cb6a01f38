//! MP3 frame header decoding
//!
//! MP3 frames start with a sync word (11 bits of 1s) followed by header info.
//! Frame header structure (4 bytes, read as one big-endian word):
//! AAAAAAAA AAABBCCD EEEEFFGH IIJJKLMM
//!
//! A = sync (11 bits)
//! B = MPEG version (2 bits): 00=2.5, 01=reserved, 10=2, 11=1
//! C = Layer (2 bits): 00=not defined, 01=III, 10=II, 11=I
//! D = Protection bit (CRC)
//! E = Bitrate index (4 bits)
//! F = Sample rate index (2 bits)
//! G = Padding bit
//! H = Private bit
//! I = Channel mode (2 bits)
//! J = Mode extension (2 bits)
//! K = Copyright
//! L = Original
//! M = Emphasis (2 bits)
//!
//! Only the fields needed for timing are kept.

use super::tables::{self, ChannelMode, Layer, MpegVersion};
use crate::error::{Mp3DurationError, Result};

pub const HEADER_LEN: usize = 4;

const NANOS_PER_SEC: u64 = 1_000_000_000;

/// True when the top 11 bits of the word are all set.
pub fn is_frame_sync(word: u32) -> bool {
    (word >> 21) == 0x7FF
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub version: MpegVersion,
    pub layer: Layer,
    pub mode: ChannelMode,
    pub bitrate_index: u32,
    pub sampling_rate_index: u32,
    pub padding: bool,
}

impl FrameHeader {
    /// Decode and validate a header word that already passed `is_frame_sync`.
    pub fn decode(word: u32) -> Result<Self> {
        let version = MpegVersion::from_header(word)?;
        let layer = Layer::from_header(word);
        let mode = ChannelMode::from_header(word)?;

        let bitrate_index = (word >> 12) & 0b1111;
        if bitrate_index == 15 {
            return Err(Mp3DurationError::InvalidBitrate(bitrate_index));
        }

        let sampling_rate_index = (word >> 10) & 0b11;
        if sampling_rate_index == 3 {
            return Err(Mp3DurationError::InvalidSamplingRate(sampling_rate_index));
        }

        let padding = (word >> 9) & 1 != 0;

        Ok(FrameHeader {
            version,
            layer,
            mode,
            bitrate_index,
            sampling_rate_index,
            padding,
        })
    }

    /// Bitrate in bit/s.
    pub fn bitrate(&self) -> Result<u32> {
        tables::bitrate(self.version, self.layer, self.bitrate_index)
    }

    /// Sampling rate in Hz.
    pub fn sampling_rate(&self) -> Result<u32> {
        tables::sampling_rate(self.version, self.sampling_rate_index)
    }

    pub fn samples_per_frame(&self) -> Result<u32> {
        tables::samples_per_frame(self.version, self.layer)
    }

    pub fn side_information_size(&self) -> u32 {
        tables::side_information_size(self.version, self.mode)
    }

    /// Whole frame length in bytes, header included:
    /// `samples / 8 * bitrate / sampling_rate + padding`
    pub fn frame_length(&self) -> Result<u32> {
        let samples = u64::from(self.samples_per_frame()?);
        let bitrate = u64::from(self.bitrate()?);
        let rate = u64::from(self.sampling_rate()?);
        let length = samples / 8 * bitrate / rate + u64::from(self.padding);
        // At most 144 * 160000 / 8000 + 1 (MPEG-2.5 Layer II)
        Ok(length as u32)
    }

    /// Playback time of one frame, truncated to whole nanoseconds.
    pub fn duration_nanos(&self) -> Result<u64> {
        let samples = u64::from(self.samples_per_frame()?);
        let rate = u64::from(self.sampling_rate()?);
        Ok(samples * NANOS_PER_SEC / rate)
    }
}
