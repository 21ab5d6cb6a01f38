//! MPEG audio constant tables
//!
//! Every quantity the scanner needs is a table lookup keyed by the decoded
//! version, layer or channel mode. The enums below carry the raw bit
//! patterns out of the header; `index()` turns them into row numbers.
//!
//! Row layout (all tables): 0 = MPEG-1, 1 = MPEG-2, 2 = MPEG-2.5.

use crate::error::{Mp3DurationError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MpegVersion {
    Mpeg1,
    Mpeg2,
    Mpeg25,
}

impl MpegVersion {
    /// Decode bits 19-20 of the header word: 00=2.5, 01=reserved, 10=2, 11=1
    pub fn from_header(word: u32) -> Result<Self> {
        match (word >> 19) & 0b11 {
            0 => Ok(MpegVersion::Mpeg25),
            2 => Ok(MpegVersion::Mpeg2),
            3 => Ok(MpegVersion::Mpeg1),
            bits => Err(Mp3DurationError::ForbiddenVersion(bits)),
        }
    }

    fn index(self) -> usize {
        match self {
            MpegVersion::Mpeg1 => 0,
            MpegVersion::Mpeg2 => 1,
            MpegVersion::Mpeg25 => 2,
        }
    }
}

/// Layer as encoded in bits 17-18.
///
/// The bit pattern runs backwards relative to the layer number:
/// 01 is Layer III and 11 is Layer I. 00 is not defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    NotDefined,
    Layer1,
    Layer2,
    Layer3,
}

impl Layer {
    pub fn from_header(word: u32) -> Self {
        match (word >> 17) & 0b11 {
            1 => Layer::Layer3,
            2 => Layer::Layer2,
            3 => Layer::Layer1,
            _ => Layer::NotDefined,
        }
    }

    fn index(self) -> usize {
        match self {
            Layer::NotDefined => 0,
            Layer::Layer1 => 1,
            Layer::Layer2 => 2,
            Layer::Layer3 => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelMode {
    Stereo,
    JointStereo,
    DualChannel,
    Mono,
}

impl ChannelMode {
    /// Decode bits 6-7 of the header word.
    pub fn from_header(word: u32) -> Result<Self> {
        match (word >> 6) & 0b11 {
            0 => Ok(ChannelMode::Stereo),
            1 => Ok(ChannelMode::JointStereo),
            2 => Ok(ChannelMode::DualChannel),
            3 => Ok(ChannelMode::Mono),
            // Two bits cannot hold anything else
            _ => Err(Mp3DurationError::ForbiddenMode),
        }
    }

    fn index(self) -> usize {
        match self {
            ChannelMode::Stereo => 0,
            ChannelMode::JointStereo => 1,
            ChannelMode::DualChannel => 2,
            ChannelMode::Mono => 3,
        }
    }
}

// Bitrate lookup tables (kbps), [version][layer][index]
// Index 0 = free format, 15 = bad. The NotDefined row is all zeros.
const BITRATES: [[[u32; 16]; 4]; 3] = [
    [
        [0; 16],
        [0, 32, 64, 96, 128, 160, 192, 224, 256, 288, 320, 352, 384, 416, 448, 0],
        [0, 32, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 384, 0],
        [0, 32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 0],
    ],
    [
        [0; 16],
        [0, 32, 48, 56, 64, 80, 96, 112, 128, 144, 160, 176, 192, 224, 256, 0],
        [0, 8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160, 0],
        [0, 8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160, 0],
    ],
    [
        [0; 16],
        [0, 32, 48, 56, 64, 80, 96, 112, 128, 144, 160, 176, 192, 224, 256, 0],
        [0, 8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160, 0],
        [0, 8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160, 0],
    ],
];

// Sample rate lookup table (Hz), [version][index]
const SAMPLING_RATES: [[u32; 4]; 3] = [
    [44100, 48000, 32000, 0],
    [22050, 24000, 16000, 0],
    [11025, 12000, 8000, 0],
];

// [version][layer]
const SAMPLES_PER_FRAME: [[u32; 4]; 3] = [
    [0, 384, 1152, 1152],
    [0, 384, 1152, 576],
    [0, 384, 1152, 576],
];

// Bytes between the 4-byte header and the frame payload, [version][mode]
const SIDE_INFORMATION_SIZES: [[u32; 4]; 3] = [
    [32, 32, 32, 17],
    [17, 17, 17, 9],
    [17, 17, 17, 9],
];

/// Bitrate in bit/s for a raw 4-bit index.
pub fn bitrate(version: MpegVersion, layer: Layer, index: u32) -> Result<u32> {
    if index >= 15 || layer == Layer::NotDefined {
        return Err(Mp3DurationError::InvalidBitrate(index));
    }
    match BITRATES[version.index()][layer.index()][index as usize] {
        0 => Err(Mp3DurationError::InvalidBitrate(index)),
        kbps => Ok(kbps * 1000),
    }
}

/// Sampling rate in Hz for a raw 2-bit index.
pub fn sampling_rate(version: MpegVersion, index: u32) -> Result<u32> {
    if index >= 3 {
        return Err(Mp3DurationError::InvalidSamplingRate(index));
    }
    Ok(SAMPLING_RATES[version.index()][index as usize])
}

pub fn samples_per_frame(version: MpegVersion, layer: Layer) -> Result<u32> {
    match layer {
        Layer::NotDefined => Err(Mp3DurationError::ForbiddenLayer),
        _ => Ok(SAMPLES_PER_FRAME[version.index()][layer.index()]),
    }
}

pub fn side_information_size(version: MpegVersion, mode: ChannelMode) -> u32 {
    SIDE_INFORMATION_SIZES[version.index()][mode.index()]
}
