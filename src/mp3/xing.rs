//! Xing/Info header detection
//!
//! VBR encoders write a summary block into the payload of the first frame,
//! right after the side information. Layout of the part we read:
//!
//! ```text
//! offset 0..4   "Xing" (VBR) or "Info" (CBR written by LAME)
//! offset 4..8   flags, big-endian; bit 0 = frame count present
//! offset 8..12  frame count, big-endian (only meaningful when bit 0 is set)
//! ```

use crate::duration::Duration;

/// Bytes read after the side information to look for the tag.
pub const PROBE_LEN: usize = 12;

const FRAMES_FLAG: u8 = 0x01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XingTag {
    /// `Xing` rather than `Info`
    pub is_vbr_header: bool,
    /// Total frames reported by the tag
    pub frame_count: Option<u32>,
}

impl XingTag {
    /// Look for a Xing/Info tag at the start of the probe window.
    pub fn probe(window: &[u8; PROBE_LEN]) -> Option<Self> {
        let is_vbr_header = match &window[..4] {
            b"Xing" => true,
            b"Info" => false,
            _ => return None,
        };

        let frame_count = if window[7] & FRAMES_FLAG != 0 {
            Some(u32::from_be_bytes([window[8], window[9], window[10], window[11]]))
        } else {
            None
        };

        Some(XingTag {
            is_vbr_header,
            frame_count,
        })
    }

    /// Closed-form stream duration from the frame count, if the tag has one.
    pub fn duration(&self, samples_per_frame: u32, sampling_rate: u32) -> Option<Duration> {
        let frames = self.frame_count?;
        let samples = u64::from(frames) * u64::from(samples_per_frame);
        Some(Duration::from_samples(samples, sampling_rate))
    }
}
