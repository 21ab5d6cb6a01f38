//! ID3 tag skipping
//!
//! Tags are never parsed, only measured so the scanner can step over them.
//!
//! ID3v2 header (10 bytes):
//! - "ID3" (3) + major version (1) + revision (1) + flags (1) + size (4)
//! - size is a synchsafe integer: 7 bits per byte, 28 bits total, and
//!   excludes the header itself and the optional 10-byte footer (flag bit 4)
//!
//! ID3v1 is a fixed 128-byte block starting with "TAG".

pub const ID3V2_MAGIC: &[u8; 3] = b"ID3";
pub const ID3V1_MAGIC: &[u8; 3] = b"TAG";

/// Header bytes still unread once the 4-byte window has been classified.
pub const ID3V2_HEADER_REST: usize = 6;

pub const ID3V2_FOOTER_LEN: u32 = 10;
pub const ID3V1_TAG_LEN: u32 = 128;

const FOOTER_FLAG: u8 = 0b0001_0000;

/// Decode a 28-bit synchsafe integer.
pub fn synchsafe(bytes: [u8; 4]) -> u32 {
    ((bytes[0] as u32 & 0x7F) << 21)
        | ((bytes[1] as u32 & 0x7F) << 14)
        | ((bytes[2] as u32 & 0x7F) << 7)
        | (bytes[3] as u32 & 0x7F)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Id3v2Header {
    pub major_version: u8,
    pub revision: u8,
    pub flags: u8,
    pub tag_size: u32,
}

impl Id3v2Header {
    /// Build from the classification window (`"ID3"` + major version) and the
    /// six header bytes that follow it.
    pub fn parse(window: [u8; 4], rest: [u8; ID3V2_HEADER_REST]) -> Self {
        Id3v2Header {
            major_version: window[3],
            revision: rest[0],
            flags: rest[1],
            tag_size: synchsafe([rest[2], rest[3], rest[4], rest[5]]),
        }
    }

    pub fn has_footer(&self) -> bool {
        self.flags & FOOTER_FLAG != 0
    }

    /// Bytes to skip after the 10-byte header.
    pub fn skip_length(&self) -> u32 {
        let footer = if self.has_footer() { ID3V2_FOOTER_LEN } else { 0 };
        self.tag_size + footer
    }
}

/// Bytes to skip after an ID3v1 window; the window itself is already consumed.
pub fn id3v1_skip_length(window_len: usize) -> u32 {
    ID3V1_TAG_LEN - window_len as u32
}
