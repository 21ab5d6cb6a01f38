//! Byte-exact MP3 fixtures built in code.
//!
//! Frame lengths here are computed from the MPEG formulas directly, not
//! through the crate, so the tests compare against an independent reference.

#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};

/// MPEG-1 Layer III bitrates (kbps) by index
const MPEG1_L3_KBPS: [u32; 16] = [
    0, 32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 0,
];

pub const SAMPLES_MPEG1_L3: u64 = 1152;
pub const RATE_44K: u64 = 44100;

/// Nanoseconds of one 1152-sample frame at 44.1kHz, truncated
pub const FRAME_NANOS_44K: u64 = 26_122_448;

/// One MPEG-1 Layer III, 44.1kHz, joint stereo frame with a zeroed payload.
pub fn mpeg1_l3_frame(bitrate_index: u8, padding: bool) -> Vec<u8> {
    let kbps = MPEG1_L3_KBPS[bitrate_index as usize];
    let length = (144 * kbps * 1000 / 44100) as usize + usize::from(padding);

    let byte2 = (bitrate_index << 4) | if padding { 0x02 } else { 0x00 };
    let mut frame = vec![0xFF, 0xFB, byte2, 0x40];
    frame.resize(length, 0);
    frame
}

/// Constant 128kbps stream with the padding pattern an encoder would use
/// to hit the nominal rate: pad whenever the running remainder overflows.
pub fn cbr_stream(frames: usize) -> Vec<u8> {
    let mut data = Vec::new();
    // 144 * 128000 = 18_432_000 = 417 * 44100 + 42_300
    let mut remainder = 0u64;
    for _ in 0..frames {
        remainder += 42_300;
        let padding = remainder >= 44_100;
        if padding {
            remainder -= 44_100;
        }
        data.extend(mpeg1_l3_frame(9, padding));
    }
    data
}

/// Frames cycling through 128..320 kbps, as a VBR encoder would emit.
pub fn vbr_frames(frames: usize) -> Vec<u8> {
    let pattern = [9u8, 11, 14, 10, 13, 12, 9, 9];
    let mut data = Vec::new();
    for i in 0..frames {
        data.extend(mpeg1_l3_frame(pattern[i % pattern.len()], i % 3 == 0));
    }
    data
}

/// `length` bytes: the given header followed by a zeroed payload.
pub fn raw_frame(header: [u8; 4], length: usize) -> Vec<u8> {
    let mut frame = header.to_vec();
    frame.resize(length, 0);
    frame
}

/// Frame whose payload starts with a Xing/Info tag right after
/// `side_info` bytes of side information.
pub fn xing_frame_after(
    header: [u8; 4],
    length: usize,
    side_info: usize,
    tag: &[u8; 4],
    flags: u32,
    frame_count: u32,
) -> Vec<u8> {
    let mut frame = raw_frame(header, length);
    let at = 4 + side_info;
    frame[at..at + 4].copy_from_slice(tag);
    frame[at + 4..at + 8].copy_from_slice(&flags.to_be_bytes());
    frame[at + 8..at + 12].copy_from_slice(&frame_count.to_be_bytes());
    // Bytes, TOC and quality fields follow; left zeroed
    frame
}

/// 128kbps joint stereo frame carrying a Xing tag after the 32-byte side information.
pub fn xing_frame(tag: &[u8; 4], flags: u32, frame_count: u32) -> Vec<u8> {
    xing_frame_after([0xFF, 0xFB, 0x90, 0x40], 417, 32, tag, flags, frame_count)
}

/// VBR file: Xing frame reporting `frames`, then that many audio frames.
pub fn vbr_stream_with_xing(frames: usize) -> Vec<u8> {
    let mut data = xing_frame(b"Xing", 0x0000_000F, frames as u32);
    data.extend(vbr_frames(frames));
    data
}

fn synchsafe(size: u32) -> [u8; 4] {
    [
        ((size >> 21) & 0x7F) as u8,
        ((size >> 14) & 0x7F) as u8,
        ((size >> 7) & 0x7F) as u8,
        (size & 0x7F) as u8,
    ]
}

/// ID3v2.4 tag with `body_len` bytes after the header, optionally with footer.
pub fn id3v2_tag(body_len: u32, footer: bool) -> Vec<u8> {
    let mut tag = b"ID3\x04\x00".to_vec();
    tag.push(if footer { 0x10 } else { 0x00 });
    tag.extend(synchsafe(body_len));

    // A text frame so the body is not just zeros
    let mut body = b"TIT2".to_vec();
    body.extend(body_len.saturating_sub(10).to_be_bytes());
    body.extend([0x00, 0x00]);
    body.resize(body_len as usize, b'x');
    tag.extend(body);

    if footer {
        tag.extend(b"3DI\x04\x00\x10");
        tag.extend(synchsafe(body_len));
    }
    tag
}

pub fn id3v1_tag(title: &str) -> Vec<u8> {
    let mut tag = b"TAG".to_vec();
    let mut title = title.as_bytes().to_vec();
    title.resize(30, 0);
    tag.extend(title);
    tag.resize(128, 0);
    tag
}

/// Reference duration in nanoseconds: samples / rate, computed in one step.
pub fn reference_nanos(frames: u64, samples: u64, rate: u64) -> u64 {
    (frames as u128 * samples as u128 * 1_000_000_000 / rate as u128) as u64
}

/// `HH:MM:SS` of whole seconds
pub fn hms(nanos: u64) -> String {
    let s = nanos / 1_000_000_000;
    format!("{:02}:{:02}:{:02}", s / 3600, (s / 60) % 60, s % 60)
}

pub fn write_temp(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).expect("create fixture");
    file.write_all(data).expect("write fixture");
    path
}
