//! Duration scan
//!
//! Walks the stream one 4-byte window at a time. Each window is either an
//! audio frame header, an ID3v2 tag, or an ID3v1 tag; anything else stops
//! the scan. Audio frames add their playback time, tags are stepped over.
//! If the first audio frame carries a Xing/Info frame count the total is
//! computed from it directly and the rest of the stream is not read.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::duration::Duration;
use crate::error::{Mp3DurationError, Result};
use crate::mp3::frame::{self, FrameHeader, HEADER_LEN};
use crate::mp3::id3::{self, Id3v2Header, ID3V2_HEADER_REST};
use crate::mp3::xing::{XingTag, PROBE_LEN};

const SKIP_BUFFER_INITIAL: usize = 16 * 1024;
const SKIP_BUFFER_MAX: usize = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanOptions {
    /// Trust a Xing/Info frame count in the first frame
    pub vbr_fast_path: bool,
    /// End cleanly, instead of failing, when the stream stops inside a frame or tag
    pub allow_truncated_tail: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            vbr_fast_path: true,
            allow_truncated_tail: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationSource {
    /// Closed form from the Xing/Info frame count
    XingFrameCount,
    /// Sum over every audio frame
    FrameSum,
}

impl std::fmt::Display for DurationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DurationSource::XingFrameCount => write!(f, "xing"),
            DurationSource::FrameSum => write!(f, "frames"),
        }
    }
}

/// Outcome of one completed scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    pub duration: Duration,
    pub source: DurationSource,
    /// Frames walked, or the tag's frame count on the fast path
    pub audio_frames: u64,
    pub id3v2_tags: u32,
    pub id3v1_tags: u32,
}

/// Calculates the playback length of an MP3 byte stream.
///
/// The calculator owns its source. A calculation consumes it, so the source
/// is released exactly once whichever way the scan ends; calculating again
/// afterwards reports `StreamNotOpen`.
pub struct Mp3DurationCalculator<R> {
    source: Option<R>,
    options: ScanOptions,
}

impl Mp3DurationCalculator<BufReader<File>> {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Mp3DurationError::InvalidFile {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read> Mp3DurationCalculator<R> {
    pub fn new(source: R) -> Self {
        Self {
            source: Some(source),
            options: ScanOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> ScanOptions {
        self.options
    }

    pub fn is_open(&self) -> bool {
        self.source.is_some()
    }

    /// Release the source without scanning it.
    pub fn close(&mut self) {
        self.source = None;
    }

    pub fn calculate(&mut self) -> Result<ScanSummary> {
        let source = self.source.take().ok_or(Mp3DurationError::StreamNotOpen)?;
        ScanState::new(source, self.options).run()
    }

    pub fn calculate_duration(&mut self) -> Result<Duration> {
        self.calculate().map(|summary| summary.duration)
    }
}

/// Open `path` and calculate its duration with default options.
pub fn calculate_duration<P: AsRef<Path>>(path: P) -> Result<Duration> {
    Mp3DurationCalculator::from_path(path)?.calculate_duration()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fill {
    Complete,
    /// Nothing was left to read
    EndOfBuffer,
    /// The stream ended after this many bytes
    Partial(usize),
}

/// Read until `buf` is full or the stream ends.
fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<Fill> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(match filled {
        n if n == buf.len() => Fill::Complete,
        0 => Fill::EndOfBuffer,
        n => Fill::Partial(n),
    })
}

/// Scratch space for bytes that are read only to be thrown away.
///
/// Grows to the largest skip seen and never shrinks. Skips longer than
/// `SKIP_BUFFER_MAX` are read in chunks of that size.
struct SkipBuffer {
    buf: Vec<u8>,
}

impl SkipBuffer {
    fn new() -> Self {
        Self {
            buf: vec![0; SKIP_BUFFER_INITIAL],
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns false if the stream ended before `length` bytes were skipped.
    fn skip<R: Read>(&mut self, reader: &mut R, length: u64) -> io::Result<bool> {
        let mut remaining = length;
        while remaining > 0 {
            let chunk = remaining.min(SKIP_BUFFER_MAX as u64) as usize;
            if chunk > self.buf.len() {
                self.buf.resize(chunk, 0);
            }
            if fill(reader, &mut self.buf[..chunk])? != Fill::Complete {
                return Ok(false);
            }
            remaining -= chunk as u64;
        }
        Ok(true)
    }
}

enum Step {
    Next,
    /// Stream ended inside a frame or tag and truncation is allowed
    End,
    /// Xing/Info frame count gave the answer
    Resolved { duration: Duration, frames: u64 },
}

struct ScanState<R> {
    source: R,
    skip: SkipBuffer,
    duration: Duration,
    options: ScanOptions,
    probed: bool,
    audio_frames: u64,
    id3v2_tags: u32,
    id3v1_tags: u32,
}

impl<R: Read> ScanState<R> {
    fn new(source: R, options: ScanOptions) -> Self {
        Self {
            source,
            skip: SkipBuffer::new(),
            duration: Duration::ZERO,
            options,
            probed: false,
            audio_frames: 0,
            id3v2_tags: 0,
            id3v1_tags: 0,
        }
    }

    fn run(mut self) -> Result<ScanSummary> {
        loop {
            let mut window = [0u8; HEADER_LEN];
            match fill(&mut self.source, &mut window).map_err(Mp3DurationError::ReadError)? {
                Fill::Complete => {}
                Fill::EndOfBuffer => break,
                Fill::Partial(n) => {
                    return Err(Mp3DurationError::ReadError(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        format!("stream ended {} bytes into a {}-byte header", n, HEADER_LEN),
                    )));
                }
            }

            let word = u32::from_be_bytes(window);
            let step = if frame::is_frame_sync(word) {
                self.audio_frame(word)?
            } else if &window[..3] == id3::ID3V2_MAGIC {
                self.id3v2_tag(window)?
            } else if &window[..3] == id3::ID3V1_MAGIC {
                self.id3v1_tag()?
            } else {
                return Err(Mp3DurationError::UnexpectedFrame(word));
            };

            match step {
                Step::Next => {}
                Step::End => break,
                Step::Resolved { duration, frames } => {
                    return Ok(self.summary(duration, DurationSource::XingFrameCount, frames));
                }
            }
        }

        Ok(self.summary(self.duration, DurationSource::FrameSum, self.audio_frames))
    }

    fn summary(
        &self,
        duration: Duration,
        source: DurationSource,
        audio_frames: u64,
    ) -> ScanSummary {
        ScanSummary {
            duration,
            source,
            audio_frames,
            id3v2_tags: self.id3v2_tags,
            id3v1_tags: self.id3v1_tags,
        }
    }

    fn audio_frame(&mut self, word: u32) -> Result<Step> {
        let header = FrameHeader::decode(word)?;
        let samples = header.samples_per_frame()?;
        let rate = header.sampling_rate()?;
        let frame_nanos = header.duration_nanos()?;
        let mut consumed = HEADER_LEN as u64;

        // A Xing/Info frame count needs no bitrate
        if !self.probed && self.options.vbr_fast_path {
            let side = u64::from(header.side_information_size());
            let probe_end = consumed + side + PROBE_LEN as u64;
            // A frame of known length too short to hold the probe is just an ordinary frame
            let fits = match header.frame_length() {
                Ok(length) => u64::from(length) >= probe_end,
                Err(_) => true,
            };
            if fits {
                if !self.skip(side)? {
                    return self.truncated(Some(frame_nanos));
                }
                let mut probe = [0u8; PROBE_LEN];
                if fill(&mut self.source, &mut probe).map_err(Mp3DurationError::ReadError)?
                    != Fill::Complete
                {
                    return self.truncated(Some(frame_nanos));
                }
                consumed = probe_end;

                if let Some(tag) = XingTag::probe(&probe) {
                    if let Some(duration) = tag.duration(samples, rate) {
                        let frames = u64::from(tag.frame_count.unwrap_or_default());
                        debug!(
                            "{} header reports {} frames, duration {}",
                            if tag.is_vbr_header { "Xing" } else { "Info" },
                            frames,
                            duration
                        );
                        return Ok(Step::Resolved { duration, frames });
                    }
                    debug!("Xing/Info header without frame count, summing frames");
                }
            }
        }
        self.probed = true;

        let frame_length = u64::from(header.frame_length()?);
        if !self.skip(frame_length.saturating_sub(consumed))? {
            return self.truncated(Some(frame_nanos));
        }

        self.count_frame(frame_nanos);
        trace!(
            "frame {}: {} bytes, total {}",
            self.audio_frames,
            frame_length,
            self.duration
        );
        Ok(Step::Next)
    }

    fn id3v2_tag(&mut self, window: [u8; HEADER_LEN]) -> Result<Step> {
        let mut rest = [0u8; ID3V2_HEADER_REST];
        if fill(&mut self.source, &mut rest).map_err(Mp3DurationError::ReadError)?
            != Fill::Complete
        {
            return self.truncated(None);
        }

        let header = Id3v2Header::parse(window, rest);
        debug!(
            "skipping ID3v2.{} tag: {} bytes{}",
            header.major_version,
            header.tag_size,
            if header.has_footer() { " + footer" } else { "" }
        );
        if !self.skip(u64::from(header.skip_length()))? {
            return self.truncated(None);
        }
        self.id3v2_tags += 1;
        Ok(Step::Next)
    }

    fn id3v1_tag(&mut self) -> Result<Step> {
        debug!("skipping ID3v1 tag");
        if !self.skip(u64::from(id3::id3v1_skip_length(HEADER_LEN)))? {
            return self.truncated(None);
        }
        self.id3v1_tags += 1;
        Ok(Step::Next)
    }

    fn skip(&mut self, length: u64) -> Result<bool> {
        self.skip
            .skip(&mut self.source, length)
            .map_err(Mp3DurationError::ReadError)
    }

    fn count_frame(&mut self, nanos: u64) {
        self.duration.add_nanos(nanos);
        self.audio_frames += 1;
    }

    /// The stream ended inside a frame or tag.
    fn truncated(&mut self, frame_nanos: Option<u64>) -> Result<Step> {
        if !self.options.allow_truncated_tail {
            return Err(Mp3DurationError::ReadError(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stream ended inside a frame or tag",
            )));
        }
        if let Some(nanos) = frame_nanos {
            self.count_frame(nanos);
        }
        debug!("stream truncated after {} frames", self.audio_frames);
        Ok(Step::End)
    }
}
