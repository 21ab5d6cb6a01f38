pub mod frame;
pub mod id3;
pub mod tables;
pub mod xing;

pub use frame::FrameHeader;
pub use id3::Id3v2Header;
pub use tables::{ChannelMode, Layer, MpegVersion};
pub use xing::XingTag;
