//! ID3v2 frames
//!
//! A [`Frame`] keeps its payload exactly as it was found in the tag. Interpreting that payload is
//! deferred until one of the content accessors ([`Frame::text_content`],
//! [`Frame::comment_content`], [`Frame::picture_content`]) is called.

mod content;
pub(crate) mod header;
pub(crate) mod read;

use crate::error::{Id3v2Error, ErrorKind, Result};
use crate::header::Id3v2Version;
use crate::items::{CommentContent, PictureContent, TextContent};

use std::fmt::{Display, Formatter};

pub(crate) const ATTACHED_PICTURE_ID: FrameId = FrameId(*b"APIC");
pub(crate) const COMMENT_ID: FrameId = FrameId(*b"COMM");

/// An ID3v2.3/4 frame ID
///
/// IDs from ID3v2.2 tags are translated when the tag is read, so every frame in memory has a four
/// character ID made of `'A'..='Z'` and `'0'..='9'`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub(crate) [u8; 4]);

impl FrameId {
	/// Attempts to create a `FrameId` from a string
	///
	/// # Errors
	///
	/// * `id` is not exactly four characters
	/// * `id` contains characters outside of `'A'..='Z'` and `'0'..='9'`
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2::FrameId;
	///
	/// assert!(FrameId::new("TIT2").is_ok());
	/// assert!(FrameId::new("tit2").is_err());
	/// assert!(FrameId::new("TT2").is_err());
	/// ```
	pub fn new(id: &str) -> Result<Self> {
		match <[u8; 4]>::try_from(id.as_bytes()) {
			Ok(bytes) => Self::from_bytes(bytes),
			Err(_) => Err(Id3v2Error::new(ErrorKind::MalformedFrameId(
				id.as_bytes().to_vec(),
			))),
		}
	}

	/// Attempts to create a `FrameId` from its on-disk representation
	///
	/// # Errors
	///
	/// See [`FrameId::new`]
	pub fn from_bytes(bytes: [u8; 4]) -> Result<Self> {
		if !is_valid_frame_id(&bytes) {
			return Err(Id3v2Error::new(ErrorKind::MalformedFrameId(bytes.to_vec())));
		}

		Ok(Self(bytes))
	}

	/// The ID as a string
	pub fn as_str(&self) -> &str {
		// Only ASCII is ever stored
		std::str::from_utf8(&self.0).unwrap_or_default()
	}

	/// The ID as it's written to disk
	pub fn as_bytes(&self) -> [u8; 4] {
		self.0
	}

	/// Whether the frame holds a text information frame (`T***`)
	pub fn is_text(&self) -> bool {
		self.0[0] == b'T'
	}
}

impl Display for FrameId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

impl PartialEq<&str> for FrameId {
	fn eq(&self, other: &&str) -> bool {
		self.0 == other.as_bytes()
	}
}

/// Checks that every byte of a frame ID is within `'A'..='Z'` or `'0'..='9'`
pub(crate) fn is_valid_frame_id(id: &[u8]) -> bool {
	!id.is_empty()
		&& id
			.iter()
			.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

/// Various flags to describe the content of a frame
///
/// ID3v2.2 frames have no flags, and ID3v2.3 frames have no unsynchronisation or data length
/// indicator flags.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct FrameFlags {
	/// Preserve frame on tag edit
	pub tag_alter_preservation: bool,
	/// Preserve frame on file edit
	pub file_alter_preservation: bool,
	/// Item cannot be written to
	pub read_only: bool,
	/// The payload starts with a group identifier byte
	pub grouping_identity: bool,
	/// Frame is zlib compressed
	pub compression: bool,
	/// Frame is encrypted
	///
	/// The encryption method is unknown, so the content of these frames is unavailable.
	pub encryption: bool,
	/// Frame is unsynchronised (ID3v2.4 only)
	pub unsynchronisation: bool,
	/// The payload starts with a synchsafe data length indicator (ID3v2.4 only)
	pub data_length_indicator: bool,
}

impl FrameFlags {
	/// Parse the flags from an ID3v2.4 frame
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2::FrameFlags;
	///
	/// let flags = FrameFlags::parse_id3v24(0x4001);
	/// assert!(flags.tag_alter_preservation);
	/// assert!(flags.data_length_indicator);
	/// assert!(!flags.compression);
	/// ```
	pub fn parse_id3v24(flags: u16) -> Self {
		FrameFlags {
			tag_alter_preservation: flags & 0x4000 == 0x4000,
			file_alter_preservation: flags & 0x2000 == 0x2000,
			read_only: flags & 0x1000 == 0x1000,
			grouping_identity: flags & 0x0040 == 0x0040,
			compression: flags & 0x0008 == 0x0008,
			encryption: flags & 0x0004 == 0x0004,
			unsynchronisation: flags & 0x0002 == 0x0002,
			data_length_indicator: flags & 0x0001 == 0x0001,
		}
	}

	/// Parse the flags from an ID3v2.3 frame
	pub fn parse_id3v23(flags: u16) -> Self {
		FrameFlags {
			tag_alter_preservation: flags & 0x8000 == 0x8000,
			file_alter_preservation: flags & 0x4000 == 0x4000,
			read_only: flags & 0x2000 == 0x2000,
			grouping_identity: flags & 0x0020 == 0x0020,
			compression: flags & 0x0080 == 0x0080,
			encryption: flags & 0x0040 == 0x0040,
			unsynchronisation: false,
			data_length_indicator: false,
		}
	}

	/// Get the ID3v2.3 byte representation of the flags
	///
	/// The ID3v2.4 only flags (`unsynchronisation`, `data_length_indicator`) have no
	/// representation and are dropped.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2::FrameFlags;
	///
	/// let flags = FrameFlags::parse_id3v24(0x7000);
	/// assert_eq!(flags.as_id3v23_bytes(), 0xE000);
	/// ```
	pub fn as_id3v23_bytes(&self) -> u16 {
		let mut flags = 0;

		if *self == FrameFlags::default() {
			return flags;
		}

		if self.tag_alter_preservation {
			flags |= 0x8000
		}

		if self.file_alter_preservation {
			flags |= 0x4000
		}

		if self.read_only {
			flags |= 0x2000
		}

		if self.grouping_identity {
			flags |= 0x0020
		}

		if self.compression {
			flags |= 0x0080
		}

		if self.encryption {
			flags |= 0x0040
		}

		flags
	}

	/// Whether any flag changes the layout of the payload
	pub fn has_format_flags(&self) -> bool {
		self.grouping_identity
			|| self.compression
			|| self.encryption
			|| self.unsynchronisation
			|| self.data_length_indicator
	}

	/// The same flags, with every format flag cleared
	pub(crate) fn status_only(self) -> Self {
		FrameFlags {
			tag_alter_preservation: self.tag_alter_preservation,
			file_alter_preservation: self.file_alter_preservation,
			read_only: self.read_only,
			..FrameFlags::default()
		}
	}
}

/// The interpretation of a frame's payload, chosen by its ID
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FrameKind {
	/// Any `T***` frame
	Text,
	/// `COMM`
	Comment,
	/// `APIC` (`PIC` in ID3v2.2)
	Picture,
	/// Anything else, only available as raw bytes
	Unsupported,
}

/// A single ID3v2 frame
///
/// The payload is owned by the frame and never includes the frame header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
	pub(crate) id: FrameId,
	pub(crate) flags: u16,
	pub(crate) data: Vec<u8>,
	pub(crate) version: Id3v2Version,
}

impl Frame {
	/// Create a new ID3v2.3 frame with no flags
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2::{Frame, FrameId};
	///
	/// # fn main() -> id3v2::error::Result<()> {
	/// let frame = Frame::new(FrameId::new("TIT2")?, b"\x00Title".to_vec());
	/// assert_eq!(frame.size(), 6);
	/// # Ok(()) }
	/// ```
	pub fn new(id: FrameId, data: Vec<u8>) -> Self {
		Self {
			id,
			flags: 0,
			data,
			version: Id3v2Version::V3,
		}
	}

	/// Parse the frame at the start of `bytes`
	///
	/// This returns `None` when `bytes` doesn't start with a frame, which is how padding is
	/// recognized.
	///
	/// # Errors
	///
	/// * The frame's declared size exceeds `bytes`
	/// * The frame is from an ID3v2.2 tag and has an ID with no known translation
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2::{Frame, Id3v2Version};
	///
	/// # fn main() -> id3v2::error::Result<()> {
	/// let bytes = b"TIT2\x00\x00\x00\x06\x00\x00\x00Title";
	/// let frame = Frame::parse(bytes, Id3v2Version::V3)?.expect("should find a frame");
	///
	/// assert_eq!(frame.id().as_str(), "TIT2");
	/// assert_eq!(frame.data(), b"\x00Title");
	///
	/// // All zeros is padding
	/// assert!(Frame::parse(&[0; 16], Id3v2Version::V3)?.is_none());
	/// # Ok(()) }
	/// ```
	pub fn parse(bytes: &[u8], version: Id3v2Version) -> Result<Option<Self>> {
		read::parse_single_frame(bytes, version)
	}

	/// The frame's ID
	pub fn id(&self) -> FrameId {
		self.id
	}

	/// The size of the payload, excluding the frame header
	pub fn size(&self) -> usize {
		self.data.len()
	}

	/// The raw payload
	pub fn data(&self) -> &[u8] {
		&self.data
	}

	/// The tag version the frame was read from
	///
	/// Frames created in memory are [`Id3v2Version::V3`].
	pub fn version(&self) -> Id3v2Version {
		self.version
	}

	/// The flags, as they were found on disk
	///
	/// ID3v2.2 frames always have `0`.
	pub fn raw_flags(&self) -> u16 {
		self.flags
	}

	/// The flags, interpreted according to [`Frame::version`]
	pub fn flags(&self) -> FrameFlags {
		match self.version {
			Id3v2Version::V2 => FrameFlags::default(),
			Id3v2Version::V3 => FrameFlags::parse_id3v23(self.flags),
			Id3v2Version::V4 => FrameFlags::parse_id3v24(self.flags),
		}
	}

	/// How the payload is interpreted
	pub fn kind(&self) -> FrameKind {
		if self.id.is_text() {
			return FrameKind::Text;
		}

		match self.id {
			COMMENT_ID => FrameKind::Comment,
			ATTACHED_PICTURE_ID => FrameKind::Picture,
			_ => FrameKind::Unsupported,
		}
	}

	/// Decode the payload as text
	///
	/// This returns `None` if the frame isn't a [`FrameKind::Text`] frame.
	///
	/// # Errors
	///
	/// See [`TextContent::parse`]
	pub fn text_content(&self) -> Result<Option<TextContent>> {
		if self.kind() != FrameKind::Text {
			return Ok(None);
		}

		TextContent::parse(self).map(Some)
	}

	/// Decode the payload as a comment
	///
	/// This returns `None` if the frame isn't a [`FrameKind::Comment`] frame.
	///
	/// # Errors
	///
	/// See [`CommentContent::parse`]
	pub fn comment_content(&self) -> Result<Option<CommentContent>> {
		if self.kind() != FrameKind::Comment {
			return Ok(None);
		}

		CommentContent::parse(self).map(Some)
	}

	/// Decode the payload as an attached picture
	///
	/// This returns `None` if the frame isn't a [`FrameKind::Picture`] frame.
	///
	/// # Errors
	///
	/// See [`PictureContent::parse`]
	pub fn picture_content(&self) -> Result<Option<PictureContent<'_>>> {
		if self.kind() != FrameKind::Picture {
			return Ok(None);
		}

		PictureContent::parse(self).map(Some)
	}
}
