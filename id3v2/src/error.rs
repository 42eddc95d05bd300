//! Contains the errors that can arise within the codec
//!
//! The primary error is [`Id3v2Error`]. The type of error is determined by [`ErrorKind`].
//!
//! Note that not every [`ErrorKind`] reaches the caller. A malformed frame ID, for example, is how
//! the frame loop recognizes the start of the padding, so it only ends the loop.

use std::collections::TryReserveError;
use std::fmt::{Debug, Display, Formatter};

/// Alias for `Result<T, Id3v2Error>`
pub type Result<T> = std::result::Result<T, Id3v2Error>;

/// The types of errors that can occur
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
	// Header
	/// The data is shorter than a tag header, or doesn't start with `"ID3"`
	NotATag,
	/// Arises when a major version outside of (2, 3, 4) is found
	UnsupportedVersion(u8, u8),
	/// Arises when a compressed ID3v2.2 tag is encountered
	///
	/// At the time the ID3v2.2 standard was written, a compression scheme wasn't decided.
	/// As such, the tag is ignored entirely.
	V2Compression,
	/// Arises when an extended header has an invalid size (it must be smaller than the tag)
	BadExtendedHeaderSize,

	// Frame
	/// A declared frame or tag size exceeds the available bytes
	TruncatedData,
	/// Arises when a frame ID contains invalid characters (must be within `'A'..='Z'` or `'0'..='9'`)
	/// or if the ID is too short/long.
	MalformedFrameId(Vec<u8>),
	/// An ID3v2.2 frame ID with no ID3v2.3/4 counterpart
	UnknownLegacyFrameId([u8; 3]),
	/// Arises when a frame doesn't have enough data to extract the necessary information
	BadFrameLength,
	/// Arises when an encrypted frame's content is requested
	EncryptedFrame,
	/// Arises when a compressed frame is encountered, but support is disabled
	#[cfg(not(feature = "id3v2_compression_support"))]
	CompressedFrameEncountered,
	/// Arises when a compressed frame is unable to be decompressed
	#[cfg(feature = "id3v2_compression_support")]
	Decompression(flate2::DecompressError),

	// Text
	/// A text encoding byte outside of `0..=3`
	BadTextEncoding(u8),
	/// Errors that arise while decoding text
	TextDecode(&'static str),
	/// Errors that arise while encoding text
	TextEncode(&'static str),

	// Conversions for external errors
	/// Attempting to read/write an abnormally large amount of data
	TooMuchData,
	/// Unable to convert bytes to a String
	StringFromUtf8(std::string::FromUtf8Error),
	/// Represents all cases of [`std::io::Error`].
	Io(std::io::Error),
	/// Failure to allocate enough memory
	Alloc(TryReserveError),
}

/// Errors that could occur within the codec
pub struct Id3v2Error {
	pub(crate) kind: ErrorKind,
}

impl Id3v2Error {
	/// Create an `Id3v2Error` from an [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2::error::{ErrorKind, Id3v2Error};
	///
	/// let not_a_tag = Id3v2Error::new(ErrorKind::NotATag);
	/// ```
	#[must_use]
	pub const fn new(kind: ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2::error::{ErrorKind, Id3v2Error};
	///
	/// let truncated = Id3v2Error::new(ErrorKind::TruncatedData);
	/// if let ErrorKind::TruncatedData = truncated.kind() {
	/// 	println!("Where did the rest of the tag go?");
	/// }
	/// ```
	pub fn kind(&self) -> &ErrorKind {
		&self.kind
	}

	/// Whether this error means "there is no usable tag here"
	///
	/// Header level failures don't describe a broken tag, they describe the absence of one.
	pub(crate) fn is_absent_tag(&self) -> bool {
		matches!(
			self.kind,
			ErrorKind::NotATag | ErrorKind::UnsupportedVersion(..) | ErrorKind::V2Compression
		)
	}
}

impl std::error::Error for Id3v2Error {}

impl Debug for Id3v2Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.kind)
	}
}

impl From<ErrorKind> for Id3v2Error {
	fn from(kind: ErrorKind) -> Self {
		Self { kind }
	}
}

impl From<std::io::Error> for Id3v2Error {
	fn from(input: std::io::Error) -> Self {
		Self {
			kind: ErrorKind::Io(input),
		}
	}
}

impl From<std::string::FromUtf8Error> for Id3v2Error {
	fn from(input: std::string::FromUtf8Error) -> Self {
		Self {
			kind: ErrorKind::StringFromUtf8(input),
		}
	}
}

impl From<TryReserveError> for Id3v2Error {
	fn from(input: TryReserveError) -> Self {
		Self {
			kind: ErrorKind::Alloc(input),
		}
	}
}

impl From<std::convert::Infallible> for Id3v2Error {
	fn from(input: std::convert::Infallible) -> Self {
		match input {}
	}
}

#[cfg(feature = "id3v2_compression_support")]
impl From<flate2::DecompressError> for Id3v2Error {
	fn from(input: flate2::DecompressError) -> Self {
		Self {
			kind: ErrorKind::Decompression(input),
		}
	}
}

impl Display for Id3v2Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.kind {
			// Conversions
			ErrorKind::StringFromUtf8(ref err) => write!(f, "{err}"),
			ErrorKind::Io(ref err) => write!(f, "{err}"),
			ErrorKind::Alloc(ref err) => write!(f, "{err}"),

			// Header
			ErrorKind::NotATag => write!(f, "Reading: Expected an ID3v2 tag, found invalid data"),
			ErrorKind::UnsupportedVersion(major, minor) => write!(
				f,
				"Found an invalid version (v2.{major}.{minor}), expected any major revision in: \
				 (2, 3, 4)"
			),
			ErrorKind::V2Compression => write!(f, "Encountered a compressed ID3v2.2 tag"),
			ErrorKind::BadExtendedHeaderSize => {
				write!(f, "Found an extended header with an invalid size")
			},

			// Frame
			ErrorKind::TruncatedData => write!(
				f,
				"A declared frame or tag size exceeds the available data"
			),
			ErrorKind::MalformedFrameId(ref frame_id) => {
				write!(f, "Failed to parse a frame ID: 0x{frame_id:x?}")
			},
			ErrorKind::UnknownLegacyFrameId(frame_id) => write!(
				f,
				"Found an ID3v2.2 frame ID with no ID3v2.3 counterpart: \"{}\"",
				String::from_utf8_lossy(&frame_id)
			),
			ErrorKind::BadFrameLength => write!(
				f,
				"Frame isn't long enough to extract the necessary information"
			),
			ErrorKind::EncryptedFrame => {
				write!(f, "Encountered an encrypted frame, its content is unavailable")
			},
			#[cfg(not(feature = "id3v2_compression_support"))]
			ErrorKind::CompressedFrameEncountered => write!(
				f,
				"Encountered a compressed ID3v2 frame, support is disabled"
			),
			#[cfg(feature = "id3v2_compression_support")]
			ErrorKind::Decompression(ref err) => write!(f, "Failed to decompress frame: {err}"),

			// Text
			ErrorKind::BadTextEncoding(byte) => {
				write!(f, "Found an invalid text encoding byte: {byte}")
			},
			ErrorKind::TextDecode(message) => write!(f, "Text decoding: {message}"),
			ErrorKind::TextEncode(message) => write!(f, "Text encoding: {message}"),

			ErrorKind::TooMuchData => write!(
				f,
				"Attempted to read/write an abnormally large amount of data"
			),
		}
	}
}
