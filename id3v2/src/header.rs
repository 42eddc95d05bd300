use crate::error::Result;
use crate::macros::err;
use crate::util::synchsafe::{self, SynchsafeInteger};

use std::io::Read;

use byteorder::{BigEndian, ByteOrder};

/// The size of the tag header, and the footer
pub(crate) const HEADER_LEN: usize = 10;
/// The size of the extended header's size field
pub(crate) const EXTENDED_HEADER_SIZE_LEN: usize = 4;

const UNSYNCHRONISATION_FLAG: u8 = 0x80;
/// The extended header flag in ID3v2.3/4, the (undefined) compression flag in ID3v2.2
const EXTENDED_HEADER_FLAG: u8 = 0x40;
const FOOTER_FLAG: u8 = 0x10;

/// The ID3v2 version
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum Id3v2Version {
	/// ID3v2.2
	V2,
	/// ID3v2.3
	V3,
	/// ID3v2.4
	V4,
}

impl Id3v2Version {
	/// Get the version from a major version number
	///
	/// Anything outside of `2..=4` is incompatible.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2::Id3v2Version;
	///
	/// assert_eq!(Id3v2Version::from_major(3), Some(Id3v2Version::V3));
	/// assert_eq!(Id3v2Version::from_major(5), None);
	/// ```
	pub fn from_major(major: u8) -> Option<Self> {
		match major {
			2 => Some(Self::V2),
			3 => Some(Self::V3),
			4 => Some(Self::V4),
			_ => None,
		}
	}

	/// The major version number
	pub fn major(self) -> u8 {
		match self {
			Self::V2 => 2,
			Self::V3 => 3,
			Self::V4 => 4,
		}
	}
}

// Only ID3v2.3/4 headers are followed by an extended header size. Any other version is
// ignored before it would be read.
fn has_extended_header_field(major_version: u8, flags: u8) -> bool {
	matches!(
		Id3v2Version::from_major(major_version),
		Some(Id3v2Version::V3 | Id3v2Version::V4)
	) && flags & EXTENDED_HEADER_FLAG == EXTENDED_HEADER_FLAG
}

/// The fixed 10 byte tag header
///
/// ```text
/// "ID3" | major (1) | minor (1) | flags (1) | synchsafe size (4)
/// ```
///
/// If the extended header flag is set (ID3v2.3/4), the synchsafe size of the extended header
/// immediately follows.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Id3v2Header {
	pub(crate) major_version: u8,
	pub(crate) minor_version: u8,
	pub(crate) flags: u8,
	/// The size of the tag contents (**DOES NOT INCLUDE THE HEADER/FOOTER**)
	pub(crate) size: u32,
	pub(crate) extended_size: u32,
}

impl Default for Id3v2Header {
	/// An empty ID3v2.3.0 header with no flags
	fn default() -> Self {
		Self::new_v23(0)
	}
}

impl Id3v2Header {
	/// The canonical header used when writing: ID3v2.3.0, no flags
	pub(crate) fn new_v23(size: u32) -> Self {
		Self {
			major_version: 3,
			minor_version: 0,
			flags: 0,
			size,
			extended_size: 0,
		}
	}

	/// Parse a header from the start of `bytes`
	///
	/// Only the magic and length are checked here, see [`Id3v2Header::version`] for the
	/// version check.
	///
	/// # Errors
	///
	/// * `bytes` is shorter than 10 bytes, or doesn't start with `"ID3"` ([`ErrorKind::NotATag`](crate::error::ErrorKind::NotATag))
	/// * The tag is an ID3v2.2 tag with its compression flag set ([`ErrorKind::V2Compression`](crate::error::ErrorKind::V2Compression))
	/// * The extended header flag is set, but its size field is missing ([`ErrorKind::TruncatedData`](crate::error::ErrorKind::TruncatedData))
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2::Id3v2Header;
	///
	/// # fn main() -> id3v2::error::Result<()> {
	/// let header = Id3v2Header::parse(&[0x49, 0x44, 0x33, 0x03, 0x00, 0x00, 0x00, 0x00, 0x01, 0x7F])?;
	/// assert_eq!(header.size(), 255);
	/// # Ok(()) }
	/// ```
	pub fn parse(bytes: &[u8]) -> Result<Self> {
		log::debug!("Parsing ID3v2 header");

		if bytes.len() < HEADER_LEN || &bytes[..3] != b"ID3" {
			err!(NotATag);
		}

		let major_version = bytes[3];
		let minor_version = bytes[4];
		let flags = bytes[5];
		let size = BigEndian::read_u32(&bytes[6..HEADER_LEN]).unsynch();

		// Compression was a flag only used in ID3v2.2 (bit 6).
		// At the time the ID3v2.2 standard was written, a compression scheme wasn't decided.
		// The ID3v2.2 document recommends just ignoring the tag in this case.
		if major_version == 2 && flags & EXTENDED_HEADER_FLAG == EXTENDED_HEADER_FLAG {
			err!(V2Compression);
		}

		let mut extended_size = 0;
		if has_extended_header_field(major_version, flags) {
			let Some(size_field) = bytes.get(HEADER_LEN..HEADER_LEN + EXTENDED_HEADER_SIZE_LEN)
			else {
				err!(TruncatedData);
			};

			extended_size = BigEndian::read_u32(size_field).unsynch();
		}

		Ok(Self {
			major_version,
			minor_version,
			flags,
			size,
			extended_size,
		})
	}

	/// Read a header (and the extended header size, if present) from a reader
	///
	/// # Errors
	///
	/// See [`Id3v2Header::parse`]. Running out of data before the end of the standard header
	/// is reported as [`ErrorKind::NotATag`](crate::error::ErrorKind::NotATag), running out before
	/// the end of the extended header size as
	/// [`ErrorKind::TruncatedData`](crate::error::ErrorKind::TruncatedData).
	pub fn read<R>(reader: &mut R) -> Result<Self>
	where
		R: Read,
	{
		let mut header = [0; HEADER_LEN + EXTENDED_HEADER_SIZE_LEN];
		if reader.read_exact(&mut header[..HEADER_LEN]).is_err() {
			err!(NotATag);
		}

		if &header[..3] == b"ID3" && has_extended_header_field(header[3], header[5]) {
			if let Err(e) = reader.read_exact(&mut header[HEADER_LEN..]) {
				if e.kind() == std::io::ErrorKind::UnexpectedEof {
					err!(TruncatedData);
				}

				return Err(e.into());
			}

			return Self::parse(&header);
		}

		Self::parse(&header[..HEADER_LEN])
	}

	/// The tag version, if it is one this codec understands
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2::{Id3v2Header, Id3v2Version};
	///
	/// # fn main() -> id3v2::error::Result<()> {
	/// let header = Id3v2Header::parse(b"ID3\x04\x00\x00\x00\x00\x00\x00")?;
	/// assert_eq!(header.version(), Some(Id3v2Version::V4));
	///
	/// let header = Id3v2Header::parse(b"ID3\x05\x00\x00\x00\x00\x00\x00")?;
	/// assert_eq!(header.version(), None);
	/// # Ok(()) }
	/// ```
	pub fn version(&self) -> Option<Id3v2Version> {
		Id3v2Version::from_major(self.major_version)
	}

	/// The major version byte, as found in the header
	pub fn major_version(&self) -> u8 {
		self.major_version
	}

	/// The revision byte
	pub fn minor_version(&self) -> u8 {
		self.minor_version
	}

	/// The raw flags byte
	pub fn flags(&self) -> u8 {
		self.flags
	}

	/// Whether every frame in the tag is unsynchronised
	pub fn unsynchronisation(&self) -> bool {
		self.flags & UNSYNCHRONISATION_FLAG == UNSYNCHRONISATION_FLAG
	}

	/// Whether an extended header follows the header
	pub fn has_extended_header(&self) -> bool {
		has_extended_header_field(self.major_version, self.flags)
	}

	/// Whether a footer follows the tag (ID3v2.4 only)
	pub fn has_footer(&self) -> bool {
		self.major_version == 4 && self.flags & FOOTER_FLAG == FOOTER_FLAG
	}

	/// The size of the frames and padding (**DOES NOT INCLUDE THE HEADER/FOOTER**)
	pub fn size(&self) -> u32 {
		self.size
	}

	/// The size of the extended header, `0` if absent
	pub fn extended_size(&self) -> u32 {
		self.extended_size
	}

	/// The number of bytes between the end of the header and the first frame
	///
	/// The ID3v2.3 extended header size doesn't count its own size field, the ID3v2.4 one does.
	pub(crate) fn extended_header_len(&self) -> u32 {
		if !self.has_extended_header() {
			return 0;
		}

		match self.version() {
			Some(Id3v2Version::V4) => self.extended_size,
			_ => self.extended_size.saturating_add(EXTENDED_HEADER_SIZE_LEN as u32),
		}
	}

	/// The total size of the tag, including the header and footer
	pub(crate) fn full_tag_size(&self) -> u64 {
		let footer = if self.has_footer() { HEADER_LEN } else { 0 };
		u64::from(self.size) + (HEADER_LEN + footer) as u64
	}

	/// The full size of the tag that starts with `header`, if it is an ID3v2 tag at all
	///
	/// Unlike [`Id3v2Header::parse`], this accepts any version and flags, so that any existing tag
	/// can be replaced.
	pub(crate) fn tag_size_of(header: &[u8; HEADER_LEN]) -> Option<u64> {
		if &header[..3] != b"ID3" {
			return None;
		}

		let header = Self {
			major_version: header[3],
			minor_version: header[4],
			flags: header[5],
			size: synchsafe::decode([header[6], header[7], header[8], header[9]]),
			extended_size: 0,
		};

		Some(header.full_tag_size())
	}

	/// Serialize the header
	///
	/// The extended header is never written, so its flag is cleared.
	///
	/// # Errors
	///
	/// The size doesn't fit in a synchsafe integer
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2::Id3v2Header;
	///
	/// # fn main() -> id3v2::error::Result<()> {
	/// let bytes = [0x49, 0x44, 0x33, 0x03, 0x00, 0x00, 0x00, 0x00, 0x01, 0x7F];
	/// let header = Id3v2Header::parse(&bytes)?;
	/// assert_eq!(header.as_bytes()?, bytes);
	/// # Ok(()) }
	/// ```
	pub fn as_bytes(&self) -> Result<[u8; HEADER_LEN]> {
		let mut header = [0; HEADER_LEN];
		header[..3].copy_from_slice(b"ID3");
		header[3] = self.major_version;
		header[4] = self.minor_version;
		header[5] = self.flags & !EXTENDED_HEADER_FLAG;
		header[6..].copy_from_slice(&synchsafe::encode(self.size)?);

		Ok(header)
	}
}
