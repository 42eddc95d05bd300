use crate::error::Result;
use crate::frame::Frame;
use crate::header::Id3v2Version;
use crate::macros::err;
use crate::util::text::{TextEncoding, decode_str, find_terminator, latin1_decode};

use std::borrow::Cow;
use std::ops::Range;

/// The picture type, according to ID3v2 APIC
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum PictureType {
	Other,
	Icon,
	OtherIcon,
	CoverFront,
	CoverBack,
	Leaflet,
	Media,
	LeadArtist,
	Artist,
	Conductor,
	Band,
	Composer,
	Lyricist,
	RecordingLocation,
	DuringRecording,
	DuringPerformance,
	ScreenCapture,
	BrightFish,
	Illustration,
	BandLogo,
	PublisherLogo,
	Undefined(u8),
}

impl PictureType {
	/// Get a `u8` from a `PictureType` according to ID3v2 APIC
	pub fn as_u8(&self) -> u8 {
		match self {
			Self::Other => 0,
			Self::Icon => 1,
			Self::OtherIcon => 2,
			Self::CoverFront => 3,
			Self::CoverBack => 4,
			Self::Leaflet => 5,
			Self::Media => 6,
			Self::LeadArtist => 7,
			Self::Artist => 8,
			Self::Conductor => 9,
			Self::Band => 10,
			Self::Composer => 11,
			Self::Lyricist => 12,
			Self::RecordingLocation => 13,
			Self::DuringRecording => 14,
			Self::DuringPerformance => 15,
			Self::ScreenCapture => 16,
			Self::BrightFish => 17,
			Self::Illustration => 18,
			Self::BandLogo => 19,
			Self::PublisherLogo => 20,
			Self::Undefined(i) => *i,
		}
	}

	/// Get a `PictureType` from a u8 according to ID3v2 APIC
	pub fn from_u8(byte: u8) -> Self {
		match byte {
			0 => Self::Other,
			1 => Self::Icon,
			2 => Self::OtherIcon,
			3 => Self::CoverFront,
			4 => Self::CoverBack,
			5 => Self::Leaflet,
			6 => Self::Media,
			7 => Self::LeadArtist,
			8 => Self::Artist,
			9 => Self::Conductor,
			10 => Self::Band,
			11 => Self::Composer,
			12 => Self::Lyricist,
			13 => Self::RecordingLocation,
			14 => Self::DuringRecording,
			15 => Self::DuringPerformance,
			16 => Self::ScreenCapture,
			17 => Self::BrightFish,
			18 => Self::Illustration,
			19 => Self::BandLogo,
			20 => Self::PublisherLogo,
			i => Self::Undefined(i),
		}
	}
}

/// The content of an `APIC` (ID3v2.2 `PIC`) frame
///
/// ```text
/// v2.2:    encoding (1) | format (3)          | type (1) | description | terminator | data
/// v2.3/4:  encoding (1) | MIME type | 0x00    | type (1) | description | terminator | data
/// ```
///
/// The description borrows from the frame whenever possible, the image is always copied out.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PictureContent<'a> {
	/// The encoding of the description
	pub encoding: TextEncoding,
	/// The MIME type, ID3v2.2 format codes are mapped to `image/<format>`
	pub mime_type: String,
	/// The picture type
	pub picture_type: PictureType,
	/// The raw, undecoded description
	pub description: Cow<'a, [u8]>,
	/// The image data
	pub data: Vec<u8>,
}

struct PictureLayout {
	encoding: TextEncoding,
	mime_type: String,
	picture_type: PictureType,
	description: Range<usize>,
	data_start: usize,
}

impl<'a> PictureContent<'a> {
	/// Read the picture content of a frame
	///
	/// NOTE: This doesn't check the frame ID, see [`Frame::picture_content`].
	///
	/// # Errors
	///
	/// * The payload is too short, or the MIME type/description has no terminator
	/// * The encoding byte is invalid
	/// * See [`Frame::content`]
	pub fn parse(frame: &'a Frame) -> Result<Self> {
		let content = frame.content()?;
		let layout = parse_layout(&content, frame.version())?;

		let data = content[layout.data_start..].to_vec();
		let description = match content {
			Cow::Borrowed(content) => Cow::Borrowed(&content[layout.description]),
			Cow::Owned(content) => Cow::Owned(content[layout.description].to_vec()),
		};

		Ok(Self {
			encoding: layout.encoding,
			mime_type: layout.mime_type,
			picture_type: layout.picture_type,
			description,
			data,
		})
	}

	/// Create a new front cover, with an empty description
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2::{PictureContent, PictureType};
	///
	/// let cover = PictureContent::front_cover("image/png", vec![0x89, b'P', b'N', b'G']);
	/// assert_eq!(cover.picture_type, PictureType::CoverFront);
	/// assert_eq!(cover.as_bytes(), b"\x00image/png\0\x03\0\x89PNG");
	/// ```
	pub fn front_cover(mime_type: &str, data: Vec<u8>) -> Self {
		Self {
			encoding: TextEncoding::Latin1,
			mime_type: mime_type.to_owned(),
			picture_type: PictureType::CoverFront,
			description: Cow::Borrowed(&[]),
			data,
		}
	}

	/// Decode the description
	///
	/// # Errors
	///
	/// The description can't be decoded using [`PictureContent::encoding`]
	pub fn description_text(&self) -> Result<String> {
		decode_str(&self.description, self.encoding)
	}

	/// Detach the description from the frame it was read from
	pub fn into_owned(self) -> PictureContent<'static> {
		PictureContent {
			encoding: self.encoding,
			mime_type: self.mime_type,
			picture_type: self.picture_type,
			description: Cow::Owned(self.description.into_owned()),
			data: self.data,
		}
	}

	/// The ID3v2.3 frame payload
	///
	/// The MIME type is written as Latin-1, characters outside of it are replaced with `?`.
	pub fn as_bytes(&self) -> Vec<u8> {
		let mut bytes = Vec::with_capacity(
			self.mime_type.len() + self.description.len() + self.data.len() + 6,
		);

		bytes.push(self.encoding as u8);
		bytes.extend(
			self.mime_type
				.chars()
				.map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?')),
		);
		bytes.push(0);
		bytes.push(self.picture_type.as_u8());
		bytes.extend_from_slice(&self.description);
		bytes.extend_from_slice(self.encoding.terminator());
		bytes.extend_from_slice(&self.data);
		bytes
	}
}

fn parse_layout(content: &[u8], version: Id3v2Version) -> Result<PictureLayout> {
	let Some((encoding, rest)) = content.split_first() else {
		err!(BadFrameLength);
	};
	let encoding = TextEncoding::from_u8_checked(*encoding)?;

	let mut pos = 1;

	let mime_type;
	if version == Id3v2Version::V2 {
		let Some(format) = rest.get(..3) else {
			err!(BadFrameLength);
		};

		mime_type = format!("image/{}", latin1_decode(format).to_ascii_lowercase());
		pos += 3;
	} else {
		let Some(end) = rest.iter().position(|b| *b == 0) else {
			err!(BadFrameLength);
		};

		mime_type = latin1_decode(&rest[..end]);
		pos += end + 1;
	}

	let Some(picture_type) = content.get(pos) else {
		err!(BadFrameLength);
	};
	let picture_type = PictureType::from_u8(*picture_type);
	pos += 1;

	let Some(description_len) = find_terminator(&content[pos..], encoding) else {
		err!(BadFrameLength);
	};

	let description = pos..pos + description_len;
	let data_start = description.end + encoding.unit_len();

	log::trace!("Found a {mime_type} picture ({picture_type:?})");

	Ok(PictureLayout {
		encoding,
		mime_type,
		picture_type,
		description,
		data_start,
	})
}

#[cfg(test)]
mod tests {
	use super::{PictureContent, PictureType};
	use crate::error::ErrorKind;
	use crate::frame::{Frame, FrameId};
	use crate::header::Id3v2Version;
	use crate::util::text::TextEncoding;

	use std::borrow::Cow;

	fn picture_frame(payload: &[u8], version: Id3v2Version) -> Frame {
		let mut frame = Frame::new(FrameId::new("APIC").unwrap(), payload.to_vec());
		frame.version = version;
		frame
	}

	#[test_log::test]
	fn v22_format_code() {
		let frame = picture_frame(b"\x00JPG\x03Cover\0\xFF\xD8\xFF", Id3v2Version::V2);
		let picture = PictureContent::parse(&frame).unwrap();

		assert_eq!(picture.mime_type, "image/jpg");
		assert_eq!(picture.picture_type, PictureType::CoverFront);
		assert_eq!(&*picture.description, b"Cover");
		assert_eq!(picture.data, [0xFF, 0xD8, 0xFF]);
	}

	#[test_log::test]
	fn v23_mime_type() {
		let frame = picture_frame(b"\x00image/png\0\x04\0\x89PNG\0\0", Id3v2Version::V3);
		let picture = PictureContent::parse(&frame).unwrap();

		assert_eq!(picture.mime_type, "image/png");
		assert_eq!(picture.picture_type, PictureType::CoverBack);
		assert!(picture.description.is_empty());
		// Zeros in the image aren't terminators
		assert_eq!(picture.data, b"\x89PNG\0\0");
		assert!(matches!(picture.description, Cow::Borrowed(_)));
	}

	#[test_log::test]
	fn utf16_description() {
		let payload = [
			0x01, b'i', b'm', b'a', b'g', b'e', b'/', b'j', b'p', b'e', b'g', 0x00, 0x03,
			0xFF, 0xFE, b'A', 0x00, 0x00, 0x00, // "A", UTF-16LE
			0xFF, 0xD8,
		];
		let frame = picture_frame(&payload, Id3v2Version::V4);
		let picture = PictureContent::parse(&frame).unwrap();

		assert_eq!(picture.encoding, TextEncoding::UTF16);
		assert_eq!(picture.description_text().unwrap(), "A");
		assert_eq!(picture.data, [0xFF, 0xD8]);
	}

	#[test_log::test]
	fn truncated() {
		for (payload, version) in [
			(&b""[..], Id3v2Version::V3),
			(&b"\x00JP"[..], Id3v2Version::V2),
			(&b"\x00image/png"[..], Id3v2Version::V3),
			(&b"\x00image/png\0"[..], Id3v2Version::V3),
			(&b"\x00image/png\0\x03no terminator"[..], Id3v2Version::V3),
		] {
			let err = PictureContent::parse(&picture_frame(payload, version)).unwrap_err();
			assert!(matches!(err.kind(), ErrorKind::BadFrameLength), "{payload:?}");
		}
	}

	#[test_log::test]
	fn as_bytes_round_trip() {
		let cover = PictureContent::front_cover("image/jpeg", vec![0xFF, 0xD8, 0x00]);
		let frame = picture_frame(&cover.as_bytes(), Id3v2Version::V3);

		assert_eq!(PictureContent::parse(&frame).unwrap(), cover);
	}

	#[test_log::test]
	fn picture_type_codes() {
		for byte in 0..=u8::MAX {
			assert_eq!(PictureType::from_u8(byte).as_u8(), byte);
		}

		assert_eq!(PictureType::from_u8(21), PictureType::Undefined(21));
	}
}
