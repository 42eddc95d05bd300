use crate::error::Result;
use crate::macros::err;

/// The text encoding for use in ID3v2 frames
#[derive(Debug, Clone, Eq, PartialEq, Copy, Hash, Default)]
#[repr(u8)]
pub enum TextEncoding {
	/// ISO-8859-1
	#[default]
	Latin1 = 0,
	/// UTF-16 with a byte order mark
	UTF16 = 1,
	/// UTF-16 big endian
	UTF16BE = 2,
	/// UTF-8
	UTF8 = 3,
}

impl TextEncoding {
	/// Get a `TextEncoding` from a u8, must be 0-3 inclusive
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2::TextEncoding;
	///
	/// assert_eq!(TextEncoding::from_u8(1), Some(TextEncoding::UTF16));
	/// assert_eq!(TextEncoding::from_u8(4), None);
	/// ```
	pub fn from_u8(byte: u8) -> Option<Self> {
		match byte {
			0 => Some(Self::Latin1),
			1 => Some(Self::UTF16),
			2 => Some(Self::UTF16BE),
			3 => Some(Self::UTF8),
			_ => None,
		}
	}

	pub(crate) fn from_u8_checked(byte: u8) -> Result<Self> {
		match Self::from_u8(byte) {
			Some(encoding) => Ok(encoding),
			None => err!(BadTextEncoding(byte)),
		}
	}

	/// The width of a single code unit (and therefore a terminator) in bytes
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2::TextEncoding;
	///
	/// assert_eq!(TextEncoding::UTF8.unit_len(), 1);
	/// assert_eq!(TextEncoding::UTF16BE.unit_len(), 2);
	/// ```
	pub fn unit_len(self) -> usize {
		match self {
			Self::Latin1 | Self::UTF8 => 1,
			Self::UTF16 | Self::UTF16BE => 2,
		}
	}

	pub(crate) fn terminator(self) -> &'static [u8] {
		match self.unit_len() {
			1 => &[0],
			_ => &[0, 0],
		}
	}
}

/// Find the start of the first terminator in `content`
///
/// For double width encodings, only units aligned to the start of `content` are considered.
pub(crate) fn find_terminator(content: &[u8], encoding: TextEncoding) -> Option<usize> {
	match encoding.unit_len() {
		1 => content.iter().position(|b| *b == 0),
		_ => content
			.chunks_exact(2)
			.position(|unit| unit == [0, 0])
			.map(|unit_idx| unit_idx * 2),
	}
}

/// Decode a single, unterminated string
pub(crate) fn decode_str(content: &[u8], encoding: TextEncoding) -> Result<String> {
	match encoding {
		TextEncoding::Latin1 => Ok(latin1_decode(content)),
		TextEncoding::UTF8 => Ok(String::from_utf8(content.to_vec())?),
		TextEncoding::UTF16 => utf16_decode_bom(content),
		TextEncoding::UTF16BE => utf16_decode(content, u16::from_be_bytes),
	}
}

pub(crate) fn latin1_decode(content: &[u8]) -> String {
	content.iter().map(|c| char::from(*c)).collect()
}

fn utf16_decode_bom(content: &[u8]) -> Result<String> {
	match content {
		[0xFF, 0xFE, rest @ ..] => utf16_decode(rest, u16::from_le_bytes),
		[0xFE, 0xFF, rest @ ..] => utf16_decode(rest, u16::from_be_bytes),
		_ => {
			log::warn!("UTF-16 string has no byte order mark, assuming big endian");
			utf16_decode(content, u16::from_be_bytes)
		},
	}
}

fn utf16_decode(content: &[u8], endianness: fn([u8; 2]) -> u16) -> Result<String> {
	if content.len() % 2 != 0 {
		err!(TextDecode("UTF-16 string has an odd length"));
	}

	let units = content
		.chunks_exact(2)
		.map(|unit| endianness([unit[0], unit[1]]));

	match char::decode_utf16(units).collect::<std::result::Result<String, _>>() {
		Ok(text) => Ok(text),
		Err(_) => err!(TextDecode("Given an invalid UTF-16 string")),
	}
}

/// Encode a string, **without** a terminator
pub(crate) fn encode_text(text: &str, encoding: TextEncoding) -> Result<Vec<u8>> {
	match encoding {
		TextEncoding::Latin1 => {
			let mut out = Vec::with_capacity(text.len());
			for c in text.chars() {
				match u8::try_from(u32::from(c)) {
					Ok(byte) => out.push(byte),
					Err(_) => err!(TextEncode("Given a character that Latin-1 can't represent")),
				}
			}

			Ok(out)
		},
		TextEncoding::UTF16 => {
			let mut out = vec![0xFF, 0xFE];
			out.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
			Ok(out)
		},
		TextEncoding::UTF16BE => Ok(text.encode_utf16().flat_map(u16::to_be_bytes).collect()),
		TextEncoding::UTF8 => Ok(text.as_bytes().to_vec()),
	}
}
