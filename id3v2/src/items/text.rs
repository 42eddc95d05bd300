use crate::error::Result;
use crate::frame::Frame;
use crate::macros::err;
use crate::util::text::{TextEncoding, decode_str, encode_text, find_terminator};

/// The content of a text information frame (`T***`)
///
/// The data is normalized to always end with two terminators (one for the final string, one for
/// the list), sized according to the encoding.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextContent {
	/// The encoding of the text
	pub encoding: TextEncoding,
	pub(crate) data: Vec<u8>,
}

impl TextContent {
	/// Create a `TextContent` holding a single value
	///
	/// # Errors
	///
	/// `text` can't be represented in `encoding`
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2::{TextContent, TextEncoding};
	///
	/// # fn main() -> id3v2::error::Result<()> {
	/// let content = TextContent::new(TextEncoding::Latin1, "Foo")?;
	/// assert_eq!(content.data(), b"Foo\0\0");
	/// assert_eq!(content.text()?, "Foo");
	/// # Ok(()) }
	/// ```
	pub fn new(encoding: TextEncoding, text: &str) -> Result<Self> {
		Ok(Self::from_raw(encoding, &encode_text(text, encoding)?))
	}

	/// Read the text content of a frame
	///
	/// NOTE: This doesn't check the frame ID, see [`Frame::text_content`].
	///
	/// # Errors
	///
	/// * The payload is empty
	/// * The encoding byte is invalid
	/// * See [`Frame::content`]
	pub fn parse(frame: &Frame) -> Result<Self> {
		let content = frame.content()?;
		let Some((encoding, text)) = content.split_first() else {
			err!(BadFrameLength);
		};

		let encoding = TextEncoding::from_u8_checked(*encoding)?;
		Ok(Self::from_raw(encoding, text))
	}

	/// Copy `text`, appending however many terminators are missing
	///
	/// A dangling byte in a double width encoding isn't a unit, and is dropped.
	pub(crate) fn from_raw(encoding: TextEncoding, text: &[u8]) -> Self {
		let unit_len = encoding.unit_len();

		let aligned = &text[..text.len() - text.len() % unit_len];
		if aligned.len() != text.len() {
			log::debug!("Dropping a dangling byte from {encoding:?} text");
		}

		let terminators = aligned
			.rchunks_exact(unit_len)
			.take(2)
			.take_while(|unit| unit.iter().all(|b| *b == 0))
			.count();

		let mut data = aligned.to_vec();
		data.resize(aligned.len() + (2 - terminators) * unit_len, 0);

		Self { encoding, data }
	}

	/// The normalized text, including its terminators
	pub fn data(&self) -> &[u8] {
		&self.data
	}

	/// The size of the normalized text
	pub fn size(&self) -> usize {
		self.data.len()
	}

	/// Decode every value
	///
	/// ID3v2.4 allows multiple values separated by terminators. Earlier versions only ever have
	/// one.
	///
	/// # Errors
	///
	/// A value can't be decoded using [`TextContent::encoding`]
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2::{Frame, FrameId};
	///
	/// # fn main() -> id3v2::error::Result<()> {
	/// let frame = Frame::new(FrameId::new("TPE1")?, b"\x03Foo\0Bar".to_vec());
	/// let content = frame.text_content()?.expect("TPE1 is a text frame");
	///
	/// assert_eq!(content.values()?, ["Foo", "Bar"]);
	/// # Ok(()) }
	/// ```
	pub fn values(&self) -> Result<Vec<String>> {
		let unit_len = self.encoding.unit_len();

		let mut values = Vec::new();
		let mut rest = self.data.as_slice();
		loop {
			// The data always ends with a terminator
			let Some(end) = find_terminator(rest, self.encoding) else {
				break;
			};

			let value = &rest[..end];
			rest = &rest[end + unit_len..];

			// The list terminator
			if value.is_empty() && rest.is_empty() && !values.is_empty() {
				break;
			}

			values.push(decode_str(value, self.encoding)?);
		}

		Ok(values)
	}

	/// Decode the first value
	///
	/// # Errors
	///
	/// See [`TextContent::values`]
	pub fn text(&self) -> Result<String> {
		Ok(self.values()?.into_iter().next().unwrap_or_default())
	}

	/// The frame payload: the encoding byte followed by the text
	///
	/// Only the string terminator is written, the list terminator is implied by the frame size.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2::{TextContent, TextEncoding};
	///
	/// # fn main() -> id3v2::error::Result<()> {
	/// let content = TextContent::new(TextEncoding::UTF8, "Foo")?;
	/// assert_eq!(content.as_bytes(), b"\x03Foo\0");
	/// # Ok(()) }
	/// ```
	pub fn as_bytes(&self) -> Vec<u8> {
		let text = self.terminated_text();

		let mut bytes = Vec::with_capacity(text.len() + 1);
		bytes.push(self.encoding as u8);
		bytes.extend_from_slice(text);
		bytes
	}

	/// The text with a single terminator
	pub(crate) fn terminated_text(&self) -> &[u8] {
		let end = self.data.len().saturating_sub(self.encoding.unit_len());
		&self.data[..end]
	}
}
