use super::TextContent;
use crate::error::Result;
use crate::frame::Frame;
use crate::macros::err;
use crate::util::text::{TextEncoding, decode_str, encode_text, find_terminator};

/// The content of a `COMM` frame
///
/// ```text
/// encoding (1) | language (3) | description | terminator | text
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CommentContent {
	/// The encoding of the description and text
	pub encoding: TextEncoding,
	/// ISO-639-2 language code (3 bytes)
	pub language: [u8; 3],
	/// Unique content description
	pub description: String,
	/// The actual comment, normalized like any other text
	pub content: TextContent,
}

impl CommentContent {
	/// Create a new `CommentContent`
	///
	/// # Errors
	///
	/// `description` or `text` can't be represented in `encoding`
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2::{CommentContent, TextEncoding};
	///
	/// # fn main() -> id3v2::error::Result<()> {
	/// let comment = CommentContent::new(TextEncoding::Latin1, *b"eng", "", "Great song")?;
	/// assert_eq!(comment.as_bytes()?, b"\x00eng\0Great song\0");
	/// # Ok(()) }
	/// ```
	pub fn new(
		encoding: TextEncoding,
		language: [u8; 3],
		description: &str,
		text: &str,
	) -> Result<Self> {
		Ok(Self {
			encoding,
			language,
			description: description.to_owned(),
			content: TextContent::new(encoding, text)?,
		})
	}

	/// Read the comment content of a frame
	///
	/// NOTE: This doesn't check the frame ID, see [`Frame::comment_content`].
	///
	/// # Errors
	///
	/// * The payload is too short, or the description has no terminator
	/// * The encoding byte is invalid
	/// * The description can't be decoded
	/// * See [`Frame::content`]
	pub fn parse(frame: &Frame) -> Result<Self> {
		let content = frame.content()?;
		let Some((&[encoding, l1, l2, l3], rest)) = content.split_first_chunk::<4>() else {
			err!(BadFrameLength);
		};

		let encoding = TextEncoding::from_u8_checked(encoding)?;

		let Some(description_end) = find_terminator(rest, encoding) else {
			err!(BadFrameLength);
		};

		let description = decode_str(&rest[..description_end], encoding)?;
		let text = &rest[description_end + encoding.unit_len()..];

		Ok(Self {
			encoding,
			language: [l1, l2, l3],
			description,
			content: TextContent::from_raw(encoding, text),
		})
	}

	/// Decode the first value of the comment
	///
	/// # Errors
	///
	/// See [`TextContent::text`]
	pub fn text(&self) -> Result<String> {
		self.content.text()
	}

	/// The frame payload
	///
	/// The comment is written in [`CommentContent::encoding`], regardless of the encoding
	/// [`CommentContent::content`] has.
	///
	/// # Errors
	///
	/// The description or text can't be represented in the encoding
	pub fn as_bytes(&self) -> Result<Vec<u8>> {
		let mut bytes = vec![self.encoding as u8];
		bytes.extend_from_slice(&self.language);
		bytes.extend(encode_text(&self.description, self.encoding)?);
		bytes.extend_from_slice(self.encoding.terminator());

		if self.content.encoding == self.encoding {
			bytes.extend_from_slice(self.content.terminated_text());
		} else {
			let text = TextContent::new(self.encoding, &self.content.text()?)?;
			bytes.extend_from_slice(text.terminated_text());
		}

		Ok(bytes)
	}
}
