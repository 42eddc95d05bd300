
use crate::config::{ParseOptions, WriteOptions};
use crate::error::{Id3v2Error, Result};
use crate::frame::{ATTACHED_PICTURE_ID, COMMENT_ID, Frame, FrameId};
use crate::header::Id3v2Header;
use crate::items::{CommentContent, PictureContent, TextContent};
use crate::util::io::{FileLike, Truncate};
use crate::util::text::TextEncoding;

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

const TITLE_ID: FrameId = FrameId(*b"TIT2");
const ARTIST_ID: FrameId = FrameId(*b"TPE1");
const ALBUM_ID: FrameId = FrameId(*b"TALB");
const ALBUM_ARTIST_ID: FrameId = FrameId(*b"TPE2");
const GENRE_ID: FrameId = FrameId(*b"TCON");
const TRACK_ID: FrameId = FrameId(*b"TRCK");
const YEAR_ID: FrameId = FrameId(*b"TYER");
const DISC_NUMBER_ID: FrameId = FrameId(*b"TPOS");
const COMPOSER_ID: FrameId = FrameId(*b"TCOM");

const DEFAULT_COMMENT_LANGUAGE: [u8; 3] = *b"eng";

macro_rules! impl_accessor {
	($($name:ident => $id:literal;)+) => {
		paste::paste! {
			$(
				#[doc = "Gets the first value of the `" $id "` frame"]
				///
				/// # Errors
				///
				/// The frame exists, but its content can't be decoded
				pub fn $name(&self) -> Result<Option<String>> {
					self.get_text([<$name:upper _ID>])
				}

				#[doc = "Sets the `" $id "` frame, replacing any existing one"]
				///
				/// # Errors
				///
				/// `value` can't be represented in `encoding`
				pub fn [<set_ $name>](&mut self, value: &str, encoding: TextEncoding) -> Result<()> {
					self.set_text([<$name:upper _ID>], value, encoding)
				}

				#[doc = "Removes the `" $id "` frame"]
				pub fn [<remove_ $name>](&mut self) {
					let _ = self.remove([<$name:upper _ID>]);
				}
			)+
		}
	}
}

/// An ID3v2 tag
///
/// Frames are kept in the order they were read (or inserted). When written, the tag is always an
/// ID3v2.3.0 tag.
///
/// ## Frame replacement
///
/// [`Id3v2Tag::insert`] and the setters replace an existing frame with the same ID *in place*,
/// so setting a field twice never duplicates it.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Id3v2Tag {
	pub(crate) header: Id3v2Header,
	pub(crate) frames: Vec<Frame>,
}

impl Default for Id3v2Tag {
	fn default() -> Self {
		Self::new()
	}
}

impl Id3v2Tag {
	/// Create a new empty ID3v2 tag
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2::Id3v2Tag;
	///
	/// let id3v2_tag = Id3v2Tag::new();
	/// assert!(id3v2_tag.is_empty());
	/// ```
	pub fn new() -> Self {
		Self::with_header(Id3v2Header::default())
	}

	pub(crate) fn with_header(header: Id3v2Header) -> Self {
		Self {
			header,
			frames: Vec::new(),
		}
	}

	/// Parse a tag from the start of `bytes`
	///
	/// This returns `None` if `bytes` doesn't start with a tag this codec understands.
	///
	/// # Errors
	///
	/// * The tag or one of its frames declares a size that exceeds `bytes` ([`ErrorKind::TruncatedData`](crate::error::ErrorKind::TruncatedData))
	/// * The extended header is larger than the tag
	/// * [`ParsingMode::Strict`](crate::config::ParsingMode::Strict) and an unknown ID3v2.2 frame
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2::Id3v2Tag;
	/// use id3v2::config::ParseOptions;
	///
	/// # fn main() -> id3v2::error::Result<()> {
	/// let mut bytes = b"ID3\x03\x00\x00\x00\x00\x00\x1A".to_vec();
	/// bytes.extend(b"TIT2\x00\x00\x00\x06\x00\x00\x00Title");
	/// bytes.extend([0; 10]);
	///
	/// let tag = Id3v2Tag::parse(&bytes, ParseOptions::new())?.expect("should find a tag");
	/// assert_eq!(tag.title()?.as_deref(), Some("Title"));
	///
	/// assert!(Id3v2Tag::parse(b"not a tag", ParseOptions::new())?.is_none());
	/// # Ok(()) }
	/// ```
	pub fn parse(bytes: &[u8], parse_options: ParseOptions) -> Result<Option<Self>> {
		crate::read::parse_tag(bytes, parse_options)
	}

	/// The header the tag was read with
	///
	/// After a successful [`Id3v2Tag::save_to`], this is the header that was written.
	pub fn header(&self) -> &Id3v2Header {
		&self.header
	}

	/// Returns the number of frames in the tag
	pub fn len(&self) -> usize {
		self.frames.len()
	}

	/// Whether the tag has no frames
	pub fn is_empty(&self) -> bool {
		self.frames.is_empty()
	}

	/// An iterator over the frames, in order
	pub fn frames(&self) -> impl Iterator<Item = &Frame> {
		self.frames.iter()
	}

	/// Gets the first [`Frame`] with `id`
	pub fn get(&self, id: FrameId) -> Option<&Frame> {
		self.frames.iter().find(|f| f.id() == id)
	}

	/// Gets every [`Frame`] with `id`
	///
	/// Some frames, such as comments and pictures, may legitimately appear more than once.
	pub fn get_all(&self, id: FrameId) -> impl Iterator<Item = &Frame> {
		self.frames.iter().filter(move |f| f.id() == id)
	}

	/// Inserts a [`Frame`]
	///
	/// This will replace the first frame with the same ID, keeping its position. Any later frames
	/// with that ID are removed. If there was no such frame, `frame` is appended.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2::{Frame, FrameId, Id3v2Tag};
	///
	/// # fn main() -> id3v2::error::Result<()> {
	/// let mut tag = Id3v2Tag::new();
	///
	/// let id = FrameId::new("TIT2")?;
	/// assert!(tag.insert(Frame::new(id, b"\x00Foo".to_vec())).is_none());
	///
	/// let replaced = tag.insert(Frame::new(id, b"\x00Bar".to_vec()));
	/// assert_eq!(replaced.map(|f| f.data().to_vec()), Some(b"\x00Foo".to_vec()));
	/// assert_eq!(tag.len(), 1);
	/// # Ok(()) }
	/// ```
	pub fn insert(&mut self, frame: Frame) -> Option<Frame> {
		let id = frame.id();
		let Some(pos) = self.frames.iter().position(|f| f.id() == id) else {
			self.frames.push(frame);
			return None;
		};

		let replaced = std::mem::replace(&mut self.frames[pos], frame);

		let mut idx = 0;
		self.frames.retain(|f| {
			let keep = idx <= pos || f.id() != id;
			idx += 1;
			keep
		});

		Some(replaced)
	}

	/// Removes every [`Frame`] with `id`, returning them
	pub fn remove(&mut self, id: FrameId) -> Vec<Frame> {
		let (removed, kept): (Vec<Frame>, Vec<Frame>) = std::mem::take(&mut self.frames)
			.into_iter()
			.partition(|f| f.id() == id);

		self.frames = kept;
		removed
	}

	/// Retains [`Frame`]s by evaluating the predicate
	pub fn retain<P>(&mut self, predicate: P)
	where
		P: FnMut(&Frame) -> bool,
	{
		self.frames.retain(predicate);
	}

	/// Removes every frame
	pub fn clear(&mut self) {
		self.frames.clear();
	}

	/// Decodes the first value of a text frame
	///
	/// This returns `None` if there is no frame with `id`, or it isn't a text frame.
	///
	/// # Errors
	///
	/// See [`TextContent::parse`]
	pub fn get_text(&self, id: FrameId) -> Result<Option<String>> {
		match self.get(id).map(Frame::text_content).transpose()?.flatten() {
			Some(content) => content.text().map(Some),
			None => Ok(None),
		}
	}

	/// Sets a text frame, replacing any existing frame with `id`
	///
	/// # Errors
	///
	/// `value` can't be represented in `encoding`
	pub fn set_text(&mut self, id: FrameId, value: &str, encoding: TextEncoding) -> Result<()> {
		let content = TextContent::new(encoding, value)?;
		let _ = self.insert(Frame::new(id, content.as_bytes()));
		Ok(())
	}

	impl_accessor!(
		title        => "TIT2";
		artist       => "TPE1";
		album        => "TALB";
		album_artist => "TPE2";
		genre        => "TCON";
		track        => "TRCK";
		year         => "TYER";
		disc_number  => "TPOS";
		composer     => "TCOM";
	);

	/// Decodes the first `COMM` frame
	///
	/// # Errors
	///
	/// See [`CommentContent::parse`]
	pub fn comment(&self) -> Result<Option<CommentContent>> {
		self.get(COMMENT_ID)
			.map(Frame::comment_content)
			.transpose()
			.map(Option::flatten)
	}

	/// Sets the comment, with an empty description and the language `"eng"`
	///
	/// This replaces any existing `COMM` frames.
	///
	/// # Errors
	///
	/// `value` can't be represented in `encoding`
	pub fn set_comment(&mut self, value: &str, encoding: TextEncoding) -> Result<()> {
		let content = CommentContent::new(encoding, DEFAULT_COMMENT_LANGUAGE, "", value)?;
		let _ = self.insert(Frame::new(COMMENT_ID, content.as_bytes()?));
		Ok(())
	}

	/// Removes every `COMM` frame
	pub fn remove_comment(&mut self) {
		let _ = self.remove(COMMENT_ID);
	}

	/// Decodes the first `APIC` frame
	///
	/// # Errors
	///
	/// See [`PictureContent::parse`]
	pub fn album_cover(&self) -> Result<Option<PictureContent<'_>>> {
		self.get(ATTACHED_PICTURE_ID)
			.map(Frame::picture_content)
			.transpose()
			.map(Option::flatten)
	}

	/// Sets the album cover, as a front cover with an empty description
	///
	/// This replaces any existing `APIC` frames.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2::{Id3v2Tag, PictureType};
	///
	/// # fn main() -> id3v2::error::Result<()> {
	/// let mut tag = Id3v2Tag::new();
	/// tag.set_album_cover("image/jpeg", vec![0xFF, 0xD8, 0xFF, 0xE0]);
	///
	/// let cover = tag.album_cover()?.expect("cover was just set");
	/// assert_eq!(cover.mime_type, "image/jpeg");
	/// assert_eq!(cover.picture_type, PictureType::CoverFront);
	/// assert_eq!(cover.data, [0xFF, 0xD8, 0xFF, 0xE0]);
	/// # Ok(()) }
	/// ```
	pub fn set_album_cover(&mut self, mime_type: &str, data: Vec<u8>) {
		let content = PictureContent::front_cover(mime_type, data);
		let _ = self.insert(Frame::new(ATTACHED_PICTURE_ID, content.as_bytes()));
	}

	/// Removes every `APIC` frame
	pub fn remove_album_cover(&mut self) {
		let _ = self.remove(ATTACHED_PICTURE_ID);
	}

	/// Dumps the tag to a writer
	///
	/// This will only write the tag itself (as ID3v2.3.0, with padding), it will not replace
	/// anything.
	///
	/// # Errors
	///
	/// * [`std::io::Error`]
	/// * [`ErrorKind::TooMuchData`](crate::error::ErrorKind::TooMuchData)
	pub fn dump_to<W>(&self, writer: &mut W, write_options: WriteOptions) -> Result<()>
	where
		W: Write,
	{
		let (_, bytes) = crate::write::create_tag(self, write_options)?;
		writer.write_all(&bytes)?;

		Ok(())
	}

	/// Writes the tag to the start of `file`, replacing any existing tag
	///
	/// The rest of the file is preserved.
	///
	/// # Errors
	///
	/// * [`std::io::Error`]
	/// * [`ErrorKind::TooMuchData`](crate::error::ErrorKind::TooMuchData)
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2::config::WriteOptions;
	/// use id3v2::{Id3v2Tag, TextEncoding};
	/// use std::io::Cursor;
	///
	/// # fn main() -> id3v2::error::Result<()> {
	/// let mut file = Cursor::new(b"audio".to_vec());
	///
	/// let mut tag = Id3v2Tag::new();
	/// tag.set_title("Foo", TextEncoding::UTF8)?;
	/// tag.save_to(&mut file, WriteOptions::default())?;
	///
	/// assert!(file.get_ref().starts_with(b"ID3\x03\x00"));
	/// assert!(file.get_ref().ends_with(b"audio"));
	/// # Ok(()) }
	/// ```
	pub fn save_to<F>(&mut self, file: &mut F, write_options: WriteOptions) -> Result<()>
	where
		F: FileLike,
		Id3v2Error: From<<F as Truncate>::Error>,
	{
		self.header = crate::write::write_tag(file, self, write_options)?;
		Ok(())
	}

	/// Writes the tag to the file at `path`, replacing any existing tag
	///
	/// # Errors
	///
	/// See [`Id3v2Tag::save_to`]
	pub fn save_to_path<P>(&mut self, path: P, write_options: WriteOptions) -> Result<()>
	where
		P: AsRef<Path>,
	{
		let mut file = OpenOptions::new()
			.read(true)
			.write(true)
			.open(path.as_ref())?;

		self.save_to(&mut file, write_options)
	}
}
