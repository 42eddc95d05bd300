//! Reading and writing ID3v2 tags
//!
//! This crate reads ID3v2.2, ID3v2.3, and ID3v2.4 tags from the start of a file (or any other
//! reader), and writes them back as ID3v2.3.0.
//!
//! Frames are kept as they were read, and only decoded on request. The most common ones have
//! accessors on [`Id3v2Tag`], anything else can be reached through [`Id3v2Tag::get`] and the
//! [`Frame`] content accessors.
//!
//! # Examples
//!
//! ## Reading a tag
//!
//! ```rust,no_run
//! use id3v2::config::ParseOptions;
//!
//! # fn main() -> id3v2::error::Result<()> {
//! let Some(tag) = id3v2::read_from_path("foo.mp3", ParseOptions::new())? else {
//! 	println!("No tag found!");
//! 	return Ok(());
//! };
//!
//! println!("Title: {:?}", tag.title()?);
//! println!("Artist: {:?}", tag.artist()?);
//!
//! for frame in tag.frames() {
//! 	println!("{}: {} bytes", frame.id(), frame.size());
//! }
//! # Ok(()) }
//! ```
//!
//! ## Editing a tag
//!
//! ```rust,no_run
//! use id3v2::config::{ParseOptions, WriteOptions};
//! use id3v2::{Id3v2Tag, TextEncoding};
//!
//! # fn main() -> id3v2::error::Result<()> {
//! let mut tag = id3v2::read_from_path("foo.mp3", ParseOptions::new())?.unwrap_or_default();
//!
//! tag.set_title("Foo", TextEncoding::UTF16)?;
//! tag.set_comment("Written by id3v2", TextEncoding::Latin1)?;
//! tag.remove_album_cover();
//!
//! // Everything after the old tag is moved to make room for the new one
//! tag.save_to_path("foo.mp3", WriteOptions::default())?;
//! # Ok(()) }
//! ```
//!
//! # Features
//!
//! * `id3v2_compression_support` (default): Inflate compressed frames, see [`Frame::content`]

pub mod config;
pub mod error;
mod frame;
mod header;
mod items;
pub(crate) mod macros;
mod read;
mod tag;
pub mod util;
mod write;

pub use crate::frame::{Frame, FrameFlags, FrameId, FrameKind};
pub use crate::header::{Id3v2Header, Id3v2Version};
pub use crate::items::{CommentContent, PictureContent, PictureType, TextContent};
pub use crate::tag::Id3v2Tag;

pub use util::text::TextEncoding;

pub use util::io;

use crate::error::{Id3v2Error, Result};
use crate::util::io::{FileLike, Truncate};

use std::fs::{File, OpenOptions};
use std::io::{BufReader, Read};
use std::path::Path;

/// Read a tag from the current position of `reader`
///
/// This returns `None` if there is no tag, or the tag uses a version/feature that can't be read
/// (ID3v2.2 compression, or a major version other than 2, 3, and 4).
///
/// The reader is left at the end of the tag, after the footer if there is one. Nothing is read
/// past it.
///
/// # Errors
///
/// * The tag is truncated ([`ErrorKind::TruncatedData`](error::ErrorKind::TruncatedData))
/// * A frame declares a size that runs past the end of the tag
/// * [`ParsingMode::Strict`](config::ParsingMode::Strict) and an unknown ID3v2.2 frame
/// * [`std::io::Error`]
///
/// # Examples
///
/// ```rust
/// use id3v2::config::ParseOptions;
/// use std::io::Cursor;
///
/// # fn main() -> id3v2::error::Result<()> {
/// let mut bytes = b"ID3\x04\x00\x00\x00\x00\x00\x10".to_vec();
/// bytes.extend(b"TPE1\x00\x00\x00\x06\x00\x00\x03Foo\0\0");
/// bytes.extend(b"audio");
///
/// let mut reader = Cursor::new(bytes);
/// let tag = id3v2::read_from(&mut reader, ParseOptions::new())?.expect("should find a tag");
///
/// assert_eq!(tag.artist()?.as_deref(), Some("Foo"));
/// assert_eq!(reader.position(), 26);
/// # Ok(()) }
/// ```
pub fn read_from<R>(reader: &mut R, parse_options: config::ParseOptions) -> Result<Option<Id3v2Tag>>
where
	R: Read,
{
	read::read_tag(reader, parse_options)
}

/// Read a tag from the start of the file at `path`
///
/// # Errors
///
/// See [`read_from`]
pub fn read_from_path<P>(path: P, parse_options: config::ParseOptions) -> Result<Option<Id3v2Tag>>
where
	P: AsRef<Path>,
{
	let file = File::open(path.as_ref())?;
	read_from(&mut BufReader::new(file), parse_options)
}

/// Remove the tag from the start of `file`
///
/// Returns whether a tag was found and removed. Everything after the tag is preserved.
///
/// # Errors
///
/// * [`std::io::Error`]
/// * The truncation error of `F`
///
/// # Examples
///
/// ```rust
/// use std::io::Cursor;
///
/// # fn main() -> id3v2::error::Result<()> {
/// let mut file = Cursor::new(b"ID3\x03\x00\x00\x00\x00\x00\x04\0\0\0\0audio".to_vec());
///
/// assert!(id3v2::remove_from(&mut file)?);
/// assert_eq!(file.get_ref(), b"audio");
/// # Ok(()) }
/// ```
pub fn remove_from<F>(file: &mut F) -> Result<bool>
where
	F: FileLike,
	Id3v2Error: From<<F as Truncate>::Error>,
{
	write::remove_tag(file)
}

/// Remove the tag from the start of the file at `path`
///
/// # Errors
///
/// See [`remove_from`]
pub fn remove_from_path<P>(path: P) -> Result<bool>
where
	P: AsRef<Path>,
{
	let mut file = OpenOptions::new()
		.read(true)
		.write(true)
		.open(path.as_ref())?;

	remove_from(&mut file)
}
