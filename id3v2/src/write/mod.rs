//! Tag serialization and in-place file rewriting
//!
//! Tags are always written as ID3v2.3.0, regardless of the version they were read from.
//!
//! Rewriting a file copies everything after the existing tag into an anonymous temporary file,
//! writes the new tag at the start of the file, copies the audio back, and truncates. There is no
//! `fsync` or rename step. If the process dies (or an I/O error occurs) partway through, the file
//! may be left corrupted.

mod frame;

#[cfg(test)]
pub(crate) use frame::FRAME_HEADER_LEN;

use crate::config::WriteOptions;
use crate::error::{Id3v2Error, Result};
use crate::header::{HEADER_LEN, Id3v2Header};
use crate::macros::err;
use crate::tag::Id3v2Tag;
use crate::util::io::{FileLike, Truncate};

use std::io::{Read, Seek, SeekFrom};

/// Serialize a tag: header, frames, then padding
///
/// Returns the header that was written along with the full tag.
pub(crate) fn create_tag(tag: &Id3v2Tag, write_options: WriteOptions) -> Result<(Id3v2Header, Vec<u8>)> {
	let padding_len = write_options.preferred_padding.unwrap_or(0) as usize;

	let mut frames = Vec::new();
	for frame in tag.frames() {
		frame::write_frame(&mut frames, frame)?;
	}

	let Ok(size) = u32::try_from(frames.len() + padding_len) else {
		err!(TooMuchData);
	};

	let header = Id3v2Header::new_v23(size);
	log::debug!(
		"Creating ID3v2.3 tag, {} frames, size: {size} (padding: {padding_len})",
		tag.len()
	);

	let mut bytes = Vec::with_capacity(HEADER_LEN + frames.len() + padding_len);
	bytes.extend_from_slice(&header.as_bytes()?);
	bytes.append(&mut frames);
	bytes.resize(bytes.len() + padding_len, 0);

	Ok((header, bytes))
}

/// Find the end of any tag at the start of `file`
///
/// `0` if there is no tag. The file is rewound.
fn existing_tag_end<R>(file: &mut R) -> Result<u64>
where
	R: Read + Seek,
{
	file.rewind()?;

	let mut header = [0; HEADER_LEN];
	let end = match file.read_exact(&mut header) {
		Ok(()) => Id3v2Header::tag_size_of(&header).unwrap_or(0),
		Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => 0,
		Err(e) => return Err(e.into()),
	};

	file.rewind()?;

	log::debug!("Existing tag ends at offset {end}");
	Ok(end)
}

/// Replace `file[..region_end]` with `replacement`
fn replace_start<F>(file: &mut F, region_end: u64, replacement: &[u8]) -> Result<()>
where
	F: FileLike,
	Id3v2Error: From<<F as Truncate>::Error>,
{
	let mut tail = tempfile::tempfile()?;

	file.seek(SeekFrom::Start(region_end))?;
	let tail_len = std::io::copy(file, &mut tail)?;
	tail.rewind()?;

	log::trace!("Moving {tail_len} bytes of audio");

	file.rewind()?;
	file.write_all(replacement)?;
	std::io::copy(&mut tail, file)?;

	let new_len = file.stream_position()?;
	file.truncate(new_len)?;

	file.rewind()?;
	Ok(())
}

/// Write `tag` to the start of `file`, replacing any existing tag
///
/// Returns the header that was written.
pub(crate) fn write_tag<F>(
	file: &mut F,
	tag: &Id3v2Tag,
	write_options: WriteOptions,
) -> Result<Id3v2Header>
where
	F: FileLike,
	Id3v2Error: From<<F as Truncate>::Error>,
{
	let (header, bytes) = create_tag(tag, write_options)?;

	let old_tag_end = existing_tag_end(file)?;
	replace_start(file, old_tag_end, &bytes)?;

	Ok(header)
}

/// Remove the tag from the start of `file`, if one exists
///
/// Returns whether a tag was removed.
pub(crate) fn remove_tag<F>(file: &mut F) -> Result<bool>
where
	F: FileLike,
	Id3v2Error: From<<F as Truncate>::Error>,
{
	let old_tag_end = existing_tag_end(file)?;
	if old_tag_end == 0 {
		log::debug!("No tag to remove");
		return Ok(false);
	}

	replace_start(file, old_tag_end, &[])?;
	Ok(true)
}
