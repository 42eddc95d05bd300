use crate::config::ParseOptions;
use crate::error::{Id3v2Error, Result};
use crate::frame::header::FrameLayout;
use crate::frame::read::ParsedFrame;
use crate::header::{EXTENDED_HEADER_SIZE_LEN, HEADER_LEN, Id3v2Header, Id3v2Version};
use crate::macros::{err, try_vec};
use crate::tag::Id3v2Tag;
use crate::util::synchsafe::reverse_unsynchronisation;

use std::borrow::Cow;
use std::io::{ErrorKind as IoErrorKind, Read};

// Set on every frame of an ID3v2.4 tag with the unsynchronisation flag
const V4_FRAME_UNSYNCHRONISATION_FLAG: u16 = 0x0002;

/// Header level failures mean there is no tag to read
fn absent_tag_or<T>(result: Result<T>) -> Result<Option<T>> {
	match result {
		Ok(value) => Ok(Some(value)),
		Err(err) if err.is_absent_tag() => {
			log::debug!("No usable ID3v2 tag: {err}");
			Ok(None)
		},
		Err(err) => Err(err),
	}
}

fn supported_version(header: &Id3v2Header) -> Option<Id3v2Version> {
	let version = header.version();
	if version.is_none() {
		log::debug!(
			"Ignoring ID3v2.{}.{} tag",
			header.major_version(),
			header.minor_version()
		);
	}

	version
}

// The extended header size field is consumed along with the header
fn header_fields_len(header: &Id3v2Header) -> usize {
	if header.has_extended_header() {
		EXTENDED_HEADER_SIZE_LEN
	} else {
		0
	}
}

/// Parse a tag from the start of `bytes`
pub(crate) fn parse_tag(bytes: &[u8], parse_options: ParseOptions) -> Result<Option<Id3v2Tag>> {
	let Some(header) = absent_tag_or(Id3v2Header::parse(bytes))? else {
		return Ok(None);
	};
	let Some(version) = supported_version(&header) else {
		return Ok(None);
	};

	let start = HEADER_LEN + header_fields_len(&header);
	let end = HEADER_LEN + header.size() as usize;
	if start > end {
		err!(BadExtendedHeaderSize);
	}

	let Some(body) = bytes.get(start..end) else {
		log::debug!(
			"Tag declares {} bytes, only {} remain",
			header.size(),
			bytes.len() - HEADER_LEN
		);
		err!(TruncatedData);
	};

	read_frames(header, version, body, parse_options).map(Some)
}

/// Read a tag from the current position of `reader`
///
/// The reader is left at the end of the tag, after the footer if there is one.
pub(crate) fn read_tag<R>(reader: &mut R, parse_options: ParseOptions) -> Result<Option<Id3v2Tag>>
where
	R: Read,
{
	let Some(header) = absent_tag_or(Id3v2Header::read(reader))? else {
		return Ok(None);
	};
	let Some(version) = supported_version(&header) else {
		return Ok(None);
	};

	let Some(body_len) = (header.size() as usize).checked_sub(header_fields_len(&header)) else {
		err!(BadExtendedHeaderSize);
	};

	let mut body = try_vec![0; body_len];
	read_exact_or_truncated(reader, &mut body)?;

	if header.has_footer() {
		log::trace!("Skipping footer");
		let mut footer = [0; HEADER_LEN];
		read_exact_or_truncated(reader, &mut footer)?;
	}

	read_frames(header, version, &body, parse_options).map(Some)
}

fn read_exact_or_truncated<R>(reader: &mut R, buf: &mut [u8]) -> Result<()>
where
	R: Read,
{
	match reader.read_exact(buf) {
		Ok(()) => Ok(()),
		Err(e) if e.kind() == IoErrorKind::UnexpectedEof => err!(TruncatedData),
		Err(e) => Err(Id3v2Error::from(e)),
	}
}

fn read_frames(
	header: Id3v2Header,
	version: Id3v2Version,
	body: &[u8],
	parse_options: ParseOptions,
) -> Result<Id3v2Tag> {
	log::debug!(
		"Parsing ID3v2 tag, size: {}, version: {:?}",
		header.size(),
		version
	);

	// ID3v2.4 unsynchronises frames individually, the header flag only says that all of them are
	let v4_unsynchronised = version == Id3v2Version::V4 && header.unsynchronisation();

	let body = if header.unsynchronisation() && !v4_unsynchronised {
		log::trace!("Reversing unsynchronisation of the tag body");
		Cow::Owned(reverse_unsynchronisation(body))
	} else {
		Cow::Borrowed(body)
	};

	let extended_header_len =
		(header.extended_header_len() as usize).saturating_sub(header_fields_len(&header));
	let Some(frames) = body.get(extended_header_len..) else {
		err!(BadExtendedHeaderSize);
	};

	if extended_header_len > 0 {
		log::trace!("Skipped an extended header of {extended_header_len} bytes");
	}

	let mut tag = Id3v2Tag::with_header(header);

	let layout = FrameLayout::for_version(version);
	let mut offset = 0;
	while offset < frames.len() {
		let (parsed, consumed) =
			ParsedFrame::read(&frames[offset..], version, layout, parse_options)?;

		match parsed {
			ParsedFrame::Next(mut frame) => {
				if v4_unsynchronised {
					frame.flags |= V4_FRAME_UNSYNCHRONISATION_FLAG;
				}

				tag.frames.push(frame);
			},
			// The frame was consumed, but isn't kept
			ParsedFrame::Skip => {},
			// Padding, or something we can't read past
			ParsedFrame::Eof => break,
		}

		offset += consumed;
	}

	log::debug!("Read {} frames", tag.frames.len());

	Ok(tag)
}
