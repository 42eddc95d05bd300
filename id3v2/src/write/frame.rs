use crate::error::Result;
use crate::frame::Frame;
use crate::header::Id3v2Version;
use crate::macros::err;

use std::borrow::Cow;
use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

/// The size of an ID3v2.3 frame header
pub(crate) const FRAME_HEADER_LEN: usize = 10;

/// Write a frame in the ID3v2.3 layout
///
/// ```text
/// id (4) | size (4, big endian) | flags (2) | payload
/// ```
///
/// Returns the number of bytes written.
pub(crate) fn write_frame<W>(writer: &mut W, frame: &Frame) -> Result<usize>
where
	W: Write,
{
	let (flags, payload) = v3_flags_and_payload(frame)?;

	let Ok(len) = u32::try_from(payload.len()) else {
		err!(TooMuchData);
	};

	log::trace!("Writing frame {} ({len} bytes)", frame.id());

	writer.write_all(&frame.id().as_bytes())?;
	writer.write_u32::<BigEndian>(len)?;
	writer.write_u16::<BigEndian>(flags)?;
	writer.write_all(&payload)?;

	Ok(FRAME_HEADER_LEN + payload.len())
}

fn v3_flags_and_payload(frame: &Frame) -> Result<(u16, Cow<'_, [u8]>)> {
	let data = Cow::Borrowed(frame.data());

	match frame.version() {
		// No flags to carry over
		Id3v2Version::V2 => Ok((0, data)),
		Id3v2Version::V3 => Ok((frame.raw_flags(), data)),
		Id3v2Version::V4 => {
			let flags = frame.flags();
			if !flags.has_format_flags() {
				return Ok((flags.as_id3v23_bytes(), data));
			}

			// The extra bytes are laid out differently in ID3v2.3, there is nothing we can do here
			if flags.encryption {
				log::warn!(
					"Writing encrypted ID3v2.4 frame {} as-is, it may be unreadable",
					frame.id()
				);
				return Ok((flags.as_id3v23_bytes(), data));
			}

			log::debug!("Decoding frame {} to drop its ID3v2.4 format flags", frame.id());
			Ok((flags.status_only().as_id3v23_bytes(), frame.content()?))
		},
	}
}
