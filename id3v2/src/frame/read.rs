use super::header::{FrameLayout, HeaderId, parse_header};
use super::{ATTACHED_PICTURE_ID, Frame};
use crate::config::{ParseOptions, ParsingMode};
use crate::error::Result;
use crate::header::Id3v2Version;
use crate::macros::err;

pub(crate) enum ParsedFrame {
	Next(Frame),
	Skip,
	Eof,
}

impl ParsedFrame {
	/// Attempt to read the frame at the start of `bytes`
	///
	/// The second value is the number of bytes the frame (header included) occupies, which is `0`
	/// for [`ParsedFrame::Eof`].
	pub(crate) fn read(
		bytes: &[u8],
		version: Id3v2Version,
		layout: FrameLayout,
		parse_options: ParseOptions,
	) -> Result<(Self, usize)> {
		let Some(header) = parse_header(bytes, layout) else {
			// Stop reading
			return Ok((Self::Eof, 0));
		};

		let id = match header.id {
			HeaderId::Known(id) => Some(id),
			HeaderId::UnknownLegacy(id) => match parse_options.parsing_mode {
				ParsingMode::Strict => err!(UnknownLegacyFrameId(id)),
				ParsingMode::BestAttempt => {
					log::debug!(
						"Unknown ID3v2.2 frame ID \"{}\", treating as the end of the frames",
						String::from_utf8_lossy(&id)
					);
					return Ok((Self::Eof, 0));
				},
				ParsingMode::Relaxed => None,
			},
		};

		let header_len = layout.header_len();
		let end = header_len + header.size as usize;
		let Some(data) = bytes.get(header_len..end) else {
			log::debug!(
				"Frame declares {} bytes, only {} remain",
				header.size,
				bytes.len() - header_len
			);
			err!(TruncatedData);
		};

		let Some(id) = id else {
			log::warn!("Skipping an ID3v2.2 frame with an unknown ID");
			return Ok((Self::Skip, end));
		};

		if !parse_options.read_cover_art && id == ATTACHED_PICTURE_ID {
			log::trace!("Skipping attached picture");
			return Ok((Self::Skip, end));
		}

		log::trace!("Parsed frame {id} ({} bytes)", header.size);

		let frame = Frame {
			id,
			flags: header.flags,
			data: data.to_vec(),
			version,
		};

		Ok((Self::Next(frame), end))
	}
}

pub(super) fn parse_single_frame(bytes: &[u8], version: Id3v2Version) -> Result<Option<Frame>> {
	let parse_options = ParseOptions::new().parsing_mode(ParsingMode::Strict);

	let (parsed, _) = ParsedFrame::read(
		bytes,
		version,
		FrameLayout::for_version(version),
		parse_options,
	)?;

	match parsed {
		ParsedFrame::Next(frame) => Ok(Some(frame)),
		ParsedFrame::Skip | ParsedFrame::Eof => Ok(None),
	}
}
