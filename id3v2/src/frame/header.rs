use super::{FrameId, is_valid_frame_id};
use crate::header::Id3v2Version;
use crate::util::synchsafe::SynchsafeInteger;
use crate::util::upgrade::upgrade_v2;

use byteorder::{BigEndian, ByteOrder};

/// The shape of a frame header for a single ID3v2 version
///
/// ```text
/// v2.2: id(3) | size(3, big endian) | payload
/// v2.3: id(4) | size(4, big endian) | flags(2) | payload
/// v2.4: id(4) | size(4, synchsafe)  | flags(2) | payload
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct FrameLayout {
	pub(crate) id_len: usize,
	pub(crate) size_len: usize,
	pub(crate) synchsafe_size: bool,
	pub(crate) flags_len: usize,
}

impl FrameLayout {
	pub(crate) const V2: Self = Self {
		id_len: 3,
		size_len: 3,
		synchsafe_size: false,
		flags_len: 0,
	};
	pub(crate) const V3: Self = Self {
		id_len: 4,
		size_len: 4,
		synchsafe_size: false,
		flags_len: 2,
	};
	pub(crate) const V4: Self = Self {
		id_len: 4,
		size_len: 4,
		synchsafe_size: true,
		flags_len: 2,
	};

	pub(crate) fn for_version(version: Id3v2Version) -> Self {
		match version {
			Id3v2Version::V2 => Self::V2,
			Id3v2Version::V3 => Self::V3,
			Id3v2Version::V4 => Self::V4,
		}
	}

	pub(crate) fn header_len(self) -> usize {
		self.id_len + self.size_len + self.flags_len
	}
}

/// The ID of a frame header, after ID3v2.2 translation
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum HeaderId {
	Known(FrameId),
	/// A valid ID3v2.2 ID that has no ID3v2.3 counterpart
	UnknownLegacy([u8; 3]),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct FrameHeader {
	pub(crate) id: HeaderId,
	pub(crate) size: u32,
	pub(crate) flags: u16,
}

/// Parse the frame header at the start of `bytes`
///
/// `None` means there is no frame here, either because there isn't enough room for a header or
/// because the ID contains invalid characters (padding).
pub(crate) fn parse_header(bytes: &[u8], layout: FrameLayout) -> Option<FrameHeader> {
	let header = bytes.get(..layout.header_len())?;

	let (id_bytes, rest) = header.split_at(layout.id_len);
	if !is_valid_frame_id(id_bytes) {
		log::trace!("Invalid frame ID {id_bytes:02X?}, assuming padding");
		return None;
	}

	let (size_bytes, flag_bytes) = rest.split_at(layout.size_len);

	let mut size = BigEndian::read_uint(size_bytes, layout.size_len) as u32;
	if layout.synchsafe_size {
		size = size.unsynch();
	}

	let flags = match flag_bytes {
		[hi, lo] => u16::from_be_bytes([*hi, *lo]),
		_ => 0,
	};

	let id = match *id_bytes {
		[a, b, c] => {
			let legacy = [a, b, c];
			// The ID is already known to be ASCII
			let upgraded = std::str::from_utf8(&legacy).ok().and_then(upgrade_v2);
			match upgraded.map(FrameId::new) {
				Some(Ok(id)) => HeaderId::Known(id),
				_ => HeaderId::UnknownLegacy(legacy),
			}
		},
		[a, b, c, d] => HeaderId::Known(FrameId([a, b, c, d])),
		_ => return None,
	};

	Some(FrameHeader { id, size, flags })
}
