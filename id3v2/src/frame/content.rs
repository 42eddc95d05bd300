use super::{Frame, FrameFlags};
use crate::error::Result;
use crate::header::Id3v2Version;
use crate::macros::err;
use crate::util::synchsafe::{self, reverse_unsynchronisation};

use std::borrow::Cow;

impl Frame {
	/// The payload, with every format flag undone
	///
	/// Frames without format flags (the vast majority) are borrowed as-is. Otherwise, in order:
	///
	/// * The group identifier byte is stripped
	/// * The decompressed size / data length indicator is stripped
	/// * Per-frame unsynchronisation is reversed (ID3v2.4)
	/// * The content is inflated (requires the `id3v2_compression_support` feature)
	///
	/// # Errors
	///
	/// * The frame is encrypted
	/// * The payload is too short for the fields its flags announce
	/// * The content fails to decompress
	///
	/// # Examples
	///
	/// ```rust
	/// use id3v2::{Frame, FrameId};
	///
	/// # fn main() -> id3v2::error::Result<()> {
	/// let frame = Frame::new(FrameId::new("TIT2")?, b"\x00Title".to_vec());
	/// assert_eq!(&*frame.content()?, b"\x00Title");
	/// # Ok(()) }
	/// ```
	pub fn content(&self) -> Result<Cow<'_, [u8]>> {
		let flags = self.flags();
		if !flags.has_format_flags() {
			return Ok(Cow::Borrowed(self.data.as_slice()));
		}

		if flags.encryption {
			err!(EncryptedFrame);
		}

		match self.version {
			Id3v2Version::V2 => Ok(Cow::Borrowed(self.data.as_slice())),
			Id3v2Version::V3 => v3_content(&self.data, flags),
			Id3v2Version::V4 => v4_content(&self.data, flags),
		}
	}
}

// ID3v2.3: decompressed size (4, big endian) | group identifier (1) | content
fn v3_content(mut data: &[u8], flags: FrameFlags) -> Result<Cow<'_, [u8]>> {
	let mut decompressed_size = None;
	if flags.compression {
		log::trace!("Reading decompressed size");
		decompressed_size = Some(u32::from_be_bytes(take_array(&mut data)?));
	}

	if flags.grouping_identity {
		log::trace!("Skipping group identifier");
		let [_group] = take_array::<1>(&mut data)?;
	}

	match decompressed_size {
		Some(size) => Ok(Cow::Owned(decompress(data, size)?)),
		None => Ok(Cow::Borrowed(data)),
	}
}

// ID3v2.4: group identifier (1) | data length indicator (4, synchsafe) | content
fn v4_content(mut data: &[u8], flags: FrameFlags) -> Result<Cow<'_, [u8]>> {
	if flags.grouping_identity {
		log::trace!("Skipping group identifier");
		let [_group] = take_array::<1>(&mut data)?;
	}

	// Compressed frames are required to have the indicator, whether or not the flag is set
	let mut data_length = None;
	if flags.data_length_indicator || flags.compression {
		log::trace!("Reading data length indicator");
		data_length = Some(synchsafe::decode(take_array(&mut data)?));
	}

	let mut content = Cow::Borrowed(data);
	if flags.unsynchronisation {
		content = Cow::Owned(reverse_unsynchronisation(&content));
	}

	if flags.compression {
		let size = data_length.unwrap_or_default();
		content = Cow::Owned(decompress(&content, size)?);
	}

	Ok(content)
}

fn take_array<'a, const N: usize>(data: &mut &'a [u8]) -> Result<[u8; N]> {
	let bytes: &'a [u8] = data;
	let Some((head, rest)) = bytes.split_first_chunk::<N>() else {
		err!(BadFrameLength);
	};

	*data = rest;
	Ok(*head)
}

#[cfg(feature = "id3v2_compression_support")]
fn decompress(content: &[u8], decompressed_size: u32) -> Result<Vec<u8>> {
	use crate::util::alloc::ALLOCATION_LIMIT;

	log::trace!("Decompressing frame content ({decompressed_size} bytes)");

	let decompressed_size = decompressed_size as usize;
	if decompressed_size > ALLOCATION_LIMIT {
		err!(TooMuchData);
	}

	let mut out = Vec::new();
	out.try_reserve_exact(decompressed_size)?;

	let mut decompressor = flate2::Decompress::new(true);
	let status =
		decompressor.decompress_vec(content, &mut out, flate2::FlushDecompress::Finish)?;

	if status != flate2::Status::StreamEnd {
		log::debug!("Frame content is larger than its declared decompressed size");
		err!(BadFrameLength);
	}

	Ok(out)
}

#[cfg(not(feature = "id3v2_compression_support"))]
fn decompress(_: &[u8], _: u32) -> Result<Vec<u8>> {
	err!(CompressedFrameEncountered)
}

#[cfg(test)]
mod tests {
	use crate::error::ErrorKind;
	use crate::frame::{Frame, FrameId};
	use crate::header::Id3v2Version;

	fn frame(version: Id3v2Version, flags: u16, data: &[u8]) -> Frame {
		Frame {
			id: FrameId::new("TIT2").unwrap(),
			flags,
			data: data.to_vec(),
			version,
		}
	}

	#[test_log::test]
	fn plain_content_is_borrowed() {
		let frame = frame(Id3v2Version::V4, 0x6000, b"\x00abc");
		assert!(matches!(
			frame.content().unwrap(),
			std::borrow::Cow::Borrowed(b"\x00abc")
		));
	}

	#[test_log::test]
	fn grouping_identity() {
		let v3 = frame(Id3v2Version::V3, 0x0020, b"\x01\x00abc");
		assert_eq!(&*v3.content().unwrap(), b"\x00abc");

		let v4 = frame(Id3v2Version::V4, 0x0040, b"\x01\x00abc");
		assert_eq!(&*v4.content().unwrap(), b"\x00abc");
	}

	#[test_log::test]
	fn v4_unsynchronised_with_length() {
		let v4 = frame(
			Id3v2Version::V4,
			0x0003,
			&[0x00, 0x00, 0x00, 0x03, 0x00, 0xFF, 0x00, 0xE0],
		);
		assert_eq!(&*v4.content().unwrap(), [0x00, 0xFF, 0xE0]);
	}

	#[test_log::test]
	fn encrypted() {
		let v3 = frame(Id3v2Version::V3, 0x0040, b"\x80\x00abc");
		assert!(matches!(
			v3.content().unwrap_err().kind(),
			ErrorKind::EncryptedFrame
		));
	}

	#[test_log::test]
	fn missing_flag_fields() {
		let v4 = frame(Id3v2Version::V4, 0x0001, b"\x00\x00");
		assert!(matches!(
			v4.content().unwrap_err().kind(),
			ErrorKind::BadFrameLength
		));
	}

	#[test_log::test]
	#[cfg(feature = "id3v2_compression_support")]
	fn compressed() {
		use flate2::Compression;
		use flate2::write::ZlibEncoder;
		use std::io::Write;

		let content = b"\x00A compressed title";

		let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
		encoder.write_all(content).unwrap();
		let compressed = encoder.finish().unwrap();

		let size = u32::try_from(content.len()).unwrap();

		let mut v3_data = size.to_be_bytes().to_vec();
		v3_data.extend_from_slice(&compressed);
		let v3 = frame(Id3v2Version::V3, 0x0080, &v3_data);
		assert_eq!(&*v3.content().unwrap(), content);

		let mut v4_data = crate::util::synchsafe::encode(size).unwrap().to_vec();
		v4_data.extend_from_slice(&compressed);
		let v4 = frame(Id3v2Version::V4, 0x0009, &v4_data);
		assert_eq!(&*v4.content().unwrap(), content);

		// Declared size is too small
		let mut short = 3_u32.to_be_bytes().to_vec();
		short.extend_from_slice(&compressed);
		let v3 = frame(Id3v2Version::V3, 0x0080, &short);
		assert!(v3.content().is_err());
	}
}
