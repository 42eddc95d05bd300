use std::fs::File;
use std::io::{Seek as _, Write as _};

/// Create a new temporary file containing `content`
pub fn temp_file(content: &[u8]) -> File {
	let mut file = tempfile::tempfile().unwrap();
	file.write_all(content).unwrap();
	file.rewind().unwrap();

	file
}

/// Build a tag with a synchsafe size computed from `body`
pub fn tag_bytes(major: u8, flags: u8, body: &[u8]) -> Vec<u8> {
	let size = u32::try_from(body.len()).unwrap();

	let mut bytes = vec![b'I', b'D', b'3', major, 0, flags];
	bytes.extend(id3v2::util::synchsafe::encode(size).unwrap());
	bytes.extend_from_slice(body);
	bytes
}

/// An ID3v2.3 frame
pub fn v3_frame(id: &[u8; 4], data: &[u8]) -> Vec<u8> {
	let size = u32::try_from(data.len()).unwrap();

	let mut bytes = id.to_vec();
	bytes.extend(size.to_be_bytes());
	bytes.extend([0, 0]);
	bytes.extend_from_slice(data);
	bytes
}

/// Stand-in for MPEG frames following the tag
pub const AUDIO: &[u8] = b"\xFF\xFB\x90\x64audio data";
