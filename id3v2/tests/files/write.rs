use crate::util::{AUDIO, tag_bytes, temp_file, v3_frame};

use id3v2::config::{ParseOptions, WriteOptions};
use id3v2::{FrameId, Id3v2Tag, Id3v2Version, TextEncoding};

use std::io::{Read, Seek};

fn file_content(file: &mut std::fs::File) -> Vec<u8> {
	let mut content = Vec::new();
	file.rewind().unwrap();
	file.read_to_end(&mut content).unwrap();
	content
}

#[test_log::test]
fn tag_size_covers_frames_and_padding() {
	let mut tag = Id3v2Tag::new();
	tag.set_title("Title", TextEncoding::UTF16).unwrap();
	tag.set_album("Album", TextEncoding::UTF8).unwrap();
	tag.set_comment("Comment", TextEncoding::Latin1).unwrap();

	for padding in [0, 1, 2048, 4096] {
		let mut bytes = Vec::new();
		tag.dump_to(&mut bytes, WriteOptions::new().preferred_padding(padding))
			.unwrap();

		let frames_len: usize = tag.frames().map(|f| f.size() + 10).sum();

		let parsed = Id3v2Tag::parse(&bytes, ParseOptions::new())
			.unwrap()
			.unwrap();
		assert_eq!(parsed.header().size() as usize, frames_len + padding as usize);
		assert_eq!(bytes.len(), 10 + frames_len + padding as usize);
		assert_eq!(parsed.len(), 3);
	}
}

#[test_log::test]
fn save_to_file() {
	let mut file = temp_file(AUDIO);

	let mut tag = Id3v2Tag::new();
	tag.set_title("Foo title", TextEncoding::Latin1).unwrap();
	tag.set_artist("Bar artist", TextEncoding::UTF16).unwrap();
	tag.save_to(&mut file, WriteOptions::default()).unwrap();

	let content = file_content(&mut file);
	assert!(content.ends_with(AUDIO));
	assert_eq!(
		content.len(),
		10 + tag.header().size() as usize + AUDIO.len()
	);

	file.rewind().unwrap();
	let read = id3v2::read_from(&mut file, ParseOptions::new())
		.unwrap()
		.unwrap();

	assert_eq!(read.header().version(), Some(Id3v2Version::V3));
	assert_eq!(read.title().unwrap().as_deref(), Some("Foo title"));
	assert_eq!(read.artist().unwrap().as_deref(), Some("Bar artist"));

	// The audio follows the tag directly
	let mut audio = Vec::new();
	file.read_to_end(&mut audio).unwrap();
	assert_eq!(audio, AUDIO);
}

#[test_log::test]
fn replace_larger_tag() {
	let mut body = v3_frame(b"TIT2", b"\x00Old title");
	body.extend([0; 4096]);

	let mut bytes = tag_bytes(3, 0, &body);
	bytes.extend_from_slice(AUDIO);

	let mut file = temp_file(&bytes);

	let mut tag = id3v2::read_from(&mut file, ParseOptions::new())
		.unwrap()
		.unwrap();
	tag.set_title("New title", TextEncoding::Latin1).unwrap();
	tag.save_to(&mut file, WriteOptions::new().preferred_padding(0))
		.unwrap();

	// The file shrinks, nothing of the old tag remains
	let content = file_content(&mut file);
	assert_eq!(content.len(), 10 + 21 + AUDIO.len());
	assert!(content.ends_with(AUDIO));

	let tag = Id3v2Tag::parse(&content, ParseOptions::new())
		.unwrap()
		.unwrap();
	assert_eq!(tag.len(), 1);
	assert_eq!(tag.title().unwrap().as_deref(), Some("New title"));
}

#[test_log::test]
fn replace_v24_tag_with_footer() {
	let body = b"TIT2\x00\x00\x00\x06\x00\x00\x00Title";

	// The footer mirrors the header, with "3DI" as its magic
	let mut bytes = tag_bytes(4, 0x10, body);
	bytes.extend(b"3DI\x04\x00\x10\x00\x00\x00\x10");
	bytes.extend_from_slice(AUDIO);

	let mut file = temp_file(&bytes);

	let mut tag = id3v2::read_from(&mut file, ParseOptions::new())
		.unwrap()
		.unwrap();
	assert!(tag.header().has_footer());

	tag.save_to(&mut file, WriteOptions::new().preferred_padding(0))
		.unwrap();

	let content = file_content(&mut file);
	assert_eq!(&content[..4], b"ID3\x03");
	assert_eq!(&content[10 + 16..], AUDIO);
}

#[test_log::test]
fn v24_format_flags_are_dropped() {
	// Read only (0x1000), grouping identity (0x0040), and data length indicator (0x0001)
	let mut body = b"TALB\x00\x00\x00\x0B\x10\x41".to_vec();
	body.push(0x07);
	body.extend([0x00, 0x00, 0x00, 0x06]);
	body.extend(b"\x00Album");

	let tag = Id3v2Tag::parse(&tag_bytes(4, 0, &body), ParseOptions::new())
		.unwrap()
		.unwrap();
	assert_eq!(tag.album().unwrap().as_deref(), Some("Album"));

	let mut written = Vec::new();
	tag.dump_to(&mut written, WriteOptions::new().preferred_padding(0))
		.unwrap();

	// Only the read-only status flag survives
	assert_eq!(&written[10..], b"TALB\x00\x00\x00\x06\x20\x00\x00Album");
}

#[test_log::test]
fn unknown_frames_are_preserved() {
	let mut body = v3_frame(b"PRIV", b"owner\x00\x01\x02\x03");
	body.extend(v3_frame(b"TIT2", b"\x00Title"));

	let mut tag = Id3v2Tag::parse(&tag_bytes(3, 0, &body), ParseOptions::new())
		.unwrap()
		.unwrap();
	tag.set_title("Another title", TextEncoding::Latin1).unwrap();

	let mut written = Vec::new();
	tag.dump_to(&mut written, WriteOptions::new().preferred_padding(0))
		.unwrap();

	let reparsed = Id3v2Tag::parse(&written, ParseOptions::new())
		.unwrap()
		.unwrap();

	let private = reparsed.get(FrameId::new("PRIV").unwrap()).unwrap();
	assert_eq!(private.data(), b"owner\x00\x01\x02\x03");
	assert_eq!(reparsed.title().unwrap().as_deref(), Some("Another title"));
}

#[test_log::test]
fn save_and_remove_by_path() {
	let file = tempfile::NamedTempFile::new().unwrap();
	std::fs::write(file.path(), AUDIO).unwrap();

	// Nothing to remove yet
	assert!(!id3v2::remove_from_path(file.path()).unwrap());

	let mut tag = Id3v2Tag::new();
	tag.set_genre("Rock", TextEncoding::Latin1).unwrap();
	tag.save_to_path(file.path(), WriteOptions::default())
		.unwrap();

	let read = id3v2::read_from_path(file.path(), ParseOptions::new())
		.unwrap()
		.unwrap();
	assert_eq!(read.genre().unwrap().as_deref(), Some("Rock"));

	assert!(id3v2::remove_from_path(file.path()).unwrap());
	assert_eq!(std::fs::read(file.path()).unwrap(), AUDIO);
	assert!(
		id3v2::read_from_path(file.path(), ParseOptions::new())
			.unwrap()
			.is_none()
	);
}
