use crate::util::{AUDIO, tag_bytes, temp_file, v3_frame};

use id3v2::config::{ParseOptions, ParsingMode};
use id3v2::error::ErrorKind;
use id3v2::{FrameId, FrameKind, Id3v2Header, Id3v2Tag, Id3v2Version, PictureType, TextEncoding};

use std::io::{Cursor, Seek, SeekFrom};

#[test_log::test]
fn header_size_is_synchsafe() {
	let header =
		Id3v2Header::parse(&[0x49, 0x44, 0x33, 0x03, 0x00, 0x00, 0x00, 0x00, 0x01, 0x7F]).unwrap();

	assert_eq!(header.version(), Some(Id3v2Version::V3));
	assert_eq!(header.minor_version(), 0);
	assert_eq!(header.flags(), 0);
	assert_eq!(header.size(), 255);
}

#[test_log::test]
fn padding_only() {
	let mut bytes = tag_bytes(3, 0, &[0; 255]);
	bytes.extend_from_slice(AUDIO);

	let mut file = temp_file(&bytes);
	let tag = id3v2::read_from(&mut file, ParseOptions::new())
		.unwrap()
		.unwrap();

	assert!(tag.is_empty());

	// The reader stops at the end of the tag
	assert_eq!(file.stream_position().unwrap(), 265);
}

#[test_log::test]
fn no_tag() {
	let mut file = temp_file(AUDIO);
	assert!(
		id3v2::read_from(&mut file, ParseOptions::new())
			.unwrap()
			.is_none()
	);

	let mut empty = Cursor::new(Vec::new());
	assert!(
		id3v2::read_from(&mut empty, ParseOptions::new())
			.unwrap()
			.is_none()
	);
}

#[test_log::test]
fn unreadable_versions_are_ignored() {
	// ID3v2.5
	let bytes = tag_bytes(5, 0, &v3_frame(b"TIT2", b"\x00Title"));
	assert!(
		Id3v2Tag::parse(&bytes, ParseOptions::new())
			.unwrap()
			.is_none()
	);

	// Compressed ID3v2.2
	let bytes = tag_bytes(2, 0x40, b"TT2\x00\x00\x06\x00Title");
	assert!(
		Id3v2Tag::parse(&bytes, ParseOptions::new())
			.unwrap()
			.is_none()
	);
}

#[test_log::test]
fn truncated_file() {
	let mut body = v3_frame(b"TIT2", b"\x00Title");
	body.extend([0; 32]);

	let mut bytes = tag_bytes(3, 0, &body);
	bytes.truncate(30);

	let err = id3v2::read_from(&mut temp_file(&bytes), ParseOptions::new()).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::TruncatedData));
}

#[test_log::test]
fn v23_tag() {
	let mut body = v3_frame(b"TIT2", b"\x00Foo title");
	body.extend(v3_frame(b"TPE1", b"\x01\xFF\xFEB\x00a\x00r\x00\x00\x00"));
	body.extend(v3_frame(b"COMM", b"\x00engdesc\x00A comment"));
	body.extend(v3_frame(b"APIC", b"\x00image/png\x00\x03\x00\x89PNG"));
	body.extend(v3_frame(b"PRIV", b"owner\x00data"));
	body.extend([0; 100]);

	let tag = Id3v2Tag::parse(&tag_bytes(3, 0, &body), ParseOptions::new())
		.unwrap()
		.unwrap();

	let kinds = tag.frames().map(|f| f.kind()).collect::<Vec<_>>();
	assert_eq!(
		kinds,
		[
			FrameKind::Text,
			FrameKind::Text,
			FrameKind::Comment,
			FrameKind::Picture,
			FrameKind::Unsupported
		]
	);

	assert_eq!(tag.title().unwrap().as_deref(), Some("Foo title"));
	assert_eq!(tag.artist().unwrap().as_deref(), Some("Bar"));

	let comment = tag.comment().unwrap().unwrap();
	assert_eq!(comment.encoding, TextEncoding::Latin1);
	assert_eq!(&comment.language, b"eng");
	assert_eq!(comment.description, "desc");
	assert_eq!(comment.text().unwrap(), "A comment");

	let cover = tag.album_cover().unwrap().unwrap();
	assert_eq!(cover.mime_type, "image/png");
	assert_eq!(cover.picture_type, PictureType::CoverFront);
	assert_eq!(cover.data, b"\x89PNG");

	let private = tag.get(FrameId::new("PRIV").unwrap()).unwrap();
	assert_eq!(private.data(), b"owner\x00data");
}

#[test_log::test]
fn v24_multiple_values() {
	let mut body = b"TPE1\x00\x00\x00\x08\x00\x00".to_vec();
	body.extend(b"\x03Foo\x00Bar");
	body.extend([0; 10]);

	let tag = Id3v2Tag::parse(&tag_bytes(4, 0, &body), ParseOptions::new())
		.unwrap()
		.unwrap();

	let frame = tag.frames().next().unwrap();
	assert_eq!(frame.version(), Id3v2Version::V4);

	let content = frame.text_content().unwrap().unwrap();
	assert_eq!(content.values().unwrap(), ["Foo", "Bar"]);
	assert_eq!(tag.artist().unwrap().as_deref(), Some("Foo"));
}

#[test_log::test]
fn v22_tag_is_translated() {
	let mut body = b"TT2\x00\x00\x06\x00Title".to_vec();
	body.extend(b"TP1\x00\x00\x07\x00Artist");
	body.extend(b"PIC\x00\x00\x0A\x00JPG\x03\x00\xFF\xD8\xFF\xE0");
	body.extend([0; 16]);

	let tag = Id3v2Tag::parse(&tag_bytes(2, 0, &body), ParseOptions::new())
		.unwrap()
		.unwrap();

	let ids = tag.frames().map(|f| f.id().as_str().to_owned()).collect::<Vec<_>>();
	assert_eq!(ids, ["TIT2", "TPE1", "APIC"]);

	assert_eq!(tag.title().unwrap().as_deref(), Some("Title"));
	assert_eq!(tag.artist().unwrap().as_deref(), Some("Artist"));

	let cover = tag.album_cover().unwrap().unwrap();
	assert_eq!(cover.mime_type, "image/jpg");
	assert_eq!(cover.data, [0xFF, 0xD8, 0xFF, 0xE0]);
}

#[test_log::test]
fn unknown_v22_frames() {
	let mut body = b"TT2\x00\x00\x06\x00Title".to_vec();
	body.extend(b"ZZZ\x00\x00\x02\x00\x00");
	body.extend(b"TP1\x00\x00\x07\x00Artist");

	let bytes = tag_bytes(2, 0, &body);

	let tag = Id3v2Tag::parse(&bytes, ParseOptions::new()).unwrap().unwrap();
	assert_eq!(tag.len(), 1);

	let relaxed = ParseOptions::new().parsing_mode(ParsingMode::Relaxed);
	let tag = Id3v2Tag::parse(&bytes, relaxed).unwrap().unwrap();
	assert_eq!(tag.len(), 2);
	assert_eq!(tag.artist().unwrap().as_deref(), Some("Artist"));

	let strict = ParseOptions::new().parsing_mode(ParsingMode::Strict);
	assert!(Id3v2Tag::parse(&bytes, strict).is_err());
}

#[test_log::test]
fn unsynchronised_tag() {
	// "\xFF\xE0" unsynchronised as "\xFF\x00\xE0", sizes are after reversal
	let body = b"TIT2\x00\x00\x00\x03\x00\x00\x00\xFF\x00\xE0";
	let tag = Id3v2Tag::parse(&tag_bytes(3, 0x80, body), ParseOptions::new())
		.unwrap()
		.unwrap();

	assert!(tag.header().unsynchronisation());
	assert_eq!(tag.frames().next().unwrap().data(), [0x00, 0xFF, 0xE0]);
}

#[test_log::test]
fn skip_cover_art() {
	let mut body = v3_frame(b"APIC", b"\x00image/png\x00\x03\x00\x89PNG");
	body.extend(v3_frame(b"TIT2", b"\x00Title"));

	let mut file = temp_file(&tag_bytes(3, 0, &body));
	let tag = id3v2::read_from(&mut file, ParseOptions::new().read_cover_art(false))
		.unwrap()
		.unwrap();

	assert_eq!(tag.len(), 1);
	assert!(tag.album_cover().unwrap().is_none());

	file.seek(SeekFrom::Start(0)).unwrap();
	let tag = id3v2::read_from(&mut file, ParseOptions::new())
		.unwrap()
		.unwrap();
	assert_eq!(tag.len(), 2);
}

#[test_log::test]
fn read_from_path() {
	let mut bytes = tag_bytes(3, 0, &v3_frame(b"TALB", b"\x00Album"));
	bytes.extend_from_slice(AUDIO);

	let file = tempfile::NamedTempFile::new().unwrap();
	std::fs::write(file.path(), &bytes).unwrap();

	let tag = id3v2::read_from_path(file.path(), ParseOptions::new())
		.unwrap()
		.unwrap();
	assert_eq!(tag.album().unwrap().as_deref(), Some("Album"));
}
