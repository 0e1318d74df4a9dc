use crate::token::{ContainerHeader, LZ4_MAGIC, TokenError, decode_container, encode_container};

#[test]
fn encoded_container_has_magic_and_size_prefix() {
	let payload = b"\xBA\x76\x03\x00".repeat(32);
	let raw = encode_container(&payload).expect("encodes");

	assert_eq!(&raw[..5], &[0x2A, 0x4C, 0x5A, 0x34, 0x2A]);
	assert_eq!(&raw[5..9], &128_u32.to_le_bytes());

	let header = ContainerHeader::parse(&raw).expect("header parses");
	assert_eq!(header.uncompressed_size, 128);
	assert_eq!(header.compressed_size, raw.len() - ContainerHeader::SIZE);
	assert_eq!(decode_container(&raw).expect("decodes"), payload);
}

#[test]
fn rejects_wrong_magic() {
	let err = decode_container(b"BLEND\x00\x00\x00\x00").expect_err("bad magic");
	assert!(matches!(err, TokenError::BadMagic { magic } if &magic == b"BLEND"));
}

#[test]
fn rejects_truncated_header() {
	let err = decode_container(&LZ4_MAGIC[..3]).expect_err("short magic");
	assert!(matches!(err, TokenError::TruncatedStream { at: 3, need: 6, rem: 0 }));

	let mut raw = LZ4_MAGIC.to_vec();
	raw.extend_from_slice(&[1, 0]);
	let err = decode_container(&raw).expect_err("short size field");
	assert!(matches!(err, TokenError::TruncatedStream { at: 7, need: 2, rem: 0 }));
}

#[test]
fn rejects_declared_size_larger_than_payload() {
	let mut raw = encode_container(b"abcdefgh").expect("encodes");
	raw[5..9].copy_from_slice(&9_u32.to_le_bytes());

	let err = decode_container(&raw).expect_err("declared size too large");
	assert!(matches!(err, TokenError::SizeMismatch { declared: 9, actual: 8 }));
}

#[test]
fn rejects_declared_size_smaller_than_payload() {
	let mut raw = encode_container(b"abcdefgh").expect("encodes");
	raw[5..9].copy_from_slice(&4_u32.to_le_bytes());

	let err = decode_container(&raw).expect_err("declared size too small");
	assert!(matches!(err, TokenError::Decompress { declared: 4, .. }));
}

#[test]
fn rejects_absurd_declared_size() {
	let mut raw = LZ4_MAGIC.to_vec();
	raw.extend_from_slice(&u32::MAX.to_le_bytes());
	let err = decode_container(&raw).expect_err("size above limit");
	assert!(matches!(err, TokenError::DecompressedTooLarge { .. }));
}

#[test]
fn empty_payload_round_trips() {
	let raw = encode_container(&[]).expect("encodes");
	assert!(decode_container(&raw).expect("decodes").is_empty());
}
