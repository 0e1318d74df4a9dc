#![allow(missing_docs)]

use proptest::prelude::*;
use xtoken::token::{
	BYTE_UNIT, BinaryTokenReader, BinaryTokenWriter, BoneInfo, BoneWeight, SHORT_UNIT, TextTokenReader, TextTokenWriter, TokenData, TokenError,
	TokenReader, TokenValue, TokenWriter, Tri, UShortString, UShortStringX3, convert_file,
};
use xtoken_testkit::{canonical_text, copy_fixture, scratch_dir, write_file};

const FIXTURES: [&str; 2] = ["cube.xmodel_export", "wave.xanim_export"];

fn read_text(text: &str) -> Vec<TokenData> {
	let mut reader = TextTokenReader::new(text.as_bytes());
	reader.tokens().collect::<Result<_, _>>().expect("text decodes")
}

fn write_text(tokens: &[TokenData]) -> String {
	let mut writer = TextTokenWriter::new(Vec::new());
	for token in tokens {
		writer.write_token(token).expect("text token writes");
	}
	String::from_utf8(writer.into_inner().expect("text flushes")).expect("utf-8 output")
}

fn read_binary(raw: &[u8]) -> Vec<TokenData> {
	let mut reader = BinaryTokenReader::from_bytes(raw).expect("container decodes");
	reader.tokens().collect::<Result<_, _>>().expect("binary decodes")
}

fn write_binary(tokens: &[TokenData]) -> Vec<u8> {
	let mut writer = BinaryTokenWriter::new(Vec::new());
	for token in tokens {
		writer.write_token(token).expect("binary token writes");
	}
	writer.into_inner().expect("binary finalizes")
}

fn token(name: &str, value: TokenValue) -> TokenData {
	TokenData::named(name, value).expect("token exists in schema")
}

#[test]
fn fixtures_survive_text_binary_text() {
	for name in FIXTURES {
		let text = canonical_text(name);
		let tokens = read_text(&text);
		let raw = write_binary(&tokens);

		assert_eq!(read_binary(&raw), tokens, "{name}: binary decode differs");
		assert_eq!(write_text(&read_binary(&raw)), text, "{name}: text rewrite differs");
	}
}

#[test]
fn binary_rewrite_is_byte_identical() {
	for name in FIXTURES {
		let raw = write_binary(&read_text(&canonical_text(name)));
		assert_eq!(write_binary(&read_binary(&raw)), raw, "{name}");
	}
}

#[test]
fn binary_strings_are_lowercased() {
	let raw = write_binary(&read_text("OBJECT 0 \"Mesh_A\"\n// Exported\n"));
	assert_eq!(write_text(&read_binary(&raw)), "OBJECT 0 \"mesh_a\"\n// exported\n");
}

#[test]
fn corrupted_size_field_is_rejected() {
	let mut raw = write_binary(&read_text(&canonical_text("cube.xmodel_export")));
	let declared = u32::from_le_bytes([raw[5], raw[6], raw[7], raw[8]]);
	raw[5..9].copy_from_slice(&(declared + 1).to_le_bytes());

	let err = BinaryTokenReader::from_bytes(&raw).err().expect("size mismatch must fail");
	assert!(matches!(err, TokenError::SizeMismatch { .. }), "{err}");
}

#[test]
fn convert_file_round_trips_through_scratch_dir() {
	let dir = scratch_dir();
	let source = copy_fixture(dir.path(), "cube.xmodel_export");
	let expected = canonical_text("cube.xmodel_export");

	let to_binary = convert_file(&source, None).expect("text converts");
	assert_eq!(to_binary.destination, dir.path().join("cube.xmodel_bin"));
	assert_eq!(to_binary.tokens, expected.lines().count());

	let out_dir = dir.path().join("out");
	std::fs::create_dir(&out_dir).expect("create out dir");
	let to_text = convert_file(&to_binary.destination, Some(&out_dir)).expect("binary converts");
	assert_eq!(to_text.destination, out_dir.join("cube.xmodel_export"));
	assert_eq!(to_text.tokens, to_binary.tokens);

	let written = std::fs::read_to_string(&to_text.destination).expect("read converted text");
	assert_eq!(written, expected);
}

#[test]
fn failed_conversion_leaves_no_output() {
	let dir = scratch_dir();
	let source = write_file(dir.path(), "broken.xanim_export", "ANIMATION\nBOGUS 1\n");

	let err = convert_file(&source, None).expect_err("unknown token");
	assert!(matches!(err, TokenError::UnrecognizedToken { .. }), "{err}");
	assert!(!dir.path().join("broken.xanim_bin").exists());
}

#[test]
fn unsupported_extension_is_rejected_before_io() {
	let dir = scratch_dir();
	let source = write_file(dir.path(), "notes.txt", "MODEL\n");

	let err = convert_file(&source, None).expect_err("txt is not a token file");
	assert!(matches!(err, TokenError::UnsupportedExtension { .. }), "{err}");
}

fn finite_f32() -> impl Strategy<Value = f32> {
	any::<f32>().prop_filter("finite", |value| value.is_finite())
}

proptest! {
	#[test]
	fn quantized_vectors_stay_within_one_step(
		normal in prop::array::uniform3(-1.0_f32..=1.0),
		color in prop::array::uniform4(0.0_f32..=1.0),
	) {
		let decoded = read_binary(&write_binary(&[
			token("NORMAL", TokenValue::Vector316Bit(normal)),
			token("COLOR", TokenValue::Vector48Bit(color)),
		]));

		let TokenValue::Vector316Bit(got) = decoded[0].value() else {
			panic!("expected packed normal");
		};
		for (want, got) in normal.iter().zip(got) {
			prop_assert!((want - got).abs() <= 1.0 / SHORT_UNIT + 1e-6, "{} vs {}", want, got);
		}

		let TokenValue::Vector48Bit(got) = decoded[1].value() else {
			panic!("expected packed color");
		};
		for (want, got) in color.iter().zip(got) {
			prop_assert!((want - got).abs() <= 1.0 / BYTE_UNIT + 1e-6, "{} vs {}", want, got);
		}
	}

	#[test]
	fn scalars_and_strings_survive_both_codecs(
		version in any::<u16>(),
		count in any::<u32>(),
		signed in any::<i32>(),
		phong in finite_f32(),
		offset in prop::array::uniform3(finite_f32()),
		index in any::<i32>(),
		parent in any::<i32>(),
		name in "[a-z_][a-z0-9_]{0,15}",
	) {
		let tokens = vec![
			token("VERSION", TokenValue::UShort(version)),
			token("NUMVERTS32", TokenValue::UInt(count)),
			token("NUMSBONES", TokenValue::Int(signed)),
			token("PHONG", TokenValue::Float(phong)),
			token("OFFSET", TokenValue::Vector3(offset)),
			token("BONE", TokenValue::BoneInfo(BoneInfo { index, parent, name })),
		];

		prop_assert_eq!(&read_text(&write_text(&tokens)), &tokens);
		prop_assert_eq!(&read_binary(&write_binary(&tokens)), &tokens);
	}

	#[test]
	fn compound_payloads_survive_both_codecs(
		uvs in prop::collection::vec(prop::array::uniform2(finite_f32()), 0..4),
		bone in any::<u16>(),
		weight in finite_f32(),
		tri in (0_i32..=255, 0_i32..=255),
		tri16 in (0_i32..=65535, 0_i32..=65535),
		object in any::<u16>(),
		texts in prop::array::uniform3("[a-z0-9_./ ]{0,12}"),
		note in "[a-z0-9 _,\"]{0,20}",
	) {
		let tokens = vec![
			token("//", TokenValue::Comment(note)),
			token("UV", TokenValue::UvSet(uvs)),
			token("BONE", TokenValue::BoneWeight(BoneWeight { bone, weight })),
			token("TRI", TokenValue::Tri(Tri { object: tri.0, material: tri.1 })),
			token("TRI16", TokenValue::Tri16(Tri { object: tri16.0, material: tri16.1 })),
			token("OBJECT", TokenValue::UShortString(UShortString { value: object, text: texts[0].clone() })),
			token("MATERIAL", TokenValue::UShortStringX3(UShortStringX3 { value: object, texts })),
		];

		prop_assert_eq!(&read_text(&write_text(&tokens)), &tokens);
		prop_assert_eq!(&read_binary(&write_binary(&tokens)), &tokens);
	}
}

#[test]
fn empty_uv_set_survives_binary_text_binary() {
	let tokens = vec![token("UV", TokenValue::UvSet(Vec::new())), token("UV", TokenValue::UvSet(vec![[0.5, 0.5]]))];
	let raw = write_binary(&tokens);
	let text = write_text(&read_binary(&raw));
	assert_eq!(text, "UV 0\nUV 1 0.5 0.5\n");
	assert_eq!(write_binary(&read_text(&text)), raw);
}
