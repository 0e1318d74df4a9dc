use std::collections::HashSet;

use crate::token::{DataType, lookup_by_hash, lookup_by_name, token_hash, tokens};

#[test]
fn every_hash_resolves_to_exactly_one_entry() {
	let mut seen = HashSet::new();
	for token in tokens() {
		assert!(seen.insert(token.hash), "duplicate hash 0x{:04X} for {}", token.hash, token.name);
		let resolved = lookup_by_hash(token.hash).expect("table hash resolves");
		assert!(std::ptr::eq(resolved, token), "hash 0x{:04X} resolved to a different entry", token.hash);
	}
	assert_eq!(seen.len(), 60);
}

#[test]
fn unknown_hash_is_not_resolved() {
	assert!(lookup_by_hash(0x0000).is_none());
	assert!(lookup_by_hash(0xFFFF).is_none());
}

#[test]
fn table_hashes_follow_the_seeded_crc() {
	// These 32-bit counters were hashed with the signed-int seed.
	let int_seeded = ["NUMFACES", "NUMFRAMES", "NUMVERTS32", "VERT32"];

	for token in tokens() {
		let seed = if int_seeded.contains(&token.name) { DataType::Int } else { token.data_type };
		assert_eq!(token_hash(token.name, seed), token.hash, "hash mismatch for {} ({:?})", token.name, token.data_type);
	}
}

#[test]
fn numbones_hash_matches_known_value() {
	assert_eq!(token_hash("NUMBONES", DataType::UShort), 0x76BA);
	let token = lookup_by_hash(0x76BA).expect("NUMBONES resolves");
	assert_eq!(token.name, "NUMBONES");
	assert_eq!(token.data_type, DataType::UShort);
}

#[test]
fn bone_is_disambiguated_by_field_count() {
	assert_eq!(lookup_by_name("BONE", 2).map(|token| token.data_type), Some(DataType::UShort));
	assert_eq!(lookup_by_name("BONE", 3).map(|token| token.data_type), Some(DataType::BoneWeight));
	assert_eq!(lookup_by_name("BONE", 4).map(|token| token.data_type), Some(DataType::BoneInfo));
	assert!(lookup_by_name("BONE", 1).is_none());
	assert!(lookup_by_name("BONE", 5).is_none());
}

#[test]
fn other_names_ignore_field_count_and_take_first_entry() {
	assert_eq!(lookup_by_name("NUMBONES", 7).map(|token| token.hash), Some(0x76BA));
	assert_eq!(lookup_by_name("FRAME", 2).map(|token| token.data_type), Some(DataType::UInt));
	assert_eq!(lookup_by_name("PART", 3).map(|token| token.data_type), Some(DataType::UShort));
	assert!(lookup_by_name("numbones", 2).is_none(), "names are case sensitive");
	assert!(lookup_by_name("NOPE", 2).is_none());
}
