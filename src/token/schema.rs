/// Payload layout tag carried by every schema entry.
///
/// The discriminants are the on-disk tag values and seed [`token_hash`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum DataType {
	/// Free text comment.
	Comment = 0,
	/// Structural marker without payload.
	Section = 1,
	/// Signed 16-bit scalar.
	Short = 2,
	/// Unsigned 16-bit scalar.
	UShort = 3,
	/// Unsigned 32-bit scalar.
	UInt = 4,
	/// Signed 32-bit scalar.
	Int = 5,
	/// Four channels packed as unsigned bytes.
	Vector48Bit = 6,
	/// Three channels packed as normalized signed shorts.
	Vector316Bit = 7,
	/// Single precision float.
	Float = 8,
	/// Two floats.
	Vector2 = 9,
	/// Three floats.
	Vector3 = 10,
	/// Four floats.
	Vector4 = 11,
	/// Bone index and weight.
	BoneWeight = 12,
	/// Counted list of UV pairs.
	UVSet = 13,
	/// Unsigned short plus one string.
	UShortString = 14,
	/// Unsigned short plus three strings.
	UShortStringX3 = 15,
	/// Unknown layout.
	Unk4 = 16,
	/// Bone index, parent index, and name.
	BoneInfo = 17,
	/// Object and material index as bytes.
	Tri = 18,
	/// Object and material index as shorts.
	Tri16 = 19,
	/// Unknown layout.
	Unk9 = 20,
}

impl DataType {
	/// Render data type as a stable label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Comment => "comment",
			Self::Section => "section",
			Self::Short => "short",
			Self::UShort => "ushort",
			Self::UInt => "uint",
			Self::Int => "int",
			Self::Vector48Bit => "vector4_8bit",
			Self::Vector316Bit => "vector3_16bit",
			Self::Float => "float",
			Self::Vector2 => "vector2",
			Self::Vector3 => "vector3",
			Self::Vector4 => "vector4",
			Self::BoneWeight => "bone_weight",
			Self::UVSet => "uv_set",
			Self::UShortString => "ushort_string",
			Self::UShortStringX3 => "ushort_string_x3",
			Self::Unk4 => "unk4",
			Self::BoneInfo => "bone_info",
			Self::Tri => "tri",
			Self::Tri16 => "tri16",
			Self::Unk9 => "unk9",
		}
	}
}

/// One schema entry: a named, typed token and its on-disk hash.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Token {
	/// Text name, as written in export files.
	pub name: &'static str,
	/// Payload layout.
	pub data_type: DataType,
	/// Binary identifier.
	pub hash: u16,
}

impl Token {
	const fn new(name: &'static str, data_type: DataType, hash: u16) -> Self {
		Self { name, data_type, hash }
	}
}

const BONE_INFO_HASH: u16 = 0xF099;
const BONE_WEIGHT_HASH: u16 = 0xF1AB;
const BONE_INDEX_HASH: u16 = 0xDD9A;

static TOKENS: [Token; 60] = [
	Token::new(";", DataType::Comment, 0x8738),
	Token::new("//", DataType::Comment, 0xC355),
	Token::new("AMBIENTCOLOR", DataType::Vector4, 0x37FF),
	Token::new("ANIMATION", DataType::Section, 0x7AAC),
	Token::new("BLINN", DataType::Vector2, 0x83C7),
	Token::new("BONE", DataType::UShort, BONE_INDEX_HASH),
	Token::new("BONE", DataType::BoneWeight, BONE_WEIGHT_HASH),
	Token::new("BONE", DataType::BoneInfo, BONE_INFO_HASH),
	Token::new("BONES", DataType::UShort, 0xEA46),
	Token::new("COEFFS", DataType::Vector2, 0xC835),
	Token::new("COLOR", DataType::Vector48Bit, 0x6DD8),
	Token::new("FIRSTFRAME", DataType::UShort, 0xBCD4),
	Token::new("FRAME", DataType::UInt, 0xC723),
	Token::new("FRAME", DataType::Unk4, 0x1675),
	Token::new("FRAMERATE", DataType::UShort, 0x92D3),
	Token::new("GLOW", DataType::Vector2, 0xFE0C),
	Token::new("INCANDESCENCE", DataType::Vector4, 0x4265),
	Token::new("MATERIAL", DataType::UShortStringX3, 0xA700),
	Token::new("MODEL", DataType::Section, 0x46C8),
	Token::new("NORMAL", DataType::Vector316Bit, 0x89EC),
	Token::new("NOTETRACK", DataType::UShort, 0x4643),
	Token::new("NOTETRACKS", DataType::Section, 0xC7F3),
	Token::new("NUMBONES", DataType::UShort, 0x76BA),
	Token::new("NUMFACES", DataType::UInt, 0xBE92),
	Token::new("NUMFRAMES", DataType::UInt, 0xB917),
	Token::new("NUMKEYS", DataType::UShort, 0x7A6C),
	Token::new("NUMMATERIALS", DataType::UShort, 0xA1B2),
	Token::new("NUMOBJECTS", DataType::UShort, 0x62AF),
	Token::new("NUMPARTS", DataType::UShort, 0x9279),
	Token::new("NUMTRACKS", DataType::UShort, 0x9016),
	Token::new("NUMVERTS", DataType::UShort, 0x950D),
	Token::new("NUMVERTS32", DataType::UInt, 0x2AEC),
	Token::new("OBJECT", DataType::UShortString, 0x87D4),
	Token::new("OFFSET", DataType::Vector3, 0x9383),
	Token::new("PART", DataType::UShort, 0x745A),
	Token::new("PART", DataType::UShortString, 0x360B),
	Token::new("PHONG", DataType::Float, 0x5CD2),
	Token::new("REFLECTIVE", DataType::Vector2, 0x7D76),
	Token::new("REFLECTIVECOLOR", DataType::Vector4, 0xE593),
	Token::new("REFRACTIVE", DataType::Vector2, 0x7E24),
	Token::new("SCALE", DataType::Vector3, 0x1C56),
	Token::new("SPECULARCOLOR", DataType::Vector4, 0x317C),
	Token::new("TRANSPARENCY", DataType::Vector4, 0x6DAB),
	Token::new("TRI", DataType::Tri, 0x562F),
	Token::new("TRI16", DataType::Tri16, 0x6711),
	Token::new("UV", DataType::UVSet, 0x1AD4),
	Token::new("VERSION", DataType::UShort, 0x24D1),
	Token::new("VERT", DataType::UShort, 0x8F03),
	Token::new("VERT32", DataType::UInt, 0xB097),
	Token::new("X", DataType::Vector316Bit, 0xDCFD),
	Token::new("Y", DataType::Vector316Bit, 0xCCDC),
	Token::new("Z", DataType::Vector316Bit, 0xFCBF),
	Token::new("NUMSBONES", DataType::Int, 0x1FC2),
	Token::new("NUMSWEIGHTS", DataType::Int, 0xB35E),
	Token::new("QUATERNION", DataType::Vector4, 0xEF69),
	Token::new("NUMIKPITCHLAYERS", DataType::Int, 0xA65B),
	Token::new("IKPITCHLAYER", DataType::UInt, 0x1D7D),
	Token::new("ROTATION", DataType::Vector3, 0xA58B),
	Token::new("NUMCOSMETICBONES", DataType::Int, 0x7836),
	Token::new("EXTRA", DataType::Vector4, 0x6EEE),
];

/// Every known token in table order.
pub fn tokens() -> &'static [Token] {
	&TOKENS
}

/// Resolve a binary hash to its schema entry.
pub fn lookup_by_hash(hash: u16) -> Option<&'static Token> {
	TOKENS.iter().find(|token| token.hash == hash)
}

/// Resolve a text token name, using the line's field count (name included)
/// to pick between the overloaded `BONE` entries.
pub fn lookup_by_name(name: &str, field_count: usize) -> Option<&'static Token> {
	TOKENS.iter().filter(|token| token.name == name).find(|token| match token.hash {
		BONE_INFO_HASH => field_count == 4,
		BONE_WEIGHT_HASH => field_count == 3,
		BONE_INDEX_HASH => field_count == 2,
		_ => true,
	})
}

/// Resolve the entry with this exact name and data type.
pub fn lookup(name: &str, data_type: DataType) -> Option<&'static Token> {
	TOKENS.iter().find(|token| token.name == name && token.data_type == data_type)
}

/// CRC-16 (poly `0x1021`) over the name, seeded with the data type tag.
///
/// Only needed when authoring new entries; decoding always trusts the table.
pub fn token_hash(name: &str, data_type: DataType) -> u16 {
	let mut state = u32::from(data_type as u16);
	for ch in name.chars() {
		state ^= u32::from(ch) << 8;
		for _ in 0..8 {
			let shifted = if state & 0x8000 != 0 { (state << 1) ^ 0x1021 } else { state << 1 };
			state = shifted & 0xFFFF;
		}
	}
	state as u16
}

#[cfg(test)]
mod tests;
