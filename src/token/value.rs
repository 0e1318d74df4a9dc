use crate::token::{DataType, Result, Token, TokenError, lookup};

/// Bone declaration: index, parent index, and name.
#[derive(Debug, Clone, PartialEq)]
pub struct BoneInfo {
	/// Bone index.
	pub index: i32,
	/// Parent bone index (`-1` for roots).
	pub parent: i32,
	/// Bone name.
	pub name: String,
}

/// Per-vertex bone influence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoneWeight {
	/// Bone index.
	pub bone: u16,
	/// Influence weight.
	pub weight: f32,
}

/// Triangle header: owning object and material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tri {
	/// Object index.
	pub object: i32,
	/// Material index.
	pub material: i32,
}

/// Unsigned short paired with one string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UShortString {
	/// Numeric value (usually an index).
	pub value: u16,
	/// Attached text.
	pub text: String,
}

/// Unsigned short paired with three strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UShortStringX3 {
	/// Numeric value (usually an index).
	pub value: u16,
	/// Attached texts in stream order.
	pub texts: [String; 3],
}

/// Decoded payload, one case per data type that carries a known layout.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
	/// Comment text.
	Comment(String),
	/// No payload.
	Section,
	/// Signed 16-bit scalar.
	Short(i16),
	/// Unsigned 16-bit scalar.
	UShort(u16),
	/// Unsigned 32-bit scalar.
	UInt(u32),
	/// Signed 32-bit scalar.
	Int(i32),
	/// Four channels stored as bytes on the binary wire.
	Vector48Bit([f32; 4]),
	/// Three channels stored as normalized shorts on the binary wire.
	Vector316Bit([f32; 3]),
	/// Single precision float.
	Float(f32),
	/// Two floats.
	Vector2([f32; 2]),
	/// Three floats.
	Vector3([f32; 3]),
	/// Four floats.
	Vector4([f32; 4]),
	/// Bone influence.
	BoneWeight(BoneWeight),
	/// UV pairs in stream order.
	UvSet(Vec<[f32; 2]>),
	/// Value plus one string.
	UShortString(UShortString),
	/// Value plus three strings.
	UShortStringX3(UShortStringX3),
	/// Bone declaration.
	BoneInfo(BoneInfo),
	/// Triangle header with byte-sized binary fields.
	Tri(Tri),
	/// Triangle header with short-sized binary fields.
	Tri16(Tri),
}

impl TokenValue {
	/// Data type this payload belongs to.
	pub fn data_type(&self) -> DataType {
		match self {
			Self::Comment(_) => DataType::Comment,
			Self::Section => DataType::Section,
			Self::Short(_) => DataType::Short,
			Self::UShort(_) => DataType::UShort,
			Self::UInt(_) => DataType::UInt,
			Self::Int(_) => DataType::Int,
			Self::Vector48Bit(_) => DataType::Vector48Bit,
			Self::Vector316Bit(_) => DataType::Vector316Bit,
			Self::Float(_) => DataType::Float,
			Self::Vector2(_) => DataType::Vector2,
			Self::Vector3(_) => DataType::Vector3,
			Self::Vector4(_) => DataType::Vector4,
			Self::BoneWeight(_) => DataType::BoneWeight,
			Self::UvSet(_) => DataType::UVSet,
			Self::UShortString(_) => DataType::UShortString,
			Self::UShortStringX3(_) => DataType::UShortStringX3,
			Self::BoneInfo(_) => DataType::BoneInfo,
			Self::Tri(_) => DataType::Tri,
			Self::Tri16(_) => DataType::Tri16,
		}
	}
}

/// One decoded token: its schema entry and its payload.
///
/// The payload shape always matches `token.data_type`.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenData {
	token: &'static Token,
	value: TokenValue,
}

impl TokenData {
	/// Pair a schema entry with a payload, rejecting mismatched shapes.
	pub fn new(token: &'static Token, value: TokenValue) -> Result<Self> {
		let got = value.data_type();
		if got != token.data_type {
			return Err(TokenError::ShapeMismatch {
				token: token.name,
				expected: token.data_type,
				got,
			});
		}
		Ok(Self { token, value })
	}

	/// Build a token from its name, picking the entry whose data type fits `value`.
	pub fn named(name: &str, value: TokenValue) -> Result<Self> {
		let token = lookup(name, value.data_type()).ok_or_else(|| TokenError::UnrecognizedToken {
			token: name.to_owned(),
			at: format!("schema ({})", value.data_type().as_str()),
		})?;
		Ok(Self { token, value })
	}

	/// Constructor for codecs that derive the value from `token.data_type`.
	pub(crate) fn decoded(token: &'static Token, value: TokenValue) -> Self {
		debug_assert_eq!(value.data_type(), token.data_type);
		Self { token, value }
	}

	/// Schema entry.
	pub fn token(&self) -> &'static Token {
		self.token
	}

	/// Token name.
	pub fn name(&self) -> &'static str {
		self.token.name
	}

	/// Decoded payload.
	pub fn value(&self) -> &TokenValue {
		&self.value
	}

	/// Take the payload.
	pub fn into_value(self) -> TokenValue {
		self.value
	}
}

/// Payload shapes that [`TokenReader::expect_token`](crate::token::TokenReader::expect_token)
/// can extract from a token.
pub trait TokenPayload: Sized {
	/// Label used in `UnexpectedToken` errors.
	const KIND: &'static str;

	/// Extract the payload, or give the token back if the shape differs.
	fn from_token(data: TokenData) -> std::result::Result<Self, TokenData>;
}

impl TokenPayload for TokenData {
	const KIND: &'static str = "any";

	fn from_token(data: TokenData) -> std::result::Result<Self, TokenData> {
		Ok(data)
	}
}

macro_rules! impl_payload {
	($ty:ty, $kind:literal, $($pat:pat => $out:expr),+ $(,)?) => {
		impl TokenPayload for $ty {
			const KIND: &'static str = $kind;

			fn from_token(data: TokenData) -> std::result::Result<Self, TokenData> {
				match data {
					$(TokenData { value: $pat, .. } => Ok($out),)+
					other => Err(other),
				}
			}
		}
	};
}

impl_payload!((), "section", TokenValue::Section => ());
impl_payload!(String, "comment", TokenValue::Comment(text) => text);
impl_payload!(i32, "signed integer", TokenValue::Short(value) => i32::from(value), TokenValue::Int(value) => value);
impl_payload!(u32, "unsigned integer", TokenValue::UShort(value) => u32::from(value), TokenValue::UInt(value) => value);
impl_payload!(f32, "float", TokenValue::Float(value) => value);
impl_payload!([f32; 2], "vector2", TokenValue::Vector2(value) => value);
impl_payload!([f32; 3], "vector3", TokenValue::Vector3(value) => value, TokenValue::Vector316Bit(value) => value);
impl_payload!([f32; 4], "vector4", TokenValue::Vector4(value) => value, TokenValue::Vector48Bit(value) => value);
impl_payload!(Vec<[f32; 2]>, "uv set", TokenValue::UvSet(uvs) => uvs);
impl_payload!(BoneInfo, "bone info", TokenValue::BoneInfo(info) => info);
impl_payload!(BoneWeight, "bone weight", TokenValue::BoneWeight(weight) => weight);
impl_payload!(Tri, "tri", TokenValue::Tri(tri) => tri, TokenValue::Tri16(tri) => tri);
impl_payload!(UShortString, "ushort string", TokenValue::UShortString(item) => item);
impl_payload!(UShortStringX3, "ushort string x3", TokenValue::UShortStringX3(item) => item);
