use std::fs;
use std::io::Read;
use std::path::Path;

use crate::token::binary::{BYTE_UNIT, SHORT_UNIT};
use crate::token::bytes::Cursor;
use crate::token::{
	BoneInfo, BoneWeight, DataType, Result, Token, TokenData, TokenError, TokenReader, TokenValue, Tri, UShortString, UShortStringX3,
	decode_container, lookup_by_hash,
};

/// Decoder for binary token files.
///
/// The whole container is decompressed up front; tokens are then decoded
/// one at a time from the in-memory payload.
pub struct BinaryTokenReader {
	cursor: Cursor,
}

impl BinaryTokenReader {
	/// Read and decompress a binary token file.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let raw = fs::read(path)?;
		Self::from_bytes(&raw)
	}

	/// Decompress a container read from `reader`.
	pub fn from_reader(mut reader: impl Read) -> Result<Self> {
		let mut raw = Vec::new();
		reader.read_to_end(&mut raw)?;
		Self::from_bytes(&raw)
	}

	/// Decompress an in-memory container.
	pub fn from_bytes(raw: &[u8]) -> Result<Self> {
		Ok(Self::from_payload(decode_container(raw)?))
	}

	/// Decode tokens from an already decompressed payload.
	pub fn from_payload(payload: Vec<u8>) -> Self {
		Self { cursor: Cursor::new(payload) }
	}

	/// Current byte offset inside the decompressed payload.
	pub fn position(&self) -> usize {
		self.cursor.pos()
	}

	/// Decompressed payload length.
	pub fn payload_len(&self) -> usize {
		self.cursor.len()
	}

	fn read_value(&mut self, token: &'static Token) -> Result<TokenValue> {
		let cursor = &mut self.cursor;
		let value = match token.data_type {
			DataType::Comment => {
				cursor.align(4);
				TokenValue::Comment(cursor.read_cstring()?)
			}
			DataType::Section => TokenValue::Section,
			DataType::BoneInfo => {
				cursor.align(4);
				let index = cursor.read_i32_le()?;
				let parent = cursor.read_i32_le()?;
				let name = cursor.read_cstring()?;
				TokenValue::BoneInfo(BoneInfo { index, parent, name })
			}
			DataType::Short => {
				cursor.align(2);
				TokenValue::Short(cursor.read_i16_le()?)
			}
			DataType::UShort => {
				cursor.align(2);
				TokenValue::UShort(cursor.read_u16_le()?)
			}
			DataType::Int => {
				cursor.align(4);
				TokenValue::Int(cursor.read_i32_le()?)
			}
			DataType::UInt => {
				cursor.align(4);
				TokenValue::UInt(cursor.read_u32_le()?)
			}
			DataType::Float => {
				cursor.align(4);
				TokenValue::Float(cursor.read_f32_le()?)
			}
			DataType::Vector2 => {
				cursor.align(4);
				TokenValue::Vector2(cursor.read_f32s()?)
			}
			DataType::Vector3 => {
				cursor.align(4);
				TokenValue::Vector3(cursor.read_f32s()?)
			}
			DataType::Vector4 => {
				cursor.align(4);
				TokenValue::Vector4(cursor.read_f32s()?)
			}
			DataType::Vector316Bit => {
				cursor.align(2);
				let mut out = [0.0_f32; 3];
				for slot in &mut out {
					*slot = f32::from(cursor.read_i16_le()?) * (1.0 / SHORT_UNIT);
				}
				TokenValue::Vector316Bit(out)
			}
			DataType::Vector48Bit => {
				cursor.align(4);
				let mut out = [0.0_f32; 4];
				for slot in &mut out {
					*slot = f32::from(cursor.read_u8()?) * (1.0 / BYTE_UNIT);
				}
				TokenValue::Vector48Bit(out)
			}
			DataType::BoneWeight => {
				cursor.align(2);
				let bone = cursor.read_u16_le()?;
				let weight = cursor.read_f32_le()?;
				TokenValue::BoneWeight(BoneWeight { bone, weight })
			}
			DataType::Tri => {
				let object = i32::from(cursor.read_u8()?);
				let material = i32::from(cursor.read_u8()?);
				TokenValue::Tri(Tri { object, material })
			}
			DataType::Tri16 => {
				let object = i32::from(cursor.read_u16_le()?);
				let material = i32::from(cursor.read_u16_le()?);
				TokenValue::Tri16(Tri { object, material })
			}
			DataType::UVSet => {
				let count = cursor.read_u16_le()?;
				let mut uvs = Vec::with_capacity(usize::from(count));
				for _ in 0..count {
					uvs.push(cursor.read_f32s()?);
				}
				TokenValue::UvSet(uvs)
			}
			DataType::UShortString => {
				cursor.align(2);
				let value = cursor.read_u16_le()?;
				let text = cursor.read_cstring()?;
				TokenValue::UShortString(UShortString { value, text })
			}
			DataType::UShortStringX3 => {
				cursor.align(2);
				let value = cursor.read_u16_le()?;
				let texts = [cursor.read_cstring()?, cursor.read_cstring()?, cursor.read_cstring()?];
				TokenValue::UShortStringX3(UShortStringX3 { value, texts })
			}
			DataType::Unk4 | DataType::Unk9 => {
				return Err(TokenError::UnsupportedDataType {
					token: token.name,
					data_type: token.data_type,
					at: format!("offset {}", cursor.pos()),
				});
			}
		};
		Ok(value)
	}
}

impl TokenReader for BinaryTokenReader {
	fn next_token(&mut self) -> Result<Option<TokenData>> {
		if self.cursor.is_at_end() {
			return Ok(None);
		}
		self.cursor.align(4);
		// Trailing alignment padding ends the stream as well.
		if self.cursor.is_at_end() {
			return Ok(None);
		}

		let at = self.cursor.pos();
		let hash = self.cursor.read_u16_le()?;
		let token = lookup_by_hash(hash).ok_or_else(|| TokenError::UnrecognizedToken {
			token: format!("0x{hash:04X}"),
			at: format!("offset {at}"),
		})?;

		let value = self.read_value(token)?;
		tracing::trace!(token = token.name, offset = at, "decoded binary token");
		Ok(Some(TokenData::decoded(token, value)))
	}
}
