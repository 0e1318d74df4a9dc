use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use crate::token::text::lexer::LineLexer;
use crate::token::{
	BoneInfo, BoneWeight, DataType, Result, Token, TokenData, TokenError, TokenReader, TokenValue, Tri, UShortString, UShortStringX3,
	lookup_by_name,
};

/// Decoder for text export files.
pub struct TextTokenReader<R> {
	lexer: LineLexer<R>,
	fields: Vec<String>,
}

impl TextTokenReader<BufReader<File>> {
	/// Open a text export file.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		Ok(Self::new(BufReader::new(File::open(path)?)))
	}
}

impl<R: BufRead> TextTokenReader<R> {
	/// Decode tokens from buffered UTF-8 text.
	pub fn new(input: R) -> Self {
		Self {
			lexer: LineLexer::new(input),
			fields: Vec::with_capacity(8),
		}
	}

	/// One-based physical line of the most recently read token.
	pub fn line(&self) -> usize {
		self.lexer.line()
	}
}

struct Fields<'a> {
	line: usize,
	token: &'static Token,
	items: &'a [String],
}

impl Fields<'_> {
	fn text(&self, index: usize) -> Result<&str> {
		self.items.get(index).map(String::as_str).ok_or(TokenError::MissingField {
			line: self.line,
			token: self.token.name,
			index,
		})
	}

	fn owned(&self, index: usize) -> Result<String> {
		self.text(index).map(str::to_owned)
	}

	fn parse<T: FromStr>(&self, index: usize) -> Result<T> {
		let text = self.text(index)?;
		text.parse().map_err(|_| TokenError::MalformedField {
			line: self.line,
			token: self.token.name.to_owned(),
			index,
			text: text.to_owned(),
		})
	}

	fn floats<const N: usize>(&self, first: usize) -> Result<[f32; N]> {
		let mut out = [0.0_f32; N];
		for (offset, slot) in out.iter_mut().enumerate() {
			*slot = self.parse(first + offset)?;
		}
		Ok(out)
	}

	fn tri(&self) -> Result<Tri> {
		Ok(Tri {
			object: self.parse(1)?,
			material: self.parse(2)?,
		})
	}

	fn value(&self) -> Result<TokenValue> {
		let value = match self.token.data_type {
			DataType::Comment => TokenValue::Comment(self.items.get(1).cloned().unwrap_or_default()),
			DataType::Section => TokenValue::Section,
			DataType::BoneInfo => TokenValue::BoneInfo(BoneInfo {
				index: self.parse(1)?,
				parent: self.parse(2)?,
				name: self.owned(3)?,
			}),
			DataType::UShortString => TokenValue::UShortString(UShortString {
				value: self.parse(1)?,
				text: self.owned(2)?,
			}),
			DataType::UShortStringX3 => TokenValue::UShortStringX3(UShortStringX3 {
				value: self.parse(1)?,
				texts: [self.owned(2)?, self.owned(3)?, self.owned(4)?],
			}),
			DataType::Short => TokenValue::Short(self.parse(1)?),
			DataType::UShort => TokenValue::UShort(self.parse(1)?),
			DataType::Int => TokenValue::Int(self.parse(1)?),
			DataType::UInt => TokenValue::UInt(self.parse(1)?),
			DataType::Float => TokenValue::Float(self.parse(1)?),
			DataType::Vector2 => TokenValue::Vector2(self.floats(1)?),
			DataType::Vector3 => TokenValue::Vector3(self.floats(1)?),
			DataType::Vector316Bit => TokenValue::Vector316Bit(self.floats(1)?),
			DataType::Vector4 => TokenValue::Vector4(self.floats(1)?),
			DataType::Vector48Bit => TokenValue::Vector48Bit(self.floats(1)?),
			DataType::BoneWeight => TokenValue::BoneWeight(BoneWeight {
				bone: self.parse(1)?,
				weight: self.parse(2)?,
			}),
			DataType::Tri => TokenValue::Tri(self.tri()?),
			DataType::Tri16 => TokenValue::Tri16(self.tri()?),
			DataType::UVSet => {
				// Some exporters declare 0 sets and still write one pair.
				let count = match self.parse::<u16>(1)? {
					0 if self.items.len() > 2 => 1,
					count => usize::from(count),
				};
				let mut uvs = Vec::with_capacity(count);
				for pair in 0..count {
					uvs.push(self.floats(2 + pair * 2)?);
				}
				TokenValue::UvSet(uvs)
			}
			DataType::Unk4 | DataType::Unk9 => {
				return Err(TokenError::UnsupportedDataType {
					token: self.token.name,
					data_type: self.token.data_type,
					at: format!("line {}", self.line),
				});
			}
		};
		Ok(value)
	}
}

impl<R: BufRead> TokenReader for TextTokenReader<R> {
	fn next_token(&mut self) -> Result<Option<TokenData>> {
		if !self.lexer.next_line(&mut self.fields)? {
			return Ok(None);
		}

		let line = self.lexer.line();
		let name = &self.fields[0];
		let token = lookup_by_name(name, self.fields.len()).ok_or_else(|| TokenError::UnrecognizedToken {
			token: name.clone(),
			at: format!("line {line}"),
		})?;

		let fields = Fields {
			line,
			token,
			items: &self.fields,
		};
		let value = fields.value()?;
		tracing::trace!(token = token.name, line, "decoded text token");
		Ok(Some(TokenData::decoded(token, value)))
	}
}
