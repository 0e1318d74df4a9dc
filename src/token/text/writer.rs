use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::token::{BoneInfo, BoneWeight, Result, Token, TokenError, TokenWriter, Tri, UShortString, UShortStringX3};

/// Encoder for text export files: one token per line.
///
/// Quoted fields have no escape syntax, so text containing `"` or a line
/// break is rejected with [`TokenError::MalformedField`] instead of being
/// written in a form the reader would split differently.
pub struct TextTokenWriter<W: Write> {
	out: Option<W>,
	lines: usize,
}

impl TextTokenWriter<BufWriter<File>> {
	/// Create (or truncate) a text export file.
	pub fn create(path: impl AsRef<Path>) -> Result<Self> {
		Ok(Self::new(BufWriter::new(File::create(path)?)))
	}
}

impl<W: Write> TextTokenWriter<W> {
	/// Wrap a destination stream.
	pub fn new(out: W) -> Self {
		Self { out: Some(out), lines: 0 }
	}

	/// Flush and hand back the destination.
	pub fn into_inner(mut self) -> Result<W> {
		let mut out = self.out.take().ok_or(TokenError::WriterFinished)?;
		out.flush()?;
		Ok(out)
	}

	fn line(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
		let out = self.out.as_mut().ok_or(TokenError::WriterFinished)?;
		writeln!(out, "{args}")?;
		self.lines += 1;
		Ok(())
	}

	fn check_text(&self, token: &Token, index: usize, text: &str, quoted: bool) -> Result<()> {
		let breaks = |c: char| c == '\n' || c == '\r' || (quoted && c == '"');
		if text.contains(breaks) {
			return Err(TokenError::MalformedField {
				line: self.lines + 1,
				token: token.name.to_owned(),
				index,
				text: text.to_owned(),
			});
		}
		Ok(())
	}
}

/// Space separated floats in shortest round-trip form.
struct Floats<'a>(&'a [f32]);

impl fmt::Display for Floats<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (index, value) in self.0.iter().enumerate() {
			if index > 0 {
				f.write_str(" ")?;
			}
			write!(f, "{value}")?;
		}
		Ok(())
	}
}

impl<W: Write> TokenWriter for TextTokenWriter<W> {
	fn write_section(&mut self, token: &Token) -> Result<()> {
		self.line(format_args!("{}", token.name))
	}

	fn write_comment(&mut self, token: &Token, text: &str) -> Result<()> {
		if text.is_empty() {
			return self.line(format_args!("{}", token.name));
		}
		let plain = token.name == "//";
		self.check_text(token, 1, text, !plain)?;
		if plain {
			return self.line(format_args!("{} {text}", token.name));
		}
		self.line(format_args!("{} \"{text}\"", token.name))
	}

	fn write_bone_info(&mut self, token: &Token, info: &BoneInfo) -> Result<()> {
		self.check_text(token, 3, &info.name, true)?;
		self.line(format_args!("{} {} {} \"{}\"", token.name, info.index, info.parent, info.name))
	}

	fn write_short(&mut self, token: &Token, value: i16) -> Result<()> {
		self.line(format_args!("{} {value}", token.name))
	}

	fn write_ushort(&mut self, token: &Token, value: u16) -> Result<()> {
		self.line(format_args!("{} {value}", token.name))
	}

	fn write_int(&mut self, token: &Token, value: i32) -> Result<()> {
		self.line(format_args!("{} {value}", token.name))
	}

	fn write_uint(&mut self, token: &Token, value: u32) -> Result<()> {
		self.line(format_args!("{} {value}", token.name))
	}

	fn write_float(&mut self, token: &Token, value: f32) -> Result<()> {
		self.line(format_args!("{} {value}", token.name))
	}

	fn write_vector2(&mut self, token: &Token, value: [f32; 2]) -> Result<()> {
		self.line(format_args!("{} {}", token.name, Floats(&value)))
	}

	fn write_vector3(&mut self, token: &Token, value: [f32; 3]) -> Result<()> {
		self.line(format_args!("{} {}", token.name, Floats(&value)))
	}

	fn write_vector3_16bit(&mut self, token: &Token, value: [f32; 3]) -> Result<()> {
		self.line(format_args!("{} {}", token.name, Floats(&value)))
	}

	fn write_vector4(&mut self, token: &Token, value: [f32; 4]) -> Result<()> {
		self.line(format_args!("{} {}", token.name, Floats(&value)))
	}

	fn write_vector4_8bit(&mut self, token: &Token, value: [f32; 4]) -> Result<()> {
		self.line(format_args!("{} {}", token.name, Floats(&value)))
	}

	fn write_bone_weight(&mut self, token: &Token, weight: BoneWeight) -> Result<()> {
		self.line(format_args!("{} {} {}", token.name, weight.bone, weight.weight))
	}

	fn write_tri(&mut self, token: &Token, tri: Tri) -> Result<()> {
		self.line(format_args!("{} {} {} 0 0", token.name, tri.object, tri.material))
	}

	fn write_tri16(&mut self, token: &Token, tri: Tri) -> Result<()> {
		self.line(format_args!("{} {} {} 0 0", token.name, tri.object, tri.material))
	}

	fn write_uv_set(&mut self, token: &Token, uvs: &[[f32; 2]]) -> Result<()> {
		if uvs.is_empty() {
			return self.line(format_args!("{} 0", token.name));
		}
		self.line(format_args!("{} {} {}", token.name, uvs.len(), Floats(uvs.as_flattened())))
	}

	fn write_ushort_string(&mut self, token: &Token, item: &UShortString) -> Result<()> {
		self.check_text(token, 2, &item.text, true)?;
		self.line(format_args!("{} {} \"{}\"", token.name, item.value, item.text))
	}

	fn write_ushort_string_x3(&mut self, token: &Token, item: &UShortStringX3) -> Result<()> {
		for (offset, text) in item.texts.iter().enumerate() {
			self.check_text(token, 2 + offset, text, true)?;
		}
		let [first, second, third] = &item.texts;
		self.line(format_args!("{} {} \"{first}\" \"{second}\" \"{third}\"", token.name, item.value))
	}

	fn finish(&mut self) -> Result<()> {
		let mut out = self.out.take().ok_or(TokenError::WriterFinished)?;
		out.flush()?;
		tracing::debug!(lines = self.lines, "finished text token stream");
		Ok(())
	}
}

impl<W: Write> Drop for TextTokenWriter<W> {
	fn drop(&mut self) {
		if let Some(mut out) = self.out.take() {
			if let Err(err) = out.flush() {
				tracing::warn!(%err, "failed to flush text token writer on drop");
			}
		}
	}
}
