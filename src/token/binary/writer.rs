use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::token::binary::{BYTE_UNIT, SHORT_UNIT};
use crate::token::bytes::ByteBuf;
use crate::token::{BoneInfo, BoneWeight, Result, Token, TokenError, TokenWriter, Tri, UShortString, UShortStringX3, encode_container};

const INITIAL_CAPACITY: usize = 65535;

/// Encoder for binary token files.
///
/// Tokens accumulate uncompressed in memory; [`finish`](TokenWriter::finish)
/// compresses them and writes the container to the destination exactly once.
/// A writer dropped unfinished finalizes itself and logs any failure.
pub struct BinaryTokenWriter<W: Write> {
	buf: ByteBuf,
	out: Option<W>,
}

impl BinaryTokenWriter<BufWriter<File>> {
	/// Create (or truncate) a binary token file.
	pub fn create(path: impl AsRef<Path>) -> Result<Self> {
		Ok(Self::new(BufWriter::new(File::create(path)?)))
	}
}

impl<W: Write> BinaryTokenWriter<W> {
	/// Wrap a destination stream.
	pub fn new(out: W) -> Self {
		Self {
			buf: ByteBuf::with_capacity(INITIAL_CAPACITY),
			out: Some(out),
		}
	}

	/// Uncompressed payload written so far.
	pub fn payload(&self) -> &[u8] {
		self.buf.as_slice()
	}

	/// Finalize and hand back the destination.
	pub fn into_inner(mut self) -> Result<W> {
		self.finalize()?.ok_or(TokenError::WriterFinished)
	}

	fn finalize(&mut self) -> Result<Option<W>> {
		let Some(mut out) = self.out.take() else {
			return Ok(None);
		};
		let raw = encode_container(self.buf.as_slice())?;
		out.write_all(&raw)?;
		out.flush()?;
		Ok(Some(out))
	}

	fn begin(&mut self, token: &Token) -> Result<&mut ByteBuf> {
		if self.out.is_none() {
			return Err(TokenError::WriterFinished);
		}
		self.buf.align(4);
		self.buf.put_u16_le(token.hash);
		Ok(&mut self.buf)
	}
}

fn pack_short(value: f32) -> i16 {
	(value * SHORT_UNIT) as i32 as i16
}

fn pack_byte(value: f32) -> u8 {
	(value * BYTE_UNIT) as i32 as u8
}

impl<W: Write> TokenWriter for BinaryTokenWriter<W> {
	fn write_section(&mut self, token: &Token) -> Result<()> {
		self.begin(token)?;
		Ok(())
	}

	fn write_comment(&mut self, token: &Token, text: &str) -> Result<()> {
		self.begin(token)?.put_cstring(text);
		Ok(())
	}

	fn write_bone_info(&mut self, token: &Token, info: &BoneInfo) -> Result<()> {
		let buf = self.begin(token)?;
		buf.align(4);
		buf.put_i32_le(info.index);
		buf.put_i32_le(info.parent);
		buf.put_cstring(&info.name);
		Ok(())
	}

	fn write_short(&mut self, token: &Token, value: i16) -> Result<()> {
		let buf = self.begin(token)?;
		buf.align(2);
		buf.put_i16_le(value);
		Ok(())
	}

	fn write_ushort(&mut self, token: &Token, value: u16) -> Result<()> {
		let buf = self.begin(token)?;
		buf.align(2);
		buf.put_u16_le(value);
		Ok(())
	}

	fn write_int(&mut self, token: &Token, value: i32) -> Result<()> {
		let buf = self.begin(token)?;
		buf.align(4);
		buf.put_i32_le(value);
		Ok(())
	}

	fn write_uint(&mut self, token: &Token, value: u32) -> Result<()> {
		let buf = self.begin(token)?;
		buf.align(4);
		buf.put_u32_le(value);
		Ok(())
	}

	fn write_float(&mut self, token: &Token, value: f32) -> Result<()> {
		let buf = self.begin(token)?;
		buf.align(4);
		buf.put_f32s(&[value]);
		Ok(())
	}

	fn write_vector2(&mut self, token: &Token, value: [f32; 2]) -> Result<()> {
		let buf = self.begin(token)?;
		buf.align(4);
		buf.put_f32s(&value);
		Ok(())
	}

	fn write_vector3(&mut self, token: &Token, value: [f32; 3]) -> Result<()> {
		let buf = self.begin(token)?;
		buf.align(4);
		buf.put_f32s(&value);
		Ok(())
	}

	fn write_vector3_16bit(&mut self, token: &Token, value: [f32; 3]) -> Result<()> {
		let buf = self.begin(token)?;
		buf.align(2);
		for channel in value {
			buf.put_i16_le(pack_short(channel));
		}
		Ok(())
	}

	fn write_vector4(&mut self, token: &Token, value: [f32; 4]) -> Result<()> {
		let buf = self.begin(token)?;
		buf.align(4);
		buf.put_f32s(&value);
		Ok(())
	}

	fn write_vector4_8bit(&mut self, token: &Token, value: [f32; 4]) -> Result<()> {
		let buf = self.begin(token)?;
		buf.align(4);
		for channel in value {
			buf.put_u8(pack_byte(channel));
		}
		Ok(())
	}

	fn write_bone_weight(&mut self, token: &Token, weight: BoneWeight) -> Result<()> {
		let buf = self.begin(token)?;
		buf.align(2);
		buf.put_u16_le(weight.bone);
		buf.put_f32s(&[weight.weight]);
		Ok(())
	}

	fn write_tri(&mut self, token: &Token, tri: Tri) -> Result<()> {
		let buf = self.begin(token)?;
		buf.put_u8(tri.object as u8);
		buf.put_u8(tri.material as u8);
		Ok(())
	}

	fn write_tri16(&mut self, token: &Token, tri: Tri) -> Result<()> {
		let buf = self.begin(token)?;
		buf.put_u16_le(tri.object as u16);
		buf.put_u16_le(tri.material as u16);
		Ok(())
	}

	fn write_uv_set(&mut self, token: &Token, uvs: &[[f32; 2]]) -> Result<()> {
		let count = u16::try_from(uvs.len()).map_err(|_| TokenError::PayloadTooLarge { len: uvs.len() })?;
		let buf = self.begin(token)?;
		buf.put_u16_le(count);
		for uv in uvs {
			buf.put_f32s(uv);
		}
		Ok(())
	}

	fn write_ushort_string(&mut self, token: &Token, item: &UShortString) -> Result<()> {
		let buf = self.begin(token)?;
		buf.align(2);
		buf.put_u16_le(item.value);
		buf.put_cstring(&item.text);
		Ok(())
	}

	fn write_ushort_string_x3(&mut self, token: &Token, item: &UShortStringX3) -> Result<()> {
		let buf = self.begin(token)?;
		buf.align(2);
		buf.put_u16_le(item.value);
		for text in &item.texts {
			buf.put_cstring(text);
		}
		Ok(())
	}

	fn finish(&mut self) -> Result<()> {
		let len = self.buf.pos();
		self.finalize()?.ok_or(TokenError::WriterFinished)?;
		tracing::debug!(uncompressed = len, "finished binary token stream");
		Ok(())
	}
}

impl<W: Write> Drop for BinaryTokenWriter<W> {
	fn drop(&mut self) {
		if self.out.is_none() {
			return;
		}
		if let Err(err) = self.finalize() {
			tracing::warn!(%err, "failed to finalize binary token writer on drop");
		}
	}
}
