use crate::token::{Result, TokenError};

/// Round `pos` up to the next multiple of `alignment` (a power of two).
pub fn align_up(pos: usize, alignment: usize) -> usize {
	debug_assert!(alignment.is_power_of_two());
	(pos + alignment - 1) & !(alignment - 1)
}

/// Forward-only cursor over a decompressed token payload.
pub struct Cursor {
	bytes: Vec<u8>,
	pos: usize,
}

impl Cursor {
	/// Create a cursor at position 0.
	pub fn new(bytes: Vec<u8>) -> Self {
		Self { bytes, pos: 0 }
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return total payload length.
	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	/// Return `true` once the cursor reached or passed the payload end.
	pub fn is_at_end(&self) -> bool {
		self.pos >= self.bytes.len()
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Skip padding up to the next multiple of `alignment`.
	///
	/// Never fails; a read past the end reports the truncation instead.
	pub fn align(&mut self, alignment: usize) {
		self.pos = align_up(self.pos, alignment);
	}

	/// Read exactly `N` bytes and advance cursor.
	pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		if N > self.remaining() {
			return Err(TokenError::TruncatedStream {
				at: self.pos,
				need: N,
				rem: self.remaining(),
			});
		}

		let mut out = [0_u8; N];
		out.copy_from_slice(&self.bytes[self.pos..self.pos + N]);
		self.pos += N;
		Ok(out)
	}

	/// Read one byte.
	pub fn read_u8(&mut self) -> Result<u8> {
		Ok(self.read_array::<1>()?[0])
	}

	/// Read a little-endian `u16`.
	pub fn read_u16_le(&mut self) -> Result<u16> {
		Ok(u16::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `i16`.
	pub fn read_i16_le(&mut self) -> Result<i16> {
		Ok(i16::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `u32`.
	pub fn read_u32_le(&mut self) -> Result<u32> {
		Ok(u32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `i32`.
	pub fn read_i32_le(&mut self) -> Result<i32> {
		Ok(i32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `f32`.
	pub fn read_f32_le(&mut self) -> Result<f32> {
		Ok(f32::from_le_bytes(self.read_array()?))
	}

	/// Read `N` consecutive little-endian `f32` values.
	pub fn read_f32s<const N: usize>(&mut self) -> Result<[f32; N]> {
		let mut out = [0.0_f32; N];
		for slot in &mut out {
			*slot = self.read_f32_le()?;
		}
		Ok(out)
	}

	/// Read a zero-terminated string (one char per byte), then align to 4.
	pub fn read_cstring(&mut self) -> Result<String> {
		let start = self.pos.min(self.bytes.len());
		let rem = &self.bytes[start..];
		let Some(rel_end) = rem.iter().position(|byte| *byte == 0) else {
			return Err(TokenError::TruncatedStream {
				at: self.pos,
				need: rem.len() + 1,
				rem: rem.len(),
			});
		};

		let text = rem[..rel_end].iter().copied().map(char::from).collect();
		self.pos = start + rel_end + 1;
		self.align(4);
		Ok(text)
	}
}

/// Growable little-endian output buffer with zero-filled alignment padding.
pub struct ByteBuf {
	bytes: Vec<u8>,
}

impl ByteBuf {
	/// Create an empty buffer with room for `capacity` bytes.
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			bytes: Vec::with_capacity(capacity),
		}
	}

	/// Current logical write position.
	pub fn pos(&self) -> usize {
		self.bytes.len()
	}

	/// Written bytes.
	pub fn as_slice(&self) -> &[u8] {
		&self.bytes
	}

	/// Pad with zeros up to the next multiple of `alignment`.
	pub fn align(&mut self, alignment: usize) {
		let target = align_up(self.bytes.len(), alignment);
		self.bytes.resize(target, 0);
	}

	/// Append raw bytes.
	pub fn put(&mut self, bytes: &[u8]) {
		self.bytes.extend_from_slice(bytes);
	}

	/// Append one byte.
	pub fn put_u8(&mut self, value: u8) {
		self.bytes.push(value);
	}

	/// Append a little-endian `u16`.
	pub fn put_u16_le(&mut self, value: u16) {
		self.put(&value.to_le_bytes());
	}

	/// Append a little-endian `i16`.
	pub fn put_i16_le(&mut self, value: i16) {
		self.put(&value.to_le_bytes());
	}

	/// Append a little-endian `u32`.
	pub fn put_u32_le(&mut self, value: u32) {
		self.put(&value.to_le_bytes());
	}

	/// Append a little-endian `i32`.
	pub fn put_i32_le(&mut self, value: i32) {
		self.put(&value.to_le_bytes());
	}

	/// Append little-endian `f32` values.
	pub fn put_f32s(&mut self, values: &[f32]) {
		for value in values {
			self.put(&value.to_le_bytes());
		}
	}

	/// Align to 4, append the lower-cased string one byte per char, then a zero.
	///
	/// Chars above `U+00FF` are truncated to their low byte.
	pub fn put_cstring(&mut self, text: &str) {
		self.align(4);
		for ch in text.chars().flat_map(char::to_lowercase) {
			self.bytes.push(ch as u32 as u8);
		}
		self.bytes.push(0);
	}
}

#[cfg(test)]
mod tests {
	use super::{ByteBuf, Cursor, align_up};
	use crate::token::TokenError;

	#[test]
	fn align_up_rounds_to_next_multiple() {
		assert_eq!(align_up(0, 4), 0);
		assert_eq!(align_up(1, 4), 4);
		assert_eq!(align_up(4, 4), 4);
		assert_eq!(align_up(6, 4), 8);
		assert_eq!(align_up(3, 2), 4);
		assert_eq!(align_up(2, 2), 2);
	}

	#[test]
	fn cstring_read_consumes_terminator_and_pads() {
		let mut cursor = Cursor::new(b"ab\0\0cd\0\0".to_vec());
		assert_eq!(cursor.read_cstring().expect("first string"), "ab");
		assert_eq!(cursor.pos(), 4);
		assert_eq!(cursor.read_cstring().expect("second string"), "cd");
		assert_eq!(cursor.pos(), 8);
	}

	#[test]
	fn unterminated_cstring_reports_truncation() {
		let mut cursor = Cursor::new(b"abc".to_vec());
		let err = cursor.read_cstring().expect_err("missing terminator");
		assert!(matches!(err, TokenError::TruncatedStream { at: 0, need: 4, rem: 3 }));
	}

	#[test]
	fn short_read_reports_offset_and_remaining() {
		let mut cursor = Cursor::new(vec![1, 2, 3]);
		cursor.align(2);
		assert_eq!(cursor.read_u16_le().expect("u16"), 0x0201);
		let err = cursor.read_u32_le().expect_err("only one byte left");
		assert!(matches!(err, TokenError::TruncatedStream { at: 2, need: 4, rem: 1 }));
	}

	#[test]
	fn buffer_pads_with_zeros_and_lowercases_strings() {
		let mut buf = ByteBuf::with_capacity(16);
		buf.put_u16_le(0xBEEF);
		buf.put_cstring("Ab");
		assert_eq!(buf.as_slice(), &[0xEF, 0xBE, 0, 0, b'a', b'b', 0]);
	}
}
