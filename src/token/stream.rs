use crate::token::{BoneInfo, BoneWeight, DataType, Result, Token, TokenData, TokenError, TokenPayload, TokenValue, Tri, UShortString, UShortStringX3};

/// Forward-only source of decoded tokens.
pub trait TokenReader {
	/// Decode the next token, or `Ok(None)` at the genuine end of input.
	fn next_token(&mut self) -> Result<Option<TokenData>>;

	/// Read the next non-comment token and extract payload `T` from it.
	///
	/// Fails with `UnexpectedToken` when the name is not in `names` or the
	/// payload shape is not `T`, and with `EndOfStream` when input runs out.
	fn expect_token<T: TokenPayload>(&mut self, names: &[&str]) -> Result<T>
	where
		Self: Sized,
	{
		loop {
			let Some(data) = self.next_token()? else {
				return Err(TokenError::EndOfStream);
			};
			if data.token().data_type == DataType::Comment {
				continue;
			}
			if !names.contains(&data.name()) {
				return Err(unexpected::<T>(names, &data));
			}
			return T::from_token(data).map_err(|data| unexpected::<T>(names, &data));
		}
	}

	/// Single-name form of [`expect_token`](Self::expect_token).
	fn expect_one<T: TokenPayload>(&mut self, name: &str) -> Result<T>
	where
		Self: Sized,
	{
		self.expect_token(&[name])
	}

	/// Lazy iterator over the remaining tokens; stops after the first error.
	fn tokens(&mut self) -> Tokens<'_, Self>
	where
		Self: Sized,
	{
		Tokens { reader: self, done: false }
	}
}

impl<R: TokenReader + ?Sized> TokenReader for Box<R> {
	fn next_token(&mut self) -> Result<Option<TokenData>> {
		(**self).next_token()
	}
}

impl<R: TokenReader + ?Sized> TokenReader for &mut R {
	fn next_token(&mut self) -> Result<Option<TokenData>> {
		(**self).next_token()
	}
}

fn unexpected<T: TokenPayload>(names: &[&str], got: &TokenData) -> TokenError {
	TokenError::UnexpectedToken {
		expected: names.join(", "),
		expected_kind: T::KIND,
		got: got.name(),
		got_kind: got.token().data_type.as_str(),
	}
}

/// Iterator returned by [`TokenReader::tokens`].
pub struct Tokens<'a, R> {
	reader: &'a mut R,
	done: bool,
}

impl<R: TokenReader> Iterator for Tokens<'_, R> {
	type Item = Result<TokenData>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done {
			return None;
		}
		match self.reader.next_token() {
			Ok(Some(data)) => Some(Ok(data)),
			Ok(None) => {
				self.done = true;
				None
			}
			Err(err) => {
				self.done = true;
				Some(Err(err))
			}
		}
	}
}

impl<R: TokenReader> std::iter::FusedIterator for Tokens<'_, R> {}

/// Sink that serializes tokens into one encoding.
///
/// Each `write_*` method takes the schema entry (for its name and hash) and
/// the payload of one data type. [`write_token`](Self::write_token) is the
/// single dispatch point from decoded values.
pub trait TokenWriter {
	/// Write a payload-less section marker.
	fn write_section(&mut self, token: &Token) -> Result<()>;
	/// Write a comment.
	fn write_comment(&mut self, token: &Token, text: &str) -> Result<()>;
	/// Write a bone declaration.
	fn write_bone_info(&mut self, token: &Token, info: &BoneInfo) -> Result<()>;
	/// Write a signed 16-bit scalar.
	fn write_short(&mut self, token: &Token, value: i16) -> Result<()>;
	/// Write an unsigned 16-bit scalar.
	fn write_ushort(&mut self, token: &Token, value: u16) -> Result<()>;
	/// Write a signed 32-bit scalar.
	fn write_int(&mut self, token: &Token, value: i32) -> Result<()>;
	/// Write an unsigned 32-bit scalar.
	fn write_uint(&mut self, token: &Token, value: u32) -> Result<()>;
	/// Write a float.
	fn write_float(&mut self, token: &Token, value: f32) -> Result<()>;
	/// Write two floats.
	fn write_vector2(&mut self, token: &Token, value: [f32; 2]) -> Result<()>;
	/// Write three floats.
	fn write_vector3(&mut self, token: &Token, value: [f32; 3]) -> Result<()>;
	/// Write a three-channel vector that is packed in binary form.
	fn write_vector3_16bit(&mut self, token: &Token, value: [f32; 3]) -> Result<()>;
	/// Write four floats.
	fn write_vector4(&mut self, token: &Token, value: [f32; 4]) -> Result<()>;
	/// Write a four-channel vector that is packed in binary form.
	fn write_vector4_8bit(&mut self, token: &Token, value: [f32; 4]) -> Result<()>;
	/// Write a bone influence.
	fn write_bone_weight(&mut self, token: &Token, weight: BoneWeight) -> Result<()>;
	/// Write a triangle header with byte-sized binary fields.
	fn write_tri(&mut self, token: &Token, tri: Tri) -> Result<()>;
	/// Write a triangle header with short-sized binary fields.
	fn write_tri16(&mut self, token: &Token, tri: Tri) -> Result<()>;
	/// Write a counted list of UV pairs.
	fn write_uv_set(&mut self, token: &Token, uvs: &[[f32; 2]]) -> Result<()>;
	/// Write a value with one string.
	fn write_ushort_string(&mut self, token: &Token, item: &UShortString) -> Result<()>;
	/// Write a value with three strings.
	fn write_ushort_string_x3(&mut self, token: &Token, item: &UShortStringX3) -> Result<()>;

	/// Flush all output and release the destination. Runs at most once;
	/// later calls and writes fail with `WriterFinished`.
	fn finish(&mut self) -> Result<()>;

	/// Serialize one decoded token.
	fn write_token(&mut self, data: &TokenData) -> Result<()> {
		let token = data.token();
		match data.value() {
			TokenValue::Comment(text) => self.write_comment(token, text),
			TokenValue::Section => self.write_section(token),
			TokenValue::Short(value) => self.write_short(token, *value),
			TokenValue::UShort(value) => self.write_ushort(token, *value),
			TokenValue::UInt(value) => self.write_uint(token, *value),
			TokenValue::Int(value) => self.write_int(token, *value),
			TokenValue::Vector48Bit(value) => self.write_vector4_8bit(token, *value),
			TokenValue::Vector316Bit(value) => self.write_vector3_16bit(token, *value),
			TokenValue::Float(value) => self.write_float(token, *value),
			TokenValue::Vector2(value) => self.write_vector2(token, *value),
			TokenValue::Vector3(value) => self.write_vector3(token, *value),
			TokenValue::Vector4(value) => self.write_vector4(token, *value),
			TokenValue::BoneWeight(weight) => self.write_bone_weight(token, *weight),
			TokenValue::UvSet(uvs) => self.write_uv_set(token, uvs),
			TokenValue::UShortString(item) => self.write_ushort_string(token, item),
			TokenValue::UShortStringX3(item) => self.write_ushort_string_x3(token, item),
			TokenValue::BoneInfo(info) => self.write_bone_info(token, info),
			TokenValue::Tri(tri) => self.write_tri(token, *tri),
			TokenValue::Tri16(tri) => self.write_tri16(token, *tri),
		}
	}
}

/// Copy every remaining token from `reader` into `writer`.
///
/// Returns the number of tokens copied. The writer is left open.
pub fn transcode(reader: &mut dyn TokenReader, writer: &mut dyn TokenWriter) -> Result<usize> {
	let mut count = 0;
	while let Some(data) = reader.next_token()? {
		writer.write_token(&data)?;
		count += 1;
	}
	Ok(count)
}
