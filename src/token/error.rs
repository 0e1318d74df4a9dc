use thiserror::Error;

use crate::token::DataType;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, TokenError>;

/// Errors produced while reading, writing, and converting token streams.
///
/// Every variant is fatal for the stream that produced it. Reaching the end
/// of input is not an error: readers report it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum TokenError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Binary container did not start with the `*LZ4*` magic.
	#[error("not an lz4 token container (magic={magic:02x?})")]
	BadMagic {
		/// First up-to-5 bytes of the stream.
		magic: [u8; 5],
	},
	/// Not enough bytes remained for a requested read.
	#[error("truncated stream at offset {at}, need {need} bytes, remaining {rem}")]
	TruncatedStream {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Declared uncompressed size exceeded the safety limit.
	#[error("declared uncompressed size {declared} exceeds limit {limit} bytes")]
	DecompressedTooLarge {
		/// Size taken from the container header.
		declared: usize,
		/// Maximum allowed output bytes.
		limit: usize,
	},
	/// LZ4 rejected the compressed payload.
	#[error("lz4 payload could not be decoded into {declared} bytes: {source}")]
	Decompress {
		/// Size taken from the container header.
		declared: usize,
		/// Underlying decoder failure.
		#[source]
		source: lz4_flex::block::DecompressError,
	},
	/// LZ4 produced a different number of bytes than the header declared.
	#[error("decompressed size mismatch: declared {declared}, got {actual}")]
	SizeMismatch {
		/// Size taken from the container header.
		declared: usize,
		/// Bytes actually produced by the decoder.
		actual: usize,
	},
	/// Uncompressed token payload does not fit the 32-bit size field.
	#[error("token payload of {len} bytes exceeds the container size field")]
	PayloadTooLarge {
		/// Payload length in bytes.
		len: usize,
	},
	/// Binary hash or text name/arity did not resolve to a schema entry.
	#[error("unrecognized token {token} at {at}")]
	UnrecognizedToken {
		/// Offending hash (`0x....`) or text name.
		token: String,
		/// Byte offset or `line N` label.
		at: String,
	},
	/// Schema entry has a data type without a known payload layout.
	#[error("unsupported data type {data_type:?} for token {token} at {at}")]
	UnsupportedDataType {
		/// Token name.
		token: &'static str,
		/// Data type tag of the schema entry.
		data_type: DataType,
		/// Byte offset or `line N` label.
		at: String,
	},
	/// Text field could not be parsed as the required value.
	#[error("line {line}: malformed field {index} of {token}: {text:?}")]
	MalformedField {
		/// One-based physical line number.
		line: usize,
		/// Token name.
		token: String,
		/// Zero-based field position (0 is the token name).
		index: usize,
		/// Raw field text, or a decoder message.
		text: String,
	},
	/// Text line ended before a required field.
	#[error("line {line}: {token} is missing field {index}")]
	MissingField {
		/// One-based physical line number.
		line: usize,
		/// Token name.
		token: &'static str,
		/// Zero-based field position (0 is the token name).
		index: usize,
	},
	/// Quoted text field crossed a line break or the end of input.
	#[error("line {line}: unterminated string literal")]
	UnterminatedLiteral {
		/// One-based physical line number where the literal started.
		line: usize,
	},
	/// Next token did not match the caller's expectation.
	#[error("expected {expected} ({expected_kind}) but got {got} ({got_kind})")]
	UnexpectedToken {
		/// Accepted token names, comma separated.
		expected: String,
		/// Accepted payload kind.
		expected_kind: &'static str,
		/// Name of the token actually read.
		got: &'static str,
		/// Data type label of the token actually read.
		got_kind: &'static str,
	},
	/// Input ended while a specific token was still expected.
	#[error("unexpected end of token stream")]
	EndOfStream,
	/// Payload variant does not belong to the token's data type.
	#[error("token {token} expects {expected:?} payload, got {got:?}")]
	ShapeMismatch {
		/// Token name.
		token: &'static str,
		/// Data type declared by the schema.
		expected: DataType,
		/// Data type of the supplied value.
		got: DataType,
	},
	/// Writer was used after it had been finalized.
	#[error("token writer already finished")]
	WriterFinished,
	/// File extension does not map to a known token encoding.
	#[error("unsupported file extension: {path}")]
	UnsupportedExtension {
		/// Offending path.
		path: String,
	},
}
