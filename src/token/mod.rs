mod binary;
mod bytes;
mod container;
mod convert;
mod error;
mod format;
mod schema;
mod stream;
mod text;
mod value;

/// Binary codec types and quantization units.
pub use binary::{BYTE_UNIT, BinaryTokenReader, BinaryTokenWriter, SHORT_UNIT};
/// LZ4 container header and codec.
pub use container::{ContainerHeader, LZ4_MAGIC, decode_container, encode_container};
/// Whole-file conversion entry point.
pub use convert::{ConvertReport, convert_file};
/// Error and result aliases.
pub use error::{Result, TokenError};
/// Extension-based format detection and file opening.
pub use format::{AssetFormat, AssetKind, Encoding, converted_path, create_writer, open_reader};
/// Token schema table and lookups.
pub use schema::{DataType, Token, lookup, lookup_by_hash, lookup_by_name, token_hash, tokens};
/// Reader/writer traits and stream helpers.
pub use stream::{TokenReader, TokenWriter, Tokens, transcode};
/// Text codec types.
pub use text::{TextTokenReader, TextTokenWriter};
/// Decoded token payload types.
pub use value::{BoneInfo, BoneWeight, TokenData, TokenPayload, TokenValue, Tri, UShortString, UShortStringX3};
