//! LZ4-compressed binary encoding (`*.xmodel_bin`, `*.xanim_bin`).
//!
//! Every token starts 4-byte aligned with its `u16` schema hash; payload
//! fields follow with per-type alignment. Padding is always zero.

mod reader;
mod writer;

pub use reader::BinaryTokenReader;
pub use writer::BinaryTokenWriter;

/// Scale applied to `i16` channels of [`DataType::Vector316Bit`](crate::token::DataType::Vector316Bit).
pub const SHORT_UNIT: f32 = 32767.0;
/// Scale applied to `u8` channels of [`DataType::Vector48Bit`](crate::token::DataType::Vector48Bit).
pub const BYTE_UNIT: f32 = 255.0;
