//! Whitespace-delimited text encoding (`*.xmodel_export`, `*.xanim_export`).
//!
//! One token per line: the token name followed by its fields. Fields are
//! separated by commas or whitespace, strings are double-quoted, and `//`
//! turns the rest of the line into a single comment field.

mod lexer;
mod reader;
mod writer;

pub use reader::TextTokenReader;
pub use writer::TextTokenWriter;
