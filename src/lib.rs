//! Lossless conversion between binary (`*_bin`) and text (`*_export`)
//! xmodel/xanim token streams.

/// Token schema, codecs, and file conversion.
pub mod token;
