use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::token::{BinaryTokenReader, BinaryTokenWriter, Result, TextTokenReader, TextTokenWriter, TokenError, TokenReader, TokenWriter};

/// Physical encoding of a token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
	/// LZ4 container around the aligned binary payload.
	Binary,
	/// Line-oriented export text.
	Text,
}

/// Asset described by a token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
	/// Skinned model (`xmodel`).
	Model,
	/// Animation (`xanim`).
	Anim,
}

/// File format selected by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AssetFormat {
	/// Asset kind.
	pub kind: AssetKind,
	/// Physical encoding.
	pub encoding: Encoding,
}

impl AssetFormat {
	/// Every supported format.
	pub const ALL: [Self; 4] = [
		Self::new(AssetKind::Model, Encoding::Binary),
		Self::new(AssetKind::Model, Encoding::Text),
		Self::new(AssetKind::Anim, Encoding::Binary),
		Self::new(AssetKind::Anim, Encoding::Text),
	];

	/// Pair an asset kind with an encoding.
	pub const fn new(kind: AssetKind, encoding: Encoding) -> Self {
		Self { kind, encoding }
	}

	/// File extension without the leading dot.
	pub fn extension(self) -> &'static str {
		match (self.kind, self.encoding) {
			(AssetKind::Model, Encoding::Binary) => "xmodel_bin",
			(AssetKind::Model, Encoding::Text) => "xmodel_export",
			(AssetKind::Anim, Encoding::Binary) => "xanim_bin",
			(AssetKind::Anim, Encoding::Text) => "xanim_export",
		}
	}

	/// Match an extension (without the dot), ignoring ASCII case.
	pub fn from_extension(ext: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|format| format.extension().eq_ignore_ascii_case(ext))
	}

	/// Detect the format of `path` from its extension.
	pub fn from_path(path: &Path) -> Result<Self> {
		path.extension()
			.and_then(|ext| ext.to_str())
			.and_then(Self::from_extension)
			.ok_or_else(|| TokenError::UnsupportedExtension {
				path: path.display().to_string(),
			})
	}

	/// Same asset kind in the other encoding.
	pub fn counterpart(self) -> Self {
		let encoding = match self.encoding {
			Encoding::Binary => Encoding::Text,
			Encoding::Text => Encoding::Binary,
		};
		Self::new(self.kind, encoding)
	}
}

impl fmt::Display for AssetFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.extension())
	}
}

/// Destination for converting `path`: the counterpart extension, placed in
/// `out_dir` when given and beside the source otherwise.
pub fn converted_path(path: &Path, out_dir: Option<&Path>) -> Result<PathBuf> {
	let target = AssetFormat::from_path(path)?.counterpart();
	let renamed = path.with_extension(target.extension());
	Ok(match (out_dir, renamed.file_name()) {
		(Some(dir), Some(name)) => dir.join(name),
		_ => renamed,
	})
}

/// Open a reader for `path`, picking the codec from its extension.
pub fn open_reader(path: &Path) -> Result<Box<dyn TokenReader>> {
	Ok(match AssetFormat::from_path(path)?.encoding {
		Encoding::Binary => Box::new(BinaryTokenReader::open(path)?),
		Encoding::Text => Box::new(TextTokenReader::open(path)?),
	})
}

/// Create a writer for `path`, picking the codec from its extension.
pub fn create_writer(path: &Path) -> Result<Box<dyn TokenWriter>> {
	Ok(match AssetFormat::from_path(path)?.encoding {
		Encoding::Binary => Box::new(BinaryTokenWriter::create(path)?),
		Encoding::Text => Box::new(TextTokenWriter::create(path)?),
	})
}
