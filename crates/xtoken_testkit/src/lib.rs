//! Shared test helpers for workspace crates.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve a fixture path under `<workspace>/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
	workspace_root().join("fixtures").join(name)
}

/// Read a fixture as UTF-8 text.
pub fn fixture_text(name: &str) -> String {
	let path = fixture_path(name);
	fs::read_to_string(&path).unwrap_or_else(|err| panic!("read fixture {}: {err}", path.display()))
}

/// Canonical text form of a fixture: blank lines dropped, `\n` line ends.
///
/// Fixtures are authored in the writer's own formatting, so this is what a
/// text writer must reproduce after reading the fixture back.
pub fn canonical_text(name: &str) -> String {
	fixture_text(name)
		.lines()
		.filter(|line| !line.trim().is_empty())
		.map(|line| format!("{line}\n"))
		.collect()
}

/// Scratch directory that is removed on drop.
pub fn scratch_dir() -> TempDir {
	tempfile::Builder::new()
		.prefix("xtoken-test-")
		.tempdir()
		.unwrap_or_else(|err| panic!("create scratch dir: {err}"))
}

/// Write `contents` to `<dir>/<name>` and return the path.
pub fn write_file(dir: &Path, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
	let path = dir.join(name);
	fs::write(&path, contents).unwrap_or_else(|err| panic!("write {}: {err}", path.display()));
	path
}

/// Copy a fixture into `dir`, keeping its file name.
pub fn copy_fixture(dir: &Path, name: &str) -> PathBuf {
	write_file(dir, name, fixture_text(name))
}
