use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::token::{Result, converted_path, create_writer, open_reader, transcode};

/// Outcome of one successful file conversion.
#[derive(Debug, Clone)]
pub struct ConvertReport {
	/// Input file.
	pub source: PathBuf,
	/// Written file.
	pub destination: PathBuf,
	/// Tokens copied.
	pub tokens: usize,
	/// Wall time spent reading, converting, and writing.
	pub elapsed: Duration,
}

/// Convert `source` into its counterpart encoding.
///
/// The destination keeps the file stem and swaps the extension; it lands in
/// `out_dir` when given. A failed conversion removes the partial output.
pub fn convert_file(source: &Path, out_dir: Option<&Path>) -> Result<ConvertReport> {
	let started = Instant::now();
	let destination = converted_path(source, out_dir)?;
	let mut reader = open_reader(source)?;
	let mut writer = create_writer(&destination)?;

	let copied = transcode(&mut *reader, &mut *writer).and_then(|tokens| writer.finish().map(|()| tokens));
	drop(writer);
	let tokens = match copied {
		Ok(tokens) => tokens,
		Err(err) => {
			if let Err(remove_err) = fs::remove_file(&destination) {
				tracing::debug!(path = %destination.display(), %remove_err, "could not remove partial output");
			}
			return Err(err);
		}
	};

	let elapsed = started.elapsed();
	tracing::debug!(
		source = %source.display(),
		destination = %destination.display(),
		tokens,
		elapsed_ms = elapsed.as_millis() as u64,
		"converted token file"
	);
	Ok(ConvertReport {
		source: source.to_path_buf(),
		destination,
		tokens,
		elapsed,
	})
}
