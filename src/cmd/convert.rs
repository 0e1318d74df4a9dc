use std::fs;
use std::path::PathBuf;

use rayon::prelude::*;
use xtoken::token::{ConvertReport, Result, TokenError, convert_file};

#[derive(clap::Args)]
pub struct Args {
	/// Files to convert; the extension picks the direction.
	#[arg(required = true)]
	pub paths: Vec<PathBuf>,
	/// Write outputs here instead of beside each source.
	#[arg(long)]
	pub out_dir: Option<PathBuf>,
	/// Worker threads (defaults to the number of CPUs).
	#[arg(long, short = 'j')]
	pub jobs: Option<usize>,
}

/// Convert every path, logging each outcome. Returns `false` if any file failed.
pub fn run(args: Args) -> Result<bool> {
	let Args { paths, out_dir, jobs } = args;

	if let Some(dir) = &out_dir {
		fs::create_dir_all(dir)?;
	}

	let mut pool = rayon::ThreadPoolBuilder::new();
	if let Some(jobs) = jobs {
		pool = pool.num_threads(jobs);
	}
	let pool = pool.build().map_err(|err| TokenError::Io(std::io::Error::other(err)))?;

	let results: Vec<Result<ConvertReport>> = pool.install(|| {
		paths
			.par_iter()
			.map(|path| {
				tracing::debug!(path = %path.display(), "converting");
				convert_file(path, out_dir.as_deref())
			})
			.collect()
	});

	let mut failed = 0_usize;
	for (path, result) in paths.iter().zip(results) {
		let name = path.file_name().map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());
		match result {
			Ok(report) => tracing::info!("Converted: {name} in {:.3} seconds", report.elapsed.as_secs_f32()),
			Err(err) => {
				failed += 1;
				tracing::error!("Failed to convert {name}: {err}");
			}
		}
	}

	if failed > 0 {
		tracing::warn!(failed, total = paths.len(), "some files were not converted");
	}
	Ok(failed == 0)
}
