use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use xtoken::token::{AssetFormat, ContainerHeader, DataType, Encoding, Result, TokenReader, open_reader};

use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Print format, container sizes, and per-token counts.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json } = args;

	let format = AssetFormat::from_path(&path)?;
	let file_size = fs::metadata(&path)?.len();
	let container = match format.encoding {
		Encoding::Binary => Some(ContainerHeader::parse(&fs::read(&path)?)?),
		Encoding::Text => None,
	};

	let mut counts: HashMap<(&'static str, DataType), usize> = HashMap::new();
	let mut total = 0_usize;
	let mut reader = open_reader(&path)?;
	for data in reader.tokens() {
		let data = data?;
		*counts.entry((data.name(), data.token().data_type)).or_default() += 1;
		total += 1;
	}

	let mut entries: Vec<_> = counts.into_iter().collect();
	entries.sort_by(|left, right| {
		right
			.1
			.cmp(&left.1)
			.then_with(|| left.0.0.cmp(right.0.0))
			.then_with(|| (left.0.1 as u16).cmp(&(right.0.1 as u16)))
	});

	if json {
		let payload = InfoJson {
			path: path.display().to_string(),
			format,
			file_size,
			container: container.map(|header| ContainerJson {
				uncompressed_size: header.uncompressed_size,
				compressed_size: header.compressed_size,
			}),
			token_count: total,
			tokens: entries
				.iter()
				.map(|&((name, data_type), count)| TokenCountJson {
					name,
					data_type: data_type.as_str(),
					count,
				})
				.collect(),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("format: {format}");
	println!("file_size: {file_size}");
	if let Some(header) = container {
		println!("uncompressed_size: {}", header.uncompressed_size);
		println!("compressed_size: {}", header.compressed_size);
	}
	println!("token_count: {total}");
	println!("tokens:");
	for ((name, data_type), count) in entries {
		println!("  {name} ({}): {count}", data_type.as_str());
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct ContainerJson {
	uncompressed_size: u32,
	compressed_size: usize,
}

#[derive(serde::Serialize)]
struct TokenCountJson {
	name: &'static str,
	data_type: &'static str,
	count: usize,
}

#[derive(serde::Serialize)]
struct InfoJson {
	path: String,
	format: AssetFormat,
	file_size: u64,
	container: Option<ContainerJson>,
	token_count: usize,
	tokens: Vec<TokenCountJson>,
}
