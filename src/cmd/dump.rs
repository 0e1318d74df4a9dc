use std::io;
use std::path::PathBuf;

use xtoken::token::{Result, TextTokenWriter, TokenReader, TokenWriter, open_reader};

use crate::cmd::util::{emit_json, hash_hex, value_json};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Emit a JSON array instead of export text.
	#[arg(long)]
	pub json: bool,
	/// Stop after this many tokens.
	#[arg(long)]
	pub limit: Option<usize>,
}

/// Print the token stream of any supported file.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json, limit } = args;

	let mut reader = open_reader(&path)?;
	let tokens = reader.tokens().take(limit.unwrap_or(usize::MAX));

	if json {
		let mut items = Vec::new();
		for (index, data) in tokens.enumerate() {
			let data = data?;
			let token = data.token();
			items.push(TokenJson {
				index,
				name: token.name,
				data_type: token.data_type.as_str(),
				hash: hash_hex(token.hash),
				value: value_json(data.value()),
			});
		}
		emit_json(&items);
		return Ok(());
	}

	let mut writer = TextTokenWriter::new(io::stdout().lock());
	for data in tokens {
		writer.write_token(&data?)?;
	}
	writer.finish()
}

#[derive(serde::Serialize)]
struct TokenJson {
	index: usize,
	name: &'static str,
	data_type: &'static str,
	hash: String,
	value: serde_json::Value,
}
