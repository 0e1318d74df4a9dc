#![allow(missing_docs)]

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "xtoken", version, about = "Convert xmodel/xanim token files between binary and text")]
struct Cli {
	/// Increase log detail (-v debug, -vv trace). RUST_LOG takes precedence.
	#[arg(short, long, action = ArgAction::Count, global = true)]
	verbose: u8,
	/// Only log errors.
	#[arg(short, long, global = true, conflicts_with = "verbose")]
	quiet: bool,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Convert files to their counterpart encoding (bin <-> export).
	Convert(cmd::convert::Args),
	/// Print the tokens of a file as export text or JSON.
	Dump(cmd::dump::Args),
	/// Print format, container, and token statistics.
	Info(cmd::info::Args),
}

fn main() {
	let cli = Cli::parse();
	init_tracing(cli.verbose, cli.quiet);

	match run(cli.command) {
		Ok(true) => {}
		Ok(false) => std::process::exit(1),
		Err(err) => {
			eprintln!("error: {err}");
			std::process::exit(1);
		}
	}
}

fn run(command: Commands) -> xtoken::token::Result<bool> {
	match command {
		Commands::Convert(args) => cmd::convert::run(args),
		Commands::Dump(args) => cmd::dump::run(args).map(|()| true),
		Commands::Info(args) => cmd::info::run(args).map(|()| true),
	}
}

fn init_tracing(verbose: u8, quiet: bool) {
	let default = match (quiet, verbose) {
		(true, _) => "error",
		(false, 0) => "info",
		(false, 1) => "debug",
		(false, _) => "trace",
	};
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}
