// Copyright 2021 Parity Technologies (UK) Ltd.
// This file is part of pnext.
//
// pnext is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// pnext is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with pnext.  If not, see <http://www.gnu.org/licenses/>.

use anyhow::Context;
use clap::{Parser, Subcommand};
use pnext_decode::{decode_pnext_struct, PNextNode};
use pnext_gen::{generate, GeneratorOptions, Registry, TagEntry};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Opts {
	#[command(subcommand)]
	command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
	/// Generate the extension chain decoder from a registry description
	Generate {
		/// Registry description in JSON
		registry: PathBuf,
		/// Generator options in JSON. Unset fields keep their defaults
		#[arg(short, long)]
		options: Option<PathBuf>,
		/// Write the source here instead of to stdout
		#[arg(long)]
		out: Option<PathBuf>,
		/// Fail on structures whose structure type cannot be resolved
		#[arg(long)]
		strict: bool,
		/// Print the dispatch table as JSON to stderr
		#[arg(long)]
		summary: bool,
	},
	/// Decode one extension chain link and print it as JSON
	Decode {
		/// Encoded link in the form 0x1a2b3c
		link: String,
	},
}

/// What the generator produced, besides the source.
#[derive(Serialize)]
struct Summary<'a> {
	entries: &'a [TagEntry],
	excluded: &'a [String],
}

#[derive(Serialize)]
struct Decoded {
	bytes_read: usize,
	remaining: usize,
	node: PNextNode,
}

fn main() -> Result<(), anyhow::Error> {
	let opts = Opts::parse();
	pretty_env_logger::init();

	match opts.command {
		Command::Generate { registry, options, out, strict, summary } => {
			run_generate(registry, options, out, strict, summary)
		}
		Command::Decode { link } => run_decode(&link),
	}
}

fn run_generate(
	registry: PathBuf,
	options: Option<PathBuf>,
	out: Option<PathBuf>,
	strict: bool,
	summary: bool,
) -> Result<(), anyhow::Error> {
	let raw = std::fs::read_to_string(&registry).with_context(|| format!("reading {}", registry.display()))?;
	let registry = Registry::new(&raw)?;

	let mut options = match options {
		Some(path) => {
			let raw = std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
			GeneratorOptions::from_json(&raw)?
		}
		None => GeneratorOptions::default(),
	};
	options.strict |= strict;

	let generated = generate(&registry, &options)?;
	if !generated.excluded.is_empty() {
		log::warn!("{} structures left out of the dispatch table", generated.excluded.len());
	}

	if summary {
		let summary = Summary { entries: &generated.entries, excluded: &generated.excluded };
		eprintln!("{}", serde_json::to_string_pretty(&summary)?);
	}

	match out {
		Some(path) => std::fs::write(&path, generated.source).with_context(|| format!("writing {}", path.display()))?,
		None => print!("{}", generated.source),
	}
	Ok(())
}

fn run_decode(link: &str) -> Result<(), anyhow::Error> {
	let link = match link.strip_prefix("0x") {
		Some(link) => link,
		None => anyhow::bail!("Link should start with 0x"),
	};

	let bytes = match hex::decode(link) {
		Ok(bytes) => bytes,
		Err(e) => anyhow::bail!("Cannot decode hex string into bytes: {}", e),
	};

	let (bytes_read, node) = decode_pnext_struct(&bytes);
	let decoded = Decoded { bytes_read, remaining: bytes.len() - bytes_read, node };
	println!("{}", serde_json::to_string_pretty(&decoded)?);
	Ok(())
}
