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

//! Generates `decode_pnext.rs` in `OUT_DIR` from the bundled registry description.

use pnext_gen::{generate, GeneratorOptions, Registry};
use std::{env, error::Error, fs, path::PathBuf};

const REGISTRY: &str = "definitions/registry.json";

fn main() -> Result<(), Box<dyn Error>> {
	let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
	let out_dir = PathBuf::from(env::var("OUT_DIR")?);

	let registry_path = manifest_dir.join(REGISTRY);
	println!("cargo:rerun-if-changed={}", registry_path.display());
	println!("cargo:rerun-if-changed=build.rs");

	let raw = fs::read_to_string(&registry_path)?;
	let registry = Registry::new(&raw)?;

	// Every structure in the bundled registry has a decode routine, so a gap is a mistake.
	let options = GeneratorOptions::builder().strict(true).build();
	let generated = generate(&registry, &options)?;

	fs::write(out_dir.join("decode_pnext.rs"), generated.source)?;
	Ok(())
}
