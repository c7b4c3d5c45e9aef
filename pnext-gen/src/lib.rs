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

//! Generates the extension chain decoder from a machine readable API description.
//!
//! The [`Registry`] is walked feature by feature ([`RegistryWalker`]), resolving the
//! structure type of every structure that can appear in an extension chain, and the
//! [`DispatchEmitter`] turns those into the Rust source of a decoder with one match arm
//! per structure type. See [`generate`].

#![forbid(unsafe_code)]

mod error;
pub mod emit;
pub mod options;
pub mod registry;
pub mod tag;
pub mod walker;

pub use self::emit::DispatchEmitter;
pub use self::error::Error;
pub use self::options::GeneratorOptions;
pub use self::registry::Registry;
pub use self::tag::{TagDeriver, TagSource};
pub use self::walker::{FeatureTags, RegistryWalker, TagEntry};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The output of [`generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
	/// Rust source of the decoder.
	pub source: String,
	/// Every entry of the dispatch table, in table order.
	pub entries: Vec<TagEntry>,
	/// Chain structures left out of the table because their structure type could not be resolved.
	pub excluded: Vec<String>,
}

/// Generate the decoder source for every feature of `registry`, in registry order.
pub fn generate(registry: &Registry, options: &GeneratorOptions) -> Result<Generated> {
	let mut walker = RegistryWalker::new(registry, options)?;
	let mut emitter = DispatchEmitter::new(options);

	for feature in registry.features() {
		let tags = walker.walk_feature(feature)?;
		emitter.emit_feature(tags)?;
	}

	let (source, entries) = emitter.finish();
	let excluded = walker.into_excluded();
	log::debug!("Generated {} dispatch entries, {} structures left out", entries.len(), excluded.len());

	Ok(Generated { source, entries, excluded })
}
