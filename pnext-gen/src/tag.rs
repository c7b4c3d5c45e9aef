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

//! Working out the structure type enumerant of a structure.
//!
//! The registry annotates most discriminant members with their value. For the ones it does not,
//! the enumerant name is derived from the type name, `VkPhysicalDeviceIDProperties` becoming
//! `VK_STRUCTURE_TYPE_PHYSICAL_DEVICE_ID_PROPERTIES`. The derivation only knows the irregular
//! names listed in [`GeneratorOptions::name_corrections`], so a new oddly named type can derive
//! the wrong name. Every use of it is logged.

use crate::{registry::StructureDescriptor, GeneratorOptions, Result};
use onig::{Captures, Regex};
use serde::Serialize;

/// Matches a lower case letter or digit followed by an upper case letter.
fn camel_case_boundary() -> Result<Regex> {
	Regex::new(r"([a-z0-9])([A-Z])").map_err(Into::into)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TagSource {
	/// Taken verbatim from the registry.
	Explicit,
	/// Derived from the type name.
	Derived,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagName {
	pub name: String,
	pub source: TagSource,
}

pub struct TagDeriver<'a> {
	boundary: Regex,
	options: &'a GeneratorOptions,
}

impl<'a> TagDeriver<'a> {
	pub fn new(options: &'a GeneratorOptions) -> Result<Self> {
		Ok(Self { boundary: camel_case_boundary()?, options })
	}

	/// The enumerant naming the structure type of `desc`.
	///
	/// # Return
	/// returns None for base structures and for structures without a discriminant member,
	/// neither of which can be decoded as a chain link
	pub fn resolve(&self, desc: &StructureDescriptor) -> Option<TagName> {
		if self.options.is_base_structure(&desc.name) {
			return None;
		}

		let discriminant = desc.member(&self.options.discriminant_member)?;
		match &discriminant.values {
			Some(values) => Some(TagName { name: values.clone(), source: TagSource::Explicit }),
			None => Some(TagName { name: self.derive(&desc.name), source: TagSource::Derived }),
		}
	}

	/// Derive an enumerant name from a type name.
	///
	/// Only a leading API prefix is replaced by the tag prefix. The same text later in the name is
	/// left alone.
	pub fn derive(&self, type_name: &str) -> String {
		let segmented = self.boundary.replace_all(type_name, |caps: &Captures| {
			format!("{}_{}", caps.at(1).unwrap_or_default(), caps.at(2).unwrap_or_default())
		});

		let corrected =
			self.options.name_corrections.iter().fold(segmented, |name, (from, to)| name.replace(from.as_str(), to));

		let upper = corrected.to_uppercase();
		match upper.strip_prefix(&self.options.api_prefix) {
			Some(rest) => format!("{}{}", self.options.tag_prefix, rest),
			None => upper,
		}
	}
}
