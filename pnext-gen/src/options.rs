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

//! Naming conventions and policy knobs of the generator.

use crate::Result;
use serde::{Deserialize, Serialize};

/// Everything the generator needs to know about the naming conventions of the API it
/// generates a dispatch table for. The defaults describe Vulkan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
	/// Chain root types. They carry a discriminant but never a payload of their own.
	pub base_structures: Vec<String>,
	/// Name of the member that holds the structure type.
	pub discriminant_member: String,
	/// Name of the enumeration listing every structure type value.
	pub structure_type_enum: String,
	/// Prefix of every type name, stripped when naming generated items.
	pub type_prefix: String,
	/// Prefix that upper-cased type names start with.
	pub api_prefix: String,
	/// Prefix of every structure type enumerant.
	pub tag_prefix: String,
	/// Prefix of the decoded form of a structure, `Decoded` gives `DecodedApplicationInfo`.
	pub decoded_prefix: String,
	/// Replacements applied to a camel-case segmented name before it is upper-cased.
	pub name_corrections: Vec<(String, String)>,
	/// Fail generation, instead of warning, when a structure type value cannot be found.
	pub strict: bool,
}

impl Default for GeneratorOptions {
	fn default() -> Self {
		Self {
			base_structures: vec!["VkBaseOutStructure".to_string(), "VkBaseInStructure".to_string()],
			discriminant_member: "sType".to_string(),
			structure_type_enum: "VkStructureType".to_string(),
			type_prefix: "Vk".to_string(),
			api_prefix: "VK_".to_string(),
			tag_prefix: "VK_STRUCTURE_TYPE_".to_string(),
			decoded_prefix: "Decoded".to_string(),
			name_corrections: vec![
				("D3_D12".to_string(), "D3D12".to_string()),
				("Device_IDProp".to_string(), "Device_ID_Prop".to_string()),
			],
			strict: false,
		}
	}
}

impl GeneratorOptions {
	/// Build the builder for `GeneratorOptions`
	pub fn builder() -> Builder {
		Builder::default()
	}

	/// Construct the options from JSON. Missing fields keep their default value.
	pub fn from_json(raw_json: &str) -> Result<Self> {
		serde_json::from_str(raw_json).map_err(Into::into)
	}

	pub fn is_base_structure(&self, name: &str) -> bool {
		self.base_structures.iter().any(|base| base == name)
	}
}

#[derive(Default)]
pub struct Builder {
	options: GeneratorOptions,
}

impl Builder {
	pub fn base_structures<I, S>(mut self, names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.options.base_structures = names.into_iter().map(Into::into).collect();
		self
	}

	pub fn discriminant_member(mut self, name: impl Into<String>) -> Self {
		self.options.discriminant_member = name.into();
		self
	}

	pub fn structure_type_enum(mut self, name: impl Into<String>) -> Self {
		self.options.structure_type_enum = name.into();
		self
	}

	pub fn type_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.options.type_prefix = prefix.into();
		self
	}

	pub fn api_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.options.api_prefix = prefix.into();
		self
	}

	pub fn tag_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.options.tag_prefix = prefix.into();
		self
	}

	pub fn decoded_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.options.decoded_prefix = prefix.into();
		self
	}

	/// Add a correction on top of the ones already configured.
	pub fn name_correction(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
		self.options.name_corrections.push((from.into(), to.into()));
		self
	}

	pub fn strict(mut self, strict: bool) -> Self {
		self.options.strict = strict;
		self
	}

	pub fn build(self) -> GeneratorOptions {
		self.options
	}
}
