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

//! The machine readable API description the dispatch table is generated from.
//!
//! The description is JSON, shaped like so:
//!
//! ```json
//! {
//!     "enums": {
//!         "VkStructureType": [{ "name": "VK_STRUCTURE_TYPE_APPLICATION_INFO", "value": 0 }]
//!     },
//!     "types": [
//!         { "name": "VkApplicationInfo", "members": [
//!             { "name": "sType", "type": "VkStructureType", "values": "VK_STRUCTURE_TYPE_APPLICATION_INFO" },
//!             { "name": "pNext", "type": "const void*" }
//!         ] },
//!         { "name": "VkApplicationInfoKHR", "alias": "VkApplicationInfo" }
//!     ],
//!     "features": [{ "name": "VK_VERSION_1_0", "require": ["VkApplicationInfo"] }]
//! }
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Aliases of aliases are allowed, but a chain this long means something is wrong.
const MAX_ALIAS_DEPTH: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enumerant {
	pub name: String,
	pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDescriptor {
	pub name: String,
	#[serde(rename = "type", default)]
	pub ty: String,
	/// Literal value the registry assigns to this member, used for the discriminant.
	#[serde(default)]
	pub values: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureDescriptor {
	pub name: String,
	#[serde(default)]
	pub alias: Option<String>,
	#[serde(default)]
	pub members: Vec<MemberDescriptor>,
}

impl StructureDescriptor {
	pub fn member(&self, name: &str) -> Option<&MemberDescriptor> {
		self.members.iter().find(|m| m.name == name)
	}
}

/// A versioned group of registry entries, either a core version or an extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
	pub name: String,
	#[serde(default)]
	pub require: Vec<String>,
}

#[derive(Deserialize)]
struct RawRegistry {
	#[serde(default)]
	enums: HashMap<String, Vec<Enumerant>>,
	#[serde(default)]
	types: Vec<StructureDescriptor>,
	#[serde(default)]
	features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
	/// enumeration name -> (enumerant name -> value)
	enums: HashMap<String, HashMap<String, u32>>,
	types: Vec<StructureDescriptor>,
	/// type name -> index into `types`
	types_by_name: HashMap<String, usize>,
	features: Vec<Feature>,
}

impl Registry {
	/// Construct the registry from JSON
	pub fn new(raw_json: &str) -> Result<Self> {
		let raw: RawRegistry = serde_json::from_str(raw_json)?;

		let enums = raw
			.enums
			.into_iter()
			.map(|(name, values)| (name, values.into_iter().map(|e| (e.name, e.value)).collect()))
			.collect();

		let mut types = Vec::with_capacity(raw.types.len());
		let mut types_by_name = HashMap::with_capacity(raw.types.len());
		for ty in raw.types {
			if types_by_name.contains_key(&ty.name) {
				log::debug!("Type `{}` is described more than once, keeping the first description", ty.name);
				continue;
			}
			types_by_name.insert(ty.name.clone(), types.len());
			types.push(ty);
		}

		Ok(Registry { enums, types, types_by_name, features: raw.features })
	}

	pub fn features(&self) -> &[Feature] {
		&self.features
	}

	pub fn types(&self) -> &[StructureDescriptor] {
		&self.types
	}

	pub fn structure(&self, name: &str) -> Option<&StructureDescriptor> {
		self.types_by_name.get(name).map(|&i| &self.types[i])
	}

	/// Follow aliases from `name` until a structure with its own description is found.
	pub fn resolve_alias<'a>(&'a self, name: &str) -> Result<Option<&'a StructureDescriptor>> {
		let mut current = match self.structure(name) {
			Some(desc) => desc,
			None => return Ok(None),
		};

		for _ in 0..MAX_ALIAS_DEPTH {
			let target = match &current.alias {
				Some(target) => target,
				None => return Ok(Some(current)),
			};
			current = self
				.structure(target)
				.ok_or_else(|| Error::UnknownAlias { alias: current.name.clone(), target: target.clone() })?;
		}

		Err(Error::AliasCycle(name.to_string()))
	}

	/// Look up the value of `enumerant` in the enumeration `enumeration`.
	pub fn enumerant(&self, enumeration: &str, enumerant: &str) -> Option<u32> {
		self.enums.get(enumeration)?.get(enumerant).copied()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const TEST_STR: &str = r#"
	{
		"enums": {
			"VkStructureType": [
				{ "name": "VK_STRUCTURE_TYPE_MEMORY_DEDICATED_ALLOCATE_INFO", "value": 1000127001 }
			]
		},
		"types": [
			{ "name": "VkMemoryDedicatedAllocateInfo", "members": [
				{ "name": "sType", "type": "VkStructureType", "values": "VK_STRUCTURE_TYPE_MEMORY_DEDICATED_ALLOCATE_INFO" },
				{ "name": "pNext", "type": "const void*" },
				{ "name": "image", "type": "VkImage" }
			] },
			{ "name": "VkMemoryDedicatedAllocateInfoKHR", "alias": "VkMemoryDedicatedAllocateInfo" },
			{ "name": "VkMemoryDedicatedAllocateInfoFOO", "alias": "VkMemoryDedicatedAllocateInfoKHR" },
			{ "name": "VkLoopA", "alias": "VkLoopB" },
			{ "name": "VkLoopB", "alias": "VkLoopA" },
			{ "name": "VkDangling", "alias": "VkNowhere" },
			{ "name": "VkMemoryDedicatedAllocateInfo" }
		],
		"features": [
			{ "name": "VK_VERSION_1_1", "require": ["VkMemoryDedicatedAllocateInfo"] }
		]
	}
	"#;

	#[test]
	fn should_parse_description() {
		let registry = Registry::new(TEST_STR).unwrap();
		assert_eq!(registry.features().len(), 1);
		assert_eq!(
			registry.enumerant("VkStructureType", "VK_STRUCTURE_TYPE_MEMORY_DEDICATED_ALLOCATE_INFO"),
			Some(1000127001)
		);
		assert_eq!(registry.enumerant("VkFormat", "VK_STRUCTURE_TYPE_MEMORY_DEDICATED_ALLOCATE_INFO"), None);

		let desc = registry.structure("VkMemoryDedicatedAllocateInfo").unwrap();
		assert_eq!(desc.member("sType").unwrap().ty, "VkStructureType");
		assert!(desc.member("pNext").unwrap().values.is_none());
	}

	#[test]
	fn duplicate_descriptions_collapse_to_the_first() {
		let registry = Registry::new(TEST_STR).unwrap();
		let desc = registry.structure("VkMemoryDedicatedAllocateInfo").unwrap();
		assert_eq!(desc.members.len(), 3);
		assert_eq!(registry.types().iter().filter(|t| t.name == "VkMemoryDedicatedAllocateInfo").count(), 1);
	}

	#[test]
	fn should_resolve_aliases_of_aliases() {
		let registry = Registry::new(TEST_STR).unwrap();
		let desc = registry.resolve_alias("VkMemoryDedicatedAllocateInfoFOO").unwrap().unwrap();
		assert_eq!(desc.name, "VkMemoryDedicatedAllocateInfo");
		assert!(registry.resolve_alias("VkUnknown").unwrap().is_none());
	}

	#[test]
	fn bad_aliases_are_errors() {
		let registry = Registry::new(TEST_STR).unwrap();
		assert!(matches!(registry.resolve_alias("VkLoopA"), Err(Error::AliasCycle(name)) if name == "VkLoopA"));
		assert!(matches!(
			registry.resolve_alias("VkDangling"),
			Err(Error::UnknownAlias { target, .. }) if target == "VkNowhere"
		));
	}

	#[test]
	fn malformed_json_is_an_error() {
		assert!(matches!(Registry::new("{ \"types\": 7 }"), Err(Error::Json(_))));
	}
}
