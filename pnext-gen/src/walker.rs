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

//! Walks the features of a [`Registry`], resolving the structure type of every structure that
//! can appear in an extension chain.

use crate::{
	registry::{Feature, Registry},
	tag::{TagDeriver, TagSource},
	Error, GeneratorOptions, Result,
};
use pnext_common::StructureType;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// One entry of the dispatch table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagEntry {
	/// Registry name of the structure, for example `VkApplicationInfo`.
	pub type_name: String,
	/// Enumerant naming the structure type, for example `VK_STRUCTURE_TYPE_APPLICATION_INFO`.
	pub tag_name: String,
	pub value: StructureType,
	pub source: TagSource,
}

/// The entries contributed by a single feature, in registry order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeatureTags {
	pub feature: String,
	pub entries: Vec<TagEntry>,
}

impl FeatureTags {
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}
}

/// Walks the features of one registry, in order.
///
/// Each call to [`RegistryWalker::walk_feature`] hands back the entries of that feature alone.
/// What the walker remembers between calls is which structures earlier features already
/// produced, so that a structure required by several features gets a single entry, and which
/// structure type values are taken, so that two structures can never claim the same one.
pub struct RegistryWalker<'a> {
	registry: &'a Registry,
	options: &'a GeneratorOptions,
	deriver: TagDeriver<'a>,
	visited: HashSet<String>,
	claimed: HashMap<StructureType, String>,
	excluded: Vec<String>,
}

impl<'a> RegistryWalker<'a> {
	pub fn new(registry: &'a Registry, options: &'a GeneratorOptions) -> Result<Self> {
		Ok(Self {
			registry,
			options,
			deriver: TagDeriver::new(options)?,
			visited: HashSet::new(),
			claimed: HashMap::new(),
			excluded: Vec::new(),
		})
	}

	/// Resolve the structure type of every chain structure `feature` requires that no earlier
	/// feature has produced already.
	pub fn walk_feature(&mut self, feature: &Feature) -> Result<FeatureTags> {
		log::debug!("Walking feature {}", feature.name);
		let mut tags = FeatureTags { feature: feature.name.clone(), entries: Vec::new() };

		for name in &feature.require {
			let desc = self
				.registry
				.resolve_alias(name)?
				.ok_or_else(|| Error::UnknownType { feature: feature.name.clone(), name: name.clone() })?;

			if !self.visited.insert(desc.name.clone()) {
				log::trace!("{} already walked", desc.name);
				continue;
			}

			let tag = match self.deriver.resolve(desc) {
				Some(tag) => tag,
				None => continue,
			};

			if tag.source == TagSource::Derived {
				log::warn!("{} has no structure type in the registry; derived `{}` from its name", desc.name, tag.name);
			}

			let value = match self.registry.enumerant(&self.options.structure_type_enum, &tag.name) {
				Some(value) => StructureType::from_raw(value),
				None if self.options.strict => {
					return Err(Error::UnresolvedTag { name: desc.name.clone(), tag: tag.name });
				}
				None => {
					log::warn!(
						"{} is left out of the dispatch table: `{}` is not a member of {}",
						desc.name,
						tag.name,
						self.options.structure_type_enum
					);
					self.excluded.push(desc.name.clone());
					continue;
				}
			};

			if let Some(first) = self.claimed.get(&value) {
				return Err(Error::DuplicateTag { value, first: first.clone(), second: desc.name.clone() });
			}
			self.claimed.insert(value, desc.name.clone());

			tags.entries.push(TagEntry { type_name: desc.name.clone(), tag_name: tag.name, value, source: tag.source });
		}

		Ok(tags)
	}

	/// Structures that can appear in an extension chain but were left out of the table, because
	/// no value could be found for their structure type.
	pub fn excluded(&self) -> &[String] {
		&self.excluded
	}

	pub fn into_excluded(self) -> Vec<String> {
		self.excluded
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const TEST_STR: &str = r#"
	{
		"enums": {
			"VkStructureType": [
				{ "name": "VK_STRUCTURE_TYPE_APPLICATION_INFO", "value": 0 },
				{ "name": "VK_STRUCTURE_TYPE_PHYSICAL_DEVICE_ID_PROPERTIES", "value": 1000071004 },
				{ "name": "VK_STRUCTURE_TYPE_MEMORY_DEDICATED_ALLOCATE_INFO", "value": 1000127001 }
			]
		},
		"types": [
			{ "name": "VkBaseOutStructure", "members": [
				{ "name": "sType", "type": "VkStructureType" },
				{ "name": "pNext", "type": "struct VkBaseOutStructure*" }
			] },
			{ "name": "VkApplicationInfo", "members": [
				{ "name": "sType", "type": "VkStructureType", "values": "VK_STRUCTURE_TYPE_APPLICATION_INFO" },
				{ "name": "pNext", "type": "const void*" }
			] },
			{ "name": "VkExtent2D", "members": [
				{ "name": "width", "type": "uint32_t" },
				{ "name": "height", "type": "uint32_t" }
			] },
			{ "name": "VkPhysicalDeviceIDProperties", "members": [
				{ "name": "sType", "type": "VkStructureType" },
				{ "name": "pNext", "type": "void*" }
			] },
			{ "name": "VkPhysicalDeviceIDPropertiesKHR", "alias": "VkPhysicalDeviceIDProperties" },
			{ "name": "VkMemoryDedicatedAllocateInfo", "members": [
				{ "name": "sType", "type": "VkStructureType", "values": "VK_STRUCTURE_TYPE_MEMORY_DEDICATED_ALLOCATE_INFO" },
				{ "name": "pNext", "type": "const void*" }
			] },
			{ "name": "VkPhysicalDevice8BitStorageFeatures", "members": [
				{ "name": "sType", "type": "VkStructureType" },
				{ "name": "pNext", "type": "void*" }
			] },
			{ "name": "VkClashingInfo", "members": [
				{ "name": "sType", "type": "VkStructureType", "values": "VK_STRUCTURE_TYPE_APPLICATION_INFO" }
			] }
		],
		"features": [
			{ "name": "VK_VERSION_1_0", "require": ["VkBaseOutStructure", "VkApplicationInfo", "VkExtent2D"] },
			{ "name": "VK_VERSION_1_1", "require": ["VkPhysicalDeviceIDProperties", "VkMemoryDedicatedAllocateInfo"] },
			{ "name": "VK_KHR_external_memory_capabilities", "require": ["VkPhysicalDeviceIDPropertiesKHR", "VkExtent2D"] },
			{ "name": "VK_KHR_8bit_storage", "require": ["VkPhysicalDevice8BitStorageFeatures"] },
			{ "name": "VK_BROKEN_missing", "require": ["VkDoesNotExist"] },
			{ "name": "VK_BROKEN_clash", "require": ["VkClashingInfo"] }
		]
	}
	"#;

	fn feature<'a>(registry: &'a Registry, name: &str) -> &'a Feature {
		registry.features().iter().find(|f| f.name == name).unwrap()
	}

	#[test]
	fn should_resolve_explicit_and_derived_tags() {
		let _ = pretty_env_logger::try_init();
		let registry = Registry::new(TEST_STR).unwrap();
		let options = GeneratorOptions::default();
		let mut walker = RegistryWalker::new(&registry, &options).unwrap();

		let core = walker.walk_feature(feature(&registry, "VK_VERSION_1_0")).unwrap();
		assert_eq!(
			core.entries,
			vec![TagEntry {
				type_name: "VkApplicationInfo".to_string(),
				tag_name: "VK_STRUCTURE_TYPE_APPLICATION_INFO".to_string(),
				value: StructureType::from_raw(0),
				source: TagSource::Explicit,
			}]
		);

		let v11 = walker.walk_feature(feature(&registry, "VK_VERSION_1_1")).unwrap();
		assert_eq!(v11.len(), 2);
		assert_eq!(v11.entries[0].tag_name, "VK_STRUCTURE_TYPE_PHYSICAL_DEVICE_ID_PROPERTIES");
		assert_eq!(v11.entries[0].value, StructureType::from_raw(1000071004));
		assert_eq!(v11.entries[0].source, TagSource::Derived);
		assert_eq!(v11.entries[1].type_name, "VkMemoryDedicatedAllocateInfo");
	}

	#[test]
	fn features_only_return_their_own_entries() {
		let registry = Registry::new(TEST_STR).unwrap();
		let options = GeneratorOptions::default();
		let mut walker = RegistryWalker::new(&registry, &options).unwrap();

		let core = walker.walk_feature(feature(&registry, "VK_VERSION_1_0")).unwrap();
		let v11 = walker.walk_feature(feature(&registry, "VK_VERSION_1_1")).unwrap();
		assert_eq!(core.feature, "VK_VERSION_1_0");
		assert_eq!(core.len(), 1);
		assert!(v11.entries.iter().all(|e| e.type_name != "VkApplicationInfo"));
	}

	#[test]
	fn aliases_and_repeated_requirements_produce_nothing_new() {
		let registry = Registry::new(TEST_STR).unwrap();
		let options = GeneratorOptions::default();
		let mut walker = RegistryWalker::new(&registry, &options).unwrap();

		walker.walk_feature(feature(&registry, "VK_VERSION_1_0")).unwrap();
		walker.walk_feature(feature(&registry, "VK_VERSION_1_1")).unwrap();
		let ext = walker.walk_feature(feature(&registry, "VK_KHR_external_memory_capabilities")).unwrap();
		assert!(ext.is_empty());
	}

	#[test]
	fn an_alias_required_first_stands_in_for_its_target() {
		let registry = Registry::new(TEST_STR).unwrap();
		let options = GeneratorOptions::default();
		let mut walker = RegistryWalker::new(&registry, &options).unwrap();

		let ext = walker.walk_feature(feature(&registry, "VK_KHR_external_memory_capabilities")).unwrap();
		assert_eq!(ext.len(), 1);
		assert_eq!(ext.entries[0].type_name, "VkPhysicalDeviceIDProperties");

		let v11 = walker.walk_feature(feature(&registry, "VK_VERSION_1_1")).unwrap();
		assert_eq!(v11.len(), 1);
	}

	#[test]
	fn underivable_tags_are_excluded_with_a_warning() {
		let _ = pretty_env_logger::try_init();
		let registry = Registry::new(TEST_STR).unwrap();
		let options = GeneratorOptions::default();
		let mut walker = RegistryWalker::new(&registry, &options).unwrap();

		let tags = walker.walk_feature(feature(&registry, "VK_KHR_8bit_storage")).unwrap();
		assert!(tags.is_empty());
		assert_eq!(walker.excluded().to_vec(), vec!["VkPhysicalDevice8BitStorageFeatures".to_string()]);
	}

	#[test]
	fn underivable_tags_fail_in_strict_mode() {
		let registry = Registry::new(TEST_STR).unwrap();
		let options = GeneratorOptions::builder().strict(true).build();
		let mut walker = RegistryWalker::new(&registry, &options).unwrap();

		let err = walker.walk_feature(feature(&registry, "VK_KHR_8bit_storage")).unwrap_err();
		assert!(matches!(
			err,
			Error::UnresolvedTag { name, tag }
				if name == "VkPhysicalDevice8BitStorageFeatures"
				&& tag == "VK_STRUCTURE_TYPE_PHYSICAL_DEVICE8_BIT_STORAGE_FEATURES"
		));
	}

	#[test]
	fn unknown_types_are_errors() {
		let registry = Registry::new(TEST_STR).unwrap();
		let options = GeneratorOptions::default();
		let mut walker = RegistryWalker::new(&registry, &options).unwrap();

		let err = walker.walk_feature(feature(&registry, "VK_BROKEN_missing")).unwrap_err();
		assert!(matches!(err, Error::UnknownType { name, .. } if name == "VkDoesNotExist"));
	}

	#[test]
	fn two_types_cannot_share_a_tag() {
		let registry = Registry::new(TEST_STR).unwrap();
		let options = GeneratorOptions::default();
		let mut walker = RegistryWalker::new(&registry, &options).unwrap();

		walker.walk_feature(feature(&registry, "VK_VERSION_1_0")).unwrap();
		let err = walker.walk_feature(feature(&registry, "VK_BROKEN_clash")).unwrap_err();
		assert!(matches!(
			err,
			Error::DuplicateTag { first, second, .. } if first == "VkApplicationInfo" && second == "VkClashingInfo"
		));
	}
}
