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

//! Types shared between the dispatch table generator and the runtime decoder.

#![forbid(unsafe_code)]

use codec::Decode;
use serde::{Deserialize, Serialize};

/// Size in bytes of the encoded [`AttributeMask`] that prefixes every extension chain link.
pub const ATTRIBUTE_MASK_SIZE: usize = std::mem::size_of::<u32>();

/// Size in bytes of an encoded [`StructureType`].
pub const STRUCTURE_TYPE_SIZE: usize = std::mem::size_of::<u32>();

/// Bytes in front of the payload of a non-null, recognised chain link: the mask and then the tag.
pub const LINK_HEADER_SIZE: usize = ATTRIBUTE_MASK_SIZE + STRUCTURE_TYPE_SIZE;

/// The discriminant identifying which concrete structure a chain link encodes.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[display(fmt = "{}", _0)]
#[serde(transparent)]
pub struct StructureType(u32);

impl StructureType {
	pub const fn from_raw(value: u32) -> Self {
		StructureType(value)
	}

	pub const fn as_raw(self) -> u32 {
		self.0
	}

	/// Read a little-endian tag from the front of `buffer`, if there are enough bytes for one.
	pub fn read(mut buffer: &[u8]) -> Option<Self> {
		u32::decode(&mut buffer).ok().map(StructureType)
	}
}

bitflags::bitflags! {
	/// Flags recorded in front of every encoded pointer. Bits that are not
	/// known here are kept as they were read.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
	pub struct AttributeMask: u32 {
		const IS_NULL = 0x1;
		const IS_STRING = 0x2;
		const IS_WSTRING = 0x4;
		const IS_STRUCT = 0x8;
		const IS_ARRAY = 0x10;
		const HAS_ADDRESS = 0x20;
		const HAS_DATA = 0x40;
	}
}

impl AttributeMask {
	/// Read the mask from the front of `buffer`. Returns `None` when fewer than
	/// [`ATTRIBUTE_MASK_SIZE`] bytes are available.
	pub fn read(mut buffer: &[u8]) -> Option<Self> {
		u32::decode(&mut buffer).ok().map(AttributeMask::from_bits_retain)
	}

	/// Was the pointer null at capture time?
	pub fn is_null(&self) -> bool {
		self.contains(AttributeMask::IS_NULL)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use codec::Encode;

	#[test]
	fn reads_little_endian_mask() {
		let bytes = 0x49u32.encode();
		let mask = AttributeMask::read(&bytes).unwrap();
		assert!(mask.is_null());
		assert!(mask.contains(AttributeMask::IS_STRUCT | AttributeMask::HAS_DATA));
	}

	#[test]
	fn unknown_mask_bits_are_retained() {
		let bytes = 0x8000_0001u32.encode();
		let mask = AttributeMask::read(&bytes).unwrap();
		assert_eq!(mask.bits(), 0x8000_0001);
		assert!(mask.is_null());
	}

	#[test]
	fn short_buffers_have_no_mask_or_tag() {
		assert_eq!(AttributeMask::read(&[]), None);
		assert_eq!(AttributeMask::read(&[1, 0, 0]), None);
		assert_eq!(StructureType::read(&[0x78, 0x56]), None);
	}

	#[test]
	fn tag_reads_only_the_first_four_bytes() {
		let mut bytes = 1000059000u32.encode();
		bytes.extend_from_slice(&[0xff; 8]);
		assert_eq!(StructureType::read(&bytes), Some(StructureType::from_raw(1000059000)));
		assert_eq!(StructureType::from_raw(5).to_string(), "5");
	}
}
