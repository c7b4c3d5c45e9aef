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

//! The decoded form of one extension chain link.

use crate::decoder::TypedStruct;
use pnext_common::StructureType;
use serde::Serialize;

/// One link of a decoded extension chain.
///
/// A typed node owns its structure, and the structure owns the next link, so a decoded chain is
/// a tree owned by whoever holds the first node.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum PNextNode {
	/// No structure: the pointer was null, the link was cut short, or its structure type is unknown.
	#[default]
	Null,
	Typed(Box<TypedStruct>),
}

impl PNextNode {
	pub fn is_null(&self) -> bool {
		matches!(self, PNextNode::Null)
	}

	pub fn typed(&self) -> Option<&TypedStruct> {
		match self {
			PNextNode::Null => None,
			PNextNode::Typed(typed) => Some(typed.as_ref()),
		}
	}

	/// The structure held by this node, if it is a `T`.
	pub fn get<T: AsTyped>(&self) -> Option<&T> {
		self.typed().and_then(T::from_typed)
	}

	/// The first structure in the chain starting at this node that is a `T`.
	pub fn find<T: AsTyped>(&self) -> Option<&T> {
		self.iter().find_map(T::from_typed)
	}

	pub fn structure_type(&self) -> Option<StructureType> {
		self.typed().map(TypedStruct::structure_type)
	}

	/// Iterate over the structures of the chain starting at this node.
	pub fn iter(&self) -> Iter<'_> {
		Iter { next: self }
	}

	/// Decode a `T` from `buffer` and wrap it in a node.
	///
	/// # Return
	/// returns the number of bytes the decode routine of `T` consumed, and the node
	pub fn decode_typed<T>(buffer: &[u8]) -> (usize, PNextNode)
	where
		T: DecodeStruct + Into<TypedStruct>,
	{
		Self::decode_typed_at::<T>(buffer, 0)
	}

	/// [`PNextNode::decode_typed`] for a link with `depth` links in front of it.
	pub fn decode_typed_at<T>(buffer: &[u8], depth: usize) -> (usize, PNextNode)
	where
		T: DecodeStruct + Into<TypedStruct>,
	{
		let mut value = T::default();
		let bytes_read = value.decode_struct_at(buffer, depth);
		(bytes_read, PNextNode::Typed(Box::new(value.into())))
	}
}

impl<'a> IntoIterator for &'a PNextNode {
	type Item = &'a TypedStruct;
	type IntoIter = Iter<'a>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

/// Iterator over the links of a decoded chain, created by [`PNextNode::iter`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
	next: &'a PNextNode,
}

impl<'a> Iterator for Iter<'a> {
	type Item = &'a TypedStruct;

	fn next(&mut self) -> Option<Self::Item> {
		let node: &'a PNextNode = self.next;
		let typed = node.typed()?;
		self.next = typed.p_next();
		Some(typed)
	}
}

/// The decode routine of a structure that can appear in an extension chain.
pub trait DecodeStruct: Default {
	/// Decode the structure from the bytes following its structure type, overwriting `self`.
	///
	/// Never consumes more than `buffer.len()` bytes. Fields past the end of a short buffer keep
	/// their current values.
	///
	/// # Return
	/// returns the number of bytes consumed
	fn decode_struct(&mut self, buffer: &[u8]) -> usize {
		self.decode_struct_at(buffer, 0)
	}

	/// [`DecodeStruct::decode_struct`] for a structure with `depth` links in front of it.
	/// Links past [`MAX_CHAIN_DEPTH`](crate::MAX_CHAIN_DEPTH) are not decoded.
	fn decode_struct_at(&mut self, buffer: &[u8], depth: usize) -> usize;

	/// The next link of the chain.
	fn p_next(&self) -> &PNextNode;
}

/// Access to a concrete structure held in a [`TypedStruct`].
pub trait AsTyped {
	fn from_typed(typed: &TypedStruct) -> Option<&Self>;
}
