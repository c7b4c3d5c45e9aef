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

use crate::{decoder::decode_pnext_struct_at, PNextNode};
use codec::Decode;
use pnext_common::{AttributeMask, ATTRIBUTE_MASK_SIZE};

/// Number of links decoded from one chain.
///
/// The link that would be the `MAX_CHAIN_DEPTH + 1`th decodes to [`PNextNode::Null`], with its
/// attribute mask reported as consumed when it is not zero, the same as a link of an unknown
/// structure type.
pub const MAX_CHAIN_DEPTH: usize = 256;

/// Reads the fields of one structure, in order, from the front of a buffer.
///
/// Once a field does not fit in what is left of the buffer, nothing more is read, so a
/// truncated structure keeps whatever fields fit before the cut.
#[derive(Debug, Clone)]
pub struct FieldDecoder<'a> {
	remaining: &'a [u8],
	bytes_read: usize,
	truncated: bool,
	/// Links in front of the one whose structure is being read.
	depth: usize,
}

impl<'a> FieldDecoder<'a> {
	pub fn new(buffer: &'a [u8]) -> Self {
		Self::at_depth(buffer, 0)
	}

	/// Fields of a structure with `depth` links in front of it.
	pub fn at_depth(buffer: &'a [u8], depth: usize) -> Self {
		Self { remaining: buffer, bytes_read: 0, truncated: false, depth }
	}

	/// Decode the next fixed width field.
	pub fn decode<T: Decode>(&mut self) -> Option<T> {
		if self.truncated {
			return None;
		}

		let mut input = self.remaining;
		match T::decode(&mut input) {
			Ok(value) => {
				self.advance(self.remaining.len() - input.len());
				Some(value)
			}
			Err(e) => {
				log::trace!("Field truncated after {} bytes: {}", self.bytes_read, e);
				self.truncated = true;
				None
			}
		}
	}

	/// Decode the next extension chain link.
	pub fn decode_pnext(&mut self) -> PNextNode {
		if self.truncated {
			return PNextNode::Null;
		}

		let depth = self.depth + 1;
		if depth >= MAX_CHAIN_DEPTH {
			log::warn!("Extension chain is deeper than {} links, ignoring the rest", MAX_CHAIN_DEPTH);
			match AttributeMask::read(self.remaining) {
				Some(mask) if !mask.is_empty() => self.advance(ATTRIBUTE_MASK_SIZE),
				_ => (),
			}
			return PNextNode::Null;
		}

		let (read, node) = decode_pnext_struct_at(self.remaining, depth);
		self.advance(read);
		node
	}

	fn advance(&mut self, read: usize) {
		self.remaining = &self.remaining[read..];
		self.bytes_read += read;
	}

	pub fn bytes_read(&self) -> usize {
		self.bytes_read
	}

	pub fn is_truncated(&self) -> bool {
		self.truncated
	}
}
