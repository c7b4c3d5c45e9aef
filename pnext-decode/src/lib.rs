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

//! Decodes extension chains from captured API calls.
//!
//! An extension chain link is encoded as a 4 byte [`AttributeMask`], then, unless the mask
//! marks the pointer as null, a 4 byte [`StructureType`] and the structure itself. The mapping
//! from structure type to decode routine is generated at build time from
//! `definitions/registry.json`.
//!
//! ```ignore
//! let (bytes_read, node) = pnext_decode::decode_pnext_struct(&buffer);
//! for link in node.iter() {
//!     println!("{}", link.type_name());
//! }
//! ```

#![forbid(unsafe_code)]

mod decoder;
mod fields;
mod node;
pub mod structs;

pub use self::decoder::{
	decode_pnext, decode_pnext_struct, decode_pnext_struct_at, structure_type, type_name_of, TypedStruct,
	DISPATCH_TABLE, FEATURES,
};
pub use self::fields::{FieldDecoder, MAX_CHAIN_DEPTH};
pub use self::node::{AsTyped, DecodeStruct, Iter, PNextNode};
pub use pnext_common::{AttributeMask, StructureType, ATTRIBUTE_MASK_SIZE, LINK_HEADER_SIZE, STRUCTURE_TYPE_SIZE};
