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

//! The extension chain link decoder, generated by `pnext-gen` from `definitions/registry.json`.

use crate::{structs::*, AsTyped, DecodeStruct, PNextNode};
use pnext_common::{AttributeMask, StructureType, ATTRIBUTE_MASK_SIZE, LINK_HEADER_SIZE};
use serde::Serialize;

include!(concat!(env!("OUT_DIR"), "/decode_pnext.rs"));

/// Decode one extension chain link from the front of `data`, moving `data` past it.
pub fn decode_pnext(data: &mut &[u8]) -> PNextNode {
	let (bytes_read, node) = decode_pnext_struct(data);
	*data = &data[bytes_read..];
	node
}

/// Look up the registry name of a structure type in the dispatch table.
pub fn type_name_of(s_type: StructureType) -> Option<&'static str> {
	DISPATCH_TABLE.iter().find(|(value, _)| *value == s_type).map(|(_, name)| *name)
}
