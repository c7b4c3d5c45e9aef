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

//! Decoded forms of the structures in the bundled registry.
//!
//! Each structure is laid out as its own extension chain link followed by its fields, in
//! registry order. Fixed width integers are little endian and fixed size arrays have no length
//! prefix.

use crate::{DecodeStruct, FieldDecoder, PNextNode};
use serde::Serialize;

macro_rules! decoded_struct {
	($(#[$attr:meta])* $name:ident { $($field:ident: $ty:ty),* $(,)? }) => {
		$(#[$attr])*
		#[derive(Debug, Clone, Default, PartialEq, Serialize)]
		pub struct $name {
			pub p_next: PNextNode,
			$(pub $field: $ty,)*
		}

		impl DecodeStruct for $name {
			fn decode_struct_at(&mut self, buffer: &[u8], depth: usize) -> usize {
				let mut fields = FieldDecoder::at_depth(buffer, depth);
				self.p_next = fields.decode_pnext();
				$(
					if let Some(value) = fields.decode() {
						self.$field = value;
					}
				)*
				fields.bytes_read()
			}

			fn p_next(&self) -> &PNextNode {
				&self.p_next
			}
		}
	};
}

decoded_struct!(
	/// `VkApplicationInfo`, without its name strings.
	DecodedApplicationInfo {
		application_version: u32,
		engine_version: u32,
		api_version: u32,
	}
);

decoded_struct!(DecodedMemoryAllocateInfo { allocation_size: u64, memory_type_index: u32 });

decoded_struct!(
	/// Handles are the 64 bit values recorded at capture time.
	DecodedMemoryDedicatedAllocateInfo { image: u64, buffer: u64 }
);

decoded_struct!(DecodedPhysicalDeviceIDProperties {
	device_uuid: [u8; 16],
	driver_uuid: [u8; 16],
	device_luid: [u8; 8],
	device_node_mask: u32,
	device_luid_valid: u32,
});

decoded_struct!(DecodedPhysicalDeviceProtectedMemoryFeatures { protected_memory: u32 });

decoded_struct!(DecodedPhysicalDevice8BitStorageFeatures {
	storage_buffer_8bit_access: u32,
	uniform_and_storage_buffer_8bit_access: u32,
	storage_push_constant_8: u32,
});

decoded_struct!(DecodedImportMemoryFdInfoKHR { handle_type: u32, fd: i32 });

decoded_struct!(
	/// Only the value counts; the value arrays themselves are not decoded.
	DecodedD3D12FenceSubmitInfoKHR { wait_semaphore_values_count: u32, signal_semaphore_values_count: u32 }
);

decoded_struct!(DecodedPhysicalDevicePushDescriptorPropertiesKHR { max_push_descriptors: u32 });
