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

//! Emits the Rust source of the extension chain decoder.
//!
//! The source is meant to be `include!`d. It defines `structure_type` (one constant per
//! table entry), `DISPATCH_TABLE`, `FEATURES`, the `TypedStruct` enum, `decode_pnext_struct`
//! and `decode_pnext_struct_at`, and expects these to be in scope where it is included:
//!
//! - `StructureType`, `AttributeMask`, `ATTRIBUTE_MASK_SIZE` and `LINK_HEADER_SIZE` from `pnext-common`
//! - `PNextNode`, the `AsTyped` and `DecodeStruct` traits and `serde::Serialize`
//! - the decoded form of every structure in the table, named `<decoded prefix><name>`

use crate::{walker::FeatureTags, Error, GeneratorOptions, Result, TagEntry};
use proc_macro2::{Ident, TokenStream};
use quote::quote;

const HEADER: &str = "// Generated by pnext-gen from a registry description. Do not edit.\n";

/// Parse `ident` as a Rust identifier. `name` is the registry name it was made from.
fn ident(ident: &str, name: &str) -> Result<Ident> {
	syn::parse_str::<Ident>(ident)
		.map_err(|_| Error::InvalidIdentifier { ident: ident.to_string(), name: name.to_string() })
}

/// The identifiers generated for one table entry.
struct EntryNames {
	constant: Ident,
	variant: Ident,
	decoded: Ident,
}

/// Accumulates the generated items feature by feature, then wraps them in the fixed decoder
/// skeleton in [`DispatchEmitter::finish`].
pub struct DispatchEmitter<'a> {
	options: &'a GeneratorOptions,
	constants: Vec<TokenStream>,
	table: Vec<TokenStream>,
	features: Vec<TokenStream>,
	variants: Vec<TokenStream>,
	structure_type_arms: Vec<TokenStream>,
	type_name_arms: Vec<TokenStream>,
	p_next_arms: Vec<TokenStream>,
	impls: Vec<TokenStream>,
	dispatch_arms: Vec<TokenStream>,
	entries: Vec<TagEntry>,
}

impl<'a> DispatchEmitter<'a> {
	pub fn new(options: &'a GeneratorOptions) -> Self {
		Self {
			options,
			constants: Vec::new(),
			table: Vec::new(),
			features: Vec::new(),
			variants: Vec::new(),
			structure_type_arms: Vec::new(),
			type_name_arms: Vec::new(),
			p_next_arms: Vec::new(),
			impls: Vec::new(),
			dispatch_arms: Vec::new(),
			entries: Vec::new(),
		}
	}

	/// Emit the entries of one feature. A feature without entries emits nothing at all.
	///
	/// Fails without emitting anything if a name in the feature does not make a valid identifier.
	pub fn emit_feature(&mut self, tags: FeatureTags) -> Result<()> {
		if tags.is_empty() {
			return Ok(());
		}
		log::debug!("Emitting {} dispatch entries for {}", tags.len(), tags.feature);

		let names = tags.entries.iter().map(|entry| self.names(entry)).collect::<Result<Vec<_>>>()?;

		let feature = &tags.feature;
		let constants = names.iter().map(|names| &names.constant);
		self.features.push(quote!((#feature, &[#(structure_type::#constants),*])));

		for (entry, names) in tags.entries.into_iter().zip(names) {
			self.emit_entry(feature, &entry, names);
			self.entries.push(entry);
		}
		Ok(())
	}

	fn names(&self, entry: &TagEntry) -> Result<EntryNames> {
		let variant = self.variant_name(&entry.type_name);
		let constant = ident(&self.constant_name(&entry.tag_name), &entry.tag_name)?;
		let decoded = format!("{}{}", self.options.decoded_prefix, variant);
		let variant = ident(&variant, &entry.type_name)?;
		let decoded = ident(&decoded, &entry.type_name)?;
		Ok(EntryNames { constant, variant, decoded })
	}

	fn emit_entry(&mut self, feature: &str, entry: &TagEntry, names: EntryNames) {
		let EntryNames { constant, variant, decoded } = names;
		let type_name = &entry.type_name;
		let value = entry.value.as_raw();
		let doc = format!(" `{}`, required by `{}`.", type_name, feature);

		self.constants.push(quote! {
			#[doc = #doc]
			pub const #constant: StructureType = StructureType::from_raw(#value);
		});
		self.table.push(quote!((structure_type::#constant, #type_name)));
		self.variants.push(quote!(#variant(#decoded)));

		self.structure_type_arms.push(quote!(Self::#variant(_) => structure_type::#constant,));
		self.type_name_arms.push(quote!(Self::#variant(_) => #type_name,));
		self.p_next_arms.push(quote!(Self::#variant(ref value) => value.p_next(),));

		self.impls.push(quote! {
			impl From<#decoded> for TypedStruct {
				fn from(value: #decoded) -> Self {
					TypedStruct::#variant(value)
				}
			}

			impl AsTyped for #decoded {
				#[allow(unreachable_patterns)]
				fn from_typed(typed: &TypedStruct) -> Option<&Self> {
					match typed {
						TypedStruct::#variant(value) => Some(value),
						_ => None,
					}
				}
			}
		});

		self.dispatch_arms.push(quote! {
			structure_type::#constant => {
				let (read, typed) = PNextNode::decode_typed_at::<#decoded>(&buffer[LINK_HEADER_SIZE..], depth);
				bytes_read = LINK_HEADER_SIZE + read;
				node = typed;
			}
		});
	}

	/// `VK_STRUCTURE_TYPE_APPLICATION_INFO` becomes `APPLICATION_INFO`.
	fn constant_name(&self, tag_name: &str) -> String {
		let name = tag_name.strip_prefix(&self.options.tag_prefix).unwrap_or(tag_name);
		match name.chars().next() {
			Some(c) if c.is_ascii_digit() => format!("TYPE_{}", name),
			_ => name.to_string(),
		}
	}

	/// `VkApplicationInfo` becomes `ApplicationInfo`.
	fn variant_name(&self, type_name: &str) -> String {
		type_name.strip_prefix(&self.options.type_prefix).unwrap_or(type_name).to_string()
	}

	/// Every entry emitted so far, in table order.
	pub fn entries(&self) -> &[TagEntry] {
		&self.entries
	}

	/// Wrap everything emitted so far in the decoder skeleton.
	pub fn finish(self) -> (String, Vec<TagEntry>) {
		let Self {
			constants,
			table,
			features,
			variants,
			structure_type_arms,
			type_name_arms,
			p_next_arms,
			impls,
			dispatch_arms,
			entries,
			..
		} = self;

		let tokens = quote! {
			/// Structure type values of the structures the dispatch table knows about.
			pub mod structure_type {
				use super::StructureType;

				#(#constants)*
			}

			/// Every entry of the dispatch table: a structure type and the registry name of its structure.
			pub const DISPATCH_TABLE: &[(StructureType, &str)] = &[#(#table),*];

			/// The features that added entries to the dispatch table, in registry order.
			pub const FEATURES: &[(&str, &[StructureType])] = &[#(#features),*];

			/// A decoded extension structure, with one variant for each entry of the dispatch table.
			#[derive(Debug, Clone, PartialEq, Serialize)]
			pub enum TypedStruct {
				#(#variants),*
			}

			impl TypedStruct {
				/// The structure type this structure was decoded for.
				pub fn structure_type(&self) -> StructureType {
					match *self {
						#(#structure_type_arms)*
					}
				}

				/// Registry name of the structure.
				pub fn type_name(&self) -> &'static str {
					match *self {
						#(#type_name_arms)*
					}
				}

				/// The next link of the chain.
				pub fn p_next(&self) -> &PNextNode {
					match *self {
						#(#p_next_arms)*
					}
				}
			}

			#(#impls)*

			/// Decode one extension chain link from the front of `buffer`.
			///
			/// Returns the number of bytes to skip to reach whatever follows the link, along with the
			/// decoded link. A link that was null at capture time, that is cut short, or whose structure
			/// type is not in the dispatch table decodes to [`PNextNode::Null`]. In that case the attribute
			/// mask is reported as consumed whenever it could be read and was not zero.
			pub fn decode_pnext_struct(buffer: &[u8]) -> (usize, PNextNode) {
				decode_pnext_struct_at(buffer, 0)
			}

			/// [`decode_pnext_struct`] for a link with `depth` links in front of it.
			pub fn decode_pnext_struct_at(buffer: &[u8], depth: usize) -> (usize, PNextNode) {
				let mut bytes_read = 0;
				let mut node = PNextNode::Null;
				let mut attrib = AttributeMask::empty();

				if let Some(mask) = AttributeMask::read(buffer) {
					attrib = mask;
					let s_type = match attrib.is_null() {
						true => None,
						false => StructureType::read(&buffer[ATTRIBUTE_MASK_SIZE..]),
					};

					if let Some(s_type) = s_type {
						match s_type {
							#(#dispatch_arms)*
							_ => log::trace!("Structure type {} at depth {} is not in the dispatch table", s_type, depth),
						}
					}
				}

				if node.is_null() && !attrib.is_empty() {
					bytes_read = ATTRIBUTE_MASK_SIZE;
				}

				(bytes_read, node)
			}
		};

		(format!("{}{}\n", HEADER, tokens), entries)
	}
}
