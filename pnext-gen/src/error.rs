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

use pnext_common::StructureType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("failed to parse registry description: {0}")]
	Json(#[from] serde_json::Error),
	#[error("invalid name pattern: {0}")]
	Regex(#[from] onig::Error),
	#[error("feature `{feature}` requires unknown type `{name}`")]
	UnknownType { feature: String, name: String },
	#[error("`{alias}` is an alias of unknown type `{target}`")]
	UnknownAlias { alias: String, target: String },
	#[error("alias chain starting at `{0}` does not end in a structure")]
	AliasCycle(String),
	#[error("structure type {value} is claimed by both `{first}` and `{second}`")]
	DuplicateTag { value: StructureType, first: String, second: String },
	#[error("no structure type value for `{name}` (looked for `{tag}`)")]
	UnresolvedTag { name: String, tag: String },
	#[error("`{ident}` (made from `{name}`) is not a valid identifier")]
	InvalidIdentifier { ident: String, name: String },
}
