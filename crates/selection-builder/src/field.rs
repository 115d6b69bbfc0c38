// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

/// An ordered list of fields, unique by name within one list.
pub type SelectionSet = Vec<Field>;

/// One requested field.
///
/// Two fields are equal iff their names and sub-selections are recursively
/// equal. Produced by the builder (or supplied by a caller as a custom
/// field) and immutable thereafter.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    /// The subfields being selected in this field. Empty for a scalar leaf.
    pub selection_set: SelectionSet,
}

impl Field {
    pub fn new(name: impl Into<String>, selection_set: SelectionSet) -> Self {
        Self {
            name: name.into(),
            selection_set,
        }
    }

    pub fn leaf(name: impl Into<String>) -> Self {
        Self::new(name, vec![])
    }
}
