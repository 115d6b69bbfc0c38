// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::types::EntityType;

/// A type with both singular and collection remote spellings of itself.
pub trait ToCollectionName {
    fn self_name(&self) -> String;
    fn to_collection_name(&self) -> String;
}

impl ToCollectionName for str {
    fn self_name(&self) -> String {
        self.to_owned()
    }

    /// Plain suffix concatenation. Irregular plurals and case conventions are
    /// the caller's concern; a definition-level override takes precedence
    /// anyway (see `ModelSystem::build`).
    fn to_collection_name(&self) -> String {
        format!("{self}s")
    }
}

impl ToCollectionName for EntityType {
    fn self_name(&self) -> String {
        self.field_name.clone()
    }

    fn to_collection_name(&self) -> String {
        self.collection_name.clone()
    }
}
