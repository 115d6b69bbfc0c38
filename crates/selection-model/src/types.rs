// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

use typed_generational_arena::{Arena, IgnoreGeneration, Index};

pub type EntitySlab = Arena<EntityType, usize, IgnoreGeneration>;
pub type EntityId = Index<EntityType, usize, IgnoreGeneration>;

/// A named node in the model graph.
///
/// `field_name` and `collection_name` are the remote spellings of the entity,
/// resolved from the definition's overrides (or defaulted) when the system is
/// built.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EntityType {
    pub name: String,
    /// The field name representing a single entity
    pub field_name: String,
    /// The field name representing a collection of entities
    pub collection_name: String,
    /// Mappable properties, in declared order
    pub fields: Vec<EntityField>,
}

/// A mappable property of an entity: either a scalar attribute or a
/// relationship to another entity.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EntityField {
    pub name: String,
    /// The field identifier used in outgoing queries; equals `name` unless
    /// the definition overrode it
    pub remote_name: String,
    pub kind: FieldKind,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub enum FieldKind {
    Attribute {
        /// A fixed sub-selection declared in the model (child field names).
        /// Empty for an ordinary scalar leaf.
        sub_selection: Vec<String>,
    },
    Relationship(EntityRelation),
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EntityRelation {
    /// `None` for a dangling relationship whose destination entity was not
    /// defined in the model
    pub destination: Option<EntityId>,
    pub cardinality: RelationCardinality,
    /// Whether a to-many relationship is served through a paginated
    /// `edges { node }` connection
    pub paged_connection: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationCardinality {
    /// The relationship resolves to a single entity
    One,
    /// The relationship resolves to a collection of entities
    Many,
}

impl EntityRelation {
    pub fn is_to_many(&self) -> bool {
        self.cardinality == RelationCardinality::Many
    }
}
