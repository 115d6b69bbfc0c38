// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Consume plain entity definitions and build the resolved model graph.
//!
//! Definitions refer to destination entities by name, so a definition list
//! can describe mutually referential entities in any order. `build` runs two
//! passes: declare every entity (resolving its remote names), then resolve
//! each entity's fields, turning destination names into [`EntityId`]s.

use std::collections::{HashMap, HashSet};
use std::ops;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::naming::ToCollectionName;
use crate::types::{
    EntityField, EntityId, EntityRelation, EntitySlab, EntityType, FieldKind, RelationCardinality,
};

#[derive(Error, Debug)]
pub enum ModelBuildingError {
    #[error("Duplicate entity `{0}` in model definition")]
    DuplicateEntity(String),

    #[error("Duplicate property `{property}` on entity `{entity}`")]
    DuplicateProperty { entity: String, property: String },
}

/// The resolved, immutable model graph.
///
/// Entities are arena nodes addressed by [`EntityId`]; relationships carry
/// ids, never direct references. Once built, the system is only ever read.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ModelSystem {
    entities: EntitySlab,
    by_name: HashMap<String, EntityId>,
}

impl Default for ModelSystem {
    fn default() -> Self {
        ModelSystem {
            entities: EntitySlab::new(),
            by_name: HashMap::default(),
        }
    }
}

impl ModelSystem {
    /// Resolve a list of definitions into a model graph.
    ///
    /// Name and collection overrides are applied here, once; readers never
    /// see unresolved metadata. A relationship naming an undefined
    /// destination entity is left dangling rather than rejected.
    pub fn build(definitions: Vec<EntityDefinition>) -> Result<ModelSystem, ModelBuildingError> {
        let mut system = ModelSystem::default();

        for definition in &definitions {
            if system.by_name.contains_key(&definition.name) {
                return Err(ModelBuildingError::DuplicateEntity(definition.name.clone()));
            }

            let field_name = definition
                .field_name
                .clone()
                .unwrap_or_else(|| definition.name.clone());
            let collection_name = definition
                .collection_name
                .clone()
                .unwrap_or_else(|| field_name.to_collection_name());

            let id = system.entities.insert(EntityType {
                name: definition.name.clone(),
                field_name,
                collection_name,
                fields: vec![],
            });
            system.by_name.insert(definition.name.clone(), id);
        }

        for definition in definitions {
            let id = system.by_name[&definition.name];
            let fields = system.resolve_fields(&definition)?;
            system.entities[id].fields = fields;
        }

        Ok(system)
    }

    fn resolve_fields(
        &self,
        definition: &EntityDefinition,
    ) -> Result<Vec<EntityField>, ModelBuildingError> {
        let mut seen = HashSet::new();
        let mut fields = Vec::with_capacity(definition.fields.len());

        for field in &definition.fields {
            let remote_name = field
                .remote_name
                .clone()
                .unwrap_or_else(|| field.name.clone());

            if !seen.insert(remote_name.clone()) {
                return Err(ModelBuildingError::DuplicateProperty {
                    entity: definition.name.clone(),
                    property: remote_name,
                });
            }

            let kind = match &field.kind {
                FieldDefinitionKind::Attribute { sub_selection } => FieldKind::Attribute {
                    sub_selection: sub_selection.clone(),
                },
                FieldDefinitionKind::Relationship {
                    destination,
                    cardinality,
                    paged_connection,
                } => {
                    let destination_id = self.by_name.get(destination).copied();

                    if destination_id.is_none() {
                        warn!(
                            "Unknown destination entity `{destination}` for relationship `{}.{}`; leaving it dangling",
                            definition.name, field.name
                        );
                    }

                    FieldKind::Relationship(EntityRelation {
                        destination: destination_id,
                        cardinality: *cardinality,
                        paged_connection: *paged_connection,
                    })
                }
            };

            fields.push(EntityField {
                name: field.name.clone(),
                remote_name,
                kind,
            });
        }

        Ok(fields)
    }

    pub fn entity_id(&self, name: &str) -> Option<EntityId> {
        self.by_name.get(name).copied()
    }
}

impl ops::Index<EntityId> for ModelSystem {
    type Output = EntityType;

    #[inline]
    fn index(&self, id: EntityId) -> &EntityType {
        &self.entities[id]
    }
}

/// An entity as declared by the host, before resolution.
#[derive(Debug, Clone)]
pub struct EntityDefinition {
    pub name: String,
    /// Overrides the singular remote name (defaults to `name`)
    pub field_name: Option<String>,
    /// Overrides the collection remote name (defaults to `field_name` + `s`)
    pub collection_name: Option<String>,
    pub fields: Vec<FieldDefinition>,
}

impl EntityDefinition {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDefinition>) -> Self {
        Self {
            name: name.into(),
            field_name: None,
            collection_name: None,
            fields,
        }
    }
}

/// A property as declared by the host, before resolution.
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    pub name: String,
    /// Overrides the remote name (defaults to `name`)
    pub remote_name: Option<String>,
    pub kind: FieldDefinitionKind,
}

#[derive(Debug, Clone)]
pub enum FieldDefinitionKind {
    Attribute {
        sub_selection: Vec<String>,
    },
    Relationship {
        /// Destination entity, by name
        destination: String,
        cardinality: RelationCardinality,
        paged_connection: bool,
    },
}

impl FieldDefinition {
    pub fn attribute(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            remote_name: None,
            kind: FieldDefinitionKind::Attribute {
                sub_selection: vec![],
            },
        }
    }

    /// An attribute carrying a fixed sub-selection of child field names.
    pub fn attribute_with_selection(name: impl Into<String>, sub_selection: &[&str]) -> Self {
        Self {
            name: name.into(),
            remote_name: None,
            kind: FieldDefinitionKind::Attribute {
                sub_selection: sub_selection.iter().map(|name| (*name).to_owned()).collect(),
            },
        }
    }

    pub fn to_one(name: impl Into<String>, destination: impl Into<String>) -> Self {
        Self::relationship(name, destination, RelationCardinality::One, false)
    }

    pub fn to_many(name: impl Into<String>, destination: impl Into<String>) -> Self {
        Self::relationship(name, destination, RelationCardinality::Many, false)
    }

    /// A to-many relationship served through a paginated `edges { node }`
    /// connection.
    pub fn connection(name: impl Into<String>, destination: impl Into<String>) -> Self {
        Self::relationship(name, destination, RelationCardinality::Many, true)
    }

    pub fn with_remote_name(mut self, remote_name: impl Into<String>) -> Self {
        self.remote_name = Some(remote_name.into());
        self
    }

    fn relationship(
        name: impl Into<String>,
        destination: impl Into<String>,
        cardinality: RelationCardinality,
        paged_connection: bool,
    ) -> Self {
        Self {
            name: name.into(),
            remote_name: None,
            kind: FieldDefinitionKind::Relationship {
                destination: destination.into(),
                cardinality,
                paged_connection,
            },
        }
    }
}
