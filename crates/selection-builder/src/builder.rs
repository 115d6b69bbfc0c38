// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use selection_model::system::ModelSystem;
use selection_model::types::{EntityId, EntityRelation, FieldKind};

use crate::field::{Field, SelectionSet};

/// Per-call customization of a derivation.
///
/// Exclusions and custom fields apply only to the entity the call is made
/// for, not to nested entities reached through relationships.
/// `include_relationships` does carry into nested levels.
#[derive(Debug, Clone)]
pub struct SelectionParams {
    /// Remote property names to omit entirely
    pub exclude_keys: HashSet<String>,
    /// Caller-supplied fields, keyed by remote property name; an entry is
    /// emitted verbatim in place of the derived field
    pub custom_fields: HashMap<String, Field>,
    pub include_relationships: bool,
}

impl Default for SelectionParams {
    fn default() -> Self {
        Self {
            exclude_keys: HashSet::new(),
            custom_fields: HashMap::new(),
            include_relationships: true,
        }
    }
}

impl SelectionParams {
    pub fn excluding(keys: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            exclude_keys: keys.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_custom_field(mut self, remote_name: impl Into<String>, field: Field) -> Self {
        self.custom_fields.insert(remote_name.into(), field);
        self
    }
}

/// Context for deriving selection sets over an immutable model snapshot.
///
/// Purely functional: no state beyond the borrowed system, re-entrant, and
/// infallible. Unresolvable metadata (a dangling relationship, an override
/// for a property that does not exist) degrades the selection set instead of
/// failing the call.
pub struct SelectionBuilder<'a> {
    system: &'a ModelSystem,
}

impl<'a> SelectionBuilder<'a> {
    pub fn new(system: &'a ModelSystem) -> Self {
        Self { system }
    }

    /// The default selection set of `entity`: no exclusions, no custom
    /// fields, relationships included.
    pub fn selection_set(&self, entity: EntityId) -> SelectionSet {
        self.selection_set_with(entity, None, &SelectionParams::default())
    }

    /// Derive the selection set of `entity`.
    ///
    /// `parent` is the entity that referenced `entity` through a
    /// relationship one level up, or `None` at the top call. It is used only
    /// to prune a to-one relationship pointing straight back at it, never
    /// for field emission.
    pub fn selection_set_with(
        &self,
        entity: EntityId,
        parent: Option<EntityId>,
        params: &SelectionParams,
    ) -> SelectionSet {
        // each nested level starts over with empty override sets
        let nested = SelectionParams {
            exclude_keys: HashSet::new(),
            custom_fields: HashMap::new(),
            include_relationships: params.include_relationships,
        };

        let mut ancestors = vec![entity];
        self.build(entity, parent, &mut ancestors, params, &nested)
    }

    fn build(
        &self,
        entity_id: EntityId,
        parent: Option<EntityId>,
        ancestors: &mut Vec<EntityId>,
        params: &SelectionParams,
        nested: &SelectionParams,
    ) -> SelectionSet {
        let entity = &self.system[entity_id];
        let mut selection_set = SelectionSet::new();

        for field in &entity.fields {
            let remote_name = field.remote_name.as_str();

            if params.exclude_keys.contains(remote_name) {
                continue;
            }

            // a custom field replaces the derivation for this property
            // wholesale; no recursion, no cycle check
            if let Some(custom_field) = params.custom_fields.get(remote_name) {
                selection_set.push(custom_field.clone());
                continue;
            }

            match &field.kind {
                FieldKind::Attribute { sub_selection } => {
                    selection_set.push(Field::new(
                        remote_name,
                        sub_selection.iter().map(Field::leaf).collect(),
                    ));
                }
                FieldKind::Relationship(relation) if params.include_relationships => {
                    if let Some(relationship_field) = self
                        .relationship_field(remote_name, relation, entity_id, parent, ancestors, nested)
                    {
                        selection_set.push(relationship_field);
                    }
                }
                FieldKind::Relationship(_) => {}
            }
        }

        selection_set
    }

    fn relationship_field(
        &self,
        remote_name: &str,
        relation: &EntityRelation,
        origin: EntityId,
        parent: Option<EntityId>,
        ancestors: &mut Vec<EntityId>,
        nested: &SelectionParams,
    ) -> Option<Field> {
        // dangling relationships degrade to omission
        let destination = relation.destination?;

        // a to-one relationship straight back to the parent is a trivial
        // reflection of the edge the walk came in through; a to-many back to
        // the parent is not, and stays in
        if !relation.is_to_many() && parent == Some(destination) {
            debug!("Skipping back-reference `{remote_name}`");
            return None;
        }

        // an entity may be entered at most twice on one path; a third entry
        // would begin an unbounded unroll of a relationship cycle
        if ancestors.iter().filter(|id| **id == destination).count() >= 2 {
            debug!("Pruning relationship cycle at `{remote_name}`");
            return None;
        }

        ancestors.push(destination);
        let destination_set = self.build(destination, Some(origin), ancestors, nested, nested);
        ancestors.pop();

        let field = if relation.is_to_many() && relation.paged_connection {
            Field::new(
                remote_name,
                vec![Field::new(
                    "edges",
                    vec![Field::new("node", destination_set)],
                )],
            )
        } else {
            Field::new(remote_name, destination_set)
        };

        Some(field)
    }
}
