// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Derives the default selection set for any entity of a model graph.
//!
//! Given a [`selection_model::system::ModelSystem`], [`builder::SelectionBuilder`]
//! computes the ordered tree of fields a query for an entity should request:
//! a leaf per attribute, a nested sub-selection per relationship, relay-style
//! `edges { node }` wrapping for paginated to-many relationships, with
//! back-edge and cycle pruning so the walk terminates on any model. The
//! output [`field::Field`] tree is a plain value; rendering it to wire-format
//! query text is a downstream concern.

pub mod builder;
pub mod field;
