// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The entity-relationship model that selection sets are derived from.
//!
//! The model is an immutable graph: entities live in an arena and refer to
//! each other through stable [`types::EntityId`] indices, so mutually
//! referential entities (`User` ↔ `Dog`) need no special handling. The graph
//! is assembled once from plain definitions (see [`system::ModelSystem::build`])
//! with every name override and destination reference resolved at that point;
//! afterwards readers only ever see resolved metadata.

pub mod naming;
pub mod system;
pub mod types;
