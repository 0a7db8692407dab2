#![forbid(unsafe_code)]

//! Entity-relationship graph model (headless).
//!
//! Design goals:
//! - stable, insertion-ordered iteration over entities (rendering and navigation depend on it)
//! - referential checks happen once, at build time; a built [`Graph`] is read-only
//! - endpoints are typed indices into the graph, never copies of entity data

pub mod data;
pub mod error;
pub mod graph;

pub use data::{
    EntityDescriptor, EntityProperty, EntityPropertyAccess, EntityRelationship,
    EntityRelationshipData,
};
pub use error::{Error, ReferenceError, Result, Side};
pub use graph::{Endpoint, Entity, EntityId, Graph, Property, PropertyId, Relationship};

#[cfg(test)]
mod tests;
