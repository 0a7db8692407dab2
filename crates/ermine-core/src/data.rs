//! Input data shapes, as delivered by an external loader.
//!
//! Entity order is significant: it is the JSON object order, kept by `IndexMap` together with
//! `serde_json`'s `preserve_order` feature.

use crate::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityProperty {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

impl EntityProperty {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDescriptor {
    #[serde(default)]
    pub properties: Vec<EntityProperty>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityPropertyAccess {
    pub entity: String,
    pub property: String,
}

impl EntityPropertyAccess {
    pub fn new(entity: impl Into<String>, property: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            property: property.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRelationship {
    pub source: EntityPropertyAccess,
    pub target: EntityPropertyAccess,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRelationshipData {
    #[serde(default)]
    pub entities: IndexMap<String, EntityDescriptor>,
    #[serde(default)]
    pub relationships: Vec<EntityRelationship>,
}

impl EntityRelationshipData {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Builder-style helper, mostly for tests and embedding callers.
    pub fn with_entity<I, N, T>(mut self, name: impl Into<String>, properties: I) -> Self
    where
        I: IntoIterator<Item = (N, T)>,
        N: Into<String>,
        T: Into<String>,
    {
        let properties = properties
            .into_iter()
            .map(|(n, t)| EntityProperty::new(n, t))
            .collect();
        self.entities
            .insert(name.into(), EntityDescriptor { properties });
        self
    }

    /// Builder-style helper: `source_entity.source_property -> target_entity.target_property`.
    pub fn with_relationship(
        mut self,
        source: (impl Into<String>, impl Into<String>),
        target: (impl Into<String>, impl Into<String>),
    ) -> Self {
        self.relationships.push(EntityRelationship {
            source: EntityPropertyAccess::new(source.0, source.1),
            target: EntityPropertyAccess::new(target.0, target.1),
        });
        self
    }
}
