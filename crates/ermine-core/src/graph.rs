use crate::data::{EntityPropertyAccess, EntityRelationshipData};
use crate::error::{ReferenceError, Result, Side};
use indexmap::IndexMap;

/// Index of an entity in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub usize);

/// Index of a property within its owning entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PropertyId(pub usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub ty: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    pub properties: Vec<Property>,
}

impl Entity {
    /// Resolves a property by name. Names are not validated for uniqueness; the first match wins.
    pub fn property_id(&self, name: &str) -> Option<PropertyId> {
        self.properties
            .iter()
            .position(|p| p.name == name)
            .map(PropertyId)
    }

    pub fn property(&self, id: PropertyId) -> &Property {
        &self.properties[id.0]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub entity: EntityId,
    pub property: PropertyId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Relationship {
    pub source: Endpoint,
    pub target: Endpoint,
}

impl Relationship {
    pub fn source_entity(&self) -> EntityId {
        self.source.entity
    }

    pub fn target_entity(&self) -> EntityId {
        self.target.entity
    }

    pub fn is_self_loop(&self) -> bool {
        self.source.entity == self.target.entity
    }

    pub fn touches(&self, entity: EntityId) -> bool {
        self.source.entity == entity || self.target.entity == entity
    }
}

/// Entities plus the relationships between their properties.
///
/// Built once per diagram and never mutated; diagrams that need different data build a new graph.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    entities: IndexMap<String, Entity>,
    relationships: Vec<Relationship>,
}

impl Graph {
    /// Builds a graph, resolving every relationship endpoint against the entity dictionary.
    pub fn build(data: &EntityRelationshipData) -> Result<Self> {
        let mut entities: IndexMap<String, Entity> = IndexMap::with_capacity(data.entities.len());
        for (idx, (name, descriptor)) in data.entities.iter().enumerate() {
            entities.insert(
                name.clone(),
                Entity {
                    id: EntityId(idx),
                    name: name.clone(),
                    properties: descriptor
                        .properties
                        .iter()
                        .map(|p| Property {
                            name: p.name.clone(),
                            ty: p.ty.clone(),
                        })
                        .collect(),
                },
            );
        }

        let mut relationships: Vec<Relationship> = Vec::with_capacity(data.relationships.len());
        for (idx, rel) in data.relationships.iter().enumerate() {
            let source = resolve(&entities, idx, Side::Source, &rel.source)?;
            let target = resolve(&entities, idx, Side::Target, &rel.target)?;
            relationships.push(Relationship { source, target });
        }

        tracing::debug!(
            entities = entities.len(),
            relationships = relationships.len(),
            "built entity-relationship graph"
        );

        Ok(Self {
            entities,
            relationships,
        })
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entities in insertion order.
    pub fn entities(&self) -> impl ExactSizeIterator<Item = &Entity> + '_ {
        self.entities.values()
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.get(name)
    }

    pub fn entity_id(&self, name: &str) -> Option<EntityId> {
        self.entities.get_index_of(name).map(EntityId)
    }

    /// Panics if `id` did not come from this graph.
    pub fn entity_by_id(&self, id: EntityId) -> &Entity {
        &self.entities[id.0]
    }

    pub fn first_entity(&self) -> Option<EntityId> {
        (!self.entities.is_empty()).then_some(EntityId(0))
    }

    pub fn property(&self, endpoint: Endpoint) -> &Property {
        self.entity_by_id(endpoint.entity).property(endpoint.property)
    }

    /// `(entity, property)` names of both endpoints, for display and diagnostics.
    pub fn endpoint_names(&self, rel: &Relationship) -> ((&str, &str), (&str, &str)) {
        let names = |e: Endpoint| {
            (
                self.entity_by_id(e.entity).name.as_str(),
                self.property(e).name.as_str(),
            )
        };
        (names(rel.source), names(rel.target))
    }

    /// Entity-level projection of the relationships, in relationship order.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = (EntityId, EntityId)> + '_ {
        self.relationships
            .iter()
            .map(|r| (r.source.entity, r.target.entity))
    }
}

fn resolve(
    entities: &IndexMap<String, Entity>,
    relationship: usize,
    side: Side,
    access: &EntityPropertyAccess,
) -> std::result::Result<Endpoint, ReferenceError> {
    let Some(entity) = entities.get(access.entity.as_str()) else {
        return Err(ReferenceError::UnknownEntity {
            relationship,
            side,
            entity: access.entity.clone(),
        });
    };
    let Some(property) = entity.property_id(&access.property) else {
        return Err(ReferenceError::UnknownProperty {
            relationship,
            side,
            entity: access.entity.clone(),
            property: access.property.clone(),
        });
    };
    Ok(Endpoint {
        entity: entity.id,
        property,
    })
}
