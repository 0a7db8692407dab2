//! The shared construction sequence and the three layout strategies built on it.

use ermine_core::{EntityId, EntityRelationshipData, Graph, Relationship};
use ermine_layout::{Point, SpectralLayout, SpectralOptions};

use crate::host::{DiagramKind, Placement, Port, Region, RenderHost};
use crate::{Error, Result};

mod elastic;
mod navigable;
mod spectral;

pub use elastic::ElasticDiagram;
pub use navigable::NavigableDiagram;
pub use spectral::SpectralDiagram;

/// Graph plus one rendered element per entity.
///
/// `elements[i]` belongs to `EntityId(i)`; this is the canonical order every layout phase
/// indexes into.
pub struct EntityDiagram<'h, H: RenderHost> {
    host: &'h mut H,
    graph: Graph,
    elements: Vec<H::Element>,
}

impl<'h, H: RenderHost> EntityDiagram<'h, H> {
    /// Builds the graph first, so a reference error leaves the host untouched.
    pub fn new(host: &'h mut H, data: &EntityRelationshipData, kind: DiagramKind) -> Result<Self> {
        let graph = Graph::build(data)?;

        host.set_kind(kind);
        let elements: Vec<H::Element> = graph.entities().map(|e| host.render_entity(e)).collect();

        tracing::debug!(
            kind = kind.as_str(),
            entities = graph.len(),
            relationships = graph.relationships().len(),
            "entity diagram"
        );
        Ok(Self {
            host,
            graph,
            elements,
        })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn host(&self) -> &H {
        self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        self.host
    }

    /// Elements in entity insertion order.
    pub fn elements(&self) -> &[H::Element] {
        &self.elements
    }

    pub fn element(&self, id: EntityId) -> Option<H::Element> {
        self.elements.get(id.0).copied()
    }

    pub fn entity_of(&self, element: H::Element) -> Option<EntityId> {
        self.elements.iter().position(|&e| e == element).map(EntityId)
    }

    pub fn entity_id(&self, name: &str) -> Result<EntityId> {
        self.graph
            .entity_id(name)
            .ok_or_else(|| Error::UnknownEntity {
                name: name.to_string(),
            })
    }

    pub(crate) fn check_id(&self, id: EntityId) -> Result<()> {
        if id.0 < self.elements.len() {
            Ok(())
        } else {
            Err(Error::EntityOutOfRange {
                id: id.0,
                count: self.elements.len(),
            })
        }
    }

    /// Adds every element to the main canvas.
    pub(crate) fn add_all(&mut self, collapsed: bool, draggable: bool) {
        for &element in &self.elements {
            self.host.set_collapsed(element, collapsed);
            self.host.add_element(element, Region::Main);
            if draggable {
                self.host.make_draggable(element);
            }
        }
    }

    pub(crate) fn connect(&mut self, rel: &Relationship) {
        let source = Port {
            element: self.elements[rel.source.entity.0],
            property: self.graph.property(rel.source).name.as_str(),
        };
        let target = Port {
            element: self.elements[rel.target.entity.0],
            property: self.graph.property(rel.target).name.as_str(),
        };
        self.host.add_connector(source, target);
    }

    pub(crate) fn connect_all(&mut self) {
        let relationships = self.graph.relationships().to_vec();
        for rel in &relationships {
            self.connect(rel);
        }
    }

    /// Spectral placement over all entities and relationships, in canonical order.
    pub(crate) fn spectral_points(&self, options: &SpectralOptions) -> Result<Vec<Point>> {
        let edges: Vec<(usize, usize)> = self.graph.edges().map(|(s, t)| (s.0, t.0)).collect();
        let points = SpectralLayout::new(self.elements.len(), edges)
            .with_options(options.clone())
            .calculate()?;
        Ok(points)
    }

    /// Percentage placement `scale·p + offset` for every element.
    pub(crate) fn place_percent(&mut self, points: &[Point], scale: f64, offset: f64) {
        for (&element, p) in self.elements.iter().zip(points) {
            self.host.place(
                element,
                Placement::Percent {
                    left: scale * p.x + offset,
                    top: scale * p.y + offset,
                },
            );
        }
    }
}
