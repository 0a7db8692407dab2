use ermine_core::{EntityId, EntityRelationshipData};

use super::EntityDiagram;
use crate::Result;
use crate::host::{DiagramKind, Region, RenderHost};
use crate::navigator::VisibilityPartition;

/// Focus/context view: the focal entity in the center panel, predecessors on the left,
/// successors on the right. No numeric layout.
///
/// The two UI triggers are plain methods: [`NavigableDiagram::on_selection_change`] for the
/// selector and [`NavigableDiagram::on_header_activated`] for an entity header.
pub struct NavigableDiagram<'h, H: RenderHost> {
    base: EntityDiagram<'h, H>,
    current: Option<EntityId>,
    partition: Option<VisibilityPartition>,
}

impl<'h, H: RenderHost> NavigableDiagram<'h, H> {
    /// Expands every entity, fills the selector and focuses the first entity. With zero
    /// entities nothing is shown and no selection happens.
    pub fn new(host: &'h mut H, data: &EntityRelationshipData) -> Result<Self> {
        let base = EntityDiagram::new(host, data, DiagramKind::Navigable)?;
        let mut diagram = Self {
            base,
            current: None,
            partition: None,
        };

        for (idx, entity) in diagram.base.graph.entities().enumerate() {
            let element = diagram.base.elements[idx];
            diagram.base.host.set_collapsed(element, false);
            diagram.base.host.add_selector_option(&entity.name);
        }

        if let Some(first) = diagram.base.graph.first_entity() {
            let name = diagram.base.graph.entity_by_id(first).name.as_str();
            diagram.base.host.set_selector_value(name);
            diagram.display(first);
        }
        Ok(diagram)
    }

    /// Re-renders the view around `id`.
    pub fn select(&mut self, id: EntityId) -> Result<()> {
        self.base.check_id(id)?;
        self.display(id);
        Ok(())
    }

    pub fn select_by_name(&mut self, name: &str) -> Result<()> {
        let id = self.base.entity_id(name)?;
        self.display(id);
        Ok(())
    }

    /// Selector changed. A value that names no entity is ignored.
    pub fn on_selection_change(&mut self, name: &str) {
        match self.base.graph.entity_id(name) {
            Some(id) => self.display(id),
            None => tracing::debug!(name, "selector value names no entity; ignored"),
        }
    }

    /// Entity header clicked: sync the selector, then show the entity.
    pub fn on_header_activated(&mut self, id: EntityId) -> Result<()> {
        self.base.check_id(id)?;
        let name = self.base.graph.entity_by_id(id).name.as_str();
        self.base.host.set_selector_value(name);
        self.display(id);
        Ok(())
    }

    pub fn current(&self) -> Option<EntityId> {
        self.current
    }

    pub fn partition(&self) -> Option<&VisibilityPartition> {
        self.partition.as_ref()
    }

    pub fn diagram(&self) -> &EntityDiagram<'h, H> {
        &self.base
    }

    pub fn host(&self) -> &H {
        self.base.host()
    }

    fn display(&mut self, focus: EntityId) {
        let partition = VisibilityPartition::compute(&self.base.graph, focus);

        self.base.host.clear();
        let elements = &self.base.elements;
        let host = &mut *self.base.host;
        host.add_element(elements[focus.0], Region::Center);
        for id in &partition.left {
            host.add_element(elements[id.0], Region::Left);
        }
        for id in &partition.right {
            host.add_element(elements[id.0], Region::Right);
        }

        for &idx in &partition.connectors {
            let rel = self.base.graph.relationships()[idx];
            self.base.connect(&rel);
        }

        self.current = Some(focus);
        self.partition = Some(partition);
    }
}
