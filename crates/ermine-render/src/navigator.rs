//! Focus/context partition: the ego-network of one entity, split by edge direction.

use ermine_core::{EntityId, Graph};

/// What the navigable view shows for one focal entity.
///
/// `left` and `right` are disjoint and never contain the focus. An entity that is both a
/// predecessor and a successor is listed on the left only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityPartition {
    pub focus: EntityId,
    /// Sources of relationships pointing into the focus, in first-seen relationship order.
    pub left: Vec<EntityId>,
    /// Targets of relationships leaving the focus, minus anything already on the left.
    pub right: Vec<EntityId>,
    /// Indices of relationships whose both endpoints are the focus.
    pub self_loops: Vec<usize>,
    /// Indices of every relationship touching the focus, in relationship order.
    pub connectors: Vec<usize>,
}

impl VisibilityPartition {
    pub fn compute(graph: &Graph, focus: EntityId) -> Self {
        let mut left: Vec<EntityId> = Vec::new();
        let mut successors: Vec<EntityId> = Vec::new();
        let mut self_loops: Vec<usize> = Vec::new();
        let mut connectors: Vec<usize> = Vec::new();

        for (idx, rel) in graph.relationships().iter().enumerate() {
            if !rel.touches(focus) {
                continue;
            }
            connectors.push(idx);

            if rel.is_self_loop() {
                self_loops.push(idx);
            } else if rel.target_entity() == focus {
                push_unique(&mut left, rel.source_entity());
            } else {
                push_unique(&mut successors, rel.target_entity());
            }
        }

        let right: Vec<EntityId> = successors
            .into_iter()
            .filter(|id| !left.contains(id))
            .collect();

        tracing::trace!(
            focus = focus.0,
            left = left.len(),
            right = right.len(),
            self_loops = self_loops.len(),
            connectors = connectors.len(),
            "visibility partition"
        );

        Self {
            focus,
            left,
            right,
            self_loops,
            connectors,
        }
    }

    /// Focus first, then the left panel, then the right panel.
    pub fn visible(&self) -> impl Iterator<Item = EntityId> + '_ {
        std::iter::once(self.focus)
            .chain(self.left.iter().copied())
            .chain(self.right.iter().copied())
    }

    pub fn is_visible(&self, id: EntityId) -> bool {
        self.focus == id || self.left.contains(&id) || self.right.contains(&id)
    }
}

fn push_unique(out: &mut Vec<EntityId>, id: EntityId) {
    if !out.contains(&id) {
        out.push(id);
    }
}
