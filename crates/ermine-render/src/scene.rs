//! A deterministic in-memory [`RenderHost`].
//!
//! `SceneHost` records everything a diagram asks of it (elements, regions, placements,
//! connectors, selector state) and sizes entity boxes from a [`TextMeasurer`]. Panels are laid
//! out as three stacked columns. It backs the CLI, the SVG writer and the tests.

use std::sync::Arc;

use ermine_core::Entity;
use ermine_layout::{Point, Rect, Size, XorShift64Star};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::host::{DiagramKind, Placement, Port, Region, RenderHost};
use crate::text::{DeterministicTextMeasurer, TextMeasurer, TextStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneElement(pub usize);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SceneOptions {
    pub width: f64,
    pub height: f64,
    /// Seed for [`RenderHost::shuffle`].
    pub seed: u64,
    pub font_size: f64,
    /// Inner padding of entity boxes.
    pub padding: f64,
    /// Margin and vertical gap between elements stacked in a panel.
    pub panel_gap: f64,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 640.0,
            seed: 0,
            font_size: 14.0,
            padding: 8.0,
            panel_gap: 24.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneProperty {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Debug, Clone, PartialEq)]
struct SceneEntity {
    name: String,
    properties: Vec<SceneProperty>,
    collapsed: bool,
    draggable: bool,
    region: Option<Region>,
    position: Point,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneConnector {
    pub source: SceneElement,
    pub source_property: String,
    pub target: SceneElement,
    pub target_property: String,
}

pub struct SceneHost {
    options: SceneOptions,
    measurer: Arc<dyn TextMeasurer + Send + Sync>,
    rng: XorShift64Star,
    kind: Option<DiagramKind>,
    entities: Vec<SceneEntity>,
    scene: Vec<SceneElement>,
    connectors: Vec<SceneConnector>,
    links: FxHashSet<(SceneElement, SceneElement)>,
    selector_options: Vec<String>,
    selector_value: Option<String>,
}

impl Default for SceneHost {
    fn default() -> Self {
        Self::new(SceneOptions::default())
    }
}

impl std::fmt::Debug for SceneHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneHost")
            .field("options", &self.options)
            .field("kind", &self.kind)
            .field("entities", &self.entities.len())
            .field("scene", &self.scene)
            .field("connectors", &self.connectors)
            .finish()
    }
}

impl SceneHost {
    pub fn new(options: SceneOptions) -> Self {
        Self {
            rng: XorShift64Star::new(options.seed),
            options,
            measurer: Arc::new(DeterministicTextMeasurer::default()),
            kind: None,
            entities: Vec::new(),
            scene: Vec::new(),
            connectors: Vec::new(),
            links: FxHashSet::default(),
            selector_options: Vec::new(),
            selector_value: None,
        }
    }

    pub fn with_measurer(mut self, measurer: Arc<dyn TextMeasurer + Send + Sync>) -> Self {
        self.measurer = measurer;
        self
    }

    pub fn options(&self) -> &SceneOptions {
        &self.options
    }

    pub fn kind(&self) -> Option<DiagramKind> {
        self.kind
    }

    /// Number of entity elements created so far, whether or not they are in the scene.
    pub fn rendered_count(&self) -> usize {
        self.entities.len()
    }

    /// Elements currently in the scene, in the order they were added.
    pub fn scene_elements(&self) -> &[SceneElement] {
        &self.scene
    }

    pub fn elements_in(&self, region: Region) -> Vec<SceneElement> {
        self.scene
            .iter()
            .copied()
            .filter(|&el| self.entities[el.0].region == Some(region))
            .collect()
    }

    pub fn names_in(&self, region: Region) -> Vec<&str> {
        self.elements_in(region)
            .into_iter()
            .map(|el| self.name(el))
            .collect()
    }

    pub fn element_by_name(&self, name: &str) -> Option<SceneElement> {
        self.entities
            .iter()
            .position(|e| e.name == name)
            .map(SceneElement)
    }

    pub fn name(&self, element: SceneElement) -> &str {
        &self.entities[element.0].name
    }

    pub fn properties(&self, element: SceneElement) -> &[SceneProperty] {
        &self.entities[element.0].properties
    }

    pub fn region(&self, element: SceneElement) -> Option<Region> {
        self.entities[element.0].region
    }

    pub fn is_collapsed(&self, element: SceneElement) -> bool {
        self.entities[element.0].collapsed
    }

    pub fn is_draggable(&self, element: SceneElement) -> bool {
        self.entities[element.0].draggable
    }

    /// Top-left corner in pixels.
    pub fn position(&self, element: SceneElement) -> Point {
        self.entities[element.0].position
    }

    pub fn rect(&self, element: SceneElement) -> Rect {
        let p = self.position(element);
        let s = self.element_size(element);
        Rect::new(p.x, p.y, s.width, s.height)
    }

    pub fn connectors(&self) -> &[SceneConnector] {
        &self.connectors
    }

    pub fn selector_options(&self) -> &[String] {
        &self.selector_options
    }

    pub fn selector_value(&self) -> Option<&str> {
        self.selector_value.as_deref()
    }

    pub fn row_height(&self) -> f64 {
        self.options.font_size * 1.2 + self.options.padding
    }

    /// The row a connector attaches to: the property row when expanded, the header otherwise
    /// (or when the property is unknown).
    pub fn anchor_row(&self, element: SceneElement, property: &str) -> Rect {
        let rect = self.rect(element);
        let row = self.row_height();
        let entity = &self.entities[element.0];
        let index = if entity.collapsed {
            None
        } else {
            entity.properties.iter().position(|p| p.name == property)
        };
        let top = match index {
            Some(i) => rect.y + row * (i as f64 + 1.0),
            None => rect.y,
        };
        Rect::new(rect.x, top, rect.width, row)
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            kind: self.kind,
            width: self.options.width,
            height: self.options.height,
            selected: self.selector_value.clone(),
            elements: self
                .scene
                .iter()
                .map(|&el| {
                    let e = &self.entities[el.0];
                    let size = self.element_size(el);
                    SnapshotElement {
                        name: e.name.clone(),
                        region: e.region.unwrap_or(Region::Main),
                        left: e.position.x,
                        top: e.position.y,
                        width: size.width,
                        height: size.height,
                        collapsed: e.collapsed,
                    }
                })
                .collect(),
            connectors: self
                .connectors
                .iter()
                .map(|c| SnapshotConnector {
                    source: SnapshotEndpoint {
                        entity: self.name(c.source).to_string(),
                        property: c.source_property.clone(),
                    },
                    target: SnapshotEndpoint {
                        entity: self.name(c.target).to_string(),
                        property: c.target_property.clone(),
                    },
                })
                .collect(),
        }
    }

    /// Stacks `element` under whatever is already in the same panel column.
    fn flow_into_panel(&mut self, element: SceneElement, region: Region) {
        let column = match region {
            Region::Left => 1.0 / 6.0,
            Region::Center => 0.5,
            Region::Right => 5.0 / 6.0,
            Region::Main => return,
        };
        let gap = self.options.panel_gap;
        let mut top = gap;
        for &other in &self.scene {
            if other != element && self.entities[other.0].region == Some(region) {
                top += self.element_size(other).height + gap;
            }
        }
        let size = self.element_size(element);
        let left = self.options.width * column - size.width / 2.0;
        self.entities[element.0].position = Point::new(left.max(0.0), top);
    }
}

impl RenderHost for SceneHost {
    type Element = SceneElement;

    fn render_entity(&mut self, entity: &Entity) -> SceneElement {
        let id = SceneElement(self.entities.len());
        self.entities.push(SceneEntity {
            name: entity.name.clone(),
            properties: entity
                .properties
                .iter()
                .map(|p| SceneProperty {
                    name: p.name.clone(),
                    ty: p.ty.clone(),
                })
                .collect(),
            collapsed: false,
            draggable: false,
            region: None,
            position: Point::default(),
        });
        id
    }

    fn set_collapsed(&mut self, element: SceneElement, collapsed: bool) {
        self.entities[element.0].collapsed = collapsed;
    }

    fn add_element(&mut self, element: SceneElement, region: Region) {
        if self.entities[element.0].region.is_none() {
            self.scene.push(element);
        }
        self.entities[element.0].region = Some(region);
        self.flow_into_panel(element, region);
    }

    fn add_connector(&mut self, source: Port<'_, SceneElement>, target: Port<'_, SceneElement>) {
        self.links.insert((source.element, target.element));
        self.connectors.push(SceneConnector {
            source: source.element,
            source_property: source.property.to_string(),
            target: target.element,
            target_property: target.property.to_string(),
        });
    }

    fn is_connected(&self, a: SceneElement, b: SceneElement) -> bool {
        self.links.contains(&(a, b)) || self.links.contains(&(b, a))
    }

    fn clear(&mut self) {
        for el in self.scene.drain(..) {
            self.entities[el.0].region = None;
        }
        self.connectors.clear();
        self.links.clear();
    }

    fn shuffle(&mut self) {
        let (width, height) = (self.options.width, self.options.height);
        for i in 0..self.scene.len() {
            let el = self.scene[i];
            let size = self.element_size(el);
            let left = self.rng.next_f64_unit() * (width - size.width).max(0.0);
            let top = self.rng.next_f64_unit() * (height - size.height).max(0.0);
            self.entities[el.0].position = Point::new(left, top);
        }
    }

    fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.options.width, self.options.height)
    }

    fn element_size(&self, element: SceneElement) -> Size {
        let entity = &self.entities[element.0];
        let pad = self.options.padding;
        let style = TextStyle {
            font_size: self.options.font_size,
            bold: true,
        };
        let mut width = self.measurer.measure(&entity.name, &style).width;
        let mut rows = 1.0;
        if !entity.collapsed {
            let style = TextStyle {
                bold: false,
                ..style
            };
            for p in &entity.properties {
                let label = format!("{}: {}", p.name, p.ty);
                width = width.max(self.measurer.measure(&label, &style).width);
            }
            rows += entity.properties.len() as f64;
        }
        Size::new(width + 2.0 * pad, rows * self.row_height())
    }

    fn place(&mut self, element: SceneElement, placement: Placement) {
        let bounds = self.bounds();
        let position = match placement {
            Placement::Percent { left, top } => Point::new(
                bounds.x + left / 100.0 * bounds.width,
                bounds.y + top / 100.0 * bounds.height,
            ),
            Placement::Pixels { left, top } => Point::new(left, top),
        };
        self.entities[element.0].position = position;
    }

    fn set_kind(&mut self, kind: DiagramKind) {
        self.kind = Some(kind);
    }

    fn make_draggable(&mut self, element: SceneElement) {
        self.entities[element.0].draggable = true;
    }

    fn add_selector_option(&mut self, name: &str) {
        self.selector_options.push(name.to_string());
    }

    fn set_selector_value(&mut self, name: &str) {
        self.selector_value = Some(name.to_string());
    }
}

/// Serializable view of a [`SceneHost`] scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSnapshot {
    pub kind: Option<DiagramKind>,
    pub width: f64,
    pub height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<String>,
    pub elements: Vec<SnapshotElement>,
    pub connectors: Vec<SnapshotConnector>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotElement {
    pub name: String,
    pub region: Region,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub collapsed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotConnector {
    pub source: SnapshotEndpoint,
    pub target: SnapshotEndpoint,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotEndpoint {
    pub entity: String,
    pub property: String,
}
