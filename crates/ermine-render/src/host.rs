//! The rendering collaborator consumed by diagrams.

use ermine_core::Entity;
use ermine_layout::{Rect, Size};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Where an element is added. `Main` is the free-form canvas used by the elastic and spectral
/// variants; the navigable variant uses the three panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Main,
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramKind {
    Elastic,
    Navigable,
    Spectral,
}

impl DiagramKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Elastic => "elastic",
            Self::Navigable => "navigable",
            Self::Spectral => "spectral",
        }
    }
}

impl std::fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DiagramKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "elastic" => Ok(Self::Elastic),
            "navigable" => Ok(Self::Navigable),
            "spectral" => Ok(Self::Spectral),
            other => Err(format!("unknown diagram variant `{other}`")),
        }
    }
}

/// Top-left position of an element.
///
/// Percentages are relative to [`RenderHost::bounds`]; pixels are in the same coordinate space
/// as the bounds rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", rename_all = "lowercase")]
pub enum Placement {
    Percent { left: f64, top: f64 },
    Pixels { left: f64, top: f64 },
}

/// One end of a connector: a rendered entity and the property row it attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Port<'a, E> {
    pub element: E,
    pub property: &'a str,
}

pub trait RenderHost {
    type Element: Copy + Eq + Hash + Debug;

    /// Creates the element for an entity: a header plus one addressable row per property.
    /// The element is not part of the scene until [`RenderHost::add_element`].
    fn render_entity(&mut self, entity: &Entity) -> Self::Element;

    /// Hides (`true`) or shows the property rows.
    fn set_collapsed(&mut self, element: Self::Element, collapsed: bool);

    fn add_element(&mut self, element: Self::Element, region: Region);

    fn add_connector(&mut self, source: Port<'_, Self::Element>, target: Port<'_, Self::Element>);

    /// Whether a connector links the two elements, in either direction.
    fn is_connected(&self, a: Self::Element, b: Self::Element) -> bool;

    /// Removes every element and connector from the scene. Elements stay valid and can be
    /// added again.
    fn clear(&mut self);

    /// Randomizes element placement.
    fn shuffle(&mut self);

    fn bounds(&self) -> Rect;

    fn element_size(&self, element: Self::Element) -> Size;

    fn place(&mut self, element: Self::Element, placement: Placement);

    fn set_kind(&mut self, _kind: DiagramKind) {}

    /// Attaches drag-to-move behavior. Layout never depends on it.
    fn make_draggable(&mut self, _element: Self::Element) {}

    fn add_selector_option(&mut self, _name: &str) {}

    fn set_selector_value(&mut self, _name: &str) {}
}
