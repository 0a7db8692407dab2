#![forbid(unsafe_code)]

//! Diagram composition for entity-relationship graphs.
//!
//! A diagram builds an [`ermine_core::Graph`], asks a [`RenderHost`] for one element per entity,
//! registers elements and connectors, then applies one layout strategy:
//! - [`ElasticDiagram`]: spectral seed refined by elastic relaxation
//! - [`NavigableDiagram`]: focus/context panels, no numeric layout
//! - [`SpectralDiagram`]: spectral placement only
//!
//! [`SceneHost`] is an in-memory host; [`svg::render_scene`] turns its scene into SVG.

pub mod diagram;
pub mod factory;
pub mod host;
pub mod navigator;
pub mod scene;
pub mod svg;
pub mod text;

pub use diagram::{ElasticDiagram, EntityDiagram, NavigableDiagram, SpectralDiagram};
pub use factory::DiagramFactory;
pub use host::{DiagramKind, Placement, Port, Region, RenderHost};
pub use navigator::VisibilityPartition;
pub use scene::{SceneElement, SceneHost, SceneOptions, SceneSnapshot};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Model(#[from] ermine_core::Error),
    #[error(transparent)]
    Layout(#[from] ermine_layout::Error),
    #[error("unknown entity `{name}`")]
    UnknownEntity { name: String },
    #[error("entity id #{id} is out of range (the graph has {count} entities)")]
    EntityOutOfRange { id: usize, count: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
