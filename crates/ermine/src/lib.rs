#![forbid(unsafe_code)]

//! `ermine` lays out entity-relationship diagrams without a browser.
//!
//! The graph model is always available. Layout and rendering live behind the `render` feature.
//!
//! # Features
//!
//! - `render`: diagram composition, the in-memory scene host and SVG output (`ermine::render`)

pub use ermine_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use ermine_layout::{
        Boundary, ElasticLayoutOptions, Point, Rect, RelaxationStats, Size, SpectralOptions,
    };
    pub use ermine_render::svg::render_scene;
    pub use ermine_render::text::{DeterministicTextMeasurer, TextMeasurer, TextStyle};
    pub use ermine_render::{
        DiagramFactory, DiagramKind, ElasticDiagram, NavigableDiagram, Placement, Port, Region,
        RenderHost, SceneHost, SceneOptions, SceneSnapshot, SpectralDiagram, VisibilityPartition,
    };

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Model(#[from] ermine_core::Error),
        #[error(transparent)]
        Render(#[from] ermine_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Everything a headless run needs besides the data.
    #[derive(Debug, Clone)]
    pub struct HeadlessOptions {
        pub variant: DiagramKind,
        /// Navigable variant only: the entity to focus instead of the first one. Behaves like
        /// activating that entity's header, so the selector follows.
        pub focus: Option<String>,
        pub scene: SceneOptions,
        pub elastic: ElasticLayoutOptions,
        pub spectral: SpectralOptions,
    }

    impl Default for HeadlessOptions {
        fn default() -> Self {
            Self {
                variant: DiagramKind::Elastic,
                focus: None,
                scene: SceneOptions::default(),
                elastic: ElasticLayoutOptions::default(),
                spectral: SpectralOptions::default(),
            }
        }
    }

    /// Builds the requested diagram on a fresh [`SceneHost`] and returns the host.
    pub fn compose_scene_sync(
        data: &crate::EntityRelationshipData,
        options: &HeadlessOptions,
    ) -> Result<SceneHost> {
        let mut host = SceneHost::new(options.scene.clone());
        let factory = DiagramFactory::new().with_spectral_options(options.spectral.clone());
        match options.variant {
            DiagramKind::Elastic => {
                factory.create_elastic_diagram(&mut host, data, &options.elastic)?;
            }
            DiagramKind::Spectral => {
                factory.create_spectral_diagram(&mut host, data)?;
            }
            DiagramKind::Navigable => {
                let mut diagram = factory.create_navigable_diagram(&mut host, data)?;
                if let Some(name) = options.focus.as_deref() {
                    let id = diagram.diagram().entity_id(name)?;
                    diagram.on_header_activated(id)?;
                }
            }
        }
        Ok(host)
    }

    /// Synchronous layout helper: JSON text in, [`SceneSnapshot`] out.
    pub fn layout_json_sync(text: &str, options: &HeadlessOptions) -> Result<SceneSnapshot> {
        let data = crate::EntityRelationshipData::from_json_str(text)?;
        Ok(compose_scene_sync(&data, options)?.snapshot())
    }

    /// Synchronous SVG render helper.
    pub fn render_svg_sync(text: &str, options: &HeadlessOptions) -> Result<String> {
        let data = crate::EntityRelationshipData::from_json_str(text)?;
        let host = compose_scene_sync(&data, options)?;
        Ok(render_scene(&host))
    }
}
