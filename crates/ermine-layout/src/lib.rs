#![forbid(unsafe_code)]

//! Headless layout kernels for entity-relationship diagrams.
//!
//! Two algorithms, meant to be chained:
//! - [`SpectralLayout`]: a global, non-iterative embedding from graph structure alone
//!   (normalized to the unit square)
//! - [`ElasticLayout`]: a bounded force-directed refinement of already-positioned bodies
//!
//! Both identify nodes by their index in a caller-owned canonical order. Nothing here knows about
//! entities or rendering.

pub mod elastic;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod rng;
pub mod spectral;

pub use elastic::{
    Boundary, ElasticLayout, ElasticLayoutOptions, RelaxationStats, validate_host,
};
pub use error::{Error, Result};
pub use geometry::{Body, Point, Rect, Size};
pub use graph::{Edge, validate_edges};
pub use rng::XorShift64Star;
pub use spectral::{SpectralLayout, SpectralOptions};

/// Opt-in stderr timing dump (`ERMINE_LAYOUT_TIMING=1`).
pub(crate) fn timing_enabled() -> bool {
    static ENABLED: std::sync::OnceLock<bool> = std::sync::OnceLock::new();
    *ENABLED.get_or_init(|| {
        matches!(
            std::env::var("ERMINE_LAYOUT_TIMING").as_deref(),
            Ok("1") | Ok("true")
        )
    })
}
