use ermine_core::EntityRelationshipData;
use ermine_layout::{Point, SpectralOptions};

use super::EntityDiagram;
use crate::Result;
use crate::host::{DiagramKind, RenderHost};

/// Seed coordinates are mapped into the inner 80% of the host, keeping nodes clear of the
/// diagram edges.
const SCALE_PERCENT: f64 = 80.0;
const INSET_PERCENT: f64 = 10.0;

/// Spectral placement only: collapsed, draggable entities at `80·x + 10` percent.
pub struct SpectralDiagram<'h, H: RenderHost> {
    base: EntityDiagram<'h, H>,
    points: Vec<Point>,
}

impl<'h, H: RenderHost> SpectralDiagram<'h, H> {
    pub fn new(
        host: &'h mut H,
        data: &EntityRelationshipData,
        spectral: &SpectralOptions,
    ) -> Result<Self> {
        let mut base = EntityDiagram::new(host, data, DiagramKind::Spectral)?;
        base.add_all(true, true);
        base.connect_all();

        let points = base.spectral_points(spectral)?;
        base.place_percent(&points, SCALE_PERCENT, INSET_PERCENT);

        Ok(Self { base, points })
    }

    pub fn diagram(&self) -> &EntityDiagram<'h, H> {
        &self.base
    }

    pub fn host(&self) -> &H {
        self.base.host()
    }

    /// Normalized points, in entity order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }
}
