use ermine_core::EntityRelationshipData;
use ermine_layout::{
    Body, ElasticLayout, ElasticLayoutOptions, Point, RelaxationStats, SpectralOptions,
    validate_host,
};

use super::EntityDiagram;
use crate::Result;
use crate::host::{DiagramKind, Placement, RenderHost};

/// Spectral seed refined by elastic relaxation. Entities are collapsed and draggable.
pub struct ElasticDiagram<'h, H: RenderHost> {
    base: EntityDiagram<'h, H>,
    seed: Vec<Point>,
    stats: RelaxationStats,
}

impl<'h, H: RenderHost> ElasticDiagram<'h, H> {
    pub fn new(
        host: &'h mut H,
        data: &EntityRelationshipData,
        options: &ElasticLayoutOptions,
        spectral: &SpectralOptions,
    ) -> Result<Self> {
        options.validate()?;
        validate_host(&host.bounds())?;

        let mut base = EntityDiagram::new(host, data, DiagramKind::Elastic)?;
        base.add_all(true, true);
        base.connect_all();
        base.host.shuffle();

        let seed = base.spectral_points(spectral)?;
        base.place_percent(&seed, 100.0, 0.0);

        let bounds = base.host.bounds();
        let mut bodies: Vec<Body> = base
            .elements
            .iter()
            .zip(&seed)
            .map(|(&element, p)| {
                Body::new(
                    bounds.x + p.x * bounds.width,
                    bounds.y + p.y * bounds.height,
                    base.host.element_size(element),
                )
            })
            .collect();

        let stats = {
            let host: &H = &*base.host;
            let elements = &base.elements;
            ElasticLayout::new(options.clone(), bounds, &mut bodies, |i, j| {
                host.is_connected(elements[i], elements[j])
            })?
            .initialize()
        };

        for (&element, body) in base.elements.iter().zip(&bodies) {
            base.host.place(
                element,
                Placement::Pixels {
                    left: body.left,
                    top: body.top,
                },
            );
        }

        Ok(Self { base, seed, stats })
    }

    pub fn diagram(&self) -> &EntityDiagram<'h, H> {
        &self.base
    }

    pub fn host(&self) -> &H {
        self.base.host()
    }

    /// Spectral seed in the unit square, before scaling into the host.
    pub fn seed(&self) -> &[Point] {
        &self.seed
    }

    pub fn stats(&self) -> RelaxationStats {
        self.stats
    }
}
