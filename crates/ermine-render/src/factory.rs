use ermine_core::EntityRelationshipData;
use ermine_layout::{ElasticLayoutOptions, SpectralOptions};

use crate::Result;
use crate::diagram::{ElasticDiagram, NavigableDiagram, SpectralDiagram};
use crate::host::RenderHost;

/// Entry points for the three diagram variants. A plain value: no global state.
#[derive(Debug, Clone, Default)]
pub struct DiagramFactory {
    pub spectral: SpectralOptions,
}

impl DiagramFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_spectral_options(mut self, spectral: SpectralOptions) -> Self {
        self.spectral = spectral;
        self
    }

    pub fn create_elastic_diagram<'h, H: RenderHost>(
        &self,
        host: &'h mut H,
        data: &EntityRelationshipData,
        options: &ElasticLayoutOptions,
    ) -> Result<ElasticDiagram<'h, H>> {
        ElasticDiagram::new(host, data, options, &self.spectral)
    }

    pub fn create_navigable_diagram<'h, H: RenderHost>(
        &self,
        host: &'h mut H,
        data: &EntityRelationshipData,
    ) -> Result<NavigableDiagram<'h, H>> {
        NavigableDiagram::new(host, data)
    }

    pub fn create_spectral_diagram<'h, H: RenderHost>(
        &self,
        host: &'h mut H,
        data: &EntityRelationshipData,
    ) -> Result<SpectralDiagram<'h, H>> {
        SpectralDiagram::new(host, data, &self.spectral)
    }
}
