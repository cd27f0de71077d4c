//! Renderer registry for selecting a renderer by DI target

use cfgbind_meta::{DiTarget, GeneratorConfig};

use super::{DaggerRenderer, GuiceRenderer, UnitRenderer};

/// Holds one renderer per supported DI target.
pub struct RendererRegistry {
    dagger: DaggerRenderer,
    guice: GuiceRenderer,
}

impl RendererRegistry {
    /// Create a registry using each target's default unit name.
    pub fn new() -> Self {
        Self {
            dagger: DaggerRenderer::new(),
            guice: GuiceRenderer::new(),
        }
    }

    /// Create a registry whose renderer for the configured target uses the
    /// configured unit name.
    pub fn from_config(config: &GeneratorConfig) -> Self {
        let mut registry = Self::new();
        let unit_name = config.unit_name();
        match config.generator.target {
            DiTarget::Dagger => registry.dagger = DaggerRenderer::with_unit_name(unit_name),
            DiTarget::Guice => registry.guice = GuiceRenderer::with_unit_name(unit_name),
        }
        registry
    }

    /// Get the renderer for a DI target.
    pub fn get(&self, target: DiTarget) -> &dyn UnitRenderer {
        match target {
            DiTarget::Dagger => &self.dagger,
            DiTarget::Guice => &self.guice,
        }
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::new()
    }
}
