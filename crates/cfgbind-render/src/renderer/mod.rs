//! Renderers producing one generated unit per materialized namespace

mod dagger;
mod guice;
mod java;
mod registry;
mod traits;

pub use dagger::DaggerRenderer;
pub use guice::GuiceRenderer;
pub use registry::RendererRegistry;
pub use traits::UnitRenderer;
