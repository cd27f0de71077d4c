//! Unit rendering and output for cfgbind
//!
//! A [`UnitRenderer`] turns a planned unit into source text for one
//! dependency-injection framework. A [`UnitSink`] receives the rendered
//! text, either on disk ([`DirectorySink`]) or in memory ([`MemorySink`]).

pub mod error;
pub mod renderer;
pub mod sink;

pub use error::{Error, Result};
pub use renderer::{DaggerRenderer, GuiceRenderer, RendererRegistry, UnitRenderer};
pub use sink::{DirectorySink, MemorySink, UnitId, UnitSink, WriteOutcome};
