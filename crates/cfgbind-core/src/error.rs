//! Error types for cfgbind-core

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No record manifests were configured or given
    #[error("No record manifests configured; pass --manifest or set [input] manifests")]
    NoManifests,

    #[error(transparent)]
    Fs(#[from] cfgbind_fs::Error),

    #[error(transparent)]
    Meta(#[from] cfgbind_meta::Error),

    #[error(transparent)]
    Tree(#[from] cfgbind_tree::Error),

    #[error(transparent)]
    Render(#[from] cfgbind_render::Error),
}
