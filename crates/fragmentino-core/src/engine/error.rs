use thiserror::Error;

use super::config::ConfigError;
use super::graph::GraphError;
use crate::core::io::summary::SummaryError;
use crate::core::io::xyz::XyzError;
use crate::core::models::molecule::MoleculeError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid molecule: {0}")]
    Molecule(#[from] MoleculeError),

    #[error("Graph operation failed: {0}")]
    Graph(#[from] GraphError),

    #[error("Failed to write fragment file '{path}': {source}")]
    FragmentOutput { path: String, source: XyzError },

    #[error("Failed to write fragment summary: {0}")]
    Summary(#[from] SummaryError),

    #[error("Molecule has not been fragmented yet")]
    NotFragmented,
}
