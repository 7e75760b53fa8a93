//! Errores de configuración y de carga de snapshots.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is set but empty")]
    Empty(&'static str),
    #[error("invalid export file prefix `{0}`: must not contain path separators")]
    InvalidPrefix(String),
    #[error("missing required setting {0}")]
    Missing(&'static str),
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("cannot read snapshot {path}: {source}")]
    Read { path: PathBuf, #[source] source: std::io::Error },
    #[error("invalid snapshot json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate tenant id {0} in snapshot")]
    DuplicateTenant(u64),
}

/// Error al armar el task a partir de la configuración.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}
