//! Errores de los colaboradores externos.
//!
//! Ninguno de estos errores aborta una corrida por sí mismo: el executor y el
//! orquestador los convierten en entradas del `RunLog`. Sólo la ausencia del
//! plugin de registro (o un repositorio que no puede listar tenants) termina
//! la corrida con resultado `false`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
    #[error("query failed: {0}")]
    Query(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("no document filter registered for `{0}`")]
    UnknownFilter(String),
    #[error("document serialization failed: {0}")]
    Serialization(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("cannot write transient file {path}: {source}")]
    Write { path: PathBuf, #[source] source: std::io::Error },
    #[error("cannot delete transient file {path}: {source}")]
    Delete { path: PathBuf, #[source] source: std::io::Error },
    #[error("transient file {0} does not exist")]
    Missing(PathBuf),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connection(String),
    #[error("deposit rejected before submission: {0}")]
    Rejected(String),
    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("log sink io: {0}")]
    Io(#[from] std::io::Error),
    #[error("log sink encoding: {0}")]
    Encoding(#[from] serde_json::Error),
}
