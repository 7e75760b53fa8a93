//! Almacenamiento transitorio en disco.
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use doi_core::{StorageError, TransientStorage};

/// Escribe los documentos en disco creando los directorios que falten.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStorage;

impl FsStorage {
    pub fn new() -> Self {
        Self
    }
}

impl TransientStorage for FsStorage {
    fn write(&self, path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
        let to_err = |source| StorageError::Write { path: path.to_path_buf(), source };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(to_err)?;
        }
        fs::write(path, bytes).map_err(to_err)
    }

    fn delete(&self, path: &Path) -> Result<(), StorageError> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::Missing(path.to_path_buf())),
            Err(source) => Err(StorageError::Delete { path: path.to_path_buf(), source }),
        }
    }
}
