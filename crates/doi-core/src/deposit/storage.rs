//! Almacenamiento transitorio de documentos.
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, warn};

use crate::errors::StorageError;

pub trait TransientStorage {
    fn write(&self, path: &Path, bytes: &[u8]) -> Result<(), StorageError>;
    fn delete(&self, path: &Path) -> Result<(), StorageError>;
}

/// Archivo transitorio con borrado garantizado: `delete` se invoca una única
/// vez al salir de scope, incluso si la escritura falló o si hay unwind.
pub(crate) struct TransientFile<'a> {
    storage: &'a dyn TransientStorage,
    path: PathBuf,
}

impl<'a> TransientFile<'a> {
    pub(crate) fn new(storage: &'a dyn TransientStorage, path: PathBuf) -> Self {
        Self { storage, path }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn write(&self, bytes: &[u8]) -> Result<(), StorageError> {
        self.storage.write(&self.path, bytes)
    }
}

impl Drop for TransientFile<'_> {
    fn drop(&mut self) {
        match self.storage.delete(&self.path) {
            Ok(()) => debug!("transient:deleted path={}", self.path.display()),
            Err(StorageError::Missing(_)) => debug!("transient:missing path={}", self.path.display()),
            Err(e) => warn!("transient:delete failed: {e}"),
        }
    }
}

#[derive(Debug, Default)]
struct MemoryFiles {
    files: HashMap<PathBuf, Vec<u8>>,
    writes: Vec<PathBuf>,
    deletes: Vec<PathBuf>,
    fail_writes: bool,
}

/// Almacenamiento en memoria que registra cada escritura y borrado.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    inner: Arc<Mutex<MemoryFiles>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn files(&self) -> MutexGuard<'_, MemoryFiles> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.files().fail_writes = fail;
    }

    /// Archivos que siguen presentes.
    pub fn live_files(&self) -> Vec<PathBuf> {
        self.files().files.keys().cloned().collect()
    }

    pub fn contents(&self, path: &Path) -> Option<Vec<u8>> {
        self.files().files.get(path).cloned()
    }

    pub fn writes(&self) -> Vec<PathBuf> {
        self.files().writes.clone()
    }

    pub fn deletes(&self) -> Vec<PathBuf> {
        self.files().deletes.clone()
    }
}

impl TransientStorage for InMemoryStorage {
    fn write(&self, path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
        let mut files = self.files();
        files.writes.push(path.to_path_buf());
        if files.fail_writes {
            return Err(StorageError::Write { path: path.to_path_buf(),
                                             source: std::io::Error::new(std::io::ErrorKind::Other, "writes disabled") });
        }
        files.files.insert(path.to_path_buf(), bytes.to_vec());
        Ok(())
    }

    fn delete(&self, path: &Path) -> Result<(), StorageError> {
        let mut files = self.files();
        files.deletes.push(path.to_path_buf());
        match files.files.remove(path) {
            Some(_) => Ok(()),
            None => Err(StorageError::Missing(path.to_path_buf())),
        }
    }
}
