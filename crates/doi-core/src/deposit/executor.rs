//! Executor de depósitos.
//!
//! Secuencia por objeto: nombre único -> escritura transitoria -> depósito ->
//! borrado incondicional -> resultado como dato. El executor nunca devuelve
//! error: fallos de escritura o de transporte se pliegan en
//! `DepositResult::Failure` con el mensaje genérico de depósito.
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use log::{debug, warn};
use uuid::Uuid;

use super::storage::{TransientFile, TransientStorage};
use super::transport::DepositTransport;
use crate::constants::{DEFAULT_EXPORT_FILE_EXTENSION, DEFAULT_EXPORT_FILE_PREFIX};
use crate::model::{DepositResult, RegisterableObject, Tenant};
use crate::runlog::messages::DEPOSIT_ERROR;

/// Directorio y forma de los nombres de export.
///
/// `datacite-20160723-160036-articles-1-1-3f2a9c1e-0.xml`:
/// prefijo, fecha y hora UTC, tipo, id de objeto, id de tenant, token de la
/// corrida y secuencia dentro de la corrida.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportNaming {
    pub dir: PathBuf,
    pub prefix: String,
    pub extension: String,
}

impl ExportNaming {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(),
               prefix: DEFAULT_EXPORT_FILE_PREFIX.to_string(),
               extension: DEFAULT_EXPORT_FILE_EXTENSION.to_string() }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn file_path(&self, at: DateTime<Utc>, object: &RegisterableObject, run_token: &str, seq: u64) -> PathBuf {
        let name = format!("{}-{}-{}-{}-{}-{}-{}{}",
                           self.prefix,
                           at.format("%Y%m%d-%H%M%S"),
                           object.kind.file_name_part(),
                           object.id,
                           object.tenant,
                           run_token,
                           seq,
                           self.extension);
        self.dir.join(name)
    }
}

impl Default for ExportNaming {
    fn default() -> Self {
        Self::new(std::env::temp_dir())
    }
}

/// Resultado de un intento: dónde vivió el documento y qué respondió el
/// registrador. El archivo ya no existe cuando se devuelve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositAttempt {
    pub path: PathBuf,
    pub result: DepositResult,
}

pub struct DepositExecutor<'a> {
    storage: &'a dyn TransientStorage,
    transport: &'a dyn DepositTransport,
    naming: &'a ExportNaming,
    run_token: String,
    seq: u64,
}

impl<'a> DepositExecutor<'a> {
    pub fn new(storage: &'a dyn TransientStorage,
               transport: &'a dyn DepositTransport,
               naming: &'a ExportNaming,
               run_id: Uuid)
               -> Self {
        let run_token = run_id.simple().to_string()[..8].to_string();
        Self { storage,
               transport,
               naming,
               run_token,
               seq: 0 }
    }

    /// Intentos realizados por este executor.
    pub fn attempts(&self) -> u64 {
        self.seq
    }

    pub fn attempt(&mut self, object: &RegisterableObject, document: &[u8], tenant: &Tenant) -> DepositAttempt {
        let path = self.naming.file_path(Utc::now(), object, &self.run_token, self.seq);
        self.seq += 1;

        let file = TransientFile::new(self.storage, path.clone());
        let result = match file.write(document) {
            Ok(()) => {
                debug!("deposit:start object={object} tenant={} path={}", tenant.path, path.display());
                match self.transport.deposit(object, tenant, file.path()) {
                    Ok(result) => result,
                    Err(e) => {
                        warn!("deposit:transport error object={object} tenant={}: {e}", tenant.path);
                        DepositResult::failure(DEPOSIT_ERROR, Some(&e.to_string()))
                    }
                }
            }
            Err(e) => {
                warn!("deposit:write failed object={object} tenant={}: {e}", tenant.path);
                DepositResult::failure(DEPOSIT_ERROR, Some(&e.to_string()))
            }
        };
        drop(file);

        debug!("deposit:done object={object} success={}", result.is_success());
        DepositAttempt { path, result }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deposit::InMemoryStorage;
    use crate::errors::TransportError;
    use crate::model::{DepositMessage, ObjectKind, TenantId};
    use std::path::Path;
    use std::sync::Mutex;

    struct FnTransport<F>(F);

    impl<F> DepositTransport for FnTransport<F>
        where F: Fn(&RegisterableObject, &Path) -> Result<DepositResult, TransportError>
    {
        fn deposit(&self, object: &RegisterableObject, _tenant: &Tenant, document: &Path) -> Result<DepositResult, TransportError> {
            (self.0)(object, document)
        }
    }

    fn fixture() -> (Tenant, RegisterableObject, ExportNaming, Uuid) {
        let tenant = Tenant::new(1, "jas");
        let object = RegisterableObject::new(ObjectKind::Work, 7, TenantId(1));
        (tenant, object, ExportNaming::new("/exports"), Uuid::new_v4())
    }

    #[test]
    fn successful_deposit_sees_the_document_and_removes_it() {
        let (tenant, object, naming, run_id) = fixture();
        let storage = InMemoryStorage::new();
        let probe = storage.clone();
        let seen = Mutex::new(Vec::new());
        let transport = FnTransport(|_: &RegisterableObject, p: &Path| {
            seen.lock().unwrap().push(probe.contents(p));
            Ok(DepositResult::Success)
        });

        let mut exec = DepositExecutor::new(&storage, &transport, &naming, run_id);
        let attempt = exec.attempt(&object, b"<resource/>", &tenant);

        assert_eq!(attempt.result, DepositResult::Success);
        assert_eq!(seen.lock().unwrap().as_slice(), &[Some(b"<resource/>".to_vec())]);
        assert_eq!(storage.deletes(), vec![attempt.path.clone()]);
        assert!(storage.live_files().is_empty());
    }

    #[test]
    fn transport_error_is_folded_and_file_removed_once() {
        let (tenant, object, naming, run_id) = fixture();
        let storage = InMemoryStorage::new();
        let transport = FnTransport(|_: &RegisterableObject, _: &Path| Err(TransportError::Connection("timeout".into())));

        let mut exec = DepositExecutor::new(&storage, &transport, &naming, run_id);
        let attempt = exec.attempt(&object, b"doc", &tenant);

        assert_eq!(attempt.result,
                   DepositResult::Failure { messages: vec![DepositMessage::new(DEPOSIT_ERROR, Some("connection failed: timeout"))] });
        assert_eq!(storage.deletes().len(), 1);
        assert!(storage.live_files().is_empty());
    }

    #[test]
    fn write_failure_skips_transport_but_still_deletes() {
        let (tenant, object, naming, run_id) = fixture();
        let storage = InMemoryStorage::new();
        storage.set_fail_writes(true);
        let called = Mutex::new(0);
        let transport = FnTransport(|_: &RegisterableObject, _: &Path| {
            *called.lock().unwrap() += 1;
            Ok(DepositResult::Success)
        });

        let mut exec = DepositExecutor::new(&storage, &transport, &naming, run_id);
        let attempt = exec.attempt(&object, b"doc", &tenant);

        assert!(matches!(attempt.result, DepositResult::Failure { .. }));
        assert_eq!(*called.lock().unwrap(), 0);
        assert_eq!(storage.deletes(), vec![attempt.path]);
    }

    #[test]
    fn panicking_transport_still_removes_the_file() {
        let (tenant, object, naming, run_id) = fixture();
        let storage = InMemoryStorage::new();
        let transport = FnTransport(|_: &RegisterableObject, _: &Path| -> Result<DepositResult, TransportError> { panic!("transport blew up") });

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let mut exec = DepositExecutor::new(&storage, &transport, &naming, run_id);
            exec.attempt(&object, b"doc", &tenant)
        }));

        assert!(outcome.is_err());
        assert_eq!(storage.writes().len(), 1);
        assert_eq!(storage.deletes(), storage.writes());
        assert!(storage.live_files().is_empty());
    }

    #[test]
    fn file_names_are_unique_within_a_run() {
        let (tenant, object, naming, run_id) = fixture();
        let storage = InMemoryStorage::new();
        let transport = FnTransport(|_: &RegisterableObject, _: &Path| Ok(DepositResult::Success));

        let mut exec = DepositExecutor::new(&storage, &transport, &naming, run_id);
        let a = exec.attempt(&object, b"doc", &tenant);
        let b = exec.attempt(&object, b"doc", &tenant);

        assert_ne!(a.path, b.path);
        assert_eq!(exec.attempts(), 2);
        let name = a.path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("datacite-"));
        assert!(name.contains("-articles-7-1-"));
        assert!(name.ends_with("-0.xml"));
        assert!(a.path.starts_with("/exports"));
    }
}
