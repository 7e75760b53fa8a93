#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use doi_core::{DepositResult, DepositTransport, DocumentError, DocumentProducer, InMemoryStorage, ObjectId, ObjectKind,
               RegisterableObject, Tenant, TransportError};

/// Respuesta programada por objeto.
#[derive(Clone)]
pub enum Reply {
    Result(DepositResult),
    Error(TransportError),
}

#[derive(Debug, Clone)]
pub struct DepositCall {
    pub object: RegisterableObject,
    pub tenant: String,
    pub path: PathBuf,
    /// Si el documento existía en el almacenamiento al momento del depósito.
    pub document_present: bool,
}

/// Transporte guionado: responde según (tipo, id) y `Success` por defecto.
#[derive(Clone)]
pub struct ScriptedTransport {
    storage: InMemoryStorage,
    replies: Arc<Mutex<HashMap<(ObjectKind, ObjectId), Reply>>>,
    calls: Arc<Mutex<Vec<DepositCall>>>,
}

impl ScriptedTransport {
    pub fn new(storage: &InMemoryStorage) -> Self {
        Self { storage: storage.clone(),
               replies: Arc::default(),
               calls: Arc::default() }
    }

    pub fn reply(&self, kind: ObjectKind, id: u64, reply: Reply) {
        self.replies.lock().unwrap().insert((kind, ObjectId(id)), reply);
    }

    pub fn calls(&self) -> Vec<DepositCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn deposited_ids(&self) -> Vec<(ObjectKind, u64)> {
        self.calls().iter().map(|c| (c.object.kind, c.object.id.0)).collect()
    }
}

impl DepositTransport for ScriptedTransport {
    fn deposit(&self, object: &RegisterableObject, tenant: &Tenant, document: &Path) -> Result<DepositResult, TransportError> {
        self.calls.lock().unwrap().push(DepositCall { object: object.clone(),
                                                      tenant: tenant.path.clone(),
                                                      path: document.to_path_buf(),
                                                      document_present: self.storage.contents(document).is_some() });
        match self.replies.lock().unwrap().get(&(object.kind, object.id)).cloned() {
            Some(Reply::Result(r)) => Ok(r),
            Some(Reply::Error(e)) => Err(e),
            None => Ok(DepositResult::Success),
        }
    }
}

/// Productor que falla para los ids indicados.
#[derive(Clone, Default)]
pub struct FakeProducer {
    failing: Arc<Mutex<HashSet<(ObjectKind, ObjectId)>>>,
    filters: Arc<Mutex<Vec<String>>>,
}

impl FakeProducer {
    pub fn fail_on(&self, kind: ObjectKind, id: u64) {
        self.failing.lock().unwrap().insert((kind, ObjectId(id)));
    }

    pub fn filters(&self) -> Vec<String> {
        self.filters.lock().unwrap().clone()
    }
}

impl DocumentProducer for FakeProducer {
    fn serialize(&self, object: &RegisterableObject, filter_key: &str, tenant: &Tenant) -> Result<Vec<u8>, DocumentError> {
        self.filters.lock().unwrap().push(filter_key.to_string());
        if self.failing.lock().unwrap().contains(&(object.kind, object.id)) {
            return Err(DocumentError::Serialization(format!("missing metadata for {object}")));
        }
        Ok(format!("<resource tenant=\"{}\" object=\"{object}\"/>", tenant.path).into_bytes())
    }
}
