//! Productor de documentos de referencia.
//!
//! Genera un sobre JSON neutral con la identidad del objeto; no implementa
//! ningún esquema de registrador. Sirve para operar el pipeline sin el
//! exportador real.
use doi_core::{DocumentError, DocumentProducer, ObjectKind, RegisterableObject, Tenant};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Envelope<'a> {
    filter: &'a str,
    kind: ObjectKind,
    id: u64,
    tenant_id: u64,
    tenant_path: &'a str,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEnvelopeProducer {
    pretty: bool,
}

impl JsonEnvelopeProducer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }
}

impl DocumentProducer for JsonEnvelopeProducer {
    fn serialize(&self, object: &RegisterableObject, filter_key: &str, tenant: &Tenant) -> Result<Vec<u8>, DocumentError> {
        // sólo se aceptan los filtros de los tipos conocidos y coherentes con el objeto
        if !ObjectKind::ALL.iter().any(|k| k.filter_key() == filter_key) {
            return Err(DocumentError::UnknownFilter(filter_key.to_string()));
        }
        if object.kind.filter_key() != filter_key {
            return Err(DocumentError::Serialization(format!("filter `{filter_key}` does not apply to {object}")));
        }
        let envelope = Envelope { filter: filter_key,
                                  kind: object.kind,
                                  id: object.id.0,
                                  tenant_id: tenant.id.0,
                                  tenant_path: &tenant.path };
        let bytes = if self.pretty { serde_json::to_vec_pretty(&envelope) } else { serde_json::to_vec(&envelope) };
        bytes.map_err(|e| DocumentError::Serialization(e.to_string()))
    }
}
