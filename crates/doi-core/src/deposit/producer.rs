use crate::errors::DocumentError;
use crate::model::{RegisterableObject, Tenant};

/// Serializa un registro al documento que espera el registrador.
///
/// Se trata como función pura: mismo objeto + filtro + tenant => mismos
/// bytes. Un `DocumentError` aborta sólo el intento de ese objeto.
pub trait DocumentProducer {
    fn serialize(&self, object: &RegisterableObject, filter_key: &str, tenant: &Tenant) -> Result<Vec<u8>, DocumentError>;
}
