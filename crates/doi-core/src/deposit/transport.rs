use std::path::Path;

use crate::errors::TransportError;
use crate::model::{DepositResult, RegisterableObject, Tenant};

/// Cliente de depósito contra el registrador.
///
/// Timeouts y reintentos de red son responsabilidad de la implementación; el
/// sender llama una sola vez por objeto y corrida. Las implementaciones que
/// reciben respuestas de tipado laxo pueden normalizarlas con
/// `DepositResult::from_reply`.
///
/// Todo fallo (red, rechazo, respuesta ilegible) se devuelve como
/// `TransportError`; una implementación no debe entrar en pánico. El
/// aislamiento entre objetos de la corrida depende de ese contrato: un
/// pánico borra el archivo transitorio pero corta la corrida.
pub trait DepositTransport {
    fn deposit(&self, object: &RegisterableObject, tenant: &Tenant, document: &Path) -> Result<DepositResult, TransportError>;
}
