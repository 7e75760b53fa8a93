//! Resultado de un intento de depósito.
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Un mensaje de error estructurado devuelto por el transporte: clave de
/// mensaje y parámetro opcional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositMessage {
    pub code: String,
    pub param: Option<String>,
}

impl DepositMessage {
    pub fn new(code: impl Into<String>, param: Option<&str>) -> Self {
        Self { code: code.into(), param: param.map(str::to_string) }
    }
}

/// Resultado de depositar un objeto. Vive sólo lo que tarda el orquestador
/// en volcarlo al `RunLog`; nunca se persiste.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DepositResult {
    Success,
    /// Lista ordenada de mensajes; cada uno produce una entrada de log.
    Failure { messages: Vec<DepositMessage> },
    /// El transporte respondió algo que no es ni éxito ni lista de mensajes.
    MalformedFailure,
}

impl DepositResult {
    pub fn failure(code: impl Into<String>, param: Option<&str>) -> Self {
        DepositResult::Failure { messages: vec![DepositMessage::new(code, param)] }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DepositResult::Success)
    }

    /// Normaliza una respuesta de tipado laxo:
    /// - `true` => `Success`
    /// - lista de pares `[code, param?]` => `Failure` (mismo orden)
    /// - cualquier otra forma => `MalformedFailure`
    pub fn from_reply(reply: &Value) -> Self {
        match reply {
            Value::Bool(true) => DepositResult::Success,
            Value::Array(items) => {
                let mut messages = Vec::with_capacity(items.len());
                for item in items {
                    match parse_message(item) {
                        Some(m) => messages.push(m),
                        None => return DepositResult::MalformedFailure,
                    }
                }
                DepositResult::Failure { messages }
            }
            _ => DepositResult::MalformedFailure,
        }
    }
}

fn parse_message(item: &Value) -> Option<DepositMessage> {
    let pair = item.as_array()?;
    let code = pair.first()?.as_str()?.to_string();
    let param = match pair.get(1) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    };
    Some(DepositMessage { code, param })
}
