use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::messages::MessageParams;
use crate::model::RegisterableObject;

/// Severidad de una entrada del log de ejecución.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Notice,
    Warning,
    Error,
    Completed,
}

/// Entrada del log de ejecución.
///
/// `message` es el texto ya formateado; `key` y `params` se conservan para
/// sinks que quieran re-localizar el mensaje.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub ts: DateTime<Utc>,
    pub severity: Severity,
    pub key: String,
    pub params: MessageParams,
    pub message: String,
    /// Path del tenant al que se atribuye la entrada, si aplica.
    pub tenant: Option<String>,
    pub object: Option<RegisterableObject>,
}

impl LogEntry {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}
