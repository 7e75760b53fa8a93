//! Tenant (revista / venue de publicación) y valores de configuración.
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identificador numérico del tenant tal como lo expone el repositorio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(pub u64);

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tenant de sólo lectura. Los settings no viajan con el tenant: se leen
/// bajo demanda desde el repositorio o el sub-plugin de identificadores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: TenantId,
    /// Path/slug enrutable; es lo que se muestra en los mensajes del log.
    pub path: String,
}

impl Tenant {
    pub fn new(id: u64, path: impl Into<String>) -> Self {
        Self { id: TenantId(id), path: path.into() }
    }
}

/// Valor de un setting persistido.
///
/// Los settings se almacenan con tipos laxos (flags guardados como `"1"`,
/// enteros como texto, etc.), por eso la evaluación de "está configurado"
/// sigue una veracidad laxa: `null`, `false`, `0`, `""` y `"0"` cuentan
/// como no configurado.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl SettingValue {
    pub fn is_truthy(&self) -> bool {
        match self {
            SettingValue::Null => false,
            SettingValue::Bool(b) => *b,
            SettingValue::Int(i) => *i != 0,
            SettingValue::Float(f) => *f != 0.0,
            SettingValue::Text(s) => !s.is_empty() && s != "0",
        }
    }

    /// Representación textual (para prefijos, usuarios, etc.).
    pub fn as_text(&self) -> String {
        match self {
            SettingValue::Null => String::new(),
            SettingValue::Bool(b) => if *b { "1".to_string() } else { String::new() },
            SettingValue::Int(i) => i.to_string(),
            SettingValue::Float(f) => f.to_string(),
            SettingValue::Text(s) => s.clone(),
        }
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Text(value.to_string())
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        SettingValue::Int(value)
    }
}

/// `true` si el setting existe y es veraz.
pub fn is_set(value: Option<&SettingValue>) -> bool {
    value.map(SettingValue::is_truthy).unwrap_or(false)
}
