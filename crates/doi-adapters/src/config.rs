//! Carga de configuración del sender desde variables de entorno.
//!
//! Variables (todas opcionales):
//! - `DOIFLOW_EXPORT_DIR`: directorio de archivos transitorios (por defecto
//!   `$TMPDIR/doiflow`).
//! - `DOIFLOW_FILE_PREFIX`: prefijo de los archivos de export (`datacite`).
//! - `DOIFLOW_SNAPSHOT`: snapshot JSON de tenants y objetos.
//! - `DOIFLOW_OUTBOX`: directorio del transporte outbox.
//! - `DOIFLOW_EXECUTION_LOG`: archivo NDJSON del log de ejecución.

use std::env;
use std::path::PathBuf;

use doi_core::constants::DEFAULT_EXPORT_FILE_PREFIX;
use doi_core::ExportNaming;
use dotenvy::dotenv;
use once_cell::sync::Lazy;

use crate::error::ConfigError;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

pub const ENV_EXPORT_DIR: &str = "DOIFLOW_EXPORT_DIR";
pub const ENV_FILE_PREFIX: &str = "DOIFLOW_FILE_PREFIX";
pub const ENV_SNAPSHOT: &str = "DOIFLOW_SNAPSHOT";
pub const ENV_OUTBOX: &str = "DOIFLOW_OUTBOX";
pub const ENV_EXECUTION_LOG: &str = "DOIFLOW_EXECUTION_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderConfig {
    pub export_dir: PathBuf,
    pub file_prefix: String,
    pub snapshot: Option<PathBuf>,
    pub outbox: Option<PathBuf>,
    pub execution_log: Option<PathBuf>,
}

impl SenderConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construye la configuración a partir de una función de búsqueda
    /// arbitraria (útil en tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
        where F: Fn(&str) -> Option<String>
    {
        let path = |key: &'static str| -> Result<Option<PathBuf>, ConfigError> {
            match lookup(key) {
                None => Ok(None),
                Some(v) if v.trim().is_empty() => Err(ConfigError::Empty(key)),
                Some(v) => Ok(Some(PathBuf::from(v))),
            }
        };

        let export_dir = path(ENV_EXPORT_DIR)?.unwrap_or_else(|| env::temp_dir().join("doiflow"));
        let file_prefix = match lookup(ENV_FILE_PREFIX) {
            None => DEFAULT_EXPORT_FILE_PREFIX.to_string(),
            Some(v) if v.trim().is_empty() => return Err(ConfigError::Empty(ENV_FILE_PREFIX)),
            Some(v) if v.contains('/') || v.contains('\\') => return Err(ConfigError::InvalidPrefix(v)),
            Some(v) => v,
        };

        Ok(Self { export_dir,
                  file_prefix,
                  snapshot: path(ENV_SNAPSHOT)?,
                  outbox: path(ENV_OUTBOX)?,
                  execution_log: path(ENV_EXECUTION_LOG)? })
    }

    pub fn naming(&self) -> ExportNaming {
        ExportNaming::new(&self.export_dir).with_prefix(&self.file_prefix)
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let cfg = SenderConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.file_prefix, "datacite");
        assert!(cfg.export_dir.ends_with("doiflow"));
        assert!(cfg.snapshot.is_none());
    }

    #[test]
    fn explicit_values_are_used() {
        let cfg = SenderConfig::from_lookup(lookup(&[(ENV_EXPORT_DIR, "/srv/exports"),
                                                      (ENV_FILE_PREFIX, "crossref"),
                                                      (ENV_OUTBOX, "/srv/outbox")])).unwrap();
        assert_eq!(cfg.naming(), ExportNaming::new("/srv/exports").with_prefix("crossref"));
        assert_eq!(cfg.outbox, Some(PathBuf::from("/srv/outbox")));
    }

    #[test]
    fn empty_or_unsafe_values_are_rejected() {
        assert_eq!(SenderConfig::from_lookup(lookup(&[(ENV_SNAPSHOT, " ")])), Err(ConfigError::Empty(ENV_SNAPSHOT)));
        assert_eq!(SenderConfig::from_lookup(lookup(&[(ENV_FILE_PREFIX, "../x")])),
                   Err(ConfigError::InvalidPrefix("../x".into())));
    }
}
