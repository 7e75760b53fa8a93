//! Claves de mensaje y catálogo por defecto.
//!
//! La localización real es externa; el catálogo por defecto sólo garantiza
//! un texto legible en inglés para las claves que emite el sender. Los
//! parámetros se sustituyen con la sintaxis `{$name}`.
use std::collections::BTreeMap;

pub type MessageParams = BTreeMap<String, String>;

pub const TASK_NAME: &str = "plugins.importexport.datacite.senderTask.name";
pub const NO_DOI_PREFIX: &str = "plugins.importexport.common.senderTask.warning.noDOIprefix";
pub const DEPOSIT_ERROR: &str = "plugins.importexport.common.register.error.mdsError";
pub const DOCUMENT_ERROR: &str = "plugins.importexport.common.export.error.documentFailed";
pub const DISCOVERY_ERROR: &str = "plugins.importexport.common.senderTask.warning.discoveryFailed";
pub const PLUGIN_UNAVAILABLE: &str = "plugins.importexport.common.senderTask.error.pluginUnavailable";
pub const TENANTS_UNAVAILABLE: &str = "plugins.importexport.common.senderTask.error.tenantsUnavailable";
pub const RUN_CANCELLED: &str = "plugins.importexport.common.senderTask.notice.cancelled";
pub const RUN_COMPLETED: &str = "plugins.importexport.common.senderTask.completed";

/// Parámetro genérico de los mensajes de error de depósito.
pub const PARAM: &str = "param";
/// Valor del parámetro cuando el transporte no dio detalle.
pub const NO_DETAIL: &str = " - ";

/// Fuente de plantillas de mensajes.
pub trait MessageCatalog {
    fn template(&self, key: &str) -> Option<&str>;

    /// Formatea `key` con `params`. Claves desconocidas se devuelven tal cual,
    /// seguidas de sus parámetros, para no perder información.
    fn render(&self, key: &str, params: &MessageParams) -> String {
        match self.template(key) {
            Some(t) => params.iter()
                             .fold(t.to_string(), |acc, (name, value)| acc.replace(&format!("{{${name}}}"), value)),
            None if params.is_empty() => key.to_string(),
            None => {
                let rendered: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
                format!("{key} ({})", rendered.join(", "))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCatalog;

impl MessageCatalog for DefaultCatalog {
    fn template(&self, key: &str) -> Option<&str> {
        let t = match key {
            TASK_NAME => "DataCite automatic registration task",
            NO_DOI_PREFIX => "The DOI prefix is missing for the journal with the path {$path}.",
            DEPOSIT_ERROR => "Registration was not successful! The DOI registration server returned an error: '{$param}'.",
            DOCUMENT_ERROR => "The export document for {$object} could not be generated: {$param}.",
            DISCOVERY_ERROR => "Unregistered {$kind} objects of the journal {$path} could not be listed: {$param}.",
            PLUGIN_UNAVAILABLE => "The registration plugin is not available; nothing was deposited.",
            TENANTS_UNAVAILABLE => "The journals could not be listed: {$param}.",
            RUN_CANCELLED => "The task was cancelled after {$deposited} deposit attempts.",
            RUN_COMPLETED => "Deposit task finished: {$attempted} attempted, {$failed} failed.",
            _ => return None,
        };
        Some(t)
    }
}

/// Atajo para construir parámetros en orden.
pub fn params<const N: usize>(pairs: [(&str, &str); N]) -> MessageParams {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keys_substitute_params() {
        let msg = DefaultCatalog.render(NO_DOI_PREFIX, &params([("path", "jas")]));
        assert_eq!(msg, "The DOI prefix is missing for the journal with the path jas.");
    }

    #[test]
    fn unknown_keys_keep_their_params() {
        assert_eq!(DefaultCatalog.render("err.code", &params([(PARAM, "p1")])), "err.code (param=p1)");
        assert_eq!(DefaultCatalog.render("err.code", &MessageParams::new()), "err.code");
    }
}
