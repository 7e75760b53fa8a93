//! Log de ejecución de una corrida.
//!
//! El `RunLog` es append-only durante la corrida y se entrega completo al
//! `LogSink` al terminar. Es independiente del logger de diagnóstico (`log`):
//! aquí sólo entra lo que debe ver quien administra los tenants.

mod entry;
pub mod messages;
mod sink;

pub use entry::{LogEntry, Severity};
pub use messages::{DefaultCatalog, MessageCatalog, MessageParams};
pub use sink::{LogSink, MemoryLogSink};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunLog {
    entries: Vec<LogEntry>,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entradas atribuidas a un tenant (por path).
    pub fn for_tenant<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a LogEntry> + 'a {
        self.entries.iter().filter(move |e| e.tenant.as_deref() == Some(path))
    }

    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &LogEntry> + '_ {
        self.entries.iter().filter(move |e| e.severity == severity)
    }

    pub fn with_key<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a LogEntry> + 'a {
        self.entries.iter().filter(move |e| e.key == key)
    }
}
