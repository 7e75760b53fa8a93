//! Sink NDJSON: una línea JSON por entrada, con el id de la corrida.
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use doi_core::{LogEntry, LogSink, RunLog, SinkError};
use log::debug;
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize)]
struct Line<'a> {
    run_id: Uuid,
    #[serde(flatten)]
    entry: &'a LogEntry,
}

/// Agrega al final del archivo; nunca trunca corridas anteriores.
#[derive(Debug, Clone)]
pub struct NdjsonLogSink {
    path: PathBuf,
}

impl NdjsonLogSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LogSink for NdjsonLogSink {
    fn flush(&self, run_id: Uuid, log: &RunLog) -> Result<(), SinkError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        let mut out = BufWriter::new(file);
        for entry in log.entries() {
            serde_json::to_writer(&mut out, &Line { run_id, entry })?;
            out.write_all(b"\n")?;
        }
        out.flush()?;
        debug!("sink:flushed run_id={} entries={} path={}", run_id, log.len(), self.path.display());
        Ok(())
    }
}
