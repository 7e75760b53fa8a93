use std::sync::{Arc, Mutex};

use uuid::Uuid;

use super::RunLog;
use crate::errors::SinkError;

/// Destino del log de ejecución. Se invoca una vez al final de cada corrida.
pub trait LogSink {
    fn flush(&self, run_id: Uuid, log: &RunLog) -> Result<(), SinkError>;
}

/// Sink en memoria; los clones comparten el mismo buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryLogSink {
    inner: Arc<Mutex<Vec<(Uuid, RunLog)>>>,
}

impl MemoryLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Corridas volcadas hasta ahora, en orden.
    pub fn flushed(&self) -> Vec<(Uuid, RunLog)> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl LogSink for MemoryLogSink {
    fn flush(&self, run_id: Uuid, log: &RunLog) -> Result<(), SinkError> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).push((run_id, log.clone()));
        Ok(())
    }
}
