//! Ensamblado del task con los adaptadores locales.
use std::path::PathBuf;

use doi_core::{RegistrationPlugin, RegistrationTask};

use crate::config::{SenderConfig, ENV_SNAPSHOT};
use crate::error::{ConfigError, SetupError};
use crate::{FsStorage, JsonEnvelopeProducer, NdjsonLogSink, OutboxTransport, SnapshotRepository};

impl SenderConfig {
    /// Outbox efectivo: el configurado o `<export_dir>/outbox`.
    pub fn outbox_dir(&self) -> PathBuf {
        self.outbox.clone().unwrap_or_else(|| self.export_dir.join("outbox"))
    }

    pub fn load_snapshot(&self) -> Result<SnapshotRepository, SetupError> {
        let path = self.snapshot.as_ref().ok_or(ConfigError::Missing(ENV_SNAPSHOT))?;
        Ok(SnapshotRepository::load(path)?)
    }
}

/// Arma un `RegistrationTask` sobre el snapshot, el almacenamiento en disco,
/// el transporte outbox y, si hay archivo configurado, el sink NDJSON.
pub fn build_task(config: &SenderConfig) -> Result<RegistrationTask, SetupError> {
    let repo = config.load_snapshot()?;
    let plugin = RegistrationPlugin::new(repo.clone(), JsonEnvelopeProducer::new().pretty(), OutboxTransport::new(config.outbox_dir()));
    let mut builder = RegistrationTask::builder(repo.clone(), repo, FsStorage::new()).plugin(plugin)
                                                                                     .naming(config.naming());
    if let Some(file) = &config.execution_log {
        builder = builder.sink(NdjsonLogSink::new(file));
    }
    Ok(builder.build())
}
