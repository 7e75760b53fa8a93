//! Builder de `RegistrationTask`.
//!
//! Los colaboradores se inyectan tipados al construir el task; durante la
//! corrida no se resuelve nada por nombre. Los obligatorios (repositorio de
//! tenants, resolver del sub-plugin y almacenamiento transitorio) van en
//! `RegistrationTask::builder`; el resto tiene defaults razonables:
//!
//! ```ignore
//! let task = RegistrationTask::builder(repo.clone(), repo.clone(), storage)
//!     .plugin(RegistrationPlugin::new(repo, producer, transport))
//!     .naming(ExportNaming::new("/var/exports"))
//!     .sink(MemoryLogSink::new())
//!     .build();
//! let ok = task.run();
//! ```

use crate::deposit::{ExportNaming, TransientStorage};
use crate::repo::{IdentifierPluginResolver, TenantRepository};
use crate::runlog::{DefaultCatalog, LogSink, MessageCatalog};
use crate::task::cancel::CancelToken;
use crate::task::core::{RegistrationPlugin, RegistrationTask};

pub struct TaskBuilder {
    task: RegistrationTask,
}

impl TaskBuilder {
    pub(crate) fn new(tenants: impl TenantRepository + 'static,
                      resolver: impl IdentifierPluginResolver + 'static,
                      storage: impl TransientStorage + 'static)
                      -> Self {
        Self { task: RegistrationTask { tenants: Box::new(tenants),
                                        resolver: Box::new(resolver),
                                        storage: Box::new(storage),
                                        plugin: None,
                                        naming: ExportNaming::default(),
                                        catalog: Box::new(DefaultCatalog),
                                        sink: None,
                                        cancel: None } }
    }

    /// Plugin de registro. Sin él, cada corrida termina en `false`.
    pub fn plugin(mut self, plugin: RegistrationPlugin) -> Self {
        self.task.plugin = Some(plugin);
        self
    }

    pub fn naming(mut self, naming: ExportNaming) -> Self {
        self.task.naming = naming;
        self
    }

    pub fn catalog(mut self, catalog: impl MessageCatalog + 'static) -> Self {
        self.task.catalog = Box::new(catalog);
        self
    }

    pub fn sink(mut self, sink: impl LogSink + 'static) -> Self {
        self.task.sink = Some(Box::new(sink));
        self
    }

    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.task.cancel = Some(token);
        self
    }

    #[inline]
    pub fn build(self) -> RegistrationTask {
        self.task
    }
}
