//! Descubrimiento de objetos sin DOI registrado, por tipo.
use log::debug;

use crate::errors::RepositoryError;
use crate::model::{ObjectKind, RegisterableObject, Tenant, TenantId};
use crate::repo::{IdentifierPlugin, ObjectRepository};
use crate::model::tenant::is_set;

/// Flags de habilitación por tipo de objeto de un tenant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindFlags {
    pub collections: bool,
    pub works: bool,
    pub representations: bool,
}

impl KindFlags {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn from_plugin(plugin: &dyn IdentifierPlugin, tenant: TenantId) -> Self {
        let flag = |kind: ObjectKind| is_set(plugin.setting(tenant, kind.enable_setting()).as_ref());
        Self { collections: flag(ObjectKind::Collection),
               works: flag(ObjectKind::Work),
               representations: flag(ObjectKind::Representation) }
    }

    pub fn is_enabled(&self, kind: ObjectKind) -> bool {
        match kind {
            ObjectKind::Collection => self.collections,
            ObjectKind::Work => self.works,
            ObjectKind::Representation => self.representations,
        }
    }
}

pub struct ObjectDiscoverer<'a> {
    objects: &'a dyn ObjectRepository,
}

impl<'a> ObjectDiscoverer<'a> {
    pub fn new(objects: &'a dyn ObjectRepository) -> Self {
        Self { objects }
    }

    /// Objetos de `kind` pendientes de registro. Con el flag apagado no se
    /// consulta el repositorio.
    pub fn discover(&self, tenant: &Tenant, kind: ObjectKind, flags: KindFlags) -> Result<Vec<RegisterableObject>, RepositoryError> {
        if !flags.is_enabled(kind) {
            return Ok(Vec::new());
        }
        let found = self.objects.list_unregistered(tenant, kind)?;
        debug!("discover:done tenant={} kind={kind} count={}", tenant.path, found.len());
        Ok(found)
    }
}
