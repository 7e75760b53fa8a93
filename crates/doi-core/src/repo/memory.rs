//! Repositorio en memoria (tests y demos). Los clones comparten estado, de
//! modo que un test puede conservar un handle después de entregar otro al
//! task.
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::types::{IdentifierPlugin, IdentifierPluginResolver, ObjectRepository, TenantRepository};
use crate::constants::{SETTING_AUTOMATIC_REGISTRATION, SETTING_DOI_PREFIX, SETTING_PASSWORD, SETTING_PLUGIN_ENABLED, SETTING_USERNAME};
use crate::errors::RepositoryError;
use crate::model::{ObjectKind, RegisterableObject, SettingValue, Tenant, TenantId};

#[derive(Debug, Default)]
struct State {
    tenants: Vec<Tenant>,
    settings: HashMap<(TenantId, String), SettingValue>,
    plugins: HashMap<TenantId, HashMap<String, SettingValue>>,
    unregistered: HashMap<(TenantId, ObjectKind), Vec<RegisterableObject>>,
    failing_kinds: Vec<(TenantId, ObjectKind)>,
    unavailable: bool,
    discovery_calls: Vec<(TenantId, ObjectKind)>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    inner: Arc<Mutex<State>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn add_tenant(&self, id: u64, path: &str) -> Tenant {
        let tenant = Tenant::new(id, path);
        self.state().tenants.push(tenant.clone());
        tenant
    }

    pub fn set_setting(&self, tenant: TenantId, key: &str, value: impl Into<SettingValue>) {
        self.state().settings.insert((tenant, key.to_string()), value.into());
    }

    /// Configura usuario, credencial y registro automático de una vez.
    pub fn configure_account(&self, tenant: TenantId, username: &str, password: &str) {
        self.set_setting(tenant, SETTING_USERNAME, username);
        self.set_setting(tenant, SETTING_PASSWORD, password);
        self.set_setting(tenant, SETTING_AUTOMATIC_REGISTRATION, true);
    }

    /// Instala el sub-plugin de identificadores (sin settings).
    pub fn install_identifier_plugin(&self, tenant: TenantId) {
        self.state().plugins.entry(tenant).or_default();
    }

    pub fn set_plugin_setting(&self, tenant: TenantId, key: &str, value: impl Into<SettingValue>) {
        self.state().plugins.entry(tenant).or_default().insert(key.to_string(), value.into());
    }

    /// Instala el sub-plugin habilitado con prefijo y los tipos indicados.
    pub fn enable_identifiers(&self, tenant: TenantId, prefix: &str, kinds: &[ObjectKind]) {
        self.set_plugin_setting(tenant, SETTING_PLUGIN_ENABLED, true);
        self.set_plugin_setting(tenant, SETTING_DOI_PREFIX, prefix);
        for kind in kinds {
            self.set_plugin_setting(tenant, kind.enable_setting(), true);
        }
    }

    pub fn add_unregistered(&self, tenant: TenantId, kind: ObjectKind, ids: &[u64]) -> Vec<RegisterableObject> {
        let objects: Vec<RegisterableObject> = ids.iter().map(|id| RegisterableObject::new(kind, *id, tenant)).collect();
        self.state().unregistered.entry((tenant, kind)).or_default().extend(objects.iter().cloned());
        objects
    }

    /// Hace fallar el listado de un tipo para un tenant.
    pub fn fail_discovery(&self, tenant: TenantId, kind: ObjectKind) {
        self.state().failing_kinds.push((tenant, kind));
    }

    /// Hace fallar `list_tenants`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state().unavailable = unavailable;
    }

    /// Consultas de descubrimiento recibidas, en orden.
    pub fn discovery_calls(&self) -> Vec<(TenantId, ObjectKind)> {
        self.state().discovery_calls.clone()
    }
}

impl TenantRepository for InMemoryRepository {
    fn list_tenants(&self) -> Result<Vec<Tenant>, RepositoryError> {
        let state = self.state();
        if state.unavailable {
            return Err(RepositoryError::Unavailable("in-memory repository switched off".into()));
        }
        Ok(state.tenants.clone())
    }

    fn tenant_setting(&self, tenant: TenantId, key: &str) -> Option<SettingValue> {
        self.state().settings.get(&(tenant, key.to_string())).cloned()
    }
}

/// Copia de los settings del sub-plugin al momento de resolverlo.
#[derive(Debug)]
struct InMemoryIdentifierPlugin {
    tenant: TenantId,
    settings: HashMap<String, SettingValue>,
}

impl IdentifierPlugin for InMemoryIdentifierPlugin {
    fn setting(&self, tenant: TenantId, key: &str) -> Option<SettingValue> {
        if tenant != self.tenant {
            return None;
        }
        self.settings.get(key).cloned()
    }
}

impl IdentifierPluginResolver for InMemoryRepository {
    fn resolve(&self, tenant: TenantId) -> Option<Arc<dyn IdentifierPlugin>> {
        let settings = self.state().plugins.get(&tenant)?.clone();
        Some(Arc::new(InMemoryIdentifierPlugin { tenant, settings }))
    }
}

impl ObjectRepository for InMemoryRepository {
    fn list_unregistered(&self, tenant: &Tenant, kind: ObjectKind) -> Result<Vec<RegisterableObject>, RepositoryError> {
        let mut state = self.state();
        state.discovery_calls.push((tenant.id, kind));
        if state.failing_kinds.contains(&(tenant.id, kind)) {
            return Err(RepositoryError::Query(format!("{kind} listing failed for tenant {}", tenant.id)));
        }
        Ok(state.unregistered.get(&(tenant.id, kind)).cloned().unwrap_or_default())
    }
}
