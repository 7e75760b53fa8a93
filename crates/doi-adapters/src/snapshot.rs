//! Repositorio de sólo lectura respaldado por un snapshot JSON.
//!
//! Formato:
//!
//! ```json
//! { "tenants": [ {
//!     "id": 1, "path": "jas",
//!     "settings": { "username": "u", "password": "p", "automaticRegistration": true },
//!     "identifier_plugin": { "settings": { "enabled": true, "doiPrefix": "10.1234", "enableIssueDoi": true } },
//!     "unregistered": { "collection": [1, 2], "work": [], "representation": [] }
//! } ] }
//! ```
//!
//! `identifier_plugin: null` (o ausente) significa sub-plugin no instalado.
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use doi_core::{IdentifierPlugin, IdentifierPluginResolver, ObjectKind, ObjectRepository, RegisterableObject, RepositoryError, SettingValue,
               Tenant, TenantId, TenantRepository};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub tenants: Vec<TenantRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantRecord {
    pub id: u64,
    pub path: String,
    #[serde(default)]
    pub settings: HashMap<String, SettingValue>,
    #[serde(default)]
    pub identifier_plugin: Option<PluginRecord>,
    #[serde(default)]
    pub unregistered: UnregisteredRecord,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginRecord {
    #[serde(default)]
    pub settings: HashMap<String, SettingValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnregisteredRecord {
    #[serde(default)]
    pub collection: Vec<u64>,
    #[serde(default)]
    pub work: Vec<u64>,
    #[serde(default)]
    pub representation: Vec<u64>,
}

impl UnregisteredRecord {
    fn ids(&self, kind: ObjectKind) -> &[u64] {
        match kind {
            ObjectKind::Collection => &self.collection,
            ObjectKind::Work => &self.work,
            ObjectKind::Representation => &self.representation,
        }
    }
}

/// Implementa los tres contratos de lectura sobre un `Snapshot` inmutable.
/// Los clones comparten el snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotRepository {
    snapshot: Arc<Snapshot>,
}

impl SnapshotRepository {
    pub fn new(snapshot: Snapshot) -> Result<Self, SnapshotError> {
        let mut seen = HashSet::new();
        for t in &snapshot.tenants {
            if !seen.insert(t.id) {
                return Err(SnapshotError::DuplicateTenant(t.id));
            }
        }
        Ok(Self { snapshot: Arc::new(snapshot) })
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Self::new(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let raw = fs::read_to_string(path).map_err(|source| SnapshotError::Read { path: path.to_path_buf(), source })?;
        let repo = Self::from_json(&raw)?;
        debug!("snapshot:loaded path={} tenants={}", path.display(), repo.snapshot.tenants.len());
        Ok(repo)
    }

    fn record(&self, tenant: TenantId) -> Option<&TenantRecord> {
        self.snapshot.tenants.iter().find(|t| t.id == tenant.0)
    }
}

impl TenantRepository for SnapshotRepository {
    fn list_tenants(&self) -> Result<Vec<Tenant>, RepositoryError> {
        Ok(self.snapshot.tenants.iter().map(|t| Tenant::new(t.id, t.path.clone())).collect())
    }

    fn tenant_setting(&self, tenant: TenantId, key: &str) -> Option<SettingValue> {
        self.record(tenant)?.settings.get(key).cloned()
    }
}

#[derive(Debug)]
struct SnapshotPlugin {
    tenant: TenantId,
    settings: HashMap<String, SettingValue>,
}

impl IdentifierPlugin for SnapshotPlugin {
    fn setting(&self, tenant: TenantId, key: &str) -> Option<SettingValue> {
        if tenant != self.tenant {
            return None;
        }
        self.settings.get(key).cloned()
    }
}

impl IdentifierPluginResolver for SnapshotRepository {
    fn resolve(&self, tenant: TenantId) -> Option<Arc<dyn IdentifierPlugin>> {
        let plugin = self.record(tenant)?.identifier_plugin.as_ref()?;
        Some(Arc::new(SnapshotPlugin { tenant,
                                       settings: plugin.settings.clone() }))
    }
}

impl ObjectRepository for SnapshotRepository {
    fn list_unregistered(&self, tenant: &Tenant, kind: ObjectKind) -> Result<Vec<RegisterableObject>, RepositoryError> {
        let record = self.record(tenant.id)
                         .ok_or_else(|| RepositoryError::Query(format!("tenant {} is not part of the snapshot", tenant.id)))?;
        Ok(record.unregistered
                 .ids(kind)
                 .iter()
                 .map(|id| RegisterableObject::new(kind, *id, tenant.id))
                 .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "tenants": [
            { "id": 1, "path": "jas",
              "settings": { "username": "u", "password": "p", "automaticRegistration": "1" },
              "identifier_plugin": { "settings": { "enabled": true, "doiPrefix": "10.1234" } },
              "unregistered": { "work": [3, 1] } },
            { "id": 2, "path": "bare" }
        ]
    }"#;

    #[test]
    fn snapshot_exposes_tenants_settings_and_objects() {
        let repo = SnapshotRepository::from_json(SNAPSHOT).unwrap();
        let tenants = repo.list_tenants().unwrap();
        assert_eq!(tenants, vec![Tenant::new(1, "jas"), Tenant::new(2, "bare")]);
        assert_eq!(repo.tenant_setting(TenantId(1), "automaticRegistration"), Some(SettingValue::Text("1".into())));
        assert_eq!(repo.tenant_setting(TenantId(2), "username"), None);

        let plugin = repo.resolve(TenantId(1)).expect("plugin installed");
        assert_eq!(plugin.setting(TenantId(1), "doiPrefix"), Some(SettingValue::Text("10.1234".into())));
        assert!(repo.resolve(TenantId(2)).is_none());

        let works = repo.list_unregistered(&tenants[0], ObjectKind::Work).unwrap();
        assert_eq!(works.iter().map(|o| o.id.0).collect::<Vec<_>>(), vec![3, 1]);
        assert!(repo.list_unregistered(&tenants[1], ObjectKind::Collection).unwrap().is_empty());
    }

    #[test]
    fn duplicate_tenant_ids_are_rejected() {
        let err = SnapshotRepository::from_json(r#"{"tenants":[{"id":1,"path":"a"},{"id":1,"path":"b"}]}"#).unwrap_err();
        assert!(matches!(err, SnapshotError::DuplicateTenant(1)));
    }
}
