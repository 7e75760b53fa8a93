//! Contratos de lectura sobre el repositorio externo.
//!
//! El sender nunca escribe en el repositorio: el estado de registro de cada
//! DOI lo actualiza el transporte (o quien lo implemente) tras un depósito
//! exitoso.
use std::sync::Arc;

use crate::errors::RepositoryError;
use crate::model::{ObjectKind, RegisterableObject, SettingValue, Tenant, TenantId};

/// Tenants y sus settings.
pub trait TenantRepository {
    /// Todos los tenants habilitados, en el orden del repositorio.
    fn list_tenants(&self) -> Result<Vec<Tenant>, RepositoryError>;

    /// Setting del plugin de registro para un tenant (`username`,
    /// `password`, `automaticRegistration`, ...).
    fn tenant_setting(&self, tenant: TenantId, key: &str) -> Option<SettingValue>;
}

/// Handle del sub-plugin de identificadores (DOI) de un tenant.
pub trait IdentifierPlugin {
    fn setting(&self, tenant: TenantId, key: &str) -> Option<SettingValue>;
}

/// Localiza el sub-plugin de identificadores instalado para un tenant.
pub trait IdentifierPluginResolver {
    /// `None` si el tenant no tiene el sub-plugin instalado.
    fn resolve(&self, tenant: TenantId) -> Option<Arc<dyn IdentifierPlugin>>;
}

/// Descubrimiento de objetos sin DOI registrado.
pub trait ObjectRepository {
    fn list_unregistered(&self, tenant: &Tenant, kind: ObjectKind) -> Result<Vec<RegisterableObject>, RepositoryError>;
}
