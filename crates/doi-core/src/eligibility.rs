//! Filtro de elegibilidad de tenants.
//!
//! Una pasada completa (no lazy) sobre los tenants del repositorio:
//! los avisos de prefijo faltante deben quedar en el log antes de que empiece
//! el bucle de depósitos.
//!
//! Huecos de configuración (credenciales, flag de registro automático,
//! sub-plugin deshabilitado) se saltan en silencio; sólo el prefijo faltante
//! con el sub-plugin habilitado merece aviso. Un tenant sin sub-plugin
//! instalado entra igualmente (sin prefijo).
use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::constants::{SETTING_AUTOMATIC_REGISTRATION, SETTING_DOI_PREFIX, SETTING_PASSWORD, SETTING_PLUGIN_ENABLED, SETTING_USERNAME};
use crate::discovery::KindFlags;
use crate::model::tenant::is_set;
use crate::model::Tenant;
use crate::repo::{IdentifierPlugin, IdentifierPluginResolver, TenantRepository};

/// Motivo por el que un tenant no participa en la corrida.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Falta usuario o credencial.
    MissingCredentials,
    AutomaticRegistrationDisabled,
    /// Sub-plugin instalado pero deshabilitado.
    IdentifierPluginDisabled,
    /// Sub-plugin habilitado sin prefijo DOI.
    MissingPrefix,
}

impl SkipReason {
    /// Sólo estos motivos producen una entrada en el log de ejecución.
    pub fn is_warn_worthy(&self) -> bool {
        matches!(self, SkipReason::MissingPrefix)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::MissingCredentials => "missing credentials",
            SkipReason::AutomaticRegistrationDisabled => "automatic registration disabled",
            SkipReason::IdentifierPluginDisabled => "identifier plugin disabled",
            SkipReason::MissingPrefix => "missing DOI prefix",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipRecord {
    pub tenant: Tenant,
    pub reason: SkipReason,
}

/// Tenant elegible junto con el sub-plugin ya resuelto, para que el bucle
/// principal no vuelva a resolverlo.
#[derive(Clone)]
pub struct EligibleTenant {
    pub tenant: Tenant,
    pub plugin: Option<Arc<dyn IdentifierPlugin>>,
    pub prefix: Option<String>,
}

impl EligibleTenant {
    /// Flags por tipo. Sin sub-plugin no hay ningún tipo habilitado.
    pub fn kind_flags(&self) -> KindFlags {
        match &self.plugin {
            Some(plugin) => KindFlags::from_plugin(plugin.as_ref(), self.tenant.id),
            None => KindFlags::none(),
        }
    }
}

impl fmt::Debug for EligibleTenant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EligibleTenant")
         .field("tenant", &self.tenant)
         .field("plugin", &self.plugin.is_some())
         .field("prefix", &self.prefix)
         .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Eligibility {
    pub eligible: Vec<EligibleTenant>,
    pub skipped: Vec<SkipRecord>,
}

impl Eligibility {
    /// Saltos que deben registrarse como aviso.
    pub fn warnings(&self) -> impl Iterator<Item = &SkipRecord> {
        self.skipped.iter().filter(|s| s.reason.is_warn_worthy())
    }
}

pub struct EligibilityFilter<'a> {
    tenants: &'a dyn TenantRepository,
    resolver: &'a dyn IdentifierPluginResolver,
}

impl<'a> EligibilityFilter<'a> {
    pub fn new(tenants: &'a dyn TenantRepository, resolver: &'a dyn IdentifierPluginResolver) -> Self {
        Self { tenants, resolver }
    }

    /// Clasifica `tenants` preservando su orden.
    pub fn filter(&self, tenants: Vec<Tenant>) -> Eligibility {
        let mut out = Eligibility::default();
        for tenant in tenants {
            match self.classify(&tenant) {
                Ok((plugin, prefix)) => out.eligible.push(EligibleTenant { tenant, plugin, prefix }),
                Err(reason) => {
                    debug!("eligibility:skip tenant={} reason={}", tenant.path, reason.as_str());
                    out.skipped.push(SkipRecord { tenant, reason });
                }
            }
        }
        out
    }

    #[allow(clippy::type_complexity)]
    fn classify(&self, tenant: &Tenant) -> Result<(Option<Arc<dyn IdentifierPlugin>>, Option<String>), SkipReason> {
        let setting = |key: &str| self.tenants.tenant_setting(tenant.id, key);
        if !is_set(setting(SETTING_USERNAME).as_ref()) || !is_set(setting(SETTING_PASSWORD).as_ref()) {
            return Err(SkipReason::MissingCredentials);
        }
        if !is_set(setting(SETTING_AUTOMATIC_REGISTRATION).as_ref()) {
            return Err(SkipReason::AutomaticRegistrationDisabled);
        }

        let Some(plugin) = self.resolver.resolve(tenant.id) else {
            // Sin sub-plugin instalado el tenant entra sin prefijo.
            return Ok((None, None));
        };
        if !is_set(plugin.setting(tenant.id, SETTING_PLUGIN_ENABLED).as_ref()) {
            return Err(SkipReason::IdentifierPluginDisabled);
        }
        match plugin.setting(tenant.id, SETTING_DOI_PREFIX).filter(|v| v.is_truthy()) {
            Some(prefix) => Ok((Some(plugin), Some(prefix.as_text()))),
            None => Err(SkipReason::MissingPrefix),
        }
    }
}
