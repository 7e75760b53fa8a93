//! Orquestador de la corrida de depósitos.
use log::{debug, error, info, warn};
use uuid::Uuid;

use crate::deposit::{DepositExecutor, DocumentProducer, DepositTransport, ExportNaming, TransientStorage};
use crate::discovery::ObjectDiscoverer;
use crate::eligibility::{EligibilityFilter, EligibleTenant};
use crate::model::{DepositResult, ObjectKind, RegisterableObject, Tenant};
use crate::repo::{IdentifierPluginResolver, ObjectRepository, TenantRepository};
use crate::runlog::messages::{self, params, MessageParams, NO_DETAIL, PARAM};
use crate::runlog::{LogEntry, LogSink, MessageCatalog, RunLog, Severity};
use crate::task::builder::TaskBuilder;
use crate::task::cancel::CancelToken;
use crate::task::report::RunReport;

/// Colaboradores propios del registrador: descubrimiento, export y
/// depósito. Si el plugin no está disponible la corrida no procesa nada.
pub struct RegistrationPlugin {
    pub objects: Box<dyn ObjectRepository>,
    pub producer: Box<dyn DocumentProducer>,
    pub transport: Box<dyn DepositTransport>,
}

impl RegistrationPlugin {
    pub fn new(objects: impl ObjectRepository + 'static,
               producer: impl DocumentProducer + 'static,
               transport: impl DepositTransport + 'static)
               -> Self {
        Self { objects: Box::new(objects),
               producer: Box::new(producer),
               transport: Box::new(transport) }
    }
}

/// Resultado completo de `execute`.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub run_id: Uuid,
    pub success: bool,
    pub log: RunLog,
    pub report: RunReport,
}

/// Task programado que deposita los DOIs pendientes de todos los tenants
/// elegibles.
///
/// Los fallos por objeto (documento, escritura, transporte, respuesta mal
/// formada) quedan en el log y la corrida continúa. Sólo la falta del plugin
/// de registro o del listado de tenants devuelve `false`.
pub struct RegistrationTask {
    pub(crate) tenants: Box<dyn TenantRepository>,
    pub(crate) resolver: Box<dyn IdentifierPluginResolver>,
    pub(crate) storage: Box<dyn TransientStorage>,
    pub(crate) plugin: Option<RegistrationPlugin>,
    pub(crate) naming: ExportNaming,
    pub(crate) catalog: Box<dyn MessageCatalog>,
    pub(crate) sink: Option<Box<dyn LogSink>>,
    pub(crate) cancel: Option<CancelToken>,
}

impl RegistrationTask {
    #[inline]
    pub fn builder(tenants: impl TenantRepository + 'static,
                   resolver: impl IdentifierPluginResolver + 'static,
                   storage: impl TransientStorage + 'static)
                   -> TaskBuilder {
        TaskBuilder::new(tenants, resolver, storage)
    }

    /// Nombre legible del task.
    pub fn name(&self) -> String {
        self.catalog.render(messages::TASK_NAME, &MessageParams::new())
    }

    /// Ejecuta una corrida y vuelca el log al sink configurado.
    pub fn run(&self) -> bool {
        let outcome = self.execute();
        if let Some(sink) = &self.sink {
            if let Err(e) = sink.flush(outcome.run_id, &outcome.log) {
                error!("task:flush failed run={}: {e}", outcome.run_id);
            }
        }
        outcome.success
    }

    /// Ejecuta una corrida sin tocar el sink.
    pub fn execute(&self) -> RunOutcome {
        let run_id = Uuid::new_v4();
        let mut run = RunState::new(run_id, self.catalog.as_ref());
        info!("task:start run={run_id}");

        let Some(plugin) = &self.plugin else {
            error!("task:abort run={run_id} registration plugin unavailable");
            run.entry(Severity::Error, messages::PLUGIN_UNAVAILABLE, MessageParams::new(), None, None);
            return run.finish(false);
        };

        let tenants = match self.tenants.list_tenants() {
            Ok(tenants) => tenants,
            Err(e) => {
                error!("task:abort run={run_id} tenants unavailable: {e}");
                run.entry(Severity::Error, messages::TENANTS_UNAVAILABLE, params([(PARAM, e.to_string().as_str())]), None, None);
                return run.finish(false);
            }
        };
        run.report.tenants_considered = tenants.len();

        let eligibility = EligibilityFilter::new(self.tenants.as_ref(), self.resolver.as_ref()).filter(tenants);
        run.report.tenants_eligible = eligibility.eligible.len();
        run.report.tenants_skipped = eligibility.skipped.len();
        for skip in eligibility.warnings() {
            run.entry(Severity::Warning,
                      messages::NO_DOI_PREFIX,
                      params([("path", skip.tenant.path.as_str())]),
                      Some(&skip.tenant),
                      None);
        }

        let discoverer = ObjectDiscoverer::new(plugin.objects.as_ref());
        let mut executor = DepositExecutor::new(self.storage.as_ref(), plugin.transport.as_ref(), &self.naming, run_id);

        for eligible in &eligibility.eligible {
            let flags = eligible.kind_flags();
            for kind in ObjectKind::ALL {
                let objects = match discoverer.discover(&eligible.tenant, kind, flags) {
                    Ok(objects) => objects,
                    Err(e) => {
                        warn!("task:discovery failed tenant={} kind={kind}: {e}", eligible.tenant.path);
                        run.entry(Severity::Warning,
                                  messages::DISCOVERY_ERROR,
                                  params([("kind", kind.label()), ("path", eligible.tenant.path.as_str()), (PARAM, e.to_string().as_str())]),
                                  Some(&eligible.tenant),
                                  None);
                        continue;
                    }
                };
                run.report.kind_mut(kind).discovered += objects.len();

                for object in &objects {
                    if self.is_cancelled() {
                        info!("task:cancelled run={run_id} after {} attempts", executor.attempts());
                        let done = run.report.attempted().to_string();
                        run.entry(Severity::Notice, messages::RUN_CANCELLED, params([("deposited", done.as_str())]), None, None);
                        return run.finish(false);
                    }
                    self.register(plugin, &mut executor, &mut run, eligible, object);
                }
            }
        }

        let attempted = run.report.attempted().to_string();
        let failed = run.report.failed().to_string();
        run.entry(Severity::Completed,
                  messages::RUN_COMPLETED,
                  params([("attempted", attempted.as_str()), ("failed", failed.as_str())]),
                  None,
                  None);
        info!("task:done run={run_id} attempted={attempted} failed={failed}");
        run.finish(true)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().map(CancelToken::is_cancelled).unwrap_or(false)
    }

    /// Export + depósito de un objeto. Nunca interrumpe la corrida.
    fn register(&self,
                plugin: &RegistrationPlugin,
                executor: &mut DepositExecutor<'_>,
                run: &mut RunState<'_>,
                eligible: &EligibleTenant,
                object: &RegisterableObject) {
        let tenant = &eligible.tenant;
        let document = match plugin.producer.serialize(object, object.kind.filter_key(), tenant) {
            Ok(document) => document,
            Err(e) => {
                warn!("task:export failed object={object} tenant={}: {e}", tenant.path);
                run.report.kind_mut(object.kind).failed += 1;
                let label = object.to_string();
                run.entry(Severity::Warning,
                          messages::DOCUMENT_ERROR,
                          params([("object", label.as_str()), (PARAM, e.to_string().as_str())]),
                          Some(tenant),
                          Some(object));
                return;
            }
        };

        let attempt = executor.attempt(object, &document, tenant);
        run.report.record(object.kind, &attempt.result);
        match attempt.result {
            DepositResult::Success => debug!("task:deposited object={object} tenant={}", tenant.path),
            DepositResult::Failure { messages: failures } => {
                for message in failures {
                    let mut p = MessageParams::new();
                    if let Some(param) = message.param {
                        p.insert(PARAM.to_string(), param);
                    }
                    run.entry(Severity::Warning, &message.code, p, Some(tenant), Some(object));
                }
            }
            DepositResult::MalformedFailure => {
                run.entry(Severity::Warning, messages::DEPOSIT_ERROR, params([(PARAM, NO_DETAIL)]), Some(tenant), Some(object));
            }
        }
    }
}

/// Estado mutable de una corrida en curso.
struct RunState<'a> {
    run_id: Uuid,
    catalog: &'a dyn MessageCatalog,
    log: RunLog,
    report: RunReport,
}

impl<'a> RunState<'a> {
    fn new(run_id: Uuid, catalog: &'a dyn MessageCatalog) -> Self {
        Self { run_id,
               catalog,
               log: RunLog::new(),
               report: RunReport::default() }
    }

    fn entry(&mut self,
             severity: Severity,
             key: &str,
             params: MessageParams,
             tenant: Option<&Tenant>,
             object: Option<&RegisterableObject>) {
        let message = self.catalog.render(key, &params);
        self.log.push(LogEntry { ts: chrono::Utc::now(),
                                 severity,
                                 key: key.to_string(),
                                 params,
                                 message,
                                 tenant: tenant.map(|t| t.path.clone()),
                                 object: object.cloned() });
    }

    fn finish(self, success: bool) -> RunOutcome {
        RunOutcome { run_id: self.run_id,
                     success,
                     log: self.log,
                     report: self.report }
    }
}
