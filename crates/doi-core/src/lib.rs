//! doi-core: pipeline programado de registro de DOIs.
//!
//! Por cada tenant elegible descubre los objetos sin DOI registrado, genera
//! su documento de registro, lo deposita a través del transporte y deja el
//! resultado en el log de ejecución. Repositorio, productor de documentos,
//! transporte, almacenamiento y sink del log son colaboradores externos
//! inyectados como traits.
pub mod constants;
pub mod deposit;
pub mod discovery;
pub mod eligibility;
pub mod errors;
pub mod model;
pub mod repo;
pub mod runlog;
pub mod task;

pub use deposit::{DepositAttempt, DepositExecutor, DepositTransport, DocumentProducer, ExportNaming, InMemoryStorage, TransientStorage};
pub use discovery::{KindFlags, ObjectDiscoverer};
pub use eligibility::{Eligibility, EligibilityFilter, EligibleTenant, SkipReason, SkipRecord};
pub use errors::{DocumentError, RepositoryError, SinkError, StorageError, TransportError};
pub use model::{DepositMessage, DepositResult, ObjectId, ObjectKind, RegisterableObject, SettingValue, Tenant, TenantId};
pub use repo::{IdentifierPlugin, IdentifierPluginResolver, InMemoryRepository, ObjectRepository, TenantRepository};
pub use runlog::{DefaultCatalog, LogEntry, LogSink, MemoryLogSink, MessageCatalog, RunLog, Severity};
pub use task::{CancelToken, RegistrationPlugin, RegistrationTask, RunOutcome, RunReport};

#[cfg(test)]
mod tests {
	use super::*;
	use crate::runlog::messages;
	use std::path::Path;

	struct EchoProducer;

	impl DocumentProducer for EchoProducer {
		fn serialize(&self, object: &RegisterableObject, filter_key: &str, _tenant: &Tenant) -> Result<Vec<u8>, DocumentError> {
			Ok(format!("{filter_key}:{}", object.id).into_bytes())
		}
	}

	struct AlwaysOk;

	impl DepositTransport for AlwaysOk {
		fn deposit(&self, _object: &RegisterableObject, _tenant: &Tenant, _document: &Path) -> Result<DepositResult, TransportError> {
			Ok(DepositResult::Success)
		}
	}

	fn ready_repo() -> InMemoryRepository {
		let repo = InMemoryRepository::new();
		let t = repo.add_tenant(1, "jas");
		repo.configure_account(t.id, "user", "secret");
		repo.enable_identifiers(t.id, "10.1234", &[ObjectKind::Collection, ObjectKind::Work]);
		repo.add_unregistered(t.id, ObjectKind::Collection, &[1]);
		repo.add_unregistered(t.id, ObjectKind::Work, &[10, 11]);
		repo
	}

	#[test]
	fn missing_registration_plugin_fails_the_run_without_touching_tenants() {
		let repo = ready_repo();
		let storage = InMemoryStorage::new();
		let task = RegistrationTask::builder(repo.clone(), repo.clone(), storage.clone()).build();

		let outcome = task.execute();

		assert!(!outcome.success);
		assert!(repo.discovery_calls().is_empty());
		assert!(storage.writes().is_empty());
		assert_eq!(outcome.log.len(), 1);
		assert_eq!(outcome.log.entries()[0].severity, Severity::Error);
		assert_eq!(outcome.log.entries()[0].key, messages::PLUGIN_UNAVAILABLE);
	}

	#[test]
	fn unavailable_tenant_listing_fails_the_run() {
		let repo = ready_repo();
		repo.set_unavailable(true);
		let task = RegistrationTask::builder(repo.clone(), repo.clone(), InMemoryStorage::new())
			.plugin(RegistrationPlugin::new(repo.clone(), EchoProducer, AlwaysOk))
			.build();

		let outcome = task.execute();
		assert!(!outcome.success);
		assert_eq!(outcome.log.with_key(messages::TENANTS_UNAVAILABLE).count(), 1);
	}

	#[test]
	fn cancelled_token_stops_between_objects() {
		let repo = ready_repo();
		let storage = InMemoryStorage::new();
		let token = CancelToken::new();
		token.cancel();
		let task = RegistrationTask::builder(repo.clone(), repo.clone(), storage.clone())
			.plugin(RegistrationPlugin::new(repo.clone(), EchoProducer, AlwaysOk))
			.cancel_token(token)
			.build();

		let outcome = task.execute();
		assert!(!outcome.success);
		assert!(storage.writes().is_empty());
		assert_eq!(outcome.log.with_key(messages::RUN_CANCELLED).count(), 1);
	}

	#[test]
	fn full_pass_reports_counts_and_closes_with_completed_entry() {
		let repo = ready_repo();
		let storage = InMemoryStorage::new();
		let sink = MemoryLogSink::new();
		let task = RegistrationTask::builder(repo.clone(), repo.clone(), storage.clone())
			.plugin(RegistrationPlugin::new(repo.clone(), EchoProducer, AlwaysOk))
			.sink(sink.clone())
			.build();

		assert!(task.run());
		assert_eq!(task.name(), "DataCite automatic registration task");

		let flushed = sink.flushed();
		assert_eq!(flushed.len(), 1);
		let log = &flushed[0].1;
		assert_eq!(log.len(), 1);
		assert_eq!(log.entries()[0].severity, Severity::Completed);
		assert_eq!(log.entries()[0].param("attempted"), Some("3"));
		assert_eq!(storage.writes().len(), 3);
		assert!(storage.live_files().is_empty());
	}
}
