//! doiflow: registro automático de DOIs.
//!
//! Este crate reúne el workspace bajo un solo nombre:
//! - `pipeline`: núcleo (elegibilidad, descubrimiento, depósito, orquestación).
//! - `adapters`: snapshot JSON, disco, outbox, sink NDJSON y configuración.
//!
//! Puede usarse desde `doi-cli` o por otros crates/clientes.

pub use doi_adapters as adapters;
pub use doi_core as pipeline;

pub use doi_adapters::{build_task, init_dotenv, SenderConfig, SetupError};
pub use doi_core::{RegistrationPlugin, RegistrationTask, RunLog, RunOutcome, RunReport, Severity};

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn task_without_snapshot_is_a_config_error() {
		let config = SenderConfig::from_lookup(|_| None).unwrap();
		let err = build_task(&config).err().expect("snapshot is required");
		assert!(matches!(err, SetupError::Config(adapters::ConfigError::Missing(adapters::config::ENV_SNAPSHOT))));
	}
}
