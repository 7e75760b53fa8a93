//! doi-adapters: implementaciones locales de los colaboradores del sender.
//!
//! Este crate provee:
//! - `config`: carga de configuración desde variables de entorno / `.env`.
//! - `snapshot`: repositorio de tenants y objetos leído de un JSON.
//! - `storage`: almacenamiento transitorio sobre el sistema de archivos.
//! - `producer`: productor de documentos JSON (sobre neutral, sin esquema
//!   del registrador).
//! - `transport`: transporte "outbox" que archiva los documentos en un
//!   directorio en lugar de enviarlos.
//! - `sink`: sink NDJSON del log de ejecución.
//! - `wiring`: arma el task completo a partir de `SenderConfig`.
//!
//! Ninguno define protocolo ni esquema del registrador; sirven para operar
//! el pipeline de punta a punta sin servicios externos.

pub mod config;
pub mod error;
pub mod producer;
pub mod sink;
pub mod snapshot;
pub mod storage;
pub mod transport;
pub mod wiring;

pub use config::{init_dotenv, SenderConfig};
pub use error::{ConfigError, SetupError, SnapshotError};
pub use producer::JsonEnvelopeProducer;
pub use sink::NdjsonLogSink;
pub use snapshot::{Snapshot, SnapshotRepository};
pub use storage::FsStorage;
pub use transport::OutboxTransport;
pub use wiring::build_task;
