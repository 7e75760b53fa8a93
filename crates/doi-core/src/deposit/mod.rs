//! Depósito de documentos: productor (externo), almacenamiento transitorio,
//! transporte (externo) y el executor que los encadena.

pub mod executor;
pub mod producer;
pub mod storage;
pub mod transport;

pub use executor::{DepositAttempt, DepositExecutor, ExportNaming};
pub use producer::DocumentProducer;
pub use storage::{InMemoryStorage, TransientStorage};
pub use transport::DepositTransport;
