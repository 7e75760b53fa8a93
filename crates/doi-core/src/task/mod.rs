//! Task programado de depósito.
//!
//! Provee el orquestador (`RegistrationTask`), su builder y el reporte de la
//! corrida. Una corrida es una pasada secuencial y determinista:
//! tenants en orden del repositorio, tipos en orden fijo
//! (issues, artículos, galeradas) y objetos en orden de descubrimiento.

pub mod builder;
pub mod cancel;
pub mod core;
pub mod report;

pub use builder::TaskBuilder;
pub use cancel::CancelToken;
pub use self::core::{RegistrationPlugin, RegistrationTask, RunOutcome};
pub use report::{KindCounts, RunReport};
