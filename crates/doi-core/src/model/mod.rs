//! Modelo del sender: tenants, objetos registrables y resultados de depósito.

pub mod object;
pub mod result;
pub mod tenant;

pub use object::{ObjectId, ObjectKind, RegisterableObject};
pub use result::{DepositMessage, DepositResult};
pub use tenant::{SettingValue, Tenant, TenantId};
