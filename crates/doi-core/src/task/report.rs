use serde::{Deserialize, Serialize};

use crate::model::{DepositResult, ObjectKind};

/// Contadores de un tipo de objeto.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindCounts {
    pub discovered: usize,
    /// Depósitos exitosos.
    pub deposited: usize,
    /// Documentos que fallaron al generarse o al depositarse.
    pub failed: usize,
}

/// Resumen numérico de una corrida.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub tenants_considered: usize,
    pub tenants_eligible: usize,
    pub tenants_skipped: usize,
    pub collections: KindCounts,
    pub works: KindCounts,
    pub representations: KindCounts,
}

impl RunReport {
    pub fn kind(&self, kind: ObjectKind) -> &KindCounts {
        match kind {
            ObjectKind::Collection => &self.collections,
            ObjectKind::Work => &self.works,
            ObjectKind::Representation => &self.representations,
        }
    }

    pub fn kind_mut(&mut self, kind: ObjectKind) -> &mut KindCounts {
        match kind {
            ObjectKind::Collection => &mut self.collections,
            ObjectKind::Work => &mut self.works,
            ObjectKind::Representation => &mut self.representations,
        }
    }

    pub fn record(&mut self, kind: ObjectKind, result: &DepositResult) {
        let counts = self.kind_mut(kind);
        if result.is_success() {
            counts.deposited += 1;
        } else {
            counts.failed += 1;
        }
    }

    pub fn attempted(&self) -> usize {
        ObjectKind::ALL.iter().map(|k| self.kind(*k).deposited + self.kind(*k).failed).sum()
    }

    pub fn failed(&self) -> usize {
        ObjectKind::ALL.iter().map(|k| self.kind(*k).failed).sum()
    }
}
