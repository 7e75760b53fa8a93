//! Objetos registrables: issues, artículos y galeradas.
use std::fmt;

use serde::{Deserialize, Serialize};

use super::tenant::TenantId;
use crate::constants::{SETTING_ENABLE_ISSUE_DOI, SETTING_ENABLE_PUBLICATION_DOI, SETTING_ENABLE_REPRESENTATION_DOI};

/// Tipo de objeto registrable. El orden de `ALL` es el orden de proceso
/// dentro de cada tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// Issue (número de la revista).
    Collection,
    /// Artículo / publicación.
    Work,
    /// Galerada (representación concreta de un artículo).
    Representation,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 3] = [ObjectKind::Collection, ObjectKind::Work, ObjectKind::Representation];

    /// Etiqueta corta usada por el exportador.
    pub fn label(&self) -> &'static str {
        match self {
            ObjectKind::Collection => "issue",
            ObjectKind::Work => "article",
            ObjectKind::Representation => "galley",
        }
    }

    /// Clave de filtro que recibe el productor de documentos.
    pub fn filter_key(&self) -> &'static str {
        match self {
            ObjectKind::Collection => "issue=>datacite-xml",
            ObjectKind::Work => "article=>datacite-xml",
            ObjectKind::Representation => "galley=>datacite-xml",
        }
    }

    /// Parte plural que entra en el nombre del archivo de export.
    pub fn file_name_part(&self) -> &'static str {
        match self {
            ObjectKind::Collection => "issues",
            ObjectKind::Work => "articles",
            ObjectKind::Representation => "galleys",
        }
    }

    /// Setting del sub-plugin de identificadores que habilita este tipo.
    pub fn enable_setting(&self) -> &'static str {
        match self {
            ObjectKind::Collection => SETTING_ENABLE_ISSUE_DOI,
            ObjectKind::Work => SETTING_ENABLE_PUBLICATION_DOI,
            ObjectKind::Representation => SETTING_ENABLE_REPRESENTATION_DOI,
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle opaco de un registro sin DOI registrado. El core sólo lo pasa al
/// productor y al transporte.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegisterableObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub tenant: TenantId,
}

impl RegisterableObject {
    pub fn new(kind: ObjectKind, id: u64, tenant: TenantId) -> Self {
        Self { id: ObjectId(id), kind, tenant }
    }
}

impl fmt::Display for RegisterableObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.kind, self.id)
    }
}
