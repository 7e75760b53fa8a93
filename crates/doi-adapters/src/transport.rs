//! Transporte "outbox": en lugar de llamar al registrador copia cada
//! documento a `<outbox>/<tenant>/<tipo>-<id><ext>` y responde éxito.
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use doi_core::{DepositResult, DepositTransport, RegisterableObject, Tenant, TransportError};
use log::debug;

#[derive(Debug, Clone)]
pub struct OutboxTransport {
    outbox: PathBuf,
}

impl OutboxTransport {
    pub fn new(outbox: impl Into<PathBuf>) -> Self {
        Self { outbox: outbox.into() }
    }

    /// Destino del documento dentro del outbox. El path del tenant debe ser
    /// relativo y sin `..`: nunca se escribe fuera del outbox.
    pub fn target(&self, object: &RegisterableObject, tenant: &Tenant, document: &Path) -> Result<PathBuf, TransportError> {
        let tenant_dir = Path::new(&tenant.path);
        let contained = tenant_dir.components().next().is_some()
                        && tenant_dir.components().all(|c| matches!(c, Component::Normal(_)));
        if !contained {
            return Err(TransportError::Rejected(format!("tenant path `{}` escapes the outbox", tenant.path)));
        }
        let ext = document.extension().and_then(|e| e.to_str()).map(|e| format!(".{e}")).unwrap_or_default();
        Ok(self.outbox.join(tenant_dir).join(format!("{}-{}{}", object.kind.label(), object.id, ext)))
    }
}

impl DepositTransport for OutboxTransport {
    fn deposit(&self, object: &RegisterableObject, tenant: &Tenant, document: &Path) -> Result<DepositResult, TransportError> {
        if !document.is_file() {
            return Err(TransportError::Rejected(format!("document {} not found", document.display())));
        }
        let target = self.target(object, tenant, document)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| TransportError::Other(format!("{}: {e}", parent.display())))?;
        }
        match fs::copy(document, &target) {
            Ok(_) => {
                debug!("outbox:deposit object={} target={}", object, target.display());
                Ok(DepositResult::Success)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(TransportError::Rejected(format!("document {} not found", document.display())))
            }
            Err(e) => Err(TransportError::Other(format!("{}: {e}", target.display()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doi_core::{ObjectKind, TenantId};
    use tempfile::tempdir;

    #[test]
    fn documents_land_under_the_tenant_directory() {
        let dir = tempdir().unwrap();
        let document = dir.path().join("doc.xml");
        fs::write(&document, b"<resource/>").unwrap();
        let transport = OutboxTransport::new(dir.path().join("out"));
        let object = RegisterableObject::new(ObjectKind::Work, 3, TenantId(1));

        let result = transport.deposit(&object, &Tenant::new(1, "jas"), &document).unwrap();

        assert_eq!(result, DepositResult::Success);
        assert_eq!(fs::read(dir.path().join("out").join("jas").join("article-3.xml")).unwrap(), b"<resource/>");
    }

    #[test]
    fn tenant_paths_outside_the_outbox_are_rejected() {
        let dir = tempdir().unwrap();
        let document = dir.path().join("doc.xml");
        fs::write(&document, b"<resource/>").unwrap();
        let outbox = dir.path().join("out");
        let transport = OutboxTransport::new(&outbox);
        let object = RegisterableObject::new(ObjectKind::Collection, 1, TenantId(9));

        for path in ["/etc", "../escape", "jas/../../escape", ""] {
            let err = transport.deposit(&object, &Tenant::new(9, path), &document).unwrap_err();
            assert!(matches!(err, TransportError::Rejected(_)), "path `{path}` must be rejected");
        }
        assert!(!dir.path().join("escape").exists());
        assert!(!outbox.exists());
    }
}
