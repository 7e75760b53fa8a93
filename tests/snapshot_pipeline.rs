use std::collections::HashMap;
use std::fs;

use doiflow::adapters::config::{ENV_EXECUTION_LOG, ENV_EXPORT_DIR, ENV_OUTBOX, ENV_SNAPSHOT};
use doiflow::{build_task, SenderConfig, Severity};
use serde_json::json;
use tempfile::tempdir;

fn config_for(vars: HashMap<&'static str, String>) -> SenderConfig {
    SenderConfig::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

#[test]
fn configured_run_deposits_every_enabled_kind_and_cleans_up() {
    let dir = tempdir().unwrap();
    let snapshot = dir.path().join("tenants.json");
    fs::write(&snapshot,
              json!({ "tenants": [
                  { "id": 7, "path": "ojs",
                    "settings": { "username": "svc", "password": "pw", "automaticRegistration": "1" },
                    "identifier_plugin": { "settings": { "enabled": "1", "doiPrefix": "10.5555",
                        "enableIssueDoi": 1, "enablePublicationDoi": 1, "enableRepresentationDoi": 1 } },
                    "unregistered": { "collection": [1], "work": [2], "representation": [3, 4] } },
                  { "id": 8, "path": "disabled",
                    "settings": { "username": "svc", "password": "pw", "automaticRegistration": false },
                    "identifier_plugin": { "settings": { "enabled": true, "doiPrefix": "10.5555", "enableIssueDoi": true } },
                    "unregistered": { "collection": [1] } }
              ] }).to_string()).unwrap();

    let exports = dir.path().join("exports");
    let outbox = dir.path().join("outbox");
    let log_file = dir.path().join("execution.ndjson");
    let config = config_for(HashMap::from([(ENV_SNAPSHOT, snapshot.display().to_string()),
                                          (ENV_EXPORT_DIR, exports.display().to_string()),
                                          (ENV_OUTBOX, outbox.display().to_string()),
                                          (ENV_EXECUTION_LOG, log_file.display().to_string())]));

    let task = build_task(&config).unwrap();
    let outcome = task.execute();

    assert!(outcome.success);
    assert_eq!(outcome.report.attempted(), 4);
    assert_eq!(outcome.report.tenants_skipped, 1);
    // el tenant deshabilitado se salta en silencio
    assert!(outcome.log.for_tenant("disabled").next().is_none());
    assert_eq!(outcome.log.with_severity(Severity::Completed).count(), 1);

    let spooled = fs::read_dir(outbox.join("ojs")).unwrap().count();
    assert_eq!(spooled, 4);
    assert!(!outbox.join("disabled").exists());
    assert_eq!(fs::read_dir(&exports).unwrap().count(), 0);

    // `execute` no toca el sink; `run` sí
    assert!(!log_file.exists());
    assert!(task.run());
    assert!(fs::read_to_string(&log_file).unwrap().lines().count() >= 1);
}

#[test]
fn unreadable_snapshot_fails_setup() {
    let dir = tempdir().unwrap();
    let config = config_for(HashMap::from([(ENV_SNAPSHOT, dir.path().join("missing.json").display().to_string())]));
    assert!(matches!(build_task(&config), Err(doiflow::SetupError::Snapshot(_))));
}
