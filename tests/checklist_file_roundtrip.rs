use qaflow_rust::{basic_api_checklist, flow, FileSnapshotStore, FlowRegistry, InMemorySnapshotStore,
                  Outcome, RunMode, Runner, SnapshotOutcome, TodoApi};
use serde_json::json;

#[tokio::test]
async fn checklist_records_then_matches_through_file_store() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("qa_snapshots.json");

    // Primera corrida: servicio limpio, archivo vacío, todo se graba.
    let store = FileSnapshotStore::open(&path).expect("open store");
    let mut registry = FlowRegistry::new();
    registry.register(basic_api_checklist(&TodoApi::new())).expect("registro ok");

    let mut runner = Runner::new(store, RunMode::Verify);
    let first = runner.run_all(&registry).await.expect("primera corrida");
    assert_eq!(first.outcome(), Outcome::Passed);
    let recorded = first.flows[0].results
                                 .iter()
                                 .filter(|r| r.snapshot == Some(SnapshotOutcome::Recorded))
                                 .count();
    assert_eq!(recorded, 14, "cada CHECK graba un snapshot nuevo");

    // Segunda corrida: servicio nuevo, el archivo persistido debe coincidir.
    let store = FileSnapshotStore::open(&path).expect("reopen store");
    let mut registry = FlowRegistry::new();
    registry.register(basic_api_checklist(&TodoApi::new())).expect("registro ok");

    let mut runner = Runner::new(store, RunMode::Verify);
    let second = runner.run_all(&registry).await.expect("segunda corrida");
    assert_eq!(second.outcome(), Outcome::Passed);
    let matched = second.flows[0].results
                                 .iter()
                                 .filter(|r| r.snapshot == Some(SnapshotOutcome::Matched))
                                 .count();
    assert_eq!(matched, 14, "cada CHECK coincide con lo grabado en disco");
}

#[tokio::test]
async fn failing_flow_maps_to_exit_code_one() {
    let broken = flow("flujo roto").act("paso sano", |_ctx| async { Ok(json!({"ok": true})) })
                                   .act("paso que falla", |_ctx| async { Err("sin conexión".into()) })
                                   .check("nunca se evalúa")
                                   .build();
    let mut registry = FlowRegistry::new();
    registry.register(broken).expect("registro ok");

    let mut runner = Runner::new(InMemorySnapshotStore::new(), RunMode::Verify);
    let report = runner.run_all(&registry).await.expect("el fallo de un paso no aborta la corrida");

    assert_eq!(report.outcome(), Outcome::Failed);
    assert_eq!(report.exit_code(), 1);
    assert_eq!(report.flows[0].executed(), 2, "se corta en el paso fallido");
}
