use qa_core::{derive_flow_keys, flow, FlowRegistry, InMemorySnapshotStore, RunMode, Runner, SnapshotStore};
use serde_json::json;

#[tokio::test]
async fn executor_uses_definition_derived_keys() {
    let f = flow("repetidos").act("uno", |_ctx| async { Ok(json!(1)) })
                             .check("estado")
                             .act("dos", |_ctx| async { Ok(json!(2)) })
                             .check("estado")
                             .check("final")
                             .build();

    let derived: Vec<String> = derive_flow_keys(f.name(), f.steps()).iter()
                                                                    .map(|k| k.to_string())
                                                                    .collect();
    assert_eq!(derived, vec!["repetidos::estado", "repetidos::estado#2", "repetidos::final"]);

    let mut runner = Runner::new(InMemorySnapshotStore::new(), RunMode::Verify);
    runner.run_flow(&f).await.expect("el store en memoria no falla");

    let mut stored = runner.store().keys();
    let mut wanted = derived.clone();
    stored.sort();
    wanted.sort();
    assert_eq!(stored, wanted);
}

#[tokio::test]
async fn repeated_labels_store_distinct_values() {
    let f = flow("repetidos").act("uno", |_ctx| async { Ok(json!(1)) })
                             .check("estado")
                             .act("dos", |_ctx| async { Ok(json!(2)) })
                             .check("estado")
                             .build();

    let mut runner = Runner::new(InMemorySnapshotStore::new(), RunMode::Verify);
    runner.run_flow(&f).await.expect("el store en memoria no falla");

    assert_eq!(runner.store().get("repetidos::estado"), Some(json!(1)));
    assert_eq!(runner.store().get("repetidos::estado#2"), Some(json!(2)));
}

#[tokio::test]
async fn same_label_in_different_flows_does_not_collide() {
    let mut registry = FlowRegistry::new();
    registry.register(flow("a").act("valor", |_ctx| async { Ok(json!("a")) }).check("estado").build())
            .unwrap();
    registry.register(flow("b").act("valor", |_ctx| async { Ok(json!("b")) }).check("estado").build())
            .unwrap();

    let mut runner = Runner::new(InMemorySnapshotStore::new(), RunMode::Verify);
    runner.run_all(&registry).await.expect("el store en memoria no falla");

    assert_eq!(runner.store().get("a::estado"), Some(json!("a")));
    assert_eq!(runner.store().get("b::estado"), Some(json!("b")));
}
