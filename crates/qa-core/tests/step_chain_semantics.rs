use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use qa_core::model::redact::without_pointer;
use qa_core::{flow, Flow, FlowReport, InMemorySnapshotStore, Outcome, RunMode, Runner, SnapshotOutcome,
              SnapshotStore, StepError, StepKind};
use serde_json::{json, Value};

async fn run_verify(flow: &Flow) -> (FlowReport, InMemorySnapshotStore) {
    let mut runner = Runner::new(InMemorySnapshotStore::new(), RunMode::Verify);
    let report = runner.run_flow(flow).await.expect("el store en memoria no falla");
    (report, runner.into_store())
}

#[tokio::test]
async fn context_flows_from_act_to_act() {
    let f = flow("cadena").act("base", |_ctx| async { Ok(json!({"n": 1})) })
                          .act("incrementar", |ctx| async move {
                              let n = ctx["n"].as_i64().unwrap_or(0);
                              Ok(json!({"n": n + 1}))
                          })
                          .check("resultado")
                          .build();

    let (report, store) = run_verify(&f).await;
    assert_eq!(report.outcome, Outcome::Passed);
    assert_eq!(store.get("cadena::resultado"), Some(json!({"n": 2})));
}

#[tokio::test]
async fn failing_act_stops_the_chain() {
    let executed = Arc::new(AtomicBool::new(false));
    let flag = executed.clone();
    let f = flow("frenada").act("ok", |_ctx| async { Ok(json!(1)) })
                           .act("rompe", |_ctx| async { Err("boom".into()) })
                           .act("no corre", move |_ctx| {
                               let flag = flag.clone();
                               async move {
                                   flag.store(true, Ordering::SeqCst);
                                   Ok(json!(2))
                               }
                           })
                           .check("tampoco corre")
                           .build();

    let (report, store) = run_verify(&f).await;
    assert_eq!(report.outcome, Outcome::Failed);
    assert_eq!(report.executed(), 2, "el reporte sólo lista los pasos alcanzados");
    assert!(!executed.load(Ordering::SeqCst), "un paso posterior al fallo no debe ejecutarse");
    assert!(store.keys().is_empty(), "no debe grabarse ningún snapshot tras el fallo");

    let (index, failed) = report.failed_step().expect("hay un paso fallado");
    assert_eq!(index, 1);
    assert_eq!(failed.kind, StepKind::Act);
    assert!(matches!(failed.error, Some(StepError::OperationFailure { ref reason }) if reason == "boom"));
}

#[tokio::test]
async fn single_rejecting_act_yields_report_of_length_one() {
    let f = flow("red caída").act("pedir lista", |_ctx| async { Err("network error".into()) })
                             .check("nunca evaluado")
                             .build();

    let (report, _) = run_verify(&f).await;
    assert_eq!(report.outcome, Outcome::Failed);
    assert_eq!(report.executed(), 1);
    match &report.results[0].error {
        Some(StepError::OperationFailure { reason }) => assert!(reason.contains("network error")),
        other => panic!("esperaba OperationFailure, hubo {other:?}"),
    }
}

#[tokio::test]
async fn check_without_prior_act_snapshots_null() {
    let f = flow("sin actos").check("contexto inicial").build();

    let (report, store) = run_verify(&f).await;
    assert_eq!(report.outcome, Outcome::Passed);
    assert_eq!(report.results[0].snapshot, Some(SnapshotOutcome::Recorded));
    assert_eq!(store.get("sin actos::contexto inicial"), Some(Value::Null));

    // Null es un valor ordinario: la segunda corrida coincide consigo mismo.
    let mut runner = Runner::new(store, RunMode::Verify);
    let second = runner.run_flow(&f).await.expect("el store en memoria no falla");
    assert_eq!(second.results[0].snapshot, Some(SnapshotOutcome::Matched));
}

#[tokio::test]
async fn mismatch_keeps_stored_value_and_reports_both() {
    let counter = Arc::new(AtomicUsize::new(0));
    let c = counter.clone();
    let f = flow("cambiante").act("leer contador", move |_ctx| {
                                 let c = c.clone();
                                 async move { Ok(json!({"tick": c.fetch_add(1, Ordering::SeqCst)})) }
                             })
                             .check("valor estable")
                             .build();

    let mut runner = Runner::new(InMemorySnapshotStore::new(), RunMode::Verify);
    let first = runner.run_flow(&f).await.expect("el store en memoria no falla");
    assert_eq!(first.outcome, Outcome::Passed);

    let second = runner.run_flow(&f).await.expect("el store en memoria no falla");
    assert_eq!(second.outcome, Outcome::Failed);
    match &second.failed_step().expect("hay un paso fallado").1.error {
        Some(StepError::AssertionMismatch { key, expected, actual }) => {
            assert_eq!(key, "cambiante::valor estable");
            assert_eq!(expected, &json!({"tick": 0}));
            assert_eq!(actual, &json!({"tick": 1}));
        }
        other => panic!("esperaba AssertionMismatch, hubo {other:?}"),
    }

    // Un mismatch en modo verify nunca toca lo almacenado.
    assert_eq!(runner.store().get("cambiante::valor estable"), Some(json!({"tick": 0})));
}

#[tokio::test]
async fn normalizer_hides_volatile_fields_across_runs() {
    let counter = Arc::new(AtomicUsize::new(100));
    let c = counter.clone();
    let f = flow("ids volátiles").act("crear", move |_ctx| {
                                     let c = c.clone();
                                     async move {
                                         Ok(json!({"id": c.fetch_add(1, Ordering::SeqCst), "text": "hola"}))
                                     }
                                 })
                                 .check_with("estable sin id", |v| without_pointer(v, "/id"))
                                 .build();

    let mut runner = Runner::new(InMemorySnapshotStore::new(), RunMode::Verify);
    let first = runner.run_flow(&f).await.expect("el store en memoria no falla");
    assert_eq!(first.results[1].snapshot, Some(SnapshotOutcome::Recorded));

    let second = runner.run_flow(&f).await.expect("el store en memoria no falla");
    assert_eq!(second.outcome, Outcome::Passed);
    assert_eq!(second.results[1].snapshot, Some(SnapshotOutcome::Matched));
    assert_eq!(runner.store().get("ids volátiles::estable sin id"), Some(json!({"text": "hola"})));
}

#[tokio::test]
async fn normalizer_does_not_mutate_live_context() {
    let f = flow("normalizado").act("base", |_ctx| async { Ok(json!({"id": 9, "text": "x"})) })
                               .check_with("sin id", |v| without_pointer(v, "/id"))
                               .check("con id")
                               .build();

    let (report, store) = run_verify(&f).await;
    assert_eq!(report.outcome, Outcome::Passed);
    assert_eq!(store.get("normalizado::sin id"), Some(json!({"text": "x"})));
    assert_eq!(store.get("normalizado::con id"), Some(json!({"id": 9, "text": "x"})));
}

#[tokio::test]
async fn successive_checks_freeze_the_same_context() {
    let f = flow("doble lectura").act("base", |_ctx| async { Ok(json!({"x": 1})) })
                                 .check("primera mirada")
                                 .check("segunda mirada")
                                 .build();

    let (report, store) = run_verify(&f).await;
    assert_eq!(report.outcome, Outcome::Passed);
    assert_eq!(store.get("doble lectura::primera mirada"), store.get("doble lectura::segunda mirada"));
}
