use qa_adapters::{basic_api_checklist, TodoApi};
use qa_core::{flow, render_report, FlowRegistry, InMemorySnapshotStore, Outcome, RunMode, Runner,
              SnapshotOutcome};
use qa_persistence::{FileSnapshotStore, StoreConfig};
use serde_json::json;

#[tokio::main]
async fn main() {
    // Cargar variables de entorno desde .env si existe (antes de leer QA_SNAPSHOT_*)
    let _ = dotenvy::dotenv();

    println!("--- Demo 1: flujo en memoria ---");
    run_memory_demo().await;

    println!("--- Demo 2: checklist de API contra archivo ---");
    let cfg = StoreConfig::from_env();
    println!("snapshots: {} (modo {:?})", cfg.path.display(), cfg.mode);

    let store = match FileSnapshotStore::open(&cfg.path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("[main-qa] no se pudo abrir el store: {e}");
            std::process::exit(5);
        }
    };

    let api = TodoApi::new();
    let mut registry = FlowRegistry::new();
    registry.register(basic_api_checklist(&api)).expect("nombre de flujo válido");

    let mut runner = Runner::new(store, cfg.mode);
    let report = match runner.run_all(&registry).await {
        Ok(r) => r,
        Err(e) => {
            eprintln!("[main-qa] corrida abortada: {e}");
            std::process::exit(5);
        }
    };

    let _ = render_report(&report);
    std::process::exit(report.exit_code());
}

/// Demo mínima sin tocar disco: la primera corrida graba, la segunda coincide.
async fn run_memory_demo() {
    let demo = || {
        flow("demo contador").act("arranca en cero", |_ctx| async { Ok(json!({"count": 0})) })
                             .check("estado inicial")
                             .act("incrementa", |ctx| async move {
                                 let n = ctx["count"].as_u64().unwrap_or(0);
                                 Ok(json!({"count": n + 1}))
                             })
                             .check("estado final")
                             .build()
    };

    let mut runner = Runner::new(InMemorySnapshotStore::new(), RunMode::Verify);
    let first = runner.run_flow(&demo()).await.expect("store en memoria no falla");
    assert_eq!(first.outcome, Outcome::Passed, "la primera corrida debe grabar");

    let second = runner.run_flow(&demo()).await.expect("store en memoria no falla");
    let matched = second.results
                        .iter()
                        .filter(|r| r.snapshot == Some(SnapshotOutcome::Matched))
                        .count();
    assert_eq!(matched, 2, "la segunda corrida debe coincidir con lo grabado");
    println!("!Demo memoria: OK (graba y luego coincide, {matched} snapshots)");
}
