//! qa-cli: utilidades de mantenimiento sobre el archivo de snapshots.
//!
//! Subcomandos:
//!   list                    lista claves con el hash de su contenido
//!   show   --key <CLAVE>    imprime un snapshot en JSON legible
//!   remove --key <CLAVE>    borra un snapshot puntual
//!   remove --flow <FLUJO>   borra todos los snapshots de un flujo
//!   clear  --yes            vacía el archivo completo
//!
//! Códigos de salida: 0 éxito, 2 uso inválido, 4 clave/flujo inexistente,
//! 5 error del store.

use qa_core::hashing::hash_value;
use qa_core::{SnapshotKey, SnapshotStore};
use qa_persistence::{FileSnapshotStore, StoreConfig};

fn main() {
    let _ = dotenvy::dotenv();

    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("list") => cmd_list(),
        Some("show") => cmd_show(&args),
        Some("remove") => cmd_remove(&args),
        Some("clear") => cmd_clear(&args),
        _ => {
            eprintln!("Uso: qa-cli <list|show|remove|clear> [flags]");
            eprintln!("  list                     lista claves y hash de contenido");
            eprintln!("  show --key <CLAVE>       imprime un snapshot");
            eprintln!("  remove --key <CLAVE>     borra un snapshot");
            eprintln!("  remove --flow <FLUJO>    borra los snapshots de un flujo");
            eprintln!("  clear --yes              vacía el archivo completo");
            std::process::exit(2);
        }
    }
}

fn open_store() -> FileSnapshotStore {
    let cfg = StoreConfig::from_env();
    match FileSnapshotStore::open(&cfg.path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("[qa-cli] error abriendo el store: {e}");
            std::process::exit(5);
        }
    }
}

fn persist_or_exit(store: &mut FileSnapshotStore) {
    if let Err(e) = store.persist() {
        eprintln!("[qa-cli] error persistiendo el store: {e}");
        std::process::exit(5);
    }
}

fn cmd_list() {
    let store = open_store();
    let keys = store.keys();
    if keys.is_empty() {
        println!("(sin snapshots en {})", store.path().display());
        return;
    }
    for key in keys {
        if let Some(value) = store.get(&key) {
            println!("{}  {}", &hash_value(&value)[..12], key);
        }
    }
}

fn cmd_show(args: &[String]) {
    let mut key: Option<String> = None;
    let mut i = 2;
    while i < args.len() {
        if args[i].as_str() == "--key" {
            i += 1;
            if i < args.len() {
                key = Some(args[i].clone());
            }
        }
        i += 1;
    }
    let key = match key {
        Some(k) => k,
        None => {
            eprintln!("Uso: qa-cli show --key <CLAVE>");
            std::process::exit(2);
        }
    };

    let store = open_store();
    match store.get(&key) {
        Some(value) => match serde_json::to_string_pretty(&value) {
            Ok(body) => println!("{body}"),
            Err(e) => {
                eprintln!("[qa-cli show] error serializando '{key}': {e}");
                std::process::exit(5);
            }
        },
        None => {
            eprintln!("[qa-cli show] clave no encontrada: {key}");
            std::process::exit(4);
        }
    }
}

fn cmd_remove(args: &[String]) {
    let mut key: Option<String> = None;
    let mut flow: Option<String> = None;
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--key" => {
                i += 1;
                if i < args.len() {
                    key = Some(args[i].clone());
                }
            }
            "--flow" => {
                i += 1;
                if i < args.len() {
                    flow = Some(args[i].clone());
                }
            }
            _ => {}
        }
        i += 1;
    }

    let mut store = open_store();
    let removed = match (key, flow) {
        (Some(k), None) => usize::from(store.remove(&k)),
        (None, Some(name)) => {
            let prefix = SnapshotKey::flow_prefix(&name);
            let targets: Vec<String> = store
                .keys()
                .into_iter()
                .filter(|k| k.starts_with(&prefix))
                .collect();
            for k in &targets {
                store.remove(k);
            }
            targets.len()
        }
        _ => {
            eprintln!("Uso: qa-cli remove --key <CLAVE> | --flow <FLUJO>");
            std::process::exit(2);
        }
    };

    if removed == 0 {
        eprintln!("[qa-cli remove] nada que borrar");
        std::process::exit(4);
    }
    persist_or_exit(&mut store);
    println!("borrados: {removed}");
}

fn cmd_clear(args: &[String]) {
    if !args.iter().any(|a| a == "--yes") {
        eprintln!("Uso: qa-cli clear --yes   (operación destructiva, requiere confirmación)");
        std::process::exit(2);
    }

    let mut store = open_store();
    let keys = store.keys();
    for k in &keys {
        store.remove(k);
    }
    persist_or_exit(&mut store);
    println!("borrados: {}", keys.len());
}
