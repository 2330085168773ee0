//! Motor de ejecución: cadena de pasos y runner de la corrida.

mod executor;
mod runner;

pub use runner::Runner;
