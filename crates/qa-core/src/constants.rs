//! Constantes del motor de verificación.
//!
//! Este módulo agrupa valores estáticos compartidos entre el ejecutor, el
//! almacén de snapshots y las herramientas de línea de comandos. Cambiar
//! `SNAPSHOT_FORMAT_VERSION` invalida archivos grabados con versiones
//! anteriores, así que sólo debe incrementarse junto con una migración.

/// Versión del motor (diagnóstico en logs y reportes).
pub const ENGINE_VERSION: u32 = 1;

/// Versión del formato de archivo de snapshots que este motor entiende.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Separador entre el nombre del flujo y la etiqueta del paso en una clave.
pub const KEY_SEPARATOR: &str = "::";

/// Prefijo usado para desambiguar etiquetas repetidas dentro de un flujo
/// ("lista vacía", "lista vacía#2", ...).
pub const OCCURRENCE_MARKER: char = '#';
