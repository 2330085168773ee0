//! Volcado textual del reporte.
//!
//! Una línea `PASS`/`FAIL` por flujo; para los fallos se agrega el detalle
//! del paso y, en los mismatches, un diff línea a línea entre el snapshot
//! esperado y el valor actual (ambos en JSON pretty con claves ordenadas).

use std::io::{self, Write};

use difference::{Changeset, Difference};
use serde_json::Value;
use termcolor::{Color, ColorChoice, ColorSpec, NoColor, StandardStream, WriteColor};

use super::types::{FlowReport, Outcome, RunReport, StepResult};
use crate::errors::StepError;

/// Escribe el reporte en stdout con colores si la terminal los soporta.
pub fn render_report(report: &RunReport) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    write_report(&mut stdout, report)
}

/// Render sin colores hacia un `String` (tests y archivado).
pub fn report_to_string(report: &RunReport) -> String {
    let mut sink = NoColor::new(Vec::new());
    let _ = write_report(&mut sink, report);
    String::from_utf8_lossy(&sink.into_inner()).into_owned()
}

pub fn write_report<W: WriteColor>(w: &mut W, report: &RunReport) -> io::Result<()> {
    for flow in &report.flows {
        write_flow(w, flow)?;
    }
    writeln!(w)?;
    writeln!(w,
             "run {}: {} passed, {} failed ({} flows)",
             report.run_id,
             report.passed_flows(),
             report.failed_flows(),
             report.flows.len())
}

fn write_flow<W: WriteColor>(w: &mut W, flow: &FlowReport) -> io::Result<()> {
    match flow.outcome {
        Outcome::Passed => {
            w.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
            writeln!(w, "{}: PASS ({} steps)", flow.flow_name, flow.executed())?;
            w.reset()
        }
        Outcome::Failed => {
            w.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
            writeln!(w, "{}: FAIL", flow.flow_name)?;
            w.reset()?;
            if let Some((index, step)) = flow.failed_step() {
                write_failure(w, index, step)?;
            }
            Ok(())
        }
    }
}

fn write_failure<W: WriteColor>(w: &mut W, index: usize, step: &StepResult) -> io::Result<()> {
    match &step.error {
        Some(StepError::OperationFailure { reason }) => {
            writeln!(w, "  step {} [{}] '{}': operation failed: {}", index + 1, step.kind, step.label, reason)
        }
        Some(StepError::AssertionMismatch { key, expected, actual }) => {
            writeln!(w, "  step {} [{}] '{}': snapshot mismatch", index + 1, step.kind, step.label)?;
            writeln!(w, "  key: {key}")?;
            write_value_diff(w, expected, actual)
        }
        None => Ok(()),
    }
}

/// Diff esperado → actual: líneas `-` (rojo) sólo en el snapshot, `+`
/// (verde) sólo en el valor actual.
fn write_value_diff<W: WriteColor>(w: &mut W, expected: &Value, actual: &Value) -> io::Result<()> {
    let left = pretty(expected);
    let right = pretty(actual);
    let changeset = Changeset::new(&left, &right, "\n");
    for diff in &changeset.diffs {
        match diff {
            Difference::Same(chunk) => {
                w.reset()?;
                for line in chunk.lines() {
                    writeln!(w, "   {line}")?;
                }
            }
            Difference::Rem(chunk) => {
                w.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
                for line in chunk.lines() {
                    writeln!(w, "  -{line}")?;
                }
            }
            Difference::Add(chunk) => {
                w.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
                for line in chunk.lines() {
                    writeln!(w, "  +{line}")?;
                }
            }
        }
    }
    w.reset()
}

// serde_json ordena claves de objetos, así que el pretty es estable y el
// diff no inventa diferencias por orden de inserción.
fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
