use std::io::Write;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::ReportError;
use crate::{EnumerationStats, Equilibrium, EquilibriumStore, PivotRun, SolverConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
pub enum ReportFormat {
    /// Strategy and probability of every label in the support.
    #[default]
    Table,
    /// One `NE,p1,...,pn` record per equilibrium, as printed by Gambit.
    Gambit,
    /// Number of pivoting steps and support size.
    Summary,
    /// JSON document with the configuration and the equilibria.
    Json,
}

/// Game dimensions and solver settings a report is produced for.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReportContext {
    pub dim1: usize,
    pub dim2: usize,
    pub config: SolverConfig,
}

#[derive(Serialize)]
struct RunReport<'a> {
    #[serde(flatten)]
    context: &'a ReportContext,
    start: isize,
    steps: usize,
    equilibrium: &'a Equilibrium,
}

#[derive(Serialize)]
struct EnumerationReport<'a> {
    #[serde(flatten)]
    context: &'a ReportContext,
    stats: &'a EnumerationStats,
    equilibria: &'a EquilibriumStore,
}

fn ordinal(k: usize) -> String {
    let suffix = match (k % 10, k % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{k}{suffix}")
}

/// Gambit record of `eq`: one probability per label, zero outside the support.
pub fn gambit_record(eq: &Equilibrium, num_labels: usize) -> Vec<String> {
    let mut record = vec!["NE".to_owned()];
    record.extend((1..=num_labels).map(|label| {
        if eq.labels().any(|l| l == label) {
            format!("{:.8}", eq.probability(label))
        } else {
            "0".to_owned()
        }
    }));
    record
}

fn write_gambit<'a, W, I>(w: &mut W, equilibria: I, num_labels: usize) -> Result<(), ReportError>
where
    W: Write,
    I: IntoIterator<Item = &'a Equilibrium>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_writer(w);
    for eq in equilibria {
        writer.write_record(gambit_record(eq, num_labels))?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the result of a single Lemke-Howson path started from label `start`.
pub fn write_run<W: Write>(
    w: &mut W,
    run: &PivotRun,
    start: isize,
    context: &ReportContext,
    format: ReportFormat,
) -> Result<(), ReportError> {
    match format {
        ReportFormat::Summary => {
            writeln!(w, "{} {}", run.steps, run.equilibrium.support_size())?;
            return Ok(());
        }
        ReportFormat::Json => {
            let report = RunReport {
                context,
                start,
                steps: run.steps,
                equilibrium: &run.equilibrium,
            };
            serde_json::to_writer_pretty(&mut *w, &report)?;
            writeln!(w)?;
            return Ok(());
        }
        ReportFormat::Table => write!(w, "\n{}\n", run.equilibrium)?,
        ReportFormat::Gambit => {
            write_gambit(w, [&run.equilibrium], context.dim1 + context.dim2)?
        }
    }
    writeln!(
        w,
        "Number of complementary pivoting steps performed by the algorithm: {}",
        run.steps
    )?;
    Ok(())
}

/// Writes the equilibria found by an enumeration.
pub fn write_equilibria<W: Write>(
    w: &mut W,
    equilibria: &EquilibriumStore,
    stats: &EnumerationStats,
    context: &ReportContext,
    format: ReportFormat,
) -> Result<(), ReportError> {
    match format {
        ReportFormat::Table => {
            for (i, eq) in equilibria.iter().enumerate() {
                write!(w, "{} equilibrium:\n\n{}\n", ordinal(i + 1), eq)?;
            }
        }
        ReportFormat::Gambit => write_gambit(w, equilibria, context.dim1 + context.dim2)?,
        ReportFormat::Summary => {
            for (i, eq) in equilibria.iter().enumerate() {
                writeln!(w, "{} {}", i + 1, eq.support_size())?;
            }
        }
        ReportFormat::Json => {
            let report = EnumerationReport {
                context,
                stats,
                equilibria,
            };
            serde_json::to_writer_pretty(&mut *w, &report)?;
            writeln!(w)?;
        }
    }
    Ok(())
}
