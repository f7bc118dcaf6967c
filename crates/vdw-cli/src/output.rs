use crate::error::Result;
use halvdw::workflows::evaluate::Evaluation;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::info;

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
struct ForceRow {
    particle: usize,
    fx: f64,
    fy: f64,
    fz: f64,
}

fn rows(evaluation: &Evaluation) -> impl Iterator<Item = ForceRow> + '_ {
    evaluation
        .forces
        .iter()
        .enumerate()
        .map(|(particle, f)| ForceRow {
            particle,
            fx: f.x,
            fy: f.y,
            fz: f.z,
        })
}

/// Writes `particle,fx,fy,fz` with a header row.
pub fn write_forces_csv(evaluation: &Evaluation, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows(evaluation) {
        writer.serialize(row)?;
    }
    writer.flush()?;
    info!(
        "Wrote forces for {} particles to {:?}.",
        evaluation.forces.len(),
        path
    );
    Ok(())
}

pub fn print_summary<W: Write>(evaluation: &Evaluation, out: &mut W) -> Result<()> {
    writeln!(out, "Total vdW energy: {:.10} kcal/mol", evaluation.energy)?;
    writeln!(
        out,
        "{:>8}  {:>18}  {:>18}  {:>18}",
        "particle", "fx", "fy", "fz"
    )?;
    for row in rows(evaluation) {
        writeln!(
            out,
            "{:>8}  {:>18.10}  {:>18.10}  {:>18.10}",
            row.particle, row.fx, row.fy, row.fz
        )?;
    }
    Ok(())
}
