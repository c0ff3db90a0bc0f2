use crate::schedule::{CellReport, Horario};
use crate::template::{ShiftTemplates, Turno};
use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Un fichier d'historique contient un Horario seul ou une liste.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<Horario>),
    One(Box<Horario>),
}

/// Charge un ou plusieurs Horarios depuis un fichier JSON.
pub fn load_schedules_json<P: AsRef<Path>>(path: P) -> Result<Vec<Horario>> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let parsed: OneOrMany = serde_json::from_slice(&data)
        .with_context(|| format!("parsing schedules {}", path.display()))?;
    Ok(match parsed {
        OneOrMany::Many(list) => list,
        OneOrMany::One(horario) => vec![*horario],
    })
}

/// Charge le registre de Turnos (tableau JSON) ; chaque Turno est validé.
pub fn load_templates_json<P: AsRef<Path>>(path: P) -> Result<ShiftTemplates> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let turnos: Vec<Turno> = serde_json::from_slice(&data)
        .with_context(|| format!("parsing turnos {}", path.display()))?;
    for turno in &turnos {
        turno
            .validate()
            .with_context(|| format!("invalid turno in {}", path.display()))?;
    }
    Ok(turnos.into_iter().collect())
}

/// Export JSON d'un Horario (jolie mise en forme)
pub fn export_schedule_json<P: AsRef<Path>>(path: P, horario: &Horario) -> Result<()> {
    let s = serde_json::to_string_pretty(horario)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export JSON d'une liste d'Horarios
pub fn export_schedules_json<P: AsRef<Path>>(path: P, horarios: &[Horario]) -> Result<()> {
    let s = serde_json::to_string_pretty(horarios)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV des rapports: header `date,employee_id,severity,message`
pub fn export_report_csv<P: AsRef<Path>>(path: P, reports: &[CellReport]) -> Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["date", "employee_id", "severity", "message"])?;
    for report in reports {
        let date = report.date.to_string();
        for error in &report.validation.errors {
            w.write_record([
                date.as_str(),
                report.employee.as_str(),
                "error",
                error.to_string().as_str(),
            ])?;
        }
        for warning in &report.validation.warnings {
            w.write_record([
                date.as_str(),
                report.employee.as_str(),
                "warning",
                warning.to_string().as_str(),
            ])?;
        }
    }
    w.flush()?;
    Ok(())
}
