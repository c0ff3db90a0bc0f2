use crate::model::{AssignmentRecord, EmployeeId, RawAssignments};
use crate::normalize::normalize;
use crate::template::ShiftTemplates;
use crate::validation::{validate_cell, CellValidation};
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Horario : semaine de planning, `date -> employé -> affectations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Horario {
    pub week_start: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Semaine close : toute modification demande une confirmation explicite.
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub assignments: BTreeMap<NaiveDate, BTreeMap<EmployeeId, RawAssignments>>,
}

/// Options d'écriture d'une cellule
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteOptions {
    /// Autorise la modification d'une semaine marquée `completed`.
    pub confirm_completed: bool,
}

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("date {date} is outside the week starting {week_start}")]
    DateOutsideWeek {
        date: NaiveDate,
        week_start: NaiveDate,
    },
    #[error("schedule for week {0} is completed: confirmation required")]
    ConfirmationRequired(NaiveDate),
    #[error("cell rejected with {} error(s)", .0.errors.len())]
    CellRejected(CellValidation),
}

/// Résultat de validation d'une cellule existante.
#[derive(Debug, Clone)]
pub struct CellReport {
    pub date: NaiveDate,
    pub employee: EmployeeId,
    pub validation: CellValidation,
}

impl Horario {
    pub fn new(week_start: NaiveDate) -> Self {
        Self {
            week_start,
            name: None,
            completed: false,
            assignments: BTreeMap::new(),
        }
    }

    /// Lundi de la semaine couverte.
    pub fn monday(&self) -> NaiveDate {
        monday_of(self.week_start)
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.week_start && date < self.week_start + Duration::days(7)
    }

    pub fn cell(&self, date: NaiveDate, employee: &EmployeeId) -> Option<&RawAssignments> {
        self.assignments.get(&date).and_then(|row| row.get(employee))
    }

    /// Cellule normalisée (vide si absente).
    pub fn normalized_cell(
        &self,
        date: NaiveDate,
        employee: &EmployeeId,
        templates: &ShiftTemplates,
    ) -> Vec<AssignmentRecord> {
        self.cell(date, employee)
            .map(|raw| normalize(raw, templates))
            .unwrap_or_default()
    }

    /// Employés présents dans la semaine, triés.
    pub fn employees(&self) -> Vec<&EmployeeId> {
        let mut out: Vec<&EmployeeId> = self
            .assignments
            .values()
            .flat_map(|row| row.keys())
            .collect();
        out.sort();
        out.dedup();
        out
    }

    /// Remplace d'un bloc le contenu d'une cellule.
    ///
    /// La cellule est validée avant écriture ; en cas d'erreur rien n'est
    /// modifié. Une liste vide efface la cellule. En cas de succès, renvoie
    /// la validation (et donc ses avertissements).
    pub fn replace_cell(
        &mut self,
        date: NaiveDate,
        employee: &EmployeeId,
        records: Vec<AssignmentRecord>,
        opts: WriteOptions,
    ) -> Result<CellValidation, ScheduleError> {
        if !self.contains_date(date) {
            return Err(ScheduleError::DateOutsideWeek {
                date,
                week_start: self.week_start,
            });
        }
        if self.completed && !opts.confirm_completed {
            return Err(ScheduleError::ConfirmationRequired(self.week_start));
        }

        let report = validate_cell(&records);
        if !report.is_valid() {
            #[cfg(feature = "logging")]
            tracing::debug!(%date, employee = employee.as_str(), "write refused");
            return Err(ScheduleError::CellRejected(report));
        }

        if records.is_empty() {
            if let Some(row) = self.assignments.get_mut(&date) {
                row.remove(employee);
                if row.is_empty() {
                    self.assignments.remove(&date);
                }
            }
        } else {
            self.assignments
                .entry(date)
                .or_default()
                .insert(employee.clone(), RawAssignments::Current(records));
        }
        Ok(report)
    }

    /// Normalise et valide chaque cellule de la semaine.
    pub fn validate_all(&self, templates: &ShiftTemplates) -> Vec<CellReport> {
        let mut out = Vec::new();
        for (date, row) in &self.assignments {
            for (employee, raw) in row {
                let records = normalize(raw, templates);
                out.push(CellReport {
                    date: *date,
                    employee: employee.clone(),
                    validation: validate_cell(&records),
                });
            }
        }
        out
    }

    /// Copie dont toutes les cellules sont sous forme courante.
    pub fn normalized(&self, templates: &ShiftTemplates) -> Horario {
        let mut out = self.clone();
        for row in out.assignments.values_mut() {
            for raw in row.values_mut() {
                *raw = RawAssignments::Current(normalize(raw, templates));
            }
        }
        out
    }
}

pub(crate) fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}
