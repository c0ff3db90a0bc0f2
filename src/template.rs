use crate::model::{AssignmentRecord, Segment, ShiftId};
use crate::time::Interval;
use crate::validation::{self, ValidationError};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Turno : définition nommée des horaires par défaut d'un shift.
///
/// Un Turno ne possède aucune affectation ; ses horaires ne sont copiés qu'à
/// la création (normalisation) et servent de repli d'affichage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Turno {
    pub id: ShiftId,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Turno {
    pub fn new<N: Into<String>>(id: &str, name: N, start_time: &str, end_time: &str) -> Self {
        Self {
            id: ShiftId::new(id),
            name: name.into(),
            start_time: start_time.to_owned(),
            end_time: end_time.to_owned(),
            start_time2: None,
            end_time2: None,
            color: None,
        }
    }

    /// Ajoute un second segment (turno cortado).
    pub fn with_second(mut self, start_time: &str, end_time: &str) -> Self {
        self.start_time2 = Some(start_time.to_owned());
        self.end_time2 = Some(end_time.to_owned());
        self
    }

    /// Affectation `shift` hydratée avec les horaires du Turno.
    ///
    /// Le second segment n'est copié que s'il est entièrement défini.
    pub fn to_assignment(&self) -> AssignmentRecord {
        let mut record =
            AssignmentRecord::shift(self.id.as_str()).hours(&self.start_time, &self.end_time);
        if let (Some(start), Some(end)) = (&self.start_time2, &self.end_time2) {
            record = record.hours2(start, end);
        }
        record
    }

    /// Intervalles du Turno, dans l'ordre.
    pub fn intervals(&self) -> Result<Vec<Interval>, Vec<ValidationError>> {
        let record = self.to_assignment();
        let mut out = Vec::new();
        for segment in [Segment::First, Segment::Second] {
            if let Some(interval) = validation::segment_interval(&record, segment)? {
                out.push(interval);
            }
        }
        Ok(out)
    }

    pub fn validate(&self) -> Result<()> {
        if self.id.as_str().trim().is_empty() {
            bail!("turno id cannot be empty");
        }
        if self.name.trim().is_empty() {
            bail!("turno {} name cannot be empty", self.id);
        }
        if self.start_time2.is_some() != self.end_time2.is_some() {
            bail!("turno {} second segment needs both startTime2 and endTime2", self.id);
        }
        let report = validation::validate_assignment(&self.to_assignment());
        if let Some(first) = report.errors.first() {
            bail!("turno {}: {first}", self.id);
        }
        Ok(())
    }
}

/// Registre des Turnos, passé explicitement à la normalisation et à l'affichage.
#[derive(Debug, Clone, Default)]
pub struct ShiftTemplates {
    by_id: HashMap<ShiftId, Turno>,
}

impl ShiftTemplates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insère (ou remplace) un Turno ; renvoie l'ancien s'il existait.
    pub fn insert(&mut self, turno: Turno) -> Option<Turno> {
        self.by_id.insert(turno.id.clone(), turno)
    }

    pub fn get(&self, id: &ShiftId) -> Option<&Turno> {
        self.by_id.get(id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Turno> {
        self.by_id.values()
    }
}

impl FromIterator<Turno> for ShiftTemplates {
    fn from_iter<I: IntoIterator<Item = Turno>>(iter: I) -> Self {
        let mut templates = Self::new();
        for turno in iter {
            templates.insert(turno);
        }
        templates
    }
}
