//! Motifs récurrents par (employé, jour de semaine) et suggestions de pré-remplissage.
//!
//! Seules les semaines `completed` sont prises en compte, dans une fenêtre de
//! `window_weeks` semaines comptée depuis la date close la plus récente.
//! Les semaines commencent le lundi. Une suggestion n'est qu'un conseil :
//! l'appliquer repasse par la normalisation et [`crate::validate_cell`].

use crate::model::{AssignmentRecord, EmployeeId, RawAssignments};
use crate::normalize::normalize;
use crate::schedule::{monday_of, Horario};
use crate::template::ShiftTemplates;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Options d'analyse
#[derive(Debug, Clone, Copy)]
pub struct PatternOptions {
    pub window_weeks: u32,
    pub min_consecutive_weeks: u32,
}

impl Default for PatternOptions {
    fn default() -> Self {
        Self {
            window_weeks: 12,
            min_consecutive_weeks: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pattern {
    pub employee_id: EmployeeId,
    pub day_of_week: Weekday,
    pub signature: String,
    /// Affectations dans l'ordre canonique.
    pub assignments: Vec<AssignmentRecord>,
    pub frequency: u32,
    pub consecutive_weeks: u32,
    /// Lundi de la dernière semaine où le motif a été vu.
    pub last_seen_week: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub employee_id: EmployeeId,
    pub day_of_week: Weekday,
    pub assignments: Vec<AssignmentRecord>,
    /// `min(consecutive_weeks / 10, 1)`
    pub confidence: f64,
    pub consecutive_weeks: u32,
    pub frequency: u32,
}

fn sort_key(record: &AssignmentRecord) -> [&str; 8] {
    [
        record.kind().as_str(),
        record.shift_id().map_or("", |id| id.as_str()),
        record.start_time.as_deref().unwrap_or(""),
        record.end_time.as_deref().unwrap_or(""),
        record.start_time2.as_deref().unwrap_or(""),
        record.end_time2.as_deref().unwrap_or(""),
        record.licencia_type.as_deref().unwrap_or(""),
        record.texto.as_deref().unwrap_or(""),
    ]
}

fn canonical(mut records: Vec<AssignmentRecord>) -> Vec<AssignmentRecord> {
    records.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
    records
}

fn render(records: &[AssignmentRecord]) -> String {
    records
        .iter()
        .map(|r| sort_key(r).join(":"))
        .collect::<Vec<_>>()
        .join("|")
}

/// Signature indépendante de l'ordre d'insertion.
pub fn signature(records: &[AssignmentRecord]) -> String {
    render(&canonical(records.to_vec()))
}

struct Observation {
    week: NaiveDate,
    date: NaiveDate,
    records: Vec<AssignmentRecord>,
}

/// Extrait les motifs d'un employé depuis l'historique.
pub fn analyze_patterns(
    employee: &EmployeeId,
    schedules: &[Horario],
    templates: &ShiftTemplates,
    opts: &PatternOptions,
) -> Vec<Pattern> {
    let completed: Vec<&Horario> = schedules.iter().filter(|h| h.completed).collect();

    // Une date présente dans plusieurs semaines closes : la dernière copie gagne.
    let mut cells: BTreeMap<NaiveDate, Option<&RawAssignments>> = BTreeMap::new();
    for horario in &completed {
        for (date, row) in &horario.assignments {
            cells.insert(*date, row.get(employee));
        }
    }

    let Some(newest) = cells.keys().map(|date| monday_of(*date)).max() else {
        return Vec::new();
    };
    if opts.window_weeks == 0 {
        return Vec::new();
    }
    let oldest = Duration::try_weeks(i64::from(opts.window_weeks) - 1)
        .and_then(|span| newest.checked_sub_signed(span))
        .unwrap_or(NaiveDate::MIN);

    // `cells` est trié par date : les observations sont chronologiques.
    let observations: Vec<Observation> = cells
        .into_iter()
        .filter(|(date, _)| monday_of(*date) >= oldest)
        .filter_map(|(date, raw)| {
            let records = normalize(raw?, templates);
            (!records.is_empty()).then(|| Observation {
                week: monday_of(date),
                date,
                records,
            })
        })
        .collect();

    let mut by_key: BTreeMap<(u32, String), Pattern> = BTreeMap::new();
    for obs in observations {
        let assignments = canonical(obs.records);
        let signature = render(&assignments);
        let weekday = obs.date.weekday();
        match by_key.entry((weekday.num_days_from_monday(), signature.clone())) {
            Entry::Vacant(slot) => {
                slot.insert(Pattern {
                    employee_id: employee.clone(),
                    day_of_week: weekday,
                    signature,
                    assignments,
                    frequency: 1,
                    consecutive_weeks: 1,
                    last_seen_week: obs.week,
                });
            }
            Entry::Occupied(mut slot) => {
                let pattern = slot.get_mut();
                pattern.frequency += 1;
                let gap = (obs.week - pattern.last_seen_week).num_weeks();
                if gap == 1 {
                    pattern.consecutive_weeks += 1;
                } else if gap > 1 {
                    pattern.consecutive_weeks = 1;
                }
                pattern.last_seen_week = obs.week;
            }
        }
    }

    let mut out: Vec<Pattern> = by_key.into_values().collect();
    out.sort_by_key(|p| {
        (
            p.day_of_week.num_days_from_monday(),
            Reverse(p.consecutive_weeks),
            Reverse(p.frequency),
            p.signature.clone(),
        )
    });

    #[cfg(feature = "logging")]
    tracing::debug!(
        employee = employee.as_str(),
        schedules = completed.len(),
        patterns = out.len(),
        "pattern analysis done"
    );

    out
}

/// Suggestion pour un jour de semaine, si un motif tient depuis assez longtemps.
///
/// Plusieurs motifs éligibles : la plus longue série gagne, puis le plus
/// récent, puis le plus fréquent.
pub fn suggest(
    employee: &EmployeeId,
    day_of_week: Weekday,
    patterns: &[Pattern],
    opts: &PatternOptions,
) -> Option<Suggestion> {
    patterns
        .iter()
        .filter(|p| {
            &p.employee_id == employee
                && p.day_of_week == day_of_week
                && p.consecutive_weeks >= opts.min_consecutive_weeks
        })
        .max_by_key(|p| (p.consecutive_weeks, p.last_seen_week, p.frequency))
        .map(|p| Suggestion {
            employee_id: p.employee_id.clone(),
            day_of_week,
            assignments: p.assignments.clone(),
            confidence: (f64::from(p.consecutive_weeks) / 10.0).min(1.0),
            consecutive_weeks: p.consecutive_weeks,
            frequency: p.frequency,
        })
}

/// Suggestions pour les sept jours d'une nouvelle semaine.
pub fn suggest_week(
    employee: &EmployeeId,
    week_start: NaiveDate,
    patterns: &[Pattern],
    opts: &PatternOptions,
) -> BTreeMap<NaiveDate, Suggestion> {
    (0..7)
        .map(|offset| week_start + Duration::days(offset))
        .filter_map(|date| {
            suggest(employee, date.weekday(), patterns, opts).map(|s| (date, s))
        })
        .collect()
}
