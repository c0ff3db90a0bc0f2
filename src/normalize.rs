//! Normalisation des cellules brutes vers des affectations complètes par variante.

use crate::model::{AssignmentKind, AssignmentRecord, RawAssignments, ShiftId};
use crate::template::ShiftTemplates;

/// Convertit le contenu brut d'une cellule en affectations.
///
/// - Forme historique (identifiants seuls) : chaque identifiant devient un
///   `shift` dont les horaires sont copiés depuis le Turno correspondant ; sans
///   Turno connu, l'affectation reste un placeholder.
/// - Forme courante : chaque affectation est reprise telle quelle, `type`
///   valant `shift` s'il est absent. Les horaires explicites ne sont jamais
///   écrasés.
///
/// Idempotent : renormaliser un résultat le laisse inchangé.
pub fn normalize(raw: &RawAssignments, templates: &ShiftTemplates) -> Vec<AssignmentRecord> {
    match raw {
        RawAssignments::LegacyIds(ids) => ids
            .iter()
            .map(|id| from_legacy_id(id, templates))
            .collect(),
        RawAssignments::Current(records) => records.iter().map(normalize_record).collect(),
    }
}

fn from_legacy_id(id: &ShiftId, templates: &ShiftTemplates) -> AssignmentRecord {
    match templates.get(id) {
        Some(turno) => turno.to_assignment(),
        None => {
            #[cfg(feature = "logging")]
            tracing::trace!(shift_id = id.as_str(), "no turno for legacy id, keeping placeholder");
            AssignmentRecord::shift(id.as_str())
        }
    }
}

/// Complète le `type` manquant d'une affectation courante.
pub fn normalize_record(record: &AssignmentRecord) -> AssignmentRecord {
    let mut out = record.clone();
    if out.kind.is_none() {
        out.kind = Some(AssignmentKind::Shift);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::Turno;

    fn templates() -> ShiftTemplates {
        vec![
            Turno::new("m", "Mañana", "06:00", "14:00"),
            Turno::new("c", "Cortado", "08:00", "12:00").with_second("16:00", "20:00"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn legacy_ids_copy_template_hours() {
        let raw = RawAssignments::LegacyIds(vec![ShiftId::new("m"), ShiftId::new("c")]);
        let out = normalize(&raw, &templates());
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], AssignmentRecord::shift("m").hours("06:00", "14:00"));
        assert_eq!(
            out[1],
            AssignmentRecord::shift("c")
                .hours("08:00", "12:00")
                .hours2("16:00", "20:00")
        );
    }

    #[test]
    fn unknown_legacy_id_stays_placeholder() {
        let raw = RawAssignments::LegacyIds(vec![ShiftId::new("zz")]);
        let out = normalize(&raw, &templates());
        assert_eq!(out, vec![AssignmentRecord::shift("zz")]);
        assert!(out[0].is_placeholder());
    }

    #[test]
    fn current_records_keep_explicit_hours() {
        let custom = AssignmentRecord::shift("m").hours("07:00", "15:00");
        let out = normalize(&RawAssignments::Current(vec![custom.clone()]), &templates());
        assert_eq!(out, vec![custom]);
    }

    #[test]
    fn current_placeholder_is_not_hydrated() {
        let placeholder = AssignmentRecord::shift("m");
        let out = normalize(
            &RawAssignments::Current(vec![placeholder.clone()]),
            &templates(),
        );
        assert_eq!(out, vec![placeholder]);
    }

    #[test]
    fn missing_type_defaults_to_shift() {
        let mut record = AssignmentRecord::shift("m");
        record.kind = None;
        let out = normalize(&RawAssignments::Current(vec![record]), &templates());
        assert_eq!(out[0].kind, Some(AssignmentKind::Shift));
    }
}
