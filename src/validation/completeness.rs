use super::IncompleteReason;
use crate::model::{AssignmentKind, AssignmentRecord, Segment};

/// Toutes les raisons d'incomplétude, dans l'ordre des champs.
///
/// Un shift réduit à `shiftId` (placeholder) est complet : c'est la forme
/// normale des données historiques avant hydratation.
pub fn incompleteness_reasons(record: &AssignmentRecord) -> Vec<IncompleteReason> {
    let mut out = Vec::new();
    let kind = record.kind();
    match kind {
        AssignmentKind::Shift => {
            if record.shift_id().is_none() {
                out.push(IncompleteReason::MissingShiftId);
            }
            for segment in [Segment::First, Segment::Second] {
                if record.segment(segment).is_half() {
                    out.push(IncompleteReason::HalfSegment(segment));
                }
            }
        }
        AssignmentKind::MedioFranco | AssignmentKind::Licencia => {
            if !record.segment(Segment::First).is_full() {
                out.push(IncompleteReason::MissingHours(kind.clone()));
            }
            if *kind == AssignmentKind::Licencia && record.licencia_type().is_none() {
                out.push(IncompleteReason::MissingLicenciaType);
            }
            if record.shift_id().is_some() {
                out.push(IncompleteReason::ForbiddenShiftId(kind.clone()));
            }
        }
        AssignmentKind::Franco => {}
        AssignmentKind::Nota => {
            if record.texto().is_none() {
                out.push(IncompleteReason::MissingTexto);
            }
        }
        AssignmentKind::Unknown(raw) => out.push(IncompleteReason::UnknownKind(raw.clone())),
    }
    out
}

/// Première raison d'incomplétude, `None` si l'affectation est complète.
pub fn incompleteness_reason(record: &AssignmentRecord) -> Option<IncompleteReason> {
    incompleteness_reasons(record).into_iter().next()
}

/// Garde des actions d'édition : jamais `true` pour un placeholder.
pub fn is_incomplete(record: &AssignmentRecord) -> bool {
    !incompleteness_reasons(record).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_start(mut record: AssignmentRecord, start: &str) -> AssignmentRecord {
        record.start_time = Some(start.to_owned());
        record
    }

    #[test]
    fn placeholder_is_complete() {
        let record = AssignmentRecord::shift("s1");
        assert!(!is_incomplete(&record));
        assert_eq!(incompleteness_reason(&record), None);
    }

    #[test]
    fn shift_without_id_is_incomplete() {
        let mut record = AssignmentRecord::shift("").hours("08:00", "12:00");
        assert_eq!(
            incompleteness_reason(&record),
            Some(IncompleteReason::MissingShiftId)
        );
        record.shift_id = None;
        assert!(is_incomplete(&record));
    }

    #[test]
    fn half_first_segment_is_incomplete() {
        let record = with_start(AssignmentRecord::shift("s1"), "08:00");
        assert!(is_incomplete(&record));
        assert_eq!(
            incompleteness_reason(&record),
            Some(IncompleteReason::HalfSegment(Segment::First))
        );
    }

    #[test]
    fn half_second_segment_is_incomplete() {
        let mut record = AssignmentRecord::shift("s1").hours("08:00", "12:00");
        record.end_time2 = Some("20:00".to_owned());
        assert_eq!(
            incompleteness_reasons(&record),
            vec![IncompleteReason::HalfSegment(Segment::Second)]
        );
    }

    #[test]
    fn one_or_two_full_segments_are_complete() {
        let single = AssignmentRecord::shift("s1").hours("08:00", "12:00");
        let split = single.clone().hours2("16:00", "20:00");
        let second_only = AssignmentRecord::shift("s1").hours2("16:00", "20:00");
        assert!(!is_incomplete(&single));
        assert!(!is_incomplete(&split));
        assert!(!is_incomplete(&second_only));
    }

    #[test]
    fn licencia_requires_type() {
        let record = AssignmentRecord::licencia("10:00", "11:00", "");
        assert!(is_incomplete(&record));
        assert_eq!(
            incompleteness_reason(&record),
            Some(IncompleteReason::MissingLicenciaType)
        );
    }

    #[test]
    fn medio_franco_rejects_shift_reference() {
        let mut record = AssignmentRecord::medio_franco("13:00", "17:00");
        assert!(!is_incomplete(&record));
        record.shift_id = Some(crate::model::ShiftId::new("s1"));
        assert_eq!(
            incompleteness_reasons(&record),
            vec![IncompleteReason::ForbiddenShiftId(AssignmentKind::MedioFranco)]
        );
    }

    #[test]
    fn collects_every_reason() {
        let mut record = AssignmentRecord {
            kind: Some(AssignmentKind::Licencia),
            ..AssignmentRecord::default()
        };
        record.shift_id = Some(crate::model::ShiftId::new("s1"));
        assert_eq!(incompleteness_reasons(&record).len(), 3);
    }

    #[test]
    fn franco_and_nota() {
        assert!(!is_incomplete(&AssignmentRecord::franco()));
        assert!(!is_incomplete(&AssignmentRecord::nota("llega tarde")));
        assert!(is_incomplete(&AssignmentRecord::nota("   ")));
    }

    #[test]
    fn unknown_type_is_incomplete() {
        let record = AssignmentRecord {
            kind: Some(AssignmentKind::Unknown("guardia".into())),
            ..AssignmentRecord::default()
        };
        assert_eq!(
            incompleteness_reason(&record),
            Some(IncompleteReason::UnknownKind("guardia".into()))
        );
    }
}
