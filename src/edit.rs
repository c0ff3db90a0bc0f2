//! Éditions d'un shift champ par champ, sans perte du second segment.

use crate::model::{AssignmentRecord, Segment};
use crate::validation::{self, Validation, ValidationError};

/// Remplace le premier segment ; le second est conservé tel quel.
pub fn with_first_segment(record: &AssignmentRecord, start: &str, end: &str) -> AssignmentRecord {
    record.clone().hours(start, end)
}

/// Remplace (ou ajoute) le second segment ; le premier est conservé tel quel.
pub fn with_second_segment(record: &AssignmentRecord, start: &str, end: &str) -> AssignmentRecord {
    record.clone().hours2(start, end)
}

/// Retire explicitement le second segment (le shift redevient simple).
pub fn without_second_segment(record: &AssignmentRecord) -> AssignmentRecord {
    let mut out = record.clone();
    out.start_time2 = None;
    out.end_time2 = None;
    out
}

/// Vérifie qu'une édition garde un turno cortado valide.
///
/// Sans objet (rapport vide) si `before` n'était pas un turno cortado. Sinon
/// `after` doit rester un turno cortado : un second segment disparu donne
/// [`ValidationError::SegmentDropped`], des segments qui se chevauchent après
/// un ajout d'heures donnent [`ValidationError::SplitOrder`]. Pour repasser en
/// shift simple, passer par [`without_second_segment`].
pub fn check_split_edit(before: &AssignmentRecord, after: &AssignmentRecord) -> Validation {
    if !validation::is_split_shift(before) {
        return Validation::default();
    }
    let mut report = validation::validate_split_shift(after);
    for error in report.errors.iter_mut() {
        if *error == ValidationError::NotSplit(Segment::Second) {
            *error = ValidationError::SegmentDropped;
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split() -> AssignmentRecord {
        AssignmentRecord::shift("c")
            .hours("08:00", "12:00")
            .hours2("16:00", "20:00")
    }

    #[test]
    fn first_segment_edit_keeps_second() {
        let edited = with_first_segment(&split(), "09:00", "13:00");
        assert_eq!(edited.start_time.as_deref(), Some("09:00"));
        assert_eq!(edited.start_time2.as_deref(), Some("16:00"));
        assert_eq!(edited.end_time2.as_deref(), Some("20:00"));
        assert!(check_split_edit(&split(), &edited).is_valid());
    }

    #[test]
    fn overtime_into_second_segment_is_rejected() {
        let edited = with_first_segment(&split(), "08:00", "17:00");
        let report = check_split_edit(&split(), &edited);
        assert!(matches!(
            report.errors.as_slice(),
            [ValidationError::SplitOrder { .. }]
        ));
    }

    #[test]
    fn overtime_up_to_second_start_is_allowed() {
        let edited = with_first_segment(&split(), "08:00", "16:00");
        assert!(check_split_edit(&split(), &edited).is_valid());
    }

    #[test]
    fn dropping_second_segment_is_flagged() {
        let mut edited = split();
        edited.end_time2 = None;
        edited.start_time2 = None;
        assert_eq!(
            check_split_edit(&split(), &edited).errors,
            vec![ValidationError::SegmentDropped]
        );
        assert_eq!(without_second_segment(&split()), edited);
    }

    #[test]
    fn single_shift_edits_are_unchecked() {
        let single = AssignmentRecord::shift("m").hours("06:00", "14:00");
        let edited = with_second_segment(&single, "18:00", "22:00");
        assert!(check_split_edit(&single, &edited).is_valid());
        assert!(validation::is_split_shift(&edited));
    }
}
