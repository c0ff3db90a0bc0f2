use super::{util, Validation, ValidationError};
use crate::model::{AssignmentKind, AssignmentRecord, Segment};
use crate::time::Interval;

/// Intervalle occupé par une affectation de la cellule.
struct Occupied<'a> {
    index: usize,
    record: &'a AssignmentRecord,
    interval: Interval,
}

impl Occupied<'_> {
    fn label(&self) -> String {
        let split = !self.record.segment(Segment::Second).is_absent()
            && !self.record.segment(Segment::First).is_absent();
        if split {
            format!("{} [{}]", self.record.describe(), self.interval)
        } else {
            self.record.describe()
        }
    }
}

fn occupied(index: usize, record: &AssignmentRecord) -> Vec<Occupied<'_>> {
    let segments: &[Segment] = match record.kind() {
        AssignmentKind::Shift => &[Segment::First, Segment::Second],
        AssignmentKind::MedioFranco | AssignmentKind::Licencia => &[Segment::First],
        // franco coexiste avec tout ; nota et types inconnus n'occupent rien
        AssignmentKind::Franco | AssignmentKind::Nota | AssignmentKind::Unknown(_) => &[],
    };
    segments
        .iter()
        // segments illisibles ou vides : signalés par la validation unitaire
        .filter_map(|segment| util::segment_interval(record, *segment).ok().flatten())
        .map(|interval| Occupied {
            index,
            record,
            interval,
        })
        .collect()
}

/// Une licencia est informative : elle se superpose à un shift ou un medio_franco.
fn may_coexist(a: &AssignmentKind, b: &AssignmentKind) -> bool {
    use AssignmentKind::*;
    matches!(
        (a, b),
        (Licencia, Shift | MedioFranco) | (Shift | MedioFranco, Licencia)
    )
}

/// Vérifie que les affectations d'une cellule ne se chevauchent pas deux à deux.
///
/// Les deux segments d'un même turno cortado ne sont pas comparés entre eux
/// (règle d'ordre interne, voir [`super::validate_split_shift`]).
pub fn validate_no_overlaps(cell: &[AssignmentRecord]) -> Validation {
    let mut report = Validation::default();
    let intervals: Vec<Occupied<'_>> = cell
        .iter()
        .enumerate()
        .flat_map(|(index, record)| occupied(index, record))
        .collect();

    for (idx, a) in intervals.iter().enumerate() {
        for b in intervals.iter().skip(idx + 1) {
            if a.index == b.index || may_coexist(a.record.kind(), b.record.kind()) {
                continue;
            }
            if a.interval.overlaps(&b.interval) {
                report.push(ValidationError::Overlap {
                    first: a.label(),
                    second: b.label(),
                });
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shift(id: &str, start: &str, end: &str) -> AssignmentRecord {
        AssignmentRecord::shift(id).hours(start, end)
    }

    #[test]
    fn touching_intervals_are_valid() {
        let merged = vec![AssignmentRecord::shift("s1")
            .hours("08:00", "14:00")
            .hours2("14:00", "18:00")];
        assert!(validate_no_overlaps(&merged).is_valid());

        let separate = vec![shift("s1", "08:00", "14:00"), shift("s2", "14:00", "18:00")];
        assert!(validate_no_overlaps(&separate).is_valid());
    }

    #[test]
    fn overlapping_pair_is_invalid() {
        let cell = vec![shift("s1", "08:00", "12:00"), shift("s2", "10:00", "14:00")];
        let report = validate_no_overlaps(&cell);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(
            report.errors[0].to_string(),
            "shift s1 08:00-12:00 overlaps shift s2 10:00-14:00"
        );
    }

    #[test]
    fn midnight_crossing_pairs() {
        let bad = vec![shift("n", "22:00", "02:00"), shift("m", "01:00", "05:00")];
        assert!(!validate_no_overlaps(&bad).is_valid());
        let ok = vec![shift("n", "22:00", "02:00"), shift("m", "03:00", "06:00")];
        assert!(validate_no_overlaps(&ok).is_valid());
    }

    #[test]
    fn franco_coexists_with_anything() {
        let cell = vec![AssignmentRecord::franco(), shift("s1", "08:00", "16:00")];
        assert!(validate_no_overlaps(&cell).is_valid());
    }

    #[test]
    fn licencia_overlays_worked_time() {
        let cell = vec![
            shift("s1", "08:00", "16:00"),
            AssignmentRecord::licencia("08:00", "16:00", "enfermedad"),
            AssignmentRecord::medio_franco("16:00", "20:00"),
        ];
        assert!(validate_no_overlaps(&cell).is_valid());

        let two_leaves = vec![
            AssignmentRecord::licencia("08:00", "12:00", "estudio"),
            AssignmentRecord::licencia("10:00", "14:00", "enfermedad"),
        ];
        assert!(!validate_no_overlaps(&two_leaves).is_valid());
    }

    #[test]
    fn medio_franco_against_shift() {
        let cell = vec![
            shift("s1", "08:00", "14:00"),
            AssignmentRecord::medio_franco("13:00", "17:00"),
        ];
        assert!(!validate_no_overlaps(&cell).is_valid());
    }

    #[test]
    fn each_split_segment_is_checked_against_others() {
        let cell = vec![
            AssignmentRecord::shift("s1")
                .hours("08:00", "12:00")
                .hours2("16:00", "20:00"),
            shift("s2", "11:00", "17:00"),
        ];
        let report = validate_no_overlaps(&cell);
        assert_eq!(report.errors.len(), 2);
        assert!(report.errors[0]
            .to_string()
            .starts_with("shift s1 08:00-12:00 / 16:00-20:00 [08:00-12:00] overlaps"));
    }

    #[test]
    fn placeholders_and_notes_occupy_nothing() {
        let cell = vec![
            AssignmentRecord::shift("s1"),
            AssignmentRecord::shift("s2"),
            AssignmentRecord::nota("cubre a Juan"),
        ];
        assert!(validate_no_overlaps(&cell).is_valid());
    }
}
