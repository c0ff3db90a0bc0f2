use super::{
    validate_assignment, validate_no_overlaps, CellError, CellValidation, CellWarning,
};
use crate::model::{AssignmentKind, AssignmentRecord, Segment};

fn warnings_for(index: usize, record: &AssignmentRecord) -> Option<CellWarning> {
    let ignored = match record.kind() {
        AssignmentKind::Shift => {
            return match record.shift_id() {
                Some(shift_id) if record.is_placeholder() => Some(CellWarning::PendingHydration {
                    index,
                    shift_id: shift_id.clone(),
                }),
                _ => None,
            };
        }
        AssignmentKind::Franco => {
            record.shift_id().is_some()
                || record.has_time_fields()
                || record.licencia_type().is_some()
                || record.texto().is_some()
        }
        AssignmentKind::Nota => record.shift_id().is_some() || record.has_time_fields(),
        AssignmentKind::MedioFranco | AssignmentKind::Licencia => {
            !record.segment(Segment::Second).is_absent()
        }
        AssignmentKind::Unknown(_) => false,
    };
    ignored.then(|| CellWarning::IgnoredFields {
        index,
        description: record.describe(),
    })
}

/// Point d'entrée unique avant toute écriture d'une cellule.
///
/// Valide chaque affectation (erreurs préfixées par sa description), puis les
/// chevauchements. Une cellule dont `errors` n'est pas vide ne doit pas être
/// écrite, même partiellement.
pub fn validate_cell(cell: &[AssignmentRecord]) -> CellValidation {
    let mut out = CellValidation::default();

    for (index, record) in cell.iter().enumerate() {
        let report = validate_assignment(record);
        if !report.is_valid() {
            let description = record.describe();
            out.errors
                .extend(report.errors.into_iter().map(|error| CellError::Assignment {
                    index,
                    description: description.clone(),
                    error,
                }));
        }
        out.warnings.extend(warnings_for(index, record));
    }

    let francos = cell
        .iter()
        .filter(|r| *r.kind() == AssignmentKind::Franco)
        .count();
    if francos > 1 {
        out.warnings
            .push(CellWarning::DuplicateFranco { count: francos });
    }

    out.errors.extend(
        validate_no_overlaps(cell)
            .errors
            .into_iter()
            .map(CellError::Overlap),
    );

    #[cfg(feature = "logging")]
    if !out.is_valid() {
        tracing::debug!(
            assignments = cell.len(),
            errors = out.errors.len(),
            "cell rejected"
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cell_is_valid() {
        let report = validate_cell(&[]);
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn errors_are_prefixed_with_description() {
        let mut half = AssignmentRecord::shift("s1");
        half.start_time = Some("08:00".to_owned());
        let report = validate_cell(&[half]);
        assert_eq!(report.errors.len(), 1);
        insta::assert_snapshot!(
            report.errors[0].to_string(),
            @"shift s1 08:00-?: incomplete: first segment has only one of its two times"
        );
    }

    #[test]
    fn unions_record_and_overlap_errors() {
        let cell = vec![
            AssignmentRecord::shift("s1").hours("08:00", "12:00"),
            AssignmentRecord::shift("s2").hours("10:00", "14:00"),
            AssignmentRecord::licencia("08:00", "09:00", "siesta"),
        ];
        let report = validate_cell(&cell);
        assert_eq!(report.errors.len(), 2);
        assert!(matches!(
            report.errors[0],
            CellError::Assignment { index: 2, .. }
        ));
        assert!(matches!(report.errors[1], CellError::Overlap(_)));
    }

    #[test]
    fn placeholder_warns_but_passes() {
        let report = validate_cell(&[AssignmentRecord::shift("s1")]);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(
            report.warnings[0].to_string(),
            "shift s1 has no hours yet (template hours shown)"
        );
    }

    #[test]
    fn franco_with_hours_and_duplicates_warn() {
        let cell = vec![
            AssignmentRecord::franco().hours("08:00", "12:00"),
            AssignmentRecord::franco(),
        ];
        let report = validate_cell(&cell);
        assert!(report.is_valid());
        assert_eq!(
            report.warnings,
            vec![
                CellWarning::IgnoredFields {
                    index: 0,
                    description: "franco".to_owned()
                },
                CellWarning::DuplicateFranco { count: 2 },
            ]
        );
    }
}
