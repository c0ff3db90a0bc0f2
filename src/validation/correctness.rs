use super::{incompleteness_reasons, util, Validation, ValidationError};
use crate::model::{AssignmentKind, AssignmentRecord, LicenciaType, Segment};
use crate::time::Interval;

fn collect_segment(
    record: &AssignmentRecord,
    segment: Segment,
    report: &mut Validation,
) -> Option<Interval> {
    match util::segment_interval(record, segment) {
        Ok(interval) => interval,
        Err(errors) => {
            report.errors.extend(errors);
            None
        }
    }
}

/// Valide une affectation isolée et renvoie toutes les règles violées.
///
/// Les raisons d'incomplétude viennent en tête ; les contrôles suivants ne
/// portent que sur les données présentes, sans redire ce qui manque. Un
/// placeholder n'a rien à contrôler.
pub fn validate_assignment(record: &AssignmentRecord) -> Validation {
    let mut report = Validation::default();
    report.errors.extend(
        incompleteness_reasons(record)
            .into_iter()
            .map(ValidationError::Incomplete),
    );

    match record.kind() {
        AssignmentKind::Shift => check_shift(record, &mut report),
        AssignmentKind::MedioFranco => {
            collect_segment(record, Segment::First, &mut report);
        }
        AssignmentKind::Licencia => {
            collect_segment(record, Segment::First, &mut report);
            if let Some(raw) = record.licencia_type() {
                if let Err(err) = raw.parse::<LicenciaType>() {
                    report.push(err.into());
                }
            }
        }
        AssignmentKind::Franco | AssignmentKind::Nota | AssignmentKind::Unknown(_) => {}
    }
    report
}

fn check_shift(record: &AssignmentRecord, report: &mut Validation) {
    if record.is_placeholder() {
        return;
    }
    let first = collect_segment(record, Segment::First, report);
    let second = collect_segment(record, Segment::Second, report);

    if record.segment(Segment::First).is_absent() && !record.segment(Segment::Second).is_absent() {
        report.push(ValidationError::MissingFirstSegment);
    }
    if let (Some(first), Some(second)) = (first, second) {
        if let Some(err) = util::split_order_error(&first, &second) {
            report.push(err);
        }
    }
}

/// Confirme qu'un shift est un vrai turno cortado : deux segments complets,
/// lisibles, non vides et dans l'ordre.
pub fn validate_split_shift(record: &AssignmentRecord) -> Validation {
    let mut report = Validation::default();
    let kind = record.kind();
    if *kind != AssignmentKind::Shift {
        report.push(ValidationError::NotAShift(kind.clone()));
        return report;
    }
    for segment in [Segment::First, Segment::Second] {
        if !record.segment(segment).is_full() {
            report.push(ValidationError::NotSplit(segment));
        }
    }
    let first = collect_segment(record, Segment::First, &mut report);
    let second = collect_segment(record, Segment::Second, &mut report);
    if let (Some(first), Some(second)) = (first, second) {
        if let Some(err) = util::split_order_error(&first, &second) {
            report.push(err);
        }
    }
    report
}

pub fn is_split_shift(record: &AssignmentRecord) -> bool {
    validate_split_shift(record).is_valid()
}
