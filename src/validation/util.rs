use super::ValidationError;
use crate::model::{AssignmentRecord, Segment};
use crate::time::{ClockTime, Interval, MINUTES_PER_DAY};

fn parse_field(
    raw: &str,
    field: &'static str,
    errors: &mut Vec<ValidationError>,
) -> Option<ClockTime> {
    match raw.parse() {
        Ok(t) => Some(t),
        Err(source) => {
            errors.push(ValidationError::MalformedTime { field, source });
            None
        }
    }
}

/// Intervalle d'un segment complet.
///
/// `Ok(None)` si le segment est absent ou à moitié défini (cas traité par la
/// complétude), `Err` si une heure est illisible ou la durée nulle.
pub(crate) fn segment_interval(
    record: &AssignmentRecord,
    segment: Segment,
) -> Result<Option<Interval>, Vec<ValidationError>> {
    let fields = record.segment(segment);
    let (Some(start), Some(end)) = (fields.start, fields.end) else {
        return Ok(None);
    };
    let mut errors = Vec::new();
    let start = parse_field(start, segment.start_field(), &mut errors);
    let end = parse_field(end, segment.end_field(), &mut errors);
    match (start, end) {
        (Some(start), Some(end)) => Interval::new(start, end)
            .map(Some)
            .map_err(|_| vec![ValidationError::ZeroDuration { segment, at: start }]),
        _ => Err(errors),
    }
}

/// Ordre interne d'un turno cortado, après normalisation de minuit.
///
/// Le second segment doit commencer quand (ou après que) le premier finit ;
/// il n'est reporté au lendemain que si le premier passe lui-même minuit.
/// L'ensemble ne peut pas dépasser 24 heures.
pub(crate) fn split_order_error(first: &Interval, second: &Interval) -> Option<ValidationError> {
    let (first_start, first_end) = first.normalized();
    let mut second_start = second.start().minutes();
    if first.crosses_midnight() && second_start < first_start {
        second_start += MINUTES_PER_DAY;
    }
    if first_end > second_start {
        return Some(ValidationError::SplitOrder {
            first_end: first.end(),
            second_start: second.start(),
        });
    }
    if second_start + second.duration_minutes() > first_start + MINUTES_PER_DAY {
        return Some(ValidationError::SplitTooLong);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::interval;

    #[test]
    fn back_to_back_split_is_ordered() {
        let a = interval(Segment::First, "08:00", "14:00").unwrap();
        let b = interval(Segment::Second, "14:00", "18:00").unwrap();
        assert_eq!(split_order_error(&a, &b), None);
    }

    #[test]
    fn second_before_first_is_out_of_order() {
        let a = interval(Segment::First, "14:00", "18:00").unwrap();
        let b = interval(Segment::Second, "08:00", "12:00").unwrap();
        assert!(matches!(
            split_order_error(&a, &b),
            Some(ValidationError::SplitOrder { .. })
        ));
    }

    #[test]
    fn first_segment_crossing_midnight() {
        let a = interval(Segment::First, "22:00", "02:00").unwrap();
        let morning = interval(Segment::Second, "03:00", "06:00").unwrap();
        assert_eq!(split_order_error(&a, &morning), None);
        let early = interval(Segment::Second, "01:00", "05:00").unwrap();
        assert!(split_order_error(&a, &early).is_some());
        let same_night = interval(Segment::Second, "23:00", "23:30").unwrap();
        assert!(split_order_error(&a, &same_night).is_some());
    }

    #[test]
    fn second_segment_may_cross_midnight() {
        let a = interval(Segment::First, "08:00", "12:00").unwrap();
        let b = interval(Segment::Second, "20:00", "02:00").unwrap();
        assert_eq!(split_order_error(&a, &b), None);
        let late = interval(Segment::Second, "20:00", "09:00").unwrap();
        assert_eq!(split_order_error(&a, &late), Some(ValidationError::SplitTooLong));
    }

    #[test]
    fn segment_interval_reports_both_bad_fields() {
        let record = AssignmentRecord::shift("s1").hours("8h", "25:00");
        let errors = segment_interval(&record, Segment::First).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn segment_interval_zero_duration() {
        let record = AssignmentRecord::shift("s1").hours2("10:00", "10:00");
        let errors = segment_interval(&record, Segment::Second).unwrap_err();
        assert!(matches!(
            errors[0],
            ValidationError::ZeroDuration {
                segment: Segment::Second,
                ..
            }
        ));
        assert_eq!(segment_interval(&record, Segment::First), Ok(None));
    }
}
