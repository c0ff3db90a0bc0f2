use crate::model::{AssignmentKind, Segment, ShiftId, UnknownLicenciaType};
use crate::time::{ClockTime, ParseError};
use std::fmt;
use thiserror::Error;

/// Donnée minimale manquante (ou interdite) pour la variante.
///
/// Ce n'est pas une erreur à proprement parler : c'est le signal qui bloque
/// les actions d'édition dans l'UI.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IncompleteReason {
    #[error("shift has no shiftId")]
    MissingShiftId,
    #[error("{0} segment has only one of its two times")]
    HalfSegment(Segment),
    #[error("{0} requires startTime and endTime")]
    MissingHours(AssignmentKind),
    #[error("licencia requires licenciaType")]
    MissingLicenciaType,
    #[error("{0} must not reference a shift")]
    ForbiddenShiftId(AssignmentKind),
    #[error("nota requires texto")]
    MissingTexto,
    #[error("unknown assignment type `{0}`")]
    UnknownKind(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("incomplete: {0}")]
    Incomplete(#[from] IncompleteReason),
    #[error("{field} is not a valid time: {source}")]
    MalformedTime {
        field: &'static str,
        source: ParseError,
    },
    #[error("{segment} segment {at}-{at} has zero duration")]
    ZeroDuration { segment: Segment, at: ClockTime },
    #[error("second segment is set but the first segment is missing")]
    MissingFirstSegment,
    #[error("split shift segments overlap or are out of order: first ends at {first_end}, second starts at {second_start}")]
    SplitOrder {
        first_end: ClockTime,
        second_start: ClockTime,
    },
    #[error("split shift spans more than 24 hours")]
    SplitTooLong,
    #[error(transparent)]
    LicenciaType(#[from] UnknownLicenciaType),
    #[error("not a shift assignment ({0})")]
    NotAShift(AssignmentKind),
    #[error("not a split shift: {0} segment is missing")]
    NotSplit(Segment),
    #[error("edit drops the second segment of a split shift")]
    SegmentDropped,
    #[error("{first} overlaps {second}")]
    Overlap { first: String, second: String },
}

/// Résultat d'une validation : liste complète des règles violées.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    pub errors: Vec<ValidationError>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub(crate) fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }
}

/// Erreur bloquante au niveau d'une cellule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CellError {
    #[error("{description}: {error}")]
    Assignment {
        index: usize,
        description: String,
        error: ValidationError,
    },
    #[error("{0}")]
    Overlap(ValidationError),
}

/// Remarque non bloquante sur une cellule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellWarning {
    PendingHydration { index: usize, shift_id: ShiftId },
    IgnoredFields { index: usize, description: String },
    DuplicateFranco { count: usize },
}

impl fmt::Display for CellWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PendingHydration { shift_id, .. } => {
                write!(f, "shift {shift_id} has no hours yet (template hours shown)")
            }
            Self::IgnoredFields { description, .. } => {
                write!(f, "{description}: extra fields are ignored for this type")
            }
            Self::DuplicateFranco { count } => write!(f, "{count} franco entries in one cell"),
        }
    }
}

/// Verdict d'écriture pour une cellule : écrire seulement si `errors` est vide.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellValidation {
    pub errors: Vec<CellError>,
    pub warnings: Vec<CellWarning>,
}

impl CellValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}
