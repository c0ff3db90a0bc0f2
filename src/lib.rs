#![forbid(unsafe_code)]
//! Turnos — modèle d'affectations d'une grille de planning hebdomadaire.
//!
//! - Cellule `(date, employé)` : liste ordonnée d'affectations hétérogènes
//!   (shift, franco, medio franco, licencia, nota).
//! - Normalisation des deux formes stockées (identifiants historiques, forme courante).
//! - Validation de complétude, de cohérence et de non-chevauchement avant toute écriture.
//! - Motifs récurrents et suggestions à partir des semaines closes.
//! - Pur et synchrone : aucune E/S hors du module `io` et du binaire.

pub mod edit;
pub mod io;
pub mod model;
pub mod normalize;
pub mod pattern;
pub mod schedule;
pub mod template;
pub mod time;
pub mod validation;

pub use model::{
    Assignment, AssignmentKind, AssignmentRecord, EmployeeId, LicenciaType, RawAssignments,
    RecordError, Segment, ShiftId, ShiftSegments,
};
pub use normalize::{normalize, normalize_record};
pub use pattern::{
    analyze_patterns, signature, suggest, suggest_week, Pattern, PatternOptions, Suggestion,
};
pub use schedule::{CellReport, Horario, ScheduleError, WriteOptions};
pub use template::{ShiftTemplates, Turno};
pub use time::{intervals_overlap, to_minutes, ClockTime, Interval, ParseError};
pub use validation::{
    incompleteness_reason, is_incomplete, validate_assignment, validate_cell,
    validate_no_overlaps, validate_split_shift, CellError, CellValidation, CellWarning,
    IncompleteReason, Validation, ValidationError,
};
