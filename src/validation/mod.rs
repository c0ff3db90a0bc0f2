//! Validation des affectations : complétude, cohérence interne, chevauchements.
//!
//! Aucun validateur ne reçoit le registre de Turnos : une affectation écrite
//! est la seule source de vérité. Toutes les erreurs sont collectées, jamais
//! la première seulement, pour que l'UI puisse tout afficher d'un coup.

mod cell;
mod completeness;
mod correctness;
mod overlap;
mod types;
mod util;

pub use cell::validate_cell;
pub use completeness::{incompleteness_reason, incompleteness_reasons, is_incomplete};
pub use correctness::{is_split_shift, validate_assignment, validate_split_shift};
pub use overlap::validate_no_overlaps;
pub use types::{
    CellError, CellValidation, CellWarning, IncompleteReason, Validation, ValidationError,
};

pub(crate) use util::{segment_interval, split_order_error};
