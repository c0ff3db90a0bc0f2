use crate::template::ShiftTemplates;
use crate::time::{ClockTime, Interval};
use crate::validation::{self, IncompleteReason, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifiant fort pour un Turno (template de shift)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShiftId(String);

impl ShiftId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShiftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifiant fort pour un employé
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EmployeeId(String);

impl EmployeeId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Variante d'une affectation, telle qu'écrite dans le champ `type`.
///
/// Les valeurs inconnues sont conservées telles quelles pour ne rien perdre
/// lors d'un aller-retour ; les validateurs les traitent comme incomplètes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AssignmentKind {
    Shift,
    Franco,
    MedioFranco,
    Licencia,
    Nota,
    Unknown(String),
}

/// `type` absent : repli historique sur `shift`.
static DEFAULT_KIND: AssignmentKind = AssignmentKind::Shift;

impl AssignmentKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Shift => "shift",
            Self::Franco => "franco",
            Self::MedioFranco => "medio_franco",
            Self::Licencia => "licencia",
            Self::Nota => "nota",
            Self::Unknown(raw) => raw,
        }
    }
}

impl From<String> for AssignmentKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "shift" => Self::Shift,
            "franco" => Self::Franco,
            "medio_franco" => Self::MedioFranco,
            "licencia" => Self::Licencia,
            "nota" => Self::Nota,
            _ => Self::Unknown(raw),
        }
    }
}

impl From<AssignmentKind> for String {
    fn from(kind: AssignmentKind) -> Self {
        match kind {
            AssignmentKind::Unknown(raw) => raw,
            other => other.as_str().to_owned(),
        }
    }
}

impl fmt::Display for AssignmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Motifs de licencia reconnus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenciaType {
    Vacaciones,
    Enfermedad,
    Embarazo,
    Maternidad,
    Paternidad,
    Estudio,
    Duelo,
    Otra,
}

impl LicenciaType {
    pub const ALL: [LicenciaType; 8] = [
        Self::Vacaciones,
        Self::Enfermedad,
        Self::Embarazo,
        Self::Maternidad,
        Self::Paternidad,
        Self::Estudio,
        Self::Duelo,
        Self::Otra,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vacaciones => "vacaciones",
            Self::Enfermedad => "enfermedad",
            Self::Embarazo => "embarazo",
            Self::Maternidad => "maternidad",
            Self::Paternidad => "paternidad",
            Self::Estudio => "estudio",
            Self::Duelo => "duelo",
            Self::Otra => "otra",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown licencia type `{0}`")]
pub struct UnknownLicenciaType(pub String);

impl FromStr for LicenciaType {
    type Err = UnknownLicenciaType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownLicenciaType(s.to_owned()))
    }
}

impl fmt::Display for LicenciaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Premier ou second segment horaire d'une affectation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    First,
    Second,
}

impl Segment {
    pub fn start_field(self) -> &'static str {
        match self {
            Self::First => "startTime",
            Self::Second => "startTime2",
        }
    }
    pub fn end_field(self) -> &'static str {
        match self {
            Self::First => "endTime",
            Self::Second => "endTime2",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::First => "first",
            Self::Second => "second",
        })
    }
}

/// Champs bruts d'un segment (chaînes vides déjà écartées).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentFields<'a> {
    pub start: Option<&'a str>,
    pub end: Option<&'a str>,
}

impl SegmentFields<'_> {
    pub fn is_absent(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
    pub fn is_full(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }
    /// Un seul des deux champs renseigné.
    pub fn is_half(&self) -> bool {
        !self.is_absent() && !self.is_full()
    }
}

impl fmt::Display for SegmentFields<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.unwrap_or("?"),
            self.end.unwrap_or("?")
        )
    }
}

/// Affectation telle que stockée (forme plate, camelCase).
///
/// C'est la forme d'échange avec la couche de persistance : tous les champs
/// sont optionnels et la cohérence par variante est vérifiée par
/// [`crate::validation`]. Le type fort correspondant est [`Assignment`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRecord {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<AssignmentKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_id: Option<ShiftId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub licencia_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texto: Option<String>,
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

impl AssignmentRecord {
    fn of_kind(kind: AssignmentKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    pub fn shift<S: AsRef<str>>(shift_id: S) -> Self {
        Self {
            shift_id: Some(ShiftId::new(shift_id)),
            ..Self::of_kind(AssignmentKind::Shift)
        }
    }

    pub fn franco() -> Self {
        Self::of_kind(AssignmentKind::Franco)
    }

    pub fn medio_franco(start: &str, end: &str) -> Self {
        Self::of_kind(AssignmentKind::MedioFranco).hours(start, end)
    }

    pub fn licencia(start: &str, end: &str, licencia_type: &str) -> Self {
        Self {
            licencia_type: Some(licencia_type.to_owned()),
            ..Self::of_kind(AssignmentKind::Licencia).hours(start, end)
        }
    }

    pub fn nota<S: Into<String>>(texto: S) -> Self {
        Self {
            texto: Some(texto.into()),
            ..Self::of_kind(AssignmentKind::Nota)
        }
    }

    /// Renseigne le premier segment.
    pub fn hours(mut self, start: &str, end: &str) -> Self {
        self.start_time = Some(start.to_owned());
        self.end_time = Some(end.to_owned());
        self
    }

    /// Renseigne le second segment (turno cortado).
    pub fn hours2(mut self, start: &str, end: &str) -> Self {
        self.start_time2 = Some(start.to_owned());
        self.end_time2 = Some(end.to_owned());
        self
    }

    /// Variante effective (`shift` si `type` est absent).
    pub fn kind(&self) -> &AssignmentKind {
        self.kind.as_ref().unwrap_or(&DEFAULT_KIND)
    }

    pub fn shift_id(&self) -> Option<&ShiftId> {
        self.shift_id
            .as_ref()
            .filter(|id| !id.as_str().trim().is_empty())
    }

    pub fn segment(&self, segment: Segment) -> SegmentFields<'_> {
        match segment {
            Segment::First => SegmentFields {
                start: present(&self.start_time),
                end: present(&self.end_time),
            },
            Segment::Second => SegmentFields {
                start: present(&self.start_time2),
                end: present(&self.end_time2),
            },
        }
    }

    pub fn has_time_fields(&self) -> bool {
        !self.segment(Segment::First).is_absent() || !self.segment(Segment::Second).is_absent()
    }

    pub fn licencia_type(&self) -> Option<&str> {
        present(&self.licencia_type)
    }

    pub fn texto(&self) -> Option<&str> {
        present(&self.texto)
    }

    /// Shift réduit à sa référence de template, en attente d'hydratation.
    pub fn is_placeholder(&self) -> bool {
        *self.kind() == AssignmentKind::Shift
            && self.shift_id().is_some()
            && !self.has_time_fields()
    }

    /// Description lisible, utilisée en préfixe des messages d'erreur.
    pub fn describe(&self) -> String {
        let first = self.segment(Segment::First);
        let second = self.segment(Segment::Second);
        let hours = match (first.is_absent(), second.is_absent()) {
            (true, true) => String::new(),
            (false, true) => format!(" {first}"),
            (true, false) => format!(" ? / {second}"),
            (false, false) => format!(" {first} / {second}"),
        };
        match self.kind() {
            AssignmentKind::Shift => {
                let id = self.shift_id().map_or("?", ShiftId::as_str);
                if self.is_placeholder() {
                    format!("shift {id} (template hours)")
                } else {
                    format!("shift {id}{hours}")
                }
            }
            AssignmentKind::Franco => "franco".to_owned(),
            AssignmentKind::MedioFranco => format!("medio_franco{hours}"),
            AssignmentKind::Licencia => match self.licencia_type() {
                Some(t) => format!("licencia {t}{hours}"),
                None => format!("licencia{hours}"),
            },
            AssignmentKind::Nota => format!("nota \"{}\"", self.texto().unwrap_or("")),
            AssignmentKind::Unknown(raw) => format!("unknown type `{raw}`"),
        }
    }
}

/// Contenu brut d'une cellule, sous l'une des deux formes stockées.
///
/// - `LegacyIds` : ancienne forme, simple liste d'identifiants de Turno.
/// - `Current` : liste d'affectations complètes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAssignments {
    LegacyIds(Vec<ShiftId>),
    Current(Vec<AssignmentRecord>),
}

impl Default for RawAssignments {
    fn default() -> Self {
        Self::Current(Vec::new())
    }
}

impl RawAssignments {
    pub fn len(&self) -> usize {
        match self {
            Self::LegacyIds(ids) => ids.len(),
            Self::Current(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::LegacyIds(_))
    }
}

impl From<Vec<AssignmentRecord>> for RawAssignments {
    fn from(records: Vec<AssignmentRecord>) -> Self {
        Self::Current(records)
    }
}

impl From<Vec<ShiftId>> for RawAssignments {
    fn from(ids: Vec<ShiftId>) -> Self {
        Self::LegacyIds(ids)
    }
}

/// Segments horaires d'un shift hydraté.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftSegments {
    Single(Interval),
    /// Turno cortado : le premier segment finit avant (ou quand) le second commence.
    Split(Interval, Interval),
}

impl ShiftSegments {
    pub fn split(first: Interval, second: Interval) -> Result<Self, ValidationError> {
        match validation::split_order_error(&first, &second) {
            Some(err) => Err(err),
            None => Ok(Self::Split(first, second)),
        }
    }

    pub fn intervals(&self) -> Vec<Interval> {
        match *self {
            Self::Single(a) => vec![a],
            Self::Split(a, b) => vec![a, b],
        }
    }
}

/// Affectation typée : chaque variante porte exactement les champs requis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment {
    /// Référence seule à un Turno ; les horaires viennent du template à l'affichage.
    ShiftPlaceholder { shift_id: ShiftId },
    Shift {
        shift_id: ShiftId,
        segments: ShiftSegments,
    },
    Franco,
    MedioFranco { hours: Interval },
    Licencia {
        hours: Interval,
        licencia_type: LicenciaType,
    },
    Nota { texto: String },
}

/// Échec de conversion d'un enregistrement brut vers [`Assignment`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("incomplete assignment: {0}")]
    Incomplete(IncompleteReason),
    #[error("invalid assignment: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    Invalid(Vec<ValidationError>),
}

impl Assignment {
    pub fn shift(shift_id: ShiftId, hours: Interval) -> Self {
        Self::Shift {
            shift_id,
            segments: ShiftSegments::Single(hours),
        }
    }

    pub fn split_shift(
        shift_id: ShiftId,
        first: Interval,
        second: Interval,
    ) -> Result<Self, ValidationError> {
        Ok(Self::Shift {
            shift_id,
            segments: ShiftSegments::split(first, second)?,
        })
    }

    pub fn kind(&self) -> AssignmentKind {
        match self {
            Self::ShiftPlaceholder { .. } | Self::Shift { .. } => AssignmentKind::Shift,
            Self::Franco => AssignmentKind::Franco,
            Self::MedioFranco { .. } => AssignmentKind::MedioFranco,
            Self::Licencia { .. } => AssignmentKind::Licencia,
            Self::Nota { .. } => AssignmentKind::Nota,
        }
    }

    pub fn shift_id(&self) -> Option<&ShiftId> {
        match self {
            Self::ShiftPlaceholder { shift_id } | Self::Shift { shift_id, .. } => Some(shift_id),
            _ => None,
        }
    }

    /// Intervalles réellement portés par l'affectation (aucun pour un placeholder).
    pub fn intervals(&self) -> Vec<Interval> {
        match self {
            Self::Shift { segments, .. } => segments.intervals(),
            Self::MedioFranco { hours } | Self::Licencia { hours, .. } => vec![*hours],
            Self::ShiftPlaceholder { .. } | Self::Franco | Self::Nota { .. } => Vec::new(),
        }
    }

    /// Intervalles à afficher : un placeholder emprunte ceux de son Turno.
    ///
    /// Uniquement pour l'affichage ; aucune validation ne passe par ici.
    pub fn display_intervals(&self, templates: &ShiftTemplates) -> Vec<Interval> {
        match self {
            Self::ShiftPlaceholder { shift_id } => templates
                .get(shift_id)
                .and_then(|turno| turno.intervals().ok())
                .unwrap_or_default(),
            other => other.intervals(),
        }
    }

    pub fn to_record(&self) -> AssignmentRecord {
        let mut record = AssignmentRecord::of_kind(self.kind());
        let set_first = |r: &mut AssignmentRecord, iv: &Interval| {
            r.start_time = Some(iv.start().to_string());
            r.end_time = Some(iv.end().to_string());
        };
        match self {
            Self::ShiftPlaceholder { shift_id } => record.shift_id = Some(shift_id.clone()),
            Self::Shift { shift_id, segments } => {
                record.shift_id = Some(shift_id.clone());
                match segments {
                    ShiftSegments::Single(a) => set_first(&mut record, a),
                    ShiftSegments::Split(a, b) => {
                        set_first(&mut record, a);
                        record.start_time2 = Some(b.start().to_string());
                        record.end_time2 = Some(b.end().to_string());
                    }
                }
            }
            Self::Franco => {}
            Self::MedioFranco { hours } => set_first(&mut record, hours),
            Self::Licencia {
                hours,
                licencia_type,
            } => {
                set_first(&mut record, hours);
                record.licencia_type = Some(licencia_type.to_string());
            }
            Self::Nota { texto } => record.texto = Some(texto.clone()),
        }
        record
    }
}

fn required_interval(
    record: &AssignmentRecord,
    segment: Segment,
    missing: IncompleteReason,
) -> Result<Interval, RecordError> {
    validation::segment_interval(record, segment)
        .map_err(RecordError::Invalid)?
        .ok_or(RecordError::Incomplete(missing))
}

impl TryFrom<&AssignmentRecord> for Assignment {
    type Error = RecordError;

    fn try_from(record: &AssignmentRecord) -> Result<Self, Self::Error> {
        if let Some(reason) = validation::incompleteness_reason(record) {
            return Err(RecordError::Incomplete(reason));
        }
        let report = validation::validate_assignment(record);
        if !report.is_valid() {
            return Err(RecordError::Invalid(report.errors));
        }

        match record.kind() {
            AssignmentKind::Shift => {
                let shift_id = record
                    .shift_id()
                    .cloned()
                    .ok_or(RecordError::Incomplete(IncompleteReason::MissingShiftId))?;
                let first = validation::segment_interval(record, Segment::First)
                    .map_err(RecordError::Invalid)?;
                let second = validation::segment_interval(record, Segment::Second)
                    .map_err(RecordError::Invalid)?;
                match (first, second) {
                    (None, None) => Ok(Self::ShiftPlaceholder { shift_id }),
                    (Some(a), None) => Ok(Self::shift(shift_id, a)),
                    (Some(a), Some(b)) => Self::split_shift(shift_id, a, b)
                        .map_err(|err| RecordError::Invalid(vec![err])),
                    (None, Some(_)) => Err(RecordError::Invalid(vec![
                        ValidationError::MissingFirstSegment,
                    ])),
                }
            }
            AssignmentKind::Franco => Ok(Self::Franco),
            AssignmentKind::MedioFranco => Ok(Self::MedioFranco {
                hours: required_interval(
                    record,
                    Segment::First,
                    IncompleteReason::MissingHours(AssignmentKind::MedioFranco),
                )?,
            }),
            AssignmentKind::Licencia => {
                let hours = required_interval(
                    record,
                    Segment::First,
                    IncompleteReason::MissingHours(AssignmentKind::Licencia),
                )?;
                let licencia_type = record
                    .licencia_type()
                    .ok_or(RecordError::Incomplete(IncompleteReason::MissingLicenciaType))?
                    .parse::<LicenciaType>()
                    .map_err(|err| RecordError::Invalid(vec![err.into()]))?;
                Ok(Self::Licencia {
                    hours,
                    licencia_type,
                })
            }
            AssignmentKind::Nota => Ok(Self::Nota {
                texto: record
                    .texto()
                    .ok_or(RecordError::Incomplete(IncompleteReason::MissingTexto))?
                    .to_owned(),
            }),
            AssignmentKind::Unknown(raw) => Err(RecordError::Incomplete(
                IncompleteReason::UnknownKind(raw.clone()),
            )),
        }
    }
}

impl From<&Assignment> for AssignmentRecord {
    fn from(assignment: &Assignment) -> Self {
        assignment.to_record()
    }
}

/// Intervalle d'un segment depuis deux chaînes `HH:MM`, durée nulle refusée.
///
/// Les erreurs portent les noms de champs du segment (`startTime2`... pour le second).
pub fn interval(segment: Segment, start: &str, end: &str) -> Result<Interval, ValidationError> {
    let start: ClockTime = start
        .parse()
        .map_err(|source| ValidationError::MalformedTime {
            field: segment.start_field(),
            source,
        })?;
    let end: ClockTime = end.parse().map_err(|source| ValidationError::MalformedTime {
        field: segment.end_field(),
        source,
    })?;
    Interval::new(start, end).map_err(|_| ValidationError::ZeroDuration { segment, at: start })
}
