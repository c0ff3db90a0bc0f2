//! Arithmétique d'horaires murales `HH:MM` (24h) avec passage de minuit.
//!
//! Un intervalle `[start, end)` dont `end <= start` traverse minuit : sa durée
//! vaut `end + 1440 - start`. Un intervalle `start == end` est vide et refusé
//! par [`Interval::new`].

use chrono::{NaiveTime, Timelike};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Nombre de minutes dans une journée.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Chaîne horaire mal formée : erreur d'appelant, non récupérable côté UI.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid time `{input}`: expected HH:MM (24h)")]
pub struct ParseError {
    input: String,
}

impl ParseError {
    fn new<S: Into<String>>(input: S) -> Self {
        Self {
            input: input.into(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Intervalle de durée nulle (`start == end`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("interval {0}-{0} has zero duration")]
pub struct EmptyInterval(pub ClockTime);

/// Heure murale, en minutes depuis minuit (`[0, 1440)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        u16::try_from(minutes)
            .ok()
            .filter(|m| u32::from(*m) < MINUTES_PER_DAY)
            .map(Self)
    }

    pub fn minutes(self) -> u32 {
        u32::from(self.0)
    }
}

impl FromStr for ClockTime {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // chrono accepte "8:00" ; le format stocké est strictement sur 5 caractères
        if s.len() != 5 || s.as_bytes()[2] != b':' {
            return Err(ParseError::new(s));
        }
        let time = NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| ParseError::new(s))?;
        let minutes = time.hour() * 60 + time.minute();
        Self::from_minutes(minutes).ok_or_else(|| ParseError::new(s))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// Convertit `HH:MM` en minutes depuis minuit.
pub fn to_minutes(time: &str) -> Result<u32, ParseError> {
    time.parse::<ClockTime>().map(ClockTime::minutes)
}

/// Intervalle horaire `[start, end)`, éventuellement à cheval sur minuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval {
    start: ClockTime,
    end: ClockTime,
}

impl Interval {
    /// Crée un intervalle en refusant la durée nulle.
    pub fn new(start: ClockTime, end: ClockTime) -> Result<Self, EmptyInterval> {
        if start == end {
            return Err(EmptyInterval(start));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> ClockTime {
        self.start
    }

    pub fn end(&self) -> ClockTime {
        self.end
    }

    pub fn crosses_midnight(&self) -> bool {
        self.end <= self.start
    }

    /// Bornes en minutes, `end` décalé d'un jour si l'intervalle passe minuit.
    pub fn normalized(&self) -> (u32, u32) {
        let start = self.start.minutes();
        let mut end = self.end.minutes();
        if self.crosses_midnight() {
            end += MINUTES_PER_DAY;
        }
        (start, end)
    }

    pub fn duration_minutes(&self) -> u32 {
        let (start, end) = self.normalized();
        end - start
    }

    /// Chevauchement strict (deux intervalles bout à bout ne se chevauchent pas).
    ///
    /// Quand un seul des deux passe minuit, l'autre est comparé à ses deux
    /// positions possibles (même jour et lendemain). Quand les deux passent
    /// minuit, le résultat est toujours `true` : approximation conservatrice.
    pub fn overlaps(&self, other: &Interval) -> bool {
        match (self.crosses_midnight(), other.crosses_midnight()) {
            (true, true) => true,
            (false, false) => bounds_overlap(self.normalized(), other.normalized()),
            (true, false) => overlap_next_day(self.normalized(), other.normalized()),
            (false, true) => overlap_next_day(other.normalized(), self.normalized()),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Chevauchement de deux intervalles donnés en chaînes `HH:MM`.
///
/// Une paire `start == end` y est lue comme une journée complète passant
/// minuit ; les validateurs écartent ces intervalles avant d'arriver ici.
pub fn intervals_overlap(
    a_start: &str,
    a_end: &str,
    b_start: &str,
    b_end: &str,
) -> Result<bool, ParseError> {
    let a = Interval {
        start: a_start.parse()?,
        end: a_end.parse()?,
    };
    let b = Interval {
        start: b_start.parse()?,
        end: b_end.parse()?,
    };
    Ok(a.overlaps(&b))
}

fn bounds_overlap(a: (u32, u32), b: (u32, u32)) -> bool {
    a.0 < b.1 && b.0 < a.1
}

fn overlap_next_day(crossing: (u32, u32), plain: (u32, u32)) -> bool {
    let shifted = (plain.0 + MINUTES_PER_DAY, plain.1 + MINUTES_PER_DAY);
    bounds_overlap(crossing, plain) || bounds_overlap(crossing, shifted)
}
