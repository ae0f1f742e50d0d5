//! Semester slots.
//!
//! The planning horizon is fixed at four academic years of two terms each.
//! A slot is keyed by `y{year}s{term}` (e.g., `y2s1`) in every external
//! representation.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::{Course, Term};
use crate::error::PlanError;

/// Number of academic years in the planning horizon.
pub const PLAN_YEARS: u8 = 4;

/// Number of regular slots (years × terms).
pub const REGULAR_SLOTS: usize = PLAN_YEARS as usize * Term::ALL.len();

/// Identifier of a semester slot: (academic year, term).
///
/// Orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotId {
    /// Academic year, 1-based.
    pub year: u8,
    /// Term within the year.
    pub term: Term,
}

impl SlotId {
    /// Creates a slot id. Returns `None` outside the planning horizon.
    pub fn new(year: u8, term: Term) -> Option<Self> {
        (1..=PLAN_YEARS)
            .contains(&year)
            .then_some(Self { year, term })
    }

    /// All regular slots in chronological order.
    pub fn all() -> Vec<SlotId> {
        (1..=PLAN_YEARS)
            .flat_map(|year| Term::ALL.into_iter().map(move |term| SlotId { year, term }))
            .collect()
    }

    /// Chronological position, 0-based.
    #[inline]
    pub fn index(&self) -> usize {
        (self.year as usize - 1) * Term::ALL.len() + (self.term.number() as usize - 1)
    }

    /// Whether this slot lies in the last year of the horizon.
    #[inline]
    pub fn is_final_year(&self) -> bool {
        self.year == PLAN_YEARS
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "y{}s{}", self.year, self.term.number())
    }
}

impl FromStr for SlotId {
    type Err = PlanError;

    /// Parses `y{year}s{term}`, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PlanError::InvalidSlot(s.to_string());
        let lower = s.trim().to_ascii_lowercase();
        let rest = lower.strip_prefix('y').ok_or_else(invalid)?;
        let (year, term) = rest.split_once('s').ok_or_else(invalid)?;
        let year: u8 = year.parse().map_err(|_| invalid())?;
        let term: u8 = term.parse().map_err(|_| invalid())?;
        let term = Term::try_from(term).map_err(|_| invalid())?;
        SlotId::new(year, term).ok_or_else(invalid)
    }
}

impl Serialize for SlotId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SlotId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A semester slot with running totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterSlot {
    /// Slot identifier.
    pub id: SlotId,
    /// Assigned course codes, in assignment order.
    pub courses: Vec<String>,
    /// Sum of assigned credit weights.
    pub credits: u32,
    /// Number of hard courses assigned.
    pub hard_count: u32,
    /// Number of flexible-timing courses assigned.
    pub flexible_count: u32,
    /// Pre-occupied (e.g., exchange term); excluded from assignment.
    pub reserved: bool,
}

impl SemesterSlot {
    /// Creates an empty slot.
    pub fn new(id: SlotId) -> Self {
        Self {
            id,
            courses: Vec::new(),
            credits: 0,
            hard_count: 0,
            flexible_count: 0,
            reserved: false,
        }
    }

    /// Marks the slot as reserved, occupying `credits` with a placeholder.
    pub fn reserve(&mut self, placeholder: impl Into<String>, credits: u32) {
        self.reserved = true;
        self.courses = vec![placeholder.into()];
        self.credits = credits;
    }

    /// Adds a course and updates the totals.
    pub fn add(&mut self, course: &Course) {
        self.courses.push(course.code.clone());
        self.credits = self.credits.saturating_add(course.credits);
        if course.is_hard() {
            self.hard_count += 1;
        }
        if course.is_flexible() {
            self.flexible_count += 1;
        }
    }

    /// Whether `extra` credits fit under `cap`.
    #[inline]
    pub fn fits(&self, extra: u32, cap: u32) -> bool {
        self.credits.saturating_add(extra) <= cap
    }

    /// Whether the slot holds the given course.
    pub fn contains(&self, code: &str) -> bool {
        self.courses.iter().any(|c| c == code)
    }
}
