//! Course model.
//!
//! A course is an immutable catalog entry: credit weight, category, and
//! its sequencing constraints (prerequisites, corequisites, term offerings).
//! The scheduler works on the flat `prerequisites` AND list; the richer
//! `prerequisite_tree` is kept for registration-style checks.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::code::CourseCode;
use crate::error::PlanError;
use crate::prereq::PrereqTree;

/// Academic term within a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Term {
    /// First term (semester 1).
    First,
    /// Second term (semester 2).
    Second,
}

impl Term {
    /// Both regular terms in chronological order.
    pub const ALL: [Term; 2] = [Term::First, Term::Second];

    /// Term number (1 or 2).
    #[inline]
    pub fn number(self) -> u8 {
        match self {
            Term::First => 1,
            Term::Second => 2,
        }
    }
}

impl TryFrom<u8> for Term {
    type Error = PlanError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(Term::First),
            2 => Ok(Term::Second),
            other => Err(PlanError::InvalidTerm(other)),
        }
    }
}

impl From<Term> for u8 {
    fn from(term: Term) -> Self {
        term.number()
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Requirement category of a course.
///
/// Drives ordering priority, the hard-course cap and flexible throttling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    /// University-wide pillars every student takes.
    Foundation,
    /// Core courses of the major.
    CoreDomain,
    /// Mandatory courses of the chosen focus area.
    FocusPrimary,
    /// Elective courses of the chosen focus area.
    FocusElective,
    /// Common-curriculum breadth courses.
    GeneralEducation,
    /// Free electives.
    UnrestrictedElective,
    /// Anything the catalog source could not classify.
    #[default]
    Unclassified,
}

impl Category {
    /// Maps a raw program label to a category.
    ///
    /// | Label | Category |
    /// |-------|----------|
    /// | `CC-UP` | Foundation |
    /// | `CC-*` | GeneralEducation |
    /// | `Core-*` | CoreDomain |
    /// | `Focus ...-P` | FocusPrimary |
    /// | `Focus ...-E`, other `Focus*` | FocusElective |
    /// | `UE*` | UnrestrictedElective |
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label == "CC-UP" {
            Category::Foundation
        } else if label.starts_with("CC-") {
            Category::GeneralEducation
        } else if label.starts_with("Core") {
            Category::CoreDomain
        } else if label.starts_with("Focus") {
            if label.ends_with("-P") {
                Category::FocusPrimary
            } else {
                Category::FocusElective
            }
        } else if label.starts_with("UE") {
            Category::UnrestrictedElective
        } else {
            Category::Unclassified
        }
    }

    /// Whether this is a focus-area category.
    #[inline]
    pub fn is_focus(self) -> bool {
        matches!(self, Category::FocusPrimary | Category::FocusElective)
    }
}

/// A catalog course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Unique course code.
    pub code: String,
    /// Course title.
    #[serde(default)]
    pub title: String,
    /// Credit weight (MCs).
    #[serde(default)]
    pub credits: u32,
    /// Requirement category.
    #[serde(default)]
    pub category: Category,
    /// Prerequisite codes, all required.
    #[serde(default)]
    pub prerequisites: Vec<String>,
    /// Codes that must share this course's slot.
    #[serde(default)]
    pub corequisites: Vec<String>,
    /// Codes whose completion rules this course out (informational).
    #[serde(default)]
    pub precluded_by: Vec<String>,
    /// Terms the course runs in. Empty = any term.
    #[serde(default)]
    pub offered_terms: Vec<Term>,
    /// Inclusive preferred year range. `None` = inferred from the course level.
    #[serde(default)]
    pub preferred_years: Option<(u8, u8)>,
    /// Flexible-timing ("fluff") course: no real sequencing constraints.
    #[serde(default)]
    pub flexible: bool,
    /// Full AND/OR prerequisite expression from the catalog source.
    #[serde(default)]
    pub prerequisite_tree: Option<PrereqTree>,
}

impl Course {
    /// Creates a course with no constraints.
    pub fn new(
        code: impl Into<String>,
        title: impl Into<String>,
        credits: u32,
        category: Category,
    ) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            credits,
            category,
            prerequisites: Vec::new(),
            corequisites: Vec::new(),
            precluded_by: Vec::new(),
            offered_terms: Vec::new(),
            preferred_years: None,
            flexible: false,
            prerequisite_tree: None,
        }
    }

    /// Adds a prerequisite.
    pub fn with_prerequisite(mut self, code: impl Into<String>) -> Self {
        self.prerequisites.push(code.into());
        self
    }

    /// Sets all prerequisites.
    pub fn with_prerequisites<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prerequisites = codes.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a corequisite.
    pub fn with_corequisite(mut self, code: impl Into<String>) -> Self {
        self.corequisites.push(code.into());
        self
    }

    /// Adds a precluding course.
    pub fn with_preclusion(mut self, code: impl Into<String>) -> Self {
        self.precluded_by.push(code.into());
        self
    }

    /// Restricts the course to the given terms.
    pub fn offered_in(mut self, terms: &[Term]) -> Self {
        self.offered_terms = terms.to_vec();
        self
    }

    /// Sets the preferred year range (inclusive).
    pub fn with_preferred_years(mut self, min_year: u8, max_year: u8) -> Self {
        self.preferred_years = Some((min_year.min(max_year), min_year.max(max_year)));
        self
    }

    /// Marks the course as flexible-timing.
    pub fn flexible(mut self) -> Self {
        self.flexible = true;
        self
    }

    /// Attaches a full prerequisite tree.
    ///
    /// When no flat prerequisite list was given, it is derived from the tree.
    pub fn with_prerequisite_tree(mut self, tree: PrereqTree) -> Self {
        if self.prerequisites.is_empty() {
            self.prerequisites = tree.flatten();
        }
        self.prerequisite_tree = Some(tree);
        self
    }

    /// Parsed course code, if it has the standard shape.
    pub fn parsed_code(&self) -> Option<CourseCode> {
        CourseCode::parse(&self.code)
    }

    /// Flexible-timing: flagged, or a free elective.
    ///
    /// Flexible courses skip prerequisite and term checks and are throttled
    /// per slot.
    pub fn is_flexible(&self) -> bool {
        self.flexible || self.category == Category::UnrestrictedElective
    }

    /// Hard course: foundation, core, or focus area.
    ///
    /// Hard courses count toward the per-slot hard-course cap, whether or
    /// not they are also flexible-timing.
    pub fn is_hard(&self) -> bool {
        matches!(
            self.category,
            Category::Foundation
                | Category::CoreDomain
                | Category::FocusPrimary
                | Category::FocusElective
        )
    }

    /// Whether the course runs in `term`.
    pub fn is_offered_in(&self, term: Term) -> bool {
        self.offered_terms.is_empty() || self.offered_terms.contains(&term)
    }

    /// Preferred (min, max) academic year.
    ///
    /// Explicit range wins; otherwise inferred from the course level.
    pub fn preferred_year_range(&self) -> (u8, u8) {
        if let Some((a, b)) = self.preferred_years {
            return (a.min(b), a.max(b));
        }
        match self.parsed_code().map(|c| c.level()) {
            Some(1) => (1, 2),
            Some(2) => (1, 3),
            Some(3) => (2, 4),
            Some(level) if level >= 4 => (3, 4),
            _ => (1, 4),
        }
    }
}
