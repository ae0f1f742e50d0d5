//! Study plan (output) model.
//!
//! A study plan is the complete result of a planning request: the resolved
//! configuration, the slot → course mapping, per-course metadata, and the
//! diagnostics raised while building it. It serializes to the JSON shape
//! returned to the request layer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Category, Course, SlotId};
use crate::scheduler::PlannerConfig;

/// A complete study plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyPlan {
    /// Configuration the plan was built with (exemptions merged).
    pub config: PlannerConfig,
    /// Sum of credit weights across the catalog (exempted courses included).
    pub total_credits: u32,
    /// Slot → course codes, chronological.
    pub plan: BTreeMap<SlotId, Vec<String>>,
    /// Exempted course codes.
    pub exempted: Vec<String>,
    /// Per-course metadata, keyed by code.
    pub courses: BTreeMap<String, CourseSummary>,
    /// Forced placements and ignored configuration.
    pub warnings: Vec<Diagnostic>,
}

/// Metadata reported for each course in a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSummary {
    /// Course title.
    pub title: String,
    /// Credit weight.
    pub credits: u32,
    /// Requirement category.
    pub category: Category,
    /// Flexible-timing flag.
    pub flexible: bool,
}

impl From<&Course> for CourseSummary {
    fn from(course: &Course) -> Self {
        Self {
            title: course.title.clone(),
            credits: course.credits,
            category: course.category,
            flexible: course.is_flexible(),
        }
    }
}

/// A non-fatal event recorded while planning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Event classification.
    pub kind: DiagnosticKind,
    /// Course involved, if any.
    pub course: Option<String>,
    /// Slot involved, if any.
    pub slot: Option<SlotId>,
    /// Human-readable description.
    pub message: String,
}

/// Classification of plan diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// Course placed outside the normal constraints.
    ForcedPlacement,
    /// A fixed pin was dropped.
    IgnoredPin,
    /// The reserved slot setting was dropped.
    IgnoredReservedSlot,
}

impl Diagnostic {
    /// Creates a forced-placement diagnostic.
    pub fn forced_placement(course: impl Into<String>, slot: SlotId) -> Self {
        let course = course.into();
        Self {
            kind: DiagnosticKind::ForcedPlacement,
            message: format!(
                "course {course} force-placed in slot {slot} due to unmet constraints"
            ),
            course: Some(course),
            slot: Some(slot),
        }
    }

    /// Creates an ignored-pin diagnostic.
    pub fn ignored_pin(
        course: impl Into<String>,
        slot: impl AsRef<str>,
        reason: impl AsRef<str>,
    ) -> Self {
        let course = course.into();
        Self {
            kind: DiagnosticKind::IgnoredPin,
            message: format!(
                "pin of course {course} to slot {} ignored: {}",
                slot.as_ref(),
                reason.as_ref()
            ),
            course: Some(course),
            slot: slot.as_ref().parse().ok(),
        }
    }

    /// Creates an ignored-reserved-slot diagnostic.
    pub fn ignored_reserved_slot(raw: impl AsRef<str>) -> Self {
        Self {
            kind: DiagnosticKind::IgnoredReservedSlot,
            course: None,
            slot: None,
            message: format!("reserved slot '{}' is not a valid slot; ignored", raw.as_ref()),
        }
    }
}

impl StudyPlan {
    /// Slot holding `code`, if scheduled.
    pub fn slot_of(&self, code: &str) -> Option<SlotId> {
        self.plan
            .iter()
            .find(|(_, codes)| codes.iter().any(|c| c == code))
            .map(|(slot, _)| *slot)
    }

    /// Course codes in a slot (empty for unknown slots).
    pub fn courses_in(&self, slot: SlotId) -> &[String] {
        self.plan.get(&slot).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Credits of the real courses in a slot.
    ///
    /// Placeholders without metadata contribute nothing.
    pub fn slot_credits(&self, slot: SlotId) -> u32 {
        self.courses_in(slot)
            .iter()
            .filter_map(|c| self.courses.get(c))
            .fold(0u32, |acc, m| acc.saturating_add(m.credits))
    }

    /// All scheduled course codes, chronologically.
    pub fn scheduled_codes(&self) -> Vec<&str> {
        self.plan
            .values()
            .flatten()
            .filter(|c| self.courses.contains_key(*c))
            .map(String::as_str)
            .collect()
    }

    /// Diagnostics of the given kind.
    pub fn warnings_of(&self, kind: &DiagnosticKind) -> Vec<&Diagnostic> {
        self.warnings.iter().filter(|d| &d.kind == kind).collect()
    }

    /// Slots that received a forced placement.
    pub fn forced_slots(&self) -> Vec<SlotId> {
        let mut slots: Vec<SlotId> = self
            .warnings_of(&DiagnosticKind::ForcedPlacement)
            .iter()
            .filter_map(|d| d.slot)
            .collect();
        slots.sort();
        slots.dedup();
        slots
    }

    /// Whether the plan was built without any diagnostics.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Pretty JSON rendering.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Term;

    fn slot(year: u8, term: Term) -> SlotId {
        SlotId::new(year, term).unwrap()
    }

    fn sample_plan() -> StudyPlan {
        let mut plan = BTreeMap::new();
        for s in SlotId::all() {
            plan.insert(s, Vec::new());
        }
        plan.insert(slot(1, Term::First), vec!["A1000".to_string(), "C1000".to_string()]);
        plan.insert(slot(1, Term::Second), vec!["B2000".to_string()]);
        plan.insert(slot(3, Term::Second), vec!["EXCHANGE-PLACEHOLDER".to_string()]);

        let mut courses = BTreeMap::new();
        for (code, credits) in [("A1000", 4), ("B2000", 4), ("C1000", 2)] {
            courses.insert(
                code.to_string(),
                CourseSummary {
                    title: code.to_string(),
                    credits,
                    category: Category::CoreDomain,
                    flexible: false,
                },
            );
        }

        StudyPlan {
            config: PlannerConfig::default(),
            total_credits: 10,
            plan,
            exempted: Vec::new(),
            courses,
            warnings: vec![Diagnostic::forced_placement("B2000", slot(1, Term::Second))],
        }
    }

    #[test]
    fn test_slot_of() {
        let p = sample_plan();
        assert_eq!(p.slot_of("B2000"), Some(slot(1, Term::Second)));
        assert_eq!(p.slot_of("Z9999"), None);
    }

    #[test]
    fn test_slot_credits_ignores_placeholder() {
        let p = sample_plan();
        assert_eq!(p.slot_credits(slot(1, Term::First)), 6);
        assert_eq!(p.slot_credits(slot(3, Term::Second)), 0);
    }

    #[test]
    fn test_scheduled_codes_skip_placeholder() {
        let p = sample_plan();
        assert_eq!(p.scheduled_codes(), vec!["A1000", "C1000", "B2000"]);
    }

    #[test]
    fn test_forced_message_format() {
        let d = Diagnostic::forced_placement("CS3230", slot(2, Term::First));
        assert_eq!(
            d.message,
            "course CS3230 force-placed in slot y2s1 due to unmet constraints"
        );
        assert_eq!(d.slot, Some(slot(2, Term::First)));
    }

    #[test]
    fn test_forced_slots_and_clean() {
        let p = sample_plan();
        assert!(!p.is_clean());
        assert_eq!(p.forced_slots(), vec![slot(1, Term::Second)]);
        assert!(p.warnings_of(&DiagnosticKind::IgnoredPin).is_empty());
    }

    #[test]
    fn test_ignored_pin_parses_valid_slot() {
        let d = Diagnostic::ignored_pin("X1000", "y2s2", "unknown course");
        assert_eq!(d.slot, Some(slot(2, Term::Second)));
        let d = Diagnostic::ignored_pin("X1000", "y9s9", "invalid slot");
        assert_eq!(d.slot, None);
    }

    #[test]
    fn test_json_keys_are_slot_strings() {
        let p = sample_plan();
        let json: serde_json::Value = serde_json::from_str(&p.to_json().unwrap()).unwrap();
        assert_eq!(json["plan"]["y1s2"], serde_json::json!(["B2000"]));
        assert_eq!(json["courses"]["C1000"]["credits"], 2);
    }
}
