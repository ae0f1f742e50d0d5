//! Greedy semester assigner.
//!
//! # Algorithm
//!
//! 1. **Fixed placement**: caller pins are placed unconditionally.
//! 2. **Greedy placement**: courses are taken in topological order; each
//!    goes into the first chronological slot that passes every check
//!    (prerequisites placed in that slot or earlier, term offering, credit
//!    cap, hard-course cap, flexible throttling, corequisite feasibility).
//!    Corequisites are placed together with the course.
//! 3. **Fallback**: a course no slot accepts is forced into the first slot
//!    whose strictly earlier slots hold its prerequisites, ignoring the
//!    caps. Courses that still don't fit are retried, normal checks first,
//!    until a pass places nothing, and the rest are forced into the last
//!    regular slot.
//!
//! Every forced placement is reported as a diagnostic.
//!
//! # Complexity
//! O(C × S × P) for C courses, S slots and P prerequisites per course.

use std::collections::{BTreeMap, HashMap, HashSet};

use super::PlannerConfig;
use crate::models::{Catalog, Course, Diagnostic, SemesterSlot, SlotId};

/// Placeholder entry reported for the reserved slot.
pub const RESERVED_PLACEHOLDER: &str = "EXCHANGE-PLACEHOLDER";

/// Result of a semester assignment pass.
#[derive(Debug, Clone, PartialEq)]
pub struct SemesterAssignment {
    /// Regular slots in chronological order.
    pub slots: Vec<SemesterSlot>,
    /// Forced placements and ignored settings.
    pub diagnostics: Vec<Diagnostic>,
}

impl SemesterAssignment {
    /// Slot key → course codes.
    pub fn to_map(&self) -> BTreeMap<SlotId, Vec<String>> {
        self.slots
            .iter()
            .map(|s| (s.id, s.courses.clone()))
            .collect()
    }

    /// Slot by id.
    pub fn slot(&self, id: SlotId) -> Option<&SemesterSlot> {
        self.slots.iter().find(|s| s.id == id)
    }

    /// Slot holding `code`, if any.
    pub fn slot_of(&self, code: &str) -> Option<SlotId> {
        self.slots.iter().find(|s| s.contains(code)).map(|s| s.id)
    }
}

/// Per-request mutable state. Never shared across requests.
#[derive(Debug)]
struct SchedulingState {
    slots: Vec<SemesterSlot>,
    exempted: HashSet<String>,
    scheduled: HashSet<String>,
    /// Base code → earliest placement rank (0 = exempted, slot index + 1 otherwise).
    placed_rank: HashMap<String, usize>,
    diagnostics: Vec<Diagnostic>,
}

impl SchedulingState {
    fn new(catalog: &Catalog, exempted: &[String]) -> Self {
        let mut state = Self {
            slots: SlotId::all().into_iter().map(SemesterSlot::new).collect(),
            exempted: exempted.iter().cloned().collect(),
            scheduled: HashSet::new(),
            placed_rank: HashMap::new(),
            diagnostics: Vec::new(),
        };
        for code in exempted {
            state.placed_rank.insert(catalog.base_of(code), 0);
        }
        state
    }

    fn is_done(&self, code: &str) -> bool {
        self.scheduled.contains(code) || self.exempted.contains(code)
    }

    fn place(&mut self, catalog: &Catalog, idx: usize, course: &Course) {
        self.slots[idx].add(course);
        self.scheduled.insert(course.code.clone());
        let rank = self
            .placed_rank
            .entry(catalog.base_of(&course.code))
            .or_insert(idx + 1);
        *rank = (*rank).min(idx + 1);
        log::debug!("placed {} in {}", course.code, self.slots[idx].id);
    }

    fn force(&mut self, catalog: &Catalog, idx: usize, course: &Course, bundle: &[&Course]) {
        let slot = self.slots[idx].id;
        for c in std::iter::once(course).chain(bundle.iter().copied()) {
            self.place(catalog, idx, c);
            log::warn!("course {} force-placed in slot {}", c.code, slot);
            self.diagnostics.push(Diagnostic::forced_placement(&c.code, slot));
        }
    }
}

/// Places topologically ordered courses into semester slots.
///
/// # Example
///
/// ```
/// use u_curriculum::models::{Catalog, Category, Course};
/// use u_curriculum::ordering::priority_topological_sort;
/// use u_curriculum::scheduler::{PlannerConfig, SemesterAssigner};
///
/// let catalog = Catalog::new(vec![
///     Course::new("CS1101S", "PM I", 4, Category::Foundation),
///     Course::new("CS2030S", "PM II", 4, Category::CoreDomain).with_prerequisite("CS1101S"),
/// ]);
/// let config = PlannerConfig::new().without_default_exemptions();
/// let order = priority_topological_sort(&catalog);
///
/// let result = SemesterAssigner::new(&catalog, &config).assign(&order);
/// assert_eq!(result.slot_of("CS1101S").unwrap().to_string(), "y1s1");
/// assert!(result.diagnostics.is_empty());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SemesterAssigner<'a> {
    catalog: &'a Catalog,
    config: &'a PlannerConfig,
}

impl<'a> SemesterAssigner<'a> {
    /// Creates an assigner over a read-only catalog.
    pub fn new(catalog: &'a Catalog, config: &'a PlannerConfig) -> Self {
        Self { catalog, config }
    }

    /// Assigns every non-exempted course in `order` to a slot.
    pub fn assign(&self, order: &[String]) -> SemesterAssignment {
        let exempted = self.config.resolved_exemptions();
        let mut state = SchedulingState::new(self.catalog, &exempted);

        self.reserve_slot(&mut state);
        self.place_fixed(&mut state);

        let mut deferred: Vec<&Course> = Vec::new();
        for code in order {
            if state.is_done(code) {
                continue;
            }
            let Some(course) = self.catalog.get(code) else {
                log::debug!("ordered code {code} has no catalog entry; skipped");
                continue;
            };

            if self.place_strict(&mut state, course) || self.place_relaxed(&mut state, course) {
                continue;
            }
            log::debug!("no slot accepts {} yet; deferring", course.code);
            deferred.push(course);
        }

        // Retry until a pass places nothing; a deferred course may be waiting
        // on another deferred course.
        loop {
            let before = deferred.len();
            deferred.retain(|course| {
                !(state.is_done(&course.code)
                    || self.place_strict(&mut state, course)
                    || self.place_relaxed(&mut state, course))
            });
            if deferred.is_empty() || deferred.len() == before {
                break;
            }
        }

        for course in deferred {
            if !state.is_done(&course.code) {
                self.place_last_resort(&mut state, course);
            }
        }

        SemesterAssignment {
            slots: state.slots,
            diagnostics: state.diagnostics,
        }
    }

    fn reserve_slot(&self, state: &mut SchedulingState) {
        let Some(raw) = self.config.reserved_slot.as_deref() else {
            return;
        };
        match raw.parse::<SlotId>() {
            Ok(id) => {
                state.slots[id.index()]
                    .reserve(RESERVED_PLACEHOLDER, self.config.max_credits_per_slot);
            }
            Err(_) => {
                log::warn!("reserved slot '{raw}' is invalid; ignored");
                state.diagnostics.push(Diagnostic::ignored_reserved_slot(raw));
            }
        }
    }

    /// Phase 1: caller pins, trusted and unchecked.
    fn place_fixed(&self, state: &mut SchedulingState) {
        for (code, raw_slot) in &self.config.fixed_pins {
            if state.is_done(code) {
                continue;
            }
            let Some(course) = self.catalog.get(code) else {
                log::warn!("pin {code} -> {raw_slot}: unknown course; ignored");
                state
                    .diagnostics
                    .push(Diagnostic::ignored_pin(code, raw_slot, "unknown course"));
                continue;
            };
            let Ok(slot) = raw_slot.parse::<SlotId>() else {
                log::warn!("pin {code} -> {raw_slot}: invalid slot; ignored");
                state
                    .diagnostics
                    .push(Diagnostic::ignored_pin(code, raw_slot, "invalid slot"));
                continue;
            };
            if state.slots[slot.index()].reserved {
                log::warn!("pin {code} -> {raw_slot}: slot is reserved; ignored");
                state
                    .diagnostics
                    .push(Diagnostic::ignored_pin(code, raw_slot, "slot is reserved"));
                continue;
            }
            state.place(self.catalog, slot.index(), course);
        }
    }

    /// Phase 2: first slot passing every check.
    fn place_strict(&self, state: &mut SchedulingState, course: &Course) -> bool {
        for idx in 0..state.slots.len() {
            if let Some(bundle) = self.strict_fit(state, course, idx) {
                state.place(self.catalog, idx, course);
                for coreq in bundle {
                    state.place(self.catalog, idx, coreq);
                }
                return true;
            }
        }
        false
    }

    fn strict_fit(
        &self,
        state: &SchedulingState,
        course: &Course,
        idx: usize,
    ) -> Option<Vec<&'a Course>> {
        let slot = &state.slots[idx];
        if slot.reserved {
            return None;
        }
        let flexible = course.is_flexible();
        let cap = self.config.max_credits_per_slot;

        if !flexible
            && (!self.prereqs_placed_by(state, course, idx + 1, None)
                || !course.is_offered_in(slot.id.term))
        {
            return None;
        }
        if !slot.fits(course.credits, cap) {
            return None;
        }
        if course.is_hard() && slot.hard_count >= self.config.max_hard_per_slot {
            let (_, preferred_max) = course.preferred_year_range();
            if slot.id.year <= preferred_max {
                return None;
            }
        }
        if flexible
            && slot.flexible_count >= self.config.max_flexible_per_slot
            && !slot.id.is_final_year()
        {
            return None;
        }

        let own_base = self.catalog.base_of(&course.code);
        let bundle = self.pending_coreqs(state, course);
        let mut credits = course.credits;
        for coreq in &bundle {
            if !coreq.is_flexible()
                && !self.prereqs_placed_by(state, coreq, idx + 1, Some(&own_base))
            {
                return None;
            }
            credits = credits.saturating_add(coreq.credits);
            if !slot.fits(credits, cap) {
                return None;
            }
        }
        Some(bundle)
    }

    /// Fallback: prerequisites must sit in strictly earlier slots; caps ignored.
    fn place_relaxed(&self, state: &mut SchedulingState, course: &Course) -> bool {
        let flexible = course.is_flexible();
        let own_base = self.catalog.base_of(&course.code);

        for idx in 0..state.slots.len() {
            let slot = &state.slots[idx];
            if slot.reserved {
                continue;
            }
            if !flexible
                && (!self.prereqs_placed_by(state, course, idx, None)
                    || !course.is_offered_in(slot.id.term))
            {
                continue;
            }

            let bundle = self.pending_coreqs(state, course);
            let coreqs_ok = bundle.iter().all(|coreq| {
                coreq.is_flexible() || self.prereqs_placed_by(state, coreq, idx, Some(&own_base))
            });
            if !coreqs_ok {
                continue;
            }

            state.force(self.catalog, idx, course, &bundle);
            return true;
        }
        false
    }

    /// Terminal placement for courses no rule can place (e.g., cyclic prerequisites).
    fn place_last_resort(&self, state: &mut SchedulingState, course: &Course) {
        let Some(idx) = state.slots.iter().rposition(|s| !s.reserved) else {
            log::warn!("no regular slot available for {}", course.code);
            return;
        };
        let bundle = self.pending_coreqs(state, course);
        state.force(self.catalog, idx, course, &bundle);
    }

    /// Unplaced, non-exempted catalog corequisites of `course`.
    fn pending_coreqs(&self, state: &SchedulingState, course: &Course) -> Vec<&'a Course> {
        let mut bundle: Vec<&'a Course> = Vec::new();
        for code in &course.corequisites {
            if code == &course.code || state.is_done(code) {
                continue;
            }
            if let Some(coreq) = self.catalog.get(code) {
                if !bundle.iter().any(|c| c.code == coreq.code) {
                    bundle.push(coreq);
                }
            }
        }
        bundle
    }

    /// Prerequisite base codes the scheduler enforces.
    ///
    /// Codes with no catalog course sharing their base are assumed satisfied,
    /// as are references to the course's own base.
    fn tracked_prereqs(&self, course: &Course) -> Vec<String> {
        let own_base = self.catalog.base_of(&course.code);
        course
            .prerequisites
            .iter()
            .map(|p| self.catalog.base_of(p))
            .filter(|base| base != &own_base && self.catalog.has_base(base))
            .collect()
    }

    /// Whether every tracked prerequisite sits at rank `max_rank` or earlier.
    ///
    /// Rank 0 is an exemption and rank `i + 1` is slot `i`, so `idx + 1`
    /// admits same-slot placements and `idx` requires strictly earlier ones.
    fn prereqs_placed_by(
        &self,
        state: &SchedulingState,
        course: &Course,
        max_rank: usize,
        extra: Option<&str>,
    ) -> bool {
        self.tracked_prereqs(course).iter().all(|base| {
            Some(base.as_str()) == extra
                || state
                    .placed_rank
                    .get(base)
                    .is_some_and(|&rank| rank <= max_rank)
        })
    }
}
