//! Study plan quality metrics (KPIs).
//!
//! Computes workload and balance indicators from a completed plan.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Credits by slot | Sum of real course credits per slot |
//! | Max / Mean Load | Over slots holding at least one course |
//! | Load Std-Dev | Population standard deviation of the same loads |
//! | Overloaded Slots | Slots above the configured credit cap |
//! | Hard / Flexible by slot | Category balance per slot |
//! | Forced Placements | Courses placed outside the normal constraints |
//! | Last Occupied Slot | Effective plan length |
//!
//! Reserved-slot placeholders carry no metadata and contribute nothing.

use std::collections::BTreeMap;

use crate::models::{Category, CourseSummary, DiagnosticKind, SlotId, StudyPlan};

/// Study plan performance indicators.
#[derive(Debug, Clone)]
pub struct PlanKpi {
    /// Credits per slot, chronological.
    pub credits_by_slot: BTreeMap<SlotId, u32>,
    /// Heaviest slot load.
    pub max_credits: u32,
    /// Mean load over occupied slots.
    pub mean_credits: f64,
    /// Population standard deviation of occupied slot loads.
    pub credit_std_dev: f64,
    /// Slots whose load exceeds the configured cap.
    pub overloaded_slots: usize,
    /// Hard courses per slot.
    pub hard_by_slot: BTreeMap<SlotId, usize>,
    /// Flexible-timing courses per slot.
    pub flexible_by_slot: BTreeMap<SlotId, usize>,
    /// Number of forced placements.
    pub forced_placements: usize,
    /// Last slot holding a real course.
    pub last_occupied_slot: Option<SlotId>,
}

fn is_hard(meta: &CourseSummary) -> bool {
    matches!(meta.category, Category::Foundation | Category::CoreDomain) || meta.category.is_focus()
}

impl PlanKpi {
    /// Computes KPIs from a plan.
    pub fn calculate(plan: &StudyPlan) -> Self {
        let cap = plan.config.max_credits_per_slot;
        let mut credits_by_slot: BTreeMap<SlotId, u32> = BTreeMap::new();
        let mut hard_by_slot: BTreeMap<SlotId, usize> = BTreeMap::new();
        let mut flexible_by_slot: BTreeMap<SlotId, usize> = BTreeMap::new();
        let mut last_occupied_slot = None;

        for (&slot, codes) in &plan.plan {
            let metas: Vec<&CourseSummary> =
                codes.iter().filter_map(|c| plan.courses.get(c)).collect();
            if !metas.is_empty() {
                last_occupied_slot = Some(slot);
            }
            credits_by_slot.insert(slot, metas.iter().fold(0u32, |acc, m| acc.saturating_add(m.credits)));
            hard_by_slot.insert(slot, metas.iter().filter(|m| is_hard(m)).count());
            flexible_by_slot.insert(slot, metas.iter().filter(|m| m.flexible).count());
        }

        let loads: Vec<f64> = plan
            .plan
            .iter()
            .filter(|(_, codes)| codes.iter().any(|c| plan.courses.contains_key(c)))
            .map(|(slot, _)| credits_by_slot[slot] as f64)
            .collect();

        let (mean_credits, credit_std_dev) = if loads.is_empty() {
            (0.0, 0.0)
        } else {
            let n = loads.len() as f64;
            let mean = loads.iter().sum::<f64>() / n;
            let variance = loads.iter().map(|l| (l - mean).powi(2)).sum::<f64>() / n;
            (mean, variance.sqrt())
        };

        Self {
            max_credits: credits_by_slot.values().copied().max().unwrap_or(0),
            overloaded_slots: credits_by_slot.values().filter(|&&c| c > cap).count(),
            forced_placements: plan.warnings_of(&DiagnosticKind::ForcedPlacement).len(),
            credits_by_slot,
            mean_credits,
            credit_std_dev,
            hard_by_slot,
            flexible_by_slot,
            last_occupied_slot,
        }
    }

    /// Whether the plan meets the given balance thresholds.
    pub fn meets_thresholds(&self, max_std_dev: f64, max_overloaded: usize) -> bool {
        self.credit_std_dev <= max_std_dev && self.overloaded_slots <= max_overloaded
    }
}
