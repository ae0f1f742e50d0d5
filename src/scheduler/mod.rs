//! Semester assignment, plan building and KPI evaluation.
//!
//! # Algorithm
//!
//! `SemesterAssigner` is a single-pass greedy heuristic: courses arrive in
//! priority topological order and each takes the first chronological slot
//! that satisfies prerequisite, term, workload, category-balance and
//! corequisite constraints. A relaxed fallback guarantees every course is
//! placed; each relaxation is reported as a diagnostic. It produces one
//! plausible plan quickly, not an optimal one.
//!
//! `PlanBuilder` wires ordering and assignment together and packages the
//! result as a [`StudyPlan`](crate::models::StudyPlan).
//!
//! # KPI
//!
//! `PlanKpi` computes workload balance metrics: per-slot credits, load
//! spread, overloaded slots, forced placements.
//!
//! # References
//!
//! - Kahn (1962), "Topological sorting of large networks"
//! - Coffman, Garey & Johnson (1996), "Approximation Algorithms for Bin Packing: A Survey"

mod assigner;
mod builder;
mod config;
mod kpi;

pub use assigner::{SemesterAssigner, SemesterAssignment, RESERVED_PLACEHOLDER};
pub use builder::{
    exemption_placeholder, generate_study_plan, PlanBuilder, PLACEHOLDER_CREDITS,
    PLACEHOLDER_TITLE,
};
pub use config::{PlannerConfig, DEFAULT_EXEMPTIONS};
pub use kpi::PlanKpi;
