//! Academic program planning engine.
//!
//! Turns a catalog of required courses (prerequisites, corequisites,
//! credit weights, categories) into a semester-by-semester study plan that
//! respects ordering and workload constraints while balancing heavy and
//! light courses across the timeline.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Course`, `Catalog`, `CourseCode`, `SlotId`,
//!   `SemesterSlot`, `StudyPlan`, `Diagnostic`
//! - **`prereq`**: AND/OR prerequisite trees
//! - **`ordering`**: Dependency graph and priority topological sort
//! - **`scheduler`**: Semester assigner, plan builder, configuration, KPIs
//! - **`validation`**: Catalog integrity checks and plan audit
//! - **`error`**: Error type of the loading surfaces
//!
//! # Quick Start
//!
//! ```
//! use u_curriculum::models::{Catalog, Category, Course};
//! use u_curriculum::scheduler::{generate_study_plan, PlannerConfig};
//!
//! let catalog = Catalog::new(vec![
//!     Course::new("CS1101S", "Programming Methodology", 4, Category::Foundation),
//!     Course::new("CS2030S", "Programming Methodology II", 4, Category::CoreDomain)
//!         .with_prerequisite("CS1101S"),
//!     Course::new("GEA1000", "Quantitative Reasoning", 4, Category::GeneralEducation).flexible(),
//! ]);
//!
//! let plan = generate_study_plan(&catalog, &PlannerConfig::default());
//! assert_eq!(plan.plan.len(), 8);
//! assert!(plan.slot_of("CS2030S").is_some());
//! ```
//!
//! # Architecture
//!
//! The scheduling core is a pure function of (catalog, configuration): no
//! I/O, no randomness, no shared mutable state. It never fails; anything it
//! has to relax or ignore is reported as a `Diagnostic` on the plan. Only
//! the loading surfaces (configuration files, catalog JSON, slot keys)
//! return [`PlanError`].
//!
//! # References
//!
//! - Kahn (1962), "Topological sorting of large networks"
//! - Cormen et al. (2009), "Introduction to Algorithms", Ch. 22

pub mod error;
pub mod models;
pub mod ordering;
pub mod prereq;
pub mod scheduler;
pub mod validation;

pub use error::{PlanError, PlanResult};
