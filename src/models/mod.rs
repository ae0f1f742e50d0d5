//! Curriculum domain models.
//!
//! Provides the data types for describing a degree program's courses and
//! the study plans produced for it.
//!
//! # Domain Mappings
//!
//! | u-curriculum | Scheduling analogue |
//! |--------------|---------------------|
//! | Course | Job |
//! | Prerequisite | Precedence constraint |
//! | Corequisite | Synchronization constraint |
//! | SemesterSlot | Capacity-bounded time bucket |
//! | StudyPlan | Schedule |

mod catalog;
mod code;
mod course;
mod plan;
mod slot;

pub use catalog::Catalog;
pub use code::{base_code, CourseCode};
pub use course::{Category, Course, Term};
pub use plan::{CourseSummary, Diagnostic, DiagnosticKind, StudyPlan};
pub use slot::{SemesterSlot, SlotId, PLAN_YEARS, REGULAR_SLOTS};
