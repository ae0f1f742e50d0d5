//! Study plan builder.
//!
//! Composes the pipeline: exemptions are resolved, exempted codes missing
//! from the catalog get placeholder metadata, the catalog is ordered, the
//! ordered courses are assigned, and the result is packaged as a
//! [`StudyPlan`].

use std::collections::BTreeMap;

use super::{PlannerConfig, SemesterAssigner};
use crate::models::{Catalog, Category, Course, CourseSummary, StudyPlan};
use crate::ordering::priority_topological_sort;

/// Title given to exempted codes without known metadata.
pub const PLACEHOLDER_TITLE: &str = "Exempted Course";

/// Credit weight given to exempted codes without known metadata.
pub const PLACEHOLDER_CREDITS: u32 = 4;

/// Metadata of the built-in default exemptions.
const KNOWN_EXEMPTIONS: [(&str, &str, u32); 3] = [
    ("MA1301", "Introductory Mathematics", 4),
    ("ES1103", "English for Academic Purposes", 4),
    ("ES1000", "Basic English Course", 0),
];

/// Catalog entry standing in for an exempted code with no catalog metadata.
pub fn exemption_placeholder(code: &str) -> Course {
    let (title, credits) = KNOWN_EXEMPTIONS
        .iter()
        .find(|(known, _, _)| *known == code)
        .map(|(_, title, credits)| (*title, *credits))
        .unwrap_or((PLACEHOLDER_TITLE, PLACEHOLDER_CREDITS));
    Course::new(code, title, credits, Category::UnrestrictedElective)
}

/// Builds a study plan from a catalog and a configuration.
///
/// # Example
///
/// ```
/// use u_curriculum::models::{Catalog, Category, Course};
/// use u_curriculum::scheduler::{PlanBuilder, PlannerConfig};
///
/// let catalog = Catalog::new(vec![
///     Course::new("CS1101S", "PM I", 4, Category::Foundation),
///     Course::new("CS2030S", "PM II", 4, Category::CoreDomain).with_prerequisite("CS1101S"),
/// ]);
/// let plan = PlanBuilder::new(&catalog)
///     .with_config(PlannerConfig::new().with_exemption("CS1101S"))
///     .build();
///
/// assert_eq!(plan.slot_of("CS2030S").unwrap().to_string(), "y1s1");
/// assert!(plan.exempted.contains(&"CS1101S".to_string()));
/// assert!(plan.is_clean());
/// ```
#[derive(Debug, Clone)]
pub struct PlanBuilder<'a> {
    catalog: &'a Catalog,
    config: PlannerConfig,
}

impl<'a> PlanBuilder<'a> {
    /// Creates a builder with the default configuration.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            config: PlannerConfig::default(),
        }
    }

    /// Sets the planner configuration.
    pub fn with_config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    /// Runs ordering and assignment and packages the result.
    pub fn build(&self) -> StudyPlan {
        let exempted = self.config.resolved_exemptions();
        let catalog = self.catalog.extended(
            exempted
                .iter()
                .filter(|code| !self.catalog.contains(code))
                .map(|code| exemption_placeholder(code)),
        );

        let order = priority_topological_sort(&catalog);
        let assignment = SemesterAssigner::new(&catalog, &self.config).assign(&order);

        let courses: BTreeMap<String, CourseSummary> = catalog
            .iter()
            .map(|c| (c.code.clone(), CourseSummary::from(c)))
            .collect();

        let mut config = self.config.clone();
        config.exempted_codes = exempted.clone();

        let plan = StudyPlan {
            config,
            total_credits: catalog.total_credits(),
            plan: assignment.to_map(),
            exempted,
            courses,
            warnings: assignment.diagnostics,
        };

        log::info!(
            "study plan built: {} course(s), {} exempted, {} credits, {} warning(s)",
            plan.scheduled_codes().len(),
            plan.exempted.len(),
            plan.total_credits,
            plan.warnings.len()
        );
        plan
    }
}

/// Builds a study plan in one call.
pub fn generate_study_plan(catalog: &Catalog, config: &PlannerConfig) -> StudyPlan {
    PlanBuilder::new(catalog).with_config(config.clone()).build()
}
