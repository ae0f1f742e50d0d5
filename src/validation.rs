//! Catalog validation and plan auditing.
//!
//! Scheduling never fails on bad data; these checks report what the
//! scheduler silently tolerates. Detects:
//! - Duplicate course codes
//! - Prerequisite / corequisite references to unknown courses
//! - Corequisites that are not declared on both sides
//! - Circular prerequisite dependencies (DAG validation)
//!
//! [`validate_plan`] audits a produced plan: prerequisites not completed
//! before a course, corequisites split across slots, and slots over the
//! credit cap.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use std::collections::{HashMap, HashSet};

use crate::models::{base_code, Catalog, Course, StudyPlan};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two courses share the same code.
    DuplicateCode,
    /// A prerequisite matches no catalog course, even by base code.
    UnknownPrerequisite,
    /// A corequisite is not in the catalog.
    UnknownCorequisite,
    /// A corequisite does not list the course back.
    NonReciprocalCorequisite,
    /// Prerequisite graph contains a cycle.
    CyclicPrerequisite,
    /// A planned course precedes one of its prerequisites.
    UnmetPrerequisite,
    /// Corequisites planned in different slots.
    SplitCorequisite,
    /// A slot exceeds the credit cap.
    OverCapacity,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

fn into_result(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a raw course list from the catalog provider.
///
/// Checks:
/// 1. No duplicate course codes
/// 2. Every prerequisite shares a base code with some listed course
/// 3. Every corequisite is a listed course
/// 4. Corequisites are declared on both sides
/// 5. No circular prerequisite dependencies
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_catalog(courses: &[Course]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut codes = HashSet::new();
    for course in courses {
        if !codes.insert(course.code.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateCode,
                format!("Duplicate course code: {}", course.code),
            ));
        }
    }
    let bases: HashSet<String> = courses.iter().map(|c| base_code(&c.code)).collect();
    let by_code: HashMap<&str, &Course> = courses
        .iter()
        .rev()
        .map(|c| (c.code.as_str(), c))
        .collect();

    for course in courses {
        for prereq in &course.prerequisites {
            if !bases.contains(&base_code(prereq)) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownPrerequisite,
                    format!(
                        "Course '{}' references unknown prerequisite '{}'",
                        course.code, prereq
                    ),
                ));
            }
        }

        for coreq in &course.corequisites {
            match by_code.get(coreq.as_str()) {
                None => errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownCorequisite,
                    format!(
                        "Course '{}' references unknown corequisite '{}'",
                        course.code, coreq
                    ),
                )),
                Some(other) if !other.corequisites.contains(&course.code) => {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::NonReciprocalCorequisite,
                        format!(
                            "Course '{}' lists corequisite '{}', which does not list it back",
                            course.code, coreq
                        ),
                    ))
                }
                Some(_) => {}
            }
        }
    }

    if let Some(cycle_err) = detect_cycles(courses) {
        errors.push(cycle_err);
    }

    into_result(errors)
}

/// Detects cycles in the prerequisite graph using DFS.
///
/// # Algorithm
/// Topological sort via DFS. If a back-edge is found (visiting a node
/// currently in the recursion stack), a cycle exists. Roots are visited in
/// list order so the reported course is deterministic.
///
/// # Reference
/// Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4
fn detect_cycles(courses: &[Course]) -> Option<ValidationError> {
    let listed: HashSet<&str> = courses.iter().map(|c| c.code.as_str()).collect();

    // prerequisite → dependents
    let mut adj: HashMap<&str, Vec<&str>> = HashMap::new();
    for course in courses {
        for prereq in &course.prerequisites {
            if listed.contains(prereq.as_str()) {
                adj.entry(prereq.as_str()).or_default().push(course.code.as_str());
            }
        }
    }

    let mut visited = HashSet::new();
    let mut in_stack = HashSet::new();

    for course in courses {
        let node = course.code.as_str();
        if !visited.contains(node) && has_cycle_dfs(node, &adj, &mut visited, &mut in_stack) {
            return Some(ValidationError::new(
                ValidationErrorKind::CyclicPrerequisite,
                format!("Circular prerequisite chain detected involving course '{node}'"),
            ));
        }
    }

    None
}

fn has_cycle_dfs<'a>(
    node: &'a str,
    adj: &HashMap<&'a str, Vec<&'a str>>,
    visited: &mut HashSet<&'a str>,
    in_stack: &mut HashSet<&'a str>,
) -> bool {
    visited.insert(node);
    in_stack.insert(node);

    if let Some(neighbors) = adj.get(node) {
        for &next in neighbors {
            if in_stack.contains(next) {
                return true; // Back edge → cycle
            }
            if !visited.contains(next) && has_cycle_dfs(next, adj, visited, in_stack) {
                return true;
            }
        }
    }

    in_stack.remove(node);
    false
}

/// Audits a produced plan against its catalog.
///
/// Walks the plan chronologically, treating exempted courses and every
/// course placed earlier in the walk (including earlier in the same slot)
/// as completed. Prerequisites are matched by base code; the full AND/OR
/// tree is used when the course carries one. Flexible-timing courses are
/// not sequence-checked, and prerequisites with no catalog counterpart are
/// assumed satisfied, mirroring the scheduler.
///
/// Checks:
/// 1. Prerequisites completed before each course
/// 2. Corequisites planned in the same slot
/// 3. Slot credit totals within the configured cap
pub fn validate_plan(plan: &StudyPlan, catalog: &Catalog) -> ValidationResult {
    let mut errors = Vec::new();
    let mut completed: HashSet<String> = plan.exempted.iter().map(|c| catalog.base_of(c)).collect();

    for (slot, codes) in &plan.plan {
        for code in codes {
            let Some(course) = catalog.get(code) else {
                continue;
            };
            if !course.is_flexible() {
                let missing = unmet_prerequisites(course, catalog, &completed);
                if !missing.is_empty() {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::UnmetPrerequisite,
                        format!(
                            "Course '{}' in {} is missing prerequisites: {}",
                            code,
                            slot,
                            missing.join(", ")
                        ),
                    ));
                }
            }
            completed.insert(catalog.base_of(code));
        }

        let credits = plan.slot_credits(*slot);
        if credits > plan.config.max_credits_per_slot {
            errors.push(ValidationError::new(
                ValidationErrorKind::OverCapacity,
                format!(
                    "Slot {} carries {} credits (cap {})",
                    slot, credits, plan.config.max_credits_per_slot
                ),
            ));
        }
    }

    let mut reported: HashSet<(&str, &str)> = HashSet::new();
    for (slot, codes) in &plan.plan {
        for code in codes {
            let Some(course) = catalog.get(code) else {
                continue;
            };
            for coreq in &course.corequisites {
                let Some(other) = plan.slot_of(coreq) else {
                    continue;
                };
                let pair = if code.as_str() < coreq.as_str() {
                    (code.as_str(), coreq.as_str())
                } else {
                    (coreq.as_str(), code.as_str())
                };
                if other != *slot && reported.insert(pair) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::SplitCorequisite,
                        format!(
                            "Corequisites '{}' ({}) and '{}' ({}) are in different slots",
                            code, slot, coreq, other
                        ),
                    ));
                }
            }
        }
    }

    into_result(errors)
}

fn unmet_prerequisites(course: &Course, catalog: &Catalog, completed: &HashSet<String>) -> Vec<String> {
    let own_base = catalog.base_of(&course.code);
    let is_done = |code: &str| {
        let base = catalog.base_of(code);
        base == own_base || !catalog.has_base(&base) || completed.contains(&base)
    };

    match &course.prerequisite_tree {
        Some(tree) => tree.missing(&is_done),
        None => course
            .prerequisites
            .iter()
            .filter(|p| !is_done(p.as_str()))
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, SlotId};
    use crate::prereq::PrereqTree;
    use crate::scheduler::{generate_study_plan, PlannerConfig};

    fn core(code: &str, prereqs: &[&str]) -> Course {
        Course::new(code, code, 4, Category::CoreDomain).with_prerequisites(prereqs.iter().copied())
    }

    fn config() -> PlannerConfig {
        PlannerConfig::new().without_default_exemptions()
    }

    fn has_kind(result: ValidationResult, kind: ValidationErrorKind) -> bool {
        result.unwrap_err().iter().any(|e| e.kind == kind)
    }

    #[test]
    fn test_valid_catalog() {
        let courses = vec![
            core("CS1101S", &[]),
            core("CS2030S", &["CS1101S"]),
            core("CS2040S", &["CS1101"]), // base-code match
        ];
        assert!(validate_catalog(&courses).is_ok());
    }

    #[test]
    fn test_duplicate_code() {
        let courses = vec![core("CS1101S", &[]), core("CS1101S", &[])];
        assert!(has_kind(validate_catalog(&courses), ValidationErrorKind::DuplicateCode));
    }

    #[test]
    fn test_unknown_prerequisite() {
        let courses = vec![core("CS2030S", &["CS1010"])];
        assert!(has_kind(
            validate_catalog(&courses),
            ValidationErrorKind::UnknownPrerequisite
        ));
    }

    #[test]
    fn test_corequisite_checks() {
        let courses = vec![
            core("CS2101", &[]).with_corequisite("CS2103T"),
            core("CS2103T", &[]),
            core("CS2113", &[]).with_corequisite("CS9999"),
        ];
        let errors = validate_catalog(&courses).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NonReciprocalCorequisite));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownCorequisite));
    }

    #[test]
    fn test_cyclic_prerequisite() {
        // A → B → C → A
        let courses = vec![
            core("A1000", &["C1000"]),
            core("B1000", &["A1000"]),
            core("C1000", &["B1000"]),
        ];
        let errors = validate_catalog(&courses).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::CyclicPrerequisite);
        assert!(errors[0].message.contains("A1000"));
    }

    #[test]
    fn test_no_cycle_in_chain() {
        let courses = vec![core("A1000", &[]), core("B1000", &["A1000"]), core("C1000", &["B1000"])];
        assert!(validate_catalog(&courses).is_ok());
    }

    #[test]
    fn test_generated_plan_passes_audit() {
        let catalog = Catalog::new(vec![
            core("A1000", &[]),
            core("B1000", &["A1000"]),
            core("C2000", &["B1000"]).with_corequisite("D2000"),
            core("D2000", &[]).with_corequisite("C2000"),
        ]);
        let plan = generate_study_plan(&catalog, &config());
        assert!(validate_plan(&plan, &catalog).is_ok());
    }

    #[test]
    fn test_audit_flags_misordered_pin() {
        let catalog = Catalog::new(vec![core("A1000", &[]), core("B1000", &["A1000"])]);
        let plan = generate_study_plan(
            &catalog,
            &config().with_pin("A1000", "y2s1").with_pin("B1000", "y1s1"),
        );
        let errors = validate_plan(&plan, &catalog).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::UnmetPrerequisite);
        assert!(errors[0].message.contains("'B1000' in y1s1"));
    }

    #[test]
    fn test_audit_uses_prerequisite_tree() {
        let catalog = Catalog::new(vec![
            core("A1000", &[]),
            core("Z1000", &[]),
            Course::new("B2000", "B", 4, Category::CoreDomain)
                .with_prerequisite_tree(PrereqTree::any_of(["A1000", "Z1000"])),
        ]);
        // The flat list is the first OR branch; the tree accepts either.
        let plan = generate_study_plan(
            &catalog,
            &config()
                .with_pin("Z1000", "y1s1")
                .with_pin("B2000", "y1s2")
                .with_pin("A1000", "y2s1"),
        );
        assert!(validate_plan(&plan, &catalog).is_ok());
    }

    #[test]
    fn test_audit_flags_split_corequisites_and_overload() {
        let catalog = Catalog::new(vec![
            core("C2000", &[]).with_corequisite("D2000"),
            core("D2000", &[]).with_corequisite("C2000"),
        ]);
        let plan = generate_study_plan(
            &catalog,
            &config()
                .with_max_credits(4)
                .with_pin("C2000", "y1s1")
                .with_pin("D2000", "y1s2"),
        );
        assert!(has_kind(
            validate_plan(&plan, &catalog),
            ValidationErrorKind::SplitCorequisite
        ));

        let mut overloaded = plan.clone();
        overloaded.config.max_credits_per_slot = 2;
        let errors = validate_plan(&overloaded, &catalog).unwrap_err();
        let over: Vec<_> = errors
            .iter()
            .filter(|e| e.kind == ValidationErrorKind::OverCapacity)
            .collect();
        assert_eq!(over.len(), 2);
        assert_eq!(plan.slot_of("C2000"), "y1s1".parse::<SlotId>().ok());
    }
}
