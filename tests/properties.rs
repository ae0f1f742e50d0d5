use std::collections::HashSet;

use proptest::prelude::*;
use proptest::sample::Index;
use u_curriculum::models::{base_code, Catalog, Category, Course, DiagnosticKind, SlotId, Term};
use u_curriculum::ordering::priority_topological_sort;
use u_curriculum::scheduler::{generate_study_plan, PlannerConfig};

const CATEGORIES: [Category; 7] = [
    Category::Foundation,
    Category::CoreDomain,
    Category::FocusPrimary,
    Category::FocusElective,
    Category::GeneralEducation,
    Category::UnrestrictedElective,
    Category::Unclassified,
];

fn code(i: usize) -> String {
    format!("CS{}", 1000 + i)
}

/// Acyclic catalogs: course `i` may only require courses listed before it.
fn acyclic_catalog() -> impl Strategy<Value = Catalog> {
    proptest::collection::vec(
        (
            0u32..=8,
            0usize..CATEGORIES.len(),
            any::<bool>(),
            0u8..3,
            proptest::collection::vec(any::<Index>(), 0..3),
        ),
        0..30,
    )
    .prop_map(|specs| {
        let courses = specs
            .into_iter()
            .enumerate()
            .map(|(i, (credits, category, flexible, terms, prereqs))| {
                let mut course = Course::new(code(i), "", credits, CATEGORIES[category]);
                if i > 0 {
                    for idx in prereqs {
                        course = course.with_prerequisite(code(idx.index(i)));
                    }
                }
                course.offered_terms = match terms {
                    0 => Vec::new(),
                    1 => vec![Term::First],
                    _ => vec![Term::Second],
                };
                if flexible {
                    course = course.flexible();
                }
                course
            })
            .collect();
        Catalog::new(courses)
    })
}

/// Catalogs with suffixed codes, bare-base prerequisites and corequisite pairs.
///
/// Courses `2k` and `2k + 1` may be declared corequisites of each other.
/// Prerequisites name the bare base (`CS1000`) of a course in an earlier
/// pair, whatever its suffix. No term restrictions.
fn variant_catalog() -> impl Strategy<Value = Catalog> {
    proptest::collection::vec(
        (
            0u32..=8,
            0usize..CATEGORIES.len(),
            any::<bool>(),
            any::<bool>(),
            proptest::collection::vec(any::<Index>(), 0..3),
        ),
        0..24,
    )
    .prop_map(|entries| {
        let n = entries.len();
        let codes: Vec<String> = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| if entry.2 { format!("{}S", code(i)) } else { code(i) })
            .collect();
        let paired: Vec<bool> = entries.iter().map(|entry| entry.3).collect();

        let courses = entries
            .into_iter()
            .enumerate()
            .map(|(i, (credits, category, _, _, prereqs))| {
                let pair_start = i - i % 2;
                let mut course = Course::new(codes[i].clone(), "", credits, CATEGORIES[category]);
                if pair_start > 0 {
                    for idx in prereqs {
                        course = course.with_prerequisite(code(idx.index(pair_start)));
                    }
                }
                let partner = if i % 2 == 0 { i + 1 } else { i - 1 };
                if paired[pair_start] && partner < n {
                    course = course.with_corequisite(codes[partner].clone());
                }
                course
            })
            .collect();
        Catalog::new(courses)
    })
}

fn exempted_code(catalog: &Catalog, pick: Option<Index>) -> Option<String> {
    match pick {
        Some(idx) if !catalog.is_empty() => {
            Some(catalog.courses()[idx.index(catalog.len())].code.clone())
        }
        _ => None,
    }
}

fn config(cap: u32) -> PlannerConfig {
    PlannerConfig::new()
        .without_default_exemptions()
        .with_max_credits(cap)
}

proptest! {
    #[test]
    fn topological_order_is_a_permutation(catalog in acyclic_catalog()) {
        let order = priority_topological_sort(&catalog);
        prop_assert_eq!(order.len(), catalog.len());
        let unique: HashSet<&String> = order.iter().collect();
        prop_assert_eq!(unique.len(), catalog.len());

        for course in catalog.iter() {
            let at = order.iter().position(|c| c == &course.code).unwrap();
            for prereq in &course.prerequisites {
                let before = order.iter().position(|c| c == prereq).unwrap();
                prop_assert!(before < at, "{} precedes {}", course.code, prereq);
            }
        }
    }

    #[test]
    fn every_course_placed_exactly_once(catalog in acyclic_catalog(), cap in 4u32..=24) {
        let plan = generate_study_plan(&catalog, &config(cap));
        let placed = plan.scheduled_codes();
        let unique: HashSet<&str> = placed.iter().copied().collect();
        prop_assert_eq!(placed.len(), catalog.len());
        prop_assert_eq!(unique.len(), catalog.len());
    }

    #[test]
    fn prerequisites_never_land_later(catalog in acyclic_catalog(), cap in 4u32..=24) {
        let plan = generate_study_plan(&catalog, &config(cap));
        for course in catalog.iter().filter(|c| !c.is_flexible()) {
            let at = plan.slot_of(&course.code).unwrap();
            for prereq in &course.prerequisites {
                let before = plan.slot_of(prereq).unwrap();
                prop_assert!(before <= at, "{} in {} before {} in {}", course.code, at, prereq, before);
            }
        }
    }

    #[test]
    fn unforced_slots_stay_under_cap(catalog in acyclic_catalog(), cap in 4u32..=24) {
        let plan = generate_study_plan(&catalog, &config(cap));
        let forced = plan.forced_slots();
        for slot in plan.plan.keys().filter(|s| !forced.contains(s)) {
            prop_assert!(plan.slot_credits(*slot) <= cap);
        }
    }

    #[test]
    fn pins_are_honoured(catalog in acyclic_catalog(), pick in any::<Index>(), slot in 0usize..8) {
        prop_assume!(!catalog.is_empty());
        let code = catalog.courses()[pick.index(catalog.len())].code.clone();
        let slot = SlotId::all()[slot];
        let plan = generate_study_plan(&catalog, &config(20).with_pin(code.clone(), slot.to_string()));
        prop_assert_eq!(plan.slot_of(&code), Some(slot));
        prop_assert_eq!(plan.scheduled_codes().len(), catalog.len());
    }

    #[test]
    fn planning_is_deterministic(catalog in acyclic_catalog(), cap in 4u32..=24) {
        let cfg = config(cap).with_reserved_slot("y2s1");
        let first = generate_study_plan(&catalog, &cfg).to_json().unwrap();
        let second = generate_study_plan(&catalog, &cfg).to_json().unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn variant_prereqs_and_coreqs_hold(
        catalog in variant_catalog(),
        pick in any::<Option<Index>>(),
        cap in 4u32..=24,
    ) {
        let exempt = exempted_code(&catalog, pick);
        let mut cfg = config(cap);
        if let Some(code) = &exempt {
            cfg = cfg.with_exemption(code.clone());
        }
        let plan = generate_study_plan(&catalog, &cfg);
        let expected = catalog.len() - usize::from(exempt.is_some());
        prop_assert_eq!(plan.scheduled_codes().len(), expected);

        for course in catalog.iter() {
            if Some(&course.code) == exempt.as_ref() {
                prop_assert_eq!(plan.slot_of(&course.code), None);
                continue;
            }
            let at = plan.slot_of(&course.code).unwrap();

            for partner in &course.corequisites {
                if Some(partner) != exempt.as_ref() {
                    prop_assert_eq!(plan.slot_of(partner), Some(at), "{} split from {}", course.code, partner);
                }
            }

            if course.is_flexible() {
                continue;
            }
            for prereq in &course.prerequisites {
                let base = base_code(prereq);
                let target = catalog.iter().find(|c| base_code(&c.code) == base).unwrap();
                if Some(&target.code) == exempt.as_ref() {
                    continue;
                }
                let before = plan.slot_of(&target.code).unwrap();
                prop_assert!(before <= at, "{} in {} before {} in {}", course.code, at, target.code, before);
            }
        }
    }

    #[test]
    fn catalogs_that_fit_are_never_forced(
        catalog in variant_catalog(),
        pick in any::<Option<Index>>(),
    ) {
        let mut cfg = config(200).with_max_hard(100).with_max_flexible(100);
        if let Some(code) = exempted_code(&catalog, pick) {
            cfg = cfg.with_exemption(code);
        }
        let plan = generate_study_plan(&catalog, &cfg);
        prop_assert!(plan.warnings_of(&DiagnosticKind::ForcedPlacement).is_empty(), "{:?}", plan.warnings);
        prop_assert!(plan.slot_credits(SlotId::all()[0]) <= 200);
    }
}
