//! Prerequisite dependency graph.
//!
//! Edges point from a prerequisite to the courses that depend on it. Only
//! edges with both endpoints in the catalog are kept: a prerequisite outside
//! the catalog is assumed satisfied by exemption or prior study.

use std::collections::HashMap;

use crate::models::Catalog;

/// Adjacency structure over catalog codes.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    dependents: HashMap<String, Vec<String>>,
    in_degree: HashMap<String, usize>,
}

impl DependencyGraph {
    /// Builds the graph from a catalog's direct prerequisite lists.
    ///
    /// Dependents are listed in catalog order. Repeated prerequisites on a
    /// single course count once.
    pub fn build(catalog: &Catalog) -> Self {
        let mut graph = Self::default();
        for code in catalog.codes() {
            graph.in_degree.insert(code.to_string(), 0);
        }

        for course in catalog.iter() {
            let mut seen: Vec<&str> = Vec::new();
            for prereq in &course.prerequisites {
                if !catalog.contains(prereq) || seen.contains(&prereq.as_str()) {
                    continue;
                }
                seen.push(prereq);
                graph
                    .dependents
                    .entry(prereq.clone())
                    .or_default()
                    .push(course.code.clone());
                *graph.in_degree.entry(course.code.clone()).or_insert(0) += 1;
            }
        }

        graph
    }

    /// Courses that list `code` as a prerequisite.
    pub fn dependents_of(&self, code: &str) -> &[String] {
        self.dependents.get(code).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of in-catalog prerequisites of `code`.
    pub fn in_degree(&self, code: &str) -> usize {
        self.in_degree.get(code).copied().unwrap_or(0)
    }

    /// Full adjacency map (prerequisite → dependents).
    pub fn adjacency(&self) -> &HashMap<String, Vec<String>> {
        &self.dependents
    }

    /// In-degree map, used as the starting state of Kahn's algorithm.
    pub(crate) fn in_degrees(&self) -> HashMap<String, usize> {
        self.in_degree.clone()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.dependents.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Course};

    fn course(code: &str, prereqs: &[&str]) -> Course {
        Course::new(code, "", 4, Category::CoreDomain).with_prerequisites(prereqs.iter().copied())
    }

    #[test]
    fn test_edges_point_to_dependents() {
        let catalog = Catalog::new(vec![
            course("CS1101S", &[]),
            course("CS2030S", &["CS1101S"]),
            course("CS2040S", &["CS1101S", "CS1231S"]),
            course("CS1231S", &[]),
        ]);
        let g = DependencyGraph::build(&catalog);

        assert_eq!(g.dependents_of("CS1101S"), ["CS2030S", "CS2040S"]);
        assert_eq!(g.dependents_of("CS1231S"), ["CS2040S"]);
        assert!(g.dependents_of("CS2040S").is_empty());
        assert_eq!(g.in_degree("CS2040S"), 2);
        assert_eq!(g.in_degree("CS1101S"), 0);
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn test_out_of_catalog_prereq_dropped() {
        let catalog = Catalog::new(vec![course("CS2030S", &["CS1010"])]);
        let g = DependencyGraph::build(&catalog);
        assert_eq!(g.in_degree("CS2030S"), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(g.adjacency().is_empty());
    }

    #[test]
    fn test_repeated_prereq_counts_once() {
        let catalog = Catalog::new(vec![course("A1000", &[]), course("B1000", &["A1000", "A1000"])]);
        let g = DependencyGraph::build(&catalog);
        assert_eq!(g.in_degree("B1000"), 1);
        assert_eq!(g.dependents_of("A1000"), ["B1000"]);
    }
}
