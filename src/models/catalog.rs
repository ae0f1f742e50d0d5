//! Immutable course catalog.
//!
//! A catalog is built once per planning request from the provider's course
//! list and then only read. Duplicate codes are collapsed (first occurrence
//! wins) and base codes are computed once per course.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::code::base_code;
use super::Course;
use crate::error::PlanResult;

/// A deduplicated, read-only set of courses in provider order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Course>", into = "Vec<Course>")]
pub struct Catalog {
    courses: Vec<Course>,
    index: HashMap<String, usize>,
    bases: Vec<String>,
    base_set: HashSet<String>,
}

impl Catalog {
    /// Builds a catalog, keeping the first course for each code.
    pub fn new(courses: Vec<Course>) -> Self {
        let mut catalog = Self::default();
        for course in courses {
            catalog.insert(course);
        }
        catalog
    }

    /// Parses a JSON array of courses.
    pub fn from_json(json: &str) -> PlanResult<Self> {
        let courses: Vec<Course> = serde_json::from_str(json)?;
        Ok(Self::new(courses))
    }

    fn insert(&mut self, course: Course) -> bool {
        if self.index.contains_key(&course.code) {
            log::debug!("catalog: dropping duplicate course {}", course.code);
            return false;
        }
        let base = base_code(&course.code);
        self.index.insert(course.code.clone(), self.courses.len());
        self.base_set.insert(base.clone());
        self.bases.push(base);
        self.courses.push(course);
        true
    }

    /// Returns a new catalog with `extra` appended (existing codes win).
    pub fn extended<I>(&self, extra: I) -> Self
    where
        I: IntoIterator<Item = Course>,
    {
        let mut catalog = self.clone();
        for course in extra {
            catalog.insert(course);
        }
        catalog
    }

    /// Looks up a course by exact code.
    pub fn get(&self, code: &str) -> Option<&Course> {
        self.index.get(code).map(|&i| &self.courses[i])
    }

    /// Whether a course with this exact code exists.
    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// Cached base code of a catalog course, or the parsed base of any code.
    pub fn base_of(&self, code: &str) -> String {
        match self.index.get(code) {
            Some(&i) => self.bases[i].clone(),
            None => base_code(code),
        }
    }

    /// Whether any catalog course shares this base code.
    pub fn has_base(&self, base: &str) -> bool {
        self.base_set.contains(base)
    }

    /// Courses in provider order.
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Iterates courses in provider order.
    pub fn iter(&self) -> impl Iterator<Item = &Course> {
        self.courses.iter()
    }

    /// Codes in provider order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.courses.iter().map(|c| c.code.as_str())
    }

    /// Sum of credit weights over all courses.
    pub fn total_credits(&self) -> u32 {
        self.courses
            .iter()
            .fold(0u32, |acc, c| acc.saturating_add(c.credits))
    }

    /// Number of courses.
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

impl From<Vec<Course>> for Catalog {
    fn from(courses: Vec<Course>) -> Self {
        Self::new(courses)
    }
}

impl From<Catalog> for Vec<Course> {
    fn from(catalog: Catalog) -> Self {
        catalog.courses
    }
}

impl FromIterator<Course> for Catalog {
    fn from_iter<T: IntoIterator<Item = Course>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
