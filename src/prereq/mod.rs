//! Prerequisite tree evaluation.
//!
//! Catalog sources describe prerequisites as nested AND/OR structures in
//! JSON: a bare code string, a list (implicit AND), or an object tagged
//! with `"and"` / `"or"`. The raw value is parsed once into [`PrereqTree`]
//! and evaluated structurally afterwards.
//!
//! # Leniency
//!
//! Shapes that match none of the above (numbers, booleans, objects without
//! an `and`/`or` key, `null`) parse to an empty `And`, which is vacuously
//! satisfied. Unknown data never blocks a student; it is on the catalog
//! validator to flag it.
//!
//! # Example
//!
//! ```
//! use std::collections::HashSet;
//! use u_curriculum::prereq::PrereqTree;
//!
//! let raw = serde_json::json!({"and": ["CS1231", {"or": ["CS2040", "CS2040S"]}]});
//! let tree = PrereqTree::from(raw);
//!
//! let done: HashSet<String> = ["CS1231", "CS2040S"].iter().map(|s| s.to_string()).collect();
//! assert!(tree.satisfied(&done));
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// A prerequisite expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum PrereqTree {
    /// A single course code.
    Leaf(String),
    /// All children must be satisfied.
    And(Vec<PrereqTree>),
    /// At least one child must be satisfied.
    Or(Vec<PrereqTree>),
}

impl PrereqTree {
    /// A tree that is always satisfied.
    pub fn none() -> Self {
        PrereqTree::And(Vec::new())
    }

    /// Creates a leaf.
    pub fn leaf(code: impl Into<String>) -> Self {
        PrereqTree::Leaf(code.into())
    }

    /// Creates an AND node over plain codes.
    pub fn all_of<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PrereqTree::And(codes.into_iter().map(PrereqTree::leaf).collect())
    }

    /// Creates an OR node over plain codes.
    pub fn any_of<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PrereqTree::Or(codes.into_iter().map(PrereqTree::leaf).collect())
    }

    /// Whether the tree is satisfied by exact membership in `completed`.
    pub fn satisfied(&self, completed: &HashSet<String>) -> bool {
        self.satisfied_by(&|code: &str| completed.contains(code))
    }

    /// Whether the tree is satisfied under a caller-supplied leaf test.
    ///
    /// Used with base-code matching, where `CS2040` is satisfied by a
    /// completed `CS2040S`.
    pub fn satisfied_by<F>(&self, is_done: &F) -> bool
    where
        F: Fn(&str) -> bool,
    {
        match self {
            PrereqTree::Leaf(code) => is_done(code),
            PrereqTree::And(children) => children.iter().all(|c| c.satisfied_by(is_done)),
            PrereqTree::Or(children) => children.iter().any(|c| c.satisfied_by(is_done)),
        }
    }

    /// Codes still missing under `is_done`.
    ///
    /// A failed OR reports the missing codes of every branch, since any of
    /// them would do. Returns an empty list when the tree is satisfied.
    pub fn missing<F>(&self, is_done: &F) -> Vec<String>
    where
        F: Fn(&str) -> bool,
    {
        let mut out = Vec::new();
        self.collect_missing(is_done, &mut out);
        dedup_in_order(out)
    }

    fn collect_missing<F>(&self, is_done: &F, out: &mut Vec<String>)
    where
        F: Fn(&str) -> bool,
    {
        match self {
            PrereqTree::Leaf(code) => {
                if !is_done(code) {
                    out.push(code.clone());
                }
            }
            PrereqTree::And(children) => {
                for child in children {
                    child.collect_missing(is_done, out);
                }
            }
            PrereqTree::Or(children) => {
                if !self.satisfied_by(is_done) {
                    for child in children {
                        child.collect_missing(is_done, out);
                    }
                }
            }
        }
    }

    /// Flattens the tree into the plain AND list the scheduler works with.
    ///
    /// AND keeps every child; OR keeps only its first branch.
    pub fn flatten(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_flat(&mut out);
        dedup_in_order(out)
    }

    fn collect_flat(&self, out: &mut Vec<String>) {
        match self {
            PrereqTree::Leaf(code) => out.push(code.clone()),
            PrereqTree::And(children) => {
                for child in children {
                    child.collect_flat(out);
                }
            }
            PrereqTree::Or(children) => {
                if let Some(first) = children.first() {
                    first.collect_flat(out);
                }
            }
        }
    }

    /// Every code mentioned anywhere in the tree.
    pub fn codes(&self) -> Vec<String> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                PrereqTree::Leaf(code) => out.push(code.clone()),
                PrereqTree::And(children) | PrereqTree::Or(children) => {
                    stack.extend(children.iter().rev());
                }
            }
        }
        dedup_in_order(out)
    }

    /// Whether the tree places no requirement at all.
    pub fn is_empty(&self) -> bool {
        match self {
            PrereqTree::Leaf(_) => false,
            PrereqTree::And(children) => children.iter().all(PrereqTree::is_empty),
            PrereqTree::Or(children) => children.iter().any(PrereqTree::is_empty),
        }
    }
}

impl Default for PrereqTree {
    fn default() -> Self {
        Self::none()
    }
}

impl From<Value> for PrereqTree {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => PrereqTree::Leaf(strip_qualifier(&s)),
            Value::Array(items) => PrereqTree::And(items.into_iter().map(Self::from).collect()),
            Value::Object(mut map) => {
                if let Some(children) = map.remove("and") {
                    PrereqTree::And(children_of(children))
                } else if let Some(children) = map.remove("or") {
                    PrereqTree::Or(children_of(children))
                } else {
                    PrereqTree::none()
                }
            }
            _ => PrereqTree::none(),
        }
    }
}

impl From<PrereqTree> for Value {
    fn from(tree: PrereqTree) -> Self {
        match tree {
            PrereqTree::Leaf(code) => Value::String(code),
            PrereqTree::And(children) => serde_json::json!({
                "and": children.into_iter().map(Value::from).collect::<Vec<_>>()
            }),
            PrereqTree::Or(children) => serde_json::json!({
                "or": children.into_iter().map(Value::from).collect::<Vec<_>>()
            }),
        }
    }
}

fn children_of(value: Value) -> Vec<PrereqTree> {
    match value {
        Value::Array(items) => items.into_iter().map(PrereqTree::from).collect(),
        other => vec![PrereqTree::from(other)],
    }
}

/// Drops grade qualifiers: `"CS1010:D"` → `"CS1010"`.
fn strip_qualifier(raw: &str) -> String {
    raw.split(':').next().unwrap_or(raw).trim().to_string()
}

fn dedup_in_order(codes: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    codes.into_iter().filter(|c| seen.insert(c.clone())).collect()
}
