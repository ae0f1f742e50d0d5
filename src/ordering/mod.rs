//! Course ordering.
//!
//! Builds the prerequisite dependency graph and derives a priority-aware
//! topological order from it. The order is the input sequence of the
//! semester assigner: foundations and core courses come first, flexible
//! courses last, and no course precedes its in-catalog prerequisites.
//!
//! # Usage
//!
//! ```
//! use u_curriculum::models::{Catalog, Category, Course};
//! use u_curriculum::ordering::priority_topological_sort;
//!
//! let catalog = Catalog::new(vec![
//!     Course::new("CS2030S", "PM II", 4, Category::CoreDomain).with_prerequisite("CS1101S"),
//!     Course::new("CS1101S", "PM I", 4, Category::Foundation),
//! ]);
//! assert_eq!(priority_topological_sort(&catalog), vec!["CS1101S", "CS2030S"]);
//! ```

mod graph;
mod topo;

pub use graph::DependencyGraph;
pub use topo::{priority_rank, priority_topological_sort};
