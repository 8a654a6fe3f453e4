//! Mutable in-memory trees.
//!
//! A [`Forest`] owns any number of nodes. Each node holds a value and may be
//! restructured at runtime through a small set of operations that keep the
//! hierarchy acyclic and the parent/child links consistent, even when a
//! per-node [`NodePolicy`] refuses a change halfway through. On top of that
//! come iterative depth-first and breadth-first walks, structure-preserving
//! maps into new trees and stable child sorting.
//!
//! ```
//! use orchard::{Forest, Order};
//!
//! let mut forest = Forest::new();
//! let root = forest.create("root");
//! let leaf = forest.create("leaf");
//! forest.child_add(root, leaf).unwrap();
//!
//! let mut seen = Vec::new();
//! forest
//!     .walk(root, Order::BreadthFirst, &mut seen, |seen, depth, node| {
//!         seen.push((depth, *node.value()))
//!     })
//!     .unwrap();
//! assert_eq!(seen, vec![(0, "root"), (1, "leaf")]);
//! ```

pub mod ancestry;
pub mod cli;
pub mod config;
pub mod display;
pub mod errors;
pub mod exitcode;
pub mod forest;
pub mod generator;
pub mod mapping;
pub mod mutation;
pub mod node;
pub mod policy;
pub mod sort;
pub mod traversal;
pub mod util;
pub mod view;

pub use display::TreeConvert;
pub use errors::{CollaboratorError, TreeError, TreeResult};
pub use forest::Forest;
pub use generator::TreeGenerator;
pub use mapping::MappedTree;
pub use node::NodeId;
pub use policy::{AlwaysDetach, NodePolicy};
pub use traversal::Order;
pub use view::{NodeMut, NodeRef};
