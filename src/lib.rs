//! This crate implements fully dynamic connectivity for undirected graphs:
//! given a fixed set of `n` vertices, it supports interleaved edge
//! insertions, edge deletions, connectivity queries and component-size
//! queries. Queries take O(lg n) time; updates take O(lg² n) amortized.
//!
//! ## Usage
//!
//! Create an instance with [`ConnectivityGraph::new`] and drive it with the
//! methods on [`DynamicConnectivity`]:
//!
//! ```
//! use dynamic_connectivity::{ConnectivityGraph, UndirectedEdge};
//!
//! let mut graph = ConnectivityGraph::new(6);
//! graph.add_edge(UndirectedEdge::new(0, 1));
//! graph.add_edge(UndirectedEdge::new(1, 2));
//! assert!(graph.is_connected(0, 2));
//! assert_eq!(graph.size_of_connected_component(0), 3);
//! graph.delete_edge(UndirectedEdge::new(1, 2));
//! assert!(!graph.is_connected(0, 2));
//! ```
//!
//! ## Implementation
//!
//! This is the algorithm of Holm, de Lichtenberg and Thorup (2001). It keeps
//! a logarithmic number of spanning forests of level-restricted subgraphs;
//! each forest is a set of Euler tour trees, and each Euler tour lives in a
//! treap with subtree aggregates. The layers can be used independently:
//! - Sequences: see `impl Sequence for Treap` in `src/sequence/treap.rs`.
//! - Euler tour trees: see `DynamicForest` in `src/dynamic_forest.rs`.
//! - Connectivity: see `DynamicConnectivity` in `src/dynamic_connectivity.rs`.
//!
//! All randomness is instance-scoped and seedable (`with_seed`
//! constructors), so test runs are reproducible.
pub mod dynamic_connectivity;
pub mod dynamic_forest;
pub mod graph;
pub mod sequence;

pub use dynamic_connectivity::DynamicConnectivity;
pub use dynamic_forest::DynamicForest;
pub use graph::{UndirectedEdge, Vertex};

use dynamic_forest::MarkAgg;
use sequence::treap::Treap;

/// A dynamic forest backed by the treap sequence implementation.
pub type EulerTourForest = DynamicForest<Treap<MarkAgg>>;
/// A dynamic connectivity structure backed by the treap sequence
/// implementation.
pub type ConnectivityGraph = DynamicConnectivity<Treap<MarkAgg>>;
