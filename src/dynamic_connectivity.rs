//! Fully dynamic connectivity, implemented with the data structure described
//! in section 2 of:
//!   Jacob Holm, Kristian de Lichtenberg, and Mikkel Thorup.
//!   "Poly-logarithmic deterministic fully-dynamic algorithms for
//!   connectivity, minimum spanning tree, 2-edge, and biconnectivity."
//!   Journal of the ACM, 48(4):723-760, 2001.
//!
//! The structure maintains a hierarchy of subgraphs with fewer and fewer
//! edges, and a spanning forest for each. Insertions and connectivity
//! queries only look at the spanning forest of the whole graph. The hard
//! case is deleting an edge of that forest: we must decide whether some
//! other edge reconnects the two halves. The search is amortized by moving
//! every inspected edge one subgraph up, so that no edge is inspected more
//! than logarithmically many times over its lifetime.

use std::collections::{BTreeSet, HashMap};

use crate::dynamic_forest::{DynamicForest, MarkAgg};
use crate::graph::{UndirectedEdge, Vertex};
use crate::sequence::Sequence;

type Level = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeKind {
    /// Edge is in the spanning forest of the graph.
    Tree,
    /// Edge is not in the spanning forest of the graph.
    NonTree,
}

#[derive(Debug, Clone, Copy)]
struct EdgeInfo {
    level: Level,
    kind: EdgeKind,
}

/// An undirected graph over a fixed vertex set, under edge insertions, edge
/// deletions and connectivity queries. Queries take `O(log n)`; updates take
/// `O(log^2 n)` amortized. Self-loops and parallel edges are not supported.
#[derive(Debug)]
pub struct DynamicConnectivity<S: Sequence<MarkAgg>> {
    num_vertices: usize,
    /// `spanning_forests[l]` is F_l, a spanning forest of the subgraph of
    /// edges with level >= l. `spanning_forests[0]` spans the whole graph.
    spanning_forests: Vec<DynamicForest<S>>,
    /// `non_tree_adjacency[l][v]` holds the vertices connected to `v` by
    /// level-`l` non-tree edges.
    non_tree_adjacency: Vec<Vec<BTreeSet<Vertex>>>,
    /// All edges in the graph.
    edges: HashMap<UndirectedEdge, EdgeInfo>,
}

impl<S: Sequence<MarkAgg>> DynamicConnectivity<S> {
    /// Empty graph on `num_vertices > 0` vertices, with a fixed randomness
    /// seed so runs are reproducible.
    pub fn with_seed(num_vertices: usize, seed: u64) -> Self {
        assert!(num_vertices > 0, "the number of vertices must be positive");
        let num_levels = num_vertices.ilog2() as usize + 1;
        Self {
            spanning_forests: (0..num_levels)
                .map(|l| DynamicForest::with_seed(num_vertices, seed.wrapping_add(l as u64)))
                .collect(),
            non_tree_adjacency: (0..num_levels)
                .map(|_| vec![BTreeSet::new(); num_vertices])
                .collect(),
            edges: HashMap::new(),
            num_vertices,
        }
    }

    /// Empty graph on `num_vertices > 0` vertices.
    pub fn new(num_vertices: usize) -> Self {
        Self::with_seed(num_vertices, crate::sequence::DEFAULT_SEED)
    }

    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    fn num_levels(&self) -> usize {
        self.spanning_forests.len()
    }

    fn validate_vertex(&self, v: Vertex) {
        assert!(v < self.num_vertices, "vertex {v} out of bounds");
    }

    /// True if `u` and `v` are connected in the graph.
    pub fn is_connected(&self, u: Vertex, v: Vertex) -> bool {
        self.validate_vertex(u);
        self.validate_vertex(v);
        self.spanning_forests[0].is_connected(u, v)
    }

    /// True if the edge is in the graph.
    pub fn has_edge(&self, edge: UndirectedEdge) -> bool {
        self.edges.contains_key(&edge)
    }

    /// Number of vertices in `v`'s connected component.
    pub fn size_of_connected_component(&self, v: Vertex) -> usize {
        self.validate_vertex(v);
        self.spanning_forests[0].size_of_tree(v)
    }

    /// Adds an edge to the graph. The edge must not be a self-loop and must
    /// not already be present.
    pub fn add_edge(&mut self, edge: UndirectedEdge) {
        self.validate_vertex(edge.first);
        self.validate_vertex(edge.second);
        assert!(
            edge.first != edge.second,
            "self-loop edge {edge} cannot be added"
        );
        assert!(
            !self.edges.contains_key(&edge),
            "edge {edge} is already in the graph"
        );
        if self.spanning_forests[0].is_connected(edge.first, edge.second) {
            log::trace!("add non-tree edge {edge}");
            self.edges.insert(
                edge,
                EdgeInfo {
                    level: 0,
                    kind: EdgeKind::NonTree,
                },
            );
            self.insert_into_adjacency(edge, 0);
        } else {
            log::trace!("add tree edge {edge}");
            self.edges.insert(
                edge,
                EdgeInfo {
                    level: 0,
                    kind: EdgeKind::Tree,
                },
            );
            self.spanning_forests[0].add_edge(edge);
            self.spanning_forests[0].mark_edge(edge, true);
        }
    }

    /// Deletes an edge from the graph. The edge must be present.
    pub fn delete_edge(&mut self, edge: UndirectedEdge) {
        let info = self
            .edges
            .remove(&edge)
            .unwrap_or_else(|| panic!("edge {edge} is not in the graph"));
        match info.kind {
            EdgeKind::NonTree => {
                log::trace!("delete non-tree edge {edge}");
                self.remove_from_adjacency(edge, info.level);
            }
            EdgeKind::Tree => {
                log::trace!("delete tree edge {edge} at level {}", info.level);
                for l in (0..=info.level).rev() {
                    self.spanning_forests[l].delete_edge(edge);
                }
                self.replace_tree_edge(edge, info.level);
            }
        }
    }

    /// Records a level-`level` non-tree edge in the adjacency lists, keeping
    /// the vertex marks of F_level in sync (a vertex is marked iff it has
    /// some incident non-tree edge on that level).
    fn insert_into_adjacency(&mut self, edge: UndirectedEdge, level: Level) {
        for (x, y) in [(edge.first, edge.second), (edge.second, edge.first)] {
            let list = &mut self.non_tree_adjacency[level][x];
            list.insert(y);
            if list.len() == 1 {
                self.spanning_forests[level].mark_vertex(x, true);
            }
        }
    }

    fn remove_from_adjacency(&mut self, edge: UndirectedEdge, level: Level) {
        for (x, y) in [(edge.first, edge.second), (edge.second, edge.first)] {
            let list = &mut self.non_tree_adjacency[level][x];
            list.remove(&y);
            if list.is_empty() {
                self.spanning_forests[level].mark_vertex(x, false);
            }
        }
    }

    /// A tree edge at `level` was just cut from F_0 ... F_level, splitting a
    /// tree into two. Searches for a replacement edge reconnecting the two
    /// halves, starting at `level` and descending. Every edge inspected
    /// without reconnecting is moved one level up, which pays for the
    /// search.
    fn replace_tree_edge(&mut self, edge: UndirectedEdge, level: Level) {
        for lvl in (0..=level).rev() {
            let forest = &self.spanning_forests[lvl];
            // Work on the smaller of the two halves, so that everything we
            // promote fits within the size bound of level `lvl + 1`.
            let u = if forest.size_of_tree(edge.first) <= forest.size_of_tree(edge.second) {
                edge.first
            } else {
                edge.second
            };
            // Promotions below target `lvl + 1`; the size bound (a level-l
            // tree has at most n / 2^l vertices) keeps the top level from
            // ever promoting.

            // Move all level-`lvl` tree edges of the small half up a level.
            while let Some(tree_edge) = self.spanning_forests[lvl].find_marked_edge_in_tree(u) {
                log::trace!("promote tree edge {tree_edge} to level {}", lvl + 1);
                let info = self.edges.get_mut(&tree_edge).expect("unknown tree edge");
                debug_assert_eq!(info.level, lvl);
                info.level = lvl + 1;
                self.spanning_forests[lvl].mark_edge(tree_edge, false);
                self.spanning_forests[lvl + 1].add_edge(tree_edge);
                self.spanning_forests[lvl + 1].mark_edge(tree_edge, true);
            }

            // Scan the level-`lvl` non-tree edges incident to the small
            // half. Each either reconnects the halves (done) or has both
            // endpoints in the small half and is moved up a level.
            while let Some(x) = self.spanning_forests[lvl].find_marked_vertex_in_tree(u) {
                // The sets are ordered, so given a fixed seed the same
                // candidate is picked on equivalent runs.
                let y = *self.non_tree_adjacency[lvl][x]
                    .iter()
                    .next()
                    .expect("marked vertex has no incident non-tree edge");
                let candidate = UndirectedEdge::new(x, y);
                if self.spanning_forests[lvl].is_connected(u, y) {
                    log::trace!("promote non-tree edge {candidate} to level {}", lvl + 1);
                    self.edges.get_mut(&candidate).expect("unknown edge").level = lvl + 1;
                    self.remove_from_adjacency(candidate, lvl);
                    self.insert_into_adjacency(candidate, lvl + 1);
                } else {
                    log::trace!("replacement edge {candidate} found at level {lvl}");
                    self.edges.get_mut(&candidate).expect("unknown edge").kind = EdgeKind::Tree;
                    self.remove_from_adjacency(candidate, lvl);
                    for l in 0..=lvl {
                        self.spanning_forests[l].add_edge(candidate);
                    }
                    self.spanning_forests[lvl].mark_edge(candidate, true);
                    return;
                }
            }
        }
        log::trace!("no replacement for {edge}; components stay split");
    }

    /// Check the structural invariants of the whole hierarchy, panicking on
    /// violation. For use in tests.
    pub fn check_invariants(&self) {
        for forest in &self.spanning_forests {
            forest.check_invariants();
        }
        for (edge, info) in &self.edges {
            assert!(info.level < self.num_levels(), "level of {edge} too high");
            match info.kind {
                EdgeKind::Tree => {
                    for (l, forest) in self.spanning_forests.iter().enumerate() {
                        assert_eq!(
                            forest.has_edge(*edge),
                            l <= info.level,
                            "tree edge {edge} at level {} misplaced in F_{l}",
                            info.level
                        );
                    }
                }
                EdgeKind::NonTree => {
                    assert!(self.non_tree_adjacency[info.level][edge.first].contains(&edge.second));
                    assert!(self.non_tree_adjacency[info.level][edge.second].contains(&edge.first));
                    for forest in &self.spanning_forests {
                        assert!(!forest.has_edge(*edge), "non-tree edge {edge} in a forest");
                    }
                }
            }
        }
        for (l, per_vertex) in self.non_tree_adjacency.iter().enumerate() {
            for (v, list) in per_vertex.iter().enumerate() {
                for &y in list {
                    let info = self.edges[&UndirectedEdge::new(v, y)];
                    assert_eq!(info.level, l);
                    assert_eq!(info.kind, EdgeKind::NonTree);
                }
            }
        }
        // F_0 ⊇ F_1 ⊇ ... by construction of the edge levels.
        for l in 1..self.num_levels() {
            for edge in self.spanning_forests[l].tree_edges() {
                assert!(
                    self.spanning_forests[l - 1].has_edge(*edge),
                    "edge {edge} in F_{l} but not in F_{}",
                    l - 1
                );
            }
        }
    }
}
