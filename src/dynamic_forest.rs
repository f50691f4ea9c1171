//! A forest (undirected acyclic graph) under edge additions ("links") and
//! edge deletions ("cuts"), with edge and vertex marks.
//!
//! Each tree is represented by a variant of Euler tour trees described in:
//!   Robert E. Tarjan. "Dynamic trees as search trees via Euler tours, applied
//!   to the network simplex algorithm." Mathematical Programming, 78(2), 1997.
//!
//! Every edge is replaced with two directed edges, and the Euler tour over
//! those is broken at an arbitrary point and stored as a linear sequence.
//! Adding and deleting edges is then a handful of splits and concatenations
//! on the tours. Tarjan's variant includes a self-loop element per vertex in
//! the tour, which makes it convenient to find where a vertex is in the tour.
//!
//! The marks exist for Holm et al.'s connectivity algorithm: the sequence
//! aggregates over the mark bits let us find some marked edge or vertex of a
//! tree in logarithmic time.

use std::collections::HashMap;

use crate::graph::{UndirectedEdge, Vertex};
use crate::sequence::{AggregatedData, Idx, SearchDirection, Sequence};

/// Mark channel used for edges of a spanning forest.
pub const EDGE_MARK: usize = 0;
/// Mark channel used for vertices with incident non-tree edges.
pub const VERTEX_MARK: usize = 1;
/// Number of independent mark channels.
pub const NUM_MARK_KINDS: usize = 2;

/// What a tour element stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourId {
    /// The self-loop anchor of a vertex.
    Vertex(Vertex),
    /// One direction of an undirected edge.
    Edge(Vertex, Vertex),
    /// An unused element of the edge pool.
    Vacant,
}

/// Payload of one Euler tour element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TourElem {
    pub id: TourId,
    pub marked: [bool; NUM_MARK_KINDS],
}

impl TourElem {
    fn new(id: TourId) -> Self {
        Self {
            id,
            marked: [false; NUM_MARK_KINDS],
        }
    }
}

/// Per-subtree OR of the mark bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkAgg {
    pub has_marked: [bool; NUM_MARK_KINDS],
}

impl AggregatedData for MarkAgg {
    type Data = TourElem;
    fn from(data: &TourElem) -> Self {
        Self {
            has_marked: data.marked,
        }
    }
    fn merge(self, right: Self) -> Self {
        Self {
            has_marked: std::array::from_fn(|k| self.has_marked[k] || right.has_marked[k]),
        }
    }
}

/// The pair of sequence elements representing directed edges (u, v) and
/// (v, u).
#[derive(Debug, Clone, Copy)]
struct EdgeElements {
    forward: Idx,
    backward: Idx,
}

/// A dynamic forest over a fixed set of vertices.
#[derive(Debug)]
pub struct DynamicForest<S: Sequence<MarkAgg>> {
    num_vertices: usize,
    /// Element `v` of the arena is the self-loop anchor of vertex `v`; the
    /// `2 * (n - 1)` elements after that are the edge pool, enough for the
    /// Euler tours of any spanning forest.
    seq: S,
    free_edge_elements: Vec<Idx>,
    /// Maps an undirected edge {u, v} to the elements representing (u, v)
    /// and (v, u).
    edges: HashMap<UndirectedEdge, EdgeElements>,
}

impl<S: Sequence<MarkAgg>> DynamicForest<S> {
    /// Forest of `num_vertices` singleton trees. All sequence elements the
    /// forest will ever use are allocated here; edge operations only draw
    /// from and return to the pre-sized pool.
    pub fn with_seed(num_vertices: usize, seed: u64) -> Self {
        assert!(num_vertices > 0, "the number of vertices must be positive");
        let pool_size = 2 * (num_vertices - 1);
        let mut seq = S::with_seed(num_vertices + pool_size, seed);
        for v in 0..num_vertices {
            seq.create(TourElem::new(TourId::Vertex(v)));
        }
        let mut free_edge_elements = Vec::with_capacity(pool_size);
        for _ in 0..pool_size {
            free_edge_elements.push(seq.create(TourElem::new(TourId::Vacant)));
        }
        Self {
            num_vertices,
            seq,
            free_edge_elements,
            edges: HashMap::with_capacity(pool_size),
        }
    }

    pub fn new(num_vertices: usize) -> Self {
        Self::with_seed(num_vertices, crate::sequence::DEFAULT_SEED)
    }

    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    fn validate_vertex(&self, v: Vertex) {
        assert!(v < self.num_vertices, "vertex {v} out of bounds");
    }

    fn validate_edge(&self, edge: UndirectedEdge) {
        assert!(
            edge.second < self.num_vertices,
            "edge {edge} out of bounds"
        );
    }

    /// True if `u` and `v` are in the same tree.
    pub fn is_connected(&self, u: Vertex, v: Vertex) -> bool {
        self.validate_vertex(u);
        self.validate_vertex(v);
        self.seq.on_same_seq(u, v)
    }

    /// True if the edge is in the forest.
    pub fn has_edge(&self, edge: UndirectedEdge) -> bool {
        self.edges.contains_key(&edge)
    }

    /// Number of vertices in the tree that `v` resides in. The tour of a
    /// tree with `k` vertices has `k` self-loop elements and `2 * (k - 1)`
    /// edge elements, so the vertex count is recovered as `(len + 2) / 3`.
    pub fn size_of_tree(&self, v: Vertex) -> usize {
        self.validate_vertex(v);
        (self.seq.len(v) + 2) / 3
    }

    fn allocate_edge_elements(&mut self, edge: UndirectedEdge) -> EdgeElements {
        let forward = self
            .free_edge_elements
            .pop()
            .expect("edge element pool exhausted");
        let backward = self
            .free_edge_elements
            .pop()
            .expect("edge element pool exhausted");
        self.seq
            .mutate_data(forward, |d| d.id = TourId::Edge(edge.first, edge.second));
        self.seq
            .mutate_data(backward, |d| d.id = TourId::Edge(edge.second, edge.first));
        EdgeElements { forward, backward }
    }

    fn recycle_edge_elements(&mut self, elements: EdgeElements) {
        for e in [elements.forward, elements.backward] {
            debug_assert_eq!(self.seq.len(e), 1, "freed element still lives in a tour");
            self.seq.mutate_data(e, |d| {
                d.id = TourId::Vacant;
                d.marked = [false; NUM_MARK_KINDS];
            });
            self.free_edge_elements.push(e);
        }
    }

    /// Adds an edge to the forest. The endpoints must be distinct and not
    /// already connected (the edge must not close a cycle).
    pub fn add_edge(&mut self, edge: UndirectedEdge) {
        self.validate_edge(edge);
        assert!(edge.first != edge.second, "self-loop edge {edge}");
        debug_assert!(
            !self.is_connected(edge.first, edge.second),
            "adding edge {edge} would create a cycle"
        );
        log::trace!("forest add_edge {edge}");
        let elements = self.allocate_edge_elements(edge);
        self.edges.insert(edge, elements);

        let (u, v) = (edge.first, edge.second);
        // Rotate both tours to start right after their endpoint's anchor,
        // then stitch: [.. u] (u,v) [v's tour rotated to end at v] (v,u)
        // [u's former successors].
        let u_successor = self.seq.split_after(u);
        let v_successor = self.seq.split_after(v);
        self.seq.concat(u, elements.forward);
        self.seq.concat(u, v_successor);
        self.seq.concat(u, v);
        self.seq.concat(u, elements.backward);
        self.seq.concat(u, u_successor);
    }

    /// Removes an edge from the forest. The edge must be present.
    pub fn delete_edge(&mut self, edge: UndirectedEdge) {
        let elements = self
            .edges
            .remove(&edge)
            .unwrap_or_else(|| panic!("edge {edge} is not in the forest"));
        log::trace!("forest delete_edge {edge}");
        let uv = elements.forward;
        let vu = elements.backward;

        let uv_successor = self.seq.split_after(uv);
        // After splitting right after (u, v), knowing whether (u, v) came
        // before (v, u) in the tour tells us how to stitch the rest back
        // together.
        let uv_before_vu = !self.seq.on_same_seq(uv, vu);
        let vu_successor = self.seq.split_after(vu);
        let uv_predecessor = self.seq.predecessor(uv);
        if uv_predecessor != S::EMPTY {
            self.seq.split_after(uv_predecessor);
        }
        let vu_predecessor = self.seq.predecessor(vu);
        if vu_predecessor != S::EMPTY {
            self.seq.split_after(vu_predecessor);
        }
        if uv_before_vu {
            self.seq.concat(uv_predecessor, vu_successor);
        } else {
            self.seq.concat(vu_predecessor, uv_successor);
        }
        // (u, v) and (v, u) are never adjacent in the tour (an endpoint's
        // anchor sits in between), so the four fragments above are distinct
        // and both elements are now singletons, safe to recycle.
        self.recycle_edge_elements(elements);
    }

    /// Mark (or unmark) an edge of the forest. See
    /// [`Self::find_marked_edge_in_tree`].
    pub fn mark_edge(&mut self, edge: UndirectedEdge, mark: bool) {
        let elements = *self
            .edges
            .get(&edge)
            .unwrap_or_else(|| panic!("edge {edge} is not in the forest"));
        for e in [elements.forward, elements.backward] {
            self.seq.mutate_data(e, |d| d.marked[EDGE_MARK] = mark);
        }
    }

    /// Mark (or unmark) a vertex. See [`Self::find_marked_vertex_in_tree`].
    pub fn mark_vertex(&mut self, v: Vertex, mark: bool) {
        self.validate_vertex(v);
        self.seq.mutate_data(v, |d| d.marked[VERTEX_MARK] = mark);
    }

    fn find_marked_element(&self, v: Vertex, kind: usize) -> Idx {
        use SearchDirection::*;
        // Prefer the left subtree, then the current element, then the right
        // subtree, so the leftmost marked element is always the one found.
        self.seq.find_element(v, |d| {
            if d.left_agg.has_marked[kind] {
                Left
            } else if d.current_data.marked[kind] {
                Found
            } else if d.right_agg.has_marked[kind] {
                Right
            } else {
                NotFound
            }
        })
    }

    /// Some marked edge in the tree that `v` resides in, if any.
    pub fn find_marked_edge_in_tree(&self, v: Vertex) -> Option<UndirectedEdge> {
        self.validate_vertex(v);
        let found = self.find_marked_element(v, EDGE_MARK);
        if found == S::EMPTY {
            return None;
        }
        match self.seq.data(found).id {
            TourId::Edge(a, b) => Some(UndirectedEdge::new(a, b)),
            id => unreachable!("edge-marked element has id {id:?}"),
        }
    }

    /// Some marked vertex in the tree that `v` resides in, if any.
    pub fn find_marked_vertex_in_tree(&self, v: Vertex) -> Option<Vertex> {
        self.validate_vertex(v);
        let found = self.find_marked_element(v, VERTEX_MARK);
        if found == S::EMPTY {
            return None;
        }
        match self.seq.data(found).id {
            TourId::Vertex(x) => Some(x),
            id => unreachable!("vertex-marked element has id {id:?}"),
        }
    }

    /// Edges currently in the forest, in no particular order.
    pub fn tree_edges(&self) -> impl Iterator<Item = &UndirectedEdge> {
        self.edges.keys()
    }

    /// Number of unused elements in the edge pool.
    pub fn free_edge_slots(&self) -> usize {
        self.free_edge_elements.len()
    }

    /// Check structural invariants of the forest and its sequences,
    /// panicking on violation. For use in tests.
    pub fn check_invariants(&self) {
        self.seq.check_invariants();
        assert_eq!(
            self.free_edge_elements.len() + 2 * self.edges.len(),
            2 * (self.num_vertices - 1),
            "edge pool accounting broken"
        );
        for &e in &self.free_edge_elements {
            assert_eq!(self.seq.len(e), 1, "free element {e} lives in a tour");
            assert_eq!(*self.seq.data(e), TourElem::new(TourId::Vacant));
        }
        for (edge, elements) in &self.edges {
            assert_eq!(
                self.seq.data(elements.forward).id,
                TourId::Edge(edge.first, edge.second)
            );
            assert_eq!(
                self.seq.data(elements.backward).id,
                TourId::Edge(edge.second, edge.first)
            );
            assert!(self.seq.on_same_seq(elements.forward, edge.first));
            assert!(self.seq.on_same_seq(elements.backward, edge.second));
        }
        for v in 0..self.num_vertices {
            // Tour of a k-vertex tree has 3k - 2 elements.
            assert_eq!(self.seq.len(v) % 3, 1, "malformed tour at vertex {v}");
        }
    }
}
