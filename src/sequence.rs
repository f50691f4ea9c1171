//! Ordered sequences of elements with split, join and augmented aggregates.

use std::fmt::Debug;

pub mod treap;

/// Data aggregated over a contiguous range of a sequence. The forest layers
/// instantiate this with "does any element in range carry a mark" bits, but
/// any associative summary works.
pub trait AggregatedData: Debug + Sized + Clone + Default + PartialEq {
    type Data: Debug + Sized + Clone;
    /// Create aggregated data from a single data item.
    fn from(data: &Self::Data) -> Self;
    /// Merge with the aggregated data of a range immediately to the right.
    fn merge(self, right: Self) -> Self;
}

/// What a search strategy sees at the node currently being looked at.
#[derive(Debug)]
pub struct SearchData<'a, Ag: AggregatedData> {
    /// Data of the current node.
    pub current_data: &'a Ag::Data,
    /// Aggregated data of the left subtree.
    pub left_agg: &'a Ag,
    /// Aggregated data of the right subtree.
    pub right_agg: &'a Ag,
}

#[derive(Debug)]
pub enum SearchDirection {
    Found,
    NotFound,
    Left,
    Right,
}

pub type Idx = usize;

/// Seed used when the caller does not care about reproducing a particular run.
pub const DEFAULT_SEED: u64 = 2012;

/// A store of disjoint ordered sequences. Elements are created as singleton
/// sequences and combined from there; every element is addressed by the
/// `Idx` returned from [`Sequence::create`], which stays valid for the
/// lifetime of the store no matter how sequences are split and joined.
pub trait Sequence<Ag>
where
    Ag: AggregatedData,
    Self: Sized + Debug,
{
    /// Returned when an element doesn't exist.
    const EMPTY: Idx = usize::MAX;

    /// New store with the given capacity and a fixed randomness seed, so runs
    /// are reproducible.
    fn with_seed(capacity: usize, seed: u64) -> Self;
    /// New store with the given capacity.
    fn new(capacity: usize) -> Self {
        Self::with_seed(capacity, DEFAULT_SEED)
    }
    /// New store with the given items already joined into one sequence.
    fn from_iter(data: impl IntoIterator<Item = Ag::Data>) -> Self {
        let data = data.into_iter();
        let mut seq = Self::new(data.size_hint().0);
        for (i, data) in data.enumerate() {
            seq.create(data);
            if i > 0 {
                seq.concat(i - 1, i);
            }
        }
        seq
    }

    /// Create a new singleton sequence with the given data. Returns its
    /// index; indices increase from 0.
    fn create(&mut self, data: Ag::Data) -> Idx;
    /// Number of elements across all sequences.
    fn total_size(&self) -> usize;

    /// Representative of the sequence containing `u`. Two elements are in the
    /// same sequence iff their roots are equal; roots are invalidated by any
    /// mutation of the sequence.
    fn root(&self, u: Idx) -> Idx;
    /// Data associated with `u`.
    fn data(&self, u: Idx) -> &Ag::Data;
    /// Mutate the data of `u`, re-establishing aggregates.
    fn mutate_data(&mut self, u: Idx, f: impl FnOnce(&mut Ag::Data));
    /// Position of `u` in its sequence, 0-indexed.
    fn order(&self, u: Idx) -> usize;
    /// Length of the sequence containing `u`.
    fn len(&self, u: Idx) -> usize;
    /// Aggregated data of the sequence containing `u`.
    fn total_agg(&self, u: Idx) -> Ag;
    /// K-th element of the sequence containing `u`, or `EMPTY`.
    fn find_kth(&self, u: Idx, k: usize) -> Idx;
    /// First element of the sequence containing `u`.
    fn first(&self, u: Idx) -> Idx {
        self.find_kth(u, 0)
    }
    /// Element immediately after `u` in its sequence, or `EMPTY`.
    fn next(&self, u: Idx) -> Idx {
        self.find_kth(u, self.order(u) + 1)
    }
    /// Element immediately before `u` in its sequence, or `EMPTY` if `u` is
    /// first.
    fn predecessor(&self, u: Idx) -> Idx {
        match self.order(u) {
            0 => Self::EMPTY,
            k => self.find_kth(u, k - 1),
        }
    }
    /// Are the two elements in the same sequence?
    fn on_same_seq(&self, u: Idx, v: Idx) -> bool {
        self.root(u) == self.root(v)
    }
    /// Is the element the representative of its sequence?
    fn is_root(&self, u: Idx) -> bool {
        self.root(u) == u
    }
    /// Find an element in the sequence containing `u` by descending from the
    /// root, guided by the subtree aggregates.
    fn find_element(
        &self,
        u: Idx,
        search_strategy: impl FnMut(SearchData<'_, Ag>) -> SearchDirection,
    ) -> Idx;

    /// Concatenate: the sequence containing `v` is appended after the
    /// sequence containing `u`. Either side may be `EMPTY`. The two sides
    /// must not already share a sequence. Returns the new root.
    fn concat(&mut self, u: Idx, v: Idx) -> Idx;
    /// Cut the sequence containing `u` immediately after `u`: `u` and its
    /// predecessors stay together, everything after `u` forms a new
    /// sequence. Returns what was formerly the successor of `u`, or `EMPTY`
    /// if `u` was last.
    fn split_after(&mut self, u: Idx) -> Idx;

    /// Check internal structural invariants, panicking on violation. For use
    /// in tests; the default does nothing.
    fn check_invariants(&self) {}
}
