//! Treap-backed sequences. The treap is a binary tree with logarithmic height
//! with high probability; the in-order traversal of a treap gives one
//! sequence, and the arena holds one treap per sequence.

use std::fmt::{Debug, Formatter};

use debug_tree::TreeBuilder;
use derivative::Derivative;
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::{AggregatedData, Idx, SearchData, SearchDirection, Sequence};

fn node_fmt(u: &Idx, f: &mut Formatter) -> std::fmt::Result {
    if *u == usize::MAX {
        write!(f, "∅")
    } else {
        write!(f, "{u}")
    }
}
fn node2_fmt([u, v]: &[Idx; 2], f: &mut Formatter) -> std::fmt::Result {
    write!(f, "[")?;
    node_fmt(u, f)?;
    write!(f, ", ")?;
    node_fmt(v, f)?;
    write!(f, "]")
}

#[derive(Derivative)]
#[derivative(Debug)]
struct Node<Ag: AggregatedData> {
    #[derivative(Debug(format_with = "node_fmt"))]
    parent: Idx,
    #[derivative(Debug(format_with = "node2_fmt"))]
    /// Left and right child
    child: [Idx; 2],
    /// Data for this node
    data: Ag::Data,
    /// Aggregated data for this node's subtree
    ag_data: Ag,
    /// Heap order: a node's priority is at least as great as its children's.
    #[derivative(Debug = "ignore")]
    priority: u64,
    #[derivative(Debug = "ignore")]
    size: usize,
}

impl<Ag: AggregatedData> Node<Ag> {
    fn new(data: Ag::Data, priority: u64) -> Self {
        Self {
            ag_data: Ag::from(&data),
            data,
            child: [Treap::<Ag>::EMPTY; 2],
            parent: Treap::<Ag>::EMPTY,
            size: 1,
            priority,
        }
    }
}

pub struct Treap<Ag: AggregatedData> {
    nodes: Vec<Node<Ag>>,
    rng: StdRng,
}

impl<Ag: AggregatedData> Debug for Treap<Ag> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let mut builder = TreeBuilder::new();
        let _b = builder.add_branch("Treap");
        for u in &self.nodes {
            if u.parent == Self::EMPTY {
                self.tree_dbg(u, &mut builder);
            }
        }
        writeln!(f, "{}", builder.string())
    }
}

impl<Ag: AggregatedData> Treap<Ag> {
    fn tree_dbg(&self, u: &Node<Ag>, tree: &mut TreeBuilder) {
        let _b = tree.add_branch(&format!("{u:?}"));
        if u.child == [Self::EMPTY, Self::EMPTY] {
            return;
        }
        for c in u.child {
            if c != Self::EMPTY {
                self.tree_dbg(&self.nodes[c], tree);
            } else {
                tree.add_leaf("<no child>");
            }
        }
    }
    fn n(&self, u: Idx) -> Option<&Node<Ag>> {
        if u == Self::EMPTY {
            None
        } else {
            Some(&self.nodes[u])
        }
    }
    fn child(&self, u: Idx) -> [Idx; 2] {
        self.n(u).map_or([Self::EMPTY; 2], |n| n.child)
    }
    fn size(&self, u: Idx) -> usize {
        self.n(u).map_or(0, |n| n.size)
    }
    fn parent(&self, u: Idx) -> Idx {
        self.n(u).map_or(Self::EMPTY, |n| n.parent)
    }
    fn ag_data(&self, u: Idx) -> Ag {
        self.n(u).map_or_else(Ag::default, |n| n.ag_data.clone())
    }
    // Call whenever children change. Panics if empty.
    fn recalc(&mut self, u: Idx) {
        let [l, r] = self.child(u);
        let left_agg = self.ag_data(l);
        let right_agg = self.ag_data(r);
        let own = Ag::from(&self.nodes[u].data);
        self.nodes[u].size = self.size(l) + 1 + self.size(r);
        self.nodes[u].ag_data = left_agg.merge(own).merge(right_agg);
    }
    fn set_child(&mut self, u: Idx, side: usize, child: Idx) {
        let old = self.nodes[u].child[side];
        if old != Self::EMPTY {
            self.nodes[old].parent = Self::EMPTY;
        }
        self.nodes[u].child[side] = child;
        if child != Self::EMPTY {
            self.nodes[child].parent = u;
        }
        self.recalc(u);
    }
    /// (First k elements, rest). `u` must be the root of its treap.
    fn split_k(&mut self, u: Idx, k: usize) -> (Idx, Idx) {
        if u == Self::EMPTY {
            return (Self::EMPTY, Self::EMPTY);
        }
        debug_assert!(k <= self.nodes[u].size);
        let [l, r] = self.child(u);
        let szl = self.size(l);
        if k <= szl {
            self.set_child(u, 0, Self::EMPTY);
            let (ll, lr) = self.split_k(l, k);
            (ll, self.concat_roots(lr, u))
        } else {
            self.set_child(u, 1, Self::EMPTY);
            let (rl, rr) = self.split_k(r, k - szl - 1);
            (self.concat_roots(u, rl), rr)
        }
    }
    // Joins the treap rooted at `u` to the treap rooted at `v`; aggregates
    // are recomputed on the way back out of the recursion.
    fn concat_roots(&mut self, u: Idx, v: Idx) -> Idx {
        if u == Self::EMPTY {
            return v;
        } else if v == Self::EMPTY {
            return u;
        }
        if self.nodes[u].priority > self.nodes[v].priority {
            let new_r = self.concat_roots(self.child(u)[1], v);
            self.set_child(u, 1, new_r);
            u
        } else {
            let new_l = self.concat_roots(u, self.child(v)[0]);
            self.set_child(v, 0, new_l);
            v
        }
    }
}

impl<Ag: AggregatedData> Sequence<Ag> for Treap<Ag> {
    fn with_seed(capacity: usize, seed: u64) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn create(&mut self, data: Ag::Data) -> Idx {
        let idx = self.nodes.len();
        self.nodes.push(Node::new(data, self.rng.gen()));
        idx
    }

    fn total_size(&self) -> usize {
        self.nodes.len()
    }

    fn root(&self, mut u: Idx) -> Idx {
        while self.parent(u) != Self::EMPTY {
            u = self.nodes[u].parent;
        }
        u
    }

    fn data(&self, u: Idx) -> &Ag::Data {
        &self.nodes[u].data
    }

    fn mutate_data(&mut self, u: Idx, f: impl FnOnce(&mut Ag::Data)) {
        f(&mut self.nodes[u].data);
        let mut current = u;
        while current != Self::EMPTY {
            self.recalc(current);
            current = self.parent(current);
        }
    }

    fn order(&self, mut u: Idx) -> usize {
        let mut ord = self.size(self.child(u)[0]);
        while self.parent(u) != Self::EMPTY {
            let prev = u;
            u = self.nodes[u].parent;
            let [l, r] = self.child(u);
            if prev == r {
                ord += self.size(l) + 1;
            }
        }
        ord
    }

    fn len(&self, u: Idx) -> usize {
        if u == Self::EMPTY {
            0
        } else {
            self.nodes[self.root(u)].size
        }
    }

    fn total_agg(&self, u: Idx) -> Ag {
        self.ag_data(self.root(u))
    }

    fn find_kth(&self, u: Idx, mut k: usize) -> Idx {
        let mut u = self.root(u);
        while u != Self::EMPTY {
            let [l, r] = self.child(u);
            let szl = self.size(l);
            if szl > k {
                u = l;
            } else if szl == k {
                return u;
            } else {
                k -= szl + 1;
                u = r;
            }
        }
        Self::EMPTY
    }

    fn find_element(
        &self,
        u: Idx,
        mut search_strategy: impl FnMut(SearchData<'_, Ag>) -> SearchDirection,
    ) -> Idx {
        use SearchDirection::*;
        let mut u = self.root(u);
        while u != Self::EMPTY {
            let [l, r] = self.child(u);
            let left_agg = self.ag_data(l);
            let right_agg = self.ag_data(r);
            match search_strategy(SearchData {
                current_data: self.data(u),
                left_agg: &left_agg,
                right_agg: &right_agg,
            }) {
                Found => return u,
                NotFound => return Self::EMPTY,
                Left => u = l,
                Right => u = r,
            }
        }
        Self::EMPTY
    }

    fn concat(&mut self, u: Idx, v: Idx) -> Idx {
        log::trace!("concat {u} {v}");
        let (u, v) = (self.root(u), self.root(v));
        debug_assert!(
            u != v || u == Self::EMPTY,
            "both sides already live in the same sequence"
        );
        self.concat_roots(u, v)
    }

    fn split_after(&mut self, u: Idx) -> Idx {
        log::trace!("split after {u}");
        let k = self.order(u) + 1;
        let root = self.root(u);
        let (_, greater) = self.split_k(root, k);
        self.first(greater)
    }

    fn check_invariants(&self) {
        for u in 0..self.nodes.len() {
            let n = &self.nodes[u];
            for &c in &n.child {
                if c != Self::EMPTY {
                    assert_eq!(self.nodes[c].parent, u, "child {c} does not point back to {u}");
                    assert!(
                        n.priority >= self.nodes[c].priority,
                        "heap order violated between {u} and {c}"
                    );
                }
            }
            if n.parent != Self::EMPTY {
                assert!(
                    self.nodes[n.parent].child.contains(&u),
                    "parent {} does not point down to {u}",
                    n.parent
                );
            }
            let [l, r] = n.child;
            assert_eq!(n.size, self.size(l) + 1 + self.size(r), "stale size at {u}");
            let expected = self
                .ag_data(l)
                .merge(Ag::from(&n.data))
                .merge(self.ag_data(r));
            assert_eq!(n.ag_data, expected, "stale aggregate at {u}");
        }
    }
}
