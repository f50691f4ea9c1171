//! Vertex and edge value types shared by the forest and connectivity layers.

use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};

/// A vertex in a graph. Valid vertices are in `0..n` where `n` is the number
/// of vertices the owning structure was created with.
pub type Vertex = usize;

/// An edge in an undirected graph, normalized so that `first <= second`.
/// Equality and hashing act on the normalized form, so `{u, v}` and `{v, u}`
/// are the same edge.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct UndirectedEdge {
    pub first: Vertex,
    pub second: Vertex,
}

impl UndirectedEdge {
    pub fn new(u: Vertex, v: Vertex) -> Self {
        Self {
            first: u.min(v),
            second: u.max(v),
        }
    }
}

impl Debug for UndirectedEdge {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.first, self.second)
    }
}

impl Display for UndirectedEdge {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.first, self.second)
    }
}

impl Hash for UndirectedEdge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(combine_hashes(
            mix64(self.first as u64),
            mix64(self.second as u64),
        ));
    }
}

/// Finalizer step of MurmurHash3. The default hash of an integer is often the
/// identity function; this is quick but actually scrambles the bits.
pub fn mix64(mut x: u64) -> u64 {
    x ^= x >> 33;
    x = x.wrapping_mul(0xff51afd7ed558ccd);
    x ^= x >> 33;
    x = x.wrapping_mul(0xc4ceb9fe1a85ec53);
    x ^= x >> 33;
    x
}

/// Boost's `hash_combine`, with a 64-bit magic number.
pub fn combine_hashes(h1: u64, h2: u64) -> u64 {
    h1 ^ h2
        .wrapping_add(0x9e3779b97f4a7c15)
        .wrapping_add(h1 << 6)
        .wrapping_add(h1 >> 2)
}
