use num_traits::cast::AsPrimitive;
use num_traits::identities::{One, Zero};
use std::convert::{From, TryFrom};
use std::iter::Iterator;
use std::ops::{Add, AddAssign};
use std::slice::Iter;

/// Integer type usable as a node or edge index.
pub trait IndexTrait:
    Add<Output = Self>
    + AddAssign
    + AsPrimitive<usize>
    + Clone
    + Copy
    + One
    + PartialEq
    + PartialOrd
    + TryFrom<usize>
    + Zero
where
    Self: std::marker::Sized,
{
}

impl IndexTrait for usize {}
impl IndexTrait for u32 {}

/// Typed index of a node or an edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Hash)]
pub struct Index<Ix>(Ix)
where
    Ix: IndexTrait;

impl<Ix> Index<Ix>
where
    Ix: IndexTrait,
{
    /// Raw index value
    pub fn index(&self) -> Ix {
        self.0
    }

    /// Index value as `usize`, for slice access
    pub fn as_usize(&self) -> usize {
        self.0.as_()
    }
}

impl<Ix> From<Ix> for Index<Ix>
where
    Ix: IndexTrait,
{
    fn from(ix: Ix) -> Self {
        Index(ix)
    }
}

/// Undirected edge record. `source` and `target` keep the order the edge was added in.
#[derive(Clone, Debug)]
pub struct Edge<E, Ix>
where
    Ix: IndexTrait,
{
    source: Index<Ix>,
    target: Index<Ix>,
    pub(crate) weight: E,
}

impl<E, Ix> Edge<E, Ix>
where
    Ix: IndexTrait,
{
    /// First endpoint
    pub fn source(&self) -> Index<Ix> {
        self.source
    }

    /// Second endpoint
    pub fn target(&self) -> Index<Ix> {
        self.target
    }

    /// Edge payload
    pub fn weight(&self) -> &E {
        &self.weight
    }
}

/// Adjacency entry: the neighbor reached and the edge used to reach it.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Adjacent<Ix>
where
    Ix: IndexTrait,
{
    target: Index<Ix>,
    edge: Index<Ix>,
}

/// Iterator over `(neighbor, edge)` pairs incident to a node.
pub struct Neighbors<'a, Ix = usize>
where
    Ix: IndexTrait,
{
    iter: Iter<'a, Adjacent<Ix>>,
}

impl<Ix> Iterator for Neighbors<'_, Ix>
where
    Ix: IndexTrait,
{
    type Item = (Index<Ix>, Index<Ix>);

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|Adjacent { target, edge }| (*target, *edge))
    }
}

/// Iterator over a dense `0..end` index range.
pub struct Indices<Ix>
where
    Ix: IndexTrait,
{
    start: Ix,
    end: Ix,
}

impl<Ix> Iterator for Indices<Ix>
where
    Ix: IndexTrait,
{
    type Item = Index<Ix>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start < self.end {
            let ix = self.start;
            self.start += Ix::one();
            Some(Index(ix))
        } else {
            None
        }
    }
}

/// Undirected graph with node payloads `N` and edge payloads `E`.
///
/// Edges are stored once and referenced from both endpoints' adjacency lists, so mutating an
/// edge payload is seen from either side. Edge indices are assigned in insertion order.
pub struct UnGraph<N, E, Ix = usize>
where
    Ix: IndexTrait,
    <Ix as TryFrom<usize>>::Error: std::fmt::Debug,
{
    adjacency: Vec<Vec<Adjacent<Ix>>>,
    nodes: Vec<N>,
    edges: Vec<Edge<E, Ix>>,
}

impl<N, E, Ix> UnGraph<N, E, Ix>
where
    Ix: IndexTrait,
    <Ix as TryFrom<usize>>::Error: std::fmt::Debug,
{
    /// Create an empty graph with room for `nodes` nodes and `edges` edges.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        UnGraph {
            adjacency: Vec::with_capacity(nodes),
            nodes: Vec::with_capacity(nodes),
            edges: Vec::with_capacity(edges),
        }
    }

    /// Add a node, returning its index.
    pub fn add_node(&mut self, weight: N) -> Index<Ix> {
        let index = Self::to_index(self.nodes.len());
        self.adjacency.push(vec![]);
        self.nodes.push(weight);
        index
    }

    /// Add an undirected edge, returning its index. A self-loop appears once in its node's adjacency.
    ///
    /// Panics if either endpoint is out of range.
    pub fn add_edge(&mut self, source: Index<Ix>, target: Index<Ix>, weight: E) -> Index<Ix> {
        assert!(source.as_usize() < self.nodes.len(), "edge source out of range");
        assert!(target.as_usize() < self.nodes.len(), "edge target out of range");

        let edge = Self::to_index(self.edges.len());
        self.adjacency[source.as_usize()].push(Adjacent { target, edge });
        if source != target {
            self.adjacency[target.as_usize()].push(Adjacent { target: source, edge });
        }
        self.edges.push(Edge { source, target, weight });
        edge
    }

    fn to_index(i: usize) -> Index<Ix> {
        // Exhausting the index type is a construction bug, not an input error.
        Index(Ix::try_from(i).expect("graph index overflow"))
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges incident to `ix`
    pub fn degree(&self, ix: Index<Ix>) -> usize {
        self.adjacency[ix.as_usize()].len()
    }

    /// Payload of node `ix`
    pub fn node_weight(&self, ix: Index<Ix>) -> Option<&N> {
        self.nodes.get(ix.as_usize())
    }

    /// Mutable payload of node `ix`
    pub fn node_weight_mut(&mut self, ix: Index<Ix>) -> Option<&mut N> {
        self.nodes.get_mut(ix.as_usize())
    }

    /// Edge record `ix`
    pub fn edge(&self, ix: Index<Ix>) -> Option<&Edge<E, Ix>> {
        self.edges.get(ix.as_usize())
    }

    /// Endpoints of edge `ix`, panicking if it is out of range
    pub fn endpoints(&self, ix: Index<Ix>) -> (Index<Ix>, Index<Ix>) {
        let e = &self.edges[ix.as_usize()];
        (e.source, e.target)
    }

    /// Mutable payload of edge `ix`
    pub fn edge_weight_mut(&mut self, ix: Index<Ix>) -> Option<&mut E> {
        self.edges.get_mut(ix.as_usize()).map(|e| &mut e.weight)
    }

    /// `(neighbor, edge)` pairs incident to `source`, in insertion order.
    pub fn neighbors(&self, source: Index<Ix>) -> Neighbors<Ix> {
        Neighbors {
            iter: self.adjacency[source.as_usize()].iter(),
        }
    }

    /// Iterate over all edge indices
    pub fn edge_indices(&self) -> Indices<Ix> {
        Indices {
            start: Ix::zero(),
            end: Self::to_index(self.edges.len()).index(),
        }
    }

    /// All node payloads, in index order
    pub fn node_weights(&self) -> Iter<N> {
        self.nodes.iter()
    }

    /// All node payloads, mutably
    pub fn node_weights_mut(&mut self) -> std::slice::IterMut<N> {
        self.nodes.iter_mut()
    }
}
