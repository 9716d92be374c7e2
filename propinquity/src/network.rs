use crate::error::{Error, Result};
use crate::graph::{Index, Neighbors, UnGraph};
use crate::{quality, Clustering, SimpleClustering};

/// Undirected graph of [`Vertex`] records joined by [`EdgeData`] edges.
pub(crate) type Graph = UnGraph<Vertex, EdgeData, u32>;

/// Per-vertex state read and written by the weighting and extraction passes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vertex {
    pub(crate) community: Option<usize>,
    ground_truth: Option<usize>,
    candidates: Option<Vec<usize>>,
    pub(crate) nr_sum: Option<f64>,
}

impl Vertex {
    /// A vertex with no labels and no candidate set
    pub fn new() -> Vertex {
        Vertex::default()
    }

    /// A vertex whose known ground-truth community is `label`
    pub fn with_ground_truth(label: usize) -> Vertex {
        Vertex {
            ground_truth: Some(label),
            ..Vertex::default()
        }
    }

    /// Community assigned by the last extraction pass
    pub fn community(&self) -> Option<usize> {
        self.community
    }

    /// Reference community used by NMI
    pub fn ground_truth(&self) -> Option<usize> {
        self.ground_truth
    }

    /// Set the reference community used by NMI
    pub fn set_ground_truth(&mut self, label: Option<usize>) {
        self.ground_truth = label;
    }

    /// Candidate neighbor set (`Nr`) used by propinquity-sum normalization. `None` means the
    /// vertex's adjacent neighbors.
    pub fn candidates(&self) -> Option<&[usize]> {
        self.candidates.as_deref()
    }

    /// Replace the candidate neighbor set. Invalidates the cached propinquity sum.
    pub fn set_candidates(&mut self, candidates: Option<Vec<usize>>) {
        self.candidates = candidates;
        self.nr_sum = None;
    }

    /// Cached sum of propinquity over the candidate set, once a weighting pass computed it
    pub fn nr_sum(&self) -> Option<f64> {
        self.nr_sum
    }
}

/// Cosmetic rendering of an edge's weight. Never read by the algorithms.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeStyle {
    /// Weight formatted with two decimals
    pub label: String,
    /// Display width proportional to the weight
    pub width: Option<f64>,
}

/// Per-edge state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeData {
    pub(crate) weight: Option<f64>,
    pub(crate) style: Option<EdgeStyle>,
}

impl EdgeData {
    /// An edge with a preassigned weight
    pub fn weighted(weight: f64) -> EdgeData {
        EdgeData {
            weight: Some(weight),
            style: None,
        }
    }

    /// Weight written by the last weighting pass, if any
    pub fn weight(&self) -> Option<f64> {
        self.weight
    }

    /// Cosmetic label and width, if rendered
    pub fn style(&self) -> Option<&EdgeStyle> {
        self.style.as_ref()
    }
}

/// Iterator over pairs of (adjacent vertex id, edge id) for all neighbors of a chosen vertex.
pub struct NeighborAndEdgeIter<'a> {
    iter: Neighbors<'a, u32>,
}

impl Iterator for NeighborAndEdgeIter<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        self.iter
            .next()
            .map(|(neighbor, edge)| (neighbor.as_usize(), edge.as_usize()))
    }
}

pub(crate) fn ix(i: usize) -> Index<u32> {
    (i as u32).into()
}

/// Container for the network graph.
pub struct Network {
    pub(crate) graph: Graph,
}

impl Network {
    /// Create a new empty network
    pub fn new() -> Network {
        Network {
            graph: Graph::with_capacity(0, 0),
        }
    }

    /// Create a network of `n_vertices` plain vertices joined by the unweighted `adjacency` pairs.
    /// Duplicate pairs are kept as parallel edges.
    pub fn from_edges<I: Iterator<Item = (usize, usize)>>(n_vertices: usize, adjacency: I) -> Result<Network> {
        let mut network = Network::new();
        for _ in 0..n_vertices {
            network.add_vertex(Vertex::new());
        }
        for (a, b) in adjacency {
            network.add_edge(a, b)?;
        }
        Ok(network)
    }

    /// Add a vertex, returning its id
    pub fn add_vertex(&mut self, vertex: Vertex) -> usize {
        self.graph.add_node(vertex).as_usize()
    }

    /// Add an unweighted edge between `a` and `b`, returning its id
    pub fn add_edge(&mut self, a: usize, b: usize) -> Result<usize> {
        self.add_edge_data(a, b, EdgeData::default())
    }

    /// Add an edge between `a` and `b` with a preassigned weight, returning its id
    pub fn add_weighted_edge(&mut self, a: usize, b: usize, weight: f64) -> Result<usize> {
        self.add_edge_data(a, b, EdgeData::weighted(weight))
    }

    fn add_edge_data(&mut self, a: usize, b: usize, data: EdgeData) -> Result<usize> {
        self.check_vertex(a)?;
        self.check_vertex(b)?;
        Ok(self.graph.add_edge(ix(a), ix(b), data).as_usize())
    }

    pub(crate) fn check_vertex(&self, vertex: usize) -> Result<()> {
        if vertex < self.vertices() {
            Ok(())
        } else {
            Err(Error::UnknownVertex {
                vertex,
                vertices: self.vertices(),
            })
        }
    }

    /// Number of vertices in the network
    pub fn vertices(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges in the network
    pub fn edges(&self) -> usize {
        self.graph.edge_count()
    }

    /// Get vertex `vertex`
    pub fn vertex(&self, vertex: usize) -> Option<&Vertex> {
        self.graph.node_weight(ix(vertex))
    }

    /// Get vertex `vertex` mutably
    pub fn vertex_mut(&mut self, vertex: usize) -> Option<&mut Vertex> {
        self.graph.node_weight_mut(ix(vertex))
    }

    /// Get edge `edge`
    pub fn edge(&self, edge: usize) -> Option<&EdgeData> {
        self.graph.edge(ix(edge)).map(|e| e.weight())
    }

    /// The two endpoints of `edge`, in the order the edge was added
    pub fn endpoints(&self, edge: usize) -> Option<(usize, usize)> {
        self.graph
            .edge(ix(edge))
            .map(|e| (e.source().as_usize(), e.target().as_usize()))
    }

    /// Number of edges incident to `vertex`. A self-loop counts once.
    pub fn degree(&self, vertex: usize) -> usize {
        self.graph.degree(ix(vertex))
    }

    /// Iterator over pairs of (adjacent vertex id, edge id) for all neighbors of `vertex`.
    pub fn neighbors(&'_ self, vertex: usize) -> NeighborAndEdgeIter<'_> {
        NeighborAndEdgeIter {
            iter: self.graph.neighbors(ix(vertex)),
        }
    }

    /// Community label of `vertex`
    pub fn community(&self, vertex: usize) -> Option<usize> {
        self.vertex(vertex).and_then(Vertex::community)
    }

    pub(crate) fn set_community(&mut self, vertex: usize, label: usize) {
        if let Some(v) = self.vertex_mut(vertex) {
            v.community = Some(label);
        }
    }

    /// Remove every community label
    pub fn clear_communities(&mut self) {
        for v in self.graph.node_weights_mut() {
            v.community = None;
        }
    }

    /// Forget every cached propinquity sum. Call after changing the propinquity source.
    pub fn clear_nr_sums(&mut self) {
        for v in self.graph.node_weights_mut() {
            v.nr_sum = None;
        }
    }

    /// The current community labels as a dense clustering
    pub fn communities(&self) -> Result<SimpleClustering> {
        self.labels(Vertex::community)
    }

    /// The ground-truth labels as a dense clustering
    pub fn ground_truth(&self) -> Result<SimpleClustering> {
        self.labels(Vertex::ground_truth)
    }

    fn labels(&self, label: impl Fn(&Vertex) -> Option<usize>) -> Result<SimpleClustering> {
        let labels = self
            .graph
            .node_weights()
            .enumerate()
            .map(|(vertex, v)| label(v).ok_or(Error::UnlabeledVertex { vertex }))
            .collect::<Result<Vec<_>>>()?;
        Ok(SimpleClustering::new_from_labels(&labels))
    }

    /// Total weight of all edges. Fails if an edge is unweighted.
    pub fn get_total_edge_weight(&self) -> Result<f64> {
        self.graph
            .edge_indices()
            .try_fold(0.0, |acc, e| self.edge_weight(e.as_usize()).map(|w| acc + w))
    }

    /// Weight of `edge`, failing if it has none
    pub(crate) fn edge_weight(&self, edge: usize) -> Result<f64> {
        self.edge(edge)
            .and_then(EdgeData::weight)
            .ok_or(Error::MissingWeight { edge })
    }

    /// Modularity of the current community labels, using edge weights
    pub fn modularity(&self) -> Result<f64> {
        quality::modularity(self, &self.communities()?)
    }

    /// Normalized mutual information between the current community labels and the ground truth
    pub fn nmi(&self) -> Result<f64> {
        Ok(quality::nmi(&self.communities()?, &self.ground_truth()?))
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::new()
    }
}
