use crate::error::{Error, Result};
use crate::network::Network;
use log::{debug, info};
use noisy_float::types::N64;
use std::cmp::Reverse;
use std::collections::{BTreeMap, VecDeque};

/// How vertices are partitioned into communities.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Extraction {
    /// One community per connected component, ignoring weights.
    Bfs,
    /// Within each component, pair vertices along the heaviest edges first.
    MaxToMin,
}

impl Extraction {
    /// Label every vertex of `network`, returning the number of communities created.
    /// See [`bfs`] and [`max_to_min`] for how `fixed_ids` is treated.
    pub fn run(self, network: &mut Network, fixed_ids: &[usize]) -> Result<usize> {
        match self {
            Extraction::Bfs => bfs(network, fixed_ids),
            Extraction::MaxToMin => max_to_min(network, fixed_ids),
        }
    }
}

/// Breadth-first walker whose buffers are reused across components. Each walk gets a fresh
/// epoch, so the reached-stamps never need clearing.
struct Walker {
    epoch: usize,
    node_stamp: Vec<usize>,
    edge_stamp: Vec<usize>,
    queue: VecDeque<usize>,
    /// Vertices reached by the last walk, in breadth-first order
    component: Vec<usize>,
    /// Edges incident to the last component, in discovery order, each once
    edges: Vec<usize>,
}

impl Walker {
    fn new(network: &Network, collect_edges: bool) -> Self {
        Walker {
            epoch: 0,
            node_stamp: vec![0; network.vertices()],
            edge_stamp: if collect_edges { vec![0; network.edges()] } else { Vec::new() },
            queue: VecDeque::new(),
            component: Vec::new(),
            edges: Vec::new(),
        }
    }

    fn walk(&mut self, network: &Network, root: usize) {
        let collect_edges = !self.edge_stamp.is_empty();
        self.epoch += 1;
        self.component.clear();
        self.edges.clear();

        self.node_stamp[root] = self.epoch;
        self.queue.push_back(root);

        while let Some(v) = self.queue.pop_front() {
            self.component.push(v);

            for (n, e) in network.neighbors(v) {
                if collect_edges && self.edge_stamp[e] != self.epoch {
                    self.edge_stamp[e] = self.epoch;
                    self.edges.push(e);
                }
                if self.node_stamp[n] != self.epoch {
                    self.node_stamp[n] = self.epoch;
                    self.queue.push_back(n);
                }
            }
        }
    }
}

/// Label each connected component with its own community, numbered from 1 in vertex order.
///
/// Vertices in `fixed_ids` are labeled 0 up front and never start a component, but traversal
/// still passes through them, so their component-mates are not pulled into community 0. The
/// returned count includes the seeded community when `fixed_ids` is non-empty.
pub fn bfs(network: &mut Network, fixed_ids: &[usize]) -> Result<usize> {
    for &id in fixed_ids {
        network.check_vertex(id)?;
    }
    network.clear_communities();

    let mut visited = vec![false; network.vertices()];
    let mut num_communities = 0;

    if !fixed_ids.is_empty() {
        num_communities += 1;
        for &id in fixed_ids {
            visited[id] = true;
            network.set_community(id, 0);
        }
    }

    let mut walker = Walker::new(network, false);
    let mut label = 0;

    for root in 0..network.vertices() {
        if visited[root] {
            continue;
        }

        label += 1;
        num_communities += 1;
        walker.walk(network, root);

        for &v in &walker.component {
            if !visited[v] {
                visited[v] = true;
                network.set_community(v, label);
            }
        }
    }

    info!("Bfs: {} communities over {} vertices", num_communities, network.vertices());
    Ok(num_communities)
}

/// Greedy descending-weight labeling inside each connected component.
///
/// Edges of a component are visited heaviest first, ties in discovery order. An edge with two
/// unlabeled endpoints opens a new community; an edge with one labeled endpoint extends that
/// community; an edge whose endpoints are both labeled is skipped, even when the labels differ.
/// Vertices without edges become singletons. `fixed_ids` is accepted but not honored.
pub fn max_to_min(network: &mut Network, fixed_ids: &[usize]) -> Result<usize> {
    if !fixed_ids.is_empty() {
        debug!("MaxToMin: ignoring {} fixed vertices", fixed_ids.len());
    }
    network.clear_communities();

    let mut visited = vec![false; network.vertices()];
    let mut walker = Walker::new(network, true);
    let mut edges_by_weight: BTreeMap<Reverse<N64>, Vec<usize>> = BTreeMap::new();
    let mut num_communities = 0;

    for root in 0..network.vertices() {
        if visited[root] {
            continue;
        }

        walker.walk(network, root);
        for &v in &walker.component {
            visited[v] = true;
        }

        if walker.edges.is_empty() {
            num_communities += 1;
            network.set_community(root, num_communities);
            continue;
        }

        for &e in &walker.edges {
            let weight = network.edge_weight(e)?;
            let weight = N64::try_new(weight).ok_or(Error::InvalidWeight { edge: e })?;
            edges_by_weight.entry(Reverse(weight)).or_default().push(e);
        }

        let before = num_communities;
        for &e in edges_by_weight.values().flatten() {
            let Some((a, b)) = network.endpoints(e) else {
                continue;
            };

            match (network.community(a), network.community(b)) {
                (None, None) => {
                    num_communities += 1;
                    network.set_community(a, num_communities);
                    network.set_community(b, num_communities);
                }
                (Some(c), None) => network.set_community(b, c),
                (None, Some(c)) => network.set_community(a, c),
                (Some(_), Some(_)) => (),
            }
        }

        debug!(
            "MaxToMin: component of vertex {}: {} vertices, {} edges, {} communities",
            root,
            walker.component.len(),
            walker.edges.len(),
            num_communities - before
        );
        edges_by_weight.clear();
    }

    info!("MaxToMin: {} communities over {} vertices", num_communities, network.vertices());
    Ok(num_communities)
}
