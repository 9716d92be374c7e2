use crate::error::Result;
use crate::network::ix;
use crate::{Clustering, Network};
use itertools::Itertools;
use rayon::prelude::*;
use std::collections::HashMap;

/// Weighted modularity of a clustering: the fraction of edge weight inside communities minus
/// the fraction expected if edges were rewired at random with the same vertex strengths.
///
/// Every edge must carry a weight. A network without edge weight scores 0.
pub fn modularity(network: &Network, clustering: &impl Clustering) -> Result<f64> {
    let mut internal_weight = 0.0f64;
    let mut total_edge_weight = 0.0f64;
    let mut cluster_strengths = vec![0.0; clustering.num_clusters()];

    for e in 0..network.edges() {
        let weight = network.edge_weight(e)?;
        let (a, b) = network.graph.endpoints(ix(e));
        let c1 = clustering.get(a.as_usize());
        let c2 = clustering.get(b.as_usize());

        if c1 == c2 {
            internal_weight += weight;
        }

        cluster_strengths[c1] += weight;
        cluster_strengths[c2] += weight;
        total_edge_weight += weight;
    }

    Ok(score(internal_weight, total_edge_weight, &cluster_strengths))
}

/// Weighted modularity of a clustering, computed using parallelization.
pub fn par_modularity<C: Clustering + Sync>(network: &Network, clustering: &C) -> Result<f64> {
    // Create a number of chunks that is large relative to typical thread-counts
    // To allow rayon to balance the uneven chunk loads induced by the "node ordering" constraint.
    let chunk_size = std::cmp::max(1, ((network.vertices() as f64) / 64.0) as usize);
    let vertices = (0..network.vertices()).collect::<Vec<usize>>();

    let chunks = vertices
        .par_chunks(chunk_size)
        .map(|nodes| -> Result<(f64, f64, Vec<(usize, f64)>)> {
            let mut internal_weight = 0f64;
            let mut total_edge_weight = 0f64;
            let mut strengths = Vec::with_capacity(nodes.len());

            for &i in nodes {
                let c_i = clustering.get(i);
                let mut strength = 0f64;
                for (j, e) in network.neighbors(i) {
                    let weight = network.edge_weight(e)?;
                    // a self-loop is listed once but touches its vertex twice
                    strength += if j == i { 2.0 * weight } else { weight };

                    // Enforce ordering of node indices to avoid processing edges twice.
                    if j <= i {
                        total_edge_weight += weight;
                        if c_i == clustering.get(j) {
                            internal_weight += weight;
                        }
                    }
                }
                strengths.push((c_i, strength));
            }
            Ok((internal_weight, total_edge_weight, strengths))
        })
        .collect::<Result<Vec<_>>>()?;

    // Reduce serially to ensure deterministic order of adds
    let mut internal_weight = 0f64;
    let mut total_edge_weight = 0f64;
    let mut cluster_strengths = vec![0.0; clustering.num_clusters()];

    for (internal, total, strengths) in chunks {
        internal_weight += internal;
        total_edge_weight += total;
        for (c, s) in strengths {
            cluster_strengths[c] += s;
        }
    }

    Ok(score(internal_weight, total_edge_weight, &cluster_strengths))
}

fn score(internal_weight: f64, total_edge_weight: f64, cluster_strengths: &[f64]) -> f64 {
    if total_edge_weight == 0.0 {
        return 0.0;
    }

    let expected = cluster_strengths
        .iter()
        .map(|s| (s / (2.0 * total_edge_weight)).powi(2))
        .sum::<f64>();

    internal_weight / total_edge_weight - expected
}

/// Normalized mutual information between two clusterings of the same vertices,
/// `2 I(x; y) / (H(x) + H(y))`. Two clusterings without entropy (including empty ones) score 1.
pub fn nmi(x: &impl Clustering, y: &impl Clustering) -> f64 {
    assert_eq!(x.nodes(), y.nodes(), "clusterings cover different vertex sets");
    let n = x.nodes() as f64;

    let x_sizes = (0..x.nodes()).map(|i| x.get(i)).counts();
    let y_sizes = (0..y.nodes()).map(|i| y.get(i)).counts();
    let joint = (0..x.nodes()).map(|i| (x.get(i), y.get(i))).counts();

    let entropy = |sizes: &HashMap<usize, usize>| {
        sizes
            .values()
            .map(|&s| {
                let p = s as f64 / n;
                -p * p.ln()
            })
            .sum::<f64>()
    };
    let h = entropy(&x_sizes) + entropy(&y_sizes);

    if h == 0.0 {
        return 1.0;
    }

    let mutual_information = joint
        .iter()
        .map(|(&(cx, cy), &s)| {
            let s = s as f64;
            let expected = x_sizes[&cx] as f64 * y_sizes[&cy] as f64;
            s / n * (s * n / expected).ln()
        })
        .sum::<f64>();

    2.0 * mutual_information / h
}
