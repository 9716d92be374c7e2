//! Community extraction from propinquity-weighted graphs
//!
//! Edges are first weighted from precomputed propinquity scores ([`Weighting`]), then every
//! vertex is given a community label ([`Extraction`]). The labeling can be scored with
//! [`quality::modularity`] and [`quality::nmi`].
#![deny(missing_docs)]

/// Data structure for storing a clustering of vertices
pub mod clustering;

/// Error type shared by all passes
pub mod error;

/// Community extraction strategies
pub mod extract;

/// Data structure for storing the network being weighted and partitioned
pub mod network;

/// Sources of propinquity scores
pub mod propinquity;

/// Clustering quality measures
pub mod quality;

/// Edge weighting strategies
pub mod weighting;

mod graph;

#[cfg(test)]
mod test;

pub use clustering::{Clustering, SimpleClustering};
pub use error::{Error, Result};
pub use extract::Extraction;
pub use network::{EdgeData, EdgeStyle, Network, Vertex};
pub use propinquity::{PropinquityMap, PropinquitySource};
pub use weighting::{RenderOptions, Weighting};

/// Weight the edges of `network` from `pm`, then label its vertices. Returns the number of
/// communities created.
pub fn detect_communities(
    network: &mut Network,
    pm: &impl PropinquitySource,
    weighting: Weighting,
    extraction: Extraction,
) -> Result<usize> {
    weighting.apply(network, pm, RenderOptions::default())?;
    extraction.run(network, &[])
}
