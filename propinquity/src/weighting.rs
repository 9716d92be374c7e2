use crate::error::{Error, Result};
use crate::network::{ix, EdgeStyle, Network, Vertex};
use crate::propinquity::PropinquitySource;
use fxhash::FxHashSet;
use log::{debug, info};

/// Display width per unit of weight for [`Weighting::Propinquity`]
pub const DEFAULT_PROPINQUITY_WIDTH_SCALE: f64 = 0.3;
/// Display width per unit of weight for [`Weighting::DegreeFraction`]
pub const DEFAULT_DEGREE_FRACTION_WIDTH_SCALE: f64 = 3.0;
/// Display width per unit of weight for [`Weighting::PropinquityFraction`]
pub const DEFAULT_PROPINQUITY_FRACTION_WIDTH_SCALE: f64 = 10.0;

/// How a propinquity score becomes an edge weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Weighting {
    /// The raw propinquity of the endpoints.
    Propinquity,
    /// Propinquity divided by the larger endpoint degree, so hubs do not dominate.
    DegreeFraction,
    /// Propinquity divided by the larger endpoint propinquity sum over its candidate set.
    PropinquityFraction,
}

/// Cosmetic rendering written next to each weight. The default renders nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Attach the weight as a two-decimal label
    pub label: bool,
    /// Also attach a width proportional to the weight. Only honored together with `label`.
    pub width: bool,
}

impl RenderOptions {
    fn style(&self, weight: f64, scale: f64) -> Option<EdgeStyle> {
        if !self.label {
            return None;
        }

        Some(EdgeStyle {
            label: format!("{weight:.2}"),
            width: self.width.then_some(weight * scale),
        })
    }
}

impl Weighting {
    fn width_scale(self) -> f64 {
        match self {
            Weighting::Propinquity => DEFAULT_PROPINQUITY_WIDTH_SCALE,
            Weighting::DegreeFraction => DEFAULT_DEGREE_FRACTION_WIDTH_SCALE,
            Weighting::PropinquityFraction => DEFAULT_PROPINQUITY_FRACTION_WIDTH_SCALE,
        }
    }

    /// Weight every edge of `network` once, in edge order, from the scores in `pm`.
    ///
    /// Propinquity is read from the row of each edge's first endpoint. On error the weights of
    /// earlier edges have already been overwritten.
    pub fn apply(self, network: &mut Network, pm: &impl PropinquitySource, render: RenderOptions) -> Result<()> {
        for edge in 0..network.edges() {
            let (a, b) = network.graph.endpoints(ix(edge));
            let (a, b) = (a.as_usize(), b.as_usize());

            let weight = match self {
                Weighting::Propinquity => propinquity(pm, a, b)?,
                Weighting::DegreeFraction => {
                    let max_degree = network.degree(a).max(network.degree(b));
                    fraction(propinquity(pm, a, b)?, max_degree as f64, edge)?
                }
                Weighting::PropinquityFraction => {
                    let max_sum = nr_sum(network, pm, a)?.max(nr_sum(network, pm, b)?);
                    fraction(propinquity(pm, a, b)?, max_sum, edge)?
                }
            };

            if let Some(data) = network.graph.edge_weight_mut(ix(edge)) {
                data.weight = Some(weight);
                data.style = render.style(weight, self.width_scale());
            }
        }

        info!("{:?}: weighted {} edges", self, network.edges());
        Ok(())
    }
}

fn propinquity(pm: &impl PropinquitySource, source: usize, target: usize) -> Result<f64> {
    pm.get(source, target)
        .ok_or(Error::MissingPropinquity { source, target })
}

fn fraction(prop: f64, denominator: f64, edge: usize) -> Result<f64> {
    if denominator == 0.0 {
        return Err(Error::DegenerateNormalization { edge });
    }
    Ok(prop / denominator)
}

/// Sum of propinquity over the candidate set of `vertex`, computed on first use and cached on
/// the vertex.
fn nr_sum(network: &mut Network, pm: &impl PropinquitySource, vertex: usize) -> Result<f64> {
    if let Some(sum) = network.vertex(vertex).and_then(Vertex::nr_sum) {
        return Ok(sum);
    }

    let sum = match network.vertex(vertex).and_then(Vertex::candidates) {
        Some(candidates) => candidates
            .iter()
            .try_fold(0.0, |acc, &n| propinquity(pm, vertex, n).map(|p| acc + p))?,
        None => {
            let mut seen = FxHashSet::default();
            let mut sum = 0.0;
            for (n, _) in network.neighbors(vertex) {
                if n != vertex && seen.insert(n) {
                    sum += propinquity(pm, vertex, n)?;
                }
            }
            sum
        }
    };
    debug!("vertex {vertex}: propinquity sum {sum}");

    if let Some(v) = network.vertex_mut(vertex) {
        v.nr_sum = Some(sum);
    }
    Ok(sum)
}

/// Largest propinquity a vertex of the given degree can reach with a vertex it is not adjacent
/// to: one per neighbor, plus one per pair of neighbors.
pub fn max_propinquity_to_non_neighbor(degree: usize) -> usize {
    degree + degree * degree.saturating_sub(1) / 2
}
