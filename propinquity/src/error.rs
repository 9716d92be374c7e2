use std::fmt::Display;

/// Result alias for weighting and extraction passes.
pub type Result<T> = std::result::Result<T, Error>;

/// Input-validation failures raised by a pass. A pass that returns an error leaves edge weights
/// and community labels partially written.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// No propinquity recorded between `source` and `target`.
    MissingPropinquity {
        /// Vertex whose propinquity row was consulted
        source: usize,
        /// Vertex looked up in that row
        target: usize,
    },

    /// The normalizing denominator for `edge` was zero.
    DegenerateNormalization {
        /// Edge being weighted
        edge: usize,
    },

    /// `edge` has no weight assigned.
    MissingWeight {
        /// Edge without a weight
        edge: usize,
    },

    /// `edge` carries a NaN weight, which cannot be ordered.
    InvalidWeight {
        /// Edge with the NaN weight
        edge: usize,
    },

    /// A vertex id outside the network.
    UnknownVertex {
        /// Offending id
        vertex: usize,
        /// Number of vertices in the network
        vertices: usize,
    },

    /// A vertex has no community label; run an extraction pass first.
    UnlabeledVertex {
        /// Vertex without a label
        vertex: usize,
    },
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MissingPropinquity { source, target } => {
                write!(f, "no propinquity recorded between vertex {source} and vertex {target}")
            }
            Error::DegenerateNormalization { edge } => {
                write!(f, "normalizing denominator of edge {edge} is zero")
            }
            Error::MissingWeight { edge } => write!(f, "edge {edge} has no weight"),
            Error::InvalidWeight { edge } => write!(f, "edge {edge} has a NaN weight"),
            Error::UnknownVertex { vertex, vertices } => {
                write!(f, "vertex {vertex} does not exist in a network of {vertices} vertices")
            }
            Error::UnlabeledVertex { vertex } => write!(f, "vertex {vertex} has no community label"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_display() {
        let e = Error::MissingPropinquity { source: 3, target: 7 };
        assert_eq!(e.to_string(), "no propinquity recorded between vertex 3 and vertex 7");

        let e = Error::UnknownVertex { vertex: 9, vertices: 4 };
        assert_eq!(e.to_string(), "vertex 9 does not exist in a network of 4 vertices");
    }
}
