use fxhash::FxHashMap;

/// Lookup of precomputed propinquity scores between vertex pairs.
pub trait PropinquitySource {
    /// Propinquity recorded in the row of `vertex` for `neighbor`, if any.
    fn get(&self, vertex: usize, neighbor: usize) -> Option<f64>;
}

impl<T: PropinquitySource + ?Sized> PropinquitySource for &T {
    fn get(&self, vertex: usize, neighbor: usize) -> Option<f64> {
        (**self).get(vertex, neighbor)
    }
}

/// Propinquity counts stored as one hash-map row per vertex.
///
/// Rows are independent: `set(a, b, p)` does not imply an entry for `(b, a)`. Use
/// [`PropinquityMap::set_symmetric`] when both directions should agree.
#[derive(Debug, Clone, Default)]
pub struct PropinquityMap {
    rows: Vec<FxHashMap<usize, u32>>,
}

impl PropinquityMap {
    /// Create a map with an empty row for each of `vertices` vertices.
    pub fn new(vertices: usize) -> PropinquityMap {
        PropinquityMap {
            rows: vec![FxHashMap::default(); vertices],
        }
    }

    /// Number of rows
    pub fn vertices(&self) -> usize {
        self.rows.len()
    }

    /// Record `count` in the row of `vertex`, growing the map if needed.
    pub fn set(&mut self, vertex: usize, neighbor: usize, count: u32) {
        if vertex >= self.rows.len() {
            self.rows.resize_with(vertex + 1, FxHashMap::default);
        }
        self.rows[vertex].insert(neighbor, count);
    }

    /// Record `count` in both rows.
    pub fn set_symmetric(&mut self, a: usize, b: usize, count: u32) {
        self.set(a, b, count);
        self.set(b, a, count);
    }

    /// Add `delta` to the count of `(vertex, neighbor)`, starting from zero.
    pub fn increment(&mut self, vertex: usize, neighbor: usize, delta: u32) {
        if vertex >= self.rows.len() {
            self.rows.resize_with(vertex + 1, FxHashMap::default);
        }
        *self.rows[vertex].entry(neighbor).or_insert(0) += delta;
    }

    /// The raw count row of `vertex`
    pub fn row(&self, vertex: usize) -> Option<&FxHashMap<usize, u32>> {
        self.rows.get(vertex)
    }
}

impl PropinquitySource for PropinquityMap {
    fn get(&self, vertex: usize, neighbor: usize) -> Option<f64> {
        self.rows
            .get(vertex)
            .and_then(|row| row.get(&neighbor))
            .map(|&count| count as f64)
    }
}
