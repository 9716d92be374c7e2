/// Trait representing a clustering over a set of vertices
/// Each vertex is assigned a single integer label
pub trait Clustering: std::fmt::Debug {
    /// Initialize the clustering with a known set of labels
    fn new_from_labels(labels: &[usize]) -> Self;

    /// Tabulate the vertices in each cluster
    fn nodes_per_cluster(&self) -> Vec<Vec<usize>>;

    /// Get the label of vertex `i`
    fn get(&self, i: usize) -> usize;

    /// Set the label of vertex 'i'. Note this must update the number of clusters
    fn set(&mut self, i: usize, cluster: usize);

    /// Total number of vertices
    fn nodes(&self) -> usize;

    /// Number of distinct clusters
    fn num_clusters(&self) -> usize;

    /// Reassign labels, removing unused labels
    fn remove_empty_clusters(&mut self);

    /// True if every cluster of `self` lies inside a single cluster of `other`.
    fn is_refinement_of<C: Clustering>(&self, other: &C) -> bool {
        assert_eq!(self.nodes(), other.nodes());
        let mut parent = vec![None; self.num_clusters()];

        for i in 0..self.nodes() {
            let p = parent[self.get(i)].get_or_insert(other.get(i));
            if *p != other.get(i) {
                return false;
            }
        }

        true
    }

    /// True if both clusterings group the vertices identically, whatever the label values.
    fn same_partition<C: Clustering>(&self, other: &C) -> bool {
        self.num_clusters() == other.num_clusters() && self.is_refinement_of(other)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// A basic Vec-backed implementation of `Clustering`
pub struct SimpleClustering {
    labels: Vec<usize>,
    num_clusters: usize,
}

impl SimpleClustering {
    /// Labels of all vertices, in vertex order
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }
}

impl Clustering for SimpleClustering {
    fn new_from_labels(input_labels: &[usize]) -> Self {
        let max_cluster = input_labels.iter().copied().max();

        let mut r = SimpleClustering {
            labels: input_labels.to_vec(),
            num_clusters: max_cluster.map_or(0, |m| m + 1),
        };

        r.remove_empty_clusters();
        r
    }

    fn nodes_per_cluster(&self) -> Vec<Vec<usize>> {
        let mut cluster_lists = vec![Vec::new(); self.num_clusters()];

        for (node, label) in self.labels.iter().enumerate() {
            cluster_lists[*label].push(node)
        }

        cluster_lists
    }

    fn get(&self, node: usize) -> usize {
        self.labels[node]
    }

    fn set(&mut self, node: usize, label: usize) {
        self.labels[node] = label;
        if label >= self.num_clusters {
            self.num_clusters = label + 1;
        }
    }

    fn nodes(&self) -> usize {
        self.labels.len()
    }

    fn num_clusters(&self) -> usize {
        self.num_clusters
    }

    fn remove_empty_clusters(&mut self) {
        let mut counts = vec![0; self.num_clusters()];

        for &l in self.labels.iter() {
            counts[l] += 1;
        }

        let mut new_labels = Vec::with_capacity(self.num_clusters());

        let mut new_label = 0;
        for cluster_count in counts {
            if cluster_count == 0 {
                new_labels.push(usize::MAX);
            } else {
                new_labels.push(new_label);
                new_label += 1;
            }
        }

        for l in self.labels.iter_mut() {
            *l = new_labels[*l];
        }

        self.num_clusters = new_label;
    }
}
