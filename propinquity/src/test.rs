use crate::extract::{bfs, max_to_min};
use crate::quality::{modularity, nmi, par_modularity};
use crate::{
    detect_communities, Clustering, Extraction, Network, PropinquityMap, PropinquitySource, RenderOptions,
    SimpleClustering, Vertex, Weighting,
};
use fxhash::FxHashSet;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Generate a random planted-partition network: `mu` is the fraction of edges that cross clusters.
/// Propinquity of an adjacent pair is one plus its number of common neighbors.
fn gen_sample_network(
    rng: &mut impl Rng,
    num_clusters: usize,
    nodes_per_cluster: usize,
    mean_degree: f64,
    mu: f64,
) -> (Network, PropinquityMap) {
    assert!(num_clusters > 1);
    assert!(nodes_per_cluster > 1);

    let total_nodes = num_clusters * nodes_per_cluster;
    let total_edges = (total_nodes as f64 * mean_degree / 2.0).ceil() as usize;

    let mut network = Network::new();
    for c in 0..num_clusters {
        for _ in 0..nodes_per_cluster {
            network.add_vertex(Vertex::with_ground_truth(c));
        }
    }

    for _ in 0..total_edges {
        let in_cluster = rng.gen_bool(1.0 - mu);

        let n1 = rng.gen_range(0..total_nodes);
        let c1 = n1 / nodes_per_cluster;

        // Iterate until node2 is of the kind we want
        let n2 = loop {
            let n2 = if in_cluster {
                rng.gen_range(c1 * nodes_per_cluster..(c1 + 1) * nodes_per_cluster)
            } else {
                rng.gen_range(0..total_nodes)
            };
            let same = n2 / nodes_per_cluster == c1;
            if n1 != n2 && same == in_cluster {
                break n2;
            }
        };

        network.add_edge(n1, n2).unwrap();
    }

    let neighbors = (0..total_nodes)
        .map(|v| network.neighbors(v).map(|(n, _)| n).collect::<FxHashSet<_>>())
        .collect::<Vec<_>>();

    let mut pm = PropinquityMap::new(total_nodes);
    for e in 0..network.edges() {
        let (a, b) = network.endpoints(e).unwrap();
        let common = neighbors[a].intersection(&neighbors[b]).count();
        pm.set_symmetric(a, b, 1 + common as u32);
    }

    (network, pm)
}

/// Reference connected components, by union-find.
fn components(network: &Network) -> SimpleClustering {
    fn find(parent: &mut [usize], mut v: usize) -> usize {
        while parent[v] != v {
            parent[v] = parent[parent[v]];
            v = parent[v];
        }
        v
    }

    let mut parent = (0..network.vertices()).collect::<Vec<_>>();
    for e in 0..network.edges() {
        let (a, b) = network.endpoints(e).unwrap();
        let (ra, rb) = (find(&mut parent, a), find(&mut parent, b));
        parent[ra] = rb;
    }

    let roots = (0..network.vertices())
        .map(|v| find(&mut parent, v))
        .collect::<Vec<_>>();
    SimpleClustering::new_from_labels(&roots)
}

fn cycle() -> (Network, PropinquityMap) {
    let network = Network::from_edges(4, [(0, 1), (1, 2), (2, 3), (3, 0)].into_iter()).unwrap();
    let mut pm = PropinquityMap::new(4);
    for (a, b) in [(0, 1), (1, 2), (2, 3), (3, 0)] {
        pm.set_symmetric(a, b, 1);
    }
    (network, pm)
}

#[test]
fn cycle_is_one_community() {
    let (mut network, pm) = cycle();

    let count = detect_communities(&mut network, &pm, Weighting::Propinquity, Extraction::Bfs).unwrap();
    assert_eq!(count, 1);
    assert_eq!(network.communities().unwrap().num_clusters(), 1);

    // 0-1 opens the community, then 3, 2 join through their labeled neighbors; 2-3 is a no-op
    let count = detect_communities(&mut network, &pm, Weighting::Propinquity, Extraction::MaxToMin).unwrap();
    assert_eq!(count, 1);
    let labels = (0..4).map(|v| network.community(v).unwrap()).collect::<Vec<_>>();
    insta::assert_snapshot!(format!("{labels:?}"), @"[1, 1, 1, 1]");
}

#[test]
fn disjoint_triangles() {
    let edges = [
        (0, 1, 0.3),
        (1, 2, 2.0),
        (2, 0, 0.1),
        (3, 4, 5.0),
        (4, 5, 5.0),
        (5, 3, 1.0),
    ];
    let mut network = Network::from_edges(6, std::iter::empty()).unwrap();
    for (a, b, w) in edges {
        network.add_weighted_edge(a, b, w).unwrap();
    }

    assert_eq!(bfs(&mut network, &[]).unwrap(), 2);
    let c = network.communities().unwrap();
    assert_eq!(c.nodes_per_cluster(), vec![vec![0, 1, 2], vec![3, 4, 5]]);

    assert_eq!(max_to_min(&mut network, &[]).unwrap(), 2);
    assert!(network.communities().unwrap().same_partition(&c));
}

#[test]
fn isolated_vertex() {
    let mut network = Network::from_edges(1, std::iter::empty()).unwrap();

    assert_eq!(Extraction::Bfs.run(&mut network, &[]).unwrap(), 1);
    assert_eq!(network.community(0), Some(1));

    assert_eq!(Extraction::MaxToMin.run(&mut network, &[]).unwrap(), 1);
    assert_eq!(network.community(0), Some(1));
}

#[test]
fn empty_network() {
    let mut network = Network::new();
    let pm = PropinquityMap::default();

    for extraction in [Extraction::Bfs, Extraction::MaxToMin] {
        let count = detect_communities(&mut network, &pm, Weighting::PropinquityFraction, extraction).unwrap();
        assert_eq!(count, 0);
    }
    assert_eq!(network.communities().unwrap().num_clusters(), 0);
}

#[test]
fn bfs_matches_components() {
    for seed in 0..4 {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let (mut network, _) = gen_sample_network(&mut rng, 20, 10, 1.5, 0.1);
        let expected = components(&network);

        let count = bfs(&mut network, &[]).unwrap();
        let first = network.communities().unwrap();
        assert_eq!(count, expected.num_clusters());
        assert!(first.same_partition(&expected));

        bfs(&mut network, &[]).unwrap();
        assert!(network.communities().unwrap().same_partition(&first));
    }
}

#[test]
fn max_to_min_refines_components() {
    for seed in 0..4 {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let (mut network, pm) = gen_sample_network(&mut rng, 10, 20, 4.0, 0.2);
        let expected = components(&network);

        for weighting in [
            Weighting::Propinquity,
            Weighting::DegreeFraction,
            Weighting::PropinquityFraction,
        ] {
            let count = detect_communities(&mut network, &pm, weighting, Extraction::MaxToMin).unwrap();
            let c = network.communities().unwrap();

            assert_eq!(count, c.num_clusters());
            assert!(count >= expected.num_clusters());
            assert!(c.is_refinement_of(&expected));
        }
    }
}

#[test]
fn degree_fraction_bounds() {
    let mut rng = ChaCha20Rng::seed_from_u64(7);
    let (mut network, pm) = gen_sample_network(&mut rng, 5, 30, 6.0, 0.3);

    Weighting::DegreeFraction
        .apply(&mut network, &pm, RenderOptions::default())
        .unwrap();

    for e in 0..network.edges() {
        let (a, b) = network.endpoints(e).unwrap();
        let prop = pm.get(a, b).unwrap();
        let weight = network.edge(e).unwrap().weight().unwrap();
        let max_degree = network.degree(a).max(network.degree(b)) as f64;

        assert!(weight >= 0.0 && weight <= prop);
        assert_eq!(weight <= 1.0, prop <= max_degree);
    }
}

#[test]
fn quality_of_planted_partition() {
    let mut rng = ChaCha20Rng::seed_from_u64(0);
    let (mut network, pm) = gen_sample_network(&mut rng, 8, 25, 8.0, 0.1);

    detect_communities(&mut network, &pm, Weighting::PropinquityFraction, Extraction::MaxToMin).unwrap();
    let found = network.communities().unwrap();
    let truth = network.ground_truth().unwrap();

    let q = network.modularity().unwrap();
    let q_par = par_modularity(&network, &found).unwrap();
    assert!((q - q_par).abs() < 1e-9);
    assert!(q <= 1.0);

    let score = network.nmi().unwrap();
    assert!((0.0..=1.0 + 1e-12).contains(&score));
    assert!((score - nmi(&truth, &found)).abs() < 1e-9);

    // the planted partition itself beats the trivial one
    let planted = modularity(&network, &truth).unwrap();
    let single = modularity(&network, &SimpleClustering::new_from_labels(&vec![0; truth.nodes()])).unwrap();
    assert!(planted > single);
}
