//! Finite labelled graph implementing the hardcore [`Graph`] capability.
//!
//! Vertices are the integers `0..n`; the adjacency list for each vertex
//! stores the vertex itself first, encoding the closed-neighbourhood
//! convention the sampler relies on.

use hardcore_core::Graph;
use rand::Rng;
use thiserror::Error;

/// Errors raised while constructing a [`FiniteGraph`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum FiniteGraphError {
    /// The graph must contain at least one vertex.
    #[error("graph must contain at least one vertex")]
    EmptyVertexSet,
    /// An edge endpoint referenced a vertex outside `0..n`.
    #[error("edge endpoint {index} is out of bounds for {vertex_count} vertices")]
    OutOfBounds { index: usize, vertex_count: usize },
    /// Input edges must not be self-loops; the closed-neighbourhood loop is
    /// implicit.
    #[error("self-loop on vertex {vertex} is not a valid edge")]
    SelfLoop { vertex: usize },
}

/// Undirected graph on `n` labelled vertices, immutable after construction.
///
/// # Examples
/// ```
/// use hardcore_core::Graph;
/// use hardcore_graphs_finite::FiniteGraph;
///
/// let path = FiniteGraph::try_new(4, &[(0, 1), (1, 2), (2, 3)])?;
/// assert_eq!(path.size(), 4.0);
/// assert_eq!(path.degree(1), 3.0);
/// assert!(path.is_adj(1, 1));
/// assert!(path.is_adj(1, 2));
/// assert!(!path.is_adj(0, 3));
/// # Ok::<(), hardcore_graphs_finite::FiniteGraphError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FiniteGraph {
    adj: Vec<Vec<usize>>,
}

impl FiniteGraph {
    /// Builds the graph from a vertex count and an undirected edge list.
    ///
    /// Duplicate edges are ignored.
    ///
    /// # Errors
    /// Returns [`FiniteGraphError::EmptyVertexSet`] when `n` is zero,
    /// [`FiniteGraphError::OutOfBounds`] when an endpoint is not below `n`,
    /// and [`FiniteGraphError::SelfLoop`] when an edge joins a vertex to
    /// itself.
    pub fn try_new(n: usize, edges: &[(usize, usize)]) -> Result<Self, FiniteGraphError> {
        if n == 0 {
            return Err(FiniteGraphError::EmptyVertexSet);
        }
        let mut adj: Vec<Vec<usize>> = (0..n).map(|i| vec![i]).collect();
        for &(a, b) in edges {
            if a == b {
                return Err(FiniteGraphError::SelfLoop { vertex: a });
            }
            for endpoint in [a, b] {
                if endpoint >= n {
                    return Err(FiniteGraphError::OutOfBounds {
                        index: endpoint,
                        vertex_count: n,
                    });
                }
            }
            if !adj[a].contains(&b) {
                adj[a].push(b);
                adj[b].push(a);
            }
        }
        Ok(Self { adj })
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.adj.len()
    }
}

impl Graph for FiniteGraph {
    type Vertex = usize;

    fn size(&self) -> f64 {
        self.adj.len() as f64
    }

    fn random_vertex<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.gen_range(0..self.adj.len())
    }

    fn degree(&self, vertex: usize) -> f64 {
        self.adj[vertex].len() as f64
    }

    fn random_neighbor<R: Rng + ?Sized>(&self, vertex: usize, rng: &mut R) -> usize {
        let hood = &self.adj[vertex];
        hood[rng.gen_range(0..hood.len())]
    }

    fn is_adj(&self, p: usize, q: usize) -> bool {
        self.adj[p].contains(&q)
    }

    fn name(&self) -> &str {
        "finite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use hardcore_core::random_independent_set;
    use hardcore_test_support::{estimate_mean_size, hard_core_mean_size};
    use rand::{SeedableRng, rngs::SmallRng};
    use rstest::rstest;

    #[test]
    fn try_new_rejects_empty_vertex_set() {
        let err = FiniteGraph::try_new(0, &[]).unwrap_err();
        assert!(matches!(err, FiniteGraphError::EmptyVertexSet));
    }

    #[test]
    fn try_new_rejects_out_of_bounds_endpoint() {
        let err = FiniteGraph::try_new(3, &[(0, 3)]).unwrap_err();
        assert!(matches!(
            err,
            FiniteGraphError::OutOfBounds {
                index: 3,
                vertex_count: 3
            }
        ));
    }

    #[test]
    fn try_new_rejects_self_loop() {
        let err = FiniteGraph::try_new(3, &[(1, 1)]).unwrap_err();
        assert!(matches!(err, FiniteGraphError::SelfLoop { vertex: 1 }));
    }

    #[test]
    fn duplicate_edges_are_ignored() {
        let graph = FiniteGraph::try_new(2, &[(0, 1), (1, 0), (0, 1)])
            .expect("duplicate edges must be tolerated");
        assert_eq!(graph.degree(0), 2.0);
        assert_eq!(graph.degree(1), 2.0);
    }

    #[test]
    fn adjacency_is_closed() {
        let graph = FiniteGraph::try_new(3, &[(0, 1)]).expect("valid graph");
        assert!(graph.is_adj(0, 0));
        assert!(graph.is_adj(0, 1));
        assert!(graph.is_adj(1, 0));
        assert!(!graph.is_adj(0, 2));
    }

    #[test]
    fn degree_counts_the_closed_neighborhood() {
        let star = FiniteGraph::try_new(4, &[(0, 1), (0, 2), (0, 3)]).expect("valid graph");
        assert_eq!(star.degree(0), 4.0);
        assert_eq!(star.degree(1), 2.0);
    }

    #[test]
    fn random_neighbor_stays_in_closed_neighborhood() {
        let graph = FiniteGraph::try_new(5, &[(0, 1), (1, 2), (3, 4)]).expect("valid graph");
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..200 {
            let neighbor = graph.random_neighbor(1, &mut rng);
            assert!(graph.is_adj(1, neighbor));
            let vertex = graph.random_vertex(&mut rng);
            assert!(vertex < 5);
        }
    }

    #[test]
    fn sampled_sets_are_independent() {
        let cycle = FiniteGraph::try_new(4, &[(0, 1), (1, 2), (2, 3), (3, 0)])
            .expect("valid graph");
        for seed in 0..200 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let sample =
                random_independent_set(&cycle, 2.0, &mut rng).expect("cycle must sample");
            for (i, &p) in sample.iter().enumerate() {
                for &q in &sample[i + 1..] {
                    assert!(!cycle.is_adj(p, q));
                }
            }
        }
    }

    // Monte Carlo estimates of E[|I|] against closed-form ground truth on
    // all the small benchmark graphs. The brute-force oracle cross-checks
    // the hand-computed constants before any sampling happens.
    #[rstest]
    #[case::empty(&[], 2.0)]
    #[case::one_edge(&[(0, 1)], 5.0 / 3.0)]
    #[case::triangle_plus_isolated(&[(0, 1), (0, 2), (1, 2)], 1.25)]
    #[case::two_disjoint_edges(&[(0, 1), (2, 3)], 4.0 / 3.0)]
    #[case::path(&[(0, 1), (1, 2), (2, 3)], 1.25)]
    #[case::star(&[(0, 1), (0, 2), (0, 3)], 13.0 / 9.0)]
    #[case::cycle(&[(0, 1), (1, 2), (2, 3), (3, 0)], 8.0 / 7.0)]
    #[case::complete(&[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)], 0.80)]
    fn mean_size_matches_ground_truth(
        #[case] edges: &[(usize, usize)],
        #[case] truth: f64,
    ) {
        let oracle = hard_core_mean_size(4, edges, 1.0);
        assert!(
            (oracle - truth).abs() < 1e-9,
            "oracle {oracle} disagrees with closed form {truth}"
        );

        let graph = FiniteGraph::try_new(4, edges).expect("valid graph");
        let mut rng = SmallRng::seed_from_u64(edges.len() as u64);
        let estimate = estimate_mean_size(&graph, 1.0, 1_000_000, &mut rng)
            .expect("estimation must succeed");
        assert!(
            (estimate - truth).abs() < 0.01,
            "estimate {estimate} too far from {truth}"
        );
    }

    #[test]
    fn cycle_mean_size_at_higher_activity() {
        let edges = [(0, 1), (1, 2), (2, 3), (3, 0)];
        let truth = 24.0 / 17.0;
        assert!((hard_core_mean_size(4, &edges, 2.0) - truth).abs() < 1e-9);

        let graph = FiniteGraph::try_new(4, &edges).expect("valid graph");
        let mut rng = SmallRng::seed_from_u64(17);
        let estimate = estimate_mean_size(&graph, 2.0, 10_000, &mut rng)
            .expect("estimation must succeed");
        assert!(
            (estimate - truth).abs() < 0.05,
            "estimate {estimate} too far from {truth}"
        );
    }
}
