//! Shared test tooling for the hardcore workspace.
//!
//! Provides the exact brute-force oracle for the hard-core mean
//! independent-set size, the Monte Carlo estimator the distributional tests
//! compare against it, and an idempotent tracing initialiser for tests.

use std::sync::OnceLock;

use hardcore_core::{Graph, SamplerBuilder, SamplerError};
use rand::Rng;

/// Vertex-count ceiling for the brute-force oracle.
pub const MAX_ORACLE_VERTICES: usize = 25;

/// Exact `E[|I|]` of the hard-core model by enumerating every subset.
///
/// Sums `|I|·λ^|I|` and `λ^|I|` over the independent sets `I` of the graph
/// on `n` vertices with the given undirected edges and returns their ratio.
///
/// # Panics
/// Panics when `n` is zero or above [`MAX_ORACLE_VERTICES`], or when an
/// edge endpoint is out of bounds. This is test tooling; misuse is a bug in
/// the test.
///
/// # Examples
/// ```
/// use hardcore_test_support::hard_core_mean_size;
///
/// // Empty graph on 4 vertices: every vertex is present with odds λ:1.
/// assert!((hard_core_mean_size(4, &[], 1.0) - 2.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn hard_core_mean_size(n: usize, edges: &[(usize, usize)], activity: f64) -> f64 {
    assert!(n > 0 && n <= MAX_ORACLE_VERTICES, "oracle limited to 1..={MAX_ORACLE_VERTICES} vertices");
    let mut neighbors = vec![0u32; n];
    for &(a, b) in edges {
        assert!(a < n && b < n, "edge ({a}, {b}) out of bounds");
        neighbors[a] |= 1 << b;
        neighbors[b] |= 1 << a;
    }

    let mut weight_total = 0.0;
    let mut size_total = 0.0;
    for mask in 0u32..(1 << n) {
        let independent = (0..n)
            .filter(|&i| mask & (1 << i) != 0)
            .all(|i| neighbors[i] & mask == 0);
        if !independent {
            continue;
        }
        let size = mask.count_ones();
        let weight = activity.powi(size as i32);
        weight_total += weight;
        size_total += f64::from(size) * weight;
    }
    size_total / weight_total
}

/// Monte Carlo estimate of the mean independent-set size over `trials`
/// independent perfect samples.
///
/// # Errors
/// Propagates [`SamplerError`] from building or running the sampler.
///
/// # Examples
/// ```
/// use hardcore_core::Graph;
/// use hardcore_test_support::estimate_mean_size;
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// struct Singleton;
///
/// impl Graph for Singleton {
///     type Vertex = usize;
///     fn size(&self) -> f64 { 1.0 }
///     fn random_vertex<R: rand::Rng + ?Sized>(&self, _: &mut R) -> usize { 0 }
///     fn degree(&self, _: usize) -> f64 { 1.0 }
///     fn random_neighbor<R: rand::Rng + ?Sized>(&self, v: usize, _: &mut R) -> usize { v }
///     fn is_adj(&self, p: usize, q: usize) -> bool { p == q }
/// }
///
/// let mut rng = SmallRng::seed_from_u64(1);
/// let estimate = estimate_mean_size(&Singleton, 1.0, 10_000, &mut rng)?;
/// assert!((estimate - 0.5).abs() < 0.05);
/// # Ok::<(), hardcore_core::SamplerError>(())
/// ```
pub fn estimate_mean_size<G: Graph, R: Rng + ?Sized>(
    graph: &G,
    activity: f64,
    trials: u32,
    rng: &mut R,
) -> Result<f64, SamplerError> {
    let sampler = SamplerBuilder::new().with_activity(activity).build()?;
    let mut total = 0usize;
    for _ in 0..trials {
        total += sampler.run(graph, rng)?.len();
    }
    Ok(total as f64 / f64::from(trials))
}

static LOGGING: OnceLock<()> = OnceLock::new();

/// Installs a test-friendly tracing subscriber once per process.
///
/// Safe to call from every test; later calls are no-ops, as is running
/// under a harness that already installed a subscriber.
pub fn init_test_logging() {
    LOGGING.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::{SeedableRng, rngs::SmallRng};
    use rstest::rstest;

    #[rstest]
    #[case::triangle_plus_isolated(&[(0, 1), (0, 2), (1, 2)], 1.0, 1.25)]
    #[case::complete(&[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)], 1.0, 0.8)]
    #[case::cycle_at_two(&[(0, 1), (1, 2), (2, 3), (3, 0)], 2.0, 24.0 / 17.0)]
    fn oracle_matches_closed_forms(
        #[case] edges: &[(usize, usize)],
        #[case] activity: f64,
        #[case] truth: f64,
    ) {
        let oracle = hard_core_mean_size(4, edges, activity);
        assert!((oracle - truth).abs() < 1e-12, "oracle {oracle} vs {truth}");
    }

    #[test]
    fn oracle_handles_single_vertex() {
        // One vertex at activity λ: E = λ / (1 + λ).
        assert!((hard_core_mean_size(1, &[], 3.0) - 0.75).abs() < 1e-12);
    }

    struct Singleton;

    impl Graph for Singleton {
        type Vertex = usize;

        fn size(&self) -> f64 {
            1.0
        }

        fn random_vertex<R: Rng + ?Sized>(&self, _: &mut R) -> usize {
            0
        }

        fn degree(&self, _: usize) -> f64 {
            1.0
        }

        fn random_neighbor<R: Rng + ?Sized>(&self, vertex: usize, _: &mut R) -> usize {
            vertex
        }

        fn is_adj(&self, p: usize, q: usize) -> bool {
            p == q
        }
    }

    #[test]
    fn estimator_tracks_the_oracle() {
        init_test_logging();
        let truth = hard_core_mean_size(1, &[], 1.0);
        let mut rng = SmallRng::seed_from_u64(4);
        let estimate = estimate_mean_size(&Singleton, 1.0, 50_000, &mut rng)
            .expect("estimation must succeed");
        assert!((estimate - truth).abs() < 0.01, "estimate {estimate} vs {truth}");
    }

    #[test]
    fn estimator_propagates_builder_errors() {
        let mut rng = SmallRng::seed_from_u64(0);
        let err = estimate_mean_size(&Singleton, -1.0, 10, &mut rng).unwrap_err();
        assert!(matches!(err, SamplerError::InvalidActivity { .. }));
    }
}
