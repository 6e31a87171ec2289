//! Graph abstractions for the hardcore sampler.

use core::fmt::Debug;

use rand::Rng;

/// Abstraction over a vertex space with closed-neighbourhood structure.
///
/// Vertices are opaque to the sampler: it only compares them through
/// [`is_adj`](Graph::is_adj) and stores them in ordered collections, so the
/// `Ord` bound exists purely for bookkeeping and carries no geometric
/// meaning.
///
/// Every neighbourhood in this trait is **closed**: a vertex counts as its
/// own neighbour. [`degree`](Graph::degree) is the measure of `N[v]`,
/// [`random_neighbor`](Graph::random_neighbor) samples uniformly from
/// `N[v]`, and [`is_adj`](Graph::is_adj) reports `true` for `p = q`.
/// Uniform sampling over `N[v]` has density `1/degree(v)` with respect to
/// the underlying measure, which is exactly what the sampler's
/// exponential waiting times rely on.
///
/// # Examples
/// ```
/// use hardcore_core::Graph;
/// use rand::Rng;
///
/// /// A single vertex with only itself for company.
/// struct Singleton;
///
/// impl Graph for Singleton {
///     type Vertex = usize;
///     fn size(&self) -> f64 { 1.0 }
///     fn random_vertex<R: Rng + ?Sized>(&self, _: &mut R) -> usize { 0 }
///     fn degree(&self, _: usize) -> f64 { 1.0 }
///     fn random_neighbor<R: Rng + ?Sized>(&self, v: usize, _: &mut R) -> usize { v }
///     fn is_adj(&self, p: usize, q: usize) -> bool { p == q }
/// }
///
/// let graph = Singleton;
/// assert_eq!(graph.size(), 1.0);
/// assert!(graph.is_adj(0, 0));
/// assert_eq!(graph.name(), "graph");
/// ```
pub trait Graph {
    /// Opaque vertex identity.
    type Vertex: Copy + Ord + Debug;

    /// Returns the total measure of the vertex set.
    ///
    /// For a finite graph this is the vertex count as a real; for a
    /// continuous ground space it is the measure of that space.
    fn size(&self) -> f64;

    /// Samples a vertex from the uniform probability measure on the vertex
    /// set.
    fn random_vertex<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Vertex;

    /// Returns the measure of the closed neighbourhood `N[v]`.
    fn degree(&self, vertex: Self::Vertex) -> f64;

    /// Samples a vertex from the uniform probability measure on the closed
    /// neighbourhood `N[v]`.
    fn random_neighbor<R: Rng + ?Sized>(
        &self,
        vertex: Self::Vertex,
        rng: &mut R,
    ) -> Self::Vertex;

    /// Reports closed adjacency: `true` iff `p = q` or `p` neighbours `q`.
    fn is_adj(&self, p: Self::Vertex, q: Self::Vertex) -> bool;

    /// Returns a human-readable name used in diagnostics.
    fn name(&self) -> &str {
        "graph"
    }
}
