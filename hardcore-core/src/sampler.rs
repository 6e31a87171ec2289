//! The randomness-recycler perfect sampler.
//!
//! Candidate points arrive along a Poisson process indexed by a real label.
//! A candidate survives only if no retained neighbour carries a smaller
//! label; when a later arrival pre-empts an earlier acceptance, the region
//! around both vertices is locally re-randomised ("dented") instead of
//! restarting the whole construction. Whenever the dent queue is empty the
//! retained set is exactly hard-core distributed at the current label, so
//! reaching the target activity with no pending dents yields a perfect
//! sample.

use std::{collections::BTreeSet, sync::Arc};

use ordered_float::OrderedFloat;
use rand::Rng;
use rand_distr::{Distribution, Exp};
use tracing::{info, instrument};

use crate::{
    builder::SamplerBuilder,
    error::{Result, SamplerError},
    graph::Graph,
};

/// Draws an exact hard-core sample from `graph` at the given activity.
///
/// Convenience wrapper over [`SamplerBuilder`] and [`Sampler::run`].
///
/// # Errors
/// Returns [`SamplerError::InvalidActivity`] for a negative or non-finite
/// activity and propagates the run-time errors of [`Sampler::run`].
///
/// # Examples
/// ```
/// use hardcore_core::{Graph, random_independent_set};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// /// Two mutually adjacent vertices; at most one can be retained.
/// struct Pair;
///
/// impl Graph for Pair {
///     type Vertex = usize;
///     fn size(&self) -> f64 { 2.0 }
///     fn random_vertex<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> usize {
///         rng.gen_range(0..2)
///     }
///     fn degree(&self, _: usize) -> f64 { 2.0 }
///     fn random_neighbor<R: rand::Rng + ?Sized>(&self, _: usize, rng: &mut R) -> usize {
///         rng.gen_range(0..2)
///     }
///     fn is_adj(&self, _: usize, _: usize) -> bool { true }
/// }
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let sample = random_independent_set(&Pair, 1.5, &mut rng)?;
/// assert!(sample.len() <= 1);
/// # Ok::<(), hardcore_core::SamplerError>(())
/// ```
pub fn random_independent_set<G: Graph, R: Rng + ?Sized>(
    graph: &G,
    activity: f64,
    rng: &mut R,
) -> Result<Vec<G::Vertex>> {
    SamplerBuilder::new()
        .with_activity(activity)
        .build()?
        .run(graph, rng)
}

/// Runs the perfect-sampling algorithm against a [`Graph`].
///
/// Construct through [`SamplerBuilder`]; the instance is immutable and may
/// be reused across runs and graphs.
///
/// Termination is almost sure below the uniqueness threshold of the
/// hard-core model on the target graph; above it the run may simply never
/// return. That regime is not detected here, so callers wanting a bound
/// must impose an external timeout.
#[derive(Debug, Clone)]
pub struct Sampler {
    activity: f64,
}

impl Sampler {
    pub(crate) fn new(activity: f64) -> Self {
        Self { activity }
    }

    /// Returns the target activity `λ` this sampler runs to.
    #[must_use]
    pub fn activity(&self) -> f64 {
        self.activity
    }

    /// Draws one exact sample and returns the retained vertices.
    ///
    /// The caller supplies the randomness source; independent runs need
    /// independent sources, and a fixed seed fixes the draw.
    ///
    /// # Errors
    /// Returns [`SamplerError::InvalidMeasure`] when `graph.size()` is not a
    /// positive finite real, and [`SamplerError::InvalidDegree`] when a
    /// closed-neighbourhood measure surfaced mid-run is not.
    ///
    /// # Examples
    /// ```
    /// use hardcore_core::{Graph, SamplerBuilder};
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
    /// let sampler = SamplerBuilder::new().with_activity(0.0).build()?;
    /// let mut rng = SmallRng::seed_from_u64(1);
    /// assert!(sampler.run(&Singleton, &mut rng)?.is_empty());
    /// # Ok::<(), hardcore_core::SamplerError>(())
    /// ```
    #[instrument(
        name = "sampler.run",
        err,
        skip(self, graph, rng),
        fields(graph = %graph.name(), activity = self.activity),
    )]
    pub fn run<G: Graph, R: Rng + ?Sized>(
        &self,
        graph: &G,
        rng: &mut R,
    ) -> Result<Vec<G::Vertex>> {
        let graph_name: Arc<str> = Arc::from(graph.name());
        let measure = graph.size();
        if !measure.is_finite() || measure <= 0.0 {
            return Err(SamplerError::InvalidMeasure {
                graph: graph_name,
                got: measure,
            });
        }
        let arrival = Exp::new(measure).map_err(|_| SamplerError::InvalidMeasure {
            graph: Arc::clone(&graph_name),
            got: measure,
        })?;

        let recycler = Recycler {
            graph,
            graph_name,
            rng,
            arrival,
            target: self.activity,
            frontier: 0.0,
            retained: BTreeSet::new(),
            dents: Vec::new(),
            arrivals: 0,
            recycles: 0,
            suppressed: 0,
        };
        recycler.run()
    }
}

/// Run state: the retained set `S`, the dent stack `D`, and the label
/// frontier realised so far.
struct Recycler<'a, G: Graph, R: Rng + ?Sized> {
    graph: &'a G,
    graph_name: Arc<str>,
    rng: &'a mut R,
    arrival: Exp<f64>,
    target: f64,
    frontier: f64,
    retained: BTreeSet<(OrderedFloat<f64>, G::Vertex)>,
    dents: Vec<(f64, G::Vertex)>,
    arrivals: u64,
    recycles: u64,
    suppressed: u64,
}

impl<G: Graph, R: Rng + ?Sized> Recycler<'_, G, R> {
    fn run(mut self) -> Result<Vec<G::Vertex>> {
        loop {
            self.drain_dents()?;
            self.frontier += self.arrival.sample(self.rng);
            if self.frontier > self.target {
                break;
            }
            self.arrivals += 1;
            let vertex = self.graph.random_vertex(self.rng);
            self.try_add(vertex, self.frontier);
        }
        info!(
            points = self.retained.len(),
            arrivals = self.arrivals,
            recycles = self.recycles,
            suppressed = self.suppressed,
            "sampling completed"
        );
        Ok(self.retained.into_iter().map(|(_, vertex)| vertex).collect())
    }

    /// Lifts every dent back up to the frontier, resampling the affected
    /// neighbourhoods along the way.
    fn drain_dents(&mut self) -> Result<()> {
        while let Some((label, vertex)) = self.dents.pop() {
            let lifted = label + self.neighborhood_wait(vertex)?;
            if lifted > self.frontier {
                continue;
            }
            self.dents.push((lifted, vertex));
            let candidate = self.graph.random_neighbor(vertex, self.rng);
            if self.is_suppressed(candidate, lifted) {
                self.suppressed += 1;
                continue;
            }
            self.try_add(candidate, lifted);
        }
        Ok(())
    }

    /// Waiting time to the next arrival inside `N[vertex]`, at rate equal to
    /// the closed-neighbourhood measure.
    fn neighborhood_wait(&mut self, vertex: G::Vertex) -> Result<f64> {
        let rate = self.graph.degree(vertex);
        if !rate.is_finite() || rate <= 0.0 {
            return Err(SamplerError::InvalidDegree {
                graph: Arc::clone(&self.graph_name),
                got: rate,
            });
        }
        let wait = Exp::new(rate).map_err(|_| SamplerError::InvalidDegree {
            graph: Arc::clone(&self.graph_name),
            got: rate,
        })?;
        Ok(wait.sample(self.rng))
    }

    /// A candidate landing where some other dent has pulled the activity
    /// below its label must not be inserted: locally, that label does not
    /// exist yet.
    fn is_suppressed(&self, candidate: G::Vertex, label: f64) -> bool {
        self.dents
            .iter()
            .any(|&(dent_label, dent_vertex)| {
                self.graph.is_adj(candidate, dent_vertex) && label > dent_label
            })
    }

    /// Inserts `(label, vertex)` unless a retained neighbour conflicts.
    ///
    /// On conflict the highest-labelled neighbour is evicted: its own
    /// neighbourhood is dented back to zero, and the neighbourhood of the
    /// rejected arrival is dented down to the evictee's label.
    fn try_add(&mut self, vertex: G::Vertex, label: f64) {
        let conflict = self
            .retained
            .iter()
            .rev()
            .find(|(_, retained)| self.graph.is_adj(vertex, *retained))
            .copied();
        match conflict {
            Some((evicted_label, evicted)) => {
                self.retained.remove(&(evicted_label, evicted));
                self.dents.push((0.0, evicted));
                self.dents.push((evicted_label.into_inner(), vertex));
                self.recycles += 1;
            }
            None => {
                self.retained.insert((OrderedFloat(label), vertex));
            }
        }
    }
}
