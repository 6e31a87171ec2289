//! Hard-disk graph on the unit torus implementing the hardcore [`Graph`]
//! capability.
//!
//! The vertex space is `[0,1)²` with opposite edges identified. Two points
//! are adjacent when their minimum-image distance is below `2r`, so a
//! sampled independent set is a packing of discs of radius `r`.

use core::cmp::Ordering;
use std::f64::consts::PI;

use hardcore_core::Graph;
use rand::Rng;
use thiserror::Error;

/// Largest disc radius accepted by [`HardDiskGraph::try_new`].
///
/// Beyond it the interaction ball of radius `2r` wraps onto itself and
/// `π(2r)²` stops being the closed-neighbourhood measure.
pub const MAX_RADIUS: f64 = 0.25;

/// Errors raised while constructing a [`HardDiskGraph`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum HardDiskGraphError {
    /// Disc radius must be a positive finite real.
    #[error("disc radius must be positive and finite (got {got})")]
    InvalidRadius { got: f64 },
    /// Disc radius must leave the interaction ball embeddable in the torus.
    #[error("disc radius {got} exceeds the maximum {max} supported on the unit torus")]
    RadiusTooLarge { got: f64, max: f64 },
}

/// A point of the unit torus `[0,1)²`.
///
/// The ordering compares the coordinate pair lexicographically via
/// `f64::total_cmp`; it exists so points can live in ordered collections
/// and carries no geometric meaning.
#[derive(Clone, Copy, Debug)]
pub struct Point {
    /// Horizontal coordinate in `[0,1)`.
    pub x: f64,
    /// Vertical coordinate in `[0,1)`.
    pub y: f64,
}

impl Point {
    /// Minimum-image distance to `other`, wrapping around both axes.
    ///
    /// # Examples
    /// ```
    /// use hardcore_graphs_disk::Point;
    ///
    /// let p = Point { x: 0.05, y: 0.5 };
    /// let q = Point { x: 0.95, y: 0.5 };
    /// assert!((p.toroidal_distance(q) - 0.1).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn toroidal_distance(self, other: Self) -> f64 {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        let dx = dx.min(1.0 - dx);
        let dy = dy.min(1.0 - dy);
        dx.hypot(dy)
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Point {}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Hard-disk model on the unit torus, immutable after construction.
///
/// # Examples
/// ```
/// use hardcore_core::Graph;
/// use hardcore_graphs_disk::HardDiskGraph;
///
/// let graph = HardDiskGraph::try_new(0.1)?;
/// assert_eq!(graph.size(), 1.0);
/// assert!((graph.range() - 0.2).abs() < 1e-12);
/// # Ok::<(), hardcore_graphs_disk::HardDiskGraphError>(())
/// ```
#[derive(Debug, Clone)]
pub struct HardDiskGraph {
    range: f64,
}

impl HardDiskGraph {
    /// Builds the graph for discs of the given radius.
    ///
    /// # Errors
    /// Returns [`HardDiskGraphError::InvalidRadius`] when the radius is not
    /// a positive finite real and [`HardDiskGraphError::RadiusTooLarge`]
    /// when it exceeds [`MAX_RADIUS`].
    pub fn try_new(radius: f64) -> Result<Self, HardDiskGraphError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(HardDiskGraphError::InvalidRadius { got: radius });
        }
        if radius > MAX_RADIUS {
            return Err(HardDiskGraphError::RadiusTooLarge {
                got: radius,
                max: MAX_RADIUS,
            });
        }
        Ok(Self { range: radius * 2.0 })
    }

    /// Returns the interaction range `2r`.
    #[must_use]
    pub fn range(&self) -> f64 {
        self.range
    }
}

impl Graph for HardDiskGraph {
    type Vertex = Point;

    fn size(&self) -> f64 {
        1.0
    }

    fn random_vertex<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        Point {
            x: rng.gen_range(0.0..1.0),
            y: rng.gen_range(0.0..1.0),
        }
    }

    fn degree(&self, _vertex: Point) -> f64 {
        PI * self.range * self.range
    }

    // Uniform point of the ball B(p, 2r): radial coordinate sqrt(U) so the
    // area element stays uniform, then wrap each coordinate modulo 1.
    fn random_neighbor<R: Rng + ?Sized>(&self, vertex: Point, rng: &mut R) -> Point {
        let s = rng.gen_range(0.0..1.0_f64).sqrt();
        let theta = rng.gen_range(0.0..1.0_f64) * 2.0 * PI;
        Point {
            x: (vertex.x + self.range * s * theta.cos()).rem_euclid(1.0),
            y: (vertex.y + self.range * s * theta.sin()).rem_euclid(1.0),
        }
    }

    fn is_adj(&self, p: Point, q: Point) -> bool {
        p.toroidal_distance(q) < self.range
    }

    fn name(&self) -> &str {
        "hard-disk"
    }
}
