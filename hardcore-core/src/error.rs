//! Error types for the hardcore core library.
//!
//! Defines the error enum exposed by the sampler API, its stable codes, and
//! a convenient result alias.

use std::{fmt, sync::Arc};

use thiserror::Error;

/// Stable codes describing [`SamplerError`] variants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum SamplerErrorCode {
    /// Target activity was negative or non-finite.
    InvalidActivity,
    /// The graph reported a non-positive or non-finite total measure.
    InvalidMeasure,
    /// The graph reported a non-positive or non-finite closed-neighbourhood
    /// measure during the run.
    InvalidDegree,
}

impl SamplerErrorCode {
    /// Return the stable machine-readable representation of this error code.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidActivity => "SAMPLER_INVALID_ACTIVITY",
            Self::InvalidMeasure => "SAMPLER_INVALID_MEASURE",
            Self::InvalidDegree => "SAMPLER_INVALID_DEGREE",
        }
    }
}

impl fmt::Display for SamplerErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type produced when configuring or running the sampler.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SamplerError {
    /// Target activity must be a finite, non-negative real.
    #[error("activity must be finite and non-negative (got {got})")]
    InvalidActivity { got: f64 },
    /// The graph's vertex set must carry positive, finite measure.
    #[error("graph `{graph}` reported invalid vertex-set measure {got}")]
    InvalidMeasure { graph: Arc<str>, got: f64 },
    /// Closed-neighbourhood measures must be positive and finite.
    #[error("graph `{graph}` reported invalid closed-neighbourhood measure {got}")]
    InvalidDegree { graph: Arc<str>, got: f64 },
}

impl SamplerError {
    /// Retrieve the stable [`SamplerErrorCode`] for this error.
    pub const fn code(&self) -> SamplerErrorCode {
        match self {
            Self::InvalidActivity { .. } => SamplerErrorCode::InvalidActivity,
            Self::InvalidMeasure { .. } => SamplerErrorCode::InvalidMeasure,
            Self::InvalidDegree { .. } => SamplerErrorCode::InvalidDegree,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, SamplerError>;
