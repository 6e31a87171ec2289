//! Builder utilities for configuring the sampler.
//!
//! Validates the target activity before a [`Sampler`] is constructed so runs
//! never start from nonsensical parameters.

use crate::{error::SamplerError, sampler::Sampler};

/// Configures and constructs [`Sampler`] instances.
///
/// # Examples
/// ```
/// use hardcore_core::SamplerBuilder;
///
/// let sampler = SamplerBuilder::new()
///     .with_activity(35.0)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(sampler.activity(), 35.0);
/// ```
#[derive(Debug, Clone)]
pub struct SamplerBuilder {
    activity: f64,
}

impl Default for SamplerBuilder {
    fn default() -> Self {
        Self { activity: 1.0 }
    }
}

impl SamplerBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use hardcore_core::SamplerBuilder;
    ///
    /// let builder = SamplerBuilder::new();
    /// assert_eq!(builder.activity(), 1.0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the target activity `λ`.
    ///
    /// # Examples
    /// ```
    /// use hardcore_core::SamplerBuilder;
    ///
    /// let builder = SamplerBuilder::new().with_activity(2.5);
    /// assert_eq!(builder.activity(), 2.5);
    /// ```
    #[must_use]
    pub fn with_activity(mut self, activity: f64) -> Self {
        self.activity = activity;
        self
    }

    /// Returns the currently configured target activity.
    #[must_use]
    pub fn activity(&self) -> f64 {
        self.activity
    }

    /// Validates the configuration and constructs a [`Sampler`].
    ///
    /// An activity of zero is accepted: the run then terminates on its first
    /// step and returns the empty set.
    ///
    /// # Errors
    /// Returns [`SamplerError::InvalidActivity`] when the activity is
    /// negative, NaN, or infinite.
    ///
    /// # Examples
    /// ```
    /// use hardcore_core::{SamplerBuilder, SamplerError};
    ///
    /// let err = SamplerBuilder::new().with_activity(-1.0).build().unwrap_err();
    /// assert!(matches!(err, SamplerError::InvalidActivity { .. }));
    /// ```
    pub fn build(self) -> Result<Sampler, SamplerError> {
        if !self.activity.is_finite() || self.activity < 0.0 {
            return Err(SamplerError::InvalidActivity { got: self.activity });
        }
        Ok(Sampler::new(self.activity))
    }
}
