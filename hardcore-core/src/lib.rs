//! Hardcore core library.
//!
//! A perfect sampler for the hard-core Gibbs model: given a graph and an
//! activity `λ`, [`random_independent_set`] draws an exact sample from the
//! distribution `P(I) ∝ λ^|I|` over the independent sets `I` of the graph.
//! The sampler is generic over the [`Graph`] capability, so the same
//! algorithm serves finite labelled graphs and continuous hard-disk models
//! alike.

mod builder;
mod error;
mod graph;
mod sampler;

pub use crate::{
    builder::SamplerBuilder,
    error::{Result, SamplerError, SamplerErrorCode},
    graph::Graph,
    sampler::{Sampler, random_independent_set},
};
