//! Top-level module for the PPM guess-generation system.
//!
//! This module provides the full model-to-output pipeline, including:
//! - Per-order frequency tables built from a corpus (`FrequencyModel`)
//! - Escape-weighted ranked distributions and the frozen `Model`
//! - Order-descending coordinate decoding (`Sampler`)
//! - Deterministic low-discrepancy indexing (`top`)
//! - Sequence generation and unique-output emission (`Generator`)
//! - Run configuration (`GenerationInput`)

/// Per-(order, context) frequency counting.
///
/// Handles line bracketing, count accumulation, model merging and the
/// chunked multi-threaded corpus build.
pub mod frequency;

/// Escape coding and the immutable ranked model.
///
/// Turns raw counts into ranked cumulative distributions with a synthetic
/// escape weight, and supports postcard-cached persistence.
pub mod distribution;

/// Order-descending decoder.
///
/// Maps a context plus a coordinate in [0,1) to one concrete symbol,
/// escaping through shorter contexts down to a raw-byte fallback.
pub mod sampler;

/// Deterministic low-discrepancy index-to-coordinate mapping.
pub mod indexer;

/// Sequence generation and the unique-output emission loop.
pub mod generator;

/// Run configuration structure.
///
/// Stores generation parameters such as the order bound, per-side unique
/// targets, the length cap and the division fraction.
pub mod generation_input;
