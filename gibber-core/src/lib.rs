//! PPM-style guess-string generation library.
//!
//! This crate provides a deterministic generator of short strings that are
//! statistically similar to a training corpus, including:
//! - Variable-order frequency model construction (parallelized)
//! - Escape-weighted cumulative distributions (PPM "Method C")
//! - Coordinate-driven decoding with raw-byte fallback
//! - Low-discrepancy enumeration of unique generated strings
//! - Corpus preparation (per-side line truncation) and model caching
//!
//! Generation is reproducible and enumerable by construction: there is no
//! randomness source anywhere in the pipeline. Two runs over the same corpus
//! with the same settings produce the same output stream.

/// Core model construction and generation logic.
///
/// This module exposes the frequency builder, the frozen ranked model,
/// the order-descending decoder and the unique-output generation loop.
pub mod model;

/// Corpus preparation: trimming, deduplication and per-side truncation.
///
/// This is the boundary between raw training lines and the strings the
/// model is actually built from.
pub mod corpus;

/// Typed errors surfaced by a generation run.
pub mod error;

/// I/O utilities (file loading, path helpers).
///
/// Not exposed
pub(crate) mod io;
