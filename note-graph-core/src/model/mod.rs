//! Top-level module for the note graph learning system.
//!
//! This module provides:
//! - The fixed note alphabet (`Note`)
//! - Per-note transition rows (`Node`, `Edge`)
//! - The complete weighted digraph (`NoteGraph`)
//! - Random-walk sequence generation (`Generator`)
//! - Rating-driven weight updates (`Reinforcer`, `Rating`)

/// The 22-pitch alphabet and its ordinal table.
pub mod note;

/// One note's outgoing edges and weighted next-note selection.
pub mod node;

/// Prefix-sum selection over a row of weights.
///
/// Internal helper of `Node`.
mod sampler;

/// Complete weighted digraph over the alphabet.
pub mod graph;

/// Ordered runs of notes handed to and from the caller.
pub mod sequence;

/// High-level interface producing sequences with burn-in.
pub mod generator;

/// Validated user ratings.
pub mod rating;

/// Rating-driven reinforcement of realized transitions.
pub mod reinforcement;
