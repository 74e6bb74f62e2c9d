//! Reinforcement-weighted note sequence generation library.
//!
//! This crate provides a small learning system over a fixed 22-pitch alphabet:
//! - A complete weighted digraph of note transitions (`NoteGraph`)
//! - Weighted random-walk sampling with burn-in (`Generator`)
//! - Rating-driven reinforcement of realized transitions
//! - Configuration and error types shared by the binaries
//!
//! Randomness is always passed in by the caller, so every generation is
//! reproducible from a seeded RNG.

/// Graph model, sampling, generation and reinforcement.
pub mod model;

/// Generation and reinforcement settings.
pub mod config;

/// Error type returned by every fallible operation of the crate.
pub mod error;

pub use config::{Config, GeneratorConfig, ReinforcementConfig};
pub use error::GraphError;
pub use model::generator::Generator;
pub use model::graph::NoteGraph;
pub use model::note::{NOTE_COUNT, Note};
pub use model::rating::Rating;
pub use model::reinforcement::Reinforcer;
pub use model::sequence::Sequence;
