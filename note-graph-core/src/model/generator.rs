use rand::Rng;

use super::graph::NoteGraph;
use super::note::{NOTE_COUNT, Note};
use super::sequence::Sequence;
use crate::config::GeneratorConfig;
use crate::error::GraphError;

/// Produces note sequences by walking a `NoteGraph`.
///
/// # Behavior
/// - Starts on a uniformly chosen note.
/// - Takes `burn_in` discarded steps so the output does not depend on that
///   arbitrary start.
/// - Emits `sequence_length` notes, recording each note before stepping
///   away from it.
///
/// # Notes
/// The generator owns no randomness. Callers pass the RNG in, so a seeded
/// RNG gives a reproducible sequence for a given graph state.
#[derive(Clone, Copy, Debug, Default)]
pub struct Generator {
	config: GeneratorConfig,
}

impl Generator {
	/// Creates a generator after checking `config` against its limits.
	///
	/// # Errors
	/// Returns `GraphError::GeneratorLimitExceeded` if `burn_in` or
	/// `sequence_length` is above the documented maximum.
	pub fn new(config: GeneratorConfig) -> Result<Self, GraphError> {
		config.validate()?;
		Ok(Self { config })
	}

	pub fn config(&self) -> &GeneratorConfig {
		&self.config
	}

	/// Generates one sequence of `sequence_length` notes.
	///
	/// Never fails: degenerate rows are sampled uniformly.
	pub fn generate<R: Rng>(&self, graph: &NoteGraph, rng: &mut R) -> Sequence {
		let mut current = Note::ALL[rng.random_range(0..NOTE_COUNT)];

		// Eliminate initial behavior
		for _ in 0..self.config.burn_in {
			current = graph.next(current, rng);
		}

		let mut notes = Vec::with_capacity(self.config.sequence_length);
		for _ in 0..self.config.sequence_length {
			notes.push(current);
			current = graph.next(current, rng);
		}

		let sequence = Sequence::new(notes);
		log::debug!("generated {sequence}");
		sequence
	}
}
