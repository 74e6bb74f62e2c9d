use super::graph::NoteGraph;
use super::note::{NOTE_COUNT, Note};
use super::rating::Rating;
use super::sequence::Sequence;
use crate::config::ReinforcementConfig;
use crate::error::GraphError;

/// Applies ratings to a graph.
///
/// For every transition `a -> b` of a rated sequence, the edge `a -> b`
/// receives `(rating - 5) / 50` and each of the 21 sibling edges of `a`
/// receives the opposite amount divided by 21, so the row total of `a` is
/// conserved up to rounding.
///
/// Weights are not clamped. Repeated extreme ratings can push a weight below
/// zero; sampling then treats it as zero mass.
#[derive(Clone, Copy, Debug, Default)]
pub struct Reinforcer {
	config: ReinforcementConfig,
}

impl Reinforcer {
	pub fn new(config: ReinforcementConfig) -> Self {
		Self { config }
	}

	/// Validates `rating` and applies it to `sequence`.
	///
	/// # Errors
	/// - `GraphError::RatingOutOfRange` if `rating` is outside `[0, 10]`.
	/// - `GraphError::NoSuchEdge` if a source row of the sequence is
	///   incomplete (only possible on a hand-built graph).
	///
	/// The graph is left untouched on error.
	pub fn rate(&self, graph: &mut NoteGraph, sequence: &Sequence, rating: i64) -> Result<(), GraphError> {
		let rating = Rating::new(rating).inspect_err(|e| log::warn!("{e}"))?;
		self.apply(graph, sequence, rating)
	}

	/// Applies an already validated rating.
	pub fn apply(&self, graph: &mut NoteGraph, sequence: &Sequence, rating: Rating) -> Result<(), GraphError> {
		if rating.is_neutral() {
			log::debug!("neutral rating, {sequence} left as is");
			return Ok(());
		}

		for (from, _) in sequence.transitions() {
			let node = graph.node(from);
			if let Some(to) = Note::ALL.into_iter().find(|to| !node.is_connected(*to)) {
				return Err(GraphError::NoSuchEdge { from, to });
			}
		}

		let modification = rating.modification();
		for (from, to) in sequence.transitions() {
			self.reinforce(graph, from, to, modification)?;
		}
		log::debug!("rated {sequence} {rating} (modification {modification:+.3})");
		Ok(())
	}

	/// Shifts `by` onto `from -> to` and `-by / 21` onto every other edge of `from`.
	fn reinforce(&self, graph: &mut NoteGraph, from: Note, to: Note, by: f64) -> Result<(), GraphError> {
		let distribute_to_rest = -by / (NOTE_COUNT - 1) as f64;
		let node = graph.node_mut(from);

		for target in Note::ALL {
			let delta = if target == to { by } else { distribute_to_rest };
			node.add_to_weight(target, delta)?;
		}

		if self.config.renormalize {
			node.renormalize();
			log::trace!("renormalized {from}, total {:.6}", node.total_weight());
		}
		Ok(())
	}
}

impl NoteGraph {
	/// Rates `sequence` with the default (non-renormalizing) update.
	///
	/// See [`Reinforcer::rate`].
	pub fn rate(&mut self, sequence: &Sequence, rating: i64) -> Result<(), GraphError> {
		Reinforcer::default().rate(self, sequence, rating)
	}
}
