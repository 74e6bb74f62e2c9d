use crate::model::note::Note;

/// Errors signalled by the note graph.
///
/// None of these are fatal: callers decide whether to retry, report or abort.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
	#[error("note index {index} is out of range [0, 21]")]
	IndexOutOfRange { index: usize },

	#[error("unknown note name: {name}")]
	UnknownNote { name: String },

	#[error("{from} is already connected to {to}")]
	AlreadyConnected { from: Note, to: Note },

	#[error("no edge from {from} to {to}")]
	NoSuchEdge { from: Note, to: Note },

	#[error("unacceptable rating {rating}, must be in [0, 10]")]
	RatingOutOfRange { rating: i64 },

	#[error("{setting} {value} exceeds the limit of {max}")]
	GeneratorLimitExceeded { setting: &'static str, value: usize, max: usize },

	#[error("all outgoing weights of {from} are non-positive")]
	DegenerateDistribution { from: Note },
}
