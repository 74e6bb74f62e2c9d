use rand::Rng;
use serde::{Deserialize, Serialize};

use super::node::Node;
use super::note::{NOTE_COUNT, Note};
use crate::error::GraphError;

/// Weight given to every edge of a fresh graph.
pub const INITIAL_WEIGHT: f64 = 1.0 / NOTE_COUNT as f64;

/// Complete weighted digraph over the note alphabet.
///
/// Each of the 22 nodes owns one edge toward every note, itself included.
/// The topology is fixed once built; only weights change afterwards,
/// through the reinforcement step.
///
/// # Invariants
/// - `nodes[i].note() == Note::ALL[i]`
/// - Nodes and edges are never removed
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NoteGraph {
	nodes: Vec<Node>,
}

impl Default for NoteGraph {
	fn default() -> Self {
		Self::new()
	}
}

impl NoteGraph {
	/// Builds the complete graph with uniform weights `1/22`.
	pub fn new() -> Self {
		Self { nodes: Note::ALL.iter().map(|note| Node::complete(*note, INITIAL_WEIGHT)).collect() }
	}

	/// Builds a graph with all nodes but no edges.
	///
	/// Edges have to be added with [`NoteGraph::connect`] before sampling
	/// or rating gives meaningful results.
	pub fn unconnected() -> Self {
		Self { nodes: Note::ALL.iter().map(|note| Node::new(*note)).collect() }
	}

	/// Node of `note`.
	pub fn node(&self, note: Note) -> &Node {
		&self.nodes[note.index()]
	}

	pub(crate) fn node_mut(&mut self, note: Note) -> &mut Node {
		&mut self.nodes[note.index()]
	}

	/// Iterates over the nodes in ordinal order.
	pub fn nodes(&self) -> impl Iterator<Item = &Node> {
		self.nodes.iter()
	}

	/// Creates the edge `from -> to`.
	///
	/// # Errors
	/// Returns `GraphError::AlreadyConnected` if the edge exists; the graph is
	/// left unchanged.
	pub fn connect(&mut self, from: Note, to: Note, weight: f64) -> Result<(), GraphError> {
		self.node_mut(from).connect(to, weight)
	}

	/// Overwrites the weight of `from -> to`.
	pub fn set_weight(&mut self, from: Note, to: Note, weight: f64) -> Result<(), GraphError> {
		self.node_mut(from).set_weight(to, weight)
	}

	/// Adds `delta` to the weight of `from -> to`.
	pub fn add_to_weight(&mut self, from: Note, to: Note, delta: f64) -> Result<(), GraphError> {
		self.node_mut(from).add_to_weight(to, delta)
	}

	/// Weight of `from -> to`.
	pub fn weight_of(&self, from: Note, to: Note) -> Result<f64, GraphError> {
		self.node(from).weight_of(to)
	}

	/// Snapshot of the outgoing weights of `from`, indexed by target ordinal.
	pub fn outgoing_weights(&self, from: Note) -> [f64; NOTE_COUNT] {
		self.node(from).weights()
	}

	/// Sum of the outgoing weights of `from`.
	pub fn total_weight(&self, from: Note) -> f64 {
		self.node(from).total_weight()
	}

	/// The `n` heaviest successors of `from`, heaviest first.
	///
	/// Ties keep ordinal order.
	pub fn strongest_successors(&self, from: Note, n: usize) -> Vec<(Note, f64)> {
		let mut successors: Vec<(Note, f64)> = self
			.node(from)
			.edges()
			.map(|edge| (edge.target(), edge.weight()))
			.collect();
		successors.sort_by(|a, b| b.1.total_cmp(&a.1));
		successors.truncate(n);
		successors
	}

	/// Takes one step of the random walk from `from`.
	///
	/// Degenerate rows fall back to a uniform pick, see [`Node::next_note`].
	pub fn next<R: Rng>(&self, from: Note, rng: &mut R) -> Note {
		self.node(from).next_note(rng.random::<f64>())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn fresh_graph_is_complete_and_uniform() {
		let graph = NoteGraph::new();
		for from in Note::ALL {
			for to in Note::ALL {
				assert_eq!(graph.weight_of(from, to).unwrap(), INITIAL_WEIGHT);
			}
			assert!((graph.total_weight(from) - 1.0).abs() < 1e-12);
		}
	}

	#[test]
	fn connect_on_complete_graph_is_rejected() {
		let mut graph = NoteGraph::new();
		assert_eq!(
			graph.connect(Note::C3, Note::C3, 0.9),
			Err(GraphError::AlreadyConnected { from: Note::C3, to: Note::C3 })
		);
		assert_eq!(graph.weight_of(Note::C3, Note::C3).unwrap(), INITIAL_WEIGHT);
	}

	#[test]
	fn unconnected_graph_reports_missing_edges() {
		let mut graph = NoteGraph::unconnected();
		assert_eq!(
			graph.add_to_weight(Note::E2, Note::F2, 0.1),
			Err(GraphError::NoSuchEdge { from: Note::E2, to: Note::F2 })
		);
		graph.connect(Note::E2, Note::F2, 0.4).unwrap();
		graph.set_weight(Note::E2, Note::F2, 0.6).unwrap();
		assert_eq!(graph.weight_of(Note::E2, Note::F2).unwrap(), 0.6);
	}

	#[test]
	fn strongest_successors_are_sorted() {
		let mut graph = NoteGraph::new();
		graph.set_weight(Note::D4, Note::A2, 0.5).unwrap();
		graph.set_weight(Note::D4, Note::E5, 0.3).unwrap();
		let top = graph.strongest_successors(Note::D4, 3);
		assert_eq!(top[0], (Note::A2, 0.5));
		assert_eq!(top[1], (Note::E5, 0.3));
		assert_eq!(top[2], (Note::E2, INITIAL_WEIGHT));
	}

	#[test]
	fn walk_follows_a_forced_edge() {
		let mut graph = NoteGraph::new();
		for to in Note::ALL {
			graph.set_weight(Note::G4, to, 0.0).unwrap();
		}
		graph.set_weight(Note::G4, Note::C5, 1.0).unwrap();
		let mut rng = StdRng::seed_from_u64(7);
		for _ in 0..20 {
			assert_eq!(graph.next(Note::G4, &mut rng), Note::C5);
		}
	}
}
