use serde::{Deserialize, Serialize};

use super::note::{NOTE_COUNT, Note};
use super::sampler;
use crate::error::GraphError;

/// A weighted, directed transition toward one target note.
///
/// The weight is a probability mass in spirit but is stored unconstrained:
/// updates may push it below 0 or above 1.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Edge {
	target: Note,
	weight: f64,
}

impl Edge {
	/// Target note of the transition.
	pub fn target(&self) -> Note {
		self.target
	}

	/// Current (unnormalized) weight.
	pub fn weight(&self) -> f64 {
		self.weight
	}
}

/// Represents one note of the graph and its outgoing transitions.
///
/// Conceptually, this is a row of a Markov transition matrix. Edges are
/// stored densely, indexed by the target's ordinal, self-loop included.
///
/// ## Responsibilities:
/// - Own the outgoing edges of its note
/// - Mutate edge weights on request
/// - Pick the next note by weighted sampling
///
/// ## Invariants
/// - `edges[i]`, when present, targets `Note::ALL[i]`
/// - An edge, once connected, is never removed
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Node {
	note: Note,
	edges: [Option<Edge>; NOTE_COUNT],
}

impl Node {
	/// Creates a node with no outgoing edges.
	pub fn new(note: Note) -> Self {
		Self { note, edges: [None; NOTE_COUNT] }
	}

	/// Creates a node with one edge toward every note, itself included,
	/// all carrying `weight`.
	pub(crate) fn complete(note: Note, weight: f64) -> Self {
		let mut edges = [None; NOTE_COUNT];
		for (slot, target) in edges.iter_mut().zip(Note::ALL) {
			*slot = Some(Edge { target, weight });
		}
		Self { note, edges }
	}

	/// Note represented by this node.
	pub fn note(&self) -> Note {
		self.note
	}

	/// Returns `true` if an edge toward `to` exists.
	pub fn is_connected(&self, to: Note) -> bool {
		self.edges[to.index()].is_some()
	}

	/// Creates the edge toward `to`.
	///
	/// # Errors
	/// Returns `GraphError::AlreadyConnected` and leaves the node untouched if
	/// the edge already exists.
	pub fn connect(&mut self, to: Note, weight: f64) -> Result<(), GraphError> {
		let slot = &mut self.edges[to.index()];
		if slot.is_some() {
			return Err(GraphError::AlreadyConnected { from: self.note, to });
		}
		*slot = Some(Edge { target: to, weight });
		Ok(())
	}

	fn edge_mut(&mut self, to: Note) -> Result<&mut Edge, GraphError> {
		let from = self.note;
		self.edges[to.index()]
			.as_mut()
			.ok_or(GraphError::NoSuchEdge { from, to })
	}

	/// Overwrites the weight of the edge toward `to`.
	pub fn set_weight(&mut self, to: Note, weight: f64) -> Result<(), GraphError> {
		self.edge_mut(to)?.weight = weight;
		Ok(())
	}

	/// Adds `delta` to the weight of the edge toward `to`.
	pub fn add_to_weight(&mut self, to: Note, delta: f64) -> Result<(), GraphError> {
		self.edge_mut(to)?.weight += delta;
		Ok(())
	}

	/// Weight of the edge toward `to`.
	pub fn weight_of(&self, to: Note) -> Result<f64, GraphError> {
		self.edges[to.index()]
			.map(|edge| edge.weight)
			.ok_or(GraphError::NoSuchEdge { from: self.note, to })
	}

	/// Iterates over existing edges in target ordinal order.
	pub fn edges(&self) -> impl Iterator<Item = &Edge> {
		self.edges.iter().flatten()
	}

	/// Point-in-time copy of the row; missing edges read as 0.
	pub fn weights(&self) -> [f64; NOTE_COUNT] {
		let mut weights = [0.0; NOTE_COUNT];
		for edge in self.edges() {
			weights[edge.target.index()] = edge.weight;
		}
		weights
	}

	/// Sum of all outgoing weights, negative ones included.
	pub fn total_weight(&self) -> f64 {
		self.edges().map(|edge| edge.weight).sum()
	}

	/// Divides every outgoing weight by the row total.
	///
	/// Does nothing if the total is not strictly positive.
	pub fn renormalize(&mut self) {
		let total = self.total_weight();
		if !(total > 0.0) || !total.is_finite() {
			return;
		}
		for edge in self.edges.iter_mut().flatten() {
			edge.weight /= total;
		}
	}

	/// Picks the next note for a uniform draw `u` in `[0, 1)`.
	///
	/// # Errors
	/// Returns `GraphError::DegenerateDistribution` if no outgoing weight is
	/// positive.
	pub fn sample(&self, u: f64) -> Result<Note, GraphError> {
		sampler::select(&self.weights(), u)
			.map(|i| Note::ALL[i])
			.ok_or(GraphError::DegenerateDistribution { from: self.note })
	}

	/// Like [`Node::sample`], but falls back to a uniform pick over the
	/// whole alphabet when the row is degenerate.
	pub fn next_note(&self, u: f64) -> Note {
		match self.sample(u) {
			Ok(note) => note,
			Err(e) => {
				log::warn!("{e}, falling back to uniform selection");
				Note::ALL[sampler::select_uniform(u)]
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn full_node(note: Note, weight: f64) -> Node {
		let mut node = Node::new(note);
		for to in Note::ALL {
			node.connect(to, weight).unwrap();
		}
		node
	}

	#[test]
	fn complete_node_has_every_edge() {
		let node = Node::complete(Note::B4, 0.5);
		for (i, edge) in node.edges().enumerate() {
			assert_eq!(edge.target(), Note::ALL[i]);
			assert_eq!(edge.weight(), 0.5);
		}
		assert_eq!(node.edges().count(), NOTE_COUNT);
		assert_eq!(
			Node::complete(Note::B4, 0.5).connect(Note::B4, 0.1),
			Err(GraphError::AlreadyConnected { from: Note::B4, to: Note::B4 })
		);
	}

	#[test]
	fn connect_twice_fails_without_mutation() {
		let mut node = Node::new(Note::C4);
		node.connect(Note::D4, 0.3).unwrap();
		assert_eq!(
			node.connect(Note::D4, 0.9),
			Err(GraphError::AlreadyConnected { from: Note::C4, to: Note::D4 })
		);
		assert_eq!(node.weight_of(Note::D4).unwrap(), 0.3);
	}

	#[test]
	fn missing_edge_is_reported() {
		let mut node = Node::new(Note::C4);
		let expected = GraphError::NoSuchEdge { from: Note::C4, to: Note::E4 };
		assert_eq!(node.weight_of(Note::E4), Err(expected.clone()));
		assert_eq!(node.set_weight(Note::E4, 1.0), Err(expected.clone()));
		assert_eq!(node.add_to_weight(Note::E4, 1.0), Err(expected));
	}

	#[test]
	fn set_and_add_weight() {
		let mut node = full_node(Note::A3, 0.0);
		node.set_weight(Note::B3, 0.5).unwrap();
		node.add_to_weight(Note::B3, 0.25).unwrap();
		node.add_to_weight(Note::A3, -0.1).unwrap();
		assert_eq!(node.weight_of(Note::B3).unwrap(), 0.75);
		assert_eq!(node.weight_of(Note::A3).unwrap(), -0.1);
	}

	#[test]
	fn renormalize_scales_row_to_one() {
		let mut node = full_node(Note::G2, 0.5);
		node.renormalize();
		assert!((node.total_weight() - 1.0).abs() < 1e-12);
	}

	#[test]
	fn sample_follows_the_only_positive_edge() {
		let mut node = full_node(Note::E2, 0.0);
		node.set_weight(Note::F3, 0.2).unwrap();
		assert_eq!(node.sample(0.0).unwrap(), Note::F3);
		assert_eq!(node.sample(0.9).unwrap(), Note::F3);
	}

	#[test]
	fn degenerate_row_falls_back_to_uniform() {
		let node = full_node(Note::E2, -0.01);
		assert_eq!(
			node.sample(0.5),
			Err(GraphError::DegenerateDistribution { from: Note::E2 })
		);
		assert_eq!(node.next_note(0.0), Note::E2);
		assert_eq!(node.next_note(0.99), Note::E5);
	}
}
