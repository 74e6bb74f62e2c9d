use note_graph_core::model::graph::INITIAL_WEIGHT;
use note_graph_core::{Generator, GraphError, NOTE_COUNT, Note, NoteGraph, Sequence};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn note() -> impl Strategy<Value = Note> {
	(0..NOTE_COUNT).prop_map(|i| Note::ALL[i])
}

fn sequence() -> impl Strategy<Value = Sequence> {
	prop::collection::vec(note(), 2..=8).prop_map(Sequence::new)
}

fn all_weights(graph: &NoteGraph) -> Vec<[f64; NOTE_COUNT]> {
	Note::ALL.iter().map(|n| graph.outgoing_weights(*n)).collect()
}

/// A graph that has already learned something, so properties are not only
/// checked against the uniform start.
fn trained_graph(seed: u64) -> NoteGraph {
	let mut graph = NoteGraph::new();
	let mut rng = StdRng::seed_from_u64(seed);
	let generator = Generator::default();
	for rating in [9, 2, 7, 10] {
		let seq = generator.generate(&graph, &mut rng);
		graph.rate(&seq, rating).unwrap();
	}
	graph
}

proptest! {
	#[test]
	fn neutral_rating_changes_nothing(seq in sequence(), seed in any::<u64>()) {
		let mut graph = trained_graph(seed);
		let before = all_weights(&graph);
		prop_assert!(graph.rate(&seq, 5).is_ok());
		prop_assert_eq!(all_weights(&graph), before);
	}

	#[test]
	fn out_of_range_rating_is_rejected(seq in sequence(), rating in prop_oneof![i64::MIN..0, 11..i64::MAX]) {
		let mut graph = NoteGraph::new();
		let before = all_weights(&graph);
		prop_assert_eq!(graph.rate(&seq, rating), Err(GraphError::RatingOutOfRange { rating }));
		prop_assert_eq!(all_weights(&graph), before);
	}

	#[test]
	fn row_totals_are_conserved(seq in sequence(), rating in 0..=10i64) {
		let mut graph = NoteGraph::new();
		let before: Vec<f64> = Note::ALL.iter().map(|n| graph.total_weight(*n)).collect();
		graph.rate(&seq, rating).unwrap();
		for note in Note::ALL {
			prop_assert!((graph.total_weight(note) - before[note.index()]).abs() < 1e-9);
		}
	}

	#[test]
	fn single_transition_moves_weights_in_rating_direction(from in note(), to in note(), rating in prop_oneof![0..5i64, 6..=10i64]) {
		let mut graph = NoteGraph::new();
		graph.rate(&Sequence::new(vec![from, to]), rating).unwrap();
		let sign = if rating > 5 { 1.0 } else { -1.0 };
		for target in Note::ALL {
			let delta = graph.weight_of(from, target).unwrap() - INITIAL_WEIGHT;
			if target == to {
				prop_assert!(delta * sign > 0.0);
			} else {
				prop_assert!(delta * sign < 0.0);
			}
		}
	}

	#[test]
	fn untouched_sources_keep_their_rows(seq in sequence(), rating in 0..=10i64) {
		let mut graph = NoteGraph::new();
		graph.rate(&seq, rating).unwrap();
		let sources: Vec<Note> = seq.transitions().map(|(from, _)| from).collect();
		for note in Note::ALL.iter().filter(|n| !sources.contains(*n)) {
			prop_assert_eq!(graph.outgoing_weights(*note), [INITIAL_WEIGHT; NOTE_COUNT]);
		}
	}

	#[test]
	fn generated_sequences_have_eight_notes(seed in any::<u64>()) {
		let graph = trained_graph(seed);
		let seq = Generator::default().generate(&graph, &mut StdRng::seed_from_u64(seed));
		prop_assert_eq!(seq.len(), 8);
	}

	#[test]
	fn generate_then_rate_is_deterministic(seed in any::<u64>(), rating in 0..=10i64) {
		let run = || {
			let mut graph = trained_graph(seed);
			let mut rng = StdRng::seed_from_u64(seed ^ 0x5eed);
			let seq = Generator::default().generate(&graph, &mut rng);
			graph.rate(&seq, rating).unwrap();
			(seq, all_weights(&graph))
		};
		prop_assert_eq!(run(), run());
	}
}

#[test]
fn learning_biases_the_walk_toward_rewarded_transitions() {
	let mut graph = NoteGraph::new();
	let favourite = Sequence::new(vec![Note::C4, Note::E4, Note::G4, Note::C5, Note::G4, Note::E4, Note::C4, Note::E4]);
	for _ in 0..5 {
		graph.rate(&favourite, 10).unwrap();
	}

	let mut rng = StdRng::seed_from_u64(2024);
	let hits = (0..2000)
		.filter(|_| graph.next(Note::C4, &mut rng) == Note::E4)
		.count();
	// Untrained probability is 1/22, about 91 hits out of 2000
	assert!(hits > 400, "only {hits} hits");
}
