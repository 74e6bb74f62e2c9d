use std::fmt;

use serde::{Deserialize, Serialize};

use super::note::Note;

/// An ordered run of notes produced by one generation call.
///
/// Sequences are plain values: the caller owns them and hands one back
/// when rating it.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct Sequence {
	notes: Vec<Note>,
}

impl Sequence {
	pub fn new(notes: Vec<Note>) -> Self {
		Self { notes }
	}

	pub fn notes(&self) -> &[Note] {
		&self.notes
	}

	pub fn len(&self) -> usize {
		self.notes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.notes.is_empty()
	}

	/// Consecutive `(from, to)` pairs. The last note is never a source.
	pub fn transitions(&self) -> impl Iterator<Item = (Note, Note)> + '_ {
		self.notes.windows(2).map(|pair| (pair[0], pair[1]))
	}
}

impl From<Vec<Note>> for Sequence {
	fn from(notes: Vec<Note>) -> Self {
		Self::new(notes)
	}
}

impl fmt::Display for Sequence {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let names: Vec<&str> = self.notes.iter().map(|n| n.name()).collect();
		f.write_str(&names.join(" "))
	}
}
