use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// Size of the alphabet. Fixed at compile time.
pub const NOTE_COUNT: usize = 22;

/// One pitch of the alphabet.
///
/// The alphabet is three octaves of the C major scale, from `e2` up to `e5`.
/// The letter is the pitch class, the digit the octave.
///
/// ## Invariants
/// - `Note::ALL[n.index()] == n` for every note
/// - Indices are dense and ordered by pitch, `0..NOTE_COUNT`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Note {
	E2,
	F2,
	G2,
	A2,
	B2,
	C3,
	D3,
	E3,
	F3,
	G3,
	A3,
	B3,
	C4,
	D4,
	E4,
	F4,
	G4,
	A4,
	B4,
	C5,
	D5,
	E5,
}

impl Note {
	/// All notes in ascending pitch order. Position in this table is the ordinal.
	pub const ALL: [Note; NOTE_COUNT] = [
		Note::E2, Note::F2, Note::G2, Note::A2, Note::B2,
		Note::C3, Note::D3, Note::E3, Note::F3, Note::G3,
		Note::A3, Note::B3, Note::C4, Note::D4, Note::E4,
		Note::F4, Note::G4, Note::A4, Note::B4, Note::C5,
		Note::D5, Note::E5,
	];

	/// Dense ordinal used for all array indexing.
	pub fn index(self) -> usize {
		self as usize
	}

	/// Returns the note at `index`.
	///
	/// # Errors
	/// Returns `GraphError::IndexOutOfRange` if `index >= NOTE_COUNT`.
	pub fn from_index(index: usize) -> Result<Self, GraphError> {
		Self::ALL
			.get(index)
			.copied()
			.ok_or(GraphError::IndexOutOfRange { index })
	}

	/// Stable display name, e.g. `"c4"`.
	pub fn name(self) -> &'static str {
		match self {
			Note::E2 => "e2",
			Note::F2 => "f2",
			Note::G2 => "g2",
			Note::A2 => "a2",
			Note::B2 => "b2",
			Note::C3 => "c3",
			Note::D3 => "d3",
			Note::E3 => "e3",
			Note::F3 => "f3",
			Note::G3 => "g3",
			Note::A3 => "a3",
			Note::B3 => "b3",
			Note::C4 => "c4",
			Note::D4 => "d4",
			Note::E4 => "e4",
			Note::F4 => "f4",
			Note::G4 => "g4",
			Note::A4 => "a4",
			Note::B4 => "b4",
			Note::C5 => "c5",
			Note::D5 => "d5",
			Note::E5 => "e5",
		}
	}
}

impl fmt::Display for Note {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Note {
	type Err = GraphError;

	/// Parses a display name, ignoring case and surrounding whitespace.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let wanted = s.trim();
		Self::ALL
			.iter()
			.copied()
			.find(|note| note.name().eq_ignore_ascii_case(wanted))
			.ok_or_else(|| GraphError::UnknownNote { name: s.to_owned() })
	}
}
