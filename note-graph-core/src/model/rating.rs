use std::fmt;

use crate::error::GraphError;

/// A validated user rating in `[0, 10]`.
///
/// 5 is neutral. Higher ratings reinforce the rated transitions,
/// lower ratings weaken them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(i32);

impl Rating {
	pub const MIN: i32 = 0;
	pub const MAX: i32 = 10;
	pub const NEUTRAL: i32 = 5;

	/// Ratings are spread over this divisor, bounding one step to ±0.1.
	const SCALE: f64 = 50.0;

	/// Validates a raw rating.
	///
	/// # Errors
	/// Returns `GraphError::RatingOutOfRange` if `value` is outside `[0, 10]`.
	pub fn new(value: i64) -> Result<Self, GraphError> {
		match i32::try_from(value) {
			Ok(v) if (Self::MIN..=Self::MAX).contains(&v) => Ok(Self(v)),
			_ => Err(GraphError::RatingOutOfRange { rating: value }),
		}
	}

	pub fn value(self) -> i32 {
		self.0
	}

	/// Weight added to a rated transition: `(rating - 5) / 50`.
	pub fn modification(self) -> f64 {
		f64::from(self.0 - Self::NEUTRAL) / Self::SCALE
	}

	pub fn is_neutral(self) -> bool {
		self.0 == Self::NEUTRAL
	}
}

impl TryFrom<i64> for Rating {
	type Error = GraphError;

	fn try_from(value: i64) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}

impl fmt::Display for Rating {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}", self.0, Self::MAX)
	}
}
