use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// Settings of the random walk performed by `Generator`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct GeneratorConfig {
	/// Transitions discarded before the first emitted note.
	pub burn_in: usize,
	/// Number of notes emitted per sequence.
	pub sequence_length: usize,
}

impl Default for GeneratorConfig {
	fn default() -> Self {
		Self { burn_in: 50, sequence_length: 8 }
	}
}

impl GeneratorConfig {
	/// Largest accepted `burn_in`.
	pub const MAX_BURN_IN: usize = 100_000;
	/// Largest accepted `sequence_length`.
	pub const MAX_SEQUENCE_LENGTH: usize = 10_000;

	/// Checks both settings against their limits.
	///
	/// # Errors
	/// Returns `GraphError::GeneratorLimitExceeded` naming the first setting
	/// above its limit.
	pub fn validate(&self) -> Result<(), GraphError> {
		if self.burn_in > Self::MAX_BURN_IN {
			return Err(GraphError::GeneratorLimitExceeded {
				setting: "burn_in",
				value: self.burn_in,
				max: Self::MAX_BURN_IN,
			});
		}
		if self.sequence_length > Self::MAX_SEQUENCE_LENGTH {
			return Err(GraphError::GeneratorLimitExceeded {
				setting: "sequence_length",
				value: self.sequence_length,
				max: Self::MAX_SEQUENCE_LENGTH,
			});
		}
		Ok(())
	}
}

/// Settings of the rating-driven weight update.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ReinforcementConfig {
	/// Divide each touched row by its new total after every update step.
	///
	/// Off by default: rows then only keep their sum approximately and
	/// individual weights may leave [0, 1].
	pub renormalize: bool,
}

/// Top-level configuration, usually read from a JSON document.
///
/// Every field is optional; missing fields take their defaults.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
	pub generator: GeneratorConfig,
	pub reinforcement: ReinforcementConfig,
}

impl Config {
	/// Parses a configuration from JSON.
	pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}
}
