//! Tunable simulation, interaction, and theme settings.
//!
//! Every field has a default, so a partial JSON document such as
//! `{"simulation": {"repulsion": 2500}}` is a complete configuration.

use serde::Deserialize;

use crate::components::note_graph::{InteractionConfig, SimulationConfig, ThemeName};
use crate::error::ConfigError;

/// Complete configuration for one graph view.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct GraphConfig {
	/// Force and layout tuning.
	pub simulation: SimulationConfig,
	/// Hit-test tolerances.
	pub interaction: InteractionConfig,
	/// Color scheme.
	pub theme: ThemeName,
}

impl GraphConfig {
	/// Checks every tuning value, reporting the first one out of range.
	pub fn validate(&self) -> Result<(), ConfigError> {
		let sim = &self.simulation;
		positive("simulation.spring_length", sim.spring_length)?;
		non_negative("simulation.repulsion", sim.repulsion)?;
		non_negative("simulation.spring_strength", sim.spring_strength)?;
		non_negative("simulation.gravity", sim.gravity)?;
		non_negative("simulation.padding", sim.padding)?;
		non_negative("simulation.jitter", sim.jitter)?;
		within("simulation.damping", sim.damping, f64::MIN_POSITIVE, 1.0)?;
		within("simulation.layout_radius", sim.layout_radius, 0.0, 0.5)?;
		positive("interaction.mouse_hit_radius", self.interaction.mouse_hit_radius)?;
		positive("interaction.touch_hit_radius", self.interaction.touch_hit_radius)?;
		Ok(())
	}

	/// Parses and validates a JSON configuration document.
	pub fn from_json(json: &str) -> Result<Self, ConfigLoadError> {
		let config: GraphConfig = serde_json::from_str(json)?;
		config.validate()?;
		Ok(config)
	}
}

/// Why a configuration document was rejected.
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
	/// Not valid JSON, or a field of the wrong type.
	#[error("invalid graph config json: {0}")]
	Parse(#[from] serde_json::Error),
	/// Well-formed but out of range.
	#[error("invalid graph config: {0}")]
	Invalid(#[from] ConfigError),
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
	if value > 0.0 && value.is_finite() {
		Ok(())
	} else {
		Err(ConfigError::NotPositive { field, value })
	}
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
	if value >= 0.0 && value.is_finite() {
		Ok(())
	} else {
		Err(ConfigError::Negative { field, value })
	}
}

fn within(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
	if (min..=max).contains(&value) {
		Ok(())
	} else {
		Err(ConfigError::OutOfRange {
			field,
			value,
			min,
			max,
		})
	}
}
