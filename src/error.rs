//! Error types for mounting a graph session and validating configuration.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures while acquiring the browser resources of a graph session.
#[derive(Debug, Error)]
pub enum GraphError {
	/// Not running in a browser window.
	#[error("no global window")]
	NoWindow,
	/// The canvas refused a 2d context.
	#[error("2d rendering context unavailable")]
	NoContext,
	/// A DOM call threw.
	#[error("javascript error: {0}")]
	Js(String),
}

impl From<JsValue> for GraphError {
	fn from(value: JsValue) -> Self {
		GraphError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}

/// A tuning value outside its accepted range.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
	/// A length, stiffness or radius that must be strictly positive.
	#[error("`{field}` must be positive, got {value}")]
	NotPositive {
		/// Dotted path of the setting.
		field: &'static str,
		/// Rejected value.
		value: f64,
	},
	/// A strength or spacing that must be zero or more.
	#[error("`{field}` must not be negative, got {value}")]
	Negative {
		/// Dotted path of the setting.
		field: &'static str,
		/// Rejected value.
		value: f64,
	},
	/// A factor outside its closed range.
	#[error("`{field}` must be within {min}..={max}, got {value}")]
	OutOfRange {
		/// Dotted path of the setting.
		field: &'static str,
		/// Rejected value.
		value: f64,
		/// Inclusive lower bound.
		min: f64,
		/// Inclusive upper bound.
		max: f64,
	},
}
