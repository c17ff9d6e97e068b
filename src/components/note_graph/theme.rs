//! Visual theming for the note graph.
//!
//! Nodes are styled by [`NodeTier`]; each tier has its own radius, fill and
//! optional outline so the selected note, the hovered note and the selected
//! note's neighbors stand out from the rest.

use serde::Deserialize;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Opaque gray of the given lightness (0 = black, 255 = white).
	pub const fn gray(v: u8) -> Self {
		Self::rgb(v, v, v)
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Emphasis level of a node, strongest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum NodeTier {
	Selected,
	Hovered,
	Connected,
	Default,
}

/// How one [`NodeTier`] is drawn.
#[derive(Clone, Debug)]
pub struct TierStyle {
	pub radius: f64,
	pub fill: Color,
	/// Outline drawn around the node, if any.
	pub ring: Option<Color>,
}

/// Edge line style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	pub color: Color,
	pub width: f64,
	/// Color for edges touching the selected node.
	pub emphasis_color: Color,
	pub emphasis_width: f64,
}

/// Label text and backdrop style.
#[derive(Clone, Debug)]
pub struct LabelStyle {
	pub font: String,
	pub selected_font: String,
	pub color: Color,
	/// Translucent box behind the text.
	pub backdrop: Color,
	/// Gap between the node's edge and the label's top.
	pub offset: f64,
	/// Labels longer than this many characters are cut and get an ellipsis.
	pub max_chars: usize,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub background: Color,
	pub placeholder: Color,
	pub edge: EdgeStyle,
	pub selected: TierStyle,
	pub hovered: TierStyle,
	pub connected: TierStyle,
	pub node: TierStyle,
	pub label: LabelStyle,
}

/// Theme choice as written in configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
	/// Grays on a white background.
	#[default]
	Light,
	/// Light nodes on a dark slate background.
	Dark,
}

impl From<ThemeName> for Theme {
	fn from(name: ThemeName) -> Self {
		match name {
			ThemeName::Light => Theme::light(),
			ThemeName::Dark => Theme::dark(),
		}
	}
}

impl Theme {
	/// Grayscale on white (default).
	pub fn light() -> Self {
		Self {
			background: Color::gray(255),
			placeholder: Color::gray(115),
			edge: EdgeStyle {
				color: Color::gray(179),
				width: 2.0,
				emphasis_color: Color::gray(60),
				emphasis_width: 3.0,
			},
			selected: TierStyle {
				radius: 12.0,
				fill: Color::gray(0),
				ring: Some(Color::gray(0)),
			},
			hovered: TierStyle {
				radius: 10.0,
				fill: Color::gray(51),
				ring: Some(Color::gray(0)),
			},
			connected: TierStyle {
				radius: 9.0,
				fill: Color::gray(77),
				ring: None,
			},
			node: TierStyle {
				radius: 8.0,
				fill: Color::gray(128),
				ring: None,
			},
			label: LabelStyle {
				font: "11px sans-serif".into(),
				selected_font: "bold 12px sans-serif".into(),
				color: Color::gray(0),
				backdrop: Color::rgba(255, 255, 255, 0.75),
				offset: 4.0,
				max_chars: 20,
			},
		}
	}

	/// Light text and nodes on a dark slate background.
	pub fn dark() -> Self {
		Self {
			background: Color::rgb(22, 27, 34),
			placeholder: Color::rgb(140, 150, 160),
			edge: EdgeStyle {
				color: Color::rgba(140, 160, 180, 0.5),
				width: 2.0,
				emphasis_color: Color::rgb(210, 220, 230),
				emphasis_width: 3.0,
			},
			selected: TierStyle {
				radius: 12.0,
				fill: Color::gray(255),
				ring: Some(Color::gray(255)),
			},
			hovered: TierStyle {
				radius: 10.0,
				fill: Color::rgb(200, 210, 220),
				ring: Some(Color::gray(255)),
			},
			connected: TierStyle {
				radius: 9.0,
				fill: Color::rgb(160, 175, 190),
				ring: None,
			},
			node: TierStyle {
				radius: 8.0,
				fill: Color::rgb(94, 129, 172),
				ring: None,
			},
			label: LabelStyle {
				font: "11px sans-serif".into(),
				selected_font: "bold 12px sans-serif".into(),
				color: Color::rgb(230, 235, 240),
				backdrop: Color::rgba(22, 27, 34, 0.7),
				offset: 4.0,
				max_chars: 20,
			},
		}
	}

	pub fn tier(&self, tier: NodeTier) -> &TierStyle {
		match tier {
			NodeTier::Selected => &self.selected,
			NodeTier::Hovered => &self.hovered,
			NodeTier::Connected => &self.connected,
			NodeTier::Default => &self.node,
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::light()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_output() {
		assert_eq!(Color::rgb(255, 0, 16).to_css(), "#ff0010");
		assert_eq!(Color::rgba(0, 0, 0, 0.5).to_css(), "rgba(0, 0, 0, 0.5)");
	}

	#[test]
	fn stronger_tiers_are_larger() {
		for theme in [Theme::light(), Theme::dark()] {
			let radii: Vec<f64> = [
				NodeTier::Selected,
				NodeTier::Hovered,
				NodeTier::Connected,
				NodeTier::Default,
			]
			.into_iter()
			.map(|t| theme.tier(t).radius)
			.collect();
			assert!(radii.windows(2).all(|w| w[0] > w[1]), "{radii:?}");
		}
	}

	#[test]
	fn light_tiers_darken_with_emphasis() {
		let theme = Theme::light();
		assert!(theme.selected.fill.r < theme.hovered.fill.r);
		assert!(theme.hovered.fill.r < theme.connected.fill.r);
		assert!(theme.connected.fill.r < theme.node.fill.r);
	}
}
