//! Visual theming for the citation graph.
//!
//! Provides colors per paper classification and edge type, selection
//! stroke colors, and background style configuration.

use super::types::{Classification, EdgeKind};

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

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	/// Linear interpolation between two colors
	pub fn lerp(self, other: Color, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		let channel = |a: u8, b: u8| (a as f64 * (1.0 - t) + b as f64 * t).round() as u8;
		Self {
			r: channel(self.r, other.r),
			g: channel(self.g, other.g),
			b: channel(self.b, other.b),
			a: self.a * (1.0 - t) + other.a * t,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Primary background color
	pub color: Color,
	/// Secondary color for gradients
	pub color_secondary: Color,
	/// Whether to use radial gradient
	pub use_gradient: bool,
	/// Vignette intensity (0.0 = none, 1.0 = strong)
	pub vignette: f64,
}

/// Fill colors per classification.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	pub seed: Color,
	pub lnp: Color,
	pub peripheral: Color,
	pub unclassified: Color,
	/// Whether nodes have inner gradients
	pub use_gradient: bool,
}

impl NodeStyle {
	pub fn fill(&self, classification: Classification) -> Color {
		match classification {
			Classification::Seed => self.seed,
			Classification::Lnp => self.lnp,
			Classification::Peripheral => self.peripheral,
			Classification::Unclassified => self.unclassified,
		}
	}
}

/// Node outline colors and widths for each highlight role.
#[derive(Clone, Debug)]
pub struct StrokeStyle {
	pub default: Color,
	pub selected: Color,
	pub neighbor: Color,
	pub width: f64,
	pub emphasized_width: f64,
}

/// Edge visual style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	pub cites: Color,
	pub expands_to: Color,
	pub cites_width: f64,
	pub expands_to_width: f64,
	pub arrow: Color,
	/// Arrowhead length in world units.
	pub arrow_size: f64,
}

impl EdgeStyle {
	pub fn color(&self, kind: EdgeKind) -> Color {
		match kind {
			EdgeKind::Cites => self.cites,
			EdgeKind::ExpandsTo => self.expands_to,
		}
	}

	pub fn width(&self, kind: EdgeKind) -> f64 {
		match kind {
			EdgeKind::Cites => self.cites_width,
			EdgeKind::ExpandsTo => self.expands_to_width,
		}
	}
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub background: BackgroundStyle,
	pub node: NodeStyle,
	pub stroke: StrokeStyle,
	pub edge: EdgeStyle,
	pub label: Color,
}

impl Theme {
	/// Dark slate theme matching the discovery viewer palette (default)
	pub fn default_theme() -> Self {
		let lnp = Color::rgb(46, 204, 113);
		Self {
			background: BackgroundStyle {
				color: Color::rgb(17, 24, 39),
				color_secondary: Color::rgb(31, 41, 55),
				use_gradient: true,
				vignette: 0.15,
			},
			node: NodeStyle {
				seed: Color::rgb(52, 152, 219),
				lnp,
				peripheral: Color::rgb(243, 156, 18),
				unclassified: Color::rgb(149, 165, 166),
				use_gradient: true,
			},
			stroke: StrokeStyle {
				default: Color::rgb(255, 255, 255),
				selected: Color::rgb(52, 211, 153),
				neighbor: Color::rgb(96, 165, 250),
				width: 1.5,
				emphasized_width: 3.0,
			},
			edge: EdgeStyle {
				cites: Color::rgb(153, 153, 153),
				expands_to: lnp,
				cites_width: 1.5,
				expands_to_width: 2.5,
				arrow: Color::rgb(153, 153, 153),
				arrow_size: 8.0,
			},
			label: Color::rgb(204, 204, 204),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}
