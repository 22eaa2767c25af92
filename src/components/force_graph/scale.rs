//! Zoom-dependent sizing of graph visuals.
//!
//! # Coordinate Spaces
//!
//! - **World-space**: The coordinate system of the graph. Values in world-space
//!   scale proportionally with zoom (appear larger when zoomed in).
//! - **Screen-space**: Pixel coordinates on the canvas.
//!
//! Node radii, strokes and edge widths are world-space, so the whole scene
//! zooms as one picture. Labels and hit areas are clamped in screen-space so
//! they stay readable and clickable at the ends of the zoom range.

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// World-space scaling, clamped to min/max screen-space bounds.
	/// `(min_screen_px, max_screen_px)` - use `f64::INFINITY` for unbounded.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// Compute the world-space value for a given base value and zoom level.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// Complete scale configuration for labels, hit areas and arrows.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Label font size in world units.
	pub label_size: f64,
	pub label_behavior: ScaleBehavior,
	/// Gap between node edge and label start, in world units.
	pub label_offset: f64,
	/// Smallest hit radius in world units; node radii larger than this win.
	pub hit_radius: f64,
	pub hit_behavior: ScaleBehavior,
	/// Arrow size multiplier on the theme's arrow size.
	pub arrow_scale: f64,
	pub arrow_behavior: ScaleBehavior,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			label_size: 10.0,
			label_behavior: ScaleBehavior::Clamped {
				min_screen: 8.0,
				max_screen: 24.0,
			},
			label_offset: 4.0,
			hit_radius: 0.0,
			hit_behavior: ScaleBehavior::Clamped {
				min_screen: 6.0,
				max_screen: f64::INFINITY,
			},
			arrow_scale: 1.0,
			arrow_behavior: ScaleBehavior::World,
		}
	}
}

/// Pre-computed scale values for a specific zoom level.
///
/// Create this once per frame and pass it to rendering functions.
/// All sizes are in world-space (ready to use after canvas transform).
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// Current zoom level.
	pub k: f64,
	/// Label font string (e.g., "10px sans-serif").
	pub label_font: String,
	pub label_offset: f64,
	/// Minimum hit radius in world-space.
	pub hit_radius: f64,
	/// Multiplier applied to theme arrow sizes.
	pub arrow_scale: f64,
}

impl ScaledValues {
	/// Compute scaled values from configuration and current zoom level.
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let label_size = config.label_behavior.apply(config.label_size, k);
		Self {
			k,
			label_font: format!("{}px sans-serif", label_size),
			label_offset: config.label_offset,
			hit_radius: config.hit_behavior.apply(config.hit_radius, k),
			arrow_scale: config.arrow_behavior.apply(config.arrow_scale, k),
		}
	}
}
