//! Pan and zoom view transform.
//!
//! The transform maps graph (simulation) coordinates to canvas pixels:
//! `screen = graph * k + (x, y)`. It never touches simulation state.

/// Allowed range of the zoom factor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomExtent {
	pub min: f64,
	pub max: f64,
}

impl Default for ZoomExtent {
	fn default() -> Self {
		Self { min: 0.1, max: 4.0 }
	}
}

impl ZoomExtent {
	pub fn clamp(&self, k: f64) -> f64 {
		k.clamp(self.min, self.max)
	}
}

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%).
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	pub fn graph_to_screen(&self, gx: f64, gy: f64) -> (f64, f64) {
		(gx * self.k + self.x, gy * self.k + self.y)
	}

	/// Sets the zoom factor, clamped to `extent`, keeping the graph point
	/// under the screen anchor `(ax, ay)` fixed.
	pub fn scale_to(&mut self, k: f64, ax: f64, ay: f64, extent: &ZoomExtent) {
		let new_k = extent.clamp(k);
		let ratio = new_k / self.k;
		self.x = ax - (ax - self.x) * ratio;
		self.y = ay - (ay - self.y) * ratio;
		self.k = new_k;
	}

	/// Multiplies the zoom factor, anchored at `(ax, ay)`.
	pub fn zoom_by(&mut self, factor: f64, ax: f64, ay: f64, extent: &ZoomExtent) {
		self.scale_to(self.k * factor, ax, ay, extent);
	}
}
