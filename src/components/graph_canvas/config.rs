use super::layout::LayoutConfig;

/// Tunables for drawing, interaction and animation.
#[derive(Clone, Debug, PartialEq)]
pub struct CanvasConfig {
	/// Below this viewport size full draws are skipped.
	pub min_width: f64,
	pub min_height: f64,
	pub edge_color: &'static str,
	pub edge_width: f64,
	/// Colour of the edge a path animation just reached.
	pub path_active_color: &'static str,
	/// Colour edges settle into once the animation moves past them.
	pub path_settled_color: &'static str,
	pub path_width: f64,
	pub focus_outline_color: &'static str,
	pub focus_outline_width: f64,
	/// Hover tooltip offset from the pointer.
	pub hover_offset: (f64, f64),
	/// Upper bound on the delay before the first animated edge.
	pub first_step_delay_cap_ms: u32,
	/// Pointer travel, per axis, after which a press becomes a drag.
	pub drag_threshold: f64,
	/// Zoom factor per unit of wheel delta.
	pub wheel_zoom_intensity: f64,
	/// Factor applied by the zoom in/out buttons.
	pub zoom_step: f64,
	/// Per-edge delay when animating a computed connection.
	pub connect_delay_ms: u32,
	pub layout: LayoutConfig,
}

impl Default for CanvasConfig {
	fn default() -> Self {
		Self {
			min_width: 900.0,
			min_height: 600.0,
			edge_color: "#cccccc",
			edge_width: 2.0,
			path_active_color: "#ff0000",
			path_settled_color: "#ffff00",
			path_width: 2.0,
			focus_outline_color: "#ffffff",
			focus_outline_width: 3.0,
			hover_offset: (7.0, 5.0),
			first_step_delay_cap_ms: 150,
			drag_threshold: 5.0,
			wheel_zoom_intensity: 0.0015,
			zoom_step: 1.2,
			connect_delay_ms: 750,
			layout: LayoutConfig::default(),
		}
	}
}
