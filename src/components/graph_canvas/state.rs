use std::collections::BTreeSet;

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::animation::{Completion, PathAnimator, PathStart};
use super::camera::Camera;
use super::config::CanvasConfig;
use super::hit_test;
use super::interaction::{PanState, PointerAction};
use super::layout::{Bounds, LayoutStrategy, place_vertices};
use super::painter::Painter;
use super::pathfinder;
use super::render::{self, Frame, RenderStats};
use super::render_loop::{FrameHost, RenderLoop};
use super::tooltip::Tooltip;
use super::types::{Graph, NodeId};

/// Toggles driven by the control surface.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewSettings {
	/// Set once the user asked for the graph to be drawn in the current mode.
	pub graph_enabled: bool,
	/// A path has been drawn over the graph and needs a redraw to go away.
	pub path_shown: bool,
	pub tooltips_enabled: bool,
}

/// Everything the canvas core mutates: dataset, cached layout, camera,
/// interaction and animation state.
pub struct GraphCanvasState {
	pub graph: Graph,
	pub camera: Camera,
	pub config: CanvasConfig,
	pub strategy: LayoutStrategy,
	pub pan: PanState,
	pub render_loop: RenderLoop,
	pub settings: ViewSettings,
	pub highlighted: Option<NodeId>,
	pub width: f64,
	pub height: f64,
	animator: PathAnimator,
	layout_valid: bool,
	rng: StdRng,
}

impl GraphCanvasState {
	pub fn new(graph: Graph, width: f64, height: f64, seed: u64) -> Self {
		Self {
			graph,
			camera: Camera::default(),
			config: CanvasConfig::default(),
			strategy: LayoutStrategy::default(),
			pan: PanState::default(),
			render_loop: RenderLoop::default(),
			settings: ViewSettings::default(),
			highlighted: None,
			width,
			height,
			animator: PathAnimator::default(),
			layout_valid: false,
			rng: StdRng::seed_from_u64(seed),
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Swaps the dataset. The old layout no longer applies.
	pub fn set_graph(&mut self, graph: Graph) {
		info!("dataset changed ({} nodes)", graph.len());
		self.graph = graph;
		self.invalidate();
	}

	pub fn set_strategy(&mut self, strategy: LayoutStrategy) {
		info!("layout strategy set to {}", strategy.name());
		self.strategy = strategy;
		self.invalidate();
	}

	fn invalidate(&mut self) {
		self.graph.clear_layout();
		self.layout_valid = false;
		self.highlighted = None;
		self.settings.graph_enabled = false;
		self.settings.path_shown = false;
	}

	pub fn has_layout(&self) -> bool {
		self.layout_valid
	}

	pub fn vertex_radius(&self) -> f64 {
		self.strategy.vertex_radius()
	}

	pub fn is_busy(&self) -> bool {
		self.animator.is_busy()
	}

	pub fn viewport_usable(&self) -> bool {
		self.width >= self.config.min_width && self.height >= self.config.min_height
	}

	fn frame(&self) -> Frame<'_> {
		Frame {
			camera: &self.camera,
			config: &self.config,
			radius: self.vertex_radius(),
			width: self.width,
			height: self.height,
		}
	}

	/// Wipes the canvas without touching the layout.
	pub fn clear<P: Painter + ?Sized>(&mut self, painter: &mut P) {
		painter.clear(self.width, self.height);
	}

	/// Clears and paints the whole graph, laying it out first when asked to or
	/// when no layout exists. Skipped entirely on a too small viewport.
	pub fn draw_full_graph<P: Painter + ?Sized>(
		&mut self,
		painter: &mut P,
		redo: bool,
	) -> Option<RenderStats> {
		if !self.viewport_usable() {
			debug!("viewport {}x{} too small, skipping draw", self.width, self.height);
			return None;
		}
		if redo && self.is_busy() && self.layout_valid {
			debug!("keeping layout while a path animates");
		} else if redo || !self.layout_valid {
			let bounds = Bounds {
				width: self.width,
				height: self.height,
			};
			place_vertices(
				&mut self.graph,
				self.strategy,
				&self.config.layout,
				bounds,
				&mut self.rng,
			);
			self.layout_valid = true;
			self.highlighted = None;
		}
		Some(render::draw_graph(painter, &self.graph, &self.frame()))
	}

	pub fn highlight_neighborhood<P: Painter + ?Sized>(
		&mut self,
		painter: &mut P,
		id: &str,
	) -> RenderStats {
		self.highlighted = Some(id.to_string());
		render::draw_neighborhood(painter, &self.graph, &self.frame(), id)
	}

	/// Redraws with whatever highlight is active.
	pub fn redraw<P: Painter + ?Sized>(&mut self, painter: &mut P) {
		match self.highlighted.clone() {
			Some(id) => {
				self.highlight_neighborhood(painter, &id);
			}
			None => {
				self.draw_full_graph(painter, false);
			}
		}
	}

	/// Node under a screen point. While a neighbourhood is highlighted only
	/// the painted nodes can be hit.
	pub fn node_at(&self, sx: f64, sy: f64) -> Option<&str> {
		let radius = self.vertex_radius();
		let Some(focus) = self.highlighted.as_deref() else {
			return hit_test::node_at(&self.graph, &self.camera, radius, sx, sy);
		};
		let adjacency = self.graph.adjacency();
		let shown: BTreeSet<&str> = adjacency
			.get(focus)
			.into_iter()
			.flatten()
			.copied()
			.chain([focus])
			.collect();
		hit_test::node_at_where(&self.graph, &self.camera, radius, (sx, sy), |id| {
			shown.contains(id)
		})
	}

	/// Click-to-inspect: highlights the clicked node's neighbourhood, or goes
	/// back to the full graph when the highlighted node (or empty space) is
	/// clicked. Ignored while a path animates.
	pub fn click<P: Painter + ?Sized>(&mut self, painter: &mut P, sx: f64, sy: f64) {
		if self.is_busy() || !self.settings.graph_enabled {
			return;
		}
		let hit = self.node_at(sx, sy).map(str::to_string);
		match hit {
			Some(id) if self.highlighted.as_deref() != Some(id.as_str()) => {
				debug!("highlighting neighbourhood of {id}");
				self.highlight_neighborhood(painter, &id);
			}
			_ if self.highlighted.is_some() => {
				self.highlighted = None;
				self.draw_full_graph(painter, false);
			}
			_ => {}
		}
	}

	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		self.camera.zoom_at(sx, sy, factor);
	}

	/// Zooms about the canvas centre by the configured button step, in or out.
	pub fn zoom_step(&mut self, zoom_in: bool) {
		let step = self.config.zoom_step;
		let factor = if zoom_in { step } else { 1.0 / step };
		self.zoom_at(self.width / 2.0, self.height / 2.0, factor);
	}

	pub fn reset_zoom(&mut self) {
		self.camera.reset();
	}

	/// Wheel zoom about the pointer. Returns false when ignored.
	pub fn wheel(&mut self, sx: f64, sy: f64, delta_y: f64) -> bool {
		if !self.settings.graph_enabled || self.is_busy() {
			return false;
		}
		let factor = 1.0 - delta_y * self.config.wheel_zoom_intensity;
		if factor <= 0.0 {
			return false;
		}
		self.zoom_at(sx, sy, factor);
		true
	}

	pub fn pointer_down(&mut self, button: i16, sx: f64, sy: f64) -> bool {
		if self.is_busy() {
			return false;
		}
		self.pan.press(button, sx, sy, &self.camera)
	}

	/// Applies any pan to the camera and reports what happened.
	pub fn pointer_move(&mut self, sx: f64, sy: f64) -> PointerAction {
		let action = self.pan.moved(sx, sy, self.config.drag_threshold);
		if let PointerAction::Pan { offset_x, offset_y, .. } = action {
			self.camera.pan_to(offset_x, offset_y);
		}
		action
	}

	/// Ends a press; a press that never became a drag is handled as a click.
	pub fn pointer_up<P: Painter + ?Sized>(
		&mut self,
		painter: &mut P,
		sx: f64,
		sy: f64,
	) -> PointerAction {
		let action = self.pan.release(sx, sy);
		if let PointerAction::Click { x, y } = action {
			self.click(painter, x, y);
		}
		action
	}

	pub fn pointer_leave(&mut self) -> PointerAction {
		self.pan.leave()
	}

	/// Hover tooltip for the node under the pointer, if tooltips are on.
	pub fn hover<T: Tooltip + ?Sized>(&self, tooltip: &mut T, sx: f64, sy: f64) {
		let settings = &self.settings;
		let shown = settings.tooltips_enabled && settings.graph_enabled;
		if !shown || self.pan.dragging || self.is_busy() {
			return;
		}
		let hit = self.node_at(sx, sy);
		let Some((id, node)) = hit.and_then(|id| self.graph.get(id).map(|n| (id, n))) else {
			tooltip.hide();
			return;
		};
		let (dx, dy) = self.config.hover_offset;
		tooltip.show_label(&node.display_label(id));
		tooltip.set_accent_color(node.hue);
		tooltip.position_near(sx + dx, sy + dy, false, false);
	}

	pub fn start_render_loop<P, H>(&mut self, painter: &mut P, host: &mut H)
	where
		P: Painter + ?Sized,
		H: FrameHost + ?Sized,
	{
		if self.render_loop.start(host) {
			self.redraw(painter);
		}
	}

	/// Frame callback body: redraws without relayout while the loop runs.
	pub fn render_frame<P, H>(&mut self, painter: &mut P, host: &mut H)
	where
		P: Painter + ?Sized,
		H: FrameHost + ?Sized,
	{
		if self.render_loop.on_frame(host) {
			self.redraw(painter);
		}
	}

	pub fn stop_render_loop<H: FrameHost + ?Sized>(&mut self, host: &mut H) {
		self.render_loop.cancel(host);
	}

	pub fn shortest_path(&self, start: &str, target: &str) -> Vec<NodeId> {
		pathfinder::shortest_path(&self.graph, start, target)
	}

	/// Starts animating `path`, see [`PathAnimator::begin`].
	/// Without a current layout the request fails closed.
	pub fn draw_path(
		&mut self,
		path: &[NodeId],
		delay_ms: u32,
		on_complete: Completion,
	) -> PathStart {
		if !self.layout_valid && !self.is_busy() {
			debug!("no layout yet, draw the graph before showing paths");
			on_complete();
			return PathStart::Completed;
		}
		let start = self.animator.begin(
			&self.graph,
			path,
			delay_ms,
			self.config.first_step_delay_cap_ms,
			on_complete,
		);
		if matches!(start, PathStart::Scheduled(_)) {
			self.settings.path_shown = true;
		}
		start
	}

	/// Finds a shortest path between two nodes and animates it at the
	/// configured connect delay. Completes right away when there is nothing
	/// to show.
	pub fn connect(&mut self, start: &str, target: &str, on_complete: Completion) -> PathStart {
		if !self.settings.graph_enabled {
			on_complete();
			return PathStart::Completed;
		}
		let path = self.shortest_path(start, target);
		debug!("connecting {start} -> {target}: {} hops", path.len().saturating_sub(1));
		self.draw_path(&path, self.config.connect_delay_ms, on_complete)
	}

	/// Runs one scheduled animation step. The returned completion must be run
	/// by the caller once it no longer borrows the state.
	pub fn path_step<P, T>(
		&mut self,
		index: usize,
		painter: &mut P,
		tooltip: &mut T,
	) -> Option<Completion>
	where
		P: Painter + ?Sized,
		T: Tooltip + ?Sized,
	{
		let frame = Frame {
			camera: &self.camera,
			config: &self.config,
			radius: self.strategy.vertex_radius(),
			width: self.width,
			height: self.height,
		};
		self.animator.step(index, painter, tooltip, &frame)
	}

	/// Clears a drawn path by redrawing the graph underneath it.
	pub fn clear_path<P: Painter + ?Sized>(&mut self, painter: &mut P) {
		if self.is_busy() {
			return;
		}
		self.settings.path_shown = false;
		self.highlighted = None;
		if self.settings.graph_enabled {
			self.draw_full_graph(painter, false);
		} else {
			self.clear(painter);
		}
	}
}
