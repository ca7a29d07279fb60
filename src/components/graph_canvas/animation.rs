//! Edge-by-edge path animation.
//!
//! [`PathAnimator::begin`] validates a path and hands back a [`Schedule`]; the
//! caller runs every [`ScheduledStep`] after its delay through
//! [`PathAnimator::step`]. Only one path animates at a time and a running
//! animation cannot be cancelled.

use log::debug;

use super::painter::Painter;
use super::render::Frame;
use super::tooltip::Tooltip;
use super::types::{Graph, NodeId, Position};

/// Callback run once an animation (or a rejected-as-invalid request) is done.
pub type Completion = Box<dyn FnOnce()>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledStep {
	/// Delay from the start of the animation.
	pub delay_ms: u32,
	/// Index of the path node this step reaches, starting at 1.
	pub index: usize,
}

pub type Schedule = Vec<ScheduledStep>;

/// Outcome of [`PathAnimator::begin`].
#[derive(Debug, PartialEq, Eq)]
pub enum PathStart {
	/// Another animation is in flight; the completion was dropped uncalled.
	Rejected,
	/// Nothing to animate; the completion already ran.
	Completed,
	Scheduled(Schedule),
}

struct PathPoint {
	label: String,
	position: Position,
	hue: f64,
}

struct ActivePath {
	points: Vec<PathPoint>,
	delay_ms: u32,
	on_complete: Option<Completion>,
}

/// Owns the busy flag and the snapshot of the path being animated.
#[derive(Default)]
pub struct PathAnimator {
	active: Option<ActivePath>,
}

/// Delay of every step: `index * delay`, with the first one capped so the
/// first edge shows up promptly.
pub fn step_delays(edges: usize, delay_ms: u32, first_cap_ms: u32) -> Schedule {
	(1..=edges)
		.map(|index| ScheduledStep {
			delay_ms: if index == 1 {
				delay_ms.min(first_cap_ms)
			} else {
				delay_ms.saturating_mul(index as u32)
			},
			index,
		})
		.collect()
}

impl PathAnimator {
	pub fn is_busy(&self) -> bool {
		self.active.is_some()
	}

	/// Starts animating `path`. Every node must already be placed; otherwise,
	/// and for paths without edges, `on_complete` runs right away and nothing
	/// is drawn.
	pub fn begin(
		&mut self,
		graph: &Graph,
		path: &[NodeId],
		delay_ms: u32,
		first_cap_ms: u32,
		on_complete: Completion,
	) -> PathStart {
		if self.is_busy() {
			debug!("path animation already running, ignoring new request");
			return PathStart::Rejected;
		}

		let points: Option<Vec<PathPoint>> = path
			.iter()
			.map(|id| {
				let node = graph.get(id)?;
				Some(PathPoint {
					label: node.display_label(id),
					position: node.position?,
					hue: node.hue,
				})
			})
			.collect();

		let Some(points) = points else {
			debug!("path references a node without a position, draw the graph first");
			on_complete();
			return PathStart::Completed;
		};
		if points.len() < 2 {
			on_complete();
			return PathStart::Completed;
		}

		let schedule = step_delays(points.len() - 1, delay_ms, first_cap_ms);
		debug!("animating {} edges at {}ms", schedule.len(), delay_ms);
		self.active = Some(ActivePath {
			points,
			delay_ms,
			on_complete: Some(on_complete),
		});
		PathStart::Scheduled(schedule)
	}

	/// Draws step `index`: the newly reached edge in the active colour and the
	/// previous one settled. The last step settles its own edge, hides the
	/// tooltip, releases the busy flag and returns the completion for the
	/// caller to run.
	pub fn step<P, T>(
		&mut self,
		index: usize,
		painter: &mut P,
		tooltip: &mut T,
		frame: &Frame,
	) -> Option<Completion>
	where
		P: Painter + ?Sized,
		T: Tooltip + ?Sized,
	{
		let active = self.active.as_ref()?;
		if index == 0 || index >= active.points.len() {
			return None;
		}
		let config = frame.config;
		let (prev, curr) = (&active.points[index - 1], &active.points[index]);

		painter.set_transform(frame.camera);
		if index >= 2 {
			painter.set_stroke(config.path_settled_color, config.path_width);
			painter.segment(active.points[index - 2].position, prev.position);
		}
		painter.set_stroke(config.path_active_color, config.path_width);
		painter.segment(prev.position, curr.position);

		if active.delay_ms > 0 {
			let top = Position::new(curr.position.x, curr.position.y - frame.radius);
			let (sx, sy) = frame.camera.world_to_screen(top);
			tooltip.show_label(&curr.label);
			tooltip.set_accent_color(curr.hue);
			tooltip.position_near(sx, sy, true, false);
		}

		if index + 1 < active.points.len() {
			return None;
		}
		painter.set_stroke(config.path_settled_color, config.path_width);
		painter.segment(prev.position, curr.position);
		tooltip.hide();
		self.active.take().and_then(|done| done.on_complete)
	}
}
