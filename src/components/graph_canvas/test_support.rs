//! Headless stand-ins for the browser collaborators.

use super::camera::Camera;
use super::painter::Painter;
use super::render_loop::FrameHost;
use super::tooltip::Tooltip;
use super::types::{Graph, Node, Position};

#[derive(Clone, Debug, PartialEq)]
pub enum PaintOp {
	Clear,
	Transform(Camera),
	Stroke { color: String, width: f64 },
	Segment(Position, Position),
	FillCircle { center: Position, color: String },
	StrokeCircle { center: Position, color: String },
}

#[derive(Default)]
pub struct RecordingPainter {
	pub ops: Vec<PaintOp>,
	pending: Option<Position>,
	segment_end: Option<Position>,
}

impl RecordingPainter {
	pub fn segments(&self) -> Vec<(Position, Position)> {
		self.ops
			.iter()
			.filter_map(|op| match op {
				PaintOp::Segment(a, b) => Some((*a, *b)),
				_ => None,
			})
			.collect()
	}

	/// Segments paired with the stroke colour active when they were drawn.
	pub fn coloured_segments(&self) -> Vec<(String, Position, Position)> {
		let mut color = String::new();
		let mut out = Vec::new();
		for op in &self.ops {
			match op {
				PaintOp::Stroke { color: c, .. } => color = c.clone(),
				PaintOp::Segment(a, b) => out.push((color.clone(), *a, *b)),
				_ => {}
			}
		}
		out
	}

	pub fn circles(&self) -> usize {
		self.ops
			.iter()
			.filter(|op| matches!(op, PaintOp::FillCircle { .. }))
			.count()
	}
}

impl Painter for RecordingPainter {
	fn clear(&mut self, _width: f64, _height: f64) {
		self.ops.push(PaintOp::Clear);
	}

	fn set_transform(&mut self, camera: &Camera) {
		self.ops.push(PaintOp::Transform(*camera));
	}

	fn set_stroke(&mut self, color: &str, width: f64) {
		self.ops.push(PaintOp::Stroke {
			color: color.to_string(),
			width,
		});
	}

	fn begin_path(&mut self) {
		self.pending = None;
		self.segment_end = None;
	}

	fn move_to(&mut self, to: Position) {
		self.pending = Some(to);
	}

	fn line_to(&mut self, to: Position) {
		self.segment_end = Some(to);
	}

	fn stroke(&mut self) {
		if let (Some(a), Some(b)) = (self.pending, self.segment_end) {
			self.ops.push(PaintOp::Segment(a, b));
		}
	}

	fn fill_circle(&mut self, center: Position, _radius: f64, color: &str) {
		self.ops.push(PaintOp::FillCircle {
			center,
			color: color.to_string(),
		});
	}

	fn stroke_circle(&mut self, center: Position, _radius: f64, color: &str, _width: f64) {
		self.ops.push(PaintOp::StrokeCircle {
			center,
			color: color.to_string(),
		});
	}
}

#[derive(Clone, Debug, PartialEq)]
pub enum TooltipOp {
	Label(String),
	Accent(f64),
	Near { x: f64, y: f64, centered: bool, below: bool },
	Hide,
}

#[derive(Default)]
pub struct RecordingTooltip {
	pub ops: Vec<TooltipOp>,
}

impl RecordingTooltip {
	pub fn labels(&self) -> Vec<String> {
		self.ops
			.iter()
			.filter_map(|op| match op {
				TooltipOp::Label(text) => Some(text.clone()),
				_ => None,
			})
			.collect()
	}
}

impl Tooltip for RecordingTooltip {
	fn show_label(&mut self, text: &str) {
		self.ops.push(TooltipOp::Label(text.to_string()));
	}

	fn set_accent_color(&mut self, hue: f64) {
		self.ops.push(TooltipOp::Accent(hue));
	}

	fn position_near(&mut self, x: f64, y: f64, centered: bool, below: bool) {
		self.ops.push(TooltipOp::Near { x, y, centered, below });
	}

	fn hide(&mut self) {
		self.ops.push(TooltipOp::Hide);
	}
}

#[derive(Default)]
pub struct CountingFrames {
	pub next_id: i32,
	pub requested: Vec<i32>,
	pub cancelled: Vec<i32>,
}

impl FrameHost for CountingFrames {
	fn request_frame(&mut self) -> Option<i32> {
		self.next_id += 1;
		self.requested.push(self.next_id);
		Some(self.next_id)
	}

	fn cancel_frame(&mut self, handle: i32) {
		self.cancelled.push(handle);
	}
}

/// Graph with every node placed at the given world coordinates.
pub fn placed_graph(nodes: &[(&str, f64, f64, &[&str])]) -> Graph {
	let mut graph = Graph::new();
	for &(id, x, y, neighbours) in nodes {
		graph.insert(
			id.to_string(),
			Node {
				connections: neighbours.iter().map(|n| n.to_string()).collect(),
				position: Some(Position::new(x, y)),
				hue: 120.0,
				..Node::default()
			},
		);
	}
	graph
}
