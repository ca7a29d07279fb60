use std::collections::BTreeSet;

use super::camera::Camera;
use super::config::CanvasConfig;
use super::painter::Painter;
use super::types::{FILL_LIGHTNESS, Graph, hsl};

/// What a draw call put on the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
	pub edges: usize,
	pub nodes: usize,
}

/// Everything a draw call needs besides the graph.
pub struct Frame<'a> {
	pub camera: &'a Camera,
	pub config: &'a CanvasConfig,
	pub radius: f64,
	pub width: f64,
	pub height: f64,
}

fn begin<P: Painter + ?Sized>(painter: &mut P, frame: &Frame) {
	painter.clear(frame.width, frame.height);
	painter.set_transform(frame.camera);
}

/// Paints the edges accepted by `keep`, each undirected pair once. Edges with
/// an unplaced endpoint are skipped.
fn draw_edges<P, F>(painter: &mut P, graph: &Graph, frame: &Frame, keep: F) -> usize
where
	P: Painter + ?Sized,
	F: Fn(&str, &str) -> bool,
{
	painter.set_stroke(frame.config.edge_color, frame.config.edge_width);
	let mut painted = 0;
	for (a, b) in graph.edges() {
		if !keep(a, b) {
			continue;
		}
		let (Some(from), Some(to)) = (graph.position(a), graph.position(b)) else {
			continue;
		};
		painter.segment(from, to);
		painted += 1;
	}
	painted
}

fn draw_nodes<P, F>(painter: &mut P, graph: &Graph, frame: &Frame, keep: F) -> usize
where
	P: Painter + ?Sized,
	F: Fn(&str) -> bool,
{
	let mut painted = 0;
	for (id, node) in graph.iter() {
		let Some(center) = node.position else {
			continue;
		};
		if !keep(id) {
			continue;
		}
		painter.fill_circle(center, frame.radius, &hsl(node.hue, FILL_LIGHTNESS));
		painted += 1;
	}
	painted
}

/// Clears the canvas and paints every edge, then every placed node on top.
pub fn draw_graph<P: Painter + ?Sized>(
	painter: &mut P,
	graph: &Graph,
	frame: &Frame,
) -> RenderStats {
	begin(painter, frame);
	RenderStats {
		edges: draw_edges(painter, graph, frame, |_, _| true),
		nodes: draw_nodes(painter, graph, frame, |_| true),
	}
}

/// Clears the canvas and paints only `focus`, its direct neighbours and the
/// edges touching `focus`, outlining the focal node.
pub fn draw_neighborhood<P: Painter + ?Sized>(
	painter: &mut P,
	graph: &Graph,
	frame: &Frame,
	focus: &str,
) -> RenderStats {
	begin(painter, frame);
	let adjacency = graph.adjacency();
	let Some(neighbours) = adjacency.get(focus) else {
		return RenderStats::default();
	};
	let shown: BTreeSet<&str> = neighbours.iter().copied().chain([focus]).collect();

	let stats = RenderStats {
		edges: draw_edges(painter, graph, frame, |a, b| a == focus || b == focus),
		nodes: draw_nodes(painter, graph, frame, |id| shown.contains(id)),
	};
	if let Some(center) = graph.position(focus) {
		painter.stroke_circle(
			center,
			frame.radius,
			frame.config.focus_outline_color,
			frame.config.focus_outline_width / frame.camera.scale,
		);
	}
	stats
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::graph_canvas::test_support::{PaintOp, RecordingPainter, placed_graph};
	use crate::components::graph_canvas::types::Position;

	fn frame<'a>(camera: &'a Camera, config: &'a CanvasConfig) -> Frame<'a> {
		Frame {
			camera,
			config,
			radius: 15.0,
			width: 1000.0,
			height: 700.0,
		}
	}

	fn triangle_with_tail() -> Graph {
		placed_graph(&[
			("a", 100.0, 100.0, &["b", "c"]),
			("b", 200.0, 100.0, &["a", "c"]),
			("c", 150.0, 200.0, &["a", "b", "d"]),
			("d", 300.0, 300.0, &["c"]),
		])
	}

	#[test]
	fn each_undirected_edge_painted_once() {
		let graph = triangle_with_tail();
		let (camera, config) = (Camera::default(), CanvasConfig::default());
		let mut painter = RecordingPainter::default();
		let stats = draw_graph(&mut painter, &graph, &frame(&camera, &config));

		let connection_entries: usize = graph.iter().map(|(_, n)| n.connections.len()).sum();
		assert_eq!(connection_entries, 8);
		assert_eq!(stats, RenderStats { edges: 4, nodes: 4 });
		assert_eq!(painter.segments().len(), 4);
		assert_eq!(painter.circles(), 4);
	}

	#[test]
	fn draw_starts_with_clear_and_camera() {
		let graph = triangle_with_tail();
		let mut camera = Camera::default();
		camera.zoom_at(10.0, 10.0, 1.5);
		let config = CanvasConfig::default();
		let mut painter = RecordingPainter::default();
		draw_graph(&mut painter, &graph, &frame(&camera, &config));
		assert_eq!(painter.ops[0], PaintOp::Clear);
		assert_eq!(painter.ops[1], PaintOp::Transform(camera));
	}

	#[test]
	fn unplaced_nodes_and_their_edges_are_skipped() {
		let mut graph = triangle_with_tail();
		if let Some(node) = graph.get_mut("d") {
			node.position = None;
		}
		let (camera, config) = (Camera::default(), CanvasConfig::default());
		let mut painter = RecordingPainter::default();
		let stats = draw_graph(&mut painter, &graph, &frame(&camera, &config));
		assert_eq!(stats, RenderStats { edges: 3, nodes: 3 });
	}

	#[test]
	fn neighborhood_shows_focus_and_neighbours_only() {
		let graph = triangle_with_tail();
		let (camera, config) = (Camera::default(), CanvasConfig::default());
		let mut painter = RecordingPainter::default();
		let stats = draw_neighborhood(&mut painter, &graph, &frame(&camera, &config), "d");

		assert_eq!(stats, RenderStats { edges: 1, nodes: 2 });
		assert_eq!(
			painter.segments(),
			vec![(Position::new(150.0, 200.0), Position::new(300.0, 300.0))]
		);
		assert!(painter.ops.contains(&PaintOp::StrokeCircle {
			center: Position::new(300.0, 300.0),
			color: config.focus_outline_color.to_string(),
		}));
	}

	#[test]
	fn neighborhood_of_hub_skips_edges_between_neighbours() {
		let graph = triangle_with_tail();
		let (camera, config) = (Camera::default(), CanvasConfig::default());
		let mut painter = RecordingPainter::default();
		let stats = draw_neighborhood(&mut painter, &graph, &frame(&camera, &config), "c");
		assert_eq!(stats, RenderStats { edges: 3, nodes: 4 });
	}

	#[test]
	fn unknown_focus_paints_nothing() {
		let graph = triangle_with_tail();
		let (camera, config) = (Camera::default(), CanvasConfig::default());
		let mut painter = RecordingPainter::default();
		let stats = draw_neighborhood(&mut painter, &graph, &frame(&camera, &config), "zzz");
		assert_eq!(stats, RenderStats::default());
		assert!(painter.segments().is_empty());
	}
}
