//! Rejection-sampling vertex placement.
//!
//! Every node gets a bounded number of random candidate points; the first one
//! keeping at least two vertex radii to all previously accepted points wins.
//! Nodes that exhaust their attempts stay without a position for this pass.

use std::f64::consts::PI;

use log::debug;
use rand::Rng;

use super::types::{Graph, NodeId, Position};

/// How candidate points are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutStrategy {
	/// Uniform over the canvas area.
	#[default]
	Cartesian,
	/// Around the canvas centre, closer for higher degree.
	Radial,
}

impl LayoutStrategy {
	/// Circle radius used for drawing and for the separation constraint.
	pub fn vertex_radius(self) -> f64 {
		match self {
			Self::Cartesian => 15.0,
			Self::Radial => 11.0,
		}
	}

	pub fn name(self) -> &'static str {
		match self {
			Self::Cartesian => "Cartesian",
			Self::Radial => "Radial",
		}
	}
}

/// Tunables for the placement search.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
	pub cartesian_attempts: u32,
	/// Attempts every radial node gets.
	pub radial_base_attempts: u32,
	/// Extra radial attempts, scaled by how peripheral a node is.
	pub radial_bonus_attempts: u32,
	/// Fraction range of a node's reach its distance from the centre is drawn from.
	pub radial_jitter: (f64, f64),
	/// How far the highest degree nodes are pulled in, as a fraction of the full reach.
	pub radial_core_pull: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			cartesian_attempts: 100,
			radial_base_attempts: 50,
			radial_bonus_attempts: 150,
			radial_jitter: (0.6, 1.0),
			radial_core_pull: 0.85,
		}
	}
}

/// Drawable area in world units at scale 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	pub width: f64,
	pub height: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutReport {
	pub placed: usize,
	pub skipped: usize,
}

struct Slot {
	id: NodeId,
	attempts: u32,
	/// Maximum distance from the centre; unused for Cartesian.
	reach: f64,
}

fn uniform<R: Rng + ?Sized>(rng: &mut R, lower: f64, upper: f64) -> f64 {
	lower + rng.random::<f64>() * (upper - lower)
}

fn plan_slots(
	graph: &Graph,
	strategy: LayoutStrategy,
	config: &LayoutConfig,
	bounds: Bounds,
) -> Vec<Slot> {
	match strategy {
		LayoutStrategy::Cartesian => graph
			.ids()
			.map(|id| Slot {
				id: id.to_string(),
				attempts: config.cartesian_attempts,
				reach: 0.0,
			})
			.collect(),
		LayoutStrategy::Radial => {
			let degrees = graph.degrees();
			let max_degree = degrees.values().copied().max().unwrap_or(0).max(1) as f64;
			let half_extent = bounds.width.min(bounds.height) / 2.0;
			let max_reach = (half_extent - strategy.vertex_radius()).max(0.0);

			let mut by_degree: Vec<(&str, usize)> = degrees.into_iter().collect();
			by_degree.sort_by(|a, b| b.1.cmp(&a.1));

			by_degree
				.into_iter()
				.map(|(id, degree)| {
					let normalized = degree as f64 / max_degree;
					let remoteness = 1.0 - normalized;
					Slot {
						id: id.to_string(),
						attempts: config.radial_base_attempts
							+ (config.radial_bonus_attempts as f64 * remoteness).round() as u32,
						reach: max_reach * (1.0 - config.radial_core_pull * normalized),
					}
				})
				.collect()
		}
	}
}

fn sample<R: Rng + ?Sized>(
	rng: &mut R,
	strategy: LayoutStrategy,
	config: &LayoutConfig,
	bounds: Bounds,
	reach: f64,
) -> Position {
	let radius = strategy.vertex_radius();
	match strategy {
		LayoutStrategy::Cartesian => Position::new(
			uniform(rng, radius, bounds.width - radius),
			uniform(rng, radius, bounds.height - radius),
		),
		LayoutStrategy::Radial => {
			let (low, high) = config.radial_jitter;
			let distance = reach * uniform(rng, low, high);
			let angle = uniform(rng, 0.0, 2.0 * PI);
			Position::new(
				bounds.width / 2.0 + distance * angle.cos(),
				bounds.height / 2.0 + distance * angle.sin(),
			)
		}
	}
}

/// Assigns a fresh position and hue to every node that finds room, clearing
/// all previous positions first.
pub fn place_vertices<R: Rng + ?Sized>(
	graph: &mut Graph,
	strategy: LayoutStrategy,
	config: &LayoutConfig,
	bounds: Bounds,
	rng: &mut R,
) -> LayoutReport {
	graph.clear_layout();
	let min_gap = 2.0 * strategy.vertex_radius();
	let min_gap_sq = min_gap * min_gap;

	let slots = plan_slots(graph, strategy, config, bounds);
	let mut accepted: Vec<Position> = Vec::with_capacity(slots.len());
	let mut report = LayoutReport::default();

	for slot in slots {
		let mut found = None;
		for _ in 0..slot.attempts {
			let candidate = sample(rng, strategy, config, bounds, slot.reach);
			if accepted.iter().all(|p| p.distance_squared(candidate) >= min_gap_sq) {
				found = Some(candidate);
				break;
			}
		}

		let Some(position) = found else {
			report.skipped += 1;
			continue;
		};
		accepted.push(position);
		if let Some(node) = graph.get_mut(&slot.id) {
			node.position = Some(position);
			node.hue = rng.random::<f64>() * 360.0;
		}
		report.placed += 1;
	}

	debug!(
		"{} layout: placed {} of {} nodes ({} skipped)",
		strategy.name(),
		report.placed,
		report.placed + report.skipped,
		report.skipped
	);
	report
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;

	const CANVAS: Bounds = Bounds {
		width: 1200.0,
		height: 800.0,
	};

	fn ring(n: usize) -> Graph {
		let mut graph = Graph::new();
		for i in 0..n {
			graph.insert(format!("n{i}"), Default::default());
		}
		for i in 0..n {
			graph.connect(&format!("n{i}"), &format!("n{}", (i + 1) % n));
		}
		graph
	}

	fn star(leaves: usize) -> Graph {
		let mut graph = Graph::new();
		graph.insert("hub".into(), Default::default());
		for i in 0..leaves {
			graph.insert(format!("leaf{i}"), Default::default());
			graph.connect("hub", &format!("leaf{i}"));
		}
		graph
	}

	fn assert_separated(graph: &Graph, radius: f64) {
		let placed: Vec<Position> = graph.iter().filter_map(|(_, n)| n.position).collect();
		for (i, a) in placed.iter().enumerate() {
			for b in &placed[i + 1..] {
				assert!(a.distance_squared(*b).sqrt() >= 2.0 * radius - 1e-9);
			}
		}
	}

	#[test]
	fn cartesian_points_are_separated_and_inside() {
		let mut rng = StdRng::seed_from_u64(7);
		let mut graph = ring(60);
		let report = place_vertices(
			&mut graph,
			LayoutStrategy::Cartesian,
			&LayoutConfig::default(),
			CANVAS,
			&mut rng,
		);
		assert_eq!(report.placed + report.skipped, 60);

		let radius = LayoutStrategy::Cartesian.vertex_radius();
		assert_separated(&graph, radius);
		for (_, node) in graph.iter() {
			if let Some(p) = node.position {
				assert!(p.x >= radius && p.x <= CANVAS.width - radius);
				assert!(p.y >= radius && p.y <= CANVAS.height - radius);
				assert!((0.0..360.0).contains(&node.hue));
			}
		}
	}

	#[test]
	fn radial_points_are_separated() {
		let mut rng = StdRng::seed_from_u64(11);
		let mut graph = ring(40);
		graph.connect("n0", "n20");
		place_vertices(
			&mut graph,
			LayoutStrategy::Radial,
			&LayoutConfig::default(),
			CANVAS,
			&mut rng,
		);
		assert_separated(&graph, LayoutStrategy::Radial.vertex_radius());
	}

	#[test]
	fn radial_pulls_hubs_towards_centre() {
		let mut rng = StdRng::seed_from_u64(3);
		let mut graph = star(8);
		place_vertices(
			&mut graph,
			LayoutStrategy::Radial,
			&LayoutConfig::default(),
			CANVAS,
			&mut rng,
		);

		let centre = Position::new(CANVAS.width / 2.0, CANVAS.height / 2.0);
		let hub = graph.position("hub").map(|p| p.distance_squared(centre)).unwrap();
		for (id, node) in graph.iter().filter(|(id, _)| *id != "hub") {
			if let Some(p) = node.position {
				assert!(p.distance_squared(centre) > hub, "{id} closer than the hub");
			}
		}
	}

	#[test]
	fn exhausted_nodes_are_left_unplaced() {
		let mut rng = StdRng::seed_from_u64(1);
		let mut graph = ring(12);
		let tiny = Bounds {
			width: 10.0,
			height: 10.0,
		};
		let report = place_vertices(
			&mut graph,
			LayoutStrategy::Cartesian,
			&LayoutConfig::default(),
			tiny,
			&mut rng,
		);
		assert_eq!(report, LayoutReport { placed: 1, skipped: 11 });
		assert_eq!(graph.iter().filter(|(_, n)| n.position.is_none()).count(), 11);
	}

	#[test]
	fn replacing_clears_stale_positions() {
		let mut rng = StdRng::seed_from_u64(5);
		let mut graph = ring(12);
		place_vertices(
			&mut graph,
			LayoutStrategy::Cartesian,
			&LayoutConfig::default(),
			CANVAS,
			&mut rng,
		);
		let config = LayoutConfig {
			cartesian_attempts: 0,
			..LayoutConfig::default()
		};
		let report =
			place_vertices(&mut graph, LayoutStrategy::Cartesian, &config, CANVAS, &mut rng);
		assert_eq!(report.placed, 0);
		assert!(graph.iter().all(|(_, n)| n.position.is_none()));
	}
}
