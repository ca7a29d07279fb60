//! Built-in datasets, each with a reference path visiting every node once.

use crate::components::graph_canvas::{Graph, GraphData, GraphLink, GraphNode, NodeId};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DataMode {
	Students,
	#[default]
	Groups,
}

impl DataMode {
	pub fn name(self) -> &'static str {
		match self {
			Self::Students => "Students",
			Self::Groups => "Groups",
		}
	}
}

pub struct Dataset {
	pub graph: Graph,
	pub reference_path: Vec<NodeId>,
}

const STUDENTS: &[&str] = &[
	"ada brooks", "ben carter", "chloe diaz", "dev patel", "ella fischer", "finn gallagher",
	"grace huang", "hugo ibarra", "iris jensen", "jack kowalski", "kira lindqvist", "liam murphy",
	"maya nakamura", "noah oduya", "olive park", "priya quinn", "ravi shah", "sara torres",
	"theo ueda", "uma varga", "victor wells", "wren xu", "yara young", "zane zimmer",
	"amir bauer", "bea castillo", "cole dunn", "dina evans", "eli ford", "fay green",
];

const GROUP_COUNT: usize = 24;

/// Simple pseudo-random number generator (deterministic for consistency).
fn rand_simple(seed: usize) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

/// A ring through `nodes` in order, plus one pseudo-random chord per node.
/// The ring order is the reference path.
fn ring_with_chords(nodes: Vec<GraphNode>, salt: usize) -> Dataset {
	let n = nodes.len();
	let mut links: Vec<GraphLink> = (0..n)
		.map(|i| GraphLink {
			source: nodes[i].id.clone(),
			target: nodes[(i + 1) % n].id.clone(),
		})
		.collect();
	links.extend((0..n).filter_map(|i| {
		let target = (rand_simple(i * 31 + salt) * n as f64) as usize % n;
		(target != i).then(|| GraphLink {
			source: nodes[i].id.clone(),
			target: nodes[target].id.clone(),
		})
	}));

	let reference_path = nodes.iter().map(|node| node.id.clone()).collect();
	Dataset {
		graph: Graph::from_data(&GraphData { nodes, links }),
		reference_path,
	}
}

pub fn dataset(mode: DataMode) -> Dataset {
	match mode {
		DataMode::Students => ring_with_chords(
			STUDENTS
				.iter()
				.map(|name| GraphNode {
					id: name.to_string(),
					label: None,
				})
				.collect(),
			7,
		),
		DataMode::Groups => ring_with_chords(
			(1..=GROUP_COUNT)
				.map(|i| GraphNode {
					id: format!("group-{i:02}"),
					label: Some(format!("Group {i}")),
				})
				.collect(),
			13,
		),
	}
}
