use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Key of a node within a [`Graph`].
pub type NodeId = String;

/// Saturation shared by every node colour.
const SATURATION: u8 = 60;
/// Lightness of a node's filled circle.
pub const FILL_LIGHTNESS: u8 = 48;
/// Lightness of accents derived from a node's hue (tooltip border).
pub const ACCENT_LIGHTNESS: u8 = 68;

/// CSS colour for `hue` at the shared saturation and the given lightness.
pub fn hsl(hue: f64, lightness: u8) -> String {
	format!("hsl({hue:.2}, {SATURATION}%, {lightness}%)")
}

/// Capitalises the first letter of every space separated word and lowercases the rest.
pub fn title_case(text: &str) -> String {
	if text.trim().is_empty() {
		return text.to_string();
	}
	text.split(' ')
		.map(|word| {
			let mut chars = word.chars();
			match chars.next() {
				Some(first) => first
					.to_uppercase()
					.chain(chars.flat_map(char::to_lowercase))
					.collect::<String>(),
				None => String::new(),
			}
		})
		.collect::<Vec<String>>()
		.join(" ")
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
	pub x: f64,
	pub y: f64,
}

impl Position {
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn distance_squared(self, other: Position) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		dx * dx + dy * dy
	}
}

#[derive(Clone, Debug, Default)]
pub struct Node {
	pub label: Option<String>,
	/// Neighbour ids. Expected to be symmetric but not enforced.
	pub connections: BTreeSet<NodeId>,
	/// World-space centre, assigned by the layout pass.
	pub position: Option<Position>,
	/// Colour identity in degrees, assigned together with `position`.
	pub hue: f64,
}

impl Node {
	pub fn with_label(label: impl Into<String>) -> Self {
		Self {
			label: Some(label.into()),
			..Self::default()
		}
	}

	/// Label shown to the user, falling back to the title-cased id.
	pub fn display_label(&self, id: &str) -> String {
		self.label.clone().unwrap_or_else(|| title_case(id))
	}
}

/// Raw node description handed over by a dataset provider.
#[derive(Clone, Debug)]
pub struct GraphNode {
	pub id: String,
	pub label: Option<String>,
}

/// Raw undirected link description handed over by a dataset provider.
#[derive(Clone, Debug)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
}

#[derive(Clone, Debug, Default)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

/// Node-id keyed graph whose edges are derived from the per-node connection sets.
#[derive(Clone, Debug, Default)]
pub struct Graph {
	nodes: BTreeMap<NodeId, Node>,
}

impl Graph {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a graph from a node/link listing. Links naming unknown nodes are dropped.
	pub fn from_data(data: &GraphData) -> Self {
		let mut graph = Self::new();
		for node in &data.nodes {
			graph.insert(
				node.id.clone(),
				Node {
					label: node.label.clone(),
					..Node::default()
				},
			);
		}
		for link in &data.links {
			graph.connect(&link.source, &link.target);
		}
		graph
	}

	/// Builds a graph from `(id, neighbours)` adjacency lists, taken as given.
	pub fn from_adjacency<'a>(entries: impl IntoIterator<Item = (&'a str, &'a [&'a str])>) -> Self {
		let mut graph = Self::new();
		for (id, neighbours) in entries {
			graph.insert(
				id.to_string(),
				Node {
					connections: neighbours.iter().map(|n| n.to_string()).collect(),
					..Node::default()
				},
			);
		}
		graph
	}

	pub fn insert(&mut self, id: NodeId, node: Node) {
		self.nodes.insert(id, node);
	}

	/// Connects two existing nodes in both directions. Returns false if either is missing.
	pub fn connect(&mut self, a: &str, b: &str) -> bool {
		if a == b || !self.contains(a) || !self.contains(b) {
			return false;
		}
		if let Some(node) = self.nodes.get_mut(a) {
			node.connections.insert(b.to_string());
		}
		if let Some(node) = self.nodes.get_mut(b) {
			node.connections.insert(a.to_string());
		}
		true
	}

	pub fn get(&self, id: &str) -> Option<&Node> {
		self.nodes.get(id)
	}

	pub fn get_mut(&mut self, id: &str) -> Option<&mut Node> {
		self.nodes.get_mut(id)
	}

	pub fn contains(&self, id: &str) -> bool {
		self.nodes.contains_key(id)
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
		self.nodes.iter().map(|(id, node)| (id.as_str(), node))
	}

	pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Node)> {
		self.nodes.iter_mut().map(|(id, node)| (id.as_str(), node))
	}

	/// Node ids in sorted order.
	pub fn ids(&self) -> impl Iterator<Item = &str> {
		self.nodes.keys().map(String::as_str)
	}

	pub fn position(&self, id: &str) -> Option<Position> {
		self.nodes.get(id).and_then(|node| node.position)
	}

	/// Drops every assigned position so a fresh layout pass starts empty.
	pub fn clear_layout(&mut self) {
		for node in self.nodes.values_mut() {
			node.position = None;
		}
	}

	/// Undirected adjacency: the union of both directions of every connection
	/// that names a node present in the graph.
	pub fn adjacency(&self) -> BTreeMap<&str, BTreeSet<&str>> {
		let mut adjacency: BTreeMap<&str, BTreeSet<&str>> =
			self.ids().map(|id| (id, BTreeSet::new())).collect();
		for (id, node) in self.iter() {
			for other in &node.connections {
				let Some((other, _)) = self.nodes.get_key_value(other.as_str()) else {
					continue;
				};
				if other.as_str() == id {
					continue;
				}
				adjacency.entry(id).or_default().insert(other.as_str());
				adjacency.entry(other.as_str()).or_default().insert(id);
			}
		}
		adjacency
	}

	/// Number of distinct neighbours of every node.
	pub fn degrees(&self) -> BTreeMap<&str, usize> {
		self.adjacency()
			.into_iter()
			.map(|(id, neighbours)| (id, neighbours.len()))
			.collect()
	}

	/// Every undirected edge exactly once, in connection order. A pair is skipped
	/// when its reverse was already emitted.
	pub fn edges(&self) -> Vec<(&str, &str)> {
		let mut painted: HashSet<(&str, &str)> = HashSet::new();
		let mut edges = Vec::new();
		for (id, node) in self.iter() {
			for other in &node.connections {
				let Some((other, _)) = self.nodes.get_key_value(other.as_str()) else {
					continue;
				};
				let other = other.as_str();
				if other == id || painted.contains(&(other, id)) || painted.contains(&(id, other)) {
					continue;
				}
				painted.insert((id, other));
				edges.push((id, other));
			}
		}
		edges
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn symmetric_connections_yield_one_edge_per_pair() {
		let graph = Graph::from_adjacency([
			("a", &["b", "c"][..]),
			("b", &["a", "c"][..]),
			("c", &["a", "b"][..]),
		]);
		assert_eq!(graph.edges().len(), 3);
	}

	#[test]
	fn one_sided_connection_still_counts_as_an_edge() {
		let graph = Graph::from_adjacency([("a", &["b"][..]), ("b", &[][..])]);
		assert_eq!(graph.edges(), vec![("a", "b")]);
		assert_eq!(graph.degrees()["b"], 1);
	}

	#[test]
	fn dangling_connections_are_ignored() {
		let graph = Graph::from_adjacency([("a", &["ghost"][..])]);
		assert!(graph.edges().is_empty());
		assert_eq!(graph.degrees()["a"], 0);
	}

	#[test]
	fn from_data_links_both_directions() {
		let data = GraphData {
			nodes: vec![
				GraphNode {
					id: "x".into(),
					label: Some("Ex".into()),
				},
				GraphNode {
					id: "y".into(),
					label: None,
				},
			],
			links: vec![
				GraphLink {
					source: "x".into(),
					target: "y".into(),
				},
				GraphLink {
					source: "x".into(),
					target: "missing".into(),
				},
			],
		};
		let graph = Graph::from_data(&data);
		assert!(graph.get("y").is_some_and(|n| n.connections.contains("x")));
		assert_eq!(graph.get("x").map(|n| n.connections.len()), Some(1));
	}

	#[test]
	fn title_case_words() {
		assert_eq!(title_case("aLICE smith"), "Alice Smith");
		assert_eq!(title_case("  "), "  ");
		assert_eq!(Node::default().display_label("bob"), "Bob");
		assert_eq!(Node::with_label("B.").display_label("bob"), "B.");
	}
}
