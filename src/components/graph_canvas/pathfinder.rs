use std::collections::{HashMap, HashSet, VecDeque};

use super::types::{Graph, NodeId};

/// Unweighted shortest path from `start` to `target`, endpoints included.
///
/// Empty when either id is unknown, when they are equal, or when `target` is
/// unreachable. Ties between equally short paths go to whichever neighbour is
/// discovered first.
pub fn shortest_path(graph: &Graph, start: &str, target: &str) -> Vec<NodeId> {
	if start == target || !graph.contains(start) || !graph.contains(target) {
		return Vec::new();
	}

	let adjacency = graph.adjacency();
	let mut queue = VecDeque::from([start]);
	let mut visited = HashSet::from([start]);
	let mut parent: HashMap<&str, &str> = HashMap::new();

	while let Some(node) = queue.pop_front() {
		if node == target {
			break;
		}
		let Some(neighbours) = adjacency.get(node) else {
			continue;
		};
		for &next in neighbours {
			if visited.insert(next) {
				parent.insert(next, node);
				queue.push_back(next);
			}
		}
	}

	if !visited.contains(target) {
		return Vec::new();
	}

	let mut path = vec![target.to_string()];
	let mut cursor = target;
	while let Some(&prev) = parent.get(cursor) {
		path.push(prev.to_string());
		cursor = prev;
	}
	path.reverse();
	path
}
