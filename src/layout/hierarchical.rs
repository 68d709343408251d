use std::collections::BTreeMap;

use petgraph::Direction::Incoming;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};

use super::Direction;
use crate::config::LayoutConfig;
use crate::network::{LaidOutNetwork, Network, Placement};

/// Node indices of `network` mirrored into a petgraph graph.
fn to_graph(network: &Network) -> DiGraph<usize, ()> {
	let mut graph = DiGraph::with_capacity(network.nodes.len(), network.edges.len());
	for idx in 0..network.nodes.len() {
		graph.add_node(idx);
	}
	for edge in &network.edges {
		if let (Some(src), Some(tgt)) = (network.index_of(&edge.source), network.index_of(&edge.target)) {
			graph.add_edge(NodeIndex::new(src), NodeIndex::new(tgt), ());
		}
	}
	graph
}

/// Longest-path rank of every node.
///
/// Cyclic graphs are relaxed edge by edge, capped at the node count.
pub fn ranks(network: &Network) -> Vec<usize> {
	let graph = to_graph(network);
	let count = graph.node_count();
	let mut rank = vec![0usize; count];

	match toposort(&graph, None) {
		Ok(order) => {
			for node in order {
				let best = graph
					.neighbors_directed(node, Incoming)
					.map(|pred| rank[pred.index()] + 1)
					.max()
					.unwrap_or(0);
				rank[node.index()] = best;
			}
		}
		Err(_) => {
			for _ in 0..count {
				let mut changed = false;
				for edge in graph.raw_edges() {
					let (src, tgt) = (edge.source().index(), edge.target().index());
					let candidate = (rank[src] + 1).min(count.saturating_sub(1));
					if candidate > rank[tgt] {
						rank[tgt] = candidate;
						changed = true;
					}
				}
				if !changed {
					break;
				}
			}
		}
	}
	rank
}

/// Orders nodes inside each rank by the mean slot of their predecessors.
fn order_ranks(network: &Network, rank: &[usize]) -> BTreeMap<usize, Vec<usize>> {
	let graph = to_graph(network);
	let mut by_rank: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
	for (idx, r) in rank.iter().enumerate() {
		by_rank.entry(*r).or_default().push(idx);
	}

	let mut slot = vec![0usize; rank.len()];
	for members in by_rank.values_mut() {
		let barycenter = |idx: usize| {
			let preds: Vec<f64> = graph
				.neighbors_directed(NodeIndex::new(idx), Incoming)
				.filter(|pred| rank[pred.index()] < rank[idx])
				.map(|pred| slot[pred.index()] as f64)
				.collect();
			if preds.is_empty() {
				idx as f64
			} else {
				preds.iter().sum::<f64>() / preds.len() as f64
			}
		};
		let mut keyed: Vec<(f64, usize)> = members.iter().map(|&idx| (barycenter(idx), idx)).collect();
		keyed.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
		*members = keyed.into_iter().map(|(_, idx)| idx).collect();
		for (pos, &idx) in members.iter().enumerate() {
			slot[idx] = pos;
		}
	}
	by_rank
}

/// Ranked layout with each rank centred on the main axis.
pub fn hierarchical(network: Network, direction: Direction, config: &LayoutConfig) -> LaidOutNetwork {
	let rank = ranks(&network);
	let ordered = order_ranks(&network, &rank);
	let (width, height) = config.task_node_size;

	let mut placements = vec![Placement::default(); network.nodes.len()];
	for (r, members) in &ordered {
		let span = members.len() as f64 - 1.0;
		for (pos, &idx) in members.iter().enumerate() {
			let offset = pos as f64 - span / 2.0;
			let (cx, cy) = match direction {
				Direction::TopToBottom => (
					offset * (width + config.node_separation),
					*r as f64 * (height + config.rank_separation),
				),
				Direction::LeftToRight => (
					*r as f64 * (width + config.rank_separation),
					offset * (height + config.node_separation),
				),
			};
			placements[idx] = Placement {
				x: cx - width / 2.0,
				y: cy - height / 2.0,
				width,
				height,
			};
		}
	}
	LaidOutNetwork {
		network,
		placements,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::{END, START, ScheduleResult, Task, TaskList};
	use crate::network::build_task_network;

	fn network() -> Network {
		let tasks = TaskList::from_tasks(vec![
			Task::new("A", 2).with_successors(["B", "C"]),
			Task::new("B", 5).with_successors(["D"]),
			Task::new("C", 1).with_successors(["D"]),
			Task::new("D", 3),
		])
		.unwrap()
		.with_predecessors_from_successors();
		build_task_network(tasks.tasks(), &ScheduleResult::default())
	}

	#[test]
	fn ranks_are_longest_paths() {
		let network = network();
		let rank = ranks(&network);
		let of = |id: &str| rank[network.index_of(id).unwrap()];
		assert_eq!(of(START), 0);
		assert_eq!(of("A"), 1);
		assert_eq!(of("B"), 2);
		assert_eq!(of("C"), 2);
		assert_eq!(of("D"), 3);
		assert_eq!(of(END), 4);
	}

	#[test]
	fn cyclic_ranks_terminate() {
		let tasks = vec![
			Task::new("X", 1).with_successors(["Y"]).with_predecessors(["Y"]),
			Task::new("Y", 1).with_successors(["X"]).with_predecessors(["X"]),
		];
		let network = build_task_network(&tasks, &ScheduleResult::default());
		let rank = ranks(&network);
		assert!(rank.iter().all(|r| *r < network.nodes.len()));
	}

	#[test]
	fn direction_swaps_axes() {
		let config = LayoutConfig::default();
		let tb = hierarchical(network(), Direction::TopToBottom, &config);
		let lr = hierarchical(network(), Direction::LeftToRight, &config);

		let a_tb = tb.placement_of("A").unwrap().center();
		let d_tb = tb.placement_of("D").unwrap().center();
		assert!(d_tb.1 > a_tb.1);
		assert_eq!(a_tb.0, d_tb.0);

		let a_lr = lr.placement_of("A").unwrap().center();
		let d_lr = lr.placement_of("D").unwrap().center();
		assert!(d_lr.0 > a_lr.0);
		assert_eq!(a_lr.1, d_lr.1);
	}

	#[test]
	fn siblings_do_not_overlap() {
		let laid_out = hierarchical(network(), Direction::TopToBottom, &LayoutConfig::default());
		let b = laid_out.placement_of("B").unwrap();
		let c = laid_out.placement_of("C").unwrap();
		assert_eq!(b.y, c.y);
		assert!((b.x - c.x).abs() >= b.width);
	}

	#[test]
	fn layout_is_idempotent() {
		let config = LayoutConfig::default();
		assert_eq!(
			hierarchical(network(), Direction::LeftToRight, &config),
			hierarchical(network(), Direction::LeftToRight, &config)
		);
	}
}
