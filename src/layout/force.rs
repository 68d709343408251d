use std::collections::HashMap;

use force_graph::{EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::{Direction, hierarchical};
use crate::config::LayoutConfig;
use crate::network::{LaidOutNetwork, Network, NodeKind};

/// World units per simulation unit; the simulation is tuned for small nodes.
const SCALE: f64 = 20.0;
const TICK: f32 = 0.016;

/// Relaxes the hierarchical layout with a force simulation.
///
/// START and END stay pinned where the hierarchical layout put them.
pub fn force_directed(network: Network, config: &LayoutConfig) -> LaidOutNetwork {
	let seeded = hierarchical(network, Direction::LeftToRight, config);
	if seeded.network.nodes.len() < 2 {
		return seeded;
	}

	let mut graph: ForceGraph<usize, ()> = ForceGraph::new(SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	});
	let mut indices = HashMap::new();
	for (idx, (node, placement)) in seeded
		.network
		.nodes
		.iter()
		.zip(&seeded.placements)
		.enumerate()
	{
		let (cx, cy) = placement.center();
		let node_idx = graph.add_node(NodeData {
			x: (cx / SCALE) as f32,
			y: (cy / SCALE) as f32,
			mass: 10.0,
			is_anchor: node.kind != NodeKind::Task,
			user_data: idx,
		});
		indices.insert(node.id.as_str(), node_idx);
	}
	for edge in &seeded.network.edges {
		if let (Some(&src), Some(&tgt)) = (indices.get(edge.source.as_str()), indices.get(edge.target.as_str())) {
			graph.add_edge(src, tgt, EdgeData::default());
		}
	}

	for _ in 0..config.force_ticks {
		graph.update(TICK);
	}

	let mut placements = seeded.placements.clone();
	graph.visit_nodes(|node| {
		let idx = node.data.user_data;
		if let Some(placement) = placements.get_mut(idx) {
			let (x, y) = (node.x() as f64 * SCALE, node.y() as f64 * SCALE);
			if x.is_finite() && y.is_finite() {
				placement.x = x - placement.width / 2.0;
				placement.y = y - placement.height / 2.0;
			}
		}
	});
	LaidOutNetwork {
		network: seeded.network,
		placements,
	}
}
