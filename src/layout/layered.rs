use std::collections::HashSet;

use log::debug;

use crate::config::LayoutConfig;
use crate::model::{END, Links, START};
use crate::network::{LaidOutNetwork, Network, Placement};

/// Groups node indices into layers.
///
/// Layer 0 is `START`. Each following layer holds the unprocessed nodes
/// (END excepted) whose prerequisites in `links` are all processed or the
/// start sentinel. When nothing qualifies, END gets its own layer. Nodes
/// never reached (cycles, dangling ids) share one trailing layer.
pub fn layers(network: &Network, links: &Links) -> Vec<Vec<usize>> {
	let mut layers: Vec<Vec<usize>> = Vec::new();
	let mut processed: HashSet<&str> = HashSet::new();

	if let Some(start) = network.index_of(START) {
		layers.push(vec![start]);
		processed.insert(START);
	}

	while processed.len() < network.nodes.len() {
		let mut next: Vec<usize> = network
			.nodes
			.iter()
			.enumerate()
			.filter(|(_, node)| node.id != END && !processed.contains(node.id.as_str()))
			.filter(|(_, node)| {
				links.get(&node.id).is_none_or(|prereqs| {
					prereqs
						.iter()
						.all(|pred| pred.is_start() || processed.contains(pred.node_id()))
				})
			})
			.map(|(idx, _)| idx)
			.collect();

		if next.is_empty() && !processed.contains(END) {
			next.extend(network.index_of(END));
		}
		if next.is_empty() {
			break;
		}
		for &idx in &next {
			processed.insert(network.nodes[idx].id.as_str());
		}
		layers.push(next);
	}

	let unplaced: Vec<usize> = network
		.nodes
		.iter()
		.enumerate()
		.filter(|(_, node)| !processed.contains(node.id.as_str()))
		.map(|(idx, _)| idx)
		.collect();
	if !unplaced.is_empty() {
		layers.push(unplaced);
	}
	layers
}

/// Places each layer on a column, slots top to bottom.
pub fn layered(network: Network, links: &Links, config: &LayoutConfig) -> LaidOutNetwork {
	let layers = layers(&network, links);
	debug!(
		"Generated layers: {:?}",
		layers
			.iter()
			.map(|layer| layer.iter().map(|&i| network.nodes[i].id.as_str()).collect::<Vec<_>>())
			.collect::<Vec<_>>()
	);

	let (width, height) = config.event_node_size;
	let mut placements = vec![Placement::default(); network.nodes.len()];
	for (layer_idx, layer) in layers.iter().enumerate() {
		for (slot, &node_idx) in layer.iter().enumerate() {
			placements[node_idx] = Placement {
				x: layer_idx as f64 * config.layer_spacing + config.origin,
				y: slot as f64 * config.slot_spacing + config.origin,
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
