//! Activity-on-arrow network: events are nodes, tasks ride on the edges.

use super::{Network, NetworkEdge};
use crate::model::{END, Links, START, ScheduleResult, Task, display_name};

/// Builds the form editor's network from completed links.
///
/// Returns an empty network when there are no links to draw.
pub fn build_event_network(tasks: &[Task], links: &Links, result: &ScheduleResult) -> Network {
	let mut network = Network::default();
	if links.is_empty() {
		return network;
	}
	let critical = result.critical();

	network.ensure_node(START);
	network.ensure_node(END);

	for (target, sources) in links {
		for source in sources {
			let from = source.node_id();
			network.ensure_node(from);
			network.ensure_node(target);

			let label = match tasks.iter().find(|task| &task.name == target) {
				Some(task) => vec![
					target.clone(),
					format!("({}j)", task.duration),
					format!("Marge: {}", result.slack_for(target)),
				],
				None => vec![target.clone()],
			};
			network.edges.push(NetworkEdge::new(
				from,
				target,
				label,
				critical.is_critical_edge(from, target),
			));
		}
	}

	for node in &mut network.nodes {
		node.label = event_label(&node.id, result);
		node.critical = critical.contains(&node.id);
	}
	network
}

fn event_label(node_id: &str, result: &ScheduleResult) -> Vec<String> {
	vec![
		display_name(node_id).to_string(),
		format!("Tôt: {}", result.earliest_for(node_id)),
		format!("Tard: {}", result.latest_for(node_id)),
	]
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::Predecessor;
	use crate::network::links::complete_links;

	fn node_ids(network: &Network) -> Vec<&str> {
		network.nodes.iter().map(|node| node.id.as_str()).collect()
	}

	fn tasks() -> Vec<Task> {
		vec![
			Task::new("A", 3).with_successors(["B"]),
			Task::new("B", 2).with_predecessors(["A"]),
		]
	}

	fn result() -> ScheduleResult {
		ScheduleResult {
			earliest: [("debut", 0), ("A", 0), ("B", 3), ("fin", 5)]
				.into_iter()
				.map(|(k, v)| (k.to_string(), v))
				.collect(),
			latest: [("A", 0), ("B", 3), ("fin", 5)]
				.into_iter()
				.map(|(k, v)| (k.to_string(), v))
				.collect(),
			slack: [("A", 0), ("B", 0)]
				.into_iter()
				.map(|(k, v)| (k.to_string(), v))
				.collect(),
			critical_path: vec!["Début".into(), "A".into(), "B".into(), "fin".into()],
		}
	}

	fn links() -> Links {
		let mut links = Links::new();
		links.insert("A".into(), vec![Predecessor::Start]);
		links.insert("B".into(), vec![Predecessor::from("A")]);
		complete_links(&tasks(), links)
	}

	#[test]
	fn nodes_start_with_events_then_link_order() {
		let network = build_event_network(&tasks(), &links(), &result());
		assert_eq!(node_ids(&network), vec![START, END, "A", "B"]);
	}

	#[test]
	fn every_link_is_an_edge_and_critical_follows_path() {
		let network = build_event_network(&tasks(), &links(), &result());
		let ids: Vec<_> = network.edges.iter().map(|e| e.id.as_str()).collect();
		assert_eq!(ids, vec!["START-A", "A-B", "B-END"]);
		assert!(network.edges.iter().all(|edge| edge.critical));
	}

	#[test]
	fn labels_carry_duration_slack_and_dates() {
		let network = build_event_network(&tasks(), &links(), &result());
		let edge = network.edges.iter().find(|e| e.id == "A-B").unwrap();
		assert_eq!(edge.label, vec!["B", "(2j)", "Marge: 0"]);

		let end_edge = network.edges.iter().find(|e| e.id == "B-END").unwrap();
		assert_eq!(end_edge.label, vec![END]);

		let end = network.node(END).unwrap();
		assert_eq!(end.label, vec!["FIN", "Tôt: 5", "Tard: 5"]);
		let b = network.node("B").unwrap();
		assert_eq!(b.label, vec!["B", "Tôt: 3", "Tard: 3"]);
	}

	#[test]
	fn empty_links_give_empty_network() {
		let network = build_event_network(&tasks(), &Links::new(), &result());
		assert!(network.nodes.is_empty());
		assert!(network.edges.is_empty());
	}
}
