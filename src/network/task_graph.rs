//! Task-on-node network used by the graph editor.

use super::{Network, NetworkEdge, NetworkNode, NodeKind};
use crate::model::{END, START, ScheduleResult, Task, display_name};

const MISSING: &str = "-";

/// Builds nodes for every task plus the two events, and edges along successor lists.
///
/// `tasks` must already carry predecessors derived from successors.
pub fn build_task_network(tasks: &[Task], result: &ScheduleResult) -> Network {
	let critical = result.critical();
	let mut network = Network::default();

	for event in [START, END] {
		network.nodes.push(NetworkNode {
			id: event.to_string(),
			kind: NodeKind::of(event),
			label: vec![display_name(event).to_string()],
			critical: false,
		});
	}

	for task in tasks {
		let earliest = result
			.earliest
			.get(&task.name)
			.map_or_else(|| MISSING.to_string(), i64::to_string);
		let successor_latest = task
			.successors
			.iter()
			.filter_map(|succ| result.latest.get(succ).copied())
			.min()
			.map_or_else(|| MISSING.to_string(), |date| date.to_string());
		network.nodes.push(NetworkNode {
			id: task.name.clone(),
			kind: NodeKind::Task,
			label: vec![format!("{earliest}    {successor_latest}"), task.name.clone()],
			critical: critical.contains(&task.name),
		});
	}

	for task in tasks {
		for succ in &task.successors {
			let Some(target) = tasks.iter().find(|t| &t.name == succ) else {
				continue;
			};
			network.edges.push(NetworkEdge::new(
				&task.name,
				succ,
				vec![format!("{} ({})", succ, target.duration)],
				critical.is_critical_edge(&task.name, succ),
			));
		}
	}

	for task in tasks.iter().filter(|task| task.predecessors.is_empty()) {
		network.edges.push(NetworkEdge::new(
			START,
			&task.name,
			Vec::new(),
			critical.is_critical_edge(START, &task.name),
		));
	}

	for task in tasks.iter().filter(|task| task.successors.is_empty()) {
		network.edges.push(NetworkEdge::new(
			&task.name,
			END,
			Vec::new(),
			critical.is_critical_edge(&task.name, END),
		));
	}

	network
}

/// One line of the summary table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryRow {
	pub name: String,
	pub duration: u32,
	pub successors: String,
	pub earliest: Option<i64>,
	pub latest: Option<i64>,
	pub slack: Option<i64>,
}

pub fn summary_rows(tasks: &[Task], result: &ScheduleResult) -> Vec<SummaryRow> {
	tasks
		.iter()
		.map(|task| SummaryRow {
			name: task.name.clone(),
			duration: task.duration,
			successors: if task.successors.is_empty() {
				MISSING.to_string()
			} else {
				task.successors.join(", ")
			},
			earliest: result.earliest.get(&task.name).copied(),
			latest: result.latest.get(&task.name).copied(),
			slack: result.slack.get(&task.name).copied(),
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::TaskList;

	fn diamond() -> Vec<Task> {
		TaskList::from_tasks(vec![
			Task::new("A", 2).with_successors(["B", "C"]),
			Task::new("B", 5).with_successors(["D"]),
			Task::new("C", 1).with_successors(["D", "GHOST"]),
			Task::new("D", 3),
		])
		.unwrap()
		.with_predecessors_from_successors()
		.tasks()
		.to_vec()
	}

	fn result() -> ScheduleResult {
		let map = |pairs: &[(&str, i64)]| pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect();
		ScheduleResult {
			earliest: map(&[("A", 0), ("B", 2), ("C", 2), ("D", 7)]),
			latest: map(&[("A", 0), ("B", 2), ("C", 6), ("D", 7)]),
			slack: map(&[("A", 0), ("B", 0), ("C", 4), ("D", 0)]),
			critical_path: vec!["A".into(), "B".into(), "D".into()],
		}
	}

	#[test]
	fn edges_follow_successors_and_events() {
		let network = build_task_network(&diamond(), &result());
		let ids: Vec<_> = network.edges.iter().map(|e| e.id.as_str()).collect();
		assert_eq!(ids, vec!["A-B", "A-C", "B-D", "C-D", "START-A", "D-END"]);
	}

	#[test]
	fn critical_edges_are_consecutive_pairs_only() {
		let network = build_task_network(&diamond(), &result());
		let critical: Vec<_> = network.critical_edges().map(|e| e.id.as_str()).collect();
		assert_eq!(critical, vec!["A-B", "B-D"]);
		assert!(network.node("C").is_some_and(|n| !n.critical));
		assert!(network.node("D").is_some_and(|n| n.critical));
	}

	#[test]
	fn node_label_shows_earliest_and_tightest_successor_deadline() {
		let network = build_task_network(&diamond(), &result());
		assert_eq!(network.node("A").unwrap().label, vec!["0    2", "A"]);
		assert_eq!(network.node("D").unwrap().label, vec!["7    -", "D"]);
		let edge = network.edges.iter().find(|e| e.id == "A-C").unwrap();
		assert_eq!(edge.label, vec!["C (1)"]);
	}

	#[test]
	fn summary_has_one_row_per_task() {
		let rows = summary_rows(&diamond(), &result());
		assert_eq!(rows.len(), 4);
		assert_eq!(rows[2].successors, "D, GHOST");
		assert_eq!(rows[2].slack, Some(4));
		assert_eq!(rows[3].successors, "-");
	}
}
