//! Properties of task deletion, critical edge marking and layouts.

use std::collections::BTreeSet;

use cpm_canvas::config::LayoutConfig;
use cpm_canvas::layout::{Direction, TaskLayout, hierarchical, layered};
use cpm_canvas::model::{END, Links, Predecessor, START, ScheduleResult, Task, TaskList};
use cpm_canvas::network::links::complete_links;
use cpm_canvas::network::{build_event_network, build_task_network};
use proptest::collection::vec;
use proptest::prelude::*;
use proptest::sample::Index;

fn name(i: usize) -> String {
	format!("T{}", i)
}

/// `T0 -> T1 -> ... -> T(n-1)`, each with both dependency lists filled.
fn chain(n: usize) -> Vec<Task> {
	(0..n)
		.map(|i| {
			let preds: Vec<String> = if i == 0 { Vec::new() } else { vec![name(i - 1)] };
			let succs: Vec<String> = if i + 1 == n { Vec::new() } else { vec![name(i + 1)] };
			Task::new(name(i), (i + 1) as u32)
				.with_predecessors(preds)
				.with_successors(succs)
		})
		.collect()
}

/// Random DAG over `T0..T(n-1)` with edges only from lower to higher index.
fn dag() -> impl Strategy<Value = Vec<Task>> {
	(2usize..7).prop_flat_map(|n| vec(any::<bool>(), n * (n - 1) / 2).prop_map(move |bits| dag_tasks(n, &bits)))
}

fn dag_tasks(n: usize, bits: &[bool]) -> Vec<Task> {
	let mut bits = bits.iter().copied();
	let mut edges = Vec::new();
	for i in 0..n {
		for j in (i + 1)..n {
			if bits.next().unwrap_or(false) {
				edges.push((i, j));
			}
		}
	}
	(0..n)
		.map(|k| {
			Task::new(name(k), (k + 1) as u32)
				.with_predecessors(edges.iter().filter(|(_, j)| *j == k).map(|(i, _)| name(*i)))
				.with_successors(edges.iter().filter(|(i, _)| *i == k).map(|(_, j)| name(*j)))
		})
		.collect()
}

/// Links as the backend returns them: `-` for tasks without predecessors.
fn links_for(tasks: &[Task]) -> Links {
	tasks
		.iter()
		.map(|task| {
			let sources = if task.predecessors.is_empty() {
				vec![Predecessor::Start]
			} else {
				task.predecessors.iter().map(|p| Predecessor::Task(p.clone())).collect()
			};
			(task.name.clone(), sources)
		})
		.collect()
}

/// START, the masked tasks in list order, then END when `closed`.
fn critical_subsequence(tasks: &[Task], mask: &[bool], closed: bool) -> Vec<String> {
	let mut path = vec![START.to_string()];
	path.extend(
		tasks
			.iter()
			.zip(mask)
			.filter(|(_, keep)| **keep)
			.map(|(task, _)| task.name.clone()),
	);
	if closed {
		path.push(END.to_string());
	}
	path
}

/// What a dependency list should hold once `removed` is spliced out of it.
fn spliced(original: &[String], removed: &str, replacement: &[String]) -> BTreeSet<String> {
	let mut expected: BTreeSet<String> = original.iter().cloned().collect();
	if expected.remove(removed) {
		expected.extend(replacement.iter().cloned());
	}
	expected
}

fn consecutive(path: &[String], from: &str, to: &str) -> bool {
	path.windows(2).any(|pair| pair[0] == from && pair[1] == to)
}

#[test]
fn single_dependency_gives_one_critical_edge() {
	let tasks = vec![
		Task::new("A", 3).with_successors(["B"]),
		Task::new("B", 2).with_predecessors(["A"]),
	];
	let links: Links = [("B".to_string(), vec![Predecessor::Task("A".into())])]
		.into_iter()
		.collect();
	let result = ScheduleResult {
		critical_path: vec!["A".into(), "B".into()],
		..Default::default()
	};

	let network = build_event_network(&tasks, &links, &result);
	let critical: Vec<(&str, &str)> = network
		.critical_edges()
		.map(|edge| (edge.source.as_str(), edge.target.as_str()))
		.collect();
	assert_eq!(critical, [("A", "B")]);
	assert_eq!(network.edges.iter().filter(|edge| !edge.critical).count(), 0);
}

#[test]
fn end_collects_unreferenced_tasks() {
	let tasks = chain(3);
	let links = complete_links(&tasks, links_for(&tasks));
	assert_eq!(links.get(END), Some(&vec![Predecessor::Task(name(2))]));
}

proptest! {
	#[test]
	fn deleting_splices_dependencies(tasks in dag(), pick in any::<Index>()) {
		let k = pick.index(tasks.len());
		let mut list = TaskList::from_tasks(tasks.clone()).map_err(|e| TestCaseError::fail(e.to_string()))?;
		let removed = list.remove(k).map_err(|e| TestCaseError::fail(e.to_string()))?;

		prop_assert_eq!(list.len(), tasks.len() - 1);
		for task in list.tasks() {
			let original = tasks
				.iter()
				.find(|t| t.name == task.name)
				.ok_or_else(|| TestCaseError::fail("task vanished"))?;
			let preds: BTreeSet<String> = task.predecessors.iter().cloned().collect();
			let succs: BTreeSet<String> = task.successors.iter().cloned().collect();
			prop_assert_eq!(preds.len(), task.predecessors.len());
			prop_assert_eq!(succs.len(), task.successors.len());
			prop_assert_eq!(preds, spliced(&original.predecessors, &removed.name, &removed.predecessors));
			prop_assert_eq!(succs, spliced(&original.successors, &removed.name, &removed.successors));
		}
	}

	#[test]
	fn event_edges_are_critical_iff_consecutive(
		tasks in dag(),
		mask in vec(any::<bool>(), 7),
		closed in any::<bool>(),
	) {
		let links = complete_links(&tasks, links_for(&tasks));
		let path = critical_subsequence(&tasks, &mask, closed);
		let result = ScheduleResult { critical_path: path.clone(), ..Default::default() };

		let network = build_event_network(&tasks, &links, &result);
		let expected_edges: usize = links.values().map(Vec::len).sum();
		prop_assert_eq!(network.edges.len(), expected_edges);
		for edge in &network.edges {
			prop_assert_eq!(edge.critical, consecutive(&path, &edge.source, &edge.target));
		}
	}

	#[test]
	fn task_edges_are_critical_iff_consecutive(
		tasks in dag(),
		mask in vec(any::<bool>(), 7),
		closed in any::<bool>(),
	) {
		let path = critical_subsequence(&tasks, &mask, closed);
		let result = ScheduleResult { critical_path: path.clone(), ..Default::default() };

		let network = build_task_network(&tasks, &result);
		for edge in &network.edges {
			prop_assert_eq!(edge.critical, consecutive(&path, &edge.source, &edge.target));
		}
	}
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(32))]

	#[test]
	fn layouts_are_idempotent(tasks in dag()) {
		let config = LayoutConfig::default();
		let links = complete_links(&tasks, links_for(&tasks));
		let result = ScheduleResult::default();

		let events = build_event_network(&tasks, &links, &result);
		prop_assert_eq!(
			layered(events.clone(), &links, &config),
			layered(events, &links, &config)
		);

		let task_network = build_task_network(&tasks, &result);
		prop_assert_eq!(
			hierarchical(task_network.clone(), Direction::LeftToRight, &config),
			hierarchical(task_network.clone(), Direction::LeftToRight, &config)
		);
		for layout in TaskLayout::ALL {
			prop_assert_eq!(
				layout.apply(task_network.clone(), &config),
				layout.apply(task_network.clone(), &config)
			);
		}
	}
}
