use crate::model::{END, Links, Predecessor, START, Task};

/// Adds an `END` entry fed by every task that nothing depends on.
pub fn complete_links(tasks: &[Task], mut links: Links) -> Links {
	let sinks: Vec<Predecessor> = tasks
		.iter()
		.filter(|task| task.name != START && task.name != END)
		.filter(|task| {
			!tasks
				.iter()
				.any(|other| other.predecessors.contains(&task.name))
		})
		.map(|task| Predecessor::Task(task.name.clone()))
		.collect();
	if !sinks.is_empty() {
		links.entry(END.to_string()).or_default().extend(sinks);
	}
	links
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sinks_feed_end() {
		let tasks = vec![
			Task::new("A", 1),
			Task::new("B", 1).with_predecessors(["A"]),
			Task::new("C", 1).with_predecessors(["A"]),
		];
		let links = complete_links(&tasks, Links::new());
		assert_eq!(
			links[END],
			vec![Predecessor::from("B"), Predecessor::from("C")]
		);
	}

	#[test]
	fn existing_end_entries_are_kept() {
		let tasks = vec![Task::new("A", 1)];
		let mut links = Links::new();
		links.insert(END.into(), vec![Predecessor::from("Z")]);
		let links = complete_links(&tasks, links);
		assert_eq!(links[END], vec![Predecessor::from("Z"), Predecessor::from("A")]);
	}

	#[test]
	fn nothing_added_without_sinks() {
		let links = complete_links(&[], Links::new());
		assert!(links.is_empty());
	}
}
