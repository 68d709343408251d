use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{END, START, normalize_event_name};
use crate::error::ValidationError;

/// One activity of the project, as exchanged with the scheduling service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
	#[serde(rename = "nom")]
	pub name: String,
	#[serde(rename = "duree")]
	pub duration: u32,
	#[serde(rename = "preced", default)]
	pub predecessors: Vec<String>,
	#[serde(rename = "succ", default)]
	pub successors: Vec<String>,
}

impl Task {
	pub fn new(name: impl Into<String>, duration: u32) -> Self {
		Self {
			name: name.into(),
			duration,
			predecessors: Vec::new(),
			successors: Vec::new(),
		}
	}

	pub fn with_predecessors<I, S>(mut self, names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.predecessors = names.into_iter().map(Into::into).collect();
		self
	}

	pub fn with_successors<I, S>(mut self, names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.successors = names.into_iter().map(Into::into).collect();
		self
	}
}

/// How a draft's names are normalized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NameCase {
	#[default]
	Preserve,
	Upper,
}

impl NameCase {
	fn apply(self, name: &str) -> String {
		match self {
			Self::Preserve => name.trim().to_string(),
			Self::Upper => name.trim().to_uppercase(),
		}
	}
}

/// Raw form fields before validation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskDraft {
	pub name: String,
	pub duration: String,
	/// Comma-separated predecessor names.
	pub predecessors: String,
	/// Comma-separated successor names.
	pub successors: String,
}

impl TaskDraft {
	/// Draft preloaded from an existing task, for editing.
	pub fn from_task(task: &Task) -> Self {
		Self {
			name: task.name.clone(),
			duration: task.duration.to_string(),
			predecessors: task.predecessors.join(", "),
			successors: task.successors.join(", "),
		}
	}

	pub fn validate(&self, case: NameCase) -> Result<Task, ValidationError> {
		let name = case.apply(&self.name);
		if name.is_empty() {
			return Err(ValidationError::MissingName);
		}
		if matches!(normalize_event_name(&name), START | END) {
			return Err(ValidationError::ReservedName(name));
		}
		let duration = parse_duration(&self.duration)?;
		Ok(Task {
			name,
			duration,
			predecessors: parse_names(&self.predecessors, case),
			successors: parse_names(&self.successors, case),
		})
	}
}

fn parse_duration(raw: &str) -> Result<u32, ValidationError> {
	match raw.trim().parse::<u32>() {
		Ok(duration) if duration >= 1 => Ok(duration),
		_ => Err(ValidationError::InvalidDuration(raw.trim().to_string())),
	}
}

/// Splits a comma-separated list, dropping blanks and repeats.
pub fn parse_names(raw: &str, case: NameCase) -> Vec<String> {
	let mut names: Vec<String> = Vec::new();
	for name in raw.split(',').map(|part| case.apply(part)) {
		if !name.is_empty() && !names.contains(&name) {
			names.push(name);
		}
	}
	names
}

/// Ordered task collection with unique names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskList {
	tasks: Vec<Task>,
}

impl TaskList {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_tasks(tasks: Vec<Task>) -> Result<Self, ValidationError> {
		let mut list = Self::new();
		for task in tasks {
			list.add(task)?;
		}
		Ok(list)
	}

	pub fn tasks(&self) -> &[Task] {
		&self.tasks
	}

	pub fn len(&self) -> usize {
		self.tasks.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tasks.is_empty()
	}

	pub fn get(&self, index: usize) -> Option<&Task> {
		self.tasks.get(index)
	}

	pub fn find(&self, name: &str) -> Option<&Task> {
		self.tasks.iter().find(|task| task.name == name)
	}

	pub fn position(&self, name: &str) -> Option<usize> {
		self.tasks.iter().position(|task| task.name == name)
	}

	pub fn add(&mut self, task: Task) -> Result<(), ValidationError> {
		if self.find(&task.name).is_some() {
			return Err(ValidationError::DuplicateName(task.name));
		}
		self.tasks.push(task);
		Ok(())
	}

	/// Replaces the task at `index`. Renaming onto another task's name is rejected.
	pub fn replace(&mut self, index: usize, task: Task) -> Result<(), ValidationError> {
		if index >= self.tasks.len() {
			return Err(ValidationError::InvalidIndex(index));
		}
		if let Some(existing) = self.position(&task.name) {
			if existing != index {
				return Err(ValidationError::DuplicateName(task.name));
			}
		}
		self.tasks[index] = task;
		Ok(())
	}

	pub fn update_by_name(&mut self, task: Task) -> Result<(), ValidationError> {
		let index = self
			.position(&task.name)
			.ok_or_else(|| ValidationError::UnknownTask(task.name.clone()))?;
		self.tasks[index] = task;
		Ok(())
	}

	/// Removes the task at `index` and splices it out of every dependency list.
	///
	/// A task that listed the removed one as predecessor inherits its
	/// predecessors; likewise for successors.
	pub fn remove(&mut self, index: usize) -> Result<Task, ValidationError> {
		if index >= self.tasks.len() {
			return Err(ValidationError::InvalidIndex(index));
		}
		let removed = self.tasks.remove(index);
		for task in &mut self.tasks {
			splice(&mut task.predecessors, &removed.name, &removed.predecessors);
			splice(&mut task.successors, &removed.name, &removed.successors);
		}
		Ok(removed)
	}

	pub fn remove_by_name(&mut self, name: &str) -> Result<Task, ValidationError> {
		let index = self
			.position(name)
			.ok_or_else(|| ValidationError::UnknownTask(name.to_string()))?;
		self.remove(index)
	}

	/// Copy whose predecessor lists are rebuilt from the successor lists.
	pub fn with_predecessors_from_successors(&self) -> Self {
		let tasks = self
			.tasks
			.iter()
			.map(|task| Task {
				predecessors: self
					.tasks
					.iter()
					.filter(|other| other.successors.contains(&task.name))
					.map(|other| other.name.clone())
					.collect(),
				..task.clone()
			})
			.collect();
		Self { tasks }
	}

	/// Names referenced as predecessor or successor without a matching task.
	pub fn dangling_references(&self) -> BTreeSet<String> {
		self.tasks
			.iter()
			.flat_map(|task| task.predecessors.iter().chain(&task.successors))
			.filter(|name| self.find(name).is_none())
			.cloned()
			.collect()
	}

	pub fn clear(&mut self) {
		self.tasks.clear();
	}

	/// A 23-task sample project.
	pub fn example() -> Self {
		const EXAMPLE: &[(&str, u32, &[&str], &[&str])] = &[
			("A", 7, &[], &["B"]),
			("B", 7, &["A"], &["C"]),
			("C", 15, &["B"], &["D"]),
			("D", 30, &["C"], &["E", "G", "H"]),
			("E", 45, &["D"], &["F"]),
			("F", 15, &["E"], &["K"]),
			("G", 45, &["D"], &["M"]),
			("H", 60, &["D"], &["I"]),
			("I", 20, &["H"], &["J"]),
			("J", 30, &["I"], &["M"]),
			("K", 30, &["F"], &["L"]),
			("L", 15, &["K"], &["M"]),
			("M", 30, &["G", "J", "L"], &["N", "P"]),
			("N", 15, &["M"], &["O"]),
			("O", 30, &["N"], &["Q"]),
			("P", 15, &["M"], &["T"]),
			("Q", 15, &["O"], &["R", "S"]),
			("R", 15, &["Q"], &["U", "W"]),
			("S", 30, &["Q"], &["V", "W"]),
			("T", 7, &["P"], &["U", "V"]),
			("U", 4, &["R", "T"], &[]),
			("V", 2, &["S", "T"], &[]),
			("W", 7, &["R", "S"], &[]),
		];
		let tasks = EXAMPLE
			.iter()
			.map(|(name, duration, preds, succs)| {
				Task::new(*name, *duration)
					.with_predecessors(preds.iter().copied())
					.with_successors(succs.iter().copied())
			})
			.collect();
		Self { tasks }
	}
}

fn splice(names: &mut Vec<String>, removed: &str, replacement: &[String]) {
	if !names.iter().any(|name| name == removed) {
		return;
	}
	names.retain(|name| name != removed);
	for name in replacement {
		if !names.contains(name) {
			names.push(name.clone());
		}
	}
}
