//! Editor state behind the two screens, free of any UI types.

use log::warn;

use super::links::Links;
use super::task::{NameCase, Task, TaskDraft, TaskList};
use crate::error::ValidationError;
use crate::layout::TaskLayout;
use crate::network::links::complete_links;

/// Form-driven editor: free-text dependencies, explicit send then calculate.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormEditor {
	pub tasks: TaskList,
	editing: Option<usize>,
	data_sent: bool,
	links: Links,
}

impl FormEditor {
	pub fn editing(&self) -> Option<usize> {
		self.editing
	}

	pub fn is_editing(&self) -> bool {
		self.editing.is_some()
	}

	pub fn data_sent(&self) -> bool {
		self.data_sent
	}

	/// Links of the last successful send, completed with `END`.
	pub fn links(&self) -> &Links {
		&self.links
	}

	/// Adds the draft, or replaces the edited task when in edit mode.
	pub fn submit(&mut self, draft: &TaskDraft) -> Result<(), ValidationError> {
		let task = draft.validate(NameCase::Preserve)?;
		match self.editing {
			Some(index) => self.tasks.replace(index, task)?,
			None => self.tasks.add(task)?,
		}
		self.editing = None;
		self.invalidate();
		Ok(())
	}

	/// Enters edit mode and returns the draft to show in the form.
	pub fn begin_edit(&mut self, index: usize) -> Result<TaskDraft, ValidationError> {
		let task = self
			.tasks
			.get(index)
			.ok_or(ValidationError::InvalidIndex(index))?;
		let draft = TaskDraft::from_task(task);
		self.editing = Some(index);
		self.invalidate();
		Ok(draft)
	}

	pub fn cancel_edit(&mut self) {
		self.editing = None;
	}

	/// Deletes with splice semantics and keeps the edited index pointing at the same task.
	///
	/// Returns true when the task being edited was the one deleted.
	pub fn delete(&mut self, index: usize) -> Result<bool, ValidationError> {
		self.tasks.remove(index)?;
		self.invalidate();
		let cleared = match self.editing {
			Some(editing) if editing == index => {
				self.editing = None;
				true
			}
			Some(editing) if editing > index => {
				self.editing = Some(editing - 1);
				false
			}
			_ => false,
		};
		Ok(cleared)
	}

	pub fn ensure_ready_to_send(&self) -> Result<(), ValidationError> {
		if self.is_editing() {
			return Err(ValidationError::EditInProgress);
		}
		if self.tasks.is_empty() {
			return Err(ValidationError::EmptyTaskList);
		}
		let dangling = self.tasks.dangling_references();
		if !dangling.is_empty() {
			warn!("Sending tasks with undefined dependencies: {:?}", dangling);
		}
		Ok(())
	}

	/// Records the backend's links after a successful send of `sent`.
	///
	/// Returns false and leaves the editor unsent when the list changed
	/// while the request was in flight.
	pub fn mark_sent(&mut self, sent: &[Task], links: Links) -> bool {
		if sent != self.tasks.tasks() {
			warn!("Ignoring send response for a task list that has since changed");
			self.data_sent = false;
			return false;
		}
		self.links = complete_links(sent, links);
		self.data_sent = true;
		true
	}

	pub fn mark_send_failed(&mut self) {
		self.data_sent = false;
	}

	pub fn ensure_ready_to_calculate(&self) -> Result<(), ValidationError> {
		if self.is_editing() {
			Err(ValidationError::EditInProgress)
		} else if self.data_sent {
			Ok(())
		} else {
			Err(ValidationError::NotSent)
		}
	}

	fn invalidate(&mut self) {
		self.data_sent = false;
	}
}

/// Node-click editor: successors only, uppercase names, recalculated in one go.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphEditor {
	pub tasks: TaskList,
	selected: Option<String>,
	pub layout: TaskLayout,
	revision: u64,
}

impl GraphEditor {
	pub fn selected(&self) -> Option<&str> {
		self.selected.as_deref()
	}

	/// Bumped by every change to the task list.
	///
	/// A calculation started at one revision is stale once this moves on.
	pub fn revision(&self) -> u64 {
		self.revision
	}

	pub fn add(&mut self, draft: &TaskDraft) -> Result<(), ValidationError> {
		let task = draft.validate(NameCase::Upper)?;
		self.tasks.add(task)?;
		self.revision += 1;
		Ok(())
	}

	/// Selects the clicked node's task, if it is one, and returns its draft.
	pub fn select(&mut self, node_id: &str) -> Option<TaskDraft> {
		let task = self.tasks.find(node_id)?;
		let draft = TaskDraft::from_task(task);
		self.selected = Some(task.name.clone());
		Some(draft)
	}

	/// Applies the draft to the selected task; its name cannot change.
	pub fn update(&mut self, draft: &TaskDraft) -> Result<(), ValidationError> {
		let mut task = draft.validate(NameCase::Upper)?;
		if let Some(selected) = &self.selected {
			task.name = selected.clone();
		}
		if let Some(existing) = self.tasks.find(&task.name) {
			task.predecessors = existing.predecessors.clone();
		}
		self.tasks.update_by_name(task)?;
		self.selected = None;
		self.revision += 1;
		Ok(())
	}

	pub fn delete_selected(&mut self) -> Result<(), ValidationError> {
		let Some(name) = self.selected.take() else {
			return Ok(());
		};
		self.tasks.remove_by_name(&name)?;
		self.revision += 1;
		Ok(())
	}

	pub fn clear_selection(&mut self) {
		self.selected = None;
	}

	pub fn load_example(&mut self) {
		self.tasks = TaskList::example();
		self.selected = None;
		self.revision += 1;
	}

	pub fn reset(&mut self) {
		self.tasks.clear();
		self.selected = None;
		self.revision += 1;
	}

	/// Task list as sent to the backend: predecessors derived from successors.
	pub fn outgoing(&self) -> TaskList {
		self.tasks.with_predecessors_from_successors()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::{END, Predecessor};

	fn draft(name: &str, duration: &str, preds: &str, succs: &str) -> TaskDraft {
		TaskDraft {
			name: name.into(),
			duration: duration.into(),
			predecessors: preds.into(),
			successors: succs.into(),
		}
	}

	fn three_tasks() -> FormEditor {
		let mut editor = FormEditor::default();
		editor.submit(&draft("A", "2", "", "B")).unwrap();
		editor.submit(&draft("B", "3", "A", "C")).unwrap();
		editor.submit(&draft("C", "1", "B", "")).unwrap();
		editor
	}

	#[test]
	fn submit_adds_then_edits() {
		let mut editor = three_tasks();
		assert_eq!(editor.tasks.len(), 3);

		let preload = editor.begin_edit(1).unwrap();
		assert_eq!(preload, draft("B", "3", "A", "C"));
		assert!(editor.is_editing());

		editor.submit(&draft("B", "8", "A", "C")).unwrap();
		assert!(!editor.is_editing());
		assert_eq!(editor.tasks.find("B").unwrap().duration, 8);
		assert_eq!(editor.tasks.len(), 3);
	}

	#[test]
	fn duplicate_rejected_on_creation() {
		let mut editor = three_tasks();
		assert_eq!(
			editor.submit(&draft("A", "1", "", "")),
			Err(ValidationError::DuplicateName("A".into()))
		);
	}

	#[test]
	fn delete_shifts_edit_index() {
		let mut editor = three_tasks();
		editor.begin_edit(2).unwrap();
		assert!(!editor.delete(0).unwrap());
		assert_eq!(editor.editing(), Some(1));
		assert!(editor.delete(1).unwrap());
		assert_eq!(editor.editing(), None);
		assert_eq!(editor.tasks.tasks()[0].name, "B");
	}

	#[test]
	fn calculate_requires_send() {
		let mut editor = three_tasks();
		assert_eq!(editor.ensure_ready_to_calculate(), Err(ValidationError::NotSent));

		let links: Links = serde_json::from_str(r#"{"A":["-"],"B":["A"],"C":["B"]}"#).unwrap();
		let sent = editor.tasks.tasks().to_vec();
		assert!(editor.mark_sent(&sent, links));
		assert!(editor.ensure_ready_to_calculate().is_ok());
		assert_eq!(editor.links()[END], vec![Predecessor::from("C")]);

		editor.submit(&draft("D", "1", "", "")).unwrap();
		assert!(!editor.data_sent());
	}

	#[test]
	fn stale_send_response_is_ignored() {
		let mut editor = FormEditor::default();
		editor.submit(&draft("A", "2", "", "")).unwrap();
		let sent = editor.tasks.tasks().to_vec();
		editor.submit(&draft("B", "1", "A", "")).unwrap();

		let links: Links = serde_json::from_str(r#"{"A":["-"]}"#).unwrap();
		assert!(!editor.mark_sent(&sent, links));
		assert!(!editor.data_sent());
		assert!(editor.links().is_empty());
		assert_eq!(editor.ensure_ready_to_calculate(), Err(ValidationError::NotSent));
	}

	#[test]
	fn no_send_or_calculate_while_editing() {
		let mut editor = three_tasks();
		let sent = editor.tasks.tasks().to_vec();
		let links: Links = serde_json::from_str(r#"{"A":["-"],"B":["A"],"C":["B"]}"#).unwrap();
		assert!(editor.mark_sent(&sent, links));

		editor.begin_edit(0).unwrap();
		assert_eq!(editor.ensure_ready_to_send(), Err(ValidationError::EditInProgress));
		assert_eq!(editor.ensure_ready_to_calculate(), Err(ValidationError::EditInProgress));

		editor.cancel_edit();
		assert!(editor.ensure_ready_to_send().is_ok());
	}

	#[test]
	fn send_requires_tasks() {
		assert_eq!(
			FormEditor::default().ensure_ready_to_send(),
			Err(ValidationError::EmptyTaskList)
		);
	}

	#[test]
	fn graph_editor_select_update_delete() {
		let mut editor = GraphEditor::default();
		editor.add(&draft("a", "2", "", "b")).unwrap();
		editor.add(&draft("b", "4", "", "")).unwrap();
		assert!(editor.select("START").is_none());

		let preload = editor.select("A").unwrap();
		assert_eq!(preload.successors, "B");
		editor.update(&draft("ignored", "5", "", "")).unwrap();
		assert_eq!(editor.tasks.find("A").unwrap().duration, 5);
		assert!(editor.tasks.find("A").unwrap().successors.is_empty());
		assert_eq!(editor.selected(), None);

		editor.select("B");
		editor.delete_selected().unwrap();
		assert_eq!(editor.tasks.len(), 1);
	}

	#[test]
	fn graph_editor_outgoing_derives_predecessors() {
		let mut editor = GraphEditor::default();
		editor.add(&draft("A", "1", "", "B")).unwrap();
		editor.add(&draft("B", "1", "", "")).unwrap();
		let outgoing = editor.outgoing();
		assert_eq!(outgoing.find("B").unwrap().predecessors, vec!["A"]);
	}

	#[test]
	fn every_change_moves_the_revision() {
		let mut editor = GraphEditor::default();
		let mut seen = vec![editor.revision()];
		editor.add(&draft("A", "1", "", "")).unwrap();
		seen.push(editor.revision());

		assert!(editor.add(&draft("a", "1", "", "")).is_err());
		assert_eq!(editor.revision(), seen[1]);

		editor.select("A");
		editor.update(&draft("A", "3", "", "")).unwrap();
		seen.push(editor.revision());
		editor.select("A");
		editor.delete_selected().unwrap();
		seen.push(editor.revision());
		editor.load_example();
		seen.push(editor.revision());
		editor.reset();
		seen.push(editor.revision());

		assert!(seen.windows(2).all(|pair| pair[0] < pair[1]));
	}

	#[test]
	fn example_and_reset() {
		let mut editor = GraphEditor::default();
		editor.load_example();
		assert_eq!(editor.tasks.len(), 23);
		editor.reset();
		assert!(editor.tasks.is_empty());
	}
}
