use leptos::prelude::*;

use crate::model::Task;

fn names_text(names: &[String]) -> String {
	if names.is_empty() {
		"-".to_string()
	} else {
		names.join(", ")
	}
}

/// Table of the form editor's tasks with per-row edit and delete.
#[component]
pub fn TaskTable(
	#[prop(into)] tasks: Signal<Vec<Task>>,
	#[prop(into)] editing: Signal<Option<usize>>,
	on_edit: Callback<usize>,
	on_delete: Callback<usize>,
) -> impl IntoView {
	view! {
		<table class="task-table">
			<thead>
				<tr>
					<th>"Tâche"</th>
					<th>"Durée"</th>
					<th>"Prédécesseurs"</th>
					<th>"Successeurs"</th>
					<th>"Actions"</th>
				</tr>
			</thead>
			<tbody>
				{move || {
					tasks
						.get()
						.into_iter()
						.enumerate()
						.map(move |(index, task)| {
							let row_class = move || {
								if editing.get() == Some(index) { "editing" } else { "" }
							};
							view! {
								<tr class=row_class>
									<td>{task.name.clone()}</td>
									<td>{task.duration}</td>
									<td>{names_text(&task.predecessors)}</td>
									<td>{names_text(&task.successors)}</td>
									<td>
										<button on:click=move |_| on_edit.run(index)>"Modifier"</button>
										<button class="danger" on:click=move |_| on_delete.run(index)>
											"Supprimer"
										</button>
									</td>
								</tr>
							}
						})
						.collect_view()
				}}
			</tbody>
		</table>
	}
}

/// Compact list used by the graph editor: `A (7) → B, C`.
#[component]
pub fn TaskSummaryList(#[prop(into)] tasks: Signal<Vec<Task>>) -> impl IntoView {
	view! {
		<ul class="task-summary-list">
			{move || {
				tasks
					.get()
					.into_iter()
					.map(|task| {
						view! {
							<li>{format!("{} ({}) → {}", task.name, task.duration, names_text(&task.successors))}</li>
						}
					})
					.collect_view()
			}}
		</ul>
	}
}
