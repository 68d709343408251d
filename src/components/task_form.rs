use leptos::prelude::*;

use crate::model::TaskDraft;

/// Inputs bound to a task draft.
///
/// `show_predecessors` hides the predecessor field for the graph editor,
/// which derives predecessors from successors. `name_locked` disables the
/// name while an existing task is selected there.
#[component]
pub fn TaskFields(
	draft: RwSignal<TaskDraft>,
	#[prop(default = true)] show_predecessors: bool,
	#[prop(into, optional)] name_locked: Signal<bool>,
) -> impl IntoView {
	view! {
		<div class="task-fields">
			<label>
				"Nom de la tâche"
				<input
					type="text"
					placeholder="A"
					prop:value=move || draft.get().name
					prop:disabled=move || name_locked.get()
					on:input=move |ev| draft.update(|d| d.name = event_target_value(&ev))
				/>
			</label>
			<label>
				"Durée (jours)"
				<input
					type="number"
					min="1"
					prop:value=move || draft.get().duration
					on:input=move |ev| draft.update(|d| d.duration = event_target_value(&ev))
				/>
			</label>
			<Show when=move || show_predecessors>
				<label>
					"Prédécesseurs"
					<input
						type="text"
						placeholder="A, B ou -"
						prop:value=move || draft.get().predecessors
						on:input=move |ev| draft.update(|d| d.predecessors = event_target_value(&ev))
					/>
				</label>
			</Show>
			<label>
				"Successeurs"
				<input
					type="text"
					placeholder="C, D"
					prop:value=move || draft.get().successors
					on:input=move |ev| draft.update(|d| d.successors = event_target_value(&ev))
				/>
			</label>
		</div>
	}
}
