//! Form editor: tasks typed in a form, sent, then calculated on demand.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{error, info, warn};

use crate::api::CpmClient;
use crate::components::dialog::{alert, confirm};
use crate::components::network_canvas::NetworkCanvas;
use crate::components::schedule_view::{CriticalPathBanner, Legend};
use crate::components::task_form::TaskFields;
use crate::components::task_list::TaskTable;
use crate::config::AppConfig;
use crate::layout::layered;
use crate::model::{CriticalPath, FormEditor, TaskDraft};
use crate::network::{LaidOutNetwork, build_event_network};

const SEND_FAILED: &str = "Erreur lors de l'envoi des données";
const CALCULATION_FAILED: &str = "Erreur lors du calcul";
const CONFIRM_DELETE: &str = "Êtes-vous sûr de vouloir supprimer cette tâche ?";

#[component]
pub fn Home() -> impl IntoView {
	let config = use_context::<AppConfig>().unwrap_or_default();
	let client = CpmClient::new(config.api_base.clone());
	let layout_config = config.layout;

	let editor = RwSignal::new(FormEditor::default());
	let draft = RwSignal::new(TaskDraft::default());
	let critical = RwSignal::new(CriticalPath::default());
	let laid_out = RwSignal::new(LaidOutNetwork::default());
	let error_message = RwSignal::new(None::<String>);
	let loading = RwSignal::new(false);

	let clear_results = move || {
		critical.set(CriticalPath::default());
		laid_out.set(LaidOutNetwork::default());
	};

	let on_submit = move |_| {
		let current = draft.get_untracked();
		match editor.try_update(|e| e.submit(&current)) {
			Some(Ok(())) => {
				draft.set(TaskDraft::default());
				clear_results();
			}
			Some(Err(err)) => alert(&err.to_string()),
			None => {}
		}
	};

	let on_cancel = move |_| {
		editor.update(|e| e.cancel_edit());
		draft.set(TaskDraft::default());
	};

	let on_edit = Callback::new(move |index: usize| {
		match editor.try_update(|e| e.begin_edit(index)) {
			Some(Ok(loaded)) => {
				draft.set(loaded);
				clear_results();
			}
			Some(Err(err)) => alert(&err.to_string()),
			None => {}
		}
	});

	let on_delete = Callback::new(move |index: usize| {
		if !confirm(CONFIRM_DELETE) {
			return;
		}
		match editor.try_update(|e| e.delete(index)) {
			Some(Ok(edit_cleared)) => {
				if edit_cleared {
					draft.set(TaskDraft::default());
				}
				clear_results();
			}
			Some(Err(err)) => alert(&err.to_string()),
			None => {}
		}
	});

	let send_client = client.clone();
	let on_send = move |_| {
		let ready = editor.with_untracked(|e| e.ensure_ready_to_send().map(|()| e.tasks.tasks().to_vec()));
		let tasks = match ready {
			Ok(tasks) => tasks,
			Err(err) => {
				alert(&err.to_string());
				return;
			}
		};
		error_message.set(None);
		loading.set(true);
		let client = send_client.clone();
		spawn_local(async move {
			match client.save_tasks(&tasks).await {
				Ok(links) => {
					info!("Sent {} tasks, {} links returned", tasks.len(), links.len());
					if editor.try_update(|e| e.mark_sent(&tasks, links)) == Some(true) {
						alert("Données envoyées avec succès !");
					}
				}
				Err(err) => {
					error!("Error sending data: {}", err);
					editor.update(|e| e.mark_send_failed());
					error_message.set(Some(err.user_message(SEND_FAILED)));
				}
			}
			loading.set(false);
		});
	};

	let on_calculate = move |_| {
		if let Err(err) = editor.with_untracked(|e| e.ensure_ready_to_calculate()) {
			alert(&err.to_string());
			return;
		}
		error_message.set(None);
		clear_results();
		loading.set(true);
		let client = client.clone();
		let layout_config = layout_config.clone();
		spawn_local(async move {
			match client.fetch_schedule().await {
				Ok(_) if !editor.with_untracked(|e| e.data_sent()) => {
					warn!("Discarding schedule computed for a task list that has since changed");
				}
				Ok(result) => {
					let (tasks, links) =
						editor.with_untracked(|e| (e.tasks.tasks().to_vec(), e.links().clone()));
					let network = build_event_network(&tasks, &links, &result);
					if network.nodes.is_empty() {
						error!("No links available for graph generation");
					}
					laid_out.set(layered(network, &links, &layout_config));
					critical.set(result.critical());
				}
				Err(err) => {
					error!("Error calculating schedule: {}", err);
					error_message.set(Some(err.user_message(CALCULATION_FAILED)));
				}
			}
			loading.set(false);
		});
	};

	let tasks = Signal::derive(move || editor.with(|e| e.tasks.tasks().to_vec()));
	let editing = Signal::derive(move || editor.with(|e| e.editing()));
	let is_editing = move || editor.with(|e| e.is_editing());
	let data_sent = move || editor.with(|e| e.data_sent());

	view! {
		<div class="page form-editor">
			<h1>"Méthode du chemin critique"</h1>

			<section class="panel">
				<h2>{move || if is_editing() { "Modifier la tâche" } else { "Ajouter une tâche" }}</h2>
				<TaskFields draft=draft />
				<div class="actions">
					<button on:click=on_submit>
						{move || if is_editing() { "Mettre à jour" } else { "Ajouter" }}
					</button>
					<Show when=is_editing>
						<button on:click=on_cancel>"Annuler"</button>
					</Show>
				</div>
			</section>

			<section class="panel">
				<h2>"Tâches"</h2>
				<TaskTable tasks=tasks editing=editing on_edit=on_edit on_delete=on_delete />
				<div class="actions">
					<button on:click=on_send prop:disabled=move || loading.get() || is_editing()>
						"Envoyer"
					</button>
					<button
						on:click=on_calculate
						prop:disabled=move || loading.get() || is_editing() || !data_sent()
					>
						"Calculer"
					</button>
				</div>
				{move || error_message.get().map(|message| view! { <p class="error">{message}</p> })}
			</section>

			<section class="panel">
				<CriticalPathBanner path=critical />
				<Show when=move || !laid_out.with(|n| n.is_empty())>
					<Legend />
					<NetworkCanvas data=laid_out height=600.0 />
				</Show>
			</section>
		</div>
	}
}
