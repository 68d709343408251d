//! Graph editor: tasks are edited by clicking their nodes and every change
//! is recalculated in one save-then-fetch round trip.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, error, info, warn};

use crate::api::CpmClient;
use crate::components::dialog::{alert, confirm};
use crate::components::network_canvas::NetworkCanvas;
use crate::components::schedule_view::{CriticalPathBanner, SummaryTable};
use crate::components::task_form::TaskFields;
use crate::components::task_list::TaskSummaryList;
use crate::config::AppConfig;
use crate::layout::TaskLayout;
use crate::model::{CriticalPath, GraphEditor, TaskDraft};
use crate::network::{LaidOutNetwork, Network, SummaryRow, build_task_network, summary_rows};

const CALCULATION_FAILED: &str = "Erreur lors du calcul. Vérifiez la console.";
const CONFIRM_DELETE: &str = "Supprimer la tâche sélectionnée ?";
const CONFIRM_RESET: &str = "Effacer toutes les tâches ?";

fn new_draft() -> TaskDraft {
	TaskDraft {
		duration: "1".to_string(),
		..TaskDraft::default()
	}
}

#[component]
pub fn GraphEditorPage() -> impl IntoView {
	let config = use_context::<AppConfig>().unwrap_or_default();
	let client = CpmClient::new(config.api_base.clone());
	let layout_config = StoredValue::new(config.layout);

	let editor = RwSignal::new(GraphEditor::default());
	let draft = RwSignal::new(new_draft());
	// Last derived network, kept unpositioned so layouts can be switched
	// without another round trip.
	let network = RwSignal::new(Network::default());
	let laid_out = RwSignal::new(LaidOutNetwork::default());
	let rows = RwSignal::new(Vec::<SummaryRow>::new());
	let critical = RwSignal::new(CriticalPath::default());
	let loading = RwSignal::new(false);

	let clear_results = move || {
		network.set(Network::default());
		laid_out.set(LaidOutNetwork::default());
		rows.set(Vec::new());
		critical.set(CriticalPath::default());
	};

	let recalculate = Callback::new(move |()| {
		let outgoing = editor.with_untracked(|e| e.outgoing());
		if outgoing.is_empty() {
			clear_results();
			return;
		}
		let (layout, revision) = editor.with_untracked(|e| (e.layout, e.revision()));
		let client = client.clone();
		loading.set(true);
		spawn_local(async move {
			let calculated = match client.save_tasks(outgoing.tasks()).await {
				Ok(_) => client.fetch_schedule().await,
				Err(err) => Err(err),
			};
			let stale = editor.with_untracked(|e| e.revision() != revision);
			match calculated {
				Ok(_) if stale => {
					warn!("Discarding schedule computed for revision {}", revision);
				}
				Ok(result) => {
					let result = result.with_grouped_dates_expanded();
					let derived = build_task_network(outgoing.tasks(), &result);
					info!(
						"Task network recalculated: {} nodes, {} edges",
						derived.nodes.len(),
						derived.edges.len()
					);
					laid_out.set(layout_config.with_value(|cfg| layout.apply(derived.clone(), cfg)));
					network.set(derived);
					rows.set(summary_rows(outgoing.tasks(), &result));
					critical.set(result.critical());
				}
				Err(err) => {
					error!("Error recalculating: {}", err);
					alert(&err.user_message(CALCULATION_FAILED));
				}
			}
			loading.set(false);
		});
	});

	// Results are recalculated on demand only.
	let after_change = move || {
		draft.set(new_draft());
		clear_results();
	};

	let on_add = move |_| {
		let current = draft.get_untracked();
		match editor.try_update(|e| e.add(&current)) {
			Some(Ok(())) => after_change(),
			Some(Err(err)) => alert(&err.to_string()),
			None => {}
		}
	};

	let on_update = move |_| {
		let current = draft.get_untracked();
		match editor.try_update(|e| e.update(&current)) {
			Some(Ok(())) => after_change(),
			Some(Err(err)) => alert(&err.to_string()),
			None => {}
		}
	};

	let on_delete = move |_| {
		if !confirm(CONFIRM_DELETE) {
			return;
		}
		match editor.try_update(|e| e.delete_selected()) {
			Some(Ok(())) => after_change(),
			Some(Err(err)) => alert(&err.to_string()),
			None => {}
		}
	};

	let on_cancel = move |_| {
		editor.update(|e| e.clear_selection());
		draft.set(new_draft());
	};

	let on_node_click = Callback::new(move |node_id: String| {
		if let Some(Some(selected)) = editor.try_update(|e| e.select(&node_id)) {
			debug!("Selected task {}", node_id);
			draft.set(selected);
		}
	});

	let on_example = move |_| {
		editor.update(|e| e.load_example());
		after_change();
	};

	let on_reset = move |_| {
		if !confirm(CONFIRM_RESET) {
			return;
		}
		editor.update(|e| e.reset());
		draft.set(new_draft());
		clear_results();
	};

	let choose_layout = move |layout: TaskLayout| {
		editor.update(|e| e.layout = layout);
		let current = network.get_untracked();
		if !current.nodes.is_empty() {
			laid_out.set(layout_config.with_value(|cfg| layout.apply(current, cfg)));
		}
	};

	let has_selection = move || editor.with(|e| e.selected().is_some());
	let tasks = Signal::derive(move || editor.with(|e| e.tasks.tasks().to_vec()));

	view! {
		<div class="page graph-editor">
			<h1>"Éditeur graphique"</h1>

			<section class="panel">
				<h2>
					{move || match editor.with(|e| e.selected().map(str::to_string)) {
						Some(name) => format!("Tâche {}", name),
						None => "Nouvelle tâche".to_string(),
					}}
				</h2>
				<TaskFields draft=draft show_predecessors=false name_locked=Signal::derive(has_selection) />
				<div class="actions">
					<Show
						when=has_selection
						fallback=move || view! { <button on:click=on_add>"Ajouter"</button> }
					>
						<button on:click=on_update>"Modifier"</button>
						<button class="danger" on:click=on_delete>"Supprimer"</button>
						<button on:click=on_cancel>"Annuler"</button>
					</Show>
				</div>
			</section>

			<section class="panel">
				<div class="actions">
					<button on:click=move |_| recalculate.run(()) prop:disabled=move || loading.get()>
						"Recalculer"
					</button>
					<button on:click=on_example>"Charger l'exemple"</button>
					<button class="danger" on:click=on_reset>"Réinitialiser"</button>
				</div>
				<div class="layout-choices">
					{TaskLayout::ALL
						.into_iter()
						.map(move |layout| {
							view! {
								<button
									class:active=move || editor.with(|e| e.layout == layout)
									on:click=move |_| choose_layout(layout)
								>
									{layout.to_string()}
								</button>
							}
						})
						.collect_view()}
				</div>
				<TaskSummaryList tasks=tasks />
			</section>

			<section class="panel">
				<CriticalPathBanner path=critical />
				<NetworkCanvas data=laid_out on_node_click=on_node_click height=700.0 />
				<SummaryTable rows=rows />
			</section>
		</div>
	}
}
