//! Read-only views of a calculation: critical path, legend and summary.

use leptos::prelude::*;

use crate::model::CriticalPath;
use crate::network::SummaryRow;

fn cell(value: Option<i64>) -> String {
	value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

#[component]
pub fn CriticalPathBanner(#[prop(into)] path: Signal<CriticalPath>) -> impl IntoView {
	view! {
		<Show when=move || !path.get().is_empty()>
			<div class="critical-path">
				<strong>"Chemin critique : "</strong>
				<span>{move || path.get().display()}</span>
			</div>
		</Show>
	}
}

/// Key for the event network colors and labels.
#[component]
pub fn Legend() -> impl IntoView {
	view! {
		<ul class="legend">
			<li><span class="swatch start"></span>"DÉBUT / FIN : événements du projet"</li>
			<li><span class="swatch critical"></span>"Arc rouge : tâche du chemin critique"</li>
			<li><span class="swatch normal"></span>"Arc gris : tâche avec marge"</li>
			<li>"Nœud : date au plus tôt (Tôt) et au plus tard (Tard)"</li>
			<li>"Arc : tâche, durée et marge"</li>
		</ul>
	}
}

#[component]
pub fn SummaryTable(#[prop(into)] rows: Signal<Vec<SummaryRow>>) -> impl IntoView {
	view! {
		<Show when=move || !rows.get().is_empty()>
			<table class="summary-table">
				<thead>
					<tr>
						<th>"Tâche"</th>
						<th>"Durée"</th>
						<th>"Successeurs"</th>
						<th>"Début au plus tôt"</th>
						<th>"Début au plus tard"</th>
						<th>"Marge"</th>
					</tr>
				</thead>
				<tbody>
					{move || {
						rows.get()
							.into_iter()
							.map(|row| {
								let critical = row.slack == Some(0);
								view! {
									<tr class:critical=critical>
										<td>{row.name}</td>
										<td>{row.duration}</td>
										<td>{row.successors}</td>
										<td>{cell(row.earliest)}</td>
										<td>{cell(row.latest)}</td>
										<td>{cell(row.slack)}</td>
									</tr>
								}
							})
							.collect_view()
					}}
				</tbody>
			</table>
		</Show>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_values_render_as_dash() {
		assert_eq!(cell(None), "-");
		assert_eq!(cell(Some(0)), "0");
	}
}
