use leptos::prelude::*;

#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="not-found-page">
			<h1>"404 - Page introuvable"</h1>
			<p>"Cette page n'existe pas."</p>
			<a href="/">"Retour à l'éditeur"</a>
		</div>
	}
}
