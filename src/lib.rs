//! Leptos client-side front end for a Critical Path Method scheduling
//! service: two task editors, the HTTP client and the network layouts.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

pub mod api;
pub mod config;
pub mod error;
pub mod layout;
pub mod model;
pub mod network;

// Modules
mod components;
mod pages;

// Top-Level pages
use crate::config::AppConfig;
use crate::pages::graph_editor::GraphEditorPage;
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// Router for the form editor (`/`) and the graph editor (`/graphe`).
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	let config = AppConfig::from_env();
	info!("Scheduling service at {}", config.api_base);
	provide_context(config);

	view! {
		<Html attr:lang="fr" attr:dir="ltr" attr:data-theme="light" />

		// sets the document title
		<Title text="Chemin critique" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<nav class="main-nav">
				<A href="/">"Formulaire"</A>
				<A href="/graphe">"Éditeur graphique"</A>
			</nav>
			<main>
				<Routes fallback=|| view! { <NotFound /> }>
					<Route path=path!("/") view=Home />
					<Route path=path!("/graphe") view=GraphEditorPage />
				</Routes>
			</main>
		</Router>
	}
}
