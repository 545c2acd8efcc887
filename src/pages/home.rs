use leptos::prelude::*;

use crate::components::query_panel::QueryPanel;

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<div class="container">
			<h1>"Knowledge Graph Query"</h1>
			<p class="subtitle">"Pick a graph, ask a question, and inspect the references behind the answer."</p>
			<QueryPanel />
		</div>
	}
}
