use leptos::{html, prelude::*, task::spawn_local};
use wasm_bindgen::JsCast;
use web_sys::{
	Event, HtmlSelectElement, HtmlTextAreaElement, MouseEvent, ScrollBehavior, ScrollIntoViewOptions,
};

use super::state::{UiState, execute_query};
use super::types::{AnswerView, ReferenceContent, ReferenceView, ResultView};
use crate::api::{FetchTransport, GraphId, GraphOption, QueryClient};
use crate::config::{ClientConfig, NO_ANSWER_PLACEHOLDER};
use crate::markdown::MarkdownSanitizer;

fn target_value(ev: &Event) -> String {
	ev.target()
		.and_then(|t| {
			if let Ok(select) = t.clone().dyn_into::<HtmlSelectElement>() {
				Some(select.value())
			} else if let Ok(textarea) = t.dyn_into::<HtmlTextAreaElement>() {
				Some(textarea.value())
			} else {
				None
			}
		})
		.unwrap_or_default()
}

/// Graph selector, query box and the rendered answer.
#[component]
pub fn QueryPanel(
	/// Service host; the local default when omitted.
	#[prop(optional, into)]
	base_url: Option<String>,
) -> impl IntoView {
	let config = base_url.map(ClientConfig::with_base_url).unwrap_or_default();
	let client = QueryClient::new(config, FetchTransport);
	let state = RwSignal::new(UiState::default());
	let graphs = RwSignal::new(vec![GraphOption::default_graph()]);
	let selected_graph = RwSignal::new(GraphId::default_graph());
	let query_text = RwSignal::new(String::new());
	let result = Memo::new(move |_| state.with(|s| s.result.clone()));
	let result_ref = NodeRef::<html::Div>::new();

	let loader = client.clone();
	spawn_local(async move {
		graphs.set(loader.load_graph_options().await);
	});

	let on_submit = move |_: MouseEvent| {
		let client = client.clone();
		let (query, graph) = (query_text.get_untracked(), selected_graph.get_untracked());
		spawn_local(async move {
			execute_query(&client, &state, &MarkdownSanitizer, &query, &graph).await;
		});
	};

	Effect::new(move |_| {
		if result.with(Option::is_none) {
			return;
		}
		if let Some(panel) = result_ref.get() {
			let opts = ScrollIntoViewOptions::new();
			opts.set_behavior(ScrollBehavior::Smooth);
			panel.scroll_into_view_with_scroll_into_view_options(&opts);
		}
	});

	view! {
		<div class="query-panel">
			<div class="form-group">
				<label for="graphSelect">"Knowledge graph"</label>
				<select id="graphSelect" on:change=move |ev| selected_graph.set(GraphId::from(target_value(&ev)))>
					{move || {
						graphs
							.get()
							.into_iter()
							.map(|option| {
								let value = option.id.to_string();
								let id = option.id;
								view! {
									<option value=value selected=move || selected_graph.with(|g| *g == id)>
										{option.label}
									</option>
								}
							})
							.collect_view()
					}}
				</select>
			</div>

			<div class="form-group">
				<label for="queryInput">"Query"</label>
				<textarea
					id="queryInput"
					rows="4"
					placeholder="Ask a question about the selected graph..."
					prop:value=move || query_text.get()
					on:input=move |ev| query_text.set(target_value(&ev))
				/>
			</div>

			<button id="submitBtn" on:click=on_submit disabled=move || state.with(|s| s.is_loading)>
				"Submit Query"
			</button>

			<Show when=move || state.with(|s| s.is_loading)>
				<div id="loading" class="loading">"Processing your query..."</div>
			</Show>

			<Show when=move || state.with(|s| s.error_message.is_some())>
				<div id="error" class="error">
					{move || state.with(|s| s.error_message.clone().unwrap_or_default())}
				</div>
			</Show>

			<div
				id="result"
				class="result"
				node_ref=result_ref
				style:display=move || if result.with(Option::is_some) { "block" } else { "none" }
			>
				{move || result.get().map(|result| view! { <ResultPanel result /> })}
			</div>
		</div>
	}
}

#[component]
fn ResultPanel(result: ResultView) -> impl IntoView {
	let shows_references = result.shows_references();
	let ResultView { answer, references } = result;

	let answer = match answer {
		AnswerView::Html(html) => view! { <div class="answer-content" inner_html=html></div> }.into_any(),
		AnswerView::Placeholder => view! { <div class="answer-content">{NO_ANSWER_PLACEHOLDER}</div> }.into_any(),
	};

	let references = shows_references.then(|| {
		view! {
			<div id="referencesSection" class="references-section">
				<h3>"References"</h3>
				<div id="referencesList" class="references-list">
					{references.into_iter().map(|reference| view! { <ReferenceCard reference /> }).collect_view()}
				</div>
			</div>
		}
	});

	view! {
		<h2>"Answer"</h2>
		{answer}
		{references}
	}
}

#[component]
fn ReferenceCard(reference: ReferenceView) -> impl IntoView {
	let ReferenceView { header, content, metadata } = reference;

	let content = content.map(|content| {
		let content = RwSignal::new(content);
		view! {
			<div class="reference-text" inner_html=move || content.with(|c| c.displayed_html().to_string())></div>
			<Show when=move || content.with(ReferenceContent::can_expand)>
				<button class="show-more-btn" on:click=move |_| content.update(ReferenceContent::expand)>
					"Show more"
				</button>
			</Show>
		}
	});

	let metadata = (!metadata.is_empty()).then(|| {
		view! {
			<div class="reference-metadata">
				{metadata
					.into_iter()
					.map(|line| view! { <div><strong>{format!("{}:", line.key)}</strong>" "{line.value}</div> })
					.collect_view()}
			</div>
		}
	});

	view! {
		<div class="reference-item">
			<div class="reference-header">
				<strong>{header}</strong>
			</div>
			<div class="reference-content">{content} {metadata}</div>
		</div>
	}
}
