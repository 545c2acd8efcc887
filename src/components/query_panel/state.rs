use leptos::prelude::{RwSignal, Update};
use log::{error, info, warn};

use super::render::render_response;
use super::types::ResultView;
use crate::api::{GraphId, HttpTransport, QueryClient, QueryRequest};
use crate::markdown::ToSafeHtml;

/// Everything the query panel shows besides the form inputs.
///
/// `error_message` and `result` are never both set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UiState {
	pub is_loading: bool,
	pub error_message: Option<String>,
	pub result: Option<ResultView>,
}

impl UiState {
	pub fn begin_submission(&mut self) {
		self.is_loading = true;
		self.error_message = None;
		self.result = None;
	}

	pub fn show_error(&mut self, message: impl Into<String>) {
		self.result = None;
		self.error_message = Some(message.into());
	}

	pub fn show_result(&mut self, result: ResultView) {
		self.error_message = None;
		self.result = Some(result);
	}

	pub fn finish_loading(&mut self) {
		self.is_loading = false;
	}
}

/// Somewhere a [`UiState`] lives and can be mutated in place.
pub trait ViewState {
	fn apply(&self, f: impl FnOnce(&mut UiState));
}

impl ViewState for RwSignal<UiState> {
	fn apply(&self, f: impl FnOnce(&mut UiState)) {
		self.update(f);
	}
}

/// Holds the loading flag for as long as it is alive.
struct LoadingGuard<'a, V: ViewState + ?Sized> {
	view: &'a V,
}

impl<'a, V: ViewState + ?Sized> LoadingGuard<'a, V> {
	fn begin(view: &'a V) -> Self {
		view.apply(UiState::begin_submission);
		Self { view }
	}
}

impl<V: ViewState + ?Sized> Drop for LoadingGuard<'_, V> {
	fn drop(&mut self) {
		self.view.apply(UiState::finish_loading);
	}
}

/// Validate, send, and publish the outcome to `view`.
///
/// A blank query shows the validation error without touching the loading
/// flag. Otherwise `is_loading` stays set from dispatch until the request
/// settles, whichever way it settles.
pub async fn execute_query<T, V, S>(
	client: &QueryClient<T>,
	view: &V,
	sanitizer: &S,
	query_text: &str,
	graph_id: &GraphId,
) where
	T: HttpTransport,
	V: ViewState + ?Sized,
	S: ToSafeHtml + ?Sized,
{
	let request = match QueryRequest::new(query_text, graph_id.clone()) {
		Ok(request) => request,
		Err(err) => {
			warn!("Rejected submission: {err}");
			view.apply(|state| state.show_error(err.to_string()));
			return;
		}
	};

	let _loading = LoadingGuard::begin(view);
	match client.send(&request).await {
		Ok(response) => {
			info!("Displaying {} references", response.references.len());
			let result = render_response(&response, sanitizer);
			view.apply(|state| state.show_result(result));
		}
		Err(err) => {
			error!("Error executing query: {err}");
			view.apply(|state| state.show_error(err.to_string()));
		}
	}
}
