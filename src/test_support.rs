//! In-memory stand-ins for the browser used by unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::api::transport::{HttpReply, HttpTransport};
use crate::components::query_panel::state::{UiState, ViewState};
use crate::error::TransportError;

impl ViewState for RefCell<UiState> {
	fn apply(&self, f: impl FnOnce(&mut UiState)) {
		f(&mut self.borrow_mut());
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedCall {
	Get(String),
	Post(String, String),
}

/// Serves canned replies in order and records every call. When observing a
/// view it also notes whether the view was loading at dispatch time.
#[derive(Default)]
pub struct MockTransport {
	replies: RefCell<VecDeque<Result<HttpReply, TransportError>>>,
	calls: Rc<RefCell<Vec<RecordedCall>>>,
	observed: Option<Rc<RefCell<UiState>>>,
	loading_at_dispatch: Rc<RefCell<Vec<bool>>>,
}

impl MockTransport {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn reply(self, status: u16, body: &str) -> Self {
		self.replies.borrow_mut().push_back(Ok(HttpReply {
			status,
			body: body.to_string(),
		}));
		self
	}

	pub fn fail(self, message: &str) -> Self {
		self.replies
			.borrow_mut()
			.push_back(Err(TransportError(message.to_string())));
		self
	}

	pub fn observe(mut self, view: Rc<RefCell<UiState>>) -> Self {
		self.observed = Some(view);
		self
	}

	pub fn calls(&self) -> Vec<RecordedCall> {
		self.calls.borrow().clone()
	}

	pub fn call_log(&self) -> Rc<RefCell<Vec<RecordedCall>>> {
		self.calls.clone()
	}

	pub fn loading_log(&self) -> Rc<RefCell<Vec<bool>>> {
		self.loading_at_dispatch.clone()
	}

	fn dispatch(&self, call: RecordedCall) -> Result<HttpReply, TransportError> {
		if let Some(view) = &self.observed {
			self.loading_at_dispatch
				.borrow_mut()
				.push(view.borrow().is_loading);
		}
		self.calls.borrow_mut().push(call);
		self.replies
			.borrow_mut()
			.pop_front()
			.unwrap_or_else(|| Err(TransportError("no canned reply left".into())))
	}
}

impl HttpTransport for MockTransport {
	async fn get(&self, url: &str) -> Result<HttpReply, TransportError> {
		self.dispatch(RecordedCall::Get(url.to_string()))
	}

	async fn post_json(&self, url: &str, body: &str) -> Result<HttpReply, TransportError> {
		self.dispatch(RecordedCall::Post(url.to_string(), body.to_string()))
	}
}
