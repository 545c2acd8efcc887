//! HTTP seam between [`QueryClient`](super::QueryClient) and the browser.
//!
//! Browser (WASM) → `fetch` → query service → [`HttpReply`]

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::error::TransportError;

/// Status and raw body of a completed exchange. Non-2xx replies are still
/// replies; only failures to get one at all are errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpReply {
	pub status: u16,
	pub body: String,
}

impl HttpReply {
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

#[allow(async_fn_in_trait)]
pub trait HttpTransport {
	async fn get(&self, url: &str) -> Result<HttpReply, TransportError>;
	async fn post_json(&self, url: &str, body: &str) -> Result<HttpReply, TransportError>;
}

/// `window.fetch` in CORS mode. No timeout, no retry.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

impl HttpTransport for FetchTransport {
	async fn get(&self, url: &str) -> Result<HttpReply, TransportError> {
		let opts = RequestInit::new();
		opts.set_method("GET");
		opts.set_mode(RequestMode::Cors);

		let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
		send(request).await
	}

	async fn post_json(&self, url: &str, body: &str) -> Result<HttpReply, TransportError> {
		let opts = RequestInit::new();
		opts.set_method("POST");
		opts.set_mode(RequestMode::Cors);
		opts.set_body(&JsValue::from_str(body));

		let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
		request
			.headers()
			.set("Content-Type", "application/json")
			.map_err(js_error)?;
		send(request).await
	}
}

async fn send(request: Request) -> Result<HttpReply, TransportError> {
	let window = web_sys::window().ok_or_else(|| TransportError("No window object".into()))?;
	let resp_value = JsFuture::from(window.fetch_with_request(&request))
		.await
		.map_err(js_error)?;
	let response: Response = resp_value.dyn_into().map_err(js_error)?;

	let text_value = JsFuture::from(response.text().map_err(js_error)?)
		.await
		.map_err(js_error)?;
	let body = text_value
		.as_string()
		.ok_or_else(|| TransportError("Response is not a string".into()))?;

	Ok(HttpReply {
		status: response.status(),
		body,
	})
}

/// Best-effort message out of a thrown JS value.
fn js_error(value: JsValue) -> TransportError {
	if let Some(err) = value.dyn_ref::<js_sys::Error>() {
		return TransportError(String::from(err.message()));
	}
	TransportError(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}
