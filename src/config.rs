//! Endpoint configuration and fixed display constants.

/// Host serving both API endpoints.
pub const BASE_URL: &str = "http://localhost:8000";
pub const GRAPHS_PATH: &str = "/api/graphs";
pub const QUERY_PATH: &str = "/api/query";

/// Reference content longer than this many characters is shown truncated.
pub const MAX_REFERENCE_CONTENT_CHARS: usize = 300;
pub const ELLIPSIS: &str = "...";

pub const NO_ANSWER_PLACEHOLDER: &str = "No answer found";
pub const QUERY_FAILED_FALLBACK: &str = "An error occurred while processing your query";
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a query";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
	pub base_url: String,
	pub graphs_path: String,
	pub query_path: String,
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			base_url: BASE_URL.into(),
			graphs_path: GRAPHS_PATH.into(),
			query_path: QUERY_PATH.into(),
		}
	}
}

impl ClientConfig {
	pub fn with_base_url(base_url: impl Into<String>) -> Self {
		Self {
			base_url: base_url.into(),
			..Self::default()
		}
	}

	pub fn graphs_url(&self) -> String {
		self.join(&self.graphs_path)
	}

	pub fn query_url(&self) -> String {
		self.join(&self.query_path)
	}

	fn join(&self, path: &str) -> String {
		format!("{}{}", self.base_url.trim_end_matches('/'), path)
	}
}
