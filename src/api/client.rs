use log::{debug, error, info, warn};
use serde_json::Value;

use super::transport::HttpTransport;
use super::types::{GraphId, GraphOption, QueryRequest, QueryResponse};
use crate::config::{ClientConfig, QUERY_FAILED_FALLBACK};
use crate::error::{GraphListError, QueryError};

/// Talks to the graph listing and query endpoints of one service.
#[derive(Clone, Debug)]
pub struct QueryClient<T> {
	config: ClientConfig,
	transport: T,
}

impl<T: HttpTransport> QueryClient<T> {
	pub fn new(config: ClientConfig, transport: T) -> Self {
		Self { config, transport }
	}

	/// Graph identifiers the service knows about. A reply that is not a JSON
	/// array lists nothing.
	pub async fn fetch_graphs(&self) -> Result<Vec<GraphId>, GraphListError> {
		let reply = self.transport.get(&self.config.graphs_url()).await?;
		if !reply.is_success() {
			return Err(GraphListError::Status(reply.status));
		}
		let payload: Value = serde_json::from_str(&reply.body)?;
		Ok(graph_ids(payload))
	}

	/// Selector entries: the default graph first, then whatever the service
	/// lists. Failures are logged and leave only the default.
	pub async fn load_graph_options(&self) -> Vec<GraphOption> {
		let mut options = vec![GraphOption::default_graph()];
		match self.fetch_graphs().await {
			Ok(ids) => {
				info!("Loaded {} graphs", ids.len());
				options.extend(ids.into_iter().map(GraphOption::from));
			}
			Err(err) => error!("Error fetching graphs: {err}"),
		}
		options
	}

	/// One POST of an already validated request.
	pub async fn send(&self, request: &QueryRequest) -> Result<QueryResponse, QueryError> {
		info!("Sending query to graph {}", request.graph_id);
		let body = serde_json::to_string(request)?;
		let reply = self
			.transport
			.post_json(&self.config.query_url(), &body)
			.await?;

		// The body is decoded before the status is looked at, so an HTML error
		// page surfaces as a decode error.
		let payload: Value = serde_json::from_str(&reply.body)?;
		debug!("Received response ({}): {payload}", reply.status);

		if !reply.is_success() {
			return Err(QueryError::Request(server_error_message(&payload)));
		}
		Ok(QueryResponse::from(payload))
	}
}

fn server_error_message(payload: &Value) -> String {
	match payload.get("error") {
		Some(Value::String(message)) if !message.is_empty() => message.clone(),
		_ => QUERY_FAILED_FALLBACK.into(),
	}
}

fn graph_ids(payload: Value) -> Vec<GraphId> {
	let Value::Array(items) = payload else {
		warn!("Graph listing is not an array, ignoring it");
		return Vec::new();
	};
	items
		.into_iter()
		.filter_map(|item| match item {
			Value::String(id) => Some(GraphId::from(id)),
			Value::Number(n) => Some(GraphId::new(n.to_string())),
			Value::Bool(b) => Some(GraphId::new(b.to_string())),
			other => {
				warn!("Skipping graph listing entry {other}");
				None
			}
		})
		.collect()
}
