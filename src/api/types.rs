use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::QueryError;

pub const DEFAULT_GRAPH_ID: &str = "default";
pub const DEFAULT_GRAPH_LABEL: &str = "Default Graph";

/// Opaque name of a graph the backend can query against.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraphId(String);

impl GraphId {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	pub fn default_graph() -> Self {
		Self::new(DEFAULT_GRAPH_ID)
	}
}

impl fmt::Display for GraphId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<String> for GraphId {
	fn from(id: String) -> Self {
		Self(id)
	}
}

impl From<&str> for GraphId {
	fn from(id: &str) -> Self {
		Self::new(id)
	}
}

/// One entry of the graph selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphOption {
	pub id: GraphId,
	pub label: String,
}

impl GraphOption {
	pub fn default_graph() -> Self {
		Self {
			id: GraphId::default_graph(),
			label: DEFAULT_GRAPH_LABEL.into(),
		}
	}
}

impl From<GraphId> for GraphOption {
	fn from(id: GraphId) -> Self {
		let label = id.to_string();
		Self { id, label }
	}
}

/// Body of `POST /api/query`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QueryRequest {
	pub query: String,
	pub graph_id: GraphId,
}

impl QueryRequest {
	/// Rejects blank query text. The text itself is sent untrimmed.
	pub fn new(query: impl Into<String>, graph_id: GraphId) -> Result<Self, QueryError> {
		let query = query.into();
		if query.trim().is_empty() {
			return Err(QueryError::Validation);
		}
		Ok(Self { query, graph_id })
	}
}

/// Reply of `POST /api/query`, built leniently from whatever JSON arrived.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct QueryResponse {
	pub answer: Option<String>,
	pub references: IndexMap<String, ReferenceEntry>,
}

impl From<Value> for QueryResponse {
	fn from(value: Value) -> Self {
		let Value::Object(mut fields) = value else {
			return Self::default();
		};
		let answer = fields.remove("answer").and_then(display_text);
		let references = match fields.remove("references") {
			Some(Value::Object(entries)) => entries
				.into_iter()
				.map(|(key, entry)| (key, ReferenceEntry::from(entry)))
				.collect(),
			_ => IndexMap::new(),
		};
		Self { answer, references }
	}
}

pub const CONTENT_FIELD: &str = "content";

/// A supporting source: optional markdown `content` plus arbitrary metadata.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReferenceEntry {
	pub fields: Map<String, Value>,
}

impl From<Value> for ReferenceEntry {
	fn from(value: Value) -> Self {
		match value {
			Value::Object(fields) => Self { fields },
			_ => Self::default(),
		}
	}
}

impl ReferenceEntry {
	pub fn content(&self) -> Option<String> {
		self.fields.get(CONTENT_FIELD).cloned().and_then(display_text)
	}

	/// Every field except `content`, in received order, as display text.
	pub fn metadata(&self) -> impl Iterator<Item = (&str, String)> {
		self.fields
			.iter()
			.filter(|(key, _)| key.as_str() != CONTENT_FIELD)
			.map(|(key, value)| (key.as_str(), metadata_text(value)))
	}
}

/// Display text of a value the UI only shows when it is set. Null, `false`,
/// zero and the empty string all count as unset.
fn display_text(value: Value) -> Option<String> {
	match value {
		Value::Null | Value::Bool(false) => None,
		Value::Number(n) if n.as_f64() == Some(0.0) => None,
		Value::String(text) if text.is_empty() => None,
		Value::String(text) => Some(text),
		other => Some(other.to_string()),
	}
}

fn metadata_text(value: &Value) -> String {
	match value {
		Value::String(text) => text.clone(),
		other => other.to_string(),
	}
}
