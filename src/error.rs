use thiserror::Error;

use crate::config::EMPTY_QUERY_MESSAGE;

/// Failure of a single HTTP exchange before any status code was seen.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

/// User-visible outcome of a failed submission. The `Display` text is what
/// lands in the error region.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum QueryError {
	#[error("{}", EMPTY_QUERY_MESSAGE)]
	Validation,
	#[error("{0}")]
	Request(String),
}

impl From<TransportError> for QueryError {
	fn from(err: TransportError) -> Self {
		Self::Request(err.0)
	}
}

impl From<serde_json::Error> for QueryError {
	fn from(err: serde_json::Error) -> Self {
		Self::Request(err.to_string())
	}
}

/// Graph listing failures. Logged only; the selector degrades to the default graph.
#[derive(Debug, Error)]
pub enum GraphListError {
	#[error("graph listing request failed: {0}")]
	Transport(#[from] TransportError),
	#[error("graph listing returned HTTP {0}")]
	Status(u16),
	#[error("graph listing is not valid JSON: {0}")]
	Decode(#[from] serde_json::Error),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("markdown rendering failed: {0}")]
pub struct RenderError(pub String);
