//! Client for the knowledge-graph query service.

mod client;
pub mod transport;
mod types;

pub use client::QueryClient;
pub use transport::{FetchTransport, HttpTransport};
pub use types::{GraphId, GraphOption, QueryRequest, QueryResponse, ReferenceEntry};
