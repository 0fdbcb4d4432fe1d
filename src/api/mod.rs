//! GraphQL transport layer.
//!
//! This module provides the interface for issuing list queries and mutations,
//! either against a remote HTTP endpoint or the in-process mock schema.

mod client;
pub mod documents;
pub mod error;
mod mock;
mod transport;
pub mod types;

pub use client::GraphQlClient;
pub use error::ApiError;
pub use mock::{generate_credential, MockBackend, DEFAULT_SEED_ROWS};
pub use transport::{Client, QueryResponse, Transport};
pub use types::{Credential, Document, OperationKind, OperationRequest, Variables};
