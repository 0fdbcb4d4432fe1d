//! In-process mock of the credentials GraphQL schema.
//!
//! ```graphql
//! type Credential { id: ID!, createdAt: String!, username: String! }
//! type Query { getCredentials: [Credential] }
//! type Mutation {
//!   createCredential: Credential
//!   deleteCredential(credentialId: ID!): [Credential]
//! }
//! ```
//!
//! Operations are resolved by operation name. State lives in memory only and
//! is lost when the backend is dropped.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use super::documents::{CREATE_CREDENTIAL_NAME, DELETE_CREDENTIAL_NAME, GET_CREDENTIALS_NAME};
use super::error::{ApiError, Result};
use super::transport::Transport;
use super::types::{Credential, OperationKind, OperationRequest};

/// Number of credentials the default backend starts with.
pub const DEFAULT_SEED_ROWS: usize = 3;

const ADJECTIVES: &[&str] = &[
    "brisk", "calm", "eager", "fancy", "gentle", "happy", "jolly", "lucky", "mellow", "nimble",
    "quiet", "rapid", "sunny", "tidy", "witty",
];

const NOUNS: &[&str] = &[
    "badger", "comet", "falcon", "harbor", "lantern", "maple", "otter", "pebble", "quartz",
    "raven", "spruce", "tiger", "walrus", "willow", "zephyr",
];

/// Mock credentials backend.
#[derive(Debug)]
pub struct MockBackend {
    credentials: Mutex<Vec<Credential>>,
    latency: Duration,
    fail_mutations: bool,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new(DEFAULT_SEED_ROWS)
    }
}

impl MockBackend {
    /// Create a backend seeded with `seed_rows` generated credentials.
    pub fn new(seed_rows: usize) -> Self {
        let credentials = (0..seed_rows).map(|_| generate_credential()).collect();
        Self::with_credentials(credentials)
    }

    /// Create a backend with a fixed set of credentials.
    pub fn with_credentials(credentials: Vec<Credential>) -> Self {
        Self {
            credentials: Mutex::new(credentials),
            latency: Duration::ZERO,
            fail_mutations: false,
        }
    }

    /// Delay every response by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Make every mutation fail.
    pub fn with_failing_mutations(mut self, fail: bool) -> Self {
        self.fail_mutations = fail;
        self
    }

    /// Current number of stored credentials.
    pub async fn len(&self) -> usize {
        self.credentials.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn get_credentials(&self) -> Result<Value> {
        let credentials = self.credentials.lock().await;
        Ok(json!({ "getCredentials": *credentials }))
    }

    async fn create_credential(&self) -> Result<Value> {
        if self.fail_mutations {
            return Err(ApiError::Mock("Failed to create credential".to_string()));
        }
        let credential = generate_credential();
        info!(id = %credential.id, "Mock credential created");
        self.credentials.lock().await.push(credential.clone());
        Ok(json!({ "createCredential": credential }))
    }

    async fn delete_credential(&self, request: &OperationRequest) -> Result<Value> {
        if self.fail_mutations {
            return Err(ApiError::Mock("Failed to delete credential".to_string()));
        }
        let id = request
            .variables
            .get("credentialId")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ApiError::graphql(
                    "Variable \"$credentialId\" of required type \"ID!\" was not provided.",
                )
            })?;

        let mut credentials = self.credentials.lock().await;
        let before = credentials.len();
        credentials.retain(|c| c.id != id);
        if credentials.len() == before {
            return Err(ApiError::graphql(format!("Credential not found: {}", id)));
        }
        info!(id, "Mock credential deleted");
        Ok(json!({ "deleteCredential": *credentials }))
    }
}

#[async_trait]
impl Transport for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    #[instrument(skip(self, request), fields(operation = %request.document.operation_name()))]
    async fn execute(&self, request: &OperationRequest) -> Result<Value> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let name = request.document.operation_name();
        debug!("Resolving mock operation");
        match (request.document.kind(), name) {
            (OperationKind::Query, GET_CREDENTIALS_NAME) => self.get_credentials().await,
            (OperationKind::Mutation, CREATE_CREDENTIAL_NAME) => self.create_credential().await,
            (OperationKind::Mutation, DELETE_CREDENTIAL_NAME) => {
                self.delete_credential(request).await
            }
            (kind, _) => {
                let type_name = match kind {
                    OperationKind::Query => "Query",
                    OperationKind::Mutation => "Mutation",
                };
                Err(ApiError::graphql(format!(
                    "Cannot query field \"{}\" on type \"{}\".",
                    name, type_name
                )))
            }
        }
    }
}

/// Generate a credential with a random id, a past creation date and a username.
pub fn generate_credential() -> Credential {
    let mut rng = rand::rng();
    let days_ago = rng.random_range(1..=365);
    let seconds = rng.random_range(0..86_400);
    let created_at =
        Utc::now() - ChronoDuration::days(days_ago) - ChronoDuration::seconds(seconds);

    let adjective = ADJECTIVES.choose(&mut rng).copied().unwrap_or("quiet");
    let noun = NOUNS.choose(&mut rng).copied().unwrap_or("otter");
    let suffix: u16 = rng.random_range(1..100);

    Credential {
        id: uuid::Uuid::new_v4().to_string(),
        created_at: created_at.to_rfc3339(),
        username: format!("{}_{}{}", adjective, noun, suffix),
    }
}
