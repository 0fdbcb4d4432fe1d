//! GraphQL wire types and the credential entity served by the demo schema.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// GraphQL variables, keyed by variable name.
pub type Variables = serde_json::Map<String, Value>;

/// A parsed-once GraphQL document (query or mutation).
///
/// The operation name doubles as the cache key and as the resolver name for
/// the in-process mock backend, so it must be unique per document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    operation_name: Arc<str>,
    source: Arc<str>,
    kind: OperationKind,
}

/// Whether a document reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
}

impl Document {
    /// Create a query document.
    pub fn query(operation_name: &str, source: &str) -> Self {
        Self {
            operation_name: Arc::from(operation_name),
            source: Arc::from(source),
            kind: OperationKind::Query,
        }
    }

    /// Create a mutation document.
    pub fn mutation(operation_name: &str, source: &str) -> Self {
        Self {
            operation_name: Arc::from(operation_name),
            source: Arc::from(source),
            kind: OperationKind::Mutation,
        }
    }

    pub fn operation_name(&self) -> &str {
        &self.operation_name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn is_mutation(&self) -> bool {
        self.kind == OperationKind::Mutation
    }
}

/// A document bound to its variables, ready to be executed.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRequest {
    pub document: Document,
    pub variables: Variables,
}

impl OperationRequest {
    /// Create a request with the given variables.
    pub fn new(document: Document, variables: Variables) -> Self {
        Self {
            document,
            variables,
        }
    }

    /// Create a request without variables.
    pub fn without_variables(document: Document) -> Self {
        Self::new(document, Variables::new())
    }

    /// Stable cache key: operation name plus canonical (sorted) variables.
    pub fn cache_key(&self) -> String {
        let sorted: BTreeMap<&String, &Value> = self.variables.iter().collect();
        let vars = serde_json::to_string(&sorted).unwrap_or_default();
        format!("{}:{}", self.document.operation_name(), vars)
    }
}

/// The JSON body posted to a GraphQL endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
    pub operation_name: &'a str,
    #[serde(skip_serializing_if = "serde_json::Map::is_empty")]
    pub variables: &'a Variables,
}

impl<'a> From<&'a OperationRequest> for GraphQlRequest<'a> {
    fn from(request: &'a OperationRequest) -> Self {
        Self {
            query: request.document.source(),
            operation_name: request.document.operation_name(),
            variables: &request.variables,
        }
    }
}

/// A GraphQL response envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

/// One entry of a GraphQL `errors` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// An API credential, the entity listed by the demo tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub id: String,
    pub created_at: String,
    pub username: String,
}

/// Result shape of the `GetCredentials` query.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsQueryResult {
    #[serde(default)]
    pub get_credentials: Option<Vec<Credential>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cache_key_is_order_independent() {
        let doc = Document::query("GetThings", "query GetThings { things { id } }");
        let mut a = Variables::new();
        a.insert("b".to_string(), json!(2));
        a.insert("a".to_string(), json!(1));
        let mut b = Variables::new();
        b.insert("a".to_string(), json!(1));
        b.insert("b".to_string(), json!(2));

        let ra = OperationRequest::new(doc.clone(), a);
        let rb = OperationRequest::new(doc, b);
        assert_eq!(ra.cache_key(), rb.cache_key());
        assert_eq!(ra.cache_key(), r#"GetThings:{"a":1,"b":2}"#);
    }

    #[test]
    fn test_graphql_request_serialization() {
        let doc = Document::mutation("DeleteThing", "mutation DeleteThing($id: ID!) { x }");
        let mut vars = Variables::new();
        vars.insert("id".to_string(), json!("42"));
        let request = OperationRequest::new(doc, vars);

        let body = serde_json::to_value(GraphQlRequest::from(&request)).unwrap();
        assert_eq!(body["operationName"], "DeleteThing");
        assert_eq!(body["variables"]["id"], "42");
    }

    #[test]
    fn test_graphql_request_omits_empty_variables() {
        let request = OperationRequest::without_variables(Document::query("Q", "query Q { a }"));
        let body = serde_json::to_value(GraphQlRequest::from(&request)).unwrap();
        assert!(body.get("variables").is_none());
    }

    #[test]
    fn test_credentials_result_tolerates_missing_field() {
        let parsed: CredentialsQueryResult = serde_json::from_value(json!({})).unwrap();
        assert!(parsed.get_credentials.is_none());

        let parsed: CredentialsQueryResult = serde_json::from_value(json!({
            "getCredentials": [{"id": "1", "createdAt": "2024-01-02T00:00:00Z", "username": "ada"}]
        }))
        .unwrap();
        assert_eq!(parsed.get_credentials.unwrap()[0].username, "ada");
    }

    #[test]
    fn test_document_kind() {
        assert!(Document::mutation("M", "mutation M { a }").is_mutation());
        assert!(!Document::query("Q", "query Q { a }").is_mutation());
    }
}
