//! GraphQL documents used by the demo tables.

use super::types::Document;

pub const GET_CREDENTIALS_NAME: &str = "GetCredentials";
pub const CREATE_CREDENTIAL_NAME: &str = "CreateCredential";
pub const DELETE_CREDENTIAL_NAME: &str = "DeleteCredential";

const GET_CREDENTIALS_SOURCE: &str = r#"query GetCredentials {
  getCredentials {
    id
    createdAt
    username
  }
}"#;

const CREATE_CREDENTIAL_SOURCE: &str = r#"mutation CreateCredential {
  createCredential {
    id
    createdAt
    username
  }
}"#;

const DELETE_CREDENTIAL_SOURCE: &str = r#"mutation DeleteCredential($credentialId: ID!) {
  deleteCredential(credentialId: $credentialId) {
    id
  }
}"#;

/// Lists every credential.
pub fn get_credentials() -> Document {
    Document::query(GET_CREDENTIALS_NAME, GET_CREDENTIALS_SOURCE)
}

/// Generates a new credential.
pub fn create_credential() -> Document {
    Document::mutation(CREATE_CREDENTIAL_NAME, CREATE_CREDENTIAL_SOURCE)
}

/// Deletes a credential by `credentialId`.
pub fn delete_credential() -> Document {
    Document::mutation(DELETE_CREDENTIAL_NAME, DELETE_CREDENTIAL_SOURCE)
}
