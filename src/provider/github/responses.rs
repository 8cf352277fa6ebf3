//! Response models for the GitHub Actions secrets and variables API.

use serde::Deserialize;

/// One page of the repository secrets listing
#[derive(Debug, Deserialize)]
pub struct SecretsPage {
    pub total_count: u64,
    pub secrets: Vec<SecretInfo>,
}

/// Repository secret metadata (the API never returns secret values)
#[derive(Debug, Deserialize)]
pub struct SecretInfo {
    pub name: String,
}

/// One page of the repository variables listing
#[derive(Debug, Deserialize)]
pub struct VariablesPage {
    pub total_count: u64,
    pub variables: Vec<VariableInfo>,
}

/// Repository variable with its value
#[derive(Debug, Deserialize)]
pub struct VariableInfo {
    pub name: String,
    pub value: String,
}

/// Repository public key used to seal secret values before upload
#[derive(Debug, Deserialize)]
pub struct PublicKeyResponse {
    pub key_id: String,
    pub key: String,
}

/// Standard GitHub API error body
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub message: String,
    #[serde(default)]
    pub documentation_url: Option<String>,
}
