//! # GitHub Provider
//!
//! Native REST implementation of [`ActionsProvider`] for the GitHub Actions
//! secrets and variables API. Uses reqwest with rustls for HTTP.
//!
//! Secret values must be encrypted before upload: GitHub only accepts a
//! libsodium sealed box under the repository public key, base64-encoded.
//! Listings are paginated; both listing calls walk all pages.
//!
//! References:
//! - [Actions secrets REST API](https://docs.github.com/en/rest/actions/secrets)
//! - [Actions variables REST API](https://docs.github.com/en/rest/actions/variables)

mod responses;

pub use responses::*;

use crate::config::SyncConfig;
use crate::provider::ActionsProvider;
use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use crypto_box::aead::OsRng;
use reqwest::{Client, Method, StatusCode};
use serde_json::json;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

const DEFAULT_BASE_URL: &str = "https://api.github.com";
const PAGE_SIZE: u64 = 100;

/// GitHub REST client scoped to one repository
pub struct GithubProvider {
    http_client: Client,
    base_url: String,
    account: String,
    repo: String,
    token: String,
    public_key: tokio::sync::OnceCell<PublicKeyResponse>,
}

impl std::fmt::Debug for GithubProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubProvider")
            .field("account", &self.account)
            .field("repo", &self.repo)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GithubProvider {
    /// Create a client and resolve the target repository.
    ///
    /// The endpoint can be overridden via `GITHUB_API_URL` (used by tests and
    /// GitHub Enterprise installs). Resolution failure is fatal to the run:
    /// it means the account/repo pair or the token is wrong.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built or the repository
    /// cannot be resolved.
    pub async fn connect(config: &SyncConfig) -> Result<Self> {
        let base_url =
            std::env::var("GITHUB_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let http_client = Client::builder()
            .user_agent(concat!("gh-env-sync/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        let provider = Self {
            http_client,
            base_url,
            account: config.account.clone(),
            repo: config.repo.clone(),
            token: config.token.clone(),
            public_key: tokio::sync::OnceCell::new(),
        };

        provider.resolve_repo().await?;
        info!("Resolved repository {}/{}", provider.account, provider.repo);

        Ok(provider)
    }

    async fn resolve_repo(&self) -> Result<()> {
        let response = self
            .make_request(Method::GET, "")
            .send()
            .await
            .context("Failed to reach the GitHub API")?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let text = response.text().await.unwrap_or_default();
        Err(self.api_error(status, text))
            .context(format!("Repository {}/{} not found", self.account, self.repo))
    }

    /// Build a request against the repository, with auth headers applied.
    /// `path` is relative to `/repos/{account}/{repo}`.
    fn make_request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!(
            "{}/repos/{}/{}{}",
            self.base_url, self.account, self.repo, path
        );
        self.http_client
            .request(method, &url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
    }

    /// Decode a GitHub API error body into an error, falling back to the raw
    /// status and text when the body is not the standard shape.
    fn api_error(&self, status: StatusCode, error_text: String) -> anyhow::Error {
        if let Ok(error) = serde_json::from_str::<ApiErrorResponse>(&error_text) {
            anyhow::anyhow!(
                "GitHub API error: {} (status: {})",
                error.message,
                status.as_u16()
            )
        } else {
            anyhow::anyhow!("HTTP {} ({}): {}", status.as_u16(), status, error_text)
        }
    }

    /// Check a mutation response, surfacing API errors.
    async fn check_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let text = response.text().await.unwrap_or_default();
        Err(self.api_error(status, text))
    }

    /// Fetch the repository public key used to seal secret values. Cached for
    /// the lifetime of the client; every secret in a batch seals under the
    /// same key.
    async fn repo_public_key(&self) -> Result<&PublicKeyResponse> {
        self.public_key
            .get_or_try_init(|| async {
                debug!("Fetching repository public key");
                let response = self
                    .make_request(Method::GET, "/actions/secrets/public-key")
                    .send()
                    .await
                    .context("Failed to fetch repository public key")?;
                let status = response.status();
                if !status.is_success() {
                    let text = response.text().await.unwrap_or_default();
                    return Err(self.api_error(status, text));
                }
                response
                    .json::<PublicKeyResponse>()
                    .await
                    .context("Failed to parse repository public key response")
            })
            .await
    }
}

#[async_trait]
impl ActionsProvider for GithubProvider {
    async fn list_secret_names(&self) -> Result<BTreeSet<String>> {
        let mut names = BTreeSet::new();
        let mut page = 1u64;

        loop {
            let response = self
                .make_request(Method::GET, "/actions/secrets")
                .query(&[("per_page", PAGE_SIZE), ("page", page)])
                .send()
                .await
                .context("Failed to list repository secrets")?;

            let status = response.status();
            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                return Err(self.api_error(status, text));
            }

            let listing: SecretsPage = response
                .json()
                .await
                .context("Failed to parse secrets listing")?;
            let fetched = listing.secrets.len() as u64;
            names.extend(listing.secrets.into_iter().map(|s| s.name));

            if fetched < PAGE_SIZE || names.len() as u64 >= listing.total_count {
                break;
            }
            page += 1;
        }

        debug!("Found {} remote secrets", names.len());
        Ok(names)
    }

    async fn put_secret(&self, name: &str, value: &str) -> Result<()> {
        let public_key = self.repo_public_key().await?;
        let encrypted_value = seal_secret_value(&public_key.key, value)?;

        let response = self
            .make_request(Method::PUT, &format!("/actions/secrets/{name}"))
            .json(&json!({
                "encrypted_value": encrypted_value,
                "key_id": public_key.key_id,
            }))
            .send()
            .await
            .context(format!("Failed to store secret {name}"))?;

        self.check_response(response).await
    }

    async fn delete_secret(&self, name: &str) -> Result<()> {
        let response = self
            .make_request(Method::DELETE, &format!("/actions/secrets/{name}"))
            .send()
            .await
            .context(format!("Failed to delete secret {name}"))?;

        self.check_response(response).await
    }

    async fn list_variables(&self) -> Result<BTreeMap<String, String>> {
        let mut variables = BTreeMap::new();
        let mut page = 1u64;

        loop {
            let response = self
                .make_request(Method::GET, "/actions/variables")
                .query(&[("per_page", PAGE_SIZE), ("page", page)])
                .send()
                .await
                .context("Failed to list repository variables")?;

            let status = response.status();
            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                return Err(self.api_error(status, text));
            }

            let listing: VariablesPage = response
                .json()
                .await
                .context("Failed to parse variables listing")?;
            let fetched = listing.variables.len() as u64;
            variables.extend(listing.variables.into_iter().map(|v| (v.name, v.value)));

            if fetched < PAGE_SIZE || variables.len() as u64 >= listing.total_count {
                break;
            }
            page += 1;
        }

        debug!("Found {} remote variables", variables.len());
        Ok(variables)
    }

    async fn create_variable(&self, name: &str, value: &str) -> Result<()> {
        let response = self
            .make_request(Method::POST, "/actions/variables")
            .json(&json!({ "name": name, "value": value }))
            .send()
            .await
            .context(format!("Failed to create variable {name}"))?;

        self.check_response(response).await
    }

    async fn delete_variable(&self, name: &str) -> Result<()> {
        let response = self
            .make_request(Method::DELETE, &format!("/actions/variables/{name}"))
            .send()
            .await
            .context(format!("Failed to delete variable {name}"))?;

        self.check_response(response).await
    }
}

/// Seal a secret value for upload: libsodium sealed box under the repository
/// public key, base64 on both ends.
fn seal_secret_value(public_key_b64: &str, value: &str) -> Result<String> {
    let key_bytes: [u8; 32] = BASE64
        .decode(public_key_b64)
        .context("Repository public key is not valid base64")?
        .try_into()
        .map_err(|_| anyhow::anyhow!("Repository public key is not 32 bytes"))?;

    let public_key = crypto_box::PublicKey::from(key_bytes);
    let sealed = public_key
        .seal(&mut OsRng, value.as_bytes())
        .map_err(|_| anyhow::anyhow!("Sealed box encryption failed"))?;

    Ok(BASE64.encode(sealed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crypto_box::SecretKey;

    #[test]
    fn seal_produces_base64_with_sealed_box_overhead() {
        let secret_key = SecretKey::generate(&mut OsRng);
        let public_key_b64 = BASE64.encode(secret_key.public_key().as_bytes());

        let sealed = seal_secret_value(&public_key_b64, "hunter2").expect("seal");
        let raw = BASE64.decode(sealed).expect("valid base64");
        // Sealed boxes carry an ephemeral public key (32) plus a Poly1305 tag (16)
        assert_eq!(raw.len(), "hunter2".len() + 48);
    }

    #[test]
    fn seal_round_trips_against_the_secret_key() {
        let secret_key = SecretKey::generate(&mut OsRng);
        let public_key_b64 = BASE64.encode(secret_key.public_key().as_bytes());

        let sealed = seal_secret_value(&public_key_b64, "hunter2").expect("seal");
        let raw = BASE64.decode(sealed).expect("valid base64");
        let opened = secret_key.unseal(&raw).expect("open");
        assert_eq!(opened, b"hunter2");
    }

    #[test]
    fn seal_rejects_bad_public_keys() {
        assert!(seal_secret_value("not base64!!!", "v").is_err());
        let short = BASE64.encode([0u8; 16]);
        assert!(seal_secret_value(&short, "v").is_err());
    }
}
