//! Remote Platform Client
//!
//! Authenticates with the OAuth2 client-credentials grant and issues the
//! describe call for one object. [`MetadataSource`] is the seam the rest of the
//! crate depends on, so pipelines can run against a mock in tests.

use crate::error::{Error, Result};
use crate::metadata::ObjectDescribe;
use crate::urls::{describe_url, token_url};
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::info;

/// Client credentials for the connected app.
pub struct Credentials {
    pub client_id: String,
    pub client_secret: SecretString,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .finish()
    }
}

/// Anything that can produce the describe result for an object.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Fetches the field-level metadata for `object`.
    async fn describe(&self, object: &str) -> Result<ObjectDescribe>;
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// An authenticated connection to one org's REST API.
pub struct SalesforceClient {
    http: reqwest::Client,
    domain: String,
    version: String,
    access_token: SecretString,
    debug: bool,
}

impl SalesforceClient {
    /// Fetches an access token and returns a client ready for describe calls.
    ///
    /// # Arguments
    ///
    /// * `domain` - The org's My Domain host, e.g. `acme.my.salesforce.com`.
    /// * `version` - The REST API version, e.g. `v64.0`.
    /// * `credentials` - The connected app's client ID and secret.
    /// * `debug` - When set, each describe exchange is dumped to the log.
    pub async fn connect(
        domain: impl Into<String>,
        version: impl Into<String>,
        credentials: &Credentials,
        debug: bool,
    ) -> Result<Self> {
        let http = reqwest::Client::new();
        let domain = domain.into();
        let access_token = fetch_token(&http, &token_url(&domain), credentials).await?;

        Ok(Self {
            http,
            domain,
            version: version.into(),
            access_token,
            debug,
        })
    }
}

/// Runs the client-credentials grant against `url`.
pub async fn fetch_token(
    http: &reqwest::Client,
    url: &str,
    credentials: &Credentials,
) -> Result<SecretString> {
    info!(url, client_id = %credentials.client_id, "Requesting access token");

    let response = http
        .post(url)
        .header(ACCEPT, "application/json")
        .form(&[
            ("grant_type", "client_credentials"),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.expose_secret()),
        ])
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    token_from_response(status, body)
}

/// Interprets the token endpoint's reply.
pub fn token_from_response(status: StatusCode, body: String) -> Result<SecretString> {
    if !status.is_success() {
        return Err(Error::Authentication {
            status: status.as_u16(),
            body,
        });
    }

    let token: TokenResponse = serde_json::from_str(&body)?;
    Ok(SecretString::from(token.access_token))
}

/// Interprets the describe endpoint's reply. Only 200..=299 is success.
pub fn describe_from_response(status: StatusCode, body: String) -> Result<ObjectDescribe> {
    if !status.is_success() {
        return Err(Error::RemoteMetadata {
            status: status.as_u16(),
            body,
        });
    }

    Ok(serde_json::from_str(&body)?)
}

#[async_trait]
impl MetadataSource for SalesforceClient {
    async fn describe(&self, object: &str) -> Result<ObjectDescribe> {
        let url = describe_url(&self.domain, &self.version, object);
        info!(object, url = %url, "Fetching object metadata");

        let request = self
            .http
            .get(&url)
            .bearer_auth(self.access_token.expose_secret())
            .header(ACCEPT, "application/json")
            .build()?;

        if self.debug {
            info!(
                method = %request.method(),
                url = %request.url(),
                headers = ?redacted_headers(request.headers()),
                body = ?request.body().and_then(|b| b.as_bytes()).map(String::from_utf8_lossy),
                "Describe request"
            );
        }

        let response = self.http.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;

        if self.debug {
            info!(status = status.as_u16(), body = %body, "Describe response");
        }

        describe_from_response(status, body)
    }
}

/// Header pairs safe to print; the bearer token is masked.
pub fn redacted_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let shown = if *name == AUTHORIZATION {
                "[redacted]".to_string()
            } else {
                String::from_utf8_lossy(value.as_bytes()).into_owned()
            };
            (name.as_str().to_string(), shown)
        })
        .collect()
}
