// ABOUTME: OAuth2 authorization-code client used for Google sign-in
// ABOUTME: Loads Google client secrets, builds authorization URLs and exchanges codes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # OAuth 2.0 Client
//!
//! Generic authorization-code client plus the loader for the
//! `client_secret.json` file downloaded from the Google Cloud console.

use std::fs;
use std::path::Path;
use std::time::Duration as StdDuration;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Duration, Utc};
use reqwest::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};
use url::Url;

/// Google authorization endpoint
pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/auth";
/// Google token endpoint
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
/// Scopes requested for Google sign-in
pub const GOOGLE_SCOPES: &[&str] = &[
    "openid",
    "https://www.googleapis.com/auth/userinfo.email",
    "https://www.googleapis.com/auth/userinfo.profile",
];

/// Fallback token lifetime when the provider omits or overflows `expires_in`
const DEFAULT_TOKEN_EXPIRY_SECONDS: i64 = 3600;

/// OAuth 2.0 client configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct OAuth2Config {
    /// OAuth client ID from provider
    pub client_id: String,
    /// OAuth client secret from provider
    pub client_secret: String,
    /// Authorization endpoint URL
    pub auth_url: String,
    /// Token endpoint URL
    pub token_url: String,
    /// Redirect URI for OAuth callbacks
    pub redirect_uri: String,
    /// OAuth scopes to request
    pub scopes: Vec<String>,
}

impl std::fmt::Debug for OAuth2Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuth2Config")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("auth_url", &self.auth_url)
            .field("token_url", &self.token_url)
            .field("redirect_uri", &self.redirect_uri)
            .field("scopes", &self.scopes)
            .finish()
    }
}

/// Client entry of a Google `client_secret.json`
#[derive(Debug, Deserialize)]
struct GoogleClientEntry {
    client_id: String,
    client_secret: String,
    auth_uri: Option<String>,
    token_uri: Option<String>,
}

/// Top level of a Google `client_secret.json` (`web` or `installed` app)
#[derive(Debug, Deserialize)]
struct GoogleClientSecretFile {
    web: Option<GoogleClientEntry>,
    installed: Option<GoogleClientEntry>,
}

impl OAuth2Config {
    /// Parse the contents of a Google `client_secret.json`
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or has neither a `web` nor an
    /// `installed` section.
    pub fn from_google_client_secret(json: &str, redirect_uri: &str) -> Result<Self> {
        let file: GoogleClientSecretFile =
            serde_json::from_str(json).context("Malformed Google client secret file")?;
        let Some(entry) = file.web.or(file.installed) else {
            bail!("Google client secret file has no 'web' or 'installed' section");
        };

        Ok(Self {
            client_id: entry.client_id,
            client_secret: entry.client_secret,
            auth_url: entry.auth_uri.unwrap_or_else(|| GOOGLE_AUTH_URL.to_owned()),
            token_url: entry.token_uri.unwrap_or_else(|| GOOGLE_TOKEN_URL.to_owned()),
            redirect_uri: redirect_uri.to_owned(),
            scopes: GOOGLE_SCOPES.iter().map(|s| (*s).to_owned()).collect(),
        })
    }

    /// Load a Google `client_secret.json` from disk
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load_google_client_secret(path: &Path, redirect_uri: &str) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read {}", path.display()))?;
        Self::from_google_client_secret(&json, redirect_uri)
    }
}

/// OAuth 2.0 access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuth2Token {
    /// The access token string
    pub access_token: String,
    /// Token type (usually "Bearer")
    pub token_type: String,
    /// Expiration timestamp (UTC)
    pub expires_at: Option<DateTime<Utc>>,
    /// Optional refresh token
    pub refresh_token: Option<String>,
    /// Granted OAuth scopes
    pub scope: Option<String>,
    /// `OpenID` Connect identity token
    pub id_token: Option<String>,
}

/// OAuth 2.0 token response from provider
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_token_type")]
    token_type: String,
    expires_in: Option<u64>,
    refresh_token: Option<String>,
    scope: Option<String>,
    id_token: Option<String>,
}

fn default_token_type() -> String {
    "Bearer".to_owned()
}

/// OAuth 2.0 authorization-code client
pub struct OAuth2Client {
    config: OAuth2Config,
    client: Client,
}

impl OAuth2Client {
    /// Create a new `OAuth2` client with the given configuration
    #[must_use]
    pub fn new(config: OAuth2Config) -> Self {
        let client = ClientBuilder::new()
            .timeout(StdDuration::from_secs(15))
            .connect_timeout(StdDuration::from_secs(5))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { config, client }
    }

    /// Get the `OAuth2` configuration
    #[must_use]
    pub const fn config(&self) -> &OAuth2Config {
        &self.config
    }

    /// Get authorization URL
    ///
    /// # Errors
    ///
    /// Returns an error if the authorization URL is malformed
    pub fn get_authorization_url(&self, state: &str) -> Result<String> {
        let mut url = Url::parse(&self.config.auth_url).context("Invalid auth URL")?;

        url.query_pairs_mut()
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", &self.config.redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", &self.config.scopes.join(" "))
            .append_pair("access_type", "offline")
            .append_pair("state", state);

        Ok(url.to_string())
    }

    /// Exchange authorization code for tokens
    ///
    /// # Errors
    ///
    /// Returns an error if the token request fails, the provider rejects the
    /// code, or the response is invalid
    pub async fn exchange_code(&self, code: &str) -> Result<OAuth2Token> {
        let params = [
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("code", code),
            ("grant_type", "authorization_code"),
            ("redirect_uri", self.config.redirect_uri.as_str()),
        ];

        let response: TokenResponse = self
            .client
            .post(&self.config.token_url)
            .form(&params)
            .send()
            .await
            .context("Token request failed")?
            .error_for_status()
            .context("Token endpoint rejected the authorization code")?
            .json()
            .await
            .context("Invalid token response")?;

        Ok(Self::token_from_response(response))
    }

    fn token_from_response(response: TokenResponse) -> OAuth2Token {
        let expires_at = response
            .expires_in
            .map(|seconds| expiry_after(Utc::now(), seconds));

        OAuth2Token {
            access_token: response.access_token,
            token_type: response.token_type,
            expires_at,
            refresh_token: response.refresh_token,
            scope: response.scope,
            id_token: response.id_token,
        }
    }
}

impl std::fmt::Debug for OAuth2Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuth2Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// `now + expires_in`, falling back to the default lifetime when the provider's value overflows
fn expiry_after(now: DateTime<Utc>, expires_in: u64) -> DateTime<Utc> {
    i64::try_from(expires_in)
        .ok()
        .and_then(Duration::try_seconds)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .unwrap_or_else(|| now + Duration::seconds(DEFAULT_TOKEN_EXPIRY_SECONDS))
}
