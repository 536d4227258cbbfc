use crate::config::Config;
use crate::models::{
    catalog::{Product, Supplier},
    credentials::{Credentials, Profile},
    error::AppError,
    prices::{NewPrice, PriceObservation, PriceRecord},
    session::{AuthUser, Session},
};
use crate::services::backend::{AuthBackend, StoreBackend};
use chrono::{DateTime, Duration, Utc};
use gloo_storage::Storage;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::cell::RefCell;

// TABLES
const PRODUCTS_TABLE: &str = "products";
const SUPPLIERS_TABLE: &str = "suppliers";
const PRICES_TABLE: &str = "prices";
const USERS_TABLE: &str = "users";

const PRICE_HISTORY_SELECT: &str = "*,products(name),suppliers(name)";

// BACKEND CONFIGURATION
/// Where the managed backend lives and how to identify to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    base_url: String,
    anon_key: String,
    storage_key: String,
}

impl BackendConfig {
    /// Creates a builder for constructing a `BackendConfig`.
    pub fn builder() -> BackendConfigBuilder {
        BackendConfigBuilder::default()
    }

    /// Reads the URL and key baked in at build time.
    pub fn from_env() -> Result<Self, AppError> {
        let mut builder = Self::builder();
        if let Some(url) = Config::BACKEND_URL {
            builder = builder.base_url(url);
        }
        if let Some(key) = Config::ANON_KEY {
            builder = builder.anon_key(key);
        }
        builder.build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn anon_key(&self) -> &str {
        &self.anon_key
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Read URL for a table, e.g. `/rest/v1/products?select=*&order=name.asc`.
    pub fn select_url(&self, table: &str, select: &str, order: &str) -> String {
        format!(
            "{}/rest/v1/{table}?select={select}&order={order}",
            self.base_url
        )
    }

    pub fn insert_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }
}

// BACKEND CONFIGURATION BUILDER
#[derive(Debug, Default)]
pub struct BackendConfigBuilder {
    base_url: Option<String>,
    anon_key: Option<String>,
    storage_key: Option<String>,
}

impl BackendConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn anon_key(mut self, key: impl Into<String>) -> Self {
        self.anon_key = Some(key.into());
        self
    }

    /// Sets the local storage key for the persisted session (primarily for testing).
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = Some(key.into());
        self
    }

    pub fn build(self) -> Result<BackendConfig, AppError> {
        let base_url = self
            .base_url
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty())
            .ok_or_else(|| {
                AppError::ConfigError("PRICE_TRACKER_BACKEND_URL is not set".to_string())
            })?;
        let anon_key = self
            .anon_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| AppError::ConfigError("PRICE_TRACKER_ANON_KEY is not set".to_string()))?;

        Ok(BackendConfig {
            base_url,
            anon_key,
            storage_key: self
                .storage_key
                .unwrap_or_else(|| Config::SESSION_STORAGE_KEY.to_string()),
        })
    }
}

// API RESPONSE TYPES
#[derive(Deserialize, Debug)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: AuthUser,
}

impl TokenResponse {
    fn into_session(self, now: DateTime<Utc>) -> Session {
        let expires_at = self
            .expires_at
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .or_else(|| self.expires_in.map(|secs| now + Duration::seconds(secs)));

        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user,
        }
    }
}

/// Sign-up answers with a session, or with the bare user while confirmation is pending.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum SignUpResponse {
    Session(TokenResponse),
    User(AuthUser),
}

#[derive(Deserialize, Debug, Default)]
struct ErrorBody {
    message: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
}

#[derive(Serialize)]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    data: &'a Profile,
}

// SUPABASE CLIENT
/// REST client for the managed backend's auth and data APIs.
pub struct SupabaseClient {
    http: reqwest::Client,
    config: BackendConfig,
    session: RefCell<Option<Session>>,
}

impl SupabaseClient {
    /// Creates a new client from the build-time configuration.
    pub fn new() -> Result<Self, AppError> {
        Self::with_config(BackendConfig::from_env()?)
    }

    pub fn with_config(config: BackendConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            config,
            session: RefCell::new(None),
        })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Bearer token for data requests: the user's access token, else the anon key.
    fn bearer(&self) -> String {
        self.session
            .borrow()
            .as_ref()
            .map_or_else(|| self.config.anon_key.clone(), |s| s.access_token.clone())
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        log::debug!("{method} {url}");
        self.http
            .request(method, url)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(self.bearer())
    }

    /// Sends a request and turns transport failures and non-2xx answers into errors.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, AppError> {
        let response = request.send().await.map_err(classify_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_for_status(status, &body));
        }
        Ok(response)
    }

    async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T, AppError> {
        let response = self.send(self.request(reqwest::Method::GET, url)).await?;
        parse(response).await
    }

    async fn token(&self, grant_type: &str, body: &impl Serialize) -> Result<Session, AppError> {
        let url = self.config.auth_url(&format!("token?grant_type={grant_type}"));
        let request = self
            .http
            .post(&url)
            .header("apikey", &self.config.anon_key)
            .json(body);

        let response = self.send(request).await.map_err(as_auth_error)?;
        let token: TokenResponse = parse(response).await?;
        Ok(token.into_session(Utc::now()))
    }

    fn load_session(&self) -> Option<Session> {
        gloo_storage::LocalStorage::get(&self.config.storage_key).ok()
    }

    fn store_session(&self, session: Option<&Session>) {
        *self.session.borrow_mut() = session.cloned();

        let key = &self.config.storage_key;
        match session {
            Some(session) => {
                if let Err(e) = gloo_storage::LocalStorage::set(key, session) {
                    log::warn!("Failed to persist session: {e}");
                }
            }
            None => gloo_storage::LocalStorage::delete(key),
        }
    }
}

impl AuthBackend for SupabaseClient {
    async fn get_session(&self) -> Result<Option<Session>, AppError> {
        if let Some(session) = self.session.borrow().clone() {
            return Ok(Some(session));
        }

        let stored = self.load_session();
        self.session.borrow_mut().clone_from(&stored);
        Ok(stored)
    }

    async fn refresh_session(&self, session: &Session) -> Result<Session, AppError> {
        let grant = RefreshGrant {
            refresh_token: &session.refresh_token,
        };
        match self.token("refresh_token", &grant).await {
            Ok(fresh) => {
                self.store_session(Some(&fresh));
                Ok(fresh)
            }
            Err(e) => {
                self.store_session(None);
                Err(e)
            }
        }
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AppError> {
        let grant = PasswordGrant {
            email: &credentials.email,
            password: &credentials.password,
        };
        let session = self.token("password", &grant).await?;
        self.store_session(Some(&session));
        Ok(session)
    }

    async fn sign_up(
        &self,
        credentials: &Credentials,
        metadata: &Profile,
    ) -> Result<Option<Session>, AppError> {
        let body = SignUpRequest {
            email: &credentials.email,
            password: &credentials.password,
            data: metadata,
        };
        let request = self
            .http
            .post(self.config.auth_url("signup"))
            .header("apikey", &self.config.anon_key)
            .json(&body);

        let response = self.send(request).await.map_err(as_auth_error)?;
        match parse(response).await? {
            SignUpResponse::Session(token) => {
                let session = token.into_session(Utc::now());
                self.store_session(Some(&session));
                Ok(Some(session))
            }
            SignUpResponse::User(user) => {
                log::info!("Account {} awaits e-mail confirmation", user.id);
                Ok(None)
            }
        }
    }

    async fn sign_out(&self) -> Result<(), AppError> {
        let request = self.request(reqwest::Method::POST, &self.config.auth_url("logout"));
        self.send(request).await.map_err(as_auth_error)?;
        self.store_session(None);
        Ok(())
    }
}

impl StoreBackend for SupabaseClient {
    async fn select_products(&self) -> Result<Vec<Product>, AppError> {
        self.fetch(&self.config.select_url(PRODUCTS_TABLE, "*", "name.asc"))
            .await
    }

    async fn select_suppliers(&self) -> Result<Vec<Supplier>, AppError> {
        self.fetch(&self.config.select_url(SUPPLIERS_TABLE, "*", "name.asc"))
            .await
    }

    async fn select_price_history(&self) -> Result<Vec<PriceRecord>, AppError> {
        self.fetch(&self.config.select_url(
            PRICES_TABLE,
            PRICE_HISTORY_SELECT,
            "recorded_at.asc",
        ))
        .await
    }

    async fn insert_price(&self, row: &NewPrice) -> Result<Vec<PriceObservation>, AppError> {
        let request = self
            .request(reqwest::Method::POST, &self.config.insert_url(PRICES_TABLE))
            .header("Prefer", "return=representation")
            .json(&[row]);

        let response = self.send(request).await?;
        parse(response).await
    }

    async fn insert_profile(&self, row: &Profile) -> Result<(), AppError> {
        let request = self
            .request(reqwest::Method::POST, &self.config.insert_url(USERS_TABLE))
            .header("Prefer", "return=minimal")
            .json(&[row]);

        self.send(request).await.map(|_| ())
    }
}

async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, AppError> {
    response
        .json()
        .await
        .map_err(|e| AppError::DataError(format!("Failed to parse response: {e}")))
}

/// Converts a reqwest error into an appropriate `AppError`.
fn classify_error(error: reqwest::Error) -> AppError {
    if error.is_timeout() {
        AppError::ApiError(format!("Request timeout: {error}"))
    } else if error.is_request() {
        AppError::ApiError(format!("Request error: {error}"))
    } else {
        AppError::ApiError(format!("Network error: {error}"))
    }
}

/// Pulls the human-readable message out of an error body.
fn error_message(body: &str) -> String {
    let parsed = serde_json::from_str::<ErrorBody>(body).unwrap_or_default();
    parsed
        .message
        .or(parsed.msg)
        .or(parsed.error_description)
        .or(parsed.error)
        .unwrap_or_else(|| body.trim().to_string())
}

/// Creates an error based on HTTP status code.
fn error_for_status(status: reqwest::StatusCode, body: &str) -> AppError {
    let message = error_message(body);
    let message = if message.is_empty() {
        status.to_string()
    } else {
        message
    };

    match status.as_u16() {
        429 => AppError::RateLimited,
        401 | 403 => AppError::AuthError(message),
        404 => AppError::NotFound(message),
        400..=499 => AppError::ApiError(message),
        500..=599 => AppError::ApiError(format!("Server error {status}: {message}")),
        _ => AppError::ApiError(format!("Unexpected status {status}: {message}")),
    }
}

/// Auth endpoints reject bad credentials with plain 4xx codes.
fn as_auth_error(error: AppError) -> AppError {
    match error {
        AppError::ApiError(msg) => AppError::AuthError(msg),
        other => other,
    }
}
