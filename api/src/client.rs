//! The shared HTTP client.

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use taskhive_domain::{NewTask, Task};
use taskhive_session::TokenPair;
use taskhive_session::providers::CredentialStore;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::types::{ErrorBody, RefreshRequest, RefreshResponse, SignupBody, SignupResponse, TokenRequest, TokenResponse};

/// Remote client over one shared `reqwest::Client`.
///
/// Cloning is cheap; clones share the connection pool and the credential
/// store.
#[derive(Debug, Clone)]
pub struct ApiClient<C>
where
    C: CredentialStore + Clone,
{
    http: Client,
    config: ApiConfig,
    credentials: C,
}

impl<C> ApiClient<C>
where
    C: CredentialStore + Clone,
{
    /// Build the client with the fixed timeout and JSON default headers.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] when the underlying HTTP client
    /// cannot be constructed.
    pub fn new(config: ApiConfig, credentials: C) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Configuration(e.to_string()))?;

        Ok(Self {
            http,
            config,
            credentials,
        })
    }

    /// Absolute URL for an endpoint path (e.g. `"/tasks/"`).
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }

    /// Read the currently persisted credential.
    async fn held_credential(&self) -> Result<Option<TokenPair>, ApiError> {
        self.credentials
            .load()
            .await
            .map_err(|e| ApiError::Credentials(e.to_string()))
    }

    /// Send a request with the persisted credential attached as a bearer
    /// header. On 401, exchange the refresh token once and replay the
    /// request once.
    ///
    /// `build` constructs the request; it is called again for the replay
    /// because request bodies (multipart in particular) cannot be cloned.
    pub(crate) async fn send_authorized<F>(&self, build: F) -> Result<Response, ApiError>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let held = self.held_credential().await?;

        let mut request = build(&self.http);
        if let Some(ref pair) = held {
            request = request.bearer_auth(&pair.access);
        }

        let response = request.send().await.map_err(|e| ApiError::from_reqwest(&e))?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        // Unauthenticated requests have nothing to refresh; let the caller
        // see the rejection.
        let Some(pair) = held else {
            return Ok(response);
        };

        tracing::debug!("Got 401, attempting refresh-token exchange");
        let refreshed = self.refresh(&pair).await?;

        let replay = build(&self.http).bearer_auth(&refreshed.access);
        replay.send().await.map_err(|e| ApiError::from_reqwest(&e))
    }

    /// Exchange the refresh token for a new access token and persist the
    /// updated pair.
    async fn refresh(&self, held: &TokenPair) -> Result<TokenPair, ApiError> {
        let response = self
            .http
            .post(self.url("/token/refresh/"))
            .json(&RefreshRequest {
                refresh: held.refresh.clone(),
            })
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(&e))?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "Refresh-token exchange rejected");
            return Err(ApiError::Unauthorized);
        }

        let body: RefreshResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        let pair = TokenPair {
            access: body.access,
            refresh: body.refresh.unwrap_or_else(|| held.refresh.clone()),
        };

        self.credentials
            .save(&pair)
            .await
            .map_err(|e| ApiError::Credentials(e.to_string()))?;

        Ok(pair)
    }

    /// Decode a successful response body, or classify the rejection.
    pub(crate) async fn expect_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            return response.json().await.map_err(|e| ApiError::Decode(e.to_string()));
        }
        Err(Self::status_error(status, response).await)
    }

    /// Accept any successful status with no body of interest.
    pub(crate) async fn expect_success(response: Response) -> Result<(), ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(Self::status_error(status, response).await)
    }

    async fn status_error(status: StatusCode, response: Response) -> ApiError {
        if status == StatusCode::UNAUTHORIZED {
            return ApiError::Unauthorized;
        }

        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.detail)
            .unwrap_or(body);

        ApiError::Api {
            status: status.as_u16(),
            detail,
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Auth endpoints (no bearer attached)
    // ═══════════════════════════════════════════════════════════════════

    /// `POST /token/` - exchange credentials for a token pair.
    pub(crate) async fn post_token(
        &self,
        username: &str,
        password: &str,
    ) -> Result<TokenPair, ApiError> {
        let response = self
            .http
            .post(self.url("/token/"))
            .json(&TokenRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(&e))?;

        let body: TokenResponse = Self::expect_json(response).await?;
        Ok(TokenPair {
            access: body.access,
            refresh: body.refresh,
        })
    }

    /// `POST /signup/` - register an account.
    pub(crate) async fn post_signup(&self, body: SignupBody) -> Result<String, ApiError> {
        let response = self
            .http
            .post(self.url("/signup/"))
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(&e))?;

        let body: SignupResponse = Self::expect_json(response).await?;
        Ok(body
            .message
            .unwrap_or_else(|| "Account created, you can log in now".to_string()))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Multipart form builders (attachment support)
    // ═══════════════════════════════════════════════════════════════════

    /// Multipart form for `POST /tasks/`.
    pub(crate) fn creation_form(input: &NewTask) -> Form {
        let mut form = Form::new()
            .text("title", input.title.clone())
            .text("description", input.description.clone())
            .text("status", input.status.as_str())
            .text("priority", input.priority.as_str());

        if let Some(ref assignee) = input.assigned_to {
            form = form.text("assigned_to", assignee.id.0.to_string());
        }
        if let Some(due_date) = input.due_date {
            form = form.text("due_date", due_date.to_rfc3339());
        }
        if let Some(ref attachment) = input.attachment {
            form = form.part(
                "attachment",
                Part::bytes(attachment.bytes.clone()).file_name(attachment.file_name.clone()),
            );
        }

        form
    }

    /// Multipart form for `PUT /tasks/:id/` (full replace).
    ///
    /// The existing attachment reference is a server-side path; it is not
    /// resent.
    pub(crate) fn replacement_form(task: &Task) -> Form {
        let mut form = Form::new()
            .text("title", task.title.clone())
            .text("description", task.description.clone())
            .text("status", task.status.as_str())
            .text("priority", task.priority.as_str())
            .text("assigned_to", task.assigned_to.id.0.to_string());

        if let Some(due_date) = task.due_date {
            form = form.text("due_date", due_date.to_rfc3339());
        }

        form
    }
}
