//! API Client
//!
//! Thin typed wrapper over the HTTP API with the interceptor behavior the
//! server assumes of its clients:
//! - bearer token injection on private routes
//! - one single-flight token refresh and replay after a 401
//! - retry with a fixed backoff schedule for transient failures on
//!   idempotent requests
//! - forced logout when the refresh itself fails

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time::sleep;

use crate::config::ClientConfig;
use crate::dto::{
    ChangePasswordPayload, ContactListResponse, ContactPayload, ContactView, LoginPayload,
    LoginResponse, RefreshResponse, RegisterPayload, RegisterResponse,
};
use crate::error::{ClientError, ClientResult};
use crate::refresh::{RefreshCoordinator, RefreshOutcome};
use crate::session::{SessionStore, SessionUser};

/// Called when the session is cleared because a refresh failed
pub type ForcedLogoutHook = Box<dyn Fn() + Send + Sync>;

/// Typed API client with a shared session
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    session: Arc<SessionStore>,
    refresh: RefreshCoordinator,
    on_forced_logout: Option<ForcedLogoutHook>,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let session = Arc::new(SessionStore::new(&config));
        session.init();

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            config,
            session,
            refresh: RefreshCoordinator::new(),
            on_forced_logout: None,
        })
    }

    /// Register a callback fired on forced logout
    pub fn on_forced_logout(mut self, hook: ForcedLogoutHook) -> Self {
        self.on_forced_logout = Some(hook);
        self
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    // ========================================================================
    // Auth API
    // ========================================================================

    /// POST /api/v1/auth/register (public)
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        role: Option<&str>,
    ) -> ClientResult<SessionUser> {
        let payload = RegisterPayload {
            email: email.to_string(),
            password: password.to_string(),
            role: role.map(str::to_string),
        };

        let response: RegisterResponse = self
            .request(Method::POST, "/api/v1/auth/register", Some(&payload), false)
            .await?;

        Ok(response.user)
    }

    /// POST /api/v1/auth/login (public); stores the session on success
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<SessionUser> {
        let payload = LoginPayload {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response: LoginResponse = self
            .request(Method::POST, "/api/v1/auth/login", Some(&payload), false)
            .await?;

        self.session
            .login(response.user.clone(), response.token);
        self.refresh.reset().await;

        Ok(response.user)
    }

    /// Clear the local session. The server keeps no session state.
    pub fn logout(&self) {
        self.session.logout();
    }

    /// PATCH /api/v1/auth/change-password (private)
    pub async fn change_password(&self, current: &str, new: &str) -> ClientResult<()> {
        let payload = ChangePasswordPayload {
            current_password: current.to_string(),
            new_password: new.to_string(),
        };

        let _: Value = self
            .request(
                Method::PATCH,
                "/api/v1/auth/change-password",
                Some(&payload),
                true,
            )
            .await?;

        Ok(())
    }

    // ========================================================================
    // Contacts API (all private)
    // ========================================================================

    pub async fn create_contact(&self, payload: &ContactPayload) -> ClientResult<ContactView> {
        self.request(Method::POST, "/api/v1/contacts", Some(payload), true)
            .await
    }

    pub async fn list_contacts(&self) -> ClientResult<Vec<ContactView>> {
        let response: ContactListResponse = self
            .request::<(), _>(Method::GET, "/api/v1/contacts", None, true)
            .await?;
        Ok(response.contacts)
    }

    pub async fn get_contact(&self, id: &str) -> ClientResult<ContactView> {
        self.request::<(), _>(Method::GET, &format!("/api/v1/contacts/{}", id), None, true)
            .await
    }

    pub async fn update_contact(
        &self,
        id: &str,
        payload: &ContactPayload,
    ) -> ClientResult<ContactView> {
        self.request(
            Method::PUT,
            &format!("/api/v1/contacts/{}", id),
            Some(payload),
            true,
        )
        .await
    }

    pub async fn delete_contact(&self, id: &str) -> ClientResult<()> {
        self.request_no_content::<()>(
            Method::DELETE,
            &format!("/api/v1/contacts/{}", id),
            None,
            true,
        )
        .await
    }

    // ========================================================================
    // Request pipeline
    // ========================================================================

    async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        private: bool,
    ) -> ClientResult<T>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.execute(method, path, body, private).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn request_no_content<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        private: bool,
    ) -> ClientResult<()>
    where
        B: serde::Serialize + ?Sized,
    {
        self.execute(method, path, body, private).await?;
        Ok(())
    }

    async fn execute<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        private: bool,
    ) -> ClientResult<reqwest::Response>
    where
        B: serde::Serialize + ?Sized,
    {
        let url = format!("{}{}", self.config.base_url, path);
        let mut attempt = 0u32;
        let mut refreshed = false;

        loop {
            // Observed together with the token: if a concurrent request
            // refreshes after this point, our 401 is already answered
            let seen = self.refresh.generation();

            let mut builder = self.http.request(method.clone(), &url);
            if private {
                if let Some(token) = self.session.token() {
                    builder = builder.bearer_auth(token);
                }
            }
            if let Some(body) = body {
                builder = builder.json(body);
            }

            let error = match builder.send().await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        return Ok(response);
                    }

                    // One refresh-and-replay per request; the replay
                    // itself never triggers another refresh
                    if status == StatusCode::UNAUTHORIZED && private && !refreshed {
                        refreshed = true;
                        match self.refresh_token(seen).await {
                            RefreshOutcome::Ready => continue,
                            // Only the request that ran the refresh clears
                            // the session; queued ones share its error
                            RefreshOutcome::Failed(e) => {
                                self.force_logout();
                                return Err(e);
                            }
                            RefreshOutcome::AlreadyFailed => {
                                return Err(ClientError::RefreshFailed);
                            }
                        }
                    }

                    api_error(response).await
                }
                Err(e) => ClientError::Network(e),
            };

            if error.is_retryable()
                && is_idempotent(&method)
                && self.config.retry.can_retry(attempt)
            {
                let delay = self.config.retry.delay_for_attempt(attempt);
                tracing::warn!(
                    attempt = attempt + 1,
                    delay_ms = delay.as_millis() as u64,
                    error = %error,
                    "Retrying request"
                );
                sleep(delay).await;
                attempt += 1;
                continue;
            }

            return Err(error);
        }
    }

    /// POST /api/v1/auth/refresh, single-flight across concurrent requests
    async fn refresh_token(&self, seen: u64) -> RefreshOutcome {
        self.refresh
            .run(seen, || async {
                let token = self.session.token().ok_or(ClientError::Unauthorized)?;
                let url = format!("{}/api/v1/auth/refresh", self.config.base_url);

                // Tighter timeout than normal calls; a hung refresh would
                // stall every queued request behind the lock
                let response = self
                    .http
                    .post(&url)
                    .bearer_auth(token)
                    .timeout(self.config.refresh_timeout)
                    .send()
                    .await
                    .map_err(|_| ClientError::RefreshFailed)?;

                if !response.status().is_success() {
                    return Err(ClientError::RefreshFailed);
                }

                let body: RefreshResponse = response
                    .json()
                    .await
                    .map_err(|_| ClientError::RefreshFailed)?;

                self.session.set_token(body.token);
                tracing::debug!("Token refreshed");
                Ok(())
            })
            .await
    }

    fn force_logout(&self) {
        tracing::warn!("Session refresh failed, clearing session");
        self.session.logout();
        if let Some(hook) = &self.on_forced_logout {
            hook();
        }
    }
}

fn is_idempotent(method: &Method) -> bool {
    method == Method::GET
        || method == Method::HEAD
        || method == Method::OPTIONS
        || method == Method::PUT
}

/// Turn a non-success response into an error, mining the problem body
async fn api_error(response: reqwest::Response) -> ClientError {
    let status = response.status().as_u16();

    let message = match response.json::<Value>().await {
        Ok(body) => body
            .get("detail")
            .or_else(|| body.get("title"))
            .and_then(Value::as_str)
            .unwrap_or("Request failed")
            .to_string(),
        Err(_) => "Request failed".to_string(),
    };

    ClientError::Api { status, message }
}
