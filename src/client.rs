use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use http::StatusCode;
use log::{debug, warn};
use reqwest::header::{ACCEPT, CONNECTION};
use reqwest::{Client as ReqwestClient, Method};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::api::devices::DeviceHandler;
use crate::{PrimeError, PrimeResult};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);
const API_ROOT_PATH: &str = "/webacs/api/v1";

/// Builder for [`ClientConfig`].
///
/// This builder provides a fluent API for describing a Prime Infrastructure
/// server with validation at build time.
#[derive(Default)]
pub struct ClientConfigBuilder {
    host: Option<String>,
    username: Option<String>,
    password: Option<String>,
    password_env: Option<String>,
    verify_tls: bool,
    timeout: Option<Duration>,
    api_root: Option<String>,
    user_agent: Option<String>,
}

impl ClientConfigBuilder {
    /// Sets the server host name or address, optionally with a port.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the username for basic authentication.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the password for basic authentication.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Reads the password from an environment variable when the config is
    /// built.
    pub fn password_from_env(mut self, var_name: impl Into<String>) -> Self {
        self.password_env = Some(var_name.into());
        self
    }

    /// Sets whether to verify the server's TLS certificate.
    pub fn verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }

    /// Sets the timeout applied to each HTTP request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Overrides the API root derived from the host
    /// (`https://{host}/webacs/api/v1`), e.g. behind a reverse proxy.
    pub fn api_root(mut self, api_root: impl Into<String>) -> Self {
        self.api_root = Some(api_root.into());
        self
    }

    /// Sets a custom user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn build(self) -> PrimeResult<ClientConfig> {
        let host = self.host.filter(|host| !host.trim().is_empty());

        let api_root = match (&self.api_root, &host) {
            (Some(root), _) => Url::parse(root.trim_end_matches('/')).map_err(|e| {
                PrimeError::ConfigurationError(format!("Invalid API root: {e}"))
            })?,
            (None, Some(host)) => Url::parse(&format!("https://{}{API_ROOT_PATH}", host.trim()))
                .map_err(|e| PrimeError::ConfigurationError(format!("Invalid host: {e}")))?,
            (None, None) => {
                return Err(PrimeError::ConfigurationError("Host is required".into()));
            }
        };

        let host = host
            .or_else(|| api_root.host_str().map(str::to_string))
            .ok_or_else(|| PrimeError::ConfigurationError("Host is required".into()))?;

        let username = self
            .username
            .filter(|username| !username.trim().is_empty())
            .ok_or_else(|| PrimeError::ConfigurationError("Username is required".into()))?;

        let password = match (self.password, self.password_env) {
            (Some(password), _) => Some(password),
            (None, Some(var_name)) => Some(std::env::var(&var_name).map_err(|e| {
                PrimeError::ConfigurationError(format!(
                    "Failed to read environment variable '{var_name}': {e}"
                ))
            })?),
            (None, None) => None,
        };
        let password = password
            .filter(|password| !password.trim().is_empty())
            .ok_or_else(|| PrimeError::ConfigurationError("Password is required".into()))?;

        Ok(ClientConfig {
            host,
            username,
            password: SecretString::from(password),
            verify_tls: self.verify_tls,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            api_root,
            user_agent: self.user_agent,
        })
    }
}

/// Connection settings for a Prime Infrastructure server.
///
/// Immutable once built; create one with [`ClientConfig::builder`].
pub struct ClientConfig {
    host: String,
    username: String,
    password: SecretString,
    verify_tls: bool,
    timeout: Duration,
    api_root: Url,
    user_agent: Option<String>,
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn verify_tls(&self) -> bool {
        self.verify_tls
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The API root every endpoint is resolved against.
    pub fn api_root(&self) -> &Url {
        &self.api_root
    }

    /// Base URL of the `data/` query endpoints.
    pub fn data_url(&self) -> String {
        format!("{}/data", self.api_root.as_str().trim_end_matches('/'))
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("verify_tls", &self.verify_tls)
            .field("timeout", &self.timeout)
            .field("api_root", &self.api_root.as_str())
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

/// Status and body of a response, read in full.
#[derive(Debug)]
pub(crate) struct RawResponse {
    status: StatusCode,
    body: String,
}

impl RawResponse {
    pub(crate) fn status(&self) -> StatusCode {
        self.status
    }

    /// Decodes the body, reporting a malformed or incomplete body as an
    /// unexpected response instead of a serialization failure.
    pub(crate) fn json<T: DeserializeOwned>(&self) -> PrimeResult<T> {
        serde_json::from_str(&self.body).map_err(|e| PrimeError::UnexpectedResponse {
            status: self.status,
            reason: format!("Unexpected response body: {e}"),
            body: self.body.clone(),
        })
    }

    pub(crate) fn unexpected(self, reason: impl Into<String>) -> PrimeError {
        PrimeError::UnexpectedResponse {
            status: self.status,
            reason: reason.into(),
            body: self.body,
        }
    }

    pub(crate) fn into_remote_error(self) -> PrimeError {
        PrimeError::RemoteError {
            status: self.status,
            body: self.body,
        }
    }
}

/// The main client for the Prime Infrastructure REST API.
///
/// Cloning is cheap: clones share the configuration and the underlying
/// connection pool.
#[derive(Clone)]
pub struct PrimeClient {
    config: Arc<ClientConfig>,
    http_client: ReqwestClient,
}

impl fmt::Debug for PrimeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrimeClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl PrimeClient {
    /// Creates a client with its own connection pool.
    ///
    /// TLS verification is applied to this client only. When it is disabled a
    /// warning is logged once here rather than on every request.
    pub fn new(config: ClientConfig) -> PrimeResult<Self> {
        let user_agent = config
            .user_agent
            .as_deref()
            .unwrap_or(concat!("prime-client/", env!("CARGO_PKG_VERSION")));

        let http_client = ReqwestClient::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(!config.verify_tls)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                PrimeError::ConfigurationError(format!("Failed to create HTTP client: {e}"))
            })?;

        if !config.verify_tls {
            warn!(
                "TLS certificate verification is disabled for {}",
                config.host
            );
        }

        Ok(Self::with_http_client(config, http_client))
    }

    /// Creates a client on top of a caller-supplied `reqwest` client (e.g.
    /// for custom middleware). Timeout and TLS settings of `config` are not
    /// applied to it; credentials and the `Accept`/`Connection` headers are,
    /// since they are set on every request.
    pub fn with_http_client(config: ClientConfig, http_client: ReqwestClient) -> Self {
        Self {
            config: Arc::new(config),
            http_client,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Gets the device inventory API interface.
    pub fn devices(&self) -> DeviceHandler {
        DeviceHandler::new(self.clone())
    }

    /// Resolves a path such as `data/Devices` against the API root.
    pub(crate) fn endpoint(&self, path: &str) -> PrimeResult<Url> {
        let root = self.config.api_root.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{root}/{path}"))?)
    }

    /// Sends one authenticated request and reads the whole response body.
    ///
    /// Any status is returned as-is; only transport failures are errors.
    pub(crate) async fn send<B>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> PrimeResult<RawResponse>
    where
        B: Serialize + ?Sized,
    {
        debug!("{} {}", method, url);

        let mut request = self
            .http_client
            .request(method, url)
            .basic_auth(
                &self.config.username,
                Some(self.config.password.expose_secret()),
            )
            .header(ACCEPT, "application/json")
            .header(CONNECTION, "keep-alive");

        if let Some(data) = body {
            request = request.json(data);
        }

        let response = request.send().await.map_err(PrimeError::from_transport)?;
        let status = response.status();
        let body = response.text().await.map_err(PrimeError::from_transport)?;

        debug!("response status {}", status);

        Ok(RawResponse { status, body })
    }

    /// Makes a raw GET against a path below the API root and returns the
    /// decoded JSON body.
    ///
    /// # Warning
    ///
    /// This bypasses the typed device operations; use [`PrimeClient::devices`]
    /// when possible. Non-200 statuses are reported as
    /// [`PrimeError::RemoteError`].
    pub async fn raw_get(&self, path: &str) -> PrimeResult<Value> {
        let url = self.endpoint(path.trim_start_matches('/'))?;
        let response = self.send(Method::GET, url, None::<&()>).await?;

        if response.status() != StatusCode::OK {
            return Err(response.into_remote_error());
        }

        response.json()
    }
}
