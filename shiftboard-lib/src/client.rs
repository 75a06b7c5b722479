//! Main ShiftboardClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::auth::Session;
use crate::auth::TokenProvider;
use crate::error::ApiError;
use crate::error::Error;
use crate::rate_limit::ConcurrencyLimiter;
use crate::rate_limit::RetryConfig;

/// The client for the scheduling backend.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across tasks safely.
///
/// # Example
///
/// ```ignore
/// use shiftboard_lib::{ShiftboardClient, auth::Session};
///
/// let session = Session::with_token("my-token");
/// let client = ShiftboardClient::builder()
///     .url("http://localhost:8000")
///     .session(session.clone())
///     .build()?;
///
/// let employees = client.list_employees(Default::default()).await?;
/// ```
#[derive(Clone)]
pub struct ShiftboardClient {
    pub(crate) inner: Arc<ShiftboardClientInner>,
}

pub(crate) struct ShiftboardClientInner {
    pub(crate) base_url: Url,
    pub(crate) token_provider: Arc<dyn TokenProvider>,
    pub(crate) http_client: Client,
    pub(crate) timeout: Option<Duration>,
    pub(crate) retry_config: RetryConfig,
    pub(crate) concurrency_limiter: ConcurrencyLimiter,
}

impl ShiftboardClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> ShiftboardClientBuilder<Missing, Missing> {
        ShiftboardClientBuilder::new()
    }

    /// Returns the base URL of the backend.
    pub fn base_url(&self) -> &str {
        self.inner.base_url.as_str()
    }

    /// Returns the retry configuration in use.
    pub fn retry_config(&self) -> &RetryConfig {
        &self.inner.retry_config
    }
}

impl std::fmt::Debug for ShiftboardClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShiftboardClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`ShiftboardClient`].
///
/// Uses the typestate pattern to ensure required fields are set at compile time.
///
/// # Required Fields
///
/// - `url` - The backend base URL
/// - `session` or `token_provider` - where bearer tokens come from
///
/// # Example
///
/// ```ignore
/// let client = ShiftboardClient::builder()
///     .url("https://scheduler.example.com")
///     .session(session)
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// ```
pub struct ShiftboardClientBuilder<Url, Provider> {
    url: Url,
    token_provider: Provider,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    retry_config: RetryConfig,
    max_concurrency: Option<usize>,
    http_client: Option<Client>,
}

impl ShiftboardClientBuilder<Missing, Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            token_provider: Missing,
            timeout: None,
            connect_timeout: None,
            retry_config: RetryConfig::default(),
            max_concurrency: None,
            http_client: None,
        }
    }
}

impl Default for ShiftboardClientBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> ShiftboardClientBuilder<Missing, P> {
    /// Sets the backend base URL.
    ///
    /// The URL is validated when the client is built.
    pub fn url(self, url: impl Into<String>) -> ShiftboardClientBuilder<Set<String>, P> {
        ShiftboardClientBuilder {
            url: Set(url.into()),
            token_provider: self.token_provider,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            retry_config: self.retry_config,
            max_concurrency: self.max_concurrency,
            http_client: self.http_client,
        }
    }
}

impl<U> ShiftboardClientBuilder<U, Missing> {
    /// Uses an explicit session as the token source.
    ///
    /// Keep a clone of the session to observe a 401-triggered logout.
    pub fn session(self, session: Session) -> ShiftboardClientBuilder<U, Set<Arc<dyn TokenProvider>>> {
        self.token_provider(session)
    }

    /// Sets a custom token provider.
    pub fn token_provider<T: TokenProvider + 'static>(
        self,
        provider: T,
    ) -> ShiftboardClientBuilder<U, Set<Arc<dyn TokenProvider>>> {
        ShiftboardClientBuilder {
            url: self.url,
            token_provider: Set(Arc::new(provider) as Arc<dyn TokenProvider>),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            retry_config: self.retry_config,
            max_concurrency: self.max_concurrency,
            http_client: self.http_client,
        }
    }
}

impl<U, P> ShiftboardClientBuilder<U, P> {
    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the retry behavior for transient failures.
    pub fn retry(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Caps the number of requests in flight at once.
    pub fn max_concurrency(mut self, limit: usize) -> Self {
        self.max_concurrency = Some(limit);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl ShiftboardClientBuilder<Set<String>, Set<Arc<dyn TokenProvider>>> {
    /// Builds the [`ShiftboardClient`].
    ///
    /// This method is only available when both `url` and a token source have been set.
    pub fn build(self) -> Result<ShiftboardClient, Error> {
        let base_url = parse_base_url(&self.url.0)?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build().map_err(ApiError::from)?
            }
        };

        let concurrency_limiter = self
            .max_concurrency
            .map(ConcurrencyLimiter::new)
            .unwrap_or_default();

        Ok(ShiftboardClient {
            inner: Arc::new(ShiftboardClientInner {
                base_url,
                token_provider: self.token_provider.0,
                http_client,
                timeout: self.timeout,
                retry_config: self.retry_config,
                concurrency_limiter,
            }),
        })
    }
}

/// Parses and normalizes the backend URL so paths can be appended to it.
fn parse_base_url(raw: &str) -> Result<Url, Error> {
    let mut url = Url::parse(raw.trim()).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::InvalidUrl(format!("{raw}: scheme must be http or https")).into());
    }

    url.set_query(None);
    url.set_fragment(None);
    let trimmed = url.path().trim_end_matches('/').to_string();
    url.set_path(&trimmed);
    Ok(url)
}
