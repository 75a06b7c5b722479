//! Request pipeline shared by every endpoint

use std::time::Duration;

use reqwest::Method;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::ShiftboardClient;
use crate::error::ApiError;
use crate::error::Error;
use crate::rate_limit::RetryCause;

impl ShiftboardClient {
    /// Joins an API path onto the base URL.
    pub(crate) fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.inner.base_url.as_str().trim_end_matches('/'), path)
    }

    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        headers
    }

    /// GETs `path` and decodes the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let response = self.request(Method::GET, path, None).await?;
        decode(response).await
    }

    /// Sends `body` as JSON and decodes the JSON answer.
    pub(crate) async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_string(body)?;
        let response = self.request(method, path, Some(body)).await?;
        decode(response).await
    }

    /// Sends a body-less request and discards the answer.
    pub(crate) async fn send_empty(&self, method: Method, path: &str) -> Result<(), Error> {
        self.request(method, path, None).await?;
        Ok(())
    }

    /// Makes an HTTP request with concurrency limiting and retry logic.
    ///
    /// A 401 answer clears the token source and yields [`Error::Unauthorized`].
    /// Other non-success answers become [`ApiError::Http`] with the backend's
    /// `detail` as message.
    pub(crate) async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<reqwest::Response, Error> {
        let url = self.build_url(path);
        let headers = self.default_headers();
        // Held for the entire request lifecycle including retries
        let _permit = self.inner.concurrency_limiter.acquire().await?;

        let retry_config = &self.inner.retry_config;
        let mut attempts = 0;
        let mut delay = retry_config.initial_delay;

        loop {
            log::debug!("[api] {} {} (attempt {})", method, path, attempts + 1);

            let result = self
                .send_request_inner(method.clone(), &url, headers.clone(), body.clone())
                .await;

            match result {
                Ok(response) => {
                    let status = response.status();

                    if status.as_u16() == 429 {
                        if !retry_config.allows(RetryCause::RateLimited, attempts) {
                            let retry_after = parse_retry_after(&response);
                            return Err(Error::RateLimit { retry_after });
                        }

                        let wait = parse_retry_after(&response).unwrap_or(delay);
                        log::warn!("[api] {} {} rate limited, waiting {:?}", method, path, wait);
                        tokio::time::sleep(wait).await;
                        attempts += 1;
                        continue;
                    }

                    if status.is_server_error() {
                        if !retry_config.allows(RetryCause::ServerError, attempts) {
                            let body = response.text().await.unwrap_or_default();
                            return Err(ApiError::from_body(status.as_u16(), body).into());
                        }

                        log::warn!("[api] {} {} answered {}, retrying in {:?}", method, path, status, delay);
                        tokio::time::sleep(delay).await;
                        delay = retry_config.next_delay(delay);
                        attempts += 1;
                        continue;
                    }

                    if status.as_u16() == 401 {
                        log::warn!("[api] {} {} unauthorized, clearing session", method, path);
                        self.inner.token_provider.invalidate().await;
                        return Err(Error::Unauthorized);
                    }

                    if status.is_success() {
                        return Ok(response);
                    }

                    let body = response.text().await.unwrap_or_default();
                    log::debug!("[api] {} {} failed with {}: {}", method, path, status, body);
                    return Err(ApiError::from_body(status.as_u16(), body).into());
                }
                Err(e) => {
                    let is_network = matches!(
                        &e,
                        Error::Api(ApiError::Network(_)) | Error::Api(ApiError::Timeout(_))
                    );

                    if is_network && retry_config.allows(RetryCause::Network, attempts) {
                        log::warn!("[api] {} {} failed ({}), retrying in {:?}", method, path, e, delay);
                        tokio::time::sleep(delay).await;
                        delay = retry_config.next_delay(delay);
                        attempts += 1;
                        continue;
                    }

                    return Err(e);
                }
            }
        }
    }

    /// Inner request method without retry logic.
    async fn send_request_inner(
        &self,
        method: Method,
        url: &str,
        headers: HeaderMap,
        body: Option<String>,
    ) -> Result<reqwest::Response, Error> {
        let token = self.inner.token_provider.get_token().await?;

        let mut request = self.inner.http_client.request(method, url).headers(headers);

        if let Some(token) = token {
            request = request.bearer_auth(&token.access_token);
        }

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        if let Some(body) = body {
            request = request.body(body);
        }

        request.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Api(ApiError::Timeout(self.inner.timeout.unwrap_or_default()))
            } else {
                Error::Api(ApiError::from(e))
            }
        })
    }
}

/// Reads the body and decodes it as JSON, keeping the raw text on failure.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, Error> {
    let text = response.text().await.map_err(ApiError::from)?;
    match serde_json::from_str(&text) {
        Ok(value) => Ok(value),
        Err(e) => Err(ApiError::parse_with_body(e.to_string(), text).into()),
    }
}

/// Turns a 404 answer into [`Error::NotFound`] for the given resource.
pub(crate) fn not_found(resource: &'static str, id: impl ToString) -> impl FnOnce(Error) -> Error {
    let id = id.to_string();
    move |err| {
        let missing = matches!(&err, Error::Api(api) if api.status_code() == Some(404));
        if missing {
            Error::NotFound { resource, id }
        } else {
            err
        }
    }
}

/// Percent-encodes one path segment.
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Parses the Retry-After header value (seconds).
fn parse_retry_after(response: &reqwest::Response) -> Option<Duration> {
    response
        .headers()
        .get("Retry-After")?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_only_404() {
        let mapped = not_found("employee", 7)(ApiError::http(404, "nope").into());
        assert!(matches!(mapped, Error::NotFound { resource: "employee", ref id } if id == "7"));

        let kept = not_found("employee", 7)(ApiError::http(500, "boom").into());
        assert_eq!(kept.status_code(), Some(500));

        let unauthorized = not_found("employee", 7)(Error::Unauthorized);
        assert!(matches!(unauthorized, Error::Unauthorized));
    }

    #[test]
    fn test_segment_is_percent_encoded() {
        assert_eq!(segment("a b/c"), "a%20b%2Fc");
        assert_eq!(segment("5f1c-2a"), "5f1c-2a");
    }
}
