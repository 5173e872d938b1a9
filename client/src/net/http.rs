//! Minimal HTTP transport shared by the backend and identity clients.
//!
//! Client-side (hydrate): real requests via `gloo-net`.
//! Server-side (SSR) and native tests: every call reports
//! [`TransportError::Unavailable`], since both collaborators are only
//! reachable from the browser.

#![allow(clippy::unused_async)]

/// HTTP verbs used by the clients.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// Status and raw body of a completed request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum TransportError {
    Unavailable,
    Failed(String),
}

/// Send one request and collect the status and body text.
pub(crate) async fn send(
    method: Method,
    url: &str,
    headers: &[(&str, String)],
    body: Option<&serde_json::Value>,
) -> Result<RawResponse, TransportError> {
    #[cfg(feature = "hydrate")]
    {
        use gloo_net::http::RequestBuilder;

        let mut builder: RequestBuilder = match method {
            Method::Get => gloo_net::http::Request::get(url),
            Method::Post => gloo_net::http::Request::post(url),
            Method::Put => gloo_net::http::Request::put(url),
            Method::Delete => gloo_net::http::Request::delete(url),
        };
        for (name, value) in headers {
            builder = builder.header(name, value);
        }
        let resp = match body {
            Some(body) => builder
                .json(body)
                .map_err(|e| TransportError::Failed(e.to_string()))?
                .send()
                .await,
            None => builder.send().await,
        }
        .map_err(|e| TransportError::Failed(e.to_string()))?;

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        Ok(RawResponse { status, body })
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (method, url, headers, body);
        Err(TransportError::Unavailable)
    }
}
