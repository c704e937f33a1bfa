//! The fetch boundary.
//!
//! Everything the remote service can answer is turned into either a decoded body or an
//! [`ApiError`] here, so nothing downstream has to look at status codes or error payloads.

use serde::Serialize;
use serde::de::DeserializeOwned;
use storefront_types::wire::ErrorResponse;

use crate::credentials::AuthToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    /// Path relative to the service endpoint, e.g. `/products/search`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub bearer: Option<AuthToken>,
    pub body: Option<serde_json::Value>,
}

impl Request {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            query: Vec::new(),
            bearer: None,
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: &impl Serialize) -> Result<Self, ApiError> {
        let body = serde_json::to_value(body)
            .map_err(|e| ApiError::Network(format!("Failed to encode request body: {e}")))?;
        Ok(Self {
            method: Method::Post,
            path: path.into(),
            query: Vec::new(),
            bearer: None,
            body: Some(body),
        })
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn with_bearer(mut self, token: &AuthToken) -> Self {
        self.bearer = Some(token.clone());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

/// The request never produced a response: unreachable host, dropped connection, and so on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("transport error: {0}")]
pub struct TransportError(pub String);

/// An opaque request/response channel to the storefront service.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<Response, TransportError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// A 4xx carrying a message payload. The message is meant for the user as-is.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// 401: missing, expired or invalid token.
    #[error("{message}")]
    Unauthorized { message: String },

    /// 404 with an empty body.
    #[error("not found")]
    NotFound,

    /// Unreachable service, unexpected status, or a body that isn't the JSON we expected.
    #[error("network error: {0}")]
    Network(String),
}

impl From<TransportError> for ApiError {
    fn from(e: TransportError) -> Self {
        ApiError::Network(e.0)
    }
}

impl ApiError {
    /// The server-supplied message, for the failures that carry one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { message, .. } | ApiError::Unauthorized { message } => {
                Some(message.as_str())
            }
            ApiError::NotFound | ApiError::Network(_) => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::NotFound => Some(404),
            ApiError::Network(_) => None,
        }
    }
}

pub(crate) fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let Response { status, body } = response;
    if !(200..300).contains(&status) {
        return Err(classify_failure(status, &body));
    }
    serde_json::from_str(&body).map_err(|e| {
        ApiError::Network(format!(
            "Failed to parse response: {e}\nResponse body: {body}"
        ))
    })
}

/// Like [`decode`] for endpoints whose success body we don't care about.
pub(crate) fn expect_success(response: Response) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        Ok(())
    } else {
        Err(classify_failure(response.status, &response.body))
    }
}

fn classify_failure(status: u16, body: &str) -> ApiError {
    if status == 404 && is_empty_body(body) {
        return ApiError::NotFound;
    }

    let message = serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .map(|e| e.message);

    match (status, message) {
        (401, message) => ApiError::Unauthorized {
            message: message.unwrap_or_else(|| "Unauthorized".to_string()),
        },
        (400..=499, Some(message)) => ApiError::Rejected { status, message },
        (status, _) => ApiError::Network(format!("Request failed with status: {status}")),
    }
}

fn is_empty_body(body: &str) -> bool {
    matches!(body.trim(), "" | "[]" | "\"\"")
}

/// Typed access to the storefront service over some [`Transport`].
///
/// Endpoint methods live next to the code that uses them (`catalog`, `cart`, `register`).
#[derive(Debug)]
pub struct StorefrontApi<T> {
    transport: T,
}

impl<T: Transport> StorefrontApi<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub(crate) async fn send(&self, request: Request) -> Result<Response, ApiError> {
        let path = request.path.clone();
        self.transport
            .send(request)
            .await
            .inspect_err(|e| log::warn!("Request to {path} failed: {e}"))
            .map_err(ApiError::from)
    }

    pub(crate) async fn call<R: DeserializeOwned>(&self, request: Request) -> Result<R, ApiError> {
        decode(self.send(request).await?)
    }
}

/// [`Transport`] backed by a `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl ReqwestTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Transport for ReqwestTransport {
    fn send(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<Response, TransportError>> + Send {
        let url = format!("{}{}", self.endpoint, request.path);
        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        async move {
            let response = builder
                .send()
                .await
                .map_err(|e| TransportError(format!("{e}")))?;
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| TransportError(format!("{e}")))?;
            Ok(Response { status, body })
        }
    }
}
