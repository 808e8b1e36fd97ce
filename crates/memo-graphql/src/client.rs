//! GraphQL HTTP client.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use memo_core::BackendUrl;
use memo_core::error::{Error, ProtocolError, TransportError};

/// Map a reqwest failure onto the transport taxonomy.
fn map_transport(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(transport)
}

/// Request envelope posted to the GraphQL endpoint.
#[derive(Debug, Serialize)]
struct GraphqlRequest<'a, V> {
    query: &'a str,
    variables: &'a V,
}

/// Response envelope from the GraphQL endpoint.
#[derive(Debug, Deserialize)]
struct GraphqlEnvelope<D> {
    data: Option<D>,
    #[serde(default)]
    errors: Vec<GraphqlErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorEntry {
    message: String,
    #[serde(default)]
    extensions: Option<GraphqlErrorExtensions>,
}

#[derive(Debug, Default, Deserialize)]
struct GraphqlErrorExtensions {
    #[serde(default)]
    code: Option<String>,
}

/// Error body shape used by the non-GraphQL endpoints.
#[derive(Debug, Deserialize)]
struct HttpErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client for the notes backend.
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    client: reqwest::Client,
    backend: BackendUrl,
}

impl GraphqlClient {
    /// Create a new client for the given backend.
    pub fn new(backend: BackendUrl) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("memo/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self { client, backend }
    }

    /// Returns the backend URL this client is configured for.
    pub fn backend(&self) -> &BackendUrl {
        &self.backend
    }

    /// Execute a GraphQL operation.
    ///
    /// Variables are deliberately not traced; they can carry
    /// credentials.
    #[instrument(skip(self, query, variables, token), fields(backend = %self.backend))]
    pub async fn execute<V, D>(
        &self,
        operation: &str,
        query: &str,
        variables: &V,
        token: Option<&str>,
    ) -> Result<D, Error>
    where
        V: Serialize,
        D: DeserializeOwned,
    {
        let url = self.backend.graphql_url();
        debug!(operation, "GraphQL request");

        let mut request = self
            .client
            .post(&url)
            .json(&GraphqlRequest { query, variables });
        if let Some(token) = token {
            request = request.headers(Self::auth_headers(token));
        }

        let response = request.send().await.map_err(map_transport)?;
        let status = response.status();
        trace!(status = %status, "GraphQL response");

        if !status.is_success() {
            return Err(Error::Protocol(Self::parse_error_response(response).await));
        }

        let envelope = response
            .json::<GraphqlEnvelope<D>>()
            .await
            .map_err(map_transport)?;

        // GraphQL errors arrive in-band on a 200; surface the first.
        if let Some(entry) = envelope.errors.into_iter().next() {
            let code = entry.extensions.and_then(|e| e.code);
            return Err(Error::Protocol(ProtocolError::new(
                status.as_u16(),
                code,
                Some(entry.message),
            )));
        }

        envelope.data.ok_or_else(|| {
            Error::Protocol(ProtocolError::new(
                status.as_u16(),
                None,
                Some("response missing data".to_string()),
            ))
        })
    }

    /// Upload raw bytes to an authed storage endpoint.
    #[instrument(skip(self, bytes, token), fields(backend = %self.backend, len = bytes.len()))]
    pub async fn put_bytes(&self, url: &str, bytes: Vec<u8>, token: &str) -> Result<(), Error> {
        debug!(url, "storage upload");

        let response = self
            .client
            .put(url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .headers(Self::auth_headers(token))
            .body(bytes)
            .send()
            .await
            .map_err(map_transport)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Error::Protocol(Self::parse_error_response(response).await))
        }
    }

    /// Fetch a JSON document from an authed endpoint.
    #[instrument(skip(self, token), fields(backend = %self.backend))]
    pub async fn get_json<D>(&self, url: &str, token: &str) -> Result<D, Error>
    where
        D: DeserializeOwned,
    {
        debug!(url, "storage query");

        let response = self
            .client
            .get(url)
            .headers(Self::auth_headers(token))
            .send()
            .await
            .map_err(map_transport)?;

        if response.status().is_success() {
            response.json::<D>().await.map_err(map_transport)
        } else {
            Err(Error::Protocol(Self::parse_error_response(response).await))
        }
    }

    /// Create authorization headers for authenticated requests.
    fn auth_headers(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", token);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth_value).expect("invalid token characters"),
        );
        headers
    }

    /// Parse a non-2xx response into a protocol error.
    async fn parse_error_response(response: reqwest::Response) -> ProtocolError {
        let status = response.status().as_u16();

        match response.json::<HttpErrorBody>().await {
            Ok(body) => ProtocolError::new(status, body.code, body.message),
            Err(_) => ProtocolError::new(status, None, None),
        }
    }
}
