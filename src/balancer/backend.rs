//! Backend abstraction.
//!
//! # Responsibilities
//! - Represent a single upstream server
//! - Expose the liveness query the balancer reads before selection
//! - Forward one exchange to the upstream as a transparent proxy

use std::future::Future;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::{
    body::Body,
    http::{
        header,
        uri::{Authority, PathAndQuery, Scheme},
        HeaderValue, Request, StatusCode, Uri,
    },
    response::{IntoResponse, Response},
};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use url::Url;

use crate::balancer::BalancerError;

/// HTTP client shared by all backends for upstream I/O.
pub type HttpClient = Client<HttpConnector, Body>;

/// Capability set of one upstream target.
///
/// Exactly one production implementor exists (`ProxyBackend`); tests are free
/// to supply doubles (fixed-alive, failing-forward) without touching the
/// balancer.
pub trait Backend: Send + Sync + 'static {
    /// The immutable upstream address.
    fn address(&self) -> &str;

    /// Whether this backend should currently receive traffic.
    fn is_alive(&self) -> bool;

    /// Forward one exchange to the upstream and return its response.
    ///
    /// Must always resolve to a terminating response; transport failures are
    /// surfaced as a gateway-level error response, never as a hang.
    fn forward(&self, request: Request<Body>) -> impl Future<Output = Response> + Send;
}

/// The production backend: proxies exchanges to one upstream server.
#[derive(Debug)]
pub struct ProxyBackend {
    /// Validated upstream URL, immutable after construction.
    url: Url,
    /// Pre-built authority for URI and Host rewriting.
    authority: Authority,
    /// Pre-built Host header value.
    host_header: HeaderValue,
    /// Liveness flag, written out-of-band by an external health collaborator.
    alive: AtomicBool,
    /// Shared upstream client.
    client: HttpClient,
}

impl ProxyBackend {
    /// Create a backend from an absolute http URL.
    pub fn new(addr: &str, client: HttpClient) -> Result<Self, BalancerError> {
        let invalid = |reason: String| BalancerError::InvalidBackend {
            url: addr.to_string(),
            reason,
        };

        let url = Url::parse(addr).map_err(|e| invalid(e.to_string()))?;
        if url.scheme() != "http" {
            return Err(invalid(format!(
                "unsupported scheme '{}'; only http is supported",
                url.scheme()
            )));
        }
        let host = url
            .host_str()
            .ok_or_else(|| invalid("missing host".to_string()))?;

        let authority_str = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };
        let authority =
            Authority::from_str(&authority_str).map_err(|e| invalid(e.to_string()))?;
        let host_header =
            HeaderValue::from_str(&authority_str).map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            url,
            authority,
            host_header,
            alive: AtomicBool::new(true),
            client,
        })
    }

    /// Update the liveness flag.
    ///
    /// This is the write point for an external health-checking collaborator;
    /// nothing in the dispatch path calls it.
    pub fn set_alive(&self, alive: bool) {
        self.alive.store(alive, Ordering::Relaxed);
    }
}

impl Backend for ProxyBackend {
    fn address(&self) -> &str {
        self.url.as_str()
    }

    fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Relaxed)
    }

    fn forward(&self, request: Request<Body>) -> impl Future<Output = Response> + Send {
        async move {
            let (mut parts, body) = request.into_parts();

            // Retarget the URI at the upstream; path and query pass through
            // verbatim.
            let mut uri_parts = parts.uri.clone().into_parts();
            uri_parts.scheme = Some(Scheme::HTTP);
            uri_parts.authority = Some(self.authority.clone());
            if uri_parts.path_and_query.is_none() {
                uri_parts.path_and_query = Some(PathAndQuery::from_static("/"));
            }
            parts.uri = match Uri::from_parts(uri_parts) {
                Ok(uri) => uri,
                Err(e) => {
                    tracing::error!(backend = %self.url, error = %e, "Failed to build upstream URI");
                    return (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response();
                }
            };

            // Host names the upstream now; every other header passes through.
            parts.headers.insert(header::HOST, self.host_header.clone());

            match self.client.request(Request::from_parts(parts, body)).await {
                Ok(response) => {
                    let (parts, body) = response.into_parts();
                    Response::from_parts(parts, Body::new(body))
                }
                Err(e) => {
                    tracing::error!(backend = %self.url, error = %e, "Upstream request failed");
                    (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
                }
            }
        }
    }
}
