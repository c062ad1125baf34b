//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. The store builds `HttpRequest`
//! values and consumes `HttpResponse` values without ever touching the
//! network — the host (a UI shell, a test harness) executes the actual
//! round-trip. This keeps the core deterministic and lets several
//! operations be in flight at once: each one is just a value the host
//! completes whenever its response arrives.

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// An HTTP request described as plain data.
///
/// Built by [`TodoApi`](crate::TodoApi) and carried inside
/// [`Pending`](crate::Pending). The host executes it against the network
/// and hands the corresponding `HttpResponse` back to the store.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Constructed by the host after executing an [`HttpRequest`], then fed to
/// [`TodoStore::finish`](crate::TodoStore::finish) (or the `TodoApi`
/// parse methods directly).
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
