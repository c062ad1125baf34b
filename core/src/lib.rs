//! Client-side todo store for a headless-CMS REST API.
//!
//! # Overview
//! [`TodoStore`] holds the in-memory todo list and mediates every mutation
//! between a UI and the remote `/todos` resource, under one of two
//! reconciliation disciplines: `Manual` (refetch-style, mutate only after
//! server confirmation) or `Instant` (optimistic mutation with snapshot
//! rollback on failure).
//!
//! # Design
//! - The crate never touches the network (host-does-IO pattern). Store
//!   operations return [`Pending`] values wrapping an [`HttpRequest`]; the
//!   host executes the round-trip and reports back via
//!   [`TodoStore::finish`]. Multiple operations may be in flight at once.
//! - [`TodoApi`] is the stateless build/parse layer underneath the store,
//!   usable on its own by hosts that keep their own state.
//! - Wire DTOs are defined independently from the mock-cms crate;
//!   integration tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod store;
pub mod types;

pub use client::TodoApi;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use store::{EditState, Notice, Pending, ReconcileMode, Severity, TodoStore};
pub use types::{NewTodo, TodoItem, TodoPatch};
