//! Stateless request builder and response parser for the todo API.
//!
//! # Design
//! `TodoApi` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`,
//! translating between the CMS `data`/`attributes` envelope and the flat
//! [`TodoItem`] shape. The host executes the actual round-trip between the
//! two halves.
//!
//! Any 2xx status counts as success: the CMS is not consistent about
//! 200 vs 201, and the original clients never distinguished them either.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Document, NewTodo, Record, TodoItem, TodoPatch};

/// Stateless client for the todo API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. [`TodoStore`](crate::TodoStore) drives it; it can
/// also be used directly by hosts that manage their own state.
#[derive(Debug, Clone)]
pub struct TodoApi {
    base_url: String,
}

impl TodoApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_fetch(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/todos", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create(&self, input: &NewTodo) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(&Document { data: input })
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/todos", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_update(&self, id: u64, patch: &TodoPatch) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(&Document { data: patch })
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            url: format!("{}/todos/{id}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_delete(&self, id: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: format!("{}/todos/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_fetch(&self, response: HttpResponse) -> Result<Vec<TodoItem>, ApiError> {
        check_status(&response)?;
        let doc: Document<Vec<Record>> = decode(&response.body)?;
        Ok(doc.data.into_iter().map(TodoItem::from).collect())
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<TodoItem, ApiError> {
        parse_record(response)
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<TodoItem, ApiError> {
        parse_record(response)
    }

    /// The CMS answers a delete with the removed record; callers remove
    /// locally by the id it carries.
    pub fn parse_delete(&self, response: HttpResponse) -> Result<TodoItem, ApiError> {
        parse_record(response)
    }
}

fn parse_record(response: HttpResponse) -> Result<TodoItem, ApiError> {
    check_status(&response)?;
    let doc: Document<Record> = decode(&response.body)?;
    Ok(doc.data.into())
}

fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Server {
        status: response.status,
        body: response.body.clone(),
    })
}
