//! In-memory mock of a headless-CMS todo collection.
//!
//! Mirrors the CMS wire shape: every response wraps its payload in a
//! top-level `data` key, records nest their fields under `attributes`,
//! and ids are sequential integers assigned by the server. A delete
//! answers with the removed record so clients can reconcile by id.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Attributes {
    pub task: String,
    pub complete: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Record {
    pub id: u64,
    pub attributes: Attributes,
}

/// The `{ "data": ... }` envelope around every request and response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct Document<T> {
    pub data: T,
}

#[derive(Deserialize)]
pub struct CreateAttributes {
    pub task: String,
    #[serde(default)]
    pub complete: bool,
}

#[derive(Deserialize)]
pub struct UpdateAttributes {
    pub task: Option<String>,
    pub complete: Option<bool>,
}

#[derive(Default)]
pub struct Cms {
    next_id: u64,
    todos: BTreeMap<u64, Attributes>,
}

pub type Db = Arc<RwLock<Cms>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Cms::default()));
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", get(get_todo).put(update_todo).delete(delete_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn record(id: u64, attributes: Attributes) -> Record {
    Record { id, attributes }
}

async fn list_todos(State(db): State<Db>) -> Json<Document<Vec<Record>>> {
    let cms = db.read().await;
    let records = cms
        .todos
        .iter()
        .map(|(id, attributes)| record(*id, attributes.clone()))
        .collect();
    Json(Document { data: records })
}

async fn create_todo(
    State(db): State<Db>,
    Json(body): Json<Document<CreateAttributes>>,
) -> Json<Document<Record>> {
    let mut cms = db.write().await;
    cms.next_id += 1;
    let id = cms.next_id;
    let attributes = Attributes {
        task: body.data.task,
        complete: body.data.complete,
    };
    cms.todos.insert(id, attributes.clone());
    Json(Document {
        data: record(id, attributes),
    })
}

async fn get_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Document<Record>>, StatusCode> {
    let cms = db.read().await;
    cms.todos
        .get(&id)
        .cloned()
        .map(|attributes| Json(Document { data: record(id, attributes) }))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(body): Json<Document<UpdateAttributes>>,
) -> Result<Json<Document<Record>>, StatusCode> {
    let mut cms = db.write().await;
    let attributes = cms.todos.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(task) = body.data.task {
        attributes.task = task;
    }
    if let Some(complete) = body.data.complete {
        attributes.complete = complete;
    }
    let attributes = attributes.clone();
    Ok(Json(Document {
        data: record(id, attributes),
    }))
}

async fn delete_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Document<Record>>, StatusCode> {
    let mut cms = db.write().await;
    cms.todos
        .remove(&id)
        .map(|attributes| Json(Document { data: record(id, attributes) }))
        .ok_or(StatusCode::NOT_FOUND)
}
