//! In-memory todo store with two server-reconciliation disciplines.
//!
//! # Design
//! `TodoStore` owns the list, the single-slot edit session, and a queue of
//! transient notices for the UI. It never performs I/O: every mutating
//! operation returns a [`Pending`] value carrying the `HttpRequest` to
//! execute, and the host completes the operation by calling
//! [`TodoStore::finish`] with the outcome. Several `Pending` values may be
//! outstanding at once and may finish in any order; overlapping rollbacks
//! are last-write-wins with no conflict detection.
//!
//! The two disciplines share one contract:
//! - `Manual` mutates local state only after the server confirms, so a
//!   failed request rolls back by omission.
//! - `Instant` mutates immediately, keeps a whole-list snapshot inside the
//!   `Pending`, and restores it if the request fails. This applies to
//!   every operation, including the completion toggle.
//!
//! Validation is limited to trimming: an empty or whitespace-only task is
//! a silent no-op (`None`) and no request is built.

use crate::client::TodoApi;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{NewTodo, TodoItem, TodoPatch};

/// How local state is kept in agreement with the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileMode {
    /// Wait for server confirmation before touching local state.
    Manual,
    /// Apply locally first, roll back to a snapshot on failure.
    Instant,
}

/// The single-slot edit session. Starting a new edit while one is active
/// replaces it; there is no stacking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditState {
    Idle,
    Editing { id: u64, draft: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Loading,
    Success,
    Error,
}

/// A transient, non-blocking notification for the presentation layer
/// (the toast stream). Drained via [`TodoStore::drain_notices`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

/// An operation that has been applied (or staged) locally and is waiting
/// for its HTTP round-trip. The host executes `request` and hands the
/// outcome to [`TodoStore::finish`]; dropping a `Pending` instead simply
/// abandons reconciliation for that operation.
#[derive(Debug)]
pub struct Pending {
    pub request: HttpRequest,
    op: Op,
}

#[derive(Debug)]
enum Op {
    Load,
    Create {
        snapshot: Option<Vec<TodoItem>>,
        provisional_id: Option<u64>,
    },
    Update {
        snapshot: Option<Vec<TodoItem>>,
    },
    Toggle {
        snapshot: Option<Vec<TodoItem>>,
    },
    Remove {
        snapshot: Option<Vec<TodoItem>>,
    },
}

/// Client-side store mediating all mutations between the UI and the
/// remote todo API.
///
/// Constructed per session and injected into the presentation layer; the
/// store holds no ambient/global state.
#[derive(Debug)]
pub struct TodoStore {
    api: TodoApi,
    mode: ReconcileMode,
    todos: Vec<TodoItem>,
    edit: EditState,
    notices: Vec<Notice>,
}

impl TodoStore {
    pub fn new(base_url: &str, mode: ReconcileMode) -> Self {
        Self {
            api: TodoApi::new(base_url),
            mode,
            todos: Vec::new(),
            edit: EditState::Idle,
            notices: Vec::new(),
        }
    }

    pub fn mode(&self) -> ReconcileMode {
        self.mode
    }

    pub fn todos(&self) -> &[TodoItem] {
        &self.todos
    }

    pub fn edit_state(&self) -> &EditState {
        &self.edit
    }

    /// Take all queued notices, oldest first. The UI shows them and they
    /// are gone; the store keeps no notification history.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Fetch the full list from the server, replacing local state wholesale
    /// on success. On failure the list is left untouched.
    pub fn load(&mut self) -> Pending {
        if self.instant() {
            self.notify(Severity::Loading, "Loading todos...");
        }
        Pending {
            request: self.api.build_fetch(),
            op: Op::Load,
        }
    }

    /// Create a new todo from `task`. Empty or whitespace-only input is a
    /// silent no-op.
    ///
    /// Under `Instant` the item appears at the head of the list right away
    /// with a provisional id (`max + 1`, or 1 for an empty list); the
    /// server-assigned id replaces it when the request confirms.
    pub fn create(&mut self, task: &str) -> Option<Pending> {
        let task = task.trim();
        if task.is_empty() {
            return None;
        }
        let input = NewTodo {
            task: task.to_string(),
            complete: false,
        };
        let request = match self.api.build_create(&input) {
            Ok(request) => request,
            Err(err) => {
                self.fail("Unable to add todo", &err);
                return None;
            }
        };
        let op = match self.mode {
            ReconcileMode::Manual => Op::Create {
                snapshot: None,
                provisional_id: None,
            },
            ReconcileMode::Instant => {
                let snapshot = self.todos.clone();
                let provisional = self.todos.iter().map(|t| t.id).max().unwrap_or(0) + 1;
                self.todos.insert(
                    0,
                    TodoItem {
                        id: provisional,
                        task: task.to_string(),
                        complete: false,
                    },
                );
                self.notify(Severity::Loading, "Adding todo...");
                Op::Create {
                    snapshot: Some(snapshot),
                    provisional_id: Some(provisional),
                }
            }
        };
        Some(Pending { request, op })
    }

    /// Replace the task text of the todo with `id`. Empty input is a
    /// silent no-op. Clears a matching edit session — immediately under
    /// `Instant`, on confirmation under `Manual`.
    pub fn update(&mut self, id: u64, task: &str) -> Option<Pending> {
        let task = task.trim();
        if task.is_empty() {
            return None;
        }
        let patch = TodoPatch {
            task: Some(task.to_string()),
            complete: None,
        };
        let request = match self.api.build_update(id, &patch) {
            Ok(request) => request,
            Err(err) => {
                self.fail("Unable to update todo", &err);
                return None;
            }
        };
        let op = match self.mode {
            ReconcileMode::Manual => Op::Update { snapshot: None },
            ReconcileMode::Instant => {
                let snapshot = self.todos.clone();
                if let Some(item) = self.todos.iter_mut().find(|t| t.id == id) {
                    item.task = task.to_string();
                }
                self.clear_edit_for(id);
                self.notify(Severity::Loading, "Updating todo...");
                Op::Update {
                    snapshot: Some(snapshot),
                }
            }
        };
        Some(Pending { request, op })
    }

    /// Flip the `complete` flag of the todo with `id`. Unknown ids are a
    /// no-op (there is no current flag to flip).
    pub fn toggle_complete(&mut self, id: u64) -> Option<Pending> {
        let current = self.todos.iter().find(|t| t.id == id)?.complete;
        let patch = TodoPatch {
            task: None,
            complete: Some(!current),
        };
        let request = match self.api.build_update(id, &patch) {
            Ok(request) => request,
            Err(err) => {
                self.fail("Unable to update todo", &err);
                return None;
            }
        };
        let op = match self.mode {
            ReconcileMode::Manual => Op::Toggle { snapshot: None },
            ReconcileMode::Instant => {
                let snapshot = self.todos.clone();
                if let Some(item) = self.todos.iter_mut().find(|t| t.id == id) {
                    item.complete = !current;
                }
                self.notify(Severity::Loading, "Updating todo...");
                Op::Toggle {
                    snapshot: Some(snapshot),
                }
            }
        };
        Some(Pending { request, op })
    }

    /// Delete the todo with `id`. The request is issued even for ids not
    /// present locally; the server decides whether anything exists.
    pub fn remove(&mut self, id: u64) -> Pending {
        let request = self.api.build_delete(id);
        let op = match self.mode {
            ReconcileMode::Manual => Op::Remove { snapshot: None },
            ReconcileMode::Instant => {
                let snapshot = self.todos.clone();
                self.todos.retain(|t| t.id != id);
                self.notify(Severity::Loading, "Deleting todo...");
                Op::Remove {
                    snapshot: Some(snapshot),
                }
            }
        };
        Pending { request, op }
    }

    /// Start editing the todo with `id`, seeding the draft with its
    /// current task. Replaces any active session. Unknown ids are a no-op.
    pub fn begin_edit(&mut self, id: u64) {
        if let Some(item) = self.todos.iter().find(|t| t.id == id) {
            self.edit = EditState::Editing {
                id,
                draft: item.task.clone(),
            };
        }
    }

    /// Replace the draft text of the active edit session, if any.
    pub fn set_draft(&mut self, text: &str) {
        if let EditState::Editing { draft, .. } = &mut self.edit {
            *draft = text.to_string();
        }
    }

    pub fn cancel_edit(&mut self) {
        self.edit = EditState::Idle;
    }

    /// Submit the active edit session as an update. A blank draft (or no
    /// session) is a no-op and leaves the session in place.
    pub fn save_edit(&mut self) -> Option<Pending> {
        let (id, draft) = match &self.edit {
            EditState::Editing { id, draft } => (*id, draft.clone()),
            EditState::Idle => return None,
        };
        self.update(id, &draft)
    }

    /// Complete a previously issued operation with the outcome of its HTTP
    /// round-trip. `Err` is the host reporting a transport failure.
    ///
    /// Success reconciles local state with the server's record; failure
    /// restores the snapshot (instant) or leaves state untouched (manual),
    /// and queues an error notice either way. Nothing here is fatal.
    pub fn finish(&mut self, pending: Pending, outcome: Result<HttpResponse, ApiError>) {
        match pending.op {
            Op::Load => match outcome.and_then(|r| self.api.parse_fetch(r)) {
                Ok(todos) => {
                    self.todos = todos;
                    if self.instant() {
                        self.sort_newest_first();
                        self.notify(Severity::Success, "Fetched todos");
                    }
                }
                Err(err) => self.fail("Unable to fetch todos", &err),
            },
            Op::Create {
                snapshot,
                provisional_id,
            } => match outcome.and_then(|r| self.api.parse_create(r)) {
                Ok(created) => {
                    match self.mode {
                        ReconcileMode::Manual => self.todos.push(created),
                        ReconcileMode::Instant => {
                            // Adopt the server-assigned id (and any
                            // server-side normalization) for the
                            // provisionally inserted item.
                            if let Some(provisional) = provisional_id {
                                if let Some(item) =
                                    self.todos.iter_mut().find(|t| t.id == provisional)
                                {
                                    *item = created;
                                }
                                self.sort_newest_first();
                            }
                            self.notify(Severity::Success, "Added todo");
                        }
                    }
                }
                Err(err) => {
                    self.rollback(snapshot);
                    self.fail("Unable to add todo", &err);
                }
            },
            Op::Update { snapshot } => match outcome.and_then(|r| self.api.parse_update(r)) {
                Ok(updated) => match self.mode {
                    ReconcileMode::Manual => {
                        if let Some(item) = self.todos.iter_mut().find(|t| t.id == updated.id) {
                            item.task = updated.task;
                        }
                        self.clear_edit_for(updated.id);
                    }
                    ReconcileMode::Instant => {
                        self.notify(Severity::Success, "Updated todo");
                    }
                },
                Err(err) => {
                    self.rollback(snapshot);
                    self.fail("Unable to update todo", &err);
                }
            },
            Op::Toggle { snapshot } => match outcome.and_then(|r| self.api.parse_update(r)) {
                Ok(updated) => match self.mode {
                    ReconcileMode::Manual => {
                        if let Some(item) = self.todos.iter_mut().find(|t| t.id == updated.id) {
                            item.complete = updated.complete;
                        }
                    }
                    ReconcileMode::Instant => {
                        self.notify(Severity::Success, "Updated todo");
                    }
                },
                Err(err) => {
                    self.rollback(snapshot);
                    self.fail("Unable to update todo", &err);
                }
            },
            Op::Remove { snapshot } => match outcome.and_then(|r| self.api.parse_delete(r)) {
                Ok(removed) => match self.mode {
                    ReconcileMode::Manual => self.todos.retain(|t| t.id != removed.id),
                    ReconcileMode::Instant => {
                        self.notify(Severity::Success, "Deleted todo");
                    }
                },
                Err(err) => {
                    self.rollback(snapshot);
                    self.fail("Unable to delete todo", &err);
                }
            },
        }
    }

    fn instant(&self) -> bool {
        self.mode == ReconcileMode::Instant
    }

    fn sort_newest_first(&mut self) {
        self.todos.sort_by(|a, b| b.id.cmp(&a.id));
    }

    fn rollback(&mut self, snapshot: Option<Vec<TodoItem>>) {
        if let Some(snapshot) = snapshot {
            self.todos = snapshot;
        }
    }

    fn clear_edit_for(&mut self, id: u64) {
        if matches!(&self.edit, EditState::Editing { id: editing, .. } if *editing == id) {
            self.edit = EditState::Idle;
        }
    }

    fn notify(&mut self, severity: Severity, message: &str) {
        self.notices.push(Notice {
            severity,
            message: message.to_string(),
        });
    }

    fn fail(&mut self, message: &str, err: &ApiError) {
        tracing::warn!(error = %err, "{}", message);
        self.notices.push(Notice {
            severity: Severity::Error,
            message: message.to_string(),
        });
    }
}
