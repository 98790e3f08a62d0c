//! Stateful view model for a todo list front-end.
//!
//! # Design
//! `TodoApp` owns everything a UI renders: the mirrored collection, the
//! new-item draft, the single record in edit mode, and two transient notices
//! (one success, one error) that are shown, dismissed and expired separately.
//! User actions return an `Outbound` (request plus `Intent`) instead of doing
//! I/O. The host executes the request and feeds the outcome back through
//! `apply`, which is the only place local records change. Local state is
//! mutated only after the server confirms success; there is no re-fetch.

use std::time::{Duration, Instant};

use crate::client::TodoClient;
use crate::http::{HttpRequest, Outcome};
use crate::types::{Todo, TodoId, TodoInput};

/// How long a notice stays up before `expire_notices` drops it.
pub const NOTICE_DURATION: Duration = Duration::from_secs(3);

pub const CREATED: &str = "Item added successfully";
pub const UPDATED: &str = "Item updated successfully";
pub const DELETED: &str = "Item deleted successfully";
pub const CREATE_FAILED: &str = "Unable to create Todo item";
pub const UPDATE_FAILED: &str = "Unable to update Todo item";
pub const DELETE_FAILED: &str = "Unable to delete Todo item";

/// Which operation a request belongs to, and so how its outcome is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Load,
    Create,
    Update(TodoId),
    Delete(TodoId),
}

/// A request ready for the host to execute.
#[derive(Debug, Clone)]
pub struct Outbound {
    pub request: HttpRequest,
    pub intent: Intent,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    shown_at: Instant,
}

impl Notice {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            shown_at: Instant::now(),
        }
    }

    fn expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= NOTICE_DURATION
    }
}

/// The record in edit mode and its uncommitted field values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    pub id: TodoId,
    pub draft: TodoInput,
}

#[derive(Debug)]
pub struct TodoApp {
    client: TodoClient,
    todos: Vec<Todo>,
    draft: TodoInput,
    editing: Option<EditState>,
    success: Option<Notice>,
    error: Option<Notice>,
}

impl TodoApp {
    pub fn new(client: TodoClient) -> Self {
        Self {
            client,
            todos: Vec::new(),
            draft: TodoInput::default(),
            editing: None,
            success: None,
            error: None,
        }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn draft(&self) -> &TodoInput {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut TodoInput {
        &mut self.draft
    }

    pub fn editing(&self) -> Option<&EditState> {
        self.editing.as_ref()
    }

    /// The edit draft, if a record is in edit mode.
    pub fn edit_draft_mut(&mut self) -> Option<&mut TodoInput> {
        self.editing.as_mut().map(|e| &mut e.draft)
    }

    pub fn success(&self) -> Option<&Notice> {
        self.success.as_ref()
    }

    pub fn error(&self) -> Option<&Notice> {
        self.error.as_ref()
    }

    /// Fetch the full collection. Meant to be issued once, at startup.
    pub fn load(&self) -> Outbound {
        Outbound {
            request: self.client.build_list_todos(),
            intent: Intent::Load,
        }
    }

    /// Submit the new-item draft. `None` when either field is blank.
    pub fn submit(&mut self) -> Option<Outbound> {
        self.error = None;
        if !self.draft.is_complete() {
            return None;
        }
        match self.client.build_create_todo(&self.draft) {
            Ok(request) => Some(Outbound {
                request,
                intent: Intent::Create,
            }),
            Err(e) => {
                tracing::warn!(error = %e, "failed to build create request");
                self.error = Some(Notice::new(CREATE_FAILED));
                None
            }
        }
    }

    /// Put `id` into edit mode, discarding any unsaved edit on another record.
    /// Returns false if `id` is not in the local list.
    pub fn begin_edit(&mut self, id: &TodoId) -> bool {
        let Some(todo) = self.todos.iter().find(|t| &t.id == id) else {
            return false;
        };
        self.editing = Some(EditState {
            id: todo.id.clone(),
            draft: TodoInput::new(todo.title.clone(), todo.description.clone()),
        });
        true
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Commit the edit draft. `None` when nothing is in edit mode or either
    /// field is blank.
    pub fn save_edit(&mut self) -> Option<Outbound> {
        self.error = None;
        let editing = self.editing.as_ref()?;
        if !editing.draft.is_complete() {
            return None;
        }
        let id = editing.id.clone();
        match self.client.build_update_todo(&id, &editing.draft) {
            Ok(request) => Some(Outbound {
                request,
                intent: Intent::Update(id),
            }),
            Err(e) => {
                tracing::warn!(error = %e, "failed to build update request");
                self.error = Some(Notice::new(UPDATE_FAILED));
                None
            }
        }
    }

    /// Delete `id` once `confirm` approves. Nothing is sent when the user
    /// declines or the record is not in the local list.
    pub fn request_delete<F>(&mut self, id: &TodoId, confirm: F) -> Option<Outbound>
    where
        F: FnOnce(&Todo) -> bool,
    {
        let todo = self.todos.iter().find(|t| &t.id == id)?;
        if !confirm(todo) {
            return None;
        }
        Some(Outbound {
            request: self.client.build_delete_todo(id),
            intent: Intent::Delete(id.clone()),
        })
    }

    /// Reconcile local state with the outcome of a request built by this app.
    pub fn apply(&mut self, intent: Intent, outcome: Outcome) {
        match intent {
            Intent::Load => match outcome.and_then(|r| self.client.parse_list_todos(r)) {
                Ok(todos) => self.todos = todos,
                Err(e) => tracing::debug!(error = %e, "initial load failed"),
            },
            Intent::Create => match outcome.and_then(|r| self.client.parse_create_todo(r)) {
                Ok(todo) => {
                    self.todos.push(todo);
                    self.draft.clear();
                    self.success = Some(Notice::new(CREATED));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "create failed");
                    self.error = Some(Notice::new(CREATE_FAILED));
                }
            },
            Intent::Update(id) => match outcome.and_then(|r| self.client.parse_update_todo(r)) {
                Ok(todo) => {
                    if let Some(slot) = self.todos.iter_mut().find(|t| t.id == id) {
                        *slot = todo;
                    }
                    if self.editing.as_ref().is_some_and(|e| e.id == id) {
                        self.editing = None;
                    }
                    self.success = Some(Notice::new(UPDATED));
                }
                Err(e) => {
                    tracing::warn!(error = %e, %id, "update failed");
                    self.error = Some(Notice::new(UPDATE_FAILED));
                }
            },
            Intent::Delete(id) => match outcome.and_then(|r| self.client.parse_delete_todo(r)) {
                Ok(()) => {
                    self.todos.retain(|t| t.id != id);
                    if self.editing.as_ref().is_some_and(|e| e.id == id) {
                        self.editing = None;
                    }
                    self.success = Some(Notice::new(DELETED));
                }
                Err(e) => {
                    tracing::warn!(error = %e, %id, "delete failed");
                    self.error = Some(Notice::new(DELETE_FAILED));
                }
            },
        }
    }

    pub fn dismiss_success(&mut self) {
        self.success = None;
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Drop each notice once it has been up for `NOTICE_DURATION`.
    pub fn expire_notices(&mut self, now: Instant) {
        if self.success.as_ref().is_some_and(|n| n.expired(now)) {
            self.success = None;
        }
        if self.error.as_ref().is_some_and(|n| n.expired(now)) {
            self.error = None;
        }
    }
}
