//! In-memory stand-ins for the hosted services.

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use reqwest::StatusCode;

use crate::api::PostStore;
use crate::error::{IdentityError, StoreError};
use crate::identity::IdentityProvider;
use crate::models::{NewPost, Post, PostId, PostPatch, Principal, Session};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    SelectAll,
    Insert(NewPost),
    Update(PostId, PostPatch),
    Delete(PostId),
}

#[derive(Default)]
struct Inner {
    rows: Vec<Post>,
    next_id: i64,
    calls: Vec<StoreCall>,
    fail_reads: bool,
    fail_writes: bool,
}

/// Records every call; rows get sequential ids and one-minute-apart timestamps.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Inserts a row directly without recording a call.
    pub fn seed(&self, row: NewPost) -> Post {
        let mut inner = self.inner.lock().expect("store lock");
        insert_row(&mut inner, row)
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.inner.lock().expect("store lock").calls.clone()
    }

    pub fn clear_calls(&self) {
        self.inner.lock().expect("store lock").calls.clear();
    }

    pub fn fail_reads(&self, fail: bool) {
        self.inner.lock().expect("store lock").fail_reads = fail;
    }

    pub fn fail_writes(&self, fail: bool) {
        self.inner.lock().expect("store lock").fail_writes = fail;
    }
}

fn insert_row(inner: &mut Inner, row: NewPost) -> Post {
    inner.next_id += 1;
    let base: DateTime<Utc> = DateTime::from_timestamp(1_704_067_200, 0).unwrap_or_default();
    let post = Post {
        id: PostId::Number(inner.next_id),
        author: row.author,
        content: row.content,
        created_at: (base + Duration::minutes(inner.next_id)).to_rfc3339(),
    };
    inner.rows.push(post.clone());
    post
}

fn failure() -> StoreError {
    StoreError::Status {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: "simulated failure".into(),
    }
}

impl PostStore for MemoryStore {
    fn select_all(&self) -> Result<Vec<Post>, StoreError> {
        let mut inner = self.inner.lock().expect("store lock");
        inner.calls.push(StoreCall::SelectAll);
        if inner.fail_reads {
            return Err(failure());
        }
        Ok(inner.rows.clone())
    }

    fn insert(&self, row: &NewPost) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("store lock");
        inner.calls.push(StoreCall::Insert(row.clone()));
        if inner.fail_writes {
            return Err(failure());
        }
        insert_row(&mut inner, row.clone());
        Ok(())
    }

    fn update(&self, id: &PostId, patch: &PostPatch) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("store lock");
        inner.calls.push(StoreCall::Update(id.clone(), patch.clone()));
        if inner.fail_writes {
            return Err(failure());
        }
        for row in inner.rows.iter_mut().filter(|row| &row.id == id) {
            row.content = patch.content.clone();
        }
        Ok(())
    }

    fn delete(&self, id: &PostId) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("store lock");
        inner.calls.push(StoreCall::Delete(id.clone()));
        if inner.fail_writes {
            return Err(failure());
        }
        inner.rows.retain(|row| &row.id != id);
        Ok(())
    }
}

/// Accepts any identifier with the configured password.
pub struct StaticIdentity {
    password: String,
}

impl StaticIdentity {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }
}

impl IdentityProvider for StaticIdentity {
    fn sign_in(&self, identifier: &str, password: &str) -> Result<Session, IdentityError> {
        if password != self.password {
            return Err(IdentityError::Status {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                body: "form_password_incorrect".into(),
            });
        }
        Ok(Session {
            id: format!("sess_{identifier}"),
            principal: Principal {
                id: format!("user_{identifier}"),
                username: Some(identifier.to_string()),
                ..Principal::default()
            },
        })
    }

    fn sign_out(&self, _session: &Session) -> Result<(), IdentityError> {
        Ok(())
    }
}
