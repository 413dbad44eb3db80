// src/models.rs

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub mod auth;
pub mod crafted_item;
pub mod dashboard;
pub mod inventory;
pub mod member;
pub mod order;
pub mod resource;
pub mod strike;
pub mod task;
pub mod task_completion;

/// Who wrote a row and when. Built once per write request.
#[derive(Debug, Clone)]
pub struct Stamp {
    pub at: DateTime<Utc>,
    pub by: Option<String>,
}

impl Stamp {
    pub fn now(by: Option<String>) -> Self {
        Self { at: Utc::now(), by }
    }
}

/// Opaque 9-character row identifier.
pub fn new_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(9);
    id
}

/// A stored entity together with its create and patch payloads.
///
/// Both persistence adapters go through `build` and `apply`, so defaulting and
/// partial-update rules live in exactly one place per entity.
pub trait Record: Clone + Send + Sync + 'static {
    type New: Send + 'static;
    type Patch: Send + 'static;

    /// Entity name used in "not found" errors.
    const ENTITY: &'static str;

    fn id(&self) -> &str;

    /// Timestamp lists are ordered by, newest first.
    fn recency(&self) -> DateTime<Utc>;

    fn build(id: String, stamp: &Stamp, new: Self::New) -> Self;

    fn apply(&mut self, patch: Self::Patch, stamp: &Stamp);
}
