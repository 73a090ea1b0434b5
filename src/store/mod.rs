//! In-process document store.
//!
//! The route layer is written against a plain CRUD-plus-filter surface:
//! single-document writes are atomic (one lock per collection), concurrent
//! updates are last-write-wins, and nothing coordinates across collections.
//! Deletes are physical and never cascade; dangling references are the
//! caller's problem to surface.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::contact::Contact;
use crate::domain::inquiry::Inquiry;
use crate::domain::lead::Lead;
use crate::domain::lease::Lease;
use crate::domain::maintenance::MaintenanceRequest;
use crate::domain::message::Message;
use crate::domain::notification::Notification;
use crate::domain::payment::Payment;
use crate::domain::property::Property;
use crate::domain::task::Task;
use crate::domain::user::User;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{collection} not found: {id}")]
    NotFound { collection: &'static str, id: Uuid },
}

/// A record that can live in a [`Collection`].
pub trait Document: Clone + Send + Sync + 'static {
    /// Client-facing name used in not-found messages ("Property", "Lease", ...).
    const COLLECTION: &'static str;

    fn id(&self) -> Uuid;
    fn created_at(&self) -> DateTime<Utc>;
}

/// One entity collection: a hash map of documents behind an async RwLock.
#[derive(Debug)]
pub struct Collection<T> {
    rows: Arc<RwLock<HashMap<Uuid, T>>>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
        }
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            rows: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<T: Document> Collection<T> {
    pub async fn insert(&self, doc: T) -> T {
        let mut rows = self.rows.write().await;
        rows.insert(doc.id(), doc.clone());
        doc
    }

    pub async fn get(&self, id: Uuid) -> Option<T> {
        self.rows.read().await.get(&id).cloned()
    }

    /// Fetch a document or fail with a not-found error.
    pub async fn require(&self, id: Uuid) -> Result<T, StoreError> {
        self.get(id).await.ok_or(StoreError::NotFound {
            collection: T::COLLECTION,
            id,
        })
    }

    /// Overwrite the stored document wholesale. Last write wins.
    pub async fn replace(&self, doc: T) -> Result<T, StoreError> {
        let mut rows = self.rows.write().await;
        match rows.get_mut(&doc.id()) {
            Some(slot) => {
                *slot = doc.clone();
                Ok(doc)
            }
            None => Err(StoreError::NotFound {
                collection: T::COLLECTION,
                id: doc.id(),
            }),
        }
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        rows.remove(&id).map(|_| ()).ok_or(StoreError::NotFound {
            collection: T::COLLECTION,
            id,
        })
    }

    /// All documents matching the predicate, newest first.
    pub async fn find<F>(&self, pred: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        let rows = self.rows.read().await;
        let mut out: Vec<T> = rows.values().filter(|doc| pred(doc)).cloned().collect();
        out.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        out
    }

    pub async fn find_one<F>(&self, pred: F) -> Option<T>
    where
        F: Fn(&T) -> bool,
    {
        let rows = self.rows.read().await;
        rows.values().find(|doc| pred(doc)).cloned()
    }

    pub async fn count(&self) -> usize {
        self.rows.read().await.len()
    }
}

/// Application state: one collection per entity.
#[derive(Clone, Default, Debug)]
pub struct Store {
    pub users: Collection<User>,
    pub properties: Collection<Property>,
    pub leases: Collection<Lease>,
    pub maintenance: Collection<MaintenanceRequest>,
    pub contacts: Collection<Contact>,
    pub leads: Collection<Lead>,
    pub tasks: Collection<Task>,
    pub payments: Collection<Payment>,
    pub messages: Collection<Message>,
    pub notifications: Collection<Notification>,
    pub inquiries: Collection<Inquiry>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{Role, User};

    fn sample_user(email: &str) -> User {
        User::new(
            "Ada".to_string(),
            "Lovelace".to_string(),
            email.to_string(),
            "hash".to_string(),
            None,
            Role::Manager,
        )
    }

    #[tokio::test]
    async fn require_maps_missing_to_not_found() {
        let col: Collection<User> = Collection::default();
        let err = col.require(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { collection: "User", .. }));
    }

    #[tokio::test]
    async fn replace_is_last_write_wins() {
        let col: Collection<User> = Collection::default();
        let user = col.insert(sample_user("a@example.com")).await;

        let mut first = user.clone();
        first.first_name = "First".to_string();
        let mut second = user.clone();
        second.first_name = "Second".to_string();

        col.replace(first).await.unwrap();
        col.replace(second).await.unwrap();

        assert_eq!(col.get(user.id).await.unwrap().first_name, "Second");
    }

    #[tokio::test]
    async fn find_returns_newest_first() {
        let col: Collection<User> = Collection::default();
        let a = col.insert(sample_user("a@example.com")).await;
        let mut b = sample_user("b@example.com");
        b.created_at = a.created_at + chrono::Duration::seconds(5);
        let b = col.insert(b).await;

        let all = col.find(|_| true).await;
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, b.id);
    }

    #[tokio::test]
    async fn delete_is_physical() {
        let col: Collection<User> = Collection::default();
        let user = col.insert(sample_user("a@example.com")).await;
        col.delete(user.id).await.unwrap();
        assert!(col.get(user.id).await.is_none());
        assert!(col.delete(user.id).await.is_err());
    }
}
