use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::Document;

use super::maintenance::Priority;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    New,
    InProgress,
    Resolved,
    Closed,
}

/// Public inquiry form submission. The only entity creatable without
/// authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    /// Set when a logged-in user submitted the form.
    pub user: Option<Uuid>,
    pub status: ContactStatus,
    pub priority: Priority,
    pub assigned_to: Option<Uuid>,
    pub resolved_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    pub fn new(
        name: String,
        email: String,
        phone: Option<String>,
        subject: String,
        message: String,
        user: Option<Uuid>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            phone,
            subject,
            message,
            user,
            status: ContactStatus::New,
            priority: Priority::Medium,
            assigned_to: None,
            resolved_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Write a status, stamping `resolved_date` on the first resolution only.
    pub fn set_status(&mut self, status: ContactStatus) {
        if status == ContactStatus::Resolved && self.resolved_date.is_none() {
            self.resolved_date = Some(Utc::now());
        }
        self.status = status;
        self.touch();
    }

    /// Route the contact to a handler; a fresh contact moves to in_progress.
    pub fn assign(&mut self, assignee: Uuid) {
        self.assigned_to = Some(assignee);
        if self.status == ContactStatus::New {
            self.status = ContactStatus::InProgress;
        }
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Document for Contact {
    const COLLECTION: &'static str = "Contact";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
