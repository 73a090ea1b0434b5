use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaintenanceCategory {
    Plumbing,
    Electrical,
    Hvac,
    Appliance,
    Structural,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRequest {
    pub id: Uuid,
    pub property: Uuid,
    pub customer: Uuid,
    pub title: String,
    pub description: String,
    pub category: MaintenanceCategory,
    pub priority: Priority,
    pub status: RequestStatus,
    pub assigned_to: Option<Uuid>,
    /// Stamped on the first transition to completed, then fixed.
    pub completed_date: Option<DateTime<Utc>>,
    pub cost: Option<f64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MaintenanceRequest {
    pub fn new(
        property: Uuid,
        customer: Uuid,
        title: String,
        description: String,
        category: MaintenanceCategory,
        priority: Priority,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            property,
            customer,
            title,
            description,
            category,
            priority,
            status: RequestStatus::Pending,
            assigned_to: None,
            completed_date: None,
            cost: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Write a status, stamping `completed_date` on the first completion only.
    pub fn set_status(&mut self, status: RequestStatus) {
        if status == RequestStatus::Completed && self.completed_date.is_none() {
            self.completed_date = Some(Utc::now());
        }
        self.status = status;
        self.touch();
    }

    /// Hand the request to a worker; a pending request moves to in_progress.
    pub fn assign(&mut self, assignee: Uuid) {
        self.assigned_to = Some(assignee);
        if self.status == RequestStatus::Pending {
            self.status = RequestStatus::InProgress;
        }
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Document for MaintenanceRequest {
    const COLLECTION: &'static str = "Maintenance request";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
