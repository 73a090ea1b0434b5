use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    Pending,
    Responded,
    Closed,
}

/// A customer's question about a specific property, answered by its manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: Uuid,
    pub property: Uuid,
    pub customer: Uuid,
    /// Copied from the property at creation.
    pub manager: Uuid,
    pub message: String,
    pub status: InquiryStatus,
    pub response: Option<String>,
    pub responded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Inquiry {
    pub fn new(property: Uuid, customer: Uuid, manager: Uuid, message: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            property,
            customer,
            manager,
            message,
            status: InquiryStatus::Pending,
            response: None,
            responded_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn respond(&mut self, response: String) {
        self.response = Some(response);
        self.status = InquiryStatus::Responded;
        if self.responded_at.is_none() {
            self.responded_at = Some(Utc::now());
        }
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Document for Inquiry {
    const COLLECTION: &'static str = "Inquiry";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
