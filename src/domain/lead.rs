use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadType {
    Buyer,
    Renter,
    Seller,
    Landlord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Negotiating,
    Converted,
    Lost,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub lead_type: LeadType,
    pub status: LeadStatus,
    /// Owns the lead; derived from the first interested property when the
    /// create payload does not name a manager.
    pub manager: Uuid,
    pub customer: Option<Uuid>,
    pub interested_properties: Vec<Uuid>,
    pub budget: Option<Budget>,
    pub notes: Option<String>,
    pub conversion_date: Option<DateTime<Utc>>,
    pub converted_to: Option<Uuid>,
    pub converted_property: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lead {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: String,
        email: String,
        phone: Option<String>,
        lead_type: LeadType,
        manager: Uuid,
        customer: Option<Uuid>,
        interested_properties: Vec<Uuid>,
        budget: Option<Budget>,
        notes: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            phone,
            lead_type,
            status: LeadStatus::New,
            manager,
            customer,
            interested_properties,
            budget,
            notes,
            conversion_date: None,
            converted_to: None,
            converted_property: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Dedicated conversion operation: marks the lead converted, stamps the
    /// conversion date once, and snapshots the current customer reference.
    pub fn convert(&mut self, converted_property: Option<Uuid>) {
        self.status = LeadStatus::Converted;
        if self.conversion_date.is_none() {
            self.conversion_date = Some(Utc::now());
        }
        if let Some(customer) = self.customer {
            self.converted_to = Some(customer);
        }
        if converted_property.is_some() {
            self.converted_property = converted_property;
        }
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Document for Lead {
    const COLLECTION: &'static str = "Lead";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
