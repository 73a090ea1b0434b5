use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaseStatus {
    Pending,
    Active,
    Expired,
    Terminated,
    Renewed,
}

/// Which side of the lease is approving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaseParty {
    Manager,
    Customer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lease {
    pub id: Uuid,
    pub property: Uuid,
    pub manager: Uuid,
    pub customer: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub monthly_rent: f64,
    pub security_deposit: f64,
    pub status: LeaseStatus,
    pub approved_by_manager: bool,
    pub approved_by_customer: bool,
    /// Stamped once, when the second approval lands.
    pub signed_at: Option<DateTime<Utc>>,
    pub terms: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lease {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        property: Uuid,
        manager: Uuid,
        customer: Uuid,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        monthly_rent: f64,
        security_deposit: f64,
        terms: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            property,
            manager,
            customer,
            start_date,
            end_date,
            monthly_rent,
            security_deposit,
            status: LeaseStatus::Pending,
            approved_by_manager: false,
            approved_by_customer: false,
            signed_at: None,
            terms,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record one party's approval and re-evaluate activation.
    ///
    /// The lease activates when both flags are true; `signed_at` reflects the
    /// first activation and is never re-stamped by later approvals.
    pub fn approve(&mut self, party: LeaseParty) {
        match party {
            LeaseParty::Manager => self.approved_by_manager = true,
            LeaseParty::Customer => self.approved_by_customer = true,
        }
        if self.approved_by_manager
            && self.approved_by_customer
            && self.status != LeaseStatus::Active
        {
            self.status = LeaseStatus::Active;
            if self.signed_at.is_none() {
                self.signed_at = Some(Utc::now());
            }
        }
        self.touch();
    }

    /// Manager-only termination, valid from any state.
    pub fn terminate(&mut self) {
        self.status = LeaseStatus::Terminated;
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Document for Lease {
    const COLLECTION: &'static str = "Lease";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lease() -> Lease {
        let now = Utc::now();
        Lease::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            now,
            now + chrono::Duration::days(365),
            1200.0,
            2400.0,
            None,
        )
    }

    #[test]
    fn single_approval_keeps_lease_pending() {
        let mut l = lease();
        l.approve(LeaseParty::Customer);
        assert_eq!(l.status, LeaseStatus::Pending);
        assert!(l.signed_at.is_none());
    }

    #[test]
    fn both_approvals_activate_and_sign() {
        let mut l = lease();
        l.approve(LeaseParty::Customer);
        l.approve(LeaseParty::Manager);
        assert_eq!(l.status, LeaseStatus::Active);
        assert!(l.signed_at.is_some());
    }

    #[test]
    fn reapproval_does_not_restamp_signed_at() {
        let mut l = lease();
        l.approve(LeaseParty::Manager);
        l.approve(LeaseParty::Customer);
        let signed = l.signed_at.unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        l.approve(LeaseParty::Manager);
        assert_eq!(l.signed_at.unwrap(), signed);
        assert_eq!(l.status, LeaseStatus::Active);
    }

    #[test]
    fn terminate_is_unconditional() {
        let mut l = lease();
        l.terminate();
        assert_eq!(l.status, LeaseStatus::Terminated);

        let mut active = lease();
        active.approve(LeaseParty::Manager);
        active.approve(LeaseParty::Customer);
        active.terminate();
        assert_eq!(active.status, LeaseStatus::Terminated);
    }
}
