use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::Document;

/// Actor role carried in token claims and on every user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Manager,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    /// Stored lowercase; uniqueness is enforced at registration.
    pub email: String,
    /// Argon2 hash. Never serialized into responses.
    #[serde(skip_serializing)]
    pub password: String,
    pub phone: Option<String>,
    pub user_type: Role,
    pub favorite_properties: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        first_name: String,
        last_name: String,
        email: String,
        password_hash: String,
        phone: Option<String>,
        user_type: Role,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            first_name,
            last_name,
            email: email.trim().to_lowercase(),
            password: password_hash,
            phone,
            user_type,
            favorite_properties: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Add or remove a property from the favourites list.
    /// Returns true when the property is a favourite afterwards.
    pub fn toggle_favorite(&mut self, property: Uuid) -> bool {
        if let Some(pos) = self.favorite_properties.iter().position(|p| *p == property) {
            self.favorite_properties.remove(pos);
            self.touch();
            false
        } else {
            self.favorite_properties.push(property);
            self.touch();
            true
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Document for User {
    const COLLECTION: &'static str = "User";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
