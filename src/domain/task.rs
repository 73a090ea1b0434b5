use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::Document;

use super::maintenance::{Priority, RequestStatus};

/// Internal work item, following the same status machine as maintenance
/// requests (pending → in_progress → completed/cancelled with a once-only
/// completion stamp).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub task_type: String,
    pub priority: Priority,
    pub status: RequestStatus,
    pub property: Option<Uuid>,
    pub assigned_by: Uuid,
    pub assigned_to: Uuid,
    pub due_date: Option<DateTime<Utc>>,
    pub completed_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: String,
        description: String,
        task_type: String,
        priority: Priority,
        property: Option<Uuid>,
        assigned_by: Uuid,
        assigned_to: Uuid,
        due_date: Option<DateTime<Utc>>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            task_type,
            priority,
            status: RequestStatus::Pending,
            property,
            assigned_by,
            assigned_to,
            due_date,
            completed_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_status(&mut self, status: RequestStatus) {
        if status == RequestStatus::Completed && self.completed_date.is_none() {
            self.completed_date = Some(Utc::now());
        }
        self.status = status;
        self.touch();
    }

    pub fn assign(&mut self, assignee: Uuid) {
        self.assigned_to = assignee;
        if self.status == RequestStatus::Pending {
            self.status = RequestStatus::InProgress;
        }
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Document for Task {
    const COLLECTION: &'static str = "Task";

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

    #[test]
    fn completion_stamp_is_once_only() {
        let mut t = Task::new(
            "Inspect unit".into(),
            "Annual inspection".into(),
            "inspection".into(),
            Priority::Low,
            None,
            Uuid::new_v4(),
            Uuid::new_v4(),
            None,
        );
        t.set_status(RequestStatus::Completed);
        let first = t.completed_date.unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        t.set_status(RequestStatus::Completed);
        assert_eq!(t.completed_date.unwrap(), first);
    }
}
