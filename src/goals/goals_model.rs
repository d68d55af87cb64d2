use chrono::NaiveDate;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Tagged synchronization state of a locally-held saving goal.
///
/// Stored as TEXT; a goal is `Pending` from the moment it is written locally
/// until the matching remote call settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    Pending,
    Synced,
    SyncFailed,
}

impl SyncStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncStatus::Pending => "PENDING",
            SyncStatus::Synced => "SYNCED",
            SyncStatus::SyncFailed => "SYNC_FAILED",
        }
    }

    pub fn parse(value: &str) -> SyncStatus {
        match value {
            "SYNCED" => SyncStatus::Synced,
            "SYNC_FAILED" => SyncStatus::SyncFailed,
            _ => SyncStatus::Pending,
        }
    }
}

/// Database model for saving goals.
///
/// `current_amount` and `is_completed` are derived from the goal's
/// contributions and recomputed after every contribution change.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::saving_goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct SavingGoal {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub title: String,
    pub goal_amount: f64,
    #[serde(default)]
    pub current_amount: f64,
    pub goal_date: String,
    #[serde(default)]
    pub is_completed: bool,
    // Local bookkeeping, never sent to or read from the server.
    #[serde(skip_serializing, default)]
    pub sync_status: String,
    #[serde(skip_serializing, default)]
    pub updated_at: String,
}

impl SavingGoal {
    pub fn sync_status(&self) -> SyncStatus {
        SyncStatus::parse(&self.sync_status)
    }

    /// Overdue is a read-time property; goals may be created with a past
    /// target date.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        if self.is_completed {
            return false;
        }
        match NaiveDate::parse_from_str(&self.goal_date[..self.goal_date.len().min(10)], "%Y-%m-%d")
        {
            Ok(date) => date < today,
            Err(_) => false,
        }
    }
}

/// Database model for contributions toward a saving goal.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Associations,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(belongs_to(SavingGoal, foreign_key = goal_id))]
#[diesel(table_name = crate::schema::saving_contributions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct SavingContribution {
    pub id: String,
    pub goal_id: String,
    pub amount: f64,
    #[serde(default)]
    pub note: Option<String>,
    pub created_at: String,
}

/// Request body for goal create/update calls.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SavingGoalRequest {
    pub title: String,
    pub goal_amount: f64,
    pub current_amount: f64,
    pub goal_date: String,
}

impl From<&SavingGoal> for SavingGoalRequest {
    fn from(goal: &SavingGoal) -> Self {
        SavingGoalRequest {
            title: goal.title.clone(),
            goal_amount: goal.goal_amount,
            current_amount: goal.current_amount,
            goal_date: goal.goal_date.clone(),
        }
    }
}

/// Request body for contribution create calls.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ContributionRequest {
    pub goal_id: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_at: String,
}

/// Parameters for creating a goal; ids and derived fields are filled in by
/// the service.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewSavingGoal {
    pub title: String,
    pub goal_amount: f64,
    pub goal_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(date: &str, completed: bool) -> SavingGoal {
        SavingGoal {
            id: "g1".to_string(),
            user_id: None,
            title: "Trip".to_string(),
            goal_amount: 1000.0,
            current_amount: 0.0,
            goal_date: date.to_string(),
            is_completed: completed,
            sync_status: SyncStatus::Pending.as_str().to_string(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn sync_status_round_trips() {
        for status in [SyncStatus::Pending, SyncStatus::Synced, SyncStatus::SyncFailed] {
            assert_eq!(SyncStatus::parse(status.as_str()), status);
        }
        // Unknown values degrade to Pending rather than failing.
        assert_eq!(SyncStatus::parse("garbage"), SyncStatus::Pending);
    }

    #[test]
    fn past_date_is_overdue_unless_completed() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        assert!(goal("2025-01-01", false).is_overdue(today));
        assert!(!goal("2025-01-01", true).is_overdue(today));
        assert!(!goal("2025-12-31", false).is_overdue(today));
    }

    #[test]
    fn overdue_handles_datetime_strings_and_garbage() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        assert!(goal("2025-01-01T00:00:00.000Z", false).is_overdue(today));
        assert!(!goal("soon", false).is_overdue(today));
    }
}
