use crate::errors::Result;
use crate::goals::goals_model::{
    ContributionRequest, NewSavingGoal, SavingContribution, SavingGoal, SavingGoalRequest,
    SyncStatus,
};
use async_trait::async_trait;

/// Remote endpoints for saving goals and their contributions.
#[async_trait]
pub trait GoalsApi: Send + Sync {
    async fn fetch_goals(&self) -> Result<Vec<SavingGoal>>;
    async fn fetch_goal(&self, id: &str) -> Result<SavingGoal>;
    async fn create_goal(&self, request: &SavingGoalRequest) -> Result<SavingGoal>;
    async fn update_goal(&self, id: &str, request: &SavingGoalRequest) -> Result<SavingGoal>;
    async fn delete_goal(&self, id: &str) -> Result<()>;
    async fn fetch_contributions(&self, goal_id: &str) -> Result<Vec<SavingContribution>>;
    async fn create_contribution(
        &self,
        goal_id: &str,
        request: &ContributionRequest,
    ) -> Result<SavingContribution>;
    async fn delete_contribution(&self, id: &str) -> Result<()>;
}

/// Trait for goal repository operations (local store)
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    fn load_goals(&self) -> Result<Vec<SavingGoal>>;
    fn get_goal_by_id(&self, id: &str) -> Result<Option<SavingGoal>>;
    async fn upsert_goal(&self, goal: SavingGoal) -> Result<SavingGoal>;
    async fn upsert_goals(&self, goals: Vec<SavingGoal>) -> Result<usize>;
    /// Reconciliation: atomically replace the row under `old_id` with the
    /// server's canonical representation (which may carry a different id).
    async fn replace_goal(&self, old_id: &str, goal: SavingGoal) -> Result<SavingGoal>;
    async fn set_sync_status(&self, id: &str, status: SyncStatus) -> Result<()>;
    /// Deletes the goal and all of its contributions in one transaction.
    async fn delete_goal(&self, id: &str) -> Result<usize>;

    fn load_contributions(&self, goal_id: &str) -> Result<Vec<SavingContribution>>;
    fn get_contribution_by_id(&self, id: &str) -> Result<Option<SavingContribution>>;
    fn total_contributions(&self, goal_id: &str) -> Result<f64>;
    async fn upsert_contribution(&self, contribution: SavingContribution)
        -> Result<SavingContribution>;
    async fn upsert_contributions(&self, contributions: Vec<SavingContribution>) -> Result<usize>;
    async fn delete_contribution(&self, id: &str) -> Result<usize>;

    /// Writes the recomputed progress back onto the goal row.
    async fn apply_progress(
        &self,
        goal_id: &str,
        current_amount: f64,
        is_completed: bool,
    ) -> Result<SavingGoal>;
}

/// Trait for goal service operations
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    async fn get_goals(&self) -> Result<Vec<SavingGoal>>;
    async fn get_goal(&self, id: &str) -> Result<SavingGoal>;
    async fn create_goal(&self, new_goal: NewSavingGoal) -> Result<SavingGoal>;
    async fn update_goal(&self, goal: SavingGoal) -> Result<SavingGoal>;
    async fn delete_goal(&self, id: &str) -> Result<()>;

    async fn get_contributions(&self, goal_id: &str) -> Result<Vec<SavingContribution>>;
    async fn add_contribution(
        &self,
        goal_id: &str,
        amount: f64,
        note: Option<String>,
    ) -> Result<SavingContribution>;
    async fn delete_contribution(&self, id: &str) -> Result<()>;

    /// Recompute a goal's progress from the sum of its cached contributions.
    async fn recalculate_progress(&self, goal_id: &str) -> Result<SavingGoal>;

    fn observe_goals(&self) -> tokio::sync::broadcast::Receiver<crate::events::StoreEvent>;
    /// Contribution events carry the owning goal id; observers filter on it.
    fn observe_contributions(&self) -> tokio::sync::broadcast::Receiver<crate::events::StoreEvent>;
}
