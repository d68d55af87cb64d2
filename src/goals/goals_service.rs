use crate::auth::token_store::SessionHandle;
use crate::errors::{Error, Result, ValidationError};
use crate::events::{EventBus, StoreEvent};
use crate::goals::goals_model::{
    ContributionRequest, NewSavingGoal, SavingContribution, SavingGoal, SavingGoalRequest,
    SyncStatus,
};
use crate::goals::goals_traits::{GoalRepositoryTrait, GoalServiceTrait, GoalsApi};
use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};
use std::sync::Arc;
use tokio::sync::broadcast;
use uuid::Uuid;

/// Saving goals are local-first: every mutation lands in the local store
/// under a client-generated id before the matching remote call is attempted,
/// and the store is reconciled with the server's canonical response when that
/// call succeeds. A failed sync is logged and tagged on the row, never
/// surfaced as an operation failure.
pub struct GoalService {
    api: Arc<dyn GoalsApi>,
    repository: Arc<dyn GoalRepositoryTrait>,
    session: SessionHandle,
    events: EventBus,
}

impl GoalService {
    pub fn new(
        api: Arc<dyn GoalsApi>,
        repository: Arc<dyn GoalRepositoryTrait>,
        session: SessionHandle,
        events: EventBus,
    ) -> Self {
        GoalService {
            api,
            repository,
            session,
            events,
        }
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    async fn get_goals(&self) -> Result<Vec<SavingGoal>> {
        match self.api.fetch_goals().await {
            Ok(remote) => {
                self.repository.upsert_goals(remote.clone()).await?;
                self.events.publish(StoreEvent::GoalsChanged);
                Ok(remote)
            }
            Err(e) => {
                // Any remote failure falls back to whatever the store holds.
                warn!("Fetching goals failed, using cache: {}", e);
                self.repository.load_goals()
            }
        }
    }

    async fn get_goal(&self, id: &str) -> Result<SavingGoal> {
        match self.api.fetch_goal(id).await {
            Ok(remote) => Ok(self.repository.upsert_goal(remote).await?),
            Err(e) => {
                warn!("Fetching goal {} failed, using cache: {}", id, e);
                self.repository
                    .get_goal_by_id(id)?
                    .ok_or_else(|| Error::NotFound(format!("goal {}", id)))
            }
        }
    }

    async fn create_goal(&self, new_goal: NewSavingGoal) -> Result<SavingGoal> {
        if new_goal.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title".to_string()).into());
        }
        if new_goal.goal_amount <= 0.0 {
            return Err(
                ValidationError::InvalidInput("goal amount must be positive".to_string()).into(),
            );
        }

        let goal = SavingGoal {
            id: Uuid::new_v4().to_string(),
            user_id: self.session.user_id(),
            title: new_goal.title,
            goal_amount: new_goal.goal_amount,
            current_amount: 0.0,
            goal_date: new_goal.goal_date,
            is_completed: false,
            sync_status: SyncStatus::Pending.as_str().to_string(),
            updated_at: String::new(),
        };

        // Local first, for immediate feedback.
        let local = self.repository.upsert_goal(goal).await?;
        self.events.publish(StoreEvent::GoalsChanged);

        match self.api.create_goal(&SavingGoalRequest::from(&local)).await {
            Ok(mut server_goal) => {
                debug!("Server created goal with id {}", server_goal.id);
                server_goal.sync_status = SyncStatus::Synced.as_str().to_string();
                let reconciled = self.repository.replace_goal(&local.id, server_goal).await?;
                self.events.publish(StoreEvent::GoalsChanged);
                Ok(reconciled)
            }
            Err(e) => {
                // Keep the local record; a later refresh is the only retry path.
                warn!("Failed to sync goal with server: {}", e);
                self.repository
                    .set_sync_status(&local.id, SyncStatus::SyncFailed)
                    .await?;
                self.events.publish(StoreEvent::GoalsChanged);
                Ok(local)
            }
        }
    }

    async fn update_goal(&self, mut goal: SavingGoal) -> Result<SavingGoal> {
        // Write-through locally so edits work offline.
        goal.sync_status = SyncStatus::Pending.as_str().to_string();
        let local = self.repository.upsert_goal(goal).await?;
        self.events.publish(StoreEvent::GoalsChanged);

        match self
            .api
            .update_goal(&local.id, &SavingGoalRequest::from(&local))
            .await
        {
            Ok(mut server_goal) => {
                server_goal.sync_status = SyncStatus::Synced.as_str().to_string();
                let reconciled = self.repository.replace_goal(&local.id, server_goal).await?;
                self.events.publish(StoreEvent::GoalsChanged);
                Ok(reconciled)
            }
            Err(e) => {
                warn!("Failed to sync updated goal with server: {}", e);
                self.repository
                    .set_sync_status(&local.id, SyncStatus::SyncFailed)
                    .await?;
                self.events.publish(StoreEvent::GoalsChanged);
                self.repository
                    .get_goal_by_id(&local.id)?
                    .ok_or_else(|| Error::NotFound(format!("goal {}", local.id)))
            }
        }
    }

    async fn delete_goal(&self, id: &str) -> Result<()> {
        // Delete locally first; contributions go with the goal.
        self.repository.delete_goal(id).await?;
        self.events.publish(StoreEvent::GoalsChanged);
        self.events.publish(StoreEvent::ContributionsChanged {
            goal_id: id.to_string(),
        });

        if let Err(e) = self.api.delete_goal(id).await {
            warn!("Failed to sync goal deletion with server: {}", e);
        }
        Ok(())
    }

    async fn get_contributions(&self, goal_id: &str) -> Result<Vec<SavingContribution>> {
        match self.api.fetch_contributions(goal_id).await {
            Ok(remote) => {
                self.repository
                    .upsert_contributions(remote.clone())
                    .await?;
                self.events.publish(StoreEvent::ContributionsChanged {
                    goal_id: goal_id.to_string(),
                });
                Ok(remote)
            }
            Err(e) => {
                warn!(
                    "Fetching contributions for goal {} failed, using cache: {}",
                    goal_id, e
                );
                self.repository.load_contributions(goal_id)
            }
        }
    }

    async fn add_contribution(
        &self,
        goal_id: &str,
        amount: f64,
        note: Option<String>,
    ) -> Result<SavingContribution> {
        if amount <= 0.0 {
            return Err(
                ValidationError::InvalidInput("contribution amount must be positive".to_string())
                    .into(),
            );
        }

        let contribution = SavingContribution {
            id: Uuid::new_v4().to_string(),
            goal_id: goal_id.to_string(),
            amount,
            note,
            created_at: Utc::now().to_rfc3339(),
        };

        // Local first, then recompute the goal's derived progress.
        let local = self.repository.upsert_contribution(contribution).await?;
        self.events.publish(StoreEvent::ContributionsChanged {
            goal_id: goal_id.to_string(),
        });

        if let Err(e) = self.recalculate_progress(goal_id).await {
            warn!("Failed to update progress for goal {}: {}", goal_id, e);
        }

        let request = ContributionRequest {
            goal_id: local.goal_id.clone(),
            amount: local.amount,
            note: local.note.clone(),
            created_at: local.created_at.clone(),
        };
        match self.api.create_contribution(goal_id, &request).await {
            Ok(server_contribution) => {
                if server_contribution.id != local.id {
                    // Reconcile the provisional row with the server's id.
                    self.repository.delete_contribution(&local.id).await?;
                }
                self.repository
                    .upsert_contribution(server_contribution)
                    .await?;
                self.events.publish(StoreEvent::ContributionsChanged {
                    goal_id: goal_id.to_string(),
                });
            }
            Err(e) => {
                warn!("Failed to sync contribution with server: {}", e);
            }
        }

        Ok(local)
    }

    async fn delete_contribution(&self, id: &str) -> Result<()> {
        let owning_goal = self
            .repository
            .get_contribution_by_id(id)?
            .map(|c| c.goal_id);

        self.repository.delete_contribution(id).await?;
        if let Some(goal_id) = owning_goal {
            self.events.publish(StoreEvent::ContributionsChanged {
                goal_id: goal_id.clone(),
            });
            if let Err(e) = self.recalculate_progress(&goal_id).await {
                warn!("Failed to update progress for goal {}: {}", goal_id, e);
            }
        }

        if let Err(e) = self.api.delete_contribution(id).await {
            warn!("Failed to sync contribution deletion with server: {}", e);
        }
        Ok(())
    }

    async fn recalculate_progress(&self, goal_id: &str) -> Result<SavingGoal> {
        let total = self.repository.total_contributions(goal_id)?;
        let goal = self
            .repository
            .get_goal_by_id(goal_id)?
            .ok_or_else(|| Error::NotFound(format!("goal {}", goal_id)))?;

        let is_completed = total >= goal.goal_amount;
        let updated = self
            .repository
            .apply_progress(goal_id, total, is_completed)
            .await?;
        self.events.publish(StoreEvent::GoalsChanged);
        Ok(updated)
    }

    fn observe_goals(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    fn observe_contributions(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }
}
