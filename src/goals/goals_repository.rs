use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{Error, Result};
use crate::goals::goals_model::{SavingContribution, SavingGoal, SyncStatus};
use crate::goals::goals_traits::GoalRepositoryTrait;
use crate::schema::{saving_contributions, saving_goals};
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

pub struct GoalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        GoalRepository { pool, writer }
    }
}

fn stamp(goal: &mut SavingGoal) {
    if goal.sync_status.is_empty() {
        goal.sync_status = SyncStatus::Synced.as_str().to_string();
    }
    goal.updated_at = Utc::now().to_rfc3339();
}

// REPLACE would delete-then-insert the row and take the contributions with
// it through the cascade, so goal upserts go through ON CONFLICT UPDATE.
fn upsert(conn: &mut SqliteConnection, goal: &SavingGoal) -> Result<usize> {
    Ok(diesel::insert_into(saving_goals::table)
        .values(goal)
        .on_conflict(saving_goals::id)
        .do_update()
        .set(goal)
        .execute(conn)?)
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn load_goals(&self) -> Result<Vec<SavingGoal>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(saving_goals::table.load::<SavingGoal>(&mut conn)?)
    }

    fn get_goal_by_id(&self, id: &str) -> Result<Option<SavingGoal>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(saving_goals::table
            .find(id)
            .first::<SavingGoal>(&mut conn)
            .optional()?)
    }

    async fn upsert_goal(&self, mut goal: SavingGoal) -> Result<SavingGoal> {
        stamp(&mut goal);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<SavingGoal> {
                upsert(conn, &goal)?;
                Ok(saving_goals::table.find(&goal.id).first::<SavingGoal>(conn)?)
            })
            .await
    }

    async fn upsert_goals(&self, goals: Vec<SavingGoal>) -> Result<usize> {
        let goals: Vec<SavingGoal> = goals
            .into_iter()
            .map(|mut g| {
                stamp(&mut g);
                g
            })
            .collect();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let mut affected = 0;
                for goal in &goals {
                    affected += upsert(conn, goal)?;
                }
                Ok(affected)
            })
            .await
    }

    async fn replace_goal(&self, old_id: &str, mut goal: SavingGoal) -> Result<SavingGoal> {
        let old_id_owned = old_id.to_string();
        stamp(&mut goal);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<SavingGoal> {
                // Re-point contributions at the canonical id before dropping
                // the provisional row, so the cascade does not eat them.
                if old_id_owned != goal.id {
                    upsert(conn, &goal)?;
                    diesel::update(
                        saving_contributions::table
                            .filter(saving_contributions::goal_id.eq(&old_id_owned)),
                    )
                    .set(saving_contributions::goal_id.eq(&goal.id))
                    .execute(conn)?;
                    diesel::delete(saving_goals::table.find(&old_id_owned)).execute(conn)?;
                } else {
                    upsert(conn, &goal)?;
                }
                Ok(saving_goals::table.find(&goal.id).first::<SavingGoal>(conn)?)
            })
            .await
    }

    async fn set_sync_status(&self, id: &str, status: SyncStatus) -> Result<()> {
        let id_owned = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::update(saving_goals::table.find(&id_owned))
                    .set((
                        saving_goals::sync_status.eq(status.as_str()),
                        saving_goals::updated_at.eq(Utc::now().to_rfc3339()),
                    ))
                    .execute(conn)?;
                Ok(())
            })
            .await
    }

    async fn delete_goal(&self, id: &str) -> Result<usize> {
        let id_owned = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(
                    saving_contributions::table
                        .filter(saving_contributions::goal_id.eq(&id_owned)),
                )
                .execute(conn)?;
                Ok(diesel::delete(saving_goals::table.find(&id_owned)).execute(conn)?)
            })
            .await
    }

    fn load_contributions(&self, goal_id: &str) -> Result<Vec<SavingContribution>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(saving_contributions::table
            .filter(saving_contributions::goal_id.eq(goal_id))
            .order(saving_contributions::created_at.desc())
            .load::<SavingContribution>(&mut conn)?)
    }

    fn get_contribution_by_id(&self, id: &str) -> Result<Option<SavingContribution>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(saving_contributions::table
            .find(id)
            .first::<SavingContribution>(&mut conn)
            .optional()?)
    }

    fn total_contributions(&self, goal_id: &str) -> Result<f64> {
        let mut conn = get_connection(&self.pool)?;
        let total: Option<f64> = saving_contributions::table
            .filter(saving_contributions::goal_id.eq(goal_id))
            .select(diesel::dsl::sum(saving_contributions::amount))
            .first(&mut conn)?;
        Ok(total.unwrap_or(0.0))
    }

    async fn upsert_contribution(
        &self,
        contribution: SavingContribution,
    ) -> Result<SavingContribution> {
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<SavingContribution> {
                    diesel::replace_into(saving_contributions::table)
                        .values(&contribution)
                        .execute(conn)?;
                    Ok(saving_contributions::table
                        .find(&contribution.id)
                        .first::<SavingContribution>(conn)?)
                },
            )
            .await
    }

    async fn upsert_contributions(&self, items: Vec<SavingContribution>) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let mut affected = 0;
                for contribution in &items {
                    affected += diesel::replace_into(saving_contributions::table)
                        .values(contribution)
                        .execute(conn)?;
                }
                Ok(affected)
            })
            .await
    }

    async fn delete_contribution(&self, id: &str) -> Result<usize> {
        let id_owned = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(
                    diesel::delete(saving_contributions::table.find(&id_owned))
                        .execute(conn)?,
                )
            })
            .await
    }

    async fn apply_progress(
        &self,
        goal_id: &str,
        current_amount: f64,
        is_completed: bool,
    ) -> Result<SavingGoal> {
        let id_owned = goal_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<SavingGoal> {
                let updated = diesel::update(saving_goals::table.find(&id_owned))
                    .set((
                        saving_goals::current_amount.eq(current_amount),
                        saving_goals::is_completed.eq(is_completed),
                        saving_goals::updated_at.eq(Utc::now().to_rfc3339()),
                    ))
                    .execute(conn)?;
                if updated == 0 {
                    return Err(Error::NotFound(format!("goal {}", id_owned)));
                }
                Ok(saving_goals::table.find(&id_owned).first::<SavingGoal>(conn)?)
            })
            .await
    }
}
