use crate::budgets::budgets_model::{Budget, BudgetWithCategory};
use crate::budgets::budgets_traits::BudgetRepositoryTrait;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::Result;
use crate::schema::{budgets, categories};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

pub struct BudgetRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl BudgetRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        BudgetRepository { pool, writer }
    }
}

#[async_trait]
impl BudgetRepositoryTrait for BudgetRepository {
    fn get_all_budgets(&self) -> Result<Vec<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(budgets::table.load::<Budget>(&mut conn)?)
    }

    fn get_budget_by_id(&self, id: &str) -> Result<Option<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(budgets::table
            .find(id)
            .first::<Budget>(&mut conn)
            .optional()?)
    }

    fn get_budgets_for_month(&self, month: i32, year: i32) -> Result<Vec<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(budgets::table
            .filter(budgets::month.eq(month))
            .filter(budgets::year.eq(year))
            .load::<Budget>(&mut conn)?)
    }

    fn get_budgets_for_category(&self, category_id: &str) -> Result<Vec<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(budgets::table
            .filter(budgets::category_id.eq(category_id))
            .order((budgets::year.desc(), budgets::month.desc()))
            .load::<Budget>(&mut conn)?)
    }

    fn get_budgets_with_categories(
        &self,
        month: i32,
        year: i32,
    ) -> Result<Vec<BudgetWithCategory>> {
        let mut conn = get_connection(&self.pool)?;

        let rows: Vec<(Budget, String, String)> = budgets::table
            .inner_join(categories::table.on(categories::id.eq(budgets::category_id)))
            .filter(budgets::month.eq(month))
            .filter(budgets::year.eq(year))
            .select((budgets::all_columns, categories::name, categories::kind))
            .load(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(budget, category_name, category_kind)| BudgetWithCategory {
                budget,
                category_name,
                category_kind,
            })
            .collect())
    }

    async fn upsert_budget(&self, budget: Budget) -> Result<Budget> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Budget> {
                diesel::replace_into(budgets::table)
                    .values(&budget)
                    .execute(conn)?;
                Ok(budgets::table.find(&budget.id).first::<Budget>(conn)?)
            })
            .await
    }

    async fn upsert_budgets(&self, items: Vec<Budget>) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let mut affected = 0;
                for budget in &items {
                    affected += diesel::replace_into(budgets::table)
                        .values(budget)
                        .execute(conn)?;
                }
                Ok(affected)
            })
            .await
    }

    async fn delete_budget(&self, id: &str) -> Result<usize> {
        let id_owned = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(budgets::table.find(id_owned)).execute(conn)?)
            })
            .await
    }
}
