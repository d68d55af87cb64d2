use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::Result;
use crate::schema::transactions;
use crate::transactions::transactions_model::Transaction;
use crate::transactions::transactions_traits::TransactionRepositoryTrait;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

pub struct TransactionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        TransactionRepository { pool, writer }
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    fn get_all_transactions(&self) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(transactions::table
            .order(transactions::date.desc())
            .load::<Transaction>(&mut conn)?)
    }

    fn get_transaction_by_id(&self, id: &str) -> Result<Option<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(transactions::table
            .find(id)
            .first::<Transaction>(&mut conn)
            .optional()?)
    }

    fn get_transactions_in_month(&self, month: i32, year: i32) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let prefix = format!("{:04}-{:02}%", year, month);
        Ok(transactions::table
            .filter(transactions::date.like(prefix))
            .order(transactions::date.desc())
            .load::<Transaction>(&mut conn)?)
    }

    async fn upsert_transaction(&self, transaction: Transaction) -> Result<Transaction> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                diesel::replace_into(transactions::table)
                    .values(&transaction)
                    .execute(conn)?;
                Ok(transactions::table
                    .find(&transaction.id)
                    .first::<Transaction>(conn)?)
            })
            .await
    }

    async fn upsert_transactions(&self, items: Vec<Transaction>) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let mut affected = 0;
                for transaction in &items {
                    affected += diesel::replace_into(transactions::table)
                        .values(transaction)
                        .execute(conn)?;
                }
                Ok(affected)
            })
            .await
    }

    async fn delete_transaction(&self, id: &str) -> Result<usize> {
        let id_owned = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(transactions::table.find(id_owned)).execute(conn)?)
            })
            .await
    }
}
