use crate::categories::categories_model::Category;
use crate::categories::categories_traits::CategoryRepositoryTrait;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::Result;
use crate::schema::categories;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

pub struct CategoryRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CategoryRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        CategoryRepository { pool, writer }
    }
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    fn get_all_categories(&self) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(categories::table
            .order(categories::name.asc())
            .load::<Category>(&mut conn)?)
    }

    fn get_category_by_id(&self, id: &str) -> Result<Option<Category>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(categories::table
            .find(id)
            .first::<Category>(&mut conn)
            .optional()?)
    }

    fn get_categories_by_kind(&self, kind: &str) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(categories::table
            .filter(categories::kind.eq(kind))
            .order(categories::name.asc())
            .load::<Category>(&mut conn)?)
    }

    async fn upsert_category(&self, category: Category) -> Result<Category> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Category> {
                diesel::replace_into(categories::table)
                    .values(&category)
                    .execute(conn)?;
                Ok(categories::table.find(&category.id).first::<Category>(conn)?)
            })
            .await
    }

    async fn upsert_categories(&self, items: Vec<Category>) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let mut affected = 0;
                for category in &items {
                    affected += diesel::replace_into(categories::table)
                        .values(category)
                        .execute(conn)?;
                }
                Ok(affected)
            })
            .await
    }

    async fn delete_category(&self, id: &str) -> Result<usize> {
        let id_owned = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(categories::table.find(id_owned)).execute(conn)?)
            })
            .await
    }
}
