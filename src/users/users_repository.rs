use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::Result;
use crate::schema::users;
use crate::users::users_model::User;
use crate::users::users_traits::UserRepositoryTrait;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

pub struct UserRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        UserRepository { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn get_user_by_id(&self, id: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(users::table
            .find(id)
            .first::<User>(&mut conn)
            .optional()?)
    }

    async fn upsert_user(&self, user: User) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                diesel::replace_into(users::table)
                    .values(&user)
                    .execute(conn)?;
                Ok(users::table.find(&user.id).first::<User>(conn)?)
            })
            .await
    }
}
