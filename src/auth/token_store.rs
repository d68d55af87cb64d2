use crate::auth::auth_model::{Session, SessionRow};
use crate::auth::jwt;
use crate::db::{get_connection, DbPool};
use crate::errors::Result;
use crate::schema::auth_session::dsl::*;
use diesel::prelude::*;
use log::warn;
use std::sync::Arc;
use tokio::sync::watch;

const TOKEN_KEY: &str = "token";
const USER_ID_KEY: &str = "user_id";

/// Persisted bearer-token store with an in-memory cache.
///
/// The session survives process restarts via the `auth_session` table; a
/// watch channel mirrors it in memory so the request-signing path can read
/// the token synchronously.
pub struct TokenStore {
    pool: Arc<DbPool>,
    tx: watch::Sender<Session>,
}

/// Cheap cloneable read handle over the cached session.
#[derive(Clone)]
pub struct SessionHandle {
    rx: watch::Receiver<Session>,
}

impl SessionHandle {
    pub fn session(&self) -> Session {
        self.rx.borrow().clone()
    }

    /// Synchronous token read for the request-signing path.
    pub fn token(&self) -> Option<String> {
        self.rx.borrow().token.clone()
    }

    pub fn user_id(&self) -> Option<String> {
        self.rx.borrow().user_id.clone()
    }

    /// Waits for the next session change. Used by observers of auth state.
    pub async fn changed(&mut self) -> Result<Session> {
        self.rx
            .changed()
            .await
            .map_err(|_| crate::errors::Error::Unexpected("Token store dropped".to_string()))?;
        Ok(self.rx.borrow().clone())
    }
}

impl TokenStore {
    /// Loads the persisted session (if any) and starts the in-memory cache.
    pub fn new(pool: Arc<DbPool>) -> Result<Self> {
        let initial = Self::load(&pool)?;
        let (tx, _rx) = watch::channel(initial);
        Ok(TokenStore { pool, tx })
    }

    fn load(pool: &Arc<DbPool>) -> Result<Session> {
        let mut conn = get_connection(pool)?;
        let rows: Vec<SessionRow> = auth_session.load::<SessionRow>(&mut conn)?;

        let mut session = Session::default();
        for row in rows {
            match row.session_key.as_str() {
                TOKEN_KEY => session.token = Some(row.session_value),
                USER_ID_KEY => session.user_id = Some(row.session_value),
                _ => {}
            }
        }
        Ok(session)
    }

    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            rx: self.tx.subscribe(),
        }
    }

    /// Persists a new bearer token and the user id derived from its claims.
    pub fn save_token(&self, token_value: &str) -> Result<()> {
        let derived_user_id = jwt::user_id_from_token(token_value);
        if derived_user_id.is_none() {
            warn!("Could not derive user id from token claims");
        }

        let mut conn = get_connection(&self.pool)?;
        let mut rows = vec![SessionRow {
            session_key: TOKEN_KEY.to_string(),
            session_value: token_value.to_string(),
        }];
        if let Some(uid) = &derived_user_id {
            rows.push(SessionRow {
                session_key: USER_ID_KEY.to_string(),
                session_value: uid.clone(),
            });
        }
        diesel::replace_into(auth_session)
            .values(&rows)
            .execute(&mut conn)?;

        self.tx.send_replace(Session {
            token: Some(token_value.to_string()),
            user_id: derived_user_id,
        });
        Ok(())
    }

    /// Clears the persisted session (logout).
    pub fn clear(&self) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;
        diesel::delete(auth_session).execute(&mut conn)?;

        self.tx.send_replace(Session::default());
        Ok(())
    }

    pub fn session(&self) -> Session {
        self.tx.borrow().clone()
    }
}
