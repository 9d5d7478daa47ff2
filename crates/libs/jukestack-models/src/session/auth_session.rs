//! Session model.
//!
//! Rows hold only the digest of the session token, never the token
//! itself. Sessions are expired logically by moving `expires_at` into
//! the past; rows are never deleted, preserving the audit trail.

use crate::{db::connection::DbConnection, prelude::*, user::juke_user::JukeUser};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Deserialize;
use uuid::Uuid;

/// A stored session row.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(belongs_to(JukeUser, foreign_key = user_email))]
#[diesel(table_name = crate::schema::auth_session)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AuthSession {
    pub id: Uuid,
    /// Owning account email.
    pub user_email: String,
    /// Hex-encoded digest of the session token.
    pub token_hash: String,
    /// Client IP recorded at creation.
    pub user_ip: String,
    /// Client user agent recorded at creation.
    pub user_agent: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Insertable session row.
#[derive(Insertable, PartialEq, Debug, Clone, Deserialize)]
#[diesel(table_name = crate::schema::auth_session)]
pub struct NewAuthSession {
    pub user_email: String,
    pub token_hash: String,
    pub user_ip: String,
    pub user_agent: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AuthSession {
    /// Inserts a new session row.
    pub fn create(conn: &DbConnection, item: NewAuthSession) -> Result<Self> {
        let connection = &mut conn.pool.get()?;
        Ok(diesel::insert_into(crate::schema::auth_session::table)
            .values(item)
            .returning(AuthSession::as_returning())
            .get_result(connection)?)
    }

    /// Fetches a session together with its owning user by token digest.
    ///
    /// Single joined query so the caller sees the session and the
    /// account's verified flag from the same snapshot.
    pub fn fetch_with_user_by_token_hash(
        conn: &DbConnection,
        target_hash: &str,
    ) -> Result<Option<(Self, JukeUser)>> {
        use crate::schema::{auth_session, juke_user};
        let conn = &mut conn.pool.get()?;
        Ok(auth_session::table
            .inner_join(juke_user::table)
            .filter(auth_session::token_hash.eq(target_hash))
            .select((AuthSession::as_select(), JukeUser::as_select()))
            .first(conn)
            .optional()?)
    }

    /// Moves a session's expiry to the given instant (logical expiry).
    pub fn expire_by_token_hash(
        conn: &DbConnection,
        target_hash: &str,
        new_expires_at: DateTime<Utc>,
    ) -> Result<usize> {
        use crate::schema::auth_session::dsl::*;
        let conn = &mut conn.pool.get()?;
        Ok(diesel::update(auth_session.filter(token_hash.eq(target_hash)))
            .set(expires_at.eq(new_expires_at))
            .execute(conn)?)
    }
}
