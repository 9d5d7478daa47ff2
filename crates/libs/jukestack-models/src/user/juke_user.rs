//! User credential model.
//!
//! One row per account, keyed by the normalized email address. The
//! password hash and salt are stored hex- or PHC-encoded; `hash_version`
//! records which hashing scheme produced them.

use crate::{db::connection::DbConnection, prelude::*};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Deserialize;

/// A stored user credential.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = crate::schema::juke_user)]
#[diesel(primary_key(email))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct JukeUser {
    /// Normalized account email.
    pub email: String,
    /// Encoded password hash (hex or PHC string).
    pub pw_hash: String,
    /// Hex-encoded salt; empty for schemes that embed their salt.
    pub pw_salt: String,
    /// Hashing scheme version that produced `pw_hash`.
    pub hash_version: i32,
    /// Whether the account's email address has been verified.
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable credential row.
#[derive(Insertable, PartialEq, Debug, Clone, Deserialize)]
#[diesel(table_name = crate::schema::juke_user)]
pub struct NewJukeUser {
    pub email: String,
    pub pw_hash: String,
    pub pw_salt: String,
    pub hash_version: i32,
}

impl JukeUser {
    /// Inserts a new credential row.
    pub fn create(conn: &DbConnection, item: NewJukeUser) -> Result<Self> {
        let connection = &mut conn.pool.get()?;
        Ok(diesel::insert_into(crate::schema::juke_user::table)
            .values(item)
            .returning(JukeUser::as_returning())
            .get_result(connection)?)
    }

    /// Fetches a credential by email, `None` when the account is unknown.
    pub fn fetch_by_email(conn: &DbConnection, target_email: &str) -> Result<Option<Self>> {
        use crate::schema::juke_user::dsl::*;
        let conn = &mut conn.pool.get()?;
        Ok(juke_user
            .filter(email.eq(target_email))
            .select(JukeUser::as_select())
            .first(conn)
            .optional()?)
    }

    /// Marks the account's email as verified.
    ///
    /// Returns the number of affected rows; zero means the account no
    /// longer exists.
    pub fn set_email_verified(conn: &DbConnection, target_email: &str) -> Result<usize> {
        use crate::schema::juke_user::dsl::*;
        let conn = &mut conn.pool.get()?;
        Ok(diesel::update(juke_user.filter(email.eq(target_email)))
            .set((email_verified.eq(true), updated_at.eq(Utc::now())))
            .execute(conn)?)
    }
}
