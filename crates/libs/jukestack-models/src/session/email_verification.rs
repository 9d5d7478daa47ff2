//! Email-verification token model.
//!
//! Tokens are stored as issued: single-use and short-lived, so hashing
//! them at rest buys nothing. The validity window is enforced by the
//! authority, not here.

use crate::{db::connection::DbConnection, prelude::*, user::juke_user::JukeUser};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Deserialize;
use uuid::Uuid;

/// A stored verification token.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(belongs_to(JukeUser, foreign_key = user_email))]
#[diesel(table_name = crate::schema::email_verification)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EmailVerification {
    pub id: Uuid,
    /// Owning account email.
    pub user_email: String,
    /// Hex-encoded token as handed to the user.
    pub token: String,
    pub created_at: DateTime<Utc>,
    /// Set once the token has been used successfully.
    pub consumed_at: Option<DateTime<Utc>>,
}

/// Insertable verification token row.
#[derive(Insertable, PartialEq, Debug, Clone, Deserialize)]
#[diesel(table_name = crate::schema::email_verification)]
pub struct NewEmailVerification {
    pub user_email: String,
    pub token: String,
    pub created_at: DateTime<Utc>,
}

impl EmailVerification {
    /// Inserts a new verification token row.
    pub fn create(conn: &DbConnection, item: NewEmailVerification) -> Result<Self> {
        let connection = &mut conn.pool.get()?;
        Ok(diesel::insert_into(crate::schema::email_verification::table)
            .values(item)
            .returning(EmailVerification::as_returning())
            .get_result(connection)?)
    }

    /// Fetches a verification token by its value.
    pub fn fetch_by_token(conn: &DbConnection, target_token: &str) -> Result<Option<Self>> {
        use crate::schema::email_verification::dsl::*;
        let conn = &mut conn.pool.get()?;
        Ok(email_verification
            .filter(token.eq(target_token))
            .select(EmailVerification::as_select())
            .first(conn)
            .optional()?)
    }

    /// Marks a token as consumed at the given instant.
    pub fn consume(
        conn: &DbConnection,
        target_token: &str,
        at: DateTime<Utc>,
    ) -> Result<usize> {
        use crate::schema::email_verification::dsl::*;
        let conn = &mut conn.pool.get()?;
        Ok(
            diesel::update(email_verification.filter(token.eq(target_token)))
                .set(consumed_at.eq(Some(at)))
                .execute(conn)?,
        )
    }
}
