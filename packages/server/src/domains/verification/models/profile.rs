use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Profile - contact details extending an identity
///
/// Rows are created by the `on_auth_user_created` trigger, never by the
/// request handlers. `id` is the identity id and cascades on identity delete.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub correspondence_address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The profile fields returned to a freshly verified caller.
///
/// Every field serializes, as `null` when unset or unreadable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFields {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub correspondence_address: Option<String>,
}

impl ProfileFields {
    /// PostgREST `select` list for these fields
    pub const COLUMNS: &'static str = "email,first_name,last_name,phone,correspondence_address";
}

impl From<Profile> for ProfileFields {
    fn from(profile: Profile) -> Self {
        Self {
            email: profile.email,
            first_name: profile.first_name,
            last_name: profile.last_name,
            phone: profile.phone,
            correspondence_address: profile.correspondence_address,
        }
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Profile {
    /// Find profile by identity id
    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        let profile = sqlx::query_as::<_, Profile>("SELECT * FROM public.profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(profile)
    }

    /// Create missing profiles for identities that predate the trigger.
    ///
    /// Same upsert as the trigger, so it never touches existing rows.
    /// Returns the number of rows inserted.
    pub async fn backfill(pool: &PgPool) -> Result<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO public.profiles (id, email, phone)
            SELECT u.id, u.email, u.phone
            FROM auth.users u
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Count identities that have no profile row
    pub async fn count_missing(pool: &PgPool) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM auth.users u
            LEFT JOIN public.profiles p ON p.id = u.id
            WHERE p.id IS NULL
            "#,
        )
        .fetch_one(pool)
        .await?;
        Ok(count)
    }
}
