//! Test fixtures for creating identities the way the identity provider does.

use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

/// Insert an identity into `auth.users`, firing the provisioning trigger.
pub async fn create_auth_user(pool: &PgPool, email: Option<&str>, phone: &str) -> Result<Uuid> {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO auth.users (id, email, phone) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(email)
        .bind(phone)
        .execute(pool)
        .await?;
    Ok(id)
}

/// Insert an identity with triggers disabled, as if it predates the trigger.
pub async fn create_legacy_auth_user(pool: &PgPool, phone: &str) -> Result<Uuid> {
    let id = Uuid::new_v4();
    let mut conn = pool.acquire().await?;

    sqlx::query("SET session_replication_role = replica")
        .execute(&mut *conn)
        .await?;
    let inserted = sqlx::query("INSERT INTO auth.users (id, phone) VALUES ($1, $2)")
        .bind(id)
        .bind(phone)
        .execute(&mut *conn)
        .await;
    sqlx::query("SET session_replication_role = origin")
        .execute(&mut *conn)
        .await?;

    inserted?;
    Ok(id)
}

/// Random phone number in the auth API's storage format (no `+`).
pub fn random_phone() -> String {
    let digits = Uuid::new_v4().as_u128() % 10_000_000_000;
    format!("1{:010}", digits)
}
