//! CLI for schema migrations and profile backfill
//!
//! Outputs JSON so it can be scripted from deploy tooling.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use phone_verify::config::DatabaseConfig;
use phone_verify::domains::verification::models::Profile;
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

#[derive(Parser)]
#[command(name = "migrate_cli")]
#[command(about = "Profiles schema migrations and maintenance")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Run,

    /// List applied migrations
    Status,

    /// Create profile rows for identities created before the trigger existed
    BackfillProfiles {
        #[arg(long)]
        dry_run: bool,
    },
}

// ============================================================================
// JSON Response Types
// ============================================================================

#[derive(Serialize)]
struct Response {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    migrations: Option<Vec<AppliedMigration>>,
}

impl Response {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            count: None,
            migrations: None,
        }
    }
}

#[derive(Serialize, sqlx::FromRow)]
struct AppliedMigration {
    version: i64,
    description: String,
    success: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,sqlx=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = DatabaseConfig::from_env().context("Failed to load configuration")?;

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    let response = match run(cli.command, &pool).await {
        Ok(response) => response,
        Err(e) => Response {
            success: false,
            message: Some(format!("{:#}", e)),
            count: None,
            migrations: None,
        },
    };

    println!("{}", serde_json::to_string_pretty(&response)?);

    if !response.success {
        std::process::exit(1);
    }
    Ok(())
}

async fn run(command: Commands, pool: &PgPool) -> Result<Response> {
    match command {
        Commands::Run => {
            sqlx::migrate!("./migrations")
                .run(pool)
                .await
                .context("Failed to run migrations")?;
            Ok(Response::ok("Migrations complete"))
        }

        Commands::Status => {
            let migrations = sqlx::query_as::<_, AppliedMigration>(
                "SELECT version, description, success FROM _sqlx_migrations ORDER BY version",
            )
            .fetch_all(pool)
            .await
            .context("Failed to read migration history")?;

            Ok(Response {
                count: Some(migrations.len() as i64),
                migrations: Some(migrations),
                ..Response::ok("Applied migrations")
            })
        }

        Commands::BackfillProfiles { dry_run } => {
            if dry_run {
                let missing = Profile::count_missing(pool).await?;
                return Ok(Response {
                    count: Some(missing),
                    ..Response::ok("Identities without a profile (dry run)")
                });
            }

            let inserted = Profile::backfill(pool).await?;
            tracing::info!(inserted, "Backfilled profiles");
            Ok(Response {
                count: Some(inserted as i64),
                ..Response::ok("Profiles backfilled")
            })
        }
    }
}
