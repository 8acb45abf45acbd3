//! One-shot provisioning of the primary admin account.
//!
//! Idempotent: if a `primary_admin` role assignment already exists this
//! binary reports it and exits without touching anything. Otherwise it
//! creates the well-known account with an approved `primary_admin` role.
//!
//! Run out-of-band (deploy hook, operator shell), never from the request
//! path:
//!
//! ```text
//! DATABASE_URL=postgres://... dormhub-seed
//! ```

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dormhub_api::auth::password::hash_password;
use dormhub_core::approval::APPROVAL_APPROVED;
use dormhub_core::roles::ROLE_PRIMARY_ADMIN;
use dormhub_db::models::user::CreateUser;
use dormhub_db::repositories::{RoleRepo, UserRepo};

/// Defaults mirror the original deployment's seed account; override via
/// `SEED_ADMIN_EMAIL` / `SEED_ADMIN_PASSWORD` / `SEED_ADMIN_USERNAME`.
const DEFAULT_EMAIL: &str = "primaryadmin@dormhub.app";
const DEFAULT_PASSWORD: &str = "ADMIN@123";
const DEFAULT_USERNAME: &str = "Primary Admin";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dormhub_seed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = dormhub_db::create_pool(&database_url).await?;
    dormhub_db::run_migrations(&pool).await?;

    if RoleRepo::primary_admin_exists(&pool).await? {
        tracing::info!("Primary admin already exists, nothing to do");
        return Ok(());
    }

    let email = std::env::var("SEED_ADMIN_EMAIL").unwrap_or_else(|_| DEFAULT_EMAIL.into());
    let password =
        std::env::var("SEED_ADMIN_PASSWORD").unwrap_or_else(|_| DEFAULT_PASSWORD.into());
    let username =
        std::env::var("SEED_ADMIN_USERNAME").unwrap_or_else(|_| DEFAULT_USERNAME.into());

    if password == DEFAULT_PASSWORD {
        tracing::warn!("Using the default seed password; change it after first login");
    }

    let hashed = hash_password(&password)
        .map_err(|e| anyhow::anyhow!("Password hashing error: {e}"))?;

    let create = CreateUser {
        email,
        password_hash: hashed,
    };
    let user = UserRepo::register(
        &pool,
        &create,
        &username,
        ROLE_PRIMARY_ADMIN,
        APPROVAL_APPROVED,
    )
    .await?;

    tracing::info!(user_id = user.id, email = %user.email, "Primary admin created");
    Ok(())
}
