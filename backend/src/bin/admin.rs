//! AgriAir administration CLI
//!
//! Operational tasks that run against the database directly:
//! creating admin accounts, backfilling missing profiles and seeding
//! sample advisories.

use anyhow::Context;
use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agri_air::services::advisory::CreateAdvisoryInput;
use agri_air::services::{auth::create_user, AdvisoryService, CropService, ProfileService};
use agri_air::Config;
use shared::{Role, Severity};

#[derive(Parser, Debug)]
#[command(name = "agri-air-admin")]
#[command(about = "AgriAir administration tasks")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account with the ADMIN role, or promote an existing one
    CreateAdmin {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Give every account without a profile the FARMER role
    FixProfiles,
    /// Insert sample advisories
    Seed,
    /// Delete legacy crops that belong to no user
    CleanupCrops {
        /// Delete every crop, owned or not
        #[arg(long)]
        all: bool,
    },
}

const SAMPLE_ADVISORIES: [(&str, &str, Severity); 3] = [
    (
        "Heavy Rainfall Alert",
        "Heavy rainfall expected in the next 24 hours. Ensure proper drainage in fields.",
        Severity::High,
    ),
    (
        "Pest Warning: Aphids",
        "Conditions are favorable for Aphid infestation in cotton crops. Inspect fields.",
        Severity::Medium,
    ),
    (
        "Sowing Season Starts",
        "Optimal time for sowing wheat begins next week.",
        Severity::Low,
    ),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agri_air=info,agri_air_admin=info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = Config::load().context("loading configuration")?;

    let db = PgPoolOptions::new()
        .max_connections(2)
        .connect(&config.database.url)
        .await
        .context("connecting to database")?;

    sqlx::migrate!("./migrations").run(&db).await?;

    match cli.command {
        Command::CreateAdmin {
            username,
            email,
            password,
        } => {
            shared::validate_username(&username).map_err(anyhow::Error::msg)?;
            shared::validate_password(&password).map_err(anyhow::Error::msg)?;

            let existing = sqlx::query_scalar::<_, uuid::Uuid>(
                "SELECT id FROM users WHERE username = $1",
            )
            .bind(&username)
            .fetch_optional(&db)
            .await?;

            let user_id = match existing {
                Some(id) => {
                    tracing::info!(%username, "Account exists; promoting to admin");
                    id
                }
                None => create_user(&db, &username, &email, &password).await?,
            };

            ProfileService::new(db.clone())
                .set_role(user_id, Role::Admin)
                .await?;
            println!("Admin '{}' ready ({})", username, user_id);
        }
        Command::FixProfiles => {
            let created = ProfileService::new(db.clone()).backfill_missing().await?;
            println!("Created {} missing profile(s)", created);
        }
        Command::Seed => {
            let service = AdvisoryService::new(db.clone());
            let mut created = 0;
            for (title, content, severity) in SAMPLE_ADVISORIES {
                let exists = sqlx::query_scalar::<_, bool>(
                    "SELECT EXISTS(SELECT 1 FROM advisories WHERE title = $1)",
                )
                .bind(title)
                .fetch_one(&db)
                .await?;
                if exists {
                    continue;
                }

                service
                    .create(CreateAdvisoryInput {
                        title: title.to_string(),
                        content: content.to_string(),
                        severity,
                    })
                    .await?;
                created += 1;
            }
            println!("Seeded {} advisories", created);
        }
        Command::CleanupCrops { all } => {
            let deleted = CropService::new(db.clone()).purge(all).await?;
            println!("Deleted {} crop(s)", deleted);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_create_admin() {
        let cli = Cli::try_parse_from([
            "agri-air-admin",
            "create-admin",
            "--username",
            "root_admin",
            "--email",
            "admin@example.com",
            "--password",
            "s3cure-pass",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::CreateAdmin { ref username, .. } if username == "root_admin"));
    }

    #[test]
    fn test_parse_rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["agri-air-admin", "drop-tables"]).is_err());
        assert!(matches!(
            Cli::try_parse_from(["agri-air-admin", "fix-profiles"]).unwrap().command,
            Command::FixProfiles
        ));
    }

    #[test]
    fn test_parse_cleanup_crops() {
        let cli = Cli::try_parse_from(["agri-air-admin", "cleanup-crops"]).unwrap();
        assert!(matches!(cli.command, Command::CleanupCrops { all: false }));

        let cli = Cli::try_parse_from(["agri-air-admin", "cleanup-crops", "--all"]).unwrap();
        assert!(matches!(cli.command, Command::CleanupCrops { all: true }));
    }
}
