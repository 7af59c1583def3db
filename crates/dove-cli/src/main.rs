mod cli;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use dove_client::http::recover;
use dove_client::{
    ApiClient, AuthContext, BroadcastFeed, ClientConfig, FavoritesStore, Notifier, Session,
};
use dove_db::{Database, KeyValueStore};
use dove_types::models::DevotionSnapshot;

use crate::cli::{Cli, Command};

/// Where `dove login` keeps the session token between runs.
const AUTH_TOKEN_KEY: &str = "authToken";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dove=info,dove_client=info,dove_db=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Config
    let mut config = ClientConfig::from_env()?;
    if let Some(api_url) = &cli.api_url {
        config.api_url = api_url.parse().context("invalid --api-url")?;
    }
    if let Some(db_path) = &cli.db_path {
        config.db_path = PathBuf::from(db_path);
    }

    let db = Arc::new(Database::open(&config.db_path)?);
    let api = ApiClient::new(&config)?;
    let notifier = Notifier::new();
    let auth = AuthContext::new(notifier.clone());
    restore_session(&auth, &db, config.token.as_deref());

    match run(cli.command, &api, &auth, db, notifier).await {
        Err(e) if e.requires_sign_in() => {
            eprintln!("Sign-in required. Run `dove login --email <EMAIL>` first.");
            std::process::exit(2);
        }
        Err(e) => Err(e.into()),
        Ok(()) => Ok(()),
    }
}

fn restore_session(auth: &AuthContext, db: &Database, env_token: Option<&str>) {
    let stored = match db.get(AUTH_TOKEN_KEY) {
        Ok(token) => token,
        Err(e) => {
            warn!("Could not read stored session: {}", e);
            None
        }
    };

    let Some(token) = env_token.map(str::to_string).or(stored) else {
        return;
    };

    match Session::from_token(&token) {
        Ok(session) => auth.sign_in(session),
        Err(e) => warn!("Ignoring unreadable session token: {}", e),
    }
}

async fn run(
    command: Command,
    api: &ApiClient,
    auth: &AuthContext,
    db: Arc<Database>,
    notifier: Notifier,
) -> dove_client::Result<()> {
    match command {
        Command::Login { email, password } => {
            let session = api.login(&email, &password).await?;
            db.set(AUTH_TOKEN_KEY, &session.token)?;
            println!(
                "Signed in as {}{}",
                session.name.as_deref().unwrap_or(&session.user_id),
                if session.is_admin { " (admin)" } else { "" }
            );
            auth.sign_in(session);
        }

        Command::Logout => {
            db.remove(AUTH_TOKEN_KEY)?;
            auth.logout();
            println!("Signed out");
        }

        Command::Broadcasts { stat } => {
            let feed = BroadcastFeed::new(notifier);
            feed.refresh(api).await;

            let stats = feed.stats().await;
            println!(
                "{} broadcasts | {} live recordings | {} listens | {} published | {} drafts | {} on air",
                stats.total,
                stats.live_recordings,
                stats.total_listens,
                stats.published,
                stats.draft,
                stats.live_now
            );
            println!("-- sorted by {stat} --");
            for (record, badge) in feed.view_with_badges(stat).await {
                println!(
                    "[{:<13}] {:<40} {:<20} {:>6}",
                    badge.badge_label,
                    record.title,
                    record.speaker,
                    record.engagement()
                );
            }
        }

        Command::Devotions => {
            let devotions = recover("devotions", api.list_devotions().await, Vec::new);
            let favorites = FavoritesStore::new(db, Arc::new(api.clone()), notifier);
            for devotion in devotions {
                let mark = if favorites.is_saved(&devotion.id).await? { "*" } else { " " };
                println!("{} {:<24} {:<40} {}", mark, devotion.id, devotion.title, devotion.scripture);
            }
        }

        Command::Save { id } => {
            let favorites = FavoritesStore::new(db, Arc::new(api.clone()), notifier);
            let id = id.as_str();
            let (devotion, result) = favorites
                .toggle_save_by_id(auth, id, move || async move {
                    api.get_devotion(id).await.map(|d| DevotionSnapshot::from(&d))
                })
                .await?;
            if result.saved {
                println!("Saved \"{}\"", devotion.title);
            } else {
                println!("Removed \"{}\" from saved devotions", devotion.title);
            }
        }

        Command::Favorites => {
            let favorites = FavoritesStore::new(db, Arc::new(api.clone()), notifier);
            let entries = favorites.list().await?;
            if entries.is_empty() {
                println!("No saved devotions");
            }
            for entry in entries {
                println!(
                    "{} {:<40} {} (saved {})",
                    entry.id(),
                    entry.devotion.title,
                    entry.devotion.scripture,
                    entry.saved_at.format("%Y-%m-%d")
                );
            }
        }

        Command::Events => {
            for event in recover("events", api.list_events().await, Vec::new) {
                let date = event
                    .date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "TBA".into());
                println!("{} {:<40} {}", date, event.title, event.location.unwrap_or_default());
            }
        }

        Command::Ministries => {
            for ministry in recover("ministries", api.list_ministries().await, Vec::new) {
                println!("{:<32} {}", ministry.name, ministry.leader.unwrap_or_default());
            }
        }

        Command::Contact => {
            let contact = recover("contact info", api.get_contact_info().await, Default::default);
            println!("{}", serde_json::to_string_pretty(&contact)?);
        }

        Command::Donations => {
            let donations = api.list_donations(auth).await?;
            let total: f64 = donations.iter().map(|d| d.amount).sum();
            info!("Loaded {} donations", donations.len());
            for d in &donations {
                println!(
                    "{:<24} {:>10.2} {} {}",
                    d.donor_name.as_deref().unwrap_or("Anonymous"),
                    d.amount,
                    d.currency.as_deref().unwrap_or(""),
                    d.purpose.as_deref().unwrap_or("")
                );
            }
            println!("Total: {:.2}", total);
        }

        Command::Users => {
            for user in api.list_users(auth).await? {
                println!("{:<24} {:<32} {}", user.name, user.email, user.role.unwrap_or_default());
            }
        }
    }

    Ok(())
}
