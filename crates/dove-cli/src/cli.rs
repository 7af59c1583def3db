use clap::{Parser, Subcommand};

use dove_core::ActiveStat;

#[derive(Parser, Debug)]
#[command(name = "dove", version, about = "Dove Ministries Africa client")]
pub struct Cli {
    /// REST API base URL (overrides DOVE_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Local database path (overrides DOVE_DB_PATH)
    #[arg(long, global = true)]
    pub db_path: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "DOVE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Podcasts and live broadcasts, filtered and sorted by one stat
    Broadcasts {
        /// One of: date, live_recordings, listens, published, draft
        #[arg(long, default_value = "date")]
        stat: ActiveStat,
    },

    /// Devotions, with saved ones marked `*`
    Devotions,

    /// Save a devotion, or unsave it if already saved
    Save { id: String },

    /// Saved devotions, newest first
    Favorites,

    Events,

    Ministries,

    Contact,

    /// Donations received (admin)
    Donations,

    /// Registered users (admin)
    Users,
}
