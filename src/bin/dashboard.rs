//! userboard dashboard: loads and prints the server's health and users.
//!
//! With `--add`, performs the "add user" action before printing.

use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use userboard::client::{ApiClient, Dashboard, generated_user};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "userboard-dashboard", version, about)]
struct Args {
    /// Base URL of the userboard server.
    #[arg(long, env = "USERBOARD_URL", default_value = "http://localhost:5000")]
    base_url: String,

    /// Add one generated user, then refresh the list.
    #[arg(long)]
    add: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let dashboard = Dashboard::new(ApiClient::new(args.base_url));

    dashboard.load().await;
    if args.add {
        dashboard.add_user(generated_user(Utc::now())).await;
    }

    print!("{}", dashboard.render().await);
}
