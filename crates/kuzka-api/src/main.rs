//! Kuzkabuh admin API binary.
//!
//! Start the server with:
//! ```bash
//! ADMIN_USER=admin ADMIN_PASS=secret cargo run -p kuzka-api
//! ```

use clap::Parser;
use kuzka_api::{serve, ApiConfig, AppState};
use kuzka_core::{load_env_files, logging, Env};

/// Kuzkabuh admin API - lead intake and administration
#[derive(Parser, Debug)]
#[command(name = "kuzka-api")]
#[command(about = "Lead intake endpoint and administration API")]
struct Args {
    /// Host to bind to (overrides KUZKA_API_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides KUZKA_API_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Verbose logging (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    load_env_files();
    logging::init("kuzka_api", args.verbose);

    let mut config = ApiConfig::from_env(&Env::process())?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    let state = AppState::new(config.clone());
    tracing::info!(
        data_dir = %config.data_dir.display(),
        leads = state.store.count().unwrap_or(0),
        "Lead store ready"
    );

    serve(config, state).await?;
    Ok(())
}
