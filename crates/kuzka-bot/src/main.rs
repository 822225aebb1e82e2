//! Kuzkabuh order bot binary.
//!
//! Start the bot with:
//! ```bash
//! KUZKABUH_BOT_TOKEN=xxx ADMIN_TELEGRAM_ID=123 \
//!   LEAD_API_URL=http://127.0.0.1:59000/api/add_order cargo run -p kuzka-bot
//! ```

use clap::Parser;
use kuzka_bot::{BotConfig, LeadBot, WebhookConfig};
use kuzka_core::{load_env_files, logging, Env};

/// Kuzkabuh order bot - collects accounting-service requests in Telegram
#[derive(Parser, Debug)]
#[command(name = "kuzka-bot")]
#[command(about = "Telegram bot collecting accounting-service leads")]
struct Args {
    /// Use webhook mode (requires WEBHOOK_HOST; default: polling mode)
    #[arg(short, long)]
    webhook: bool,

    /// Local webhook port (overrides KUZKABUH_WEBHOOK_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Verbose logging (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let loaded = load_env_files();
    logging::init("kuzka_bot", args.verbose);
    for path in &loaded {
        tracing::debug!(path = %path.display(), "Loaded environment file");
    }

    let config = BotConfig::from_env(&Env::process())?;
    let bot = LeadBot::new(&config)?;

    match bot.get_me().await {
        Ok(username) => {
            tracing::info!(
                username = %username,
                collect_name = config.collect_name,
                "Bot initialized successfully"
            );
            println!("\nKuzkabuh order bot");
            println!("   Bot: @{}", username);
            println!("   Leads: {}", config.lead_api_url);
            println!("   Mode: {}", if args.webhook { "webhook" } else { "polling" });
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to get bot info");
            return Err(e.into());
        }
    }

    if args.webhook {
        let mut webhook: WebhookConfig = config
            .webhook
            .clone()
            .ok_or("Webhook mode requires WEBHOOK_HOST")?;
        if let Some(port) = args.port {
            webhook.port = port;
        }
        bot.start_webhook(&webhook).await?;
    } else {
        bot.start_polling().await?;
    }

    Ok(())
}
