//! Kuzkabuh currency bot binary.
//!
//! Start the bot with:
//! ```bash
//! KUZKAINFO_BOT_TOKEN=xxx ADMIN_GROUP_ID=-100123 cargo run -p kuzka-info
//! ```

use clap::Parser;
use kuzka_core::{load_env_files, logging, Env};
use kuzka_info::{InfoBot, InfoConfig};

/// Kuzkabuh currency bot - daily CBR rates for the company group
#[derive(Parser, Debug)]
#[command(name = "kuzka-info")]
#[command(about = "Telegram bot posting daily CBR exchange rates")]
struct Args {
    /// Use webhook mode (requires WEBHOOK_HOST; default: polling mode)
    #[arg(short, long)]
    webhook: bool,

    /// Local webhook port (overrides KUZKAINFO_WEBHOOK_PORT)
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
    logging::init("kuzka_info", args.verbose);

    let config = InfoConfig::from_env(&Env::process())?;
    let bot = InfoBot::new(&config)?;

    match bot.get_me().await {
        Ok(username) => {
            tracing::info!(username = %username, "Bot initialized successfully");
            println!("\nKuzkabuh currency bot");
            println!("   Bot: @{}", username);
            match config.group_id {
                Some(group) => println!("   Group: {}", group),
                None => println!("   Group: not set (rates are only logged)"),
            }
            println!("   Schedules: {} / {}", config.today_cron, config.tomorrow_cron);
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to get bot info");
            return Err(e.into());
        }
    }

    if args.webhook {
        let mut webhook = config
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
