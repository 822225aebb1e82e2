//! Daily rate announcements on cron schedules.
//!
//! Each [`RatesJob`] runs in its own tokio task. A failed run is logged and
//! the job waits for its next slot.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone};
use cron::Schedule;
use teloxide::prelude::*;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::error::{InfoError, Result};
use crate::rates::{format_rates, RatesSource};

/// Which announcement a job posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edition {
    /// Morning post with the rates in effect today.
    Today,
    /// Evening post with the rates set for tomorrow.
    Tomorrow,
}

impl Edition {
    pub fn heading(self) -> &'static str {
        match self {
            Edition::Today => "Курс валют на сегодня:",
            Edition::Tomorrow => "Курс валют на завтра:",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Edition::Today => "today",
            Edition::Tomorrow => "tomorrow",
        }
    }
}

/// Publishes announcement text somewhere.
#[async_trait]
pub trait Announcer: Send + Sync {
    async fn announce(&self, text: &str) -> Result<()>;
}

/// Posts to the configured group, or only logs when none is set.
pub struct TelegramAnnouncer {
    bot: Bot,
    group: Option<ChatId>,
}

impl TelegramAnnouncer {
    pub fn new(bot: Bot, group: Option<ChatId>) -> Self {
        Self { bot, group }
    }
}

#[async_trait]
impl Announcer for TelegramAnnouncer {
    async fn announce(&self, text: &str) -> Result<()> {
        let Some(group) = self.group else {
            info!("No group configured, announcement not posted:\n{}", text);
            return Ok(());
        };
        self.bot.send_message(group, text).await?;
        info!(group = %group, "Rates posted");
        Ok(())
    }
}

/// Parses a six-field cron expression (seconds first).
pub fn parse_schedule(expression: &str) -> Result<Schedule> {
    Schedule::from_str(expression).map_err(|e| InfoError::InvalidSchedule {
        expression: expression.to_string(),
        reason: e.to_string(),
    })
}

/// First slot strictly after `after`.
pub fn next_run<Tz: TimeZone>(schedule: &Schedule, after: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    schedule.after(after).next()
}

/// Fetches the rates and announces them under the edition heading.
pub async fn run_once(
    edition: Edition,
    source: &dyn RatesSource,
    announcer: &dyn Announcer,
) -> Result<String> {
    let rates = source.fetch().await?;
    let text = format!("{}\n{}", edition.heading(), format_rates(&rates));
    announcer.announce(&text).await?;
    Ok(text)
}

/// An announcement bound to its schedule.
#[derive(Debug, Clone)]
pub struct RatesJob {
    pub edition: Edition,
    schedule: Schedule,
}

impl RatesJob {
    pub fn new(edition: Edition, expression: &str) -> Result<Self> {
        Ok(Self {
            edition,
            schedule: parse_schedule(expression)?,
        })
    }

    /// Next slot in local time.
    pub fn next_after(&self, after: &DateTime<Local>) -> Option<DateTime<Local>> {
        next_run(&self.schedule, after)
    }

    /// Runs the job forever in a background task.
    pub fn spawn(
        self,
        source: Arc<dyn RatesSource>,
        announcer: Arc<dyn Announcer>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut last_slot: Option<DateTime<Local>> = None;
            loop {
                // Never schedule at or before the slot just served
                let now = match last_slot {
                    Some(slot) => Local::now().max(slot),
                    None => Local::now(),
                };
                let Some(slot) = self.next_after(&now) else {
                    warn!(edition = self.edition.name(), "Schedule has no upcoming runs");
                    break;
                };
                let delay = (slot - Local::now()).to_std().unwrap_or(Duration::ZERO);
                info!(edition = self.edition.name(), at = %slot, "Next rates announcement");
                tokio::time::sleep(delay).await;
                last_slot = Some(slot);

                match run_once(self.edition, &*source, &*announcer).await {
                    Ok(_) => info!(edition = self.edition.name(), "Rates announced"),
                    Err(e) => {
                        error!(edition = self.edition.name(), error = %e, "Rates announcement failed")
                    }
                }
            }
        })
    }
}
