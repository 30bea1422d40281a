//! Daily-rank blast: send each ranked recipient a message with their
//! all-time standing, best rank first.
//!
//! Usage: `send-daily-rank` (no arguments; schedule it daily)

use tracing_subscriber::EnvFilter;

use blast_common::config::AppConfig;
use blast_dispatch::pipeline::dispatch;
use blast_dispatch::render::MessageTemplate;
use blast_sms::TwilioGateway;
use blast_store::UserStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("blast_dispatch=info,blast_store=debug,blast_sms=debug")
        }))
        .init();

    let config = AppConfig::from_env()?;
    let store = UserStore::new(&config);
    let gateway = TwilioGateway::new(&config);

    let recipients = store.fetch_ranked().await?;
    if recipients.is_empty() {
        println!("No users found to send messages to.");
        return Ok(());
    }

    println!("Sending daily rank messages to {} users...", recipients.len());

    let report = dispatch(
        &gateway,
        &recipients,
        &MessageTemplate::DailyRank,
        config.send_delay(),
    )
    .await;

    println!("\n{}", report.summary_line());
    Ok(())
}
