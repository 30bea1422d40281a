//! Mass text blast: broadcast one literal message to every eligible
//! recipient.
//!
//! Usage: `send-mass-text "Your message here"`

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

    let Some(message) = std::env::args().nth(1) else {
        eprintln!("Please provide a message: send-mass-text \"Your message here\"");
        std::process::exit(1);
    };

    let config = AppConfig::from_env()?;
    let store = UserStore::new(&config);
    let gateway = TwilioGateway::new(&config);

    let recipients = store.fetch_opted_in().await?;
    println!("Sending text to {} users...", recipients.len());

    let report = dispatch(
        &gateway,
        &recipients,
        &MessageTemplate::Literal(message),
        config.send_delay(),
    )
    .await;

    println!("\n{}", report.summary_line());
    Ok(())
}
