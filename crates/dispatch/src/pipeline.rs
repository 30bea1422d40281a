//! Sequential dispatch loop: render → submit → tally, one recipient at a
//! time, with a fixed pacing delay after every attempt.
//!
//! A gateway failure for one recipient is isolated — it is counted, printed,
//! and the loop moves on. There is no retry, no persisted cursor, and no
//! deduplication across interrupted runs.

use std::fmt::Display;
use std::time::Duration;

use blast_common::types::{DeliveryReport, Recipient};
use blast_sms::SmsGateway;

use crate::render::MessageTemplate;

/// Submit one message per recipient, in the order the query returned them.
pub async fn dispatch<G: SmsGateway>(
    gateway: &G,
    recipients: &[Recipient],
    template: &MessageTemplate,
    delay: Duration,
) -> DeliveryReport {
    let mut report = DeliveryReport::default();

    for recipient in recipients {
        let body = template.render(recipient);

        match gateway.send_sms(&recipient.phone_number, &body).await {
            Ok(sid) => {
                report.record_success();
                println!("{}", sent_line(recipient, template));
                tracing::debug!(sid = %sid, to = %recipient.phone_number, "Send accepted");
            }
            Err(e) => {
                report.record_failure();
                println!("{}", failed_line(recipient, &e));
            }
        }

        // Pace every attempt, success or failure, to respect the provider's
        // rate limit.
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    report
}

/// Confirmation line for an accepted submission.
pub fn sent_line(recipient: &Recipient, template: &MessageTemplate) -> String {
    match template {
        MessageTemplate::Literal(_) => format!(
            "✓ Sent to {} ({})",
            recipient.display_name(),
            recipient.phone_number
        ),
        MessageTemplate::DailyRank => format!(
            "✓ Sent to {} (Rank #{}) - {}",
            recipient.player_name(),
            recipient.all_time_rank.unwrap_or(0),
            recipient.phone_number
        ),
    }
}

/// Failure line; the error is reported and the run continues.
pub fn failed_line(recipient: &Recipient, error: &impl Display) -> String {
    format!("✗ Failed to send to {}: {error}", recipient.display_name())
}
