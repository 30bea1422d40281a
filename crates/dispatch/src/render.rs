//! Message body rendering for the two blast variants.

use blast_common::types::Recipient;

/// Product name interpolated into the ranked template.
pub const PRODUCT_NAME: &str = "Rebus Race";

/// Product URL closing the ranked template.
pub const PRODUCT_URL: &str = "www.rebusrace.com";

/// Rendering strategy for a blast run.
#[derive(Debug, Clone)]
pub enum MessageTemplate {
    /// Operator-supplied text sent verbatim to every recipient.
    Literal(String),
    /// Per-recipient standing message for the daily-rank blast.
    DailyRank,
}

impl MessageTemplate {
    /// Render the message body for one recipient.
    pub fn render(&self, recipient: &Recipient) -> String {
        match self {
            MessageTemplate::Literal(text) => text.clone(),
            MessageTemplate::DailyRank => {
                let name = recipient.player_name();
                // The ranked query filters null ranks server-side.
                let rank = recipient.all_time_rank.unwrap_or(0);
                format!(
                    "You are ranked #{rank}, {name}. Thank you for playing, \
                     and play {PRODUCT_NAME} again today! {PRODUCT_URL}"
                )
            }
        }
    }
}
