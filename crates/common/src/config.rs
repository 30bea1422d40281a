use std::time::Duration;

use serde::Deserialize;

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Twilio account SID
    pub twilio_account_sid: String,

    /// Twilio auth token
    pub twilio_auth_token: String,

    /// Sender phone number in E.164 form
    pub twilio_phone_number: String,

    /// Supabase project base URL
    pub supabase_url: String,

    /// Service-role key for the Supabase REST interface
    pub supabase_service_role_key: String,

    /// Delay between consecutive sends in milliseconds (default: 1000)
    pub send_delay_ms: u64,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            twilio_account_sid: std::env::var("TWILIO_ACCOUNT_SID").map_err(|_| {
                anyhow::anyhow!("TWILIO_ACCOUNT_SID environment variable is required")
            })?,
            twilio_auth_token: std::env::var("TWILIO_AUTH_TOKEN").map_err(|_| {
                anyhow::anyhow!("TWILIO_AUTH_TOKEN environment variable is required")
            })?,
            twilio_phone_number: std::env::var("TWILIO_PHONE_NUMBER").map_err(|_| {
                anyhow::anyhow!("TWILIO_PHONE_NUMBER environment variable is required")
            })?,
            supabase_url: std::env::var("SUPABASE_URL")
                .map_err(|_| anyhow::anyhow!("SUPABASE_URL environment variable is required"))?,
            supabase_service_role_key: std::env::var("SUPABASE_SERVICE_ROLE_KEY").map_err(
                |_| anyhow::anyhow!("SUPABASE_SERVICE_ROLE_KEY environment variable is required"),
            )?,
            send_delay_ms: std::env::var("SEND_DELAY_MS")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("SEND_DELAY_MS must be a valid u64"))?,
        })
    }

    /// Inter-message pacing delay as a [`Duration`].
    pub fn send_delay(&self) -> Duration {
        Duration::from_millis(self.send_delay_ms)
    }
}
