use serde::{Deserialize, Serialize};

/// Console identity when a recipient has neither a username nor an anon id.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Template name when a recipient has no username.
pub const FALLBACK_PLAYER_NAME: &str = "Player";

/// A user row eligible for outbound SMS, as returned by the store query.
///
/// Recipients are read-only snapshots fetched once per run; they have no
/// lifecycle beyond it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipient {
    /// Verified phone number in E.164 form.
    pub phone_number: String,

    /// Chosen display name, if the user ever set one.
    #[serde(default)]
    pub username: Option<String>,

    /// Opaque identifier assigned before the user picked a name.
    #[serde(default)]
    pub anon_id: Option<String>,

    /// All-time leaderboard standing; present only for the ranked query.
    #[serde(default)]
    pub all_time_rank: Option<u32>,
}

impl Recipient {
    /// Identity for console status lines: username, else anon id, else
    /// [`UNKNOWN_NAME`]. Empty strings count as absent.
    pub fn display_name(&self) -> &str {
        non_empty(&self.username)
            .or_else(|| non_empty(&self.anon_id))
            .unwrap_or(UNKNOWN_NAME)
    }

    /// Name interpolated into the ranked message template: username, else
    /// [`FALLBACK_PLAYER_NAME`].
    pub fn player_name(&self) -> &str {
        non_empty(&self.username).unwrap_or(FALLBACK_PLAYER_NAME)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Per-run tally of send outcomes. Held in memory for the run only, never
/// persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub success_count: u32,
    pub fail_count: u32,
}

impl DeliveryReport {
    pub fn record_success(&mut self) {
        self.success_count += 1;
    }

    pub fn record_failure(&mut self) {
        self.fail_count += 1;
    }

    /// Total attempts made this run.
    pub fn total(&self) -> u32 {
        self.success_count + self.fail_count
    }

    /// Final console summary line.
    pub fn summary_line(&self) -> String {
        format!(
            "Complete! Sent: {}, Failed: {}",
            self.success_count, self.fail_count
        )
    }
}
