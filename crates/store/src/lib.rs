//! Recipient queries against the Supabase PostgREST interface.
//!
//! A single read of the `users` collection per run. The whole matching set
//! is materialized in one call — no pagination, no streaming. A query
//! failure is fatal to the run and propagates out of `main`.

use blast_common::config::AppConfig;
use blast_common::error::AppError;
use blast_common::types::Recipient;

/// Columns selected by both variants.
const BASE_COLUMNS: &str = "phone_number,username,anon_id";

/// Select list and filter pairs for a read of the `users` collection.
#[derive(Debug, Clone)]
pub struct RecipientQuery {
    select: String,
    params: Vec<(&'static str, String)>,
}

impl RecipientQuery {
    /// Every eligible recipient: opted in to texts, phone verified, phone
    /// number on file.
    pub fn opted_in() -> Self {
        Self {
            select: BASE_COLUMNS.to_string(),
            params: vec![
                ("opt_in_texts", "eq.true".to_string()),
                ("phone_verified", "eq.true".to_string()),
                ("phone_number", "not.is.null".to_string()),
            ],
        }
    }

    /// Eligible recipients that hold an all-time rank, best rank first.
    pub fn ranked() -> Self {
        let mut query = Self::opted_in();
        query.select = format!("{BASE_COLUMNS},all_time_rank");
        query.params.push(("all_time_rank", "not.is.null".to_string()));
        query.params.push(("order", "all_time_rank.asc".to_string()));
        query
    }

    /// Full set of query-string pairs, `select` first.
    pub fn query_pairs(&self) -> Vec<(&str, &str)> {
        let mut pairs = vec![("select", self.select.as_str())];
        pairs.extend(self.params.iter().map(|(k, v)| (*k, v.as_str())));
        pairs
    }
}

/// Read-only client for the backend `users` collection.
pub struct UserStore {
    http: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl UserStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            service_key: config.supabase_service_role_key.clone(),
        }
    }

    /// Recipients for the mass-text blast.
    pub async fn fetch_opted_in(&self) -> Result<Vec<Recipient>, AppError> {
        self.fetch(&RecipientQuery::opted_in()).await
    }

    /// Recipients for the daily-rank blast, ordered ascending by rank.
    pub async fn fetch_ranked(&self) -> Result<Vec<Recipient>, AppError> {
        self.fetch(&RecipientQuery::ranked()).await
    }

    async fn fetch(&self, query: &RecipientQuery) -> Result<Vec<Recipient>, AppError> {
        let url = format!("{}/rest/v1/users", self.base_url);

        let response = self
            .http
            .get(&url)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .query(&query.query_pairs())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::Store {
                status: status.as_u16(),
                detail,
            });
        }

        let body = response.text().await?;
        let recipients: Vec<Recipient> = serde_json::from_str(&body)
            .map_err(|e| AppError::Decode(format!("users response: {e}")))?;

        tracing::debug!(count = recipients.len(), "Fetched recipients from store");
        Ok(recipients)
    }
}
