//! Integration tests for the dispatch pipeline, driven by an in-memory
//! fake gateway so no network is involved.

use std::sync::Mutex;
use std::time::Duration;

use blast_common::error::AppError;
use blast_common::types::Recipient;
use blast_dispatch::pipeline::dispatch;
use blast_dispatch::render::MessageTemplate;
use blast_sms::SmsGateway;

// ============================================================
// Shared helpers
// ============================================================

/// Gateway that records every submission and fails at chosen positions.
struct FakeGateway {
    calls: Mutex<Vec<(String, String)>>,
    fail_at: Vec<usize>,
}

impl FakeGateway {
    fn new() -> Self {
        Self::failing_at(vec![])
    }

    fn failing_at(fail_at: Vec<usize>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_at,
        }
    }

    fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl SmsGateway for FakeGateway {
    async fn send_sms(&self, to: &str, body: &str) -> Result<String, AppError> {
        let mut calls = self.calls.lock().unwrap();
        let index = calls.len();
        calls.push((to.to_string(), body.to_string()));

        if self.fail_at.contains(&index) {
            Err(AppError::Gateway {
                code: Some(21211),
                message: "The 'To' number is not a valid phone number.".to_string(),
            })
        } else {
            Ok(format!("SM{index:032x}"))
        }
    }
}

fn recipient(phone: &str, username: Option<&str>, rank: Option<u32>) -> Recipient {
    Recipient {
        phone_number: phone.to_string(),
        username: username.map(String::from),
        anon_id: Some(format!("anon-{phone}")),
        all_time_rank: rank,
    }
}

fn three_recipients() -> Vec<Recipient> {
    vec![
        recipient("+15550001", Some("alice"), Some(1)),
        recipient("+15550002", None, Some(2)),
        recipient("+15550003", Some("carol"), Some(3)),
    ]
}

// ============================================================
// Pipeline invariants
// ============================================================

#[tokio::test]
async fn one_attempt_per_recipient_in_query_order() {
    let gateway = FakeGateway::new();
    let recipients = three_recipients();
    let template = MessageTemplate::Literal("Hello".to_string());

    let report = dispatch(&gateway, &recipients, &template, Duration::ZERO).await;

    let calls = gateway.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0].0, "+15550001");
    assert_eq!(calls[1].0, "+15550002");
    assert_eq!(calls[2].0, "+15550003");
    assert_eq!(report.success_count, 3);
    assert_eq!(report.fail_count, 0);
    assert_eq!(report.summary_line(), "Complete! Sent: 3, Failed: 0");
}

#[tokio::test]
async fn literal_body_is_identical_for_every_recipient() {
    let gateway = FakeGateway::new();
    let recipients = three_recipients();
    let template = MessageTemplate::Literal("Hello".to_string());

    dispatch(&gateway, &recipients, &template, Duration::ZERO).await;

    for (_, body) in gateway.calls() {
        assert_eq!(body, "Hello");
    }
}

#[tokio::test]
async fn failure_does_not_stop_later_recipients() {
    let gateway = FakeGateway::failing_at(vec![1]);
    let recipients = three_recipients();
    let template = MessageTemplate::Literal("Hello".to_string());

    let report = dispatch(&gateway, &recipients, &template, Duration::ZERO).await;

    assert_eq!(gateway.calls().len(), 3);
    assert_eq!(report.success_count, 2);
    assert_eq!(report.fail_count, 1);
}

#[tokio::test]
async fn counts_always_sum_to_recipient_count() {
    let gateway = FakeGateway::failing_at(vec![0, 2]);
    let recipients = three_recipients();
    let template = MessageTemplate::DailyRank;

    let report = dispatch(&gateway, &recipients, &template, Duration::ZERO).await;

    assert_eq!(report.total(), recipients.len() as u32);
    assert_eq!(report.success_count, 1);
    assert_eq!(report.fail_count, 2);
}

#[tokio::test]
async fn all_failures_still_attempt_everyone() {
    let gateway = FakeGateway::failing_at(vec![0, 1, 2]);
    let recipients = three_recipients();
    let template = MessageTemplate::Literal("Hello".to_string());

    let report = dispatch(&gateway, &recipients, &template, Duration::ZERO).await;

    assert_eq!(gateway.calls().len(), 3);
    assert_eq!(report.summary_line(), "Complete! Sent: 0, Failed: 3");
}

#[tokio::test]
async fn empty_recipient_set_makes_no_attempts() {
    let gateway = FakeGateway::new();
    let template = MessageTemplate::Literal("Hello".to_string());

    let report = dispatch(&gateway, &[], &template, Duration::ZERO).await;

    assert!(gateway.calls().is_empty());
    assert_eq!(report.summary_line(), "Complete! Sent: 0, Failed: 0");
}

#[tokio::test]
async fn ranked_bodies_are_rendered_per_recipient() {
    let gateway = FakeGateway::new();
    let recipients = vec![
        recipient("+15550001", Some("alice"), Some(1)),
        recipient("+15550002", None, Some(5)),
    ];

    dispatch(&gateway, &recipients, &MessageTemplate::DailyRank, Duration::ZERO).await;

    let calls = gateway.calls();
    assert_eq!(
        calls[0].1,
        "You are ranked #1, alice. Thank you for playing, \
         and play Rebus Race again today! www.rebusrace.com"
    );
    assert_eq!(
        calls[1].1,
        "You are ranked #5, Player. Thank you for playing, \
         and play Rebus Race again today! www.rebusrace.com"
    );
}

#[tokio::test]
async fn pacing_delay_applies_after_each_attempt() {
    let gateway = FakeGateway::failing_at(vec![0]);
    let recipients = vec![
        recipient("+15550001", Some("alice"), None),
        recipient("+15550002", Some("bob"), None),
    ];
    let template = MessageTemplate::Literal("Hi".to_string());
    let delay = Duration::from_millis(20);

    let started = std::time::Instant::now();
    dispatch(&gateway, &recipients, &template, delay).await;

    // Two attempts, one failing: the delay still runs twice.
    assert!(started.elapsed() >= Duration::from_millis(40));
}
