use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;
use sitealert_core::RawRecord;
use sitealert_mail::MailError;
use sitealert_snow::{SnowError, SnowPage, SnowQuery};

use super::*;

struct FixedTransport {
    rows: Vec<RawRecord>,
    requests: Mutex<Vec<SnowQuery>>,
}

impl FixedTransport {
    fn new(rows: Vec<RawRecord>) -> Self {
        Self {
            rows,
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SiteTransport for FixedTransport {
    async fn get_page(&self, query: &SnowQuery) -> Result<SnowPage, SnowError> {
        self.requests.lock().unwrap().push(query.clone());
        Ok(SnowPage {
            rows: self.rows.clone(),
            total_count: None,
        })
    }
}

#[derive(Default)]
struct RecordingSender {
    sent: Mutex<Vec<AlertEmail>>,
}

#[async_trait]
impl MailSender for RecordingSender {
    async fn send(&self, email: &AlertEmail) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

fn row(site_code: &str) -> RawRecord {
    match json!({
        "hns_u_site_code": site_code,
        "hns_u_conn_type": "DSL",
        "hns_u_circuit_id": "CIRC-1",
    }) {
        serde_json::Value::Object(map) => map,
        _ => unreachable!(),
    }
}

fn request() -> AlertRequest {
    AlertRequest {
        site_code: "FR1234_DSL".to_owned(),
        to: vec!["noc@example.com".to_owned()],
        subject: "FR1234 down".to_owned(),
    }
}

#[tokio::test]
async fn deliver_alert_sends_one_report() {
    let fetcher = SiteDataFetcher::new(FixedTransport::new(vec![row("FR1234")]), false);
    let sender = RecordingSender::default();

    let sent = deliver_alert(&fetcher, &sender, &request(), "alerts@example.com", 0, 50)
        .await
        .unwrap();

    assert_eq!(sent, 1);
    let emails = sender.sent.lock().unwrap();
    assert_eq!(emails.len(), 1);
    assert_eq!(emails[0].subject, "FR1234 down");
    assert_eq!(emails[0].from, "alerts@example.com");
    assert!(emails[0].text_body.contains("FR1234"));
}

#[tokio::test]
async fn deliver_alert_uses_the_requested_window() {
    let fetcher = SiteDataFetcher::new(FixedTransport::new(vec![row("FR1234")]), false);
    let sender = RecordingSender::default();

    deliver_alert(&fetcher, &sender, &request(), "alerts@example.com", 40, 20)
        .await
        .unwrap();

    let requests = fetcher_requests(&fetcher);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].offset, 40);
    assert_eq!(requests[0].limit, 20);
    assert_eq!(requests[0].filter, build_query("FR1234_DSL"));
}

#[tokio::test]
async fn deliver_alert_skips_sites_without_records() {
    let fetcher = SiteDataFetcher::new(FixedTransport::new(Vec::new()), false);
    let sender = RecordingSender::default();

    let sent = deliver_alert(&fetcher, &sender, &request(), "alerts@example.com", 0, 50)
        .await
        .unwrap();

    assert_eq!(sent, 0);
    assert!(sender.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn deliver_alert_propagates_zero_limit() {
    let fetcher = SiteDataFetcher::new(FixedTransport::new(vec![row("FR1234")]), false);
    let sender = RecordingSender::default();

    let err = deliver_alert(&fetcher, &sender, &request(), "alerts@example.com", 0, 0)
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<SnowError>(),
        Some(SnowError::ZeroPageLimit)
    ));
    assert!(sender.sent.lock().unwrap().is_empty());
}

#[test]
fn render_records_json_is_an_array() {
    let record = ParsedRecord {
        snow_sitecode: "FR1234".to_owned(),
        ..ParsedRecord::default()
    };
    let rendered = render_records(&[record], true).unwrap();
    let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(value[0]["snow_sitecode"], "FR1234");
}

#[test]
fn render_records_empty() {
    assert_eq!(render_records(&[], true).unwrap(), "[]");
    assert_eq!(render_records(&[], false).unwrap(), "no records found");
}

#[test]
fn render_records_text_is_a_table() {
    let record = ParsedRecord {
        snow_sitecode: "FR1234".to_owned(),
        ..ParsedRecord::default()
    };
    let rendered = render_records(&[record], false).unwrap();
    assert!(rendered.starts_with('='));
    assert!(rendered.contains("snow_sitecode"));
    assert!(rendered.contains("FR1234"));
}

fn fetcher_requests(fetcher: &SiteDataFetcher<FixedTransport>) -> Vec<SnowQuery> {
    fetcher.transport().requests.lock().unwrap().clone()
}
