//! Command handlers for the CLI.
//!
//! `query` needs no configuration. `fetch` and `alert` are called from `main`
//! once the Service Now config is loaded.

use anyhow::Context as _;
use sitealert_core::{AppConfig, ParsedRecord};
use sitealert_mail::{send_report, AlertEmail, MailSender, SmtpMailer, Tabulator};
use sitealert_snow::{
    build_query, normalize_site_code, SiteClass, SiteDataFetcher, SiteTransport, SnowClient,
};

use crate::PageArgs;

/// Indent for tables printed to stdout.
const STDOUT_TABLE_PADDING: usize = 0;
const STDOUT_VALUE_PADDING: usize = 1;

/// What `alert` should look up and who should receive it.
#[derive(Debug, Clone)]
pub(crate) struct AlertRequest {
    pub(crate) site_code: String,
    pub(crate) to: Vec<String>,
    pub(crate) subject: String,
}

/// Print the canonical code, class and table filter for `site_code`.
pub(crate) fn run_query(site_code: &str) {
    println!("site code: {site_code}");
    println!("canonical: {}", normalize_site_code(site_code));
    println!("class:     {:?}", SiteClass::of(site_code));
    println!("filter:    {}", build_query(site_code));
}

/// Build the production fetcher, letting `--paginate` switch paging on even
/// when `SNOW_PAGINATE` is off.
fn build_fetcher(
    config: &AppConfig,
    page: &PageArgs,
) -> anyhow::Result<SiteDataFetcher<SnowClient>> {
    let client =
        SnowClient::new(&config.snow).context("failed to build Service Now client")?;
    Ok(SiteDataFetcher::new(
        client,
        config.snow.paginate || page.paginate,
    ))
}

fn page_limit(config: &AppConfig, page: &PageArgs) -> u32 {
    page.limit.unwrap_or(config.snow.page_limit)
}

/// Fetch records for `site_code` and print them as a text table or JSON.
///
/// # Errors
///
/// Returns an error if the client cannot be built, the fetch fails, or the
/// records cannot be serialized.
pub(crate) async fn run_fetch(
    config: &AppConfig,
    site_code: &str,
    page: &PageArgs,
    json: bool,
) -> anyhow::Result<()> {
    let fetcher = build_fetcher(config, page)?;
    let records = fetcher
        .fetch(site_code, page.offset, page_limit(config, page))
        .await
        .with_context(|| format!("failed to fetch site records for {site_code}"))?;

    tracing::info!(site_code, records = records.len(), "fetched site records");
    println!("{}", render_records(&records, json)?);
    Ok(())
}

/// Render records for stdout. An empty set renders as `[]` in JSON mode and
/// as a short notice otherwise.
pub(crate) fn render_records(records: &[ParsedRecord], json: bool) -> anyhow::Result<String> {
    if json {
        return serde_json::to_string_pretty(records).context("failed to serialize records");
    }
    if records.is_empty() {
        return Ok("no records found".to_owned());
    }
    let table = Tabulator::from_records(records, STDOUT_TABLE_PADDING, STDOUT_VALUE_PADDING)?;
    Ok(table.to_text())
}

/// Fetch records for the alert's site and mail them, or print the text body
/// when `dry_run` is set.
///
/// # Errors
///
/// Returns an error if SMTP is not configured (unless `dry_run`), or if the
/// fetch, rendering or delivery fails.
pub(crate) async fn run_alert(
    config: &AppConfig,
    request: &AlertRequest,
    page: &PageArgs,
    dry_run: bool,
) -> anyhow::Result<()> {
    let fetcher = build_fetcher(config, page)?;
    let limit = page_limit(config, page);

    if dry_run {
        let records = fetcher
            .fetch(&request.site_code, page.offset, limit)
            .await
            .with_context(|| format!("failed to fetch site records for {}", request.site_code))?;
        if records.is_empty() {
            println!("[dry-run] no records for {}; nothing would be sent", request.site_code);
            return Ok(());
        }
        let from = config
            .smtp
            .as_ref()
            .map_or("alerts@localhost", |smtp| smtp.from.as_str());
        let email = AlertEmail::from_records(&records, &request.subject, from, &request.to)?;
        println!("[dry-run] To: {}", email.to.join(", "));
        println!("[dry-run] Subject: {}", email.subject);
        println!("{}", email.text_body);
        return Ok(());
    }

    let smtp = config
        .smtp
        .as_ref()
        .context("SMTP_HOST must be set to send alerts")?;
    let mailer = SmtpMailer::new(smtp).context("failed to build SMTP transport")?;

    let sent = deliver_alert(&fetcher, &mailer, request, &smtp.from, page.offset, limit).await?;
    if sent == 0 {
        println!("no records for {}; alert not sent", request.site_code);
    } else {
        println!(
            "alert for {} sent to {} recipient(s) with {sent} record(s)",
            request.site_code,
            request.to.len()
        );
    }
    Ok(())
}

/// Fetch the alert's records and hand them to `mailer` as one report.
///
/// Returns the number of records sent. Nothing is sent when the site has no
/// records.
///
/// # Errors
///
/// Returns an error if the fetch, rendering or delivery fails.
pub(crate) async fn deliver_alert<T, M>(
    fetcher: &SiteDataFetcher<T>,
    mailer: &M,
    request: &AlertRequest,
    from: &str,
    offset: u32,
    limit: u32,
) -> anyhow::Result<usize>
where
    T: SiteTransport,
    M: MailSender + ?Sized,
{
    let records = fetcher
        .fetch(&request.site_code, offset, limit)
        .await
        .with_context(|| format!("failed to fetch site records for {}", request.site_code))?;

    if records.is_empty() {
        tracing::warn!(site_code = %request.site_code, "no site records; skipping alert");
        return Ok(0);
    }

    send_report(mailer, &records, &request.subject, from, &request.to)
        .await
        .with_context(|| format!("failed to send alert for {}", request.site_code))?;
    tracing::info!(
        site_code = %request.site_code,
        records = records.len(),
        recipients = request.to.len(),
        "site alert sent"
    );
    Ok(records.len())
}

#[cfg(test)]
#[path = "commands_test.rs"]
mod tests;
