//! Delivery of alert e-mails.

use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use sitealert_core::{ParsedRecord, SmtpConfig};

use crate::error::MailError;
use crate::message::AlertEmail;

/// Sends a rendered alert.
///
/// [`SmtpMailer`] is the production implementation.
#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, email: &AlertEmail) -> Result<(), MailError>;
}

/// SMTP over implicit TLS with username/password login.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// # Errors
    ///
    /// Returns [`MailError::Smtp`] if the TLS parameters for `config.host`
    /// cannot be built.
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();
        Ok(Self { transport })
    }
}

#[async_trait]
impl MailSender for SmtpMailer {
    async fn send(&self, email: &AlertEmail) -> Result<(), MailError> {
        let message = email.to_message()?;
        let response = self.transport.send(message).await?;
        tracing::info!(
            subject = %email.subject,
            recipients = email.to.len(),
            code = %response.code(),
            "alert e-mail delivered"
        );
        Ok(())
    }
}

/// Tabulates `records` and sends them as one alert.
///
/// # Errors
///
/// Propagates rendering errors from [`AlertEmail::from_records`] and
/// delivery errors from `mailer`.
pub async fn send_report<M>(
    mailer: &M,
    records: &[ParsedRecord],
    subject: &str,
    from: &str,
    to: &[String],
) -> Result<(), MailError>
where
    M: MailSender + ?Sized,
{
    let email = AlertEmail::from_records(records, subject, from, to)?;
    tracing::debug!(subject, records = records.len(), "sending site report");
    mailer.send(&email).await
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

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

    fn records() -> Vec<ParsedRecord> {
        vec![
            ParsedRecord {
                snow_sitecode: "DEFRA01".to_owned(),
                ..ParsedRecord::default()
            },
            ParsedRecord {
                snow_sitecode: "DEMUC02".to_owned(),
                ..ParsedRecord::default()
            },
        ]
    }

    #[tokio::test]
    async fn send_report_delivers_one_email_with_every_record() {
        let sender = RecordingSender::default();
        let to = vec!["noc@example.com".to_owned()];

        send_report(&sender, &records(), "Sites down", "alerts@example.com", &to)
            .await
            .unwrap();

        let sent = sender.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "Sites down");
        assert_eq!(sent[0].to, to);
        assert!(sent[0].text_body.contains("DEFRA01"));
        assert!(sent[0].html_body.contains("<td>DEMUC02</td>"));
    }

    #[tokio::test]
    async fn send_report_with_no_records_sends_nothing() {
        let sender = RecordingSender::default();
        let to = vec!["noc@example.com".to_owned()];

        let err = send_report(&sender, &[], "Sites down", "alerts@example.com", &to)
            .await
            .unwrap_err();

        assert!(matches!(err, MailError::Tabulate(_)));
        assert!(sender.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn send_report_accepts_trait_objects() {
        let sender = RecordingSender::default();
        let dyn_sender: &dyn MailSender = &sender;
        let to = vec!["noc@example.com".to_owned()];

        send_report(dyn_sender, &records(), "Sites down", "alerts@example.com", &to)
            .await
            .unwrap();

        assert_eq!(sender.sent.lock().unwrap().len(), 1);
    }
}
