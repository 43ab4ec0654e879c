//! Alert e-mail assembly: a plain-text and an HTML rendering of the same
//! site table.

use lettre::message::{Mailbox, MultiPart};
use lettre::Message;
use sitealert_core::ParsedRecord;

use crate::error::MailError;
use crate::tabulate::Tabulator;

/// Indent applied to the text table in message bodies.
const BODY_TABLE_PADDING: usize = 4;
const BODY_VALUE_PADDING: usize = 1;

/// A fully rendered alert, independent of the transport that sends it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertEmail {
    pub subject: String,
    pub from: String,
    pub to: Vec<String>,
    pub text_body: String,
    pub html_body: String,
}

impl AlertEmail {
    /// Tabulates `records` and wraps the table in alert bodies.
    ///
    /// # Errors
    ///
    /// [`MailError::NoRecipients`] if `to` is empty, or
    /// [`MailError::Tabulate`] if `records` is empty.
    pub fn from_records(
        records: &[ParsedRecord],
        subject: &str,
        from: &str,
        to: &[String],
    ) -> Result<Self, MailError> {
        let table = Tabulator::from_records(records, BODY_TABLE_PADDING, BODY_VALUE_PADDING)?;
        Self::from_table(&table, subject, from, to)
    }

    /// Wraps an already-built table in alert bodies.
    ///
    /// # Errors
    ///
    /// [`MailError::NoRecipients`] if `to` is empty.
    pub fn from_table(
        table: &Tabulator,
        subject: &str,
        from: &str,
        to: &[String],
    ) -> Result<Self, MailError> {
        if to.is_empty() {
            return Err(MailError::NoRecipients);
        }

        Ok(Self {
            subject: subject.to_owned(),
            from: from.to_owned(),
            to: to.to_vec(),
            text_body: format!("Alert\n\n{}", table.to_text()),
            html_body: format!(
                "<html><body><p>Alert</p>{}</body></html>",
                table.to_html()
            ),
        })
    }

    /// Builds the `multipart/alternative` MIME message.
    ///
    /// # Errors
    ///
    /// [`MailError::InvalidAddress`] for an unparseable sender or recipient;
    /// [`MailError::Build`] if lettre rejects the message.
    pub fn to_message(&self) -> Result<Message, MailError> {
        let mut builder = Message::builder()
            .from(parse_mailbox(&self.from)?)
            .subject(self.subject.as_str());
        for address in &self.to {
            builder = builder.to(parse_mailbox(address)?);
        }

        let message = builder.multipart(MultiPart::alternative_plain_html(
            self.text_body.clone(),
            self.html_body.clone(),
        ))?;
        Ok(message)
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address
        .parse::<Mailbox>()
        .map_err(|source| MailError::InvalidAddress {
            address: address.to_owned(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ParsedRecord {
        ParsedRecord {
            snow_sitecode: "DEFRA01".to_owned(),
            service_desc: "Missing Data".to_owned(),
            ..ParsedRecord::default()
        }
    }

    fn recipients() -> Vec<String> {
        vec!["noc@example.com".to_owned(), "ops@example.com".to_owned()]
    }

    #[test]
    fn bodies_wrap_the_table() {
        let email =
            AlertEmail::from_records(&[record()], "Site down", "alerts@example.com", &recipients())
                .unwrap();
        assert!(email.text_body.starts_with("Alert\n\n    ===="));
        assert!(email.text_body.contains("DEFRA01"));
        assert!(email
            .html_body
            .starts_with("<html><body><p>Alert</p><table "));
        assert!(email.html_body.ends_with("</table></body></html>"));
    }

    #[test]
    fn no_recipients_is_rejected() {
        let err = AlertEmail::from_records(&[record()], "Site down", "alerts@example.com", &[])
            .unwrap_err();
        assert!(matches!(err, MailError::NoRecipients));
    }

    #[test]
    fn no_records_is_rejected() {
        let err = AlertEmail::from_records(&[], "Site down", "alerts@example.com", &recipients())
            .unwrap_err();
        assert!(matches!(err, MailError::Tabulate(_)));
    }

    #[test]
    fn message_has_headers_and_both_parts() {
        let email =
            AlertEmail::from_records(&[record()], "Site down", "alerts@example.com", &recipients())
                .unwrap();
        let raw = String::from_utf8(email.to_message().unwrap().formatted()).unwrap();
        assert!(raw.contains("Subject: Site down"));
        assert!(raw.contains("From: alerts@example.com"));
        assert!(raw.contains("noc@example.com"));
        assert!(raw.contains("ops@example.com"));
        assert!(raw.contains("multipart/alternative"));
        assert!(raw.contains("text/plain"));
        assert!(raw.contains("text/html"));
    }

    #[test]
    fn invalid_recipient_is_reported() {
        let email = AlertEmail::from_records(
            &[record()],
            "Site down",
            "alerts@example.com",
            &["not an address".to_owned()],
        )
        .unwrap();
        let err = email.to_message().unwrap_err();
        assert!(
            matches!(err, MailError::InvalidAddress { ref address, .. } if address == "not an address")
        );
    }
}
