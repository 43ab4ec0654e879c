pub mod error;
pub mod mailer;
pub mod message;
pub mod tabulate;

pub use error::{MailError, TabulateError};
pub use mailer::{send_report, MailSender, SmtpMailer};
pub use message::AlertEmail;
pub use tabulate::Tabulator;
