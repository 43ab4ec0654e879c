use thiserror::Error;

/// Structural problems with tabulator input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TabulateError {
    #[error("table data must contain at least one record")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error(transparent)]
    Tabulate(#[from] TabulateError),

    #[error("alert e-mail needs at least one recipient")]
    NoRecipients,

    #[error("invalid e-mail address \"{address}\": {source}")]
    InvalidAddress {
        address: String,
        #[source]
        source: lettre::address::AddressError,
    },

    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}
