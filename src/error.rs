use thiserror::Error;

/// Convenient result alias over [`enum@Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// All failure modes reported by this crate.
///
/// Business-level negatives are non-fatal: the index is left untouched by
/// any operation returning an error.
#[derive(Debug, Error)]
pub enum Error {
    /// A record with this phone number already exists in the index.
    #[error("duplicate phone number: {0}")]
    DuplicateKey(String),

    /// No record with this phone number exists in the index.
    #[error("no customer with phone number: {0}")]
    NotFound(String),

    /// A record field failed validation (empty key, negative usage value).
    #[error("invalid customer record field: {0}")]
    InvalidRecord(&'static str),

    /// A payment larger than the outstanding balance was rejected.
    #[error("payment of {amount} exceeds outstanding balance of {balance}")]
    PaymentExceedsBill {
        /// The rejected payment amount.
        amount: f64,
        /// The outstanding balance at the time of the payment.
        balance: f64,
    },

    /// Reading or writing a snapshot failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
