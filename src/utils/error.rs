use thiserror::Error;

#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("serial too short: need at least {min} characters, got {len}")]
    TooShort { len: usize, min: usize },

    #[error("lookup request failed: {0}")]
    LookupError(#[from] reqwest::Error),

    #[error("unrecognized verification status: {value}")]
    UnknownStatus { value: String },

    #[error("malformed expiry date: {value}")]
    InvalidExpiryDate { value: String },

    #[error("authentication failed: {source}")]
    AuthError {
        #[source]
        source: reqwest::Error,
    },

    #[error("audit log write failed: {message}")]
    LogWriteError { message: String },

    #[error("server offline: verification requires an active connection")]
    Offline,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, VerifyError>;
