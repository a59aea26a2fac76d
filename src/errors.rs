use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayoffError {
    #[error("invalid amount: {input:?}")]
    InvalidAmount {
        input: String,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("invalid payment day: {input:?} (expected a whole number from 1 to 31)")]
    InvalidPaymentDay {
        input: String,
    },

    #[error("invalid argument: {message}")]
    InvalidArgument {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("schedule iteration limit of {limit} months exceeded")]
    IterationLimitExceeded {
        limit: u32,
    },

    #[error("arithmetic error: {message}")]
    Arithmetic {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, PayoffError>;
