use thiserror::Error;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// No signed-in user; the caller should be asked to sign in.
    #[error("unauthorized")]
    Unauthorized,
    /// Requested resource was not found, or is hidden from the user.
    #[error("not found")]
    NotFound,
    /// Submitted data was rejected; the message is shown to the user.
    #[error("{0}")]
    Form(String),
    /// A value violated a domain type constraint.
    #[error("{0}")]
    TypeConstraint(String),
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
