//! Shared error type across tally crates.

use std::io;

use thiserror::Error;

/// Stable error codes, used in logs and by tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Listener could not be bound.
    BindFailed,
    /// Listener failed while accepting.
    AcceptFailed,
    /// Per-connection I/O failure.
    Io,
    /// Invalid input (config, addresses).
    BadRequest,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::BindFailed => "BIND_FAILED",
            ErrorCode::AcceptFailed => "ACCEPT_FAILED",
            ErrorCode::Io => "IO",
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, TallyError>;

/// Unified error type used by core and console.
#[derive(Debug, Error)]
pub enum TallyError {
    #[error("bind {addr} failed: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },
    #[error("accept failed: {0}")]
    Accept(#[source] io::Error),
    #[error("io: {0}")]
    Io(#[from] io::Error),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl TallyError {
    /// Map to a stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            TallyError::Bind { .. } => ErrorCode::BindFailed,
            TallyError::Accept(_) => ErrorCode::AcceptFailed,
            TallyError::Io(_) => ErrorCode::Io,
            TallyError::BadRequest(_) => ErrorCode::BadRequest,
            TallyError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            TallyError::Internal(_) => ErrorCode::Internal,
        }
    }

    /// Fatal errors terminate the console server; everything else stays local
    /// to one session.
    pub fn is_fatal(&self) -> bool {
        matches!(self, TallyError::Bind { .. } | TallyError::Accept(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_listener_errors_are_fatal() {
        let bind = TallyError::Bind {
            addr: "0.0.0.0:1".into(),
            source: io::Error::new(io::ErrorKind::AddrInUse, "in use"),
        };
        assert!(bind.is_fatal());
        assert_eq!(bind.code().as_str(), "BIND_FAILED");

        let accept = TallyError::Accept(io::Error::new(io::ErrorKind::Other, "boom"));
        assert!(accept.is_fatal());

        let io_err: TallyError = io::Error::new(io::ErrorKind::ConnectionReset, "reset").into();
        assert!(!io_err.is_fatal());
        assert_eq!(io_err.code(), ErrorCode::Io);
    }
}
