//! Defines the crate's primary error type `AppError` and a convenience `Result` alias.
//!
//! Uses the `thiserror` crate for ergonomic error definition. The wrapped `std::io::Error`s
//! are not `Clone`, so they are held in `Arc` to allow `AppError` to be cloneable.
//!
//! Errors here only ever happen before the menu loop starts. Once the loop is running,
//! terminal I/O failures end the session and are reported through `Termination` instead.

use std::sync::Arc;
use thiserror::Error;

/// The primary error enumeration for all menu-framework errors.
#[derive(Error, Debug, Clone)]
pub enum AppError {
    /// The terminal mode of stdin could not be captured at startup.
    #[error("Terminal Mode Error: {0}")]
    TerminalMode(Arc<std::io::Error>),

    /// Installing the SIGINT/SIGTERM listener failed.
    #[error("Signal Handler Error: {0}")]
    Signal(Arc<std::io::Error>),
}

impl AppError {
    /// Wraps a failed terminal mode capture.
    pub fn terminal_mode(err: std::io::Error) -> Self {
        AppError::TerminalMode(Arc::new(err))
    }

    /// Wraps a failed signal handler registration.
    pub fn signal(err: std::io::Error) -> Self {
        AppError::Signal(Arc::new(err))
    }
}

/// A specialized `Result` type using the crate's `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_errors_clone_and_display() {
        let err = AppError::terminal_mode(io::Error::new(io::ErrorKind::Other, "not a tty"));
        let cloned = err.clone();
        assert!(matches!(cloned, AppError::TerminalMode(_)));
        assert_eq!(cloned.to_string(), "Terminal Mode Error: not a tty");

        let err = AppError::signal(io::Error::new(io::ErrorKind::Other, "sigaction failed"));
        assert_eq!(err.to_string(), "Signal Handler Error: sigaction failed");
    }
}
