use std::{borrow::Cow, error::Error};

use thiserror::Error;


/// A failure of an API operation, carrying a human-readable message and,
/// optionally, the error that caused it.
///
/// Callers are expected to handle it explicitly; there is no retry policy attached.
#[derive(Debug, Error)]
#[error("{}", .message)]
pub struct ApiError {
    message: Cow<'static, str>,

    #[source]
    cause: Option<Box<dyn Error + Send + Sync + 'static>>,
}

impl ApiError {
    pub fn new<M>(message: M) -> Self
    where
        M: Into<Cow<'static, str>>,
    {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    pub fn with_cause<M, E>(message: M, cause: E) -> Self
    where
        M: Into<Cow<'static, str>>,
        E: Into<Box<dyn Error + Send + Sync + 'static>>,
    {
        Self {
            message: message.into(),
            cause: Some(cause.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }
}



#[cfg(test)]
mod test {
    use std::io;

    use super::*;

    #[test]
    fn carries_message_only() {
        let error = ApiError::new("no zone is currently active");

        assert_eq!(error.message(), "no zone is currently active");
        assert_eq!(error.to_string(), "no zone is currently active");
        assert!(error.cause().is_none());
        assert!(error.source().is_none());
    }

    #[test]
    fn carries_message_and_cause() {
        let error = ApiError::with_cause(
            format!("failed to send update to {} sessions", 3),
            io::Error::new(io::ErrorKind::BrokenPipe, "connection closed"),
        );

        assert_eq!(error.message(), "failed to send update to 3 sessions");

        let source = error.source().unwrap();
        assert_eq!(source.to_string(), "connection closed");
        assert!(error.cause().is_some());
    }
}
