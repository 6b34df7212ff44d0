//! Error types for identrs.

use std::io;

use thiserror::Error;

/// Result type alias for identrs operations.
pub type Result<T> = std::result::Result<T, IdentifyError>;

/// Errors that can occur while identifying a stream or driving one of the
/// companion readers and writers.
#[derive(Debug, Error)]
pub enum IdentifyError {
    /// An I/O error from a wrapped sink, source or file.
    #[error("io error: {0}")]
    Io(#[source] io::Error),

    /// The operation was attempted on a closed or unbound instance.
    #[error("{op}: already closed")]
    Closed {
        /// The operation that was attempted.
        op: &'static str,
    },

    /// The resource is already open or bound.
    #[error("already open")]
    AlreadyOpen,

    /// An argument was out of range (negative seek target, bad pool size).
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// A pool has no handle left to hand out.
    #[error("no available bounded file")]
    ResourceExhausted,

    /// The identification was requested before the identifier was closed.
    #[error("identifier is not closed")]
    NotClosed,

    /// Invalid configuration parameter.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

impl IdentifyError {
    /// Returns the crate error carried inside an [`io::Error`], if any.
    ///
    /// `Read`, `Write` and `Seek` impls in this crate surface their failures
    /// as `io::Error`; this recovers the original variant.
    pub fn from_io(err: &io::Error) -> Option<&IdentifyError> {
        err.get_ref()
            .and_then(|inner| inner.downcast_ref::<IdentifyError>())
    }

    /// Returns `true` for [`IdentifyError::Closed`].
    pub fn is_closed(&self) -> bool {
        matches!(self, IdentifyError::Closed { .. })
    }
}

impl From<io::Error> for IdentifyError {
    fn from(err: io::Error) -> Self {
        if IdentifyError::from_io(&err).is_none() {
            return IdentifyError::Io(err);
        }
        match err.into_inner().map(|inner| inner.downcast::<IdentifyError>()) {
            Some(Ok(inner)) => *inner,
            Some(Err(inner)) => IdentifyError::Io(io::Error::other(inner)),
            None => IdentifyError::Io(io::Error::other("unknown io error")),
        }
    }
}

impl From<IdentifyError> for io::Error {
    fn from(err: IdentifyError) -> Self {
        match err {
            IdentifyError::Io(e) => e,
            IdentifyError::InvalidArgument { .. } | IdentifyError::InvalidConfig { .. } => {
                io::Error::new(io::ErrorKind::InvalidInput, err)
            }
            other => io::Error::other(other),
        }
    }
}
