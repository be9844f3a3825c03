use super::Error;

/// Error when a database cannot be opened.
#[derive(Debug)]
pub(super) struct ConnectionFailed {
    target: Box<str>,
    inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for ConnectionFailed {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for ConnectionFailed {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "failed to open database `{}`: ", self.target)?;
        core::fmt::Display::fmt(&self.inner, f)?;
        let mut source = self.inner.source();
        while let Some(err) = source {
            write!(f, ": {}", err)?;
            source = err.source();
        }
        Ok(())
    }
}

impl Error {
    /// Creates an error for a database `target` (a path or `:memory:`) that
    /// could not be opened.
    pub fn connection_failed(
        target: impl Into<String>,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Error {
        Error::from(super::ErrorKind::ConnectionFailed(ConnectionFailed {
            target: target.into().into(),
            inner: Box::new(err),
        }))
    }

    /// Returns `true` if this error is a connection failure.
    pub fn is_connection_failed(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::ConnectionFailed(_)))
    }
}
