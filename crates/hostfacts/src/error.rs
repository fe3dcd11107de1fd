use core::fmt;
use std::io;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, Error>;

/// Failure of a single OS query or record decode.
///
/// None of these are fatal to a report: every kind degrades to a missing
/// entry or a placeholder at the point where it is detected.
#[derive(Debug)]
pub struct Error {
    path: Option<PathBuf>,
    source: ErrorSource,
    kind: ErrorKind,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind, source: ErrorSource, path: Option<PathBuf>) -> Self {
        Self { kind, source, path }
    }

    pub(crate) fn with_path(
        kind: ErrorKind,
        source: impl Into<ErrorSource>,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self::new(kind, source.into(), Some(path.into()))
    }

    pub(crate) fn without_path(kind: ErrorKind, source: impl Into<ErrorSource>) -> Self {
        Self::new(kind, source.into(), None)
    }

    /// The OS has no value for the requested key.
    pub fn absent(what: impl Into<String>) -> Self {
        Self::without_path(ErrorKind::PropertyAbsent, ErrorSource::Message(what.into()))
    }

    /// A value exists but fails a structural expectation.
    pub fn malformed(what: impl Into<String>) -> Self {
        Self::without_path(ErrorKind::MalformedRecord, ErrorSource::Message(what.into()))
    }

    /// A live object disappeared between enumeration and lookup.
    pub fn transient(what: impl Into<String>) -> Self {
        Self::without_path(
            ErrorKind::ResourceTransient,
            ErrorSource::Message(what.into()),
        )
    }

    /// Classify a failed read of `path`. A missing file means the property
    /// does not exist on this host.
    pub(crate) fn unreadable(error: io::Error, path: impl AsRef<Path>) -> Self {
        let kind = match error.kind() {
            io::ErrorKind::NotFound => ErrorKind::PropertyAbsent,
            _ => ErrorKind::Io,
        };

        Self::with_path(kind, error, path.as_ref())
    }

    pub(crate) fn unparseable(error: impl Into<ErrorSource>, path: impl AsRef<Path>) -> Self {
        Self::with_path(ErrorKind::Unparseable, error, path.as_ref())
    }

    pub(crate) fn io(error: io::Error) -> Self {
        Self::without_path(ErrorKind::Io, error)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ErrorSource {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    ParseInt(#[from] ParseIntError),
    #[cfg(target_os = "macos")]
    #[error(transparent)]
    Plist(#[from] plist::Error),
    #[error("{0}")]
    Message(String),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    PropertyAbsent,
    MalformedRecord,
    ResourceTransient,
    Io,
    Unparseable,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::PropertyAbsent => write!(f, "property absent: {}", self.source)?,
            ErrorKind::MalformedRecord => write!(f, "malformed record: {}", self.source)?,
            ErrorKind::ResourceTransient => write!(f, "resource vanished: {}", self.source)?,
            ErrorKind::Io => write!(f, "io error: {}", self.source)?,
            ErrorKind::Unparseable => write!(f, "unparseable value: {}", self.source)?,
        }

        if let Some(path) = &self.path {
            write!(f, " ({})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.source {
            ErrorSource::Io(e) => Some(e),
            ErrorSource::ParseInt(e) => Some(e),
            #[cfg(target_os = "macos")]
            ErrorSource::Plist(e) => Some(e),
            ErrorSource::Message(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_absent() {
        let error = Error::unreadable(
            io::Error::from(io::ErrorKind::NotFound),
            "/sys/class/dmi/id/board_serial",
        );
        assert_eq!(error.kind(), ErrorKind::PropertyAbsent);
        assert_eq!(
            error.path(),
            Some(Path::new("/sys/class/dmi/id/board_serial"))
        );
    }

    #[test]
    fn permission_denied_is_io() {
        let error = Error::unreadable(
            io::Error::from(io::ErrorKind::PermissionDenied),
            "/proc/1/exe",
        );
        assert_eq!(error.kind(), ErrorKind::Io);
    }
}
