use std::fmt;

/// Unified error type for fatal protocol-description compilation failures.
///
/// Per the error taxonomy, only document-level failures are fatal: an
/// unreadable file or a document that is not well-formed XML. Everything
/// else (misused attributes, unresolved cross-references, and the like) is
/// a non-fatal [`Diagnostic`](crate::Diagnostic) collected in a
/// [`Diagnostics`](crate::Diagnostics) sink instead of surfacing here.
///
/// # Example
///
/// ```
/// use protogen_core::ProtogenError;
/// use std::io;
///
/// let io_err = ProtogenError::Io(io::Error::new(io::ErrorKind::NotFound, "missing"));
/// assert!(matches!(io_err, ProtogenError::Io(_)));
///
/// let xml_err = ProtogenError::Xml("unexpected end of document".into());
/// assert!(matches!(xml_err, ProtogenError::Xml(_)));
/// ```
#[derive(Debug)]
pub enum ProtogenError {
    Io(std::io::Error),
    Xml(String),
}

impl From<std::io::Error> for ProtogenError {
    fn from(err: std::io::Error) -> Self {
        ProtogenError::Io(err)
    }
}

impl fmt::Display for ProtogenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtogenError::Io(e) => write!(f, "IO error: {}", e),
            ProtogenError::Xml(msg) => write!(f, "XML error: {}", msg),
        }
    }
}

impl std::error::Error for ProtogenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProtogenError::Io(e) => Some(e),
            ProtogenError::Xml(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_io_error() {
        let err = ProtogenError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(err.to_string().starts_with("IO error:"));
    }

    #[test]
    fn displays_xml_error() {
        let err = ProtogenError::Xml("bad root element".into());
        assert_eq!(err.to_string(), "XML error: bad root element");
    }

    #[test]
    fn converts_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ProtogenError = io_err.into();
        assert!(matches!(err, ProtogenError::Io(_)));
    }
}
