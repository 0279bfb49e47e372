use std::fmt;

/// A failure reported by a fallible handler function.
///
/// When returned from a function wrapped in [`ErrorHandler`](crate::ErrorHandler),
/// the message becomes the body of a `500 Internal Server Error` response.
///
/// # Examples
///
/// ```
/// use handler_filters::HandlerError;
///
/// let err = HandlerError::new("disk full");
/// assert_eq!(err.message(), "disk full");
/// assert_eq!(err.to_string(), "disk full");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerError {
    message: String,
}

impl HandlerError {
    /// Creates a new handler error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for HandlerError {}

impl From<&str> for HandlerError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for HandlerError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_error_displays_bare_message() {
        let err = HandlerError::new("disk full");
        assert_eq!(format!("{}", err), "disk full");
    }

    #[test]
    fn handler_error_from_strings() {
        assert_eq!(HandlerError::from("a"), HandlerError::new("a"));
        assert_eq!(HandlerError::from(String::from("b")).message(), "b");
    }
}
