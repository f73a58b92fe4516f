//! Unified error types for QuickView
//!
//! Viewers return these errors; the dispatcher turns them into an inline
//! error preview instead of aborting the session.

/// Unified error type for QuickView operations
#[derive(Debug, thiserror::Error)]
pub enum QuickviewError {
    /// I/O errors (reading the file, temp dirs, spawning tools)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The decoding backend rejected the file
    #[error("Error loading {format}: {reason}")]
    Decode { format: String, reason: String },

    /// An external program the viewer shells out to is not installed
    #[error("{tool} not found")]
    MissingTool { tool: String },

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience Result type using QuickviewError
pub type Result<T> = std::result::Result<T, QuickviewError>;

impl QuickviewError {
    /// Create a Decode error
    pub fn decode(format: impl Into<String>, reason: impl ToString) -> Self {
        Self::Decode {
            format: format.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a MissingTool error
    pub fn missing_tool(tool: impl Into<String>) -> Self {
        Self::MissingTool { tool: tool.into() }
    }

    /// Create a Config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an Internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Installation hint shown under the error, if any
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::MissingTool { tool } if tool.starts_with("ff") => Some(
                "Install ffmpeg:\n  macOS:   brew install ffmpeg\n  Ubuntu:  sudo apt install ffmpeg\n  Windows: choco install ffmpeg"
                    .to_string(),
            ),
            Self::MissingTool { tool } => Some(format!("Install {} and make sure it is on PATH", tool)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QuickviewError::decode("PDF", "invalid xref");
        assert_eq!(format!("{}", err), "Error loading PDF: invalid xref");

        let err = QuickviewError::missing_tool("ffprobe");
        assert_eq!(format!("{}", err), "ffprobe not found");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: QuickviewError = io_err.into();
        assert!(matches!(err, QuickviewError::Io(_)));
    }

    #[test]
    fn test_hint_only_for_missing_tools() {
        assert!(QuickviewError::missing_tool("ffmpeg")
            .hint()
            .unwrap()
            .contains("brew install ffmpeg"));
        assert!(QuickviewError::config("bad").hint().is_none());
    }
}
