//! Error message formatting with actionable suggestions.

use std::error::Error;

use py3deps_core::error::Py3DepsError;

use super::colors::ColorSupport;

/// Error formatter with suggestions
pub struct ErrorFormatter {
    colors: ColorSupport,
}

impl ErrorFormatter {
    /// Create a new error formatter
    pub fn new() -> Self {
        Self {
            colors: ColorSupport::detect(),
        }
    }

    /// Format an error with its suggestion and source chain
    pub fn format_error(&self, error: &Py3DepsError) -> String {
        let mut output = String::new();

        output.push_str(&self.colors.red("error"));
        output.push_str(": ");
        output.push_str(&error.to_string());
        output.push('\n');

        if let Some(suggestion) = error.suggestion() {
            output.push_str(&self.colors.dim("help"));
            output.push_str(": ");
            output.push_str(suggestion);
            output.push('\n');
        }

        let mut source = error.source();
        while let Some(err) = source {
            output.push_str(&self.colors.dim("caused by"));
            output.push_str(": ");
            output.push_str(&err.to_string());
            output.push('\n');
            source = err.source();
        }

        output
    }

    /// Format a simple error message
    pub fn format_simple(&self, message: &str) -> String {
        format!("{}: {}", self.colors.red("error"), message)
    }
}

impl Default for ErrorFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use py3deps_core::types::VersionError;

    fn formatter() -> ErrorFormatter {
        ErrorFormatter {
            colors: ColorSupport::disabled(),
        }
    }

    #[test]
    fn test_format_error_includes_source_chain() {
        let error = Py3DepsError::version(
            "3",
            VersionError::InvalidFormat {
                input: "3".to_string(),
            },
        );
        let formatted = formatter().format_error(&error);

        assert!(formatted.starts_with("error: Invalid version '3'\n"));
        assert_eq!(formatted.matches("Invalid version format: 3").count(), 1);
        assert!(formatted.contains("caused by: Invalid version format: 3\n"));
    }

    #[test]
    fn test_format_simple() {
        assert_eq!(formatter().format_simple("boom"), "error: boom");
    }
}
