//! CLI error handling

use std::fmt;

use rpmpack_errors::UserFacingError;

/// CLI-specific error type
#[derive(Debug)]
pub enum CliError {
    /// Build or configuration error from the library crates
    Build(rpmpack_errors::Error),
    /// Failure writing the result to stdout
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Build(e) => {
                let message = e.user_message();
                write!(f, "{message}")?;
                if let Some(code) = e.user_code() {
                    write!(f, "\n  Code: {code}")?;
                }
                if let Some(hint) = e.user_hint() {
                    write!(f, "\n  Hint: {hint}")?;
                }
                Ok(())
            }
            CliError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Build(e) => Some(e),
            CliError::Io(e) => Some(e),
        }
    }
}

impl From<rpmpack_errors::Error> for CliError {
    fn from(e: rpmpack_errors::Error) -> Self {
        CliError::Build(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpmpack_errors::BuildError;

    #[test]
    fn test_display_includes_code_and_hint() {
        let err = CliError::from(rpmpack_errors::Error::from(BuildError::InvalidDirective {
            directive: "bogus".to_string(),
        }));
        let text = err.to_string();
        assert!(text.starts_with("invalid file directive: \"bogus\""));
        assert!(text.contains("Code: build.invalid_directive"));
        assert!(text.contains("Hint: "));
    }
}
