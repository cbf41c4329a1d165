use thiserror::Error;

/// Font resolution errors
///
/// A requested family that is simply missing is not an error: the matcher
/// falls back and reports `MatchOutcome::UsedFallback` instead.
#[derive(Error, Debug)]
pub enum FontError {
    /// The fallback family itself is not installed (host misconfiguration)
    #[error("fallback font family \"{family}\" is not installed")]
    MissingFallback { family: String },

    #[error("font enumeration failed: {message}")]
    Enumeration { message: String },
}

pub type FontResult<T> = Result<T, FontError>;
