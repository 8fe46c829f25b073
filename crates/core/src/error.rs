//! Error types shared by the orbit rig crates.

use thiserror::Error;

/// Main error type for the core utilities.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid configuration values
    #[error("Config error: {0}")]
    Config(String),

    /// Interval timer could not be started
    #[error("Timer error: {0}")]
    Timer(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using the core Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::Config("bad interval".into()).to_string(),
            "Config error: bad interval"
        );
        let io: Error = std::io::Error::other("spawn failed").into();
        assert!(matches!(io, Error::Io(_)));
        assert_eq!(io.to_string(), "IO error: spawn failed");
    }
}
