use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Transport failures talking to the feed.
    pub fn is_network(&self) -> bool {
        match self {
            Error::Network(_) => true,
            Error::Http(e) => !e.is_decode(),
            _ => false,
        }
    }

    /// Malformed JSON, either from the feed or from a persisted blob.
    pub fn is_decode(&self) -> bool {
        match self {
            Error::Decode(_) | Error::Serialization(_) => true,
            Error::Http(e) => e.is_decode(),
            _ => false,
        }
    }

    pub fn is_store(&self) -> bool {
        matches!(self, Error::Store(_) | Error::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(Error::Network("down".into()).is_network());
        assert!(Error::Decode("bad".into()).is_decode());
        assert!(Error::Store("locked".into()).is_store());

        let json_err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err = Error::from(json_err);
        assert!(err.is_decode());
        assert!(!err.is_network());
        assert!(!err.is_store());
    }

    #[test]
    fn test_display() {
        assert_eq!(Error::Store("disk full".into()).to_string(), "Store error: disk full");
        assert_eq!(Error::Config("missing api key".into()).to_string(), "Configuration error: missing api key");
    }
}
