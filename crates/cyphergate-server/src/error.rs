//! Error types for the cyphergate-server crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("MCP transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_failure_is_an_io_error() {
        let err: ServerError =
            std::io::Error::new(std::io::ErrorKind::AddrInUse, "port 8000 taken").into();
        assert!(matches!(err, ServerError::Io(_)));
        assert_eq!(err.to_string(), "IO error: port 8000 taken");
    }
}
