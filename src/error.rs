//! Crate error type. Each variant names the stage that failed.

use std::fmt::{self, Display};

#[derive(Debug)]
pub enum Error {
    /// A buffer was requested with a zero width or height
    InvalidDimensions { width: u32, height: u32 },
    /// Bad command line value or config file contents
    Config(String),
    /// Reading or writing a file
    Io(std::io::Error),
    /// Window creation or presentation failed
    Display(String),
    /// The render thread could not start or panicked
    RenderThread(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidDimensions { width, height } => {
                write!(f, "Invalid buffer dimensions {width}x{height}: both must be non-zero")
            },
            Error::Config(s) => write!(f, "Config error: {s}"),
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::Display(s) => write!(f, "Display error: {s}"),
            Error::RenderThread(s) => write!(f, "Render thread error: {s}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e.to_string())
    }
}
