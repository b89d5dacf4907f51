use std::fmt;

#[derive(Debug)]
pub enum FusionError {
    ConfigError(String),
    RequestError(String),
    ServiceError(String),
    SerializationError(String),
    InputError(String),
    IoError(String),
}

impl fmt::Display for FusionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FusionError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            FusionError::RequestError(msg) => write!(f, "Request error: {}", msg),
            FusionError::ServiceError(msg) => write!(f, "Service error: {}", msg),
            FusionError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            FusionError::InputError(msg) => write!(f, "Input error: {}", msg),
            FusionError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for FusionError {}

pub type Result<T> = std::result::Result<T, FusionError>;
