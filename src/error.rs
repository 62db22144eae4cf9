// Error types for reservation mapping
use thiserror::Error;

// Request-time failures. Every variant is client-correctable: the caller can fix the
// payload or the type labels and resend.
#[derive(Error, Debug)]
pub enum MappingError {
    #[error("No mapping strategy found for {source_type} -> {target_type}")]
    NoStrategy {
        source_type: String,
        target_type: String,
    },

    #[error("The provided data does not match the expected internal reservation format.")]
    ShapeMismatch,

    #[error("Invalid source type for {partner} mapping. Expected: {expected}, Found: {found}")]
    InvalidSourceType {
        partner: &'static str,
        expected: &'static str,
        found: String,
    },

    #[error("Invalid target type for {partner} mapping. Expected: {expected}, Found: {found}")]
    InvalidTargetType {
        partner: &'static str,
        expected: &'static str,
        found: String,
    },

    #[error("The field '{0}' is missing or empty.")]
    MissingRequiredField(String),

    #[error("Invalid or missing date for '{0}'.")]
    InvalidDate(String),

    #[error("Invalid or missing decimal value for '{0}'.")]
    InvalidDecimal(String),

    #[error("Invalid value for '{field}': {message}")]
    InvalidField { field: String, message: String },

    #[error("Invalid JSON format: {0}")]
    MalformedInput(String),

    #[error("Conversion error: {0}")]
    Conversion(String),
}

impl MappingError {
    pub fn field(&self) -> Option<&str> {
        match self {
            MappingError::MissingRequiredField(field)
            | MappingError::InvalidDate(field)
            | MappingError::InvalidDecimal(field)
            | MappingError::InvalidField { field, .. } => Some(field),
            _ => None,
        }
    }

    pub(crate) fn invalid_field(field: impl Into<String>, message: impl ToString) -> Self {
        MappingError::InvalidField {
            field: field.into(),
            message: message.to_string(),
        }
    }
}

// Startup failures. These abort process initialization and are never handled per request.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Strategy {0} not found.")]
    UnknownStrategy(String),

    #[error("Mapping configuration entry #{index} is invalid: {reason}")]
    InvalidEntry { index: usize, reason: String },

    #[error("No mapping configurations were provided")]
    Empty,

    #[error("Settings parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
