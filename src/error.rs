use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhonScoreError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Transcript Error in '{input}' at char {position}: {message}")]
    Transcript {
        input: String,
        position: usize,
        message: String,
    },

    #[error("Alignment Error: {0}")]
    Alignment(String),

    #[error("Pattern Error in '{pattern}' at char {position}: {message}")]
    Pattern {
        pattern: String,
        position: usize,
        message: String,
    },

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),
}

impl PhonScoreError {
    pub(crate) fn transcript(input: &str, position: usize, message: impl Into<String>) -> Self {
        Self::Transcript {
            input: input.to_string(),
            position,
            message: message.into(),
        }
    }

    pub(crate) fn pattern(pattern: &str, position: usize, message: impl Into<String>) -> Self {
        Self::Pattern {
            pattern: pattern.to_string(),
            position,
            message: message.into(),
        }
    }
}

pub type PsResult<T> = Result<T, PhonScoreError>;
