//! Domain error types.

/// Top-level error type for coinlens.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error("no data for {coin}")]
    NoData { coin: String },

    #[error("malformed input: {reason}")]
    MalformedInput { reason: String },

    #[error("insufficient data: have {points} points, need at least {minimum}")]
    InsufficientData { points: usize, minimum: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AnalyzerError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        AnalyzerError::MalformedInput {
            reason: reason.into(),
        }
    }
}

impl From<&AnalyzerError> for std::process::ExitCode {
    fn from(err: &AnalyzerError) -> Self {
        let code: u8 = match err {
            AnalyzerError::Io(_) => 1,
            AnalyzerError::ConfigParse { .. }
            | AnalyzerError::ConfigMissing { .. }
            | AnalyzerError::ConfigInvalid { .. } => 2,
            AnalyzerError::DataSource { .. } => 3,
            AnalyzerError::NoData { .. } | AnalyzerError::InsufficientData { .. } => 5,
            AnalyzerError::MalformedInput { .. } => 6,
        };
        std::process::ExitCode::from(code)
    }
}
