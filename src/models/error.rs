/// Client-side rejections raised before any request leaves the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing information")]
    MissingInformation,

    #[error("Invalid price")]
    InvalidPrice,

    #[error("Invalid selection")]
    InvalidSelection,
}

impl ValidationError {
    /// Longer text shown under the notice title.
    pub const fn description(self) -> &'static str {
        match self {
            Self::MissingInformation => "Please fill in all fields",
            Self::InvalidPrice => "Please enter a valid price greater than 0",
            Self::InvalidSelection => "Please choose one of the listed options",
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("A request is already in progress")]
    Busy,
}

impl AppError {
    /// Message suitable for a notice body.
    ///
    /// Collaborator failures are surfaced verbatim, without the variant prefix.
    pub fn description(&self) -> String {
        match self {
            Self::ApiError(msg)
            | Self::DataError(msg)
            | Self::ConfigError(msg)
            | Self::AuthError(msg)
            | Self::NotFound(msg) => msg.clone(),
            Self::Validation(v) => v.description().to_string(),
            Self::RateLimited => "Too many requests, please wait a moment".to_string(),
            Self::Busy => self.to_string(),
        }
    }

    /// Short heading for a notice.
    pub fn title(&self) -> String {
        match self {
            Self::Validation(v) => v.to_string(),
            _ => "Error".to_string(),
        }
    }

    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
