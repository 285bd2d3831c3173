use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeeFoodError {
    #[error("Could not find JSON credentials file in {dir}")]
    CredentialsNotFound { dir: String },

    #[error("Invalid credentials file {path}: {message}")]
    CredentialsError { path: String, message: String },

    #[error("Authentication failed: {message}")]
    AuthError { message: String },

    #[error("Token signing failed: {0}")]
    TokenSigningError(#[from] jsonwebtoken::errors::Error),

    #[error("Vision service returned {status}: {message}")]
    ServiceError { status: u16, message: String },

    #[error("Failed to fetch image from {url}: HTTP {status}")]
    ImageFetchError { url: String, status: u16 },

    #[error("Interrupted while waiting for the network")]
    Interrupted,

    #[error("No file selected")]
    SelectionCancelled,

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Unsupported image {path}: expected one of {extensions}")]
    UnsupportedImage { path: String, extensions: String },

    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Font error: {message}")]
    FontError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Credentials,
    Network,
    Service,
    Image,
    Configuration,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// Exit status used when the user cancels file selection.
pub const EXIT_CANCELLED: i32 = 255;

impl SeeFoodError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::CredentialsNotFound { .. }
            | Self::CredentialsError { .. }
            | Self::AuthError { .. }
            | Self::TokenSigningError(_) => ErrorCategory::Credentials,
            Self::ImageFetchError { .. } | Self::Interrupted | Self::HttpError(_) => {
                ErrorCategory::Network
            }
            Self::ServiceError { .. } | Self::SerializationError(_) => ErrorCategory::Service,
            Self::IoError(_)
            | Self::UnsupportedImage { .. }
            | Self::ImageError(_)
            | Self::FontError { .. } => ErrorCategory::Image,
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::SelectionCancelled => ErrorCategory::User,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SelectionCancelled => ErrorSeverity::Low,
            Self::Interrupted => ErrorSeverity::Medium,
            Self::CredentialsNotFound { .. }
            | Self::CredentialsError { .. }
            | Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn exit_code(&self) -> i32 {
        if matches!(self, Self::SelectionCancelled) {
            return EXIT_CANCELLED;
        }
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::CredentialsNotFound { dir } => {
                format!("Could not find a JSON credentials file in '{}'.", dir)
            }
            Self::CredentialsError { path, .. } => {
                format!("The credentials file '{}' could not be used.", path)
            }
            Self::AuthError { .. } | Self::TokenSigningError(_) => {
                "Could not authenticate with Google Cloud.".to_string()
            }
            Self::ServiceError { status, message } => {
                format!("Google Cloud Vision rejected the request ({}): {}", status, message)
            }
            Self::ImageFetchError { url, status } => {
                format!("Could not download the image at {} (HTTP {}).", url, status)
            }
            Self::Interrupted => "The request was interrupted.".to_string(),
            Self::SelectionCancelled => "No file selected. Exiting.".to_string(),
            Self::HttpError(e) => format!("A network request failed: {}", e),
            Self::IoError(e) => format!("Could not read or write a file: {}", e),
            Self::UnsupportedImage { path, extensions } => {
                format!("'{}' is not a {} image.", path, extensions)
            }
            Self::ImageError(e) => format!("The image could not be processed: {}", e),
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Credentials => {
                "Place a service account or authorized user .json key in the credentials directory"
            }
            ErrorCategory::Network => "Check the network connection and the image URL, then try again",
            ErrorCategory::Service => "Check that the Vision API is enabled for the project",
            ErrorCategory::Image => "Choose a readable JPEG or PNG image",
            ErrorCategory::Configuration => "Fix the configuration file or command-line flags",
            ErrorCategory::User => "Run again and pick an image",
        }
    }
}

pub type Result<T> = std::result::Result<T, SeeFoodError>;
