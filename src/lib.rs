pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::credentials::{locate_credentials, Credentials};
pub use adapters::vision::GoogleVisionClient;
pub use config::Settings;
pub use crate::core::engine::{Report, SeeFood};
pub use crate::core::verdict::{classify, Verdict};
pub use domain::model::{ImageSource, ObjectLabel};
pub use utils::error::{Result, SeeFoodError};
