#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::path::{Path, PathBuf};
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

pub const DEFAULT_VISION_ENDPOINT: &str = "https://vision.googleapis.com";
pub const DEFAULT_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";
pub const DEFAULT_CREDENTIALS_DIR: &str = "src";
pub const DEFAULT_CREDENTIALS_EXTENSION: &str = "json";
pub const DEFAULT_IMAGES_DIR: &str = "src/images";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Effective configuration after merging defaults, the TOML file and CLI flags.
#[derive(Debug, Clone)]
pub struct Settings {
    pub credentials_dir: PathBuf,
    pub credentials_extension: String,
    pub scopes: Vec<String>,
    pub vision_endpoint: String,
    pub max_results: Option<usize>,
    pub images_dir: PathBuf,
    pub image_extensions: Vec<String>,
    pub output_dir: PathBuf,
    pub font_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from(TomlConfig::default())
    }
}

impl From<TomlConfig> for Settings {
    fn from(file: TomlConfig) -> Self {
        Self {
            credentials_dir: PathBuf::from(
                file.credentials
                    .dir
                    .unwrap_or_else(|| DEFAULT_CREDENTIALS_DIR.to_string()),
            ),
            credentials_extension: file
                .credentials
                .extension
                .unwrap_or_else(|| DEFAULT_CREDENTIALS_EXTENSION.to_string()),
            scopes: file
                .credentials
                .scopes
                .unwrap_or_else(|| vec![DEFAULT_SCOPE.to_string()]),
            vision_endpoint: file
                .vision
                .endpoint
                .unwrap_or_else(|| DEFAULT_VISION_ENDPOINT.to_string()),
            max_results: file.vision.max_results,
            images_dir: PathBuf::from(
                file.picker
                    .images_dir
                    .unwrap_or_else(|| DEFAULT_IMAGES_DIR.to_string()),
            ),
            image_extensions: file.picker.extensions.unwrap_or_else(|| {
                DEFAULT_IMAGE_EXTENSIONS
                    .iter()
                    .map(|ext| ext.to_string())
                    .collect()
            }),
            output_dir: PathBuf::from(
                file.output
                    .dir
                    .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string()),
            ),
            font_path: file.output.font.map(PathBuf::from),
        }
    }
}

impl Settings {
    /// Loads the optional TOML file named by `--config`, then applies CLI overrides.
    #[cfg(feature = "cli")]
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };

        let mut settings = Self::from(file);
        settings.apply_cli(cli);
        settings.validate()?;
        Ok(settings)
    }

    #[cfg(feature = "cli")]
    fn apply_cli(&mut self, cli: &CliConfig) {
        if let Some(dir) = &cli.credentials_dir {
            self.credentials_dir = dir.clone();
        }
        if let Some(dir) = &cli.images_dir {
            self.images_dir = dir.clone();
        }
        if let Some(dir) = &cli.output_dir {
            self.output_dir = dir.clone();
        }
        if let Some(font) = &cli.font {
            self.font_path = Some(font.clone());
        }
        if let Some(endpoint) = &cli.vision_endpoint {
            self.vision_endpoint = endpoint.clone();
        }
        if cli.max_results.is_some() {
            self.max_results = cli.max_results;
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("vision.endpoint", &self.vision_endpoint)?;
        validation::validate_path(
            "credentials.dir",
            &self.credentials_dir.to_string_lossy(),
        )?;
        validation::validate_non_empty_string(
            "credentials.extension",
            &self.credentials_extension,
        )?;
        for scope in &self.scopes {
            validation::validate_url("credentials.scopes", scope)?;
        }
        validation::validate_path("picker.images_dir", &self.images_dir.to_string_lossy())?;
        validation::validate_extensions("picker.extensions", &self.image_extensions)?;
        validation::validate_path("output.dir", &self.output_dir.to_string_lossy())?;
        if let Some(max) = self.max_results {
            validation::validate_positive_number("vision.max_results", max, 1)?;
        }
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn credentials_dir(&self) -> &Path {
        &self.credentials_dir
    }

    fn credentials_extension(&self) -> &str {
        &self.credentials_extension
    }

    fn scopes(&self) -> &[String] {
        &self.scopes
    }

    fn vision_endpoint(&self) -> &str {
        &self.vision_endpoint
    }

    fn max_results(&self) -> Option<usize> {
        self.max_results
    }

    fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    fn image_extensions(&self) -> &[String] {
        &self.image_extensions
    }

    fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn font_path(&self) -> Option<&Path> {
        self.font_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::SeeFoodError;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.credentials_dir, PathBuf::from("src"));
        assert_eq!(settings.credentials_extension, "json");
        assert_eq!(settings.scopes, vec![DEFAULT_SCOPE.to_string()]);
        assert_eq!(settings.vision_endpoint, DEFAULT_VISION_ENDPOINT);
        assert_eq!(settings.images_dir, PathBuf::from("src/images"));
        assert_eq!(settings.image_extensions, vec!["jpg", "jpeg", "png"]);
        assert!(settings.font_path.is_none());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_example_config_matches_defaults() {
        let file = TomlConfig::from_toml_str(include_str!("../../seefood.example.toml")).unwrap();
        let settings = Settings::from(file);
        let defaults = Settings::default();

        assert!(settings.validate().is_ok());
        assert_eq!(settings.credentials_dir, defaults.credentials_dir);
        assert_eq!(settings.vision_endpoint, defaults.vision_endpoint);
        assert_eq!(settings.image_extensions, defaults.image_extensions);
        assert_eq!(settings.output_dir, defaults.output_dir);
        assert!(settings.max_results.is_none());
    }

    #[test]
    fn test_invalid_endpoint_fails_validation() {
        let settings = Settings {
            vision_endpoint: "vision.googleapis.com".to_string(),
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SeeFoodError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_zero_max_results_fails_validation() {
        let settings = Settings {
            max_results: Some(0),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_overrides_file() {
        use clap::Parser;
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"[vision]\nendpoint = \"https://file.example.com\"\nmax_results = 3\n\n[output]\ndir = \"file-out\"\n",
        )
        .unwrap();

        let cli = CliConfig::parse_from([
            "seefood".to_string(),
            "--config".to_string(),
            file.path().to_string_lossy().to_string(),
            "--output-dir".to_string(),
            "cli-out".to_string(),
        ]);

        let settings = Settings::resolve(&cli).unwrap();
        assert_eq!(settings.vision_endpoint, "https://file.example.com");
        assert_eq!(settings.max_results, Some(3));
        assert_eq!(settings.output_dir, PathBuf::from("cli-out"));
    }
}
