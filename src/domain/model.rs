use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// A label the vision service attached to an image, with its confidence in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectLabel {
    description: String,
    score: f32,
}

impl ObjectLabel {
    pub fn new(description: impl Into<String>, score: f32) -> Self {
        Self {
            description: description.into(),
            score,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn score(&self) -> f32 {
        self.score
    }
}

impl fmt::Display for ObjectLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2})", self.description, self.score)
    }
}

/// Where the image bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Local(PathBuf),
    Remote(String),
}

impl ImageSource {
    /// Classifies by prefix only: `http://` and `https://` are remote, anything else is a path.
    pub fn parse(input: &str) -> Self {
        if input.starts_with("http://") || input.starts_with("https://") {
            Self::Remote(input.to_string())
        } else {
            Self::Local(PathBuf::from(input))
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }

    /// File stem used to name the annotated output.
    pub fn stem(&self) -> String {
        let stem = match self {
            Self::Local(path) => path.file_stem().and_then(|s| s.to_str()).map(str::to_string),
            Self::Remote(url) => url
                .split(['?', '#'])
                .next()
                .and_then(|u| u.trim_end_matches('/').rsplit('/').next())
                .and_then(|segment| Path::new(segment).file_stem())
                .and_then(|s| s.to_str())
                .map(str::to_string),
        };
        stem.filter(|s| !s.is_empty())
            .unwrap_or_else(|| "image".to_string())
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        Self::Local(path)
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(path) => write!(f, "{}", path.display()),
            Self::Remote(url) => write!(f, "{}", url),
        }
    }
}
