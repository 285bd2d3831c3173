use crate::domain::model::ObjectLabel;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

pub trait ConfigProvider: Send + Sync {
    fn credentials_dir(&self) -> &Path;
    fn credentials_extension(&self) -> &str;
    fn scopes(&self) -> &[String];
    fn vision_endpoint(&self) -> &str;
    fn max_results(&self) -> Option<usize>;
    fn images_dir(&self) -> &Path;
    fn image_extensions(&self) -> &[String];
    fn output_dir(&self) -> &Path;
    fn font_path(&self) -> Option<&Path>;
}

/// Turns raw image bytes into labels, in the order the backend reports them.
#[async_trait]
pub trait LabelDetector: Send + Sync {
    async fn detect_image(&self, image: &[u8]) -> Result<Vec<ObjectLabel>>;
}
