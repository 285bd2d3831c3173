use crate::domain::model::ImageSource;
use crate::utils::error::{Result, SeeFoodError};
use crate::utils::interrupt::until_interrupted;
use reqwest::Client;

/// Reads the raw bytes of `source`: a local read, or a single GET for URLs.
pub async fn load_image_bytes(client: &Client, source: &ImageSource) -> Result<Vec<u8>> {
    match source {
        ImageSource::Local(path) => {
            tracing::debug!("Reading image from {}", path.display());
            Ok(tokio::fs::read(path).await?)
        }
        ImageSource::Remote(url) => {
            tracing::debug!("Fetching image from {}", url);
            until_interrupted(fetch(client, url)).await
        }
    }
}

async fn fetch(client: &Client, url: &str) -> Result<Vec<u8>> {
    let response = client.get(url).send().await?;
    let status = response.status();

    if !status.is_success() {
        return Err(SeeFoodError::ImageFetchError {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let bytes = response.bytes().await?;
    tracing::debug!("Fetched {} bytes", bytes.len());
    Ok(bytes.to_vec())
}
