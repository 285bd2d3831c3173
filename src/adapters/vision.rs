//! Google Cloud Vision `images:annotate` client, label detection only.

use crate::adapters::auth::fetch_access_token;
use crate::adapters::credentials::Credentials;
use crate::adapters::image_source::load_image_bytes;
use crate::domain::model::{ImageSource, ObjectLabel};
use crate::domain::ports::{ConfigProvider, LabelDetector};
use crate::utils::error::{Result, SeeFoodError};
use crate::utils::interrupt::until_interrupted;
use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const LABEL_DETECTION: &str = "LABEL_DETECTION";

#[derive(Debug, Serialize)]
pub struct BatchAnnotateImagesRequest {
    pub requests: Vec<AnnotateImageRequest>,
}

#[derive(Debug, Serialize)]
pub struct AnnotateImageRequest {
    pub image: ImageContent,
    pub features: Vec<Feature>,
}

#[derive(Debug, Serialize)]
pub struct ImageContent {
    /// Base64 of the raw file bytes.
    pub content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BatchAnnotateImagesResponse {
    #[serde(default)]
    pub responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotateImageResponse {
    #[serde(default)]
    pub label_annotations: Vec<EntityAnnotation>,
    pub error: Option<Status>,
}

#[derive(Debug, Deserialize)]
pub struct EntityAnnotation {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub score: f32,
}

#[derive(Debug, Deserialize)]
pub struct Status {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Status,
}

impl BatchAnnotateImagesRequest {
    /// One image, one `LABEL_DETECTION` feature.
    pub fn label_detection(image: &[u8], max_results: Option<usize>) -> Self {
        Self {
            requests: vec![AnnotateImageRequest {
                image: ImageContent {
                    content: base64::engine::general_purpose::STANDARD.encode(image),
                },
                features: vec![Feature {
                    kind: LABEL_DETECTION,
                    max_results,
                }],
            }],
        }
    }
}

impl BatchAnnotateImagesResponse {
    /// Flattens the label annotations in response order.
    ///
    /// A per-image error is logged and yields an empty list instead of a failure.
    pub fn into_labels(self) -> Vec<ObjectLabel> {
        let mut labels = Vec::new();

        for response in self.responses {
            if let Some(error) = response.error {
                tracing::warn!(
                    "Vision reported an error for the image (code {}): {}",
                    error.code,
                    error.message
                );
                return Vec::new();
            }

            labels.extend(
                response
                    .label_annotations
                    .into_iter()
                    .map(|annotation| ObjectLabel::new(annotation.description, annotation.score)),
            );
        }

        labels
    }
}

pub struct GoogleVisionClient {
    client: Client,
    endpoint: String,
    credentials_dir: PathBuf,
    credentials_extension: String,
    scopes: Vec<String>,
    max_results: Option<usize>,
}

impl GoogleVisionClient {
    pub fn new<C: ConfigProvider>(config: &C) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client<C: ConfigProvider>(client: Client, config: &C) -> Self {
        Self {
            client,
            endpoint: config.vision_endpoint().trim_end_matches('/').to_string(),
            credentials_dir: config.credentials_dir().to_path_buf(),
            credentials_extension: config.credentials_extension().to_string(),
            scopes: config.scopes().to_vec(),
            max_results: config.max_results(),
        }
    }

    pub fn http_client(&self) -> &Client {
        &self.client
    }

    fn annotate_url(&self) -> String {
        format!("{}/v1/images:annotate", self.endpoint)
    }

    /// Loads the image behind `source` and returns the labels detected in it.
    pub async fn detect(&self, source: &ImageSource) -> Result<Vec<ObjectLabel>> {
        let image = load_image_bytes(&self.client, source).await?;
        self.detect_image(&image).await
    }

    async fn annotate(
        &self,
        token: &str,
        body: &BatchAnnotateImagesRequest,
    ) -> Result<BatchAnnotateImagesResponse> {
        let url = self.annotate_url();
        tracing::debug!("Making annotate request to: {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Vision response status: {}", status);

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| text.trim().to_string());
            return Err(SeeFoodError::ServiceError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl LabelDetector for GoogleVisionClient {
    async fn detect_image(&self, image: &[u8]) -> Result<Vec<ObjectLabel>> {
        let credentials =
            Credentials::discover(&self.credentials_dir, &self.credentials_extension)?;
        let token = fetch_access_token(&self.client, &credentials, &self.scopes).await?;

        let body = BatchAnnotateImagesRequest::label_detection(image, self.max_results);
        let response = until_interrupted(self.annotate(&token.access_token, &body)).await?;

        let labels = response.into_labels();
        tracing::debug!("Vision returned {} labels", labels.len());
        for label in &labels {
            tracing::debug!("  {}", label);
        }
        Ok(labels)
    }
}
