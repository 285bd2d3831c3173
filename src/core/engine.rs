use crate::adapters::image_source::load_image_bytes;
use crate::adapters::overlay::BannerRenderer;
use crate::core::verdict::{classify, Verdict};
use crate::domain::model::{ImageSource, ObjectLabel};
use crate::domain::ports::{ConfigProvider, LabelDetector};
use crate::utils::error::Result;
use crate::utils::interrupt::until_interrupted;
use reqwest::Client;
use std::path::PathBuf;

/// Outcome of one run.
#[derive(Debug, Clone)]
pub struct Report {
    pub labels: Vec<ObjectLabel>,
    pub verdict: Verdict,
    pub output_path: PathBuf,
}

pub struct SeeFood<D: LabelDetector> {
    detector: D,
    client: Client,
    renderer: BannerRenderer,
    output_dir: PathBuf,
}

impl<D: LabelDetector> SeeFood<D> {
    pub fn new(
        detector: D,
        client: Client,
        renderer: BannerRenderer,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            detector,
            client,
            renderer,
            output_dir,
        }
    }

    /// Wires the renderer and output directory from configuration.
    pub fn from_config<C: ConfigProvider>(detector: D, client: Client, config: &C) -> Result<Self> {
        let renderer = BannerRenderer::from_font_path(config.font_path())?;
        Ok(Self::new(
            detector,
            client,
            renderer,
            config.output_dir().to_path_buf(),
        ))
    }

    /// Detects, classifies, and writes the annotated image.
    ///
    /// Ctrl-C at any point before the report is ready ends the run with
    /// `Interrupted`.
    pub async fn run(&self, source: &ImageSource) -> Result<Report> {
        until_interrupted(self.check(source)).await
    }

    async fn check(&self, source: &ImageSource) -> Result<Report> {
        tracing::info!("Checking {}", source);

        let bytes = load_image_bytes(&self.client, source).await?;
        // Must decode before the detector is billed for the image.
        let mut image = image::load_from_memory(&bytes)?.to_rgba8();

        let labels = self.detector.detect_image(&bytes).await?;
        tracing::info!("Detected {} labels", labels.len());

        let verdict = classify(&labels);
        match verdict {
            Verdict::HotDog { matched } => {
                tracing::info!("Matched label #{}: {}", matched, labels[matched]);
            }
            Verdict::NotHotDog => tracing::info!("No hot dog label found"),
        }

        self.renderer.render(&mut image, &verdict);

        tokio::fs::create_dir_all(&self.output_dir).await?;
        let output_path = self.output_dir.join(format!("{}-seefood.png", source.stem()));
        image.save(&output_path)?;
        tracing::debug!("Annotated image saved to {}", output_path.display());

        Ok(Report {
            labels,
            verdict,
            output_path,
        })
    }
}
