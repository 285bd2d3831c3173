use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "seefood")]
#[command(about = "Tells you whether a picture is a hot dog, using Google Cloud Vision")]
pub struct CliConfig {
    /// Image file or http(s) URL. Prompts for a file when omitted.
    pub image: Option<String>,

    #[arg(long, help = "Path to a seefood.toml configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Directory searched for the .json credentials file")]
    pub credentials_dir: Option<PathBuf>,

    #[arg(long, help = "Directory the file picker starts in")]
    pub images_dir: Option<PathBuf>,

    #[arg(long, help = "Directory the annotated image is written to")]
    pub output_dir: Option<PathBuf>,

    #[arg(long, help = "TrueType font used for the banner text")]
    pub font: Option<PathBuf>,

    #[arg(long, help = "Base URL of the Vision API")]
    pub vision_endpoint: Option<String>,

    #[arg(long, help = "Maximum number of labels to request")]
    pub max_results: Option<usize>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}
