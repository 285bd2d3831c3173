use clap::Parser;
use seefood::app::{dialog, picker::FilePicker};
use seefood::utils::logger;
use seefood::{CliConfig, GoogleVisionClient, ImageSource, SeeFood, SeeFoodError, Settings};

/// Reports the failure to the user and exits with its status code.
fn fail(e: SeeFoodError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    if let Err(io) = dialog::show_error(std::io::stderr().lock(), &e) {
        eprintln!("❌ {} ({})", e.user_friendly_message(), io);
    }
    std::process::exit(e.exit_code())
}

fn select_source(cli: &CliConfig, settings: &Settings) -> Result<ImageSource, SeeFoodError> {
    let picker = FilePicker::from_config(settings);
    if let Some(image) = &cli.image {
        let source = ImageSource::parse(image);
        picker.check_source(&source)?;
        return Ok(source);
    }

    match picker.prompt(std::io::stdin().lock(), std::io::stdout())? {
        Some(path) => Ok(path.into()),
        None => Err(SeeFoodError::SelectionCancelled),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting seefood");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let settings = Settings::resolve(&cli).unwrap_or_else(|e| fail(e));
    tracing::debug!("Effective settings: {:?}", settings);

    let source = select_source(&cli, &settings).unwrap_or_else(|e| fail(e));

    let vision = GoogleVisionClient::new(&settings);
    let client = vision.http_client().clone();
    let engine = SeeFood::from_config(vision, client, &settings).unwrap_or_else(|e| fail(e));

    match engine.run(&source).await {
        Ok(report) => {
            tracing::info!("✅ {} -> {}", source, report.verdict);
            if let Err(e) = dialog::show_report(std::io::stdout().lock(), &report) {
                fail(e.into());
            }
        }
        Err(e) => fail(e),
    }
}
