use clap::{Parser, builder::PossibleValuesParser};
use color_eyre::eyre::Result;
use edge_vision::{
    BatchRunner, CancelToken, Detector, EdgeConfig, SideBySideViewer, available_methods,
};
use edge_vision_cli::{ConfigFile, DetectorArgs};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{self, EnvFilter};

/// Batch edge detection over a directory of images
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input directory containing images (defaults to the configured input dir)
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Output directory to store edge maps (defaults to the configured output dir)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Edge detection method to apply
    #[arg(short, long, default_value = "canny", value_parser = PossibleValuesParser::new(available_methods()))]
    method: String,
    /// Recursively process subdirectories
    #[arg(short, long)]
    recursive: bool,
    /// Show original and edge images side by side, waiting after each one
    #[arg(long)]
    visualize: bool,
    /// Follow symbolic links while scanning
    #[arg(long)]
    follow_links: bool,
    /// Decode inputs as grayscale
    #[arg(long)]
    gray: bool,
    /// TOML or JSON file with defaults to use instead of the built-in ones
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Write the per-file results as JSON
    #[arg(long)]
    report: Option<PathBuf>,
    /// Print the JSON schema of the configuration file and exit
    #[arg(long)]
    print_config_schema: bool,
    #[command(flatten)]
    params: DetectorArgs,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();

    if cli.print_config_schema {
        println!("{}", serde_json::to_string_pretty(&EdgeConfig::schema())?);
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            EdgeConfig::from_file(path)?
        }
        None => EdgeConfig::default(),
    };

    let detector = Detector::from_name(&cli.method, &config, &cli.params.overrides())?;
    info!("Detector: {:?}", detector);

    let cancel = CancelToken::new();
    let mut builder = BatchRunner::builder(
        cli.input.unwrap_or_else(|| config.input_dir.clone()),
        cli.output.unwrap_or_else(|| config.output_dir.clone()),
    )
    .detector(detector)
    .recursive(cli.recursive || config.recursive)
    .follow_links(cli.follow_links || config.follow_links)
    .extensions(config.extensions.clone())
    .output_extension(config.output_extension.clone())
    .load_as_gray(cli.gray || config.load_as_gray)
    .with_cancel_token(cancel.clone());

    if cli.visualize {
        builder = builder
            .visualize(true)
            .with_visualizer(SideBySideViewer::new(&config.preview_dir).with_cancel_token(cancel));
    }

    let report = builder.build()?.run()?;
    report.log_summary();

    if let Some(path) = &cli.report {
        report.save_json(path)?;
        info!("📄 Report saved to: {:?}", path);
    }

    Ok(())
}
