use clap::Parser;
use color_eyre::eyre::Result;
use edge_vision::{EdgeConfig, PixelBuffer, io, samples, visualize::compose_grid};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{self, EnvFilter};

/// Generate synthetic geometric test images for edge detection
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory to write the images into (defaults to the configured input dir)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Also write all samples as one contact sheet to this path
    #[arg(long)]
    overview: Option<PathBuf>,
    /// Columns of the contact sheet
    #[arg(long, default_value = "3")]
    columns: usize,
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
    let output = cli.output.unwrap_or_else(|| EdgeConfig::default().input_dir);

    let written = samples::generate_shapes_dataset(&output)?;
    for path in &written {
        info!("  {}", path.display());
    }

    if let Some(path) = &cli.overview {
        let images: Vec<_> = samples::shapes().into_iter().map(|(_, image)| image).collect();
        let sheet = compose_grid(&images, cli.columns)?;
        io::save(&PixelBuffer::Color(sheet), path)?;
        info!("Contact sheet saved to: {}", path.display());
    }

    info!("✅ Generated {} sample images", written.len());
    Ok(())
}
