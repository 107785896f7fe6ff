//! Turn any photo into a round avatar.
//!
//! ```sh
//! cargo run --example avatar -- photo.jpg avatar.png --side 256
//! IMGKIT_LOG=debug cargo run --example avatar -- broken.jpg out.png
//! ```
//!
//! Output is PNG unless the output path ends in `.jpg`/`.jpeg`, in which case
//! the circle is flattened onto black at the configured JPEG quality.

use clap::Parser;
use imgkit::ImageWiz;
use imgkit::config::WizConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "avatar")]
#[command(about = "Crop a photo into a round avatar")]
struct Cli {
    /// Source image (JPEG, PNG, TIFF, WebP)
    input: PathBuf,

    /// Where to write the avatar
    output: PathBuf,

    /// Avatar diameter in pixels
    #[arg(long, default_value_t = 256)]
    side: u32,

    /// Optional imgkit.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;
    tracing_log::LogTracer::init().ok();
    let env = std::env::var("IMGKIT_LOG").unwrap_or_else(|_| "warn".into());
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(EnvFilter::new(env))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => WizConfig::load(path)?,
        None => WizConfig::default(),
    };

    let mut wiz = ImageWiz::from_path_with_side(&cli.input, cli.side).config(&config);
    if !wiz.has_bitmap() {
        return Err(format!("could not read {}", cli.input.display()).into());
    }
    wiz.square_crop().circle_crop();

    let is_jpeg = cli
        .output
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg"));
    if is_jpeg {
        wiz.try_save_jpeg(&cli.output, config.export.jpeg_quality)?;
    } else {
        wiz.try_save_png(&cli.output)?;
    }

    tracing::info!(output = %cli.output.display(), side = cli.side, "avatar written");
    println!("Wrote {}", cli.output.display());
    Ok(())
}
