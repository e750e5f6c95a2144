//! pearlscan CLI — circle detection and glyph-region redaction on image files.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use pearlscan::{detect_circles, redact_text, CircleParams, GlyphBox, GlyphLocator};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "pearlscan")]
#[command(about = "Detect circular objects in images and redact glyph-level text regions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect circles in an image and write results as JSON.
    Detect(CliDetectArgs),

    /// Redact glyph boxes (external OCR output) with a solid color.
    Redact(CliRedactArgs),
}

#[derive(Debug, Clone, Args)]
struct CliDetectArgs {
    /// Path to the input image.
    #[arg(long)]
    image: PathBuf,

    /// Path to write detection results (JSON).
    #[arg(long)]
    out: PathBuf,

    /// Accumulator downscale factor (one cell spans this many pixels).
    #[arg(long, default_value = "1.2")]
    dp: f32,

    /// Minimum distance between accepted circle centers (pixels).
    #[arg(long, default_value = "30.0")]
    min_dist: f32,

    /// Gradient magnitude threshold for edge pixels.
    #[arg(long, default_value = "50.0")]
    edge_threshold: f32,

    /// Minimum accumulator vote count for a candidate center.
    #[arg(long, default_value = "30.0")]
    accum_threshold: f32,

    /// Minimum circle radius (pixels).
    #[arg(long, default_value = "20")]
    min_radius: u32,

    /// Maximum circle radius (pixels).
    #[arg(long, default_value = "50")]
    max_radius: u32,
}

#[derive(Debug, Clone, Args)]
struct CliRedactArgs {
    /// Path to the input image.
    #[arg(long)]
    image: PathBuf,

    /// Path to a JSON array of glyph boxes produced by the OCR engine
    /// (bottom-left-origin coordinates).
    #[arg(long)]
    boxes: PathBuf,

    /// Fill color as rrggbb hex, with or without a leading '#'.
    #[arg(long, default_value = "000000")]
    color: String,

    /// Path to write the redacted image.
    #[arg(long)]
    out: PathBuf,
}

impl CliDetectArgs {
    fn to_params(&self) -> CircleParams {
        CircleParams {
            dp: self.dp,
            min_dist: self.min_dist,
            edge_threshold: self.edge_threshold,
            accum_threshold: self.accum_threshold,
            r_min: self.min_radius,
            r_max: self.max_radius,
        }
    }
}

/// Glyph boxes loaded from a file stand in for the external OCR engine.
struct FileBoxes(Vec<GlyphBox>);

impl GlyphLocator for FileBoxes {
    fn locate_glyphs(
        &self,
        _gray: &image::GrayImage,
    ) -> pearlscan::Result<Vec<GlyphBox>> {
        Ok(self.0.clone())
    }
}

fn parse_color(s: &str) -> CliResult<image::Rgb<u8>> {
    let hex = s.trim_start_matches('#');
    if hex.len() != 6 {
        return Err(format!("color must be 6 hex digits, got {s:?}").into());
    }
    let r = u8::from_str_radix(&hex[0..2], 16)?;
    let g = u8::from_str_radix(&hex[2..4], 16)?;
    let b = u8::from_str_radix(&hex[4..6], 16)?;
    Ok(image::Rgb([r, g, b]))
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Detect(args) => run_detect(&args),
        Commands::Redact(args) => run_redact(&args),
    }
}

// ── detect ─────────────────────────────────────────────────────────────

fn run_detect(args: &CliDetectArgs) -> CliResult<()> {
    tracing::info!("Loading image: {}", args.image.display());
    let img = image::open(&args.image)
        .map_err(|e| -> CliError {
            format!("Failed to open image {}: {}", args.image.display(), e).into()
        })?
        .to_rgb8();
    let (w, h) = img.dimensions();
    tracing::info!("Image size: {}x{}", w, h);

    let result = detect_circles(&img, &args.to_params())?;
    tracing::info!("Detected {} circles", result.circles.len());

    let json = serde_json::to_string_pretty(&result)?;
    std::fs::write(&args.out, &json)?;
    tracing::info!("Results written to {}", args.out.display());

    Ok(())
}

// ── redact ─────────────────────────────────────────────────────────────

fn run_redact(args: &CliRedactArgs) -> CliResult<()> {
    tracing::info!("Loading image: {}", args.image.display());
    let img = image::open(&args.image)
        .map_err(|e| -> CliError {
            format!("Failed to open image {}: {}", args.image.display(), e).into()
        })?
        .to_rgb8();

    let color = parse_color(&args.color)?;

    let boxes_json = std::fs::read_to_string(&args.boxes)?;
    let boxes: Vec<GlyphBox> = serde_json::from_str(&boxes_json)
        .map_err(|e| -> CliError {
            format!("Failed to parse glyph boxes {}: {}", args.boxes.display(), e).into()
        })?;
    tracing::info!("Loaded {} glyph boxes", boxes.len());

    let out = redact_text(img, &FileBoxes(boxes), color)?;
    out.save(&args.out)?;
    tracing::info!("Redacted image written to {}", args.out.display());

    Ok(())
}
