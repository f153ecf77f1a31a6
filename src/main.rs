use clap::{Parser, Subcommand};
use image_editor_pro::editor::{self, ModeOptions};
use image_editor_pro::imaging::{ImageBackend, RustBackend};
use image_editor_pro::node::NodeParameters;
use image_editor_pro::output::{self, RenderSummary};
use image_editor_pro::source::HttpFetcher;
use image_editor_pro::{config, schema};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "image-editor-pro")]
#[command(about = "Collage, text overlay and watermark compositor")]
#[command(long_about = "\
Collage, text overlay and watermark compositor

Reads one set of node parameters (a flat camelCase JSON object) and writes a
single PNG. Images come from the comma-separated `imageUrls` parameter and/or
a local file passed with --image, which always goes first.

Modes:
  collage       rows × columns grid of 300×300 tiles
  addText       text with an optional circle/rectangle background
  addWatermark  32px black text, or an image stamp when watermarkType = image

Example params.json:

  {
    \"mode\": \"addText\",
    \"imageUrls\": \"https://example.com/photo.jpg\",
    \"text\": \"Hello\",
    \"fontSize\": 64,
    \"position\": \"bottom-right\"
  }

Run 'image-editor-pro schema' for every parameter and its default.
Run 'image-editor-pro gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Editor config file (fonts, HTTP settings)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one edit and write the PNG
    Render {
        /// Node parameters as a JSON object
        params: PathBuf,
        /// Local image used as the first input
        #[arg(long)]
        image: Option<PathBuf>,
        /// Where to write the PNG
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,
    },
    /// Print the node parameter schema as JSON
    Schema,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Render {
            params,
            image,
            output: output_path,
        } => {
            let config = config::load_config(cli.config.as_deref())?;

            let params: NodeParameters = serde_json::from_str(&std::fs::read_to_string(&params)?)?;
            let binary = image.map(std::fs::read).transpose()?;
            let request = params.into_request(binary)?;

            let backend = RustBackend::with_fonts(&config.fonts);
            let fetcher = HttpFetcher::new(&config.http)?;
            let png = editor::edit(&backend, &fetcher, &request)?;
            std::fs::write(&output_path, &png)?;

            let options = ModeOptions::parse(editor::parse_mode(&request.mode)?, &request.options)?;
            let dimensions = backend.identify(&png)?;
            output::print_render_summary(&RenderSummary::new(
                &output_path,
                &request.input,
                options,
                dimensions,
                png.len(),
            ));
        }
        Command::Schema => {
            println!("{}", schema::schema_json()?);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
