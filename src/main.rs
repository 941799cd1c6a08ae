use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use dithertone::api;
use dithertone::models::{AppConfig, SessionInfo, DEFAULT_BIND_ADDR};
use dithertone::rendering::{decode_png, encode_png};
use dithertone::server;
use tone_dither::{DitherStyle, ParamInput, Pipeline};

#[derive(Parser)]
#[command(name = "dithertone")]
#[command(about = "Dithertone - two-color ordered dithering with bloom")]
struct Cli {
    /// YAML config file (defaults to $CONFIG_FILE)
    #[arg(long, global = true, env = "CONFIG_FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Render a PNG file directly (no server needed)
    Render {
        /// Input PNG file path
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Dither style: bayer, crosshatch, halftone or contour
        #[arg(long)]
        style: Option<String>,

        /// Pattern strength
        #[arg(long)]
        strength: Option<f32>,

        /// Number of output levels
        #[arg(long)]
        levels: Option<i64>,

        /// Hex color of the darkest level (e.g. "#000000")
        #[arg(long)]
        color_start: Option<String>,

        /// Hex color of the brightest level (e.g. "#FFFFFF")
        #[arg(long)]
        color_end: Option<String>,

        /// Add a glow around bright areas
        #[arg(long)]
        bloom: bool,

        /// Bloom blur radius in pixels
        #[arg(long)]
        bloom_intensity: Option<f32>,

        /// Write the untouched original instead of the processed image
        #[arg(long)]
        original: bool,

        /// Re-compress the output with oxipng
        #[arg(long)]
        optimize: bool,
    },
    /// List supported dither styles
    Styles,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dithertone API",
        description = "Two-color ordered dithering with bloom",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_create_session,
        api::handle_get_session,
        api::handle_delete_session,
        api::handle_render,
        api::handle_toggle,
        api::handle_export,
        api::handle_styles,
    ),
    components(schemas(SessionInfo, api::RenderRequest, api::StylesResponse)),
    tags(
        (name = "Sessions", description = "Image upload and session lifecycle"),
        (name = "Rendering", description = "Dithering, view toggle and export")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Render {
            input,
            output,
            style,
            strength,
            levels,
            color_start,
            color_end,
            bloom,
            bloom_intensity,
            original,
            optimize,
        }) => {
            let params = ParamInput {
                style,
                strength,
                levels,
                color_start,
                color_end,
                // Unset flag keeps the configured default
                bloom_enabled: bloom.then_some(true),
                bloom_intensity,
                show_original: Some(original),
            };
            run_render_command(cli.config.as_deref(), &input, &output, params, optimize)
        }
        Some(Commands::Serve) => run_server(cli.config.as_deref()).await,
        Some(Commands::Styles) => {
            for style in DitherStyle::ALL {
                println!("{style}");
            }
            Ok(())
        }
        None => {
            run_status_command(cli.config.as_deref());
            Ok(())
        }
    }
}

/// Render a PNG file directly to another PNG file
fn run_render_command(
    config_file: Option<&Path>,
    input: &Path,
    output: &Path,
    params: ParamInput,
    optimize: bool,
) -> anyhow::Result<()> {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dithertone=warn,tone_dither=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config = AppConfig::load(config_file);
    let resolved = params.resolve(&config.defaults)?;

    let bytes = std::fs::read(input)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", input.display()))?;
    let source = decode_png(&bytes, config.max_pixels)?;

    let frame = Pipeline::new().run(
        &source,
        &resolved,
        params.show_original.unwrap_or(false),
    )?;
    let png_bytes = encode_png(&frame, optimize || config.optimize_png)?;

    std::fs::write(output, &png_bytes)?;
    println!(
        "Rendered {} ({}x{}, {}, {} levels, {} bytes)",
        output.display(),
        frame.width(),
        frame.height(),
        resolved.style,
        resolved.levels,
        png_bytes.len()
    );

    Ok(())
}

/// Display status and configuration information
fn run_status_command(config_file: Option<&Path>) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    // Read environment variables
    let bind_addr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| format!("{DEFAULT_BIND_ADDR} (default)"));
    let rust_log = std::env::var("RUST_LOG").ok();

    // Header
    println!("Dithertone v{VERSION}");
    println!("Two-color ordered dithering with bloom\n");

    // Environment variables section
    println!("Environment Variables:");
    println!("  BIND_ADDR   = {bind_addr}");
    println!(
        "  CONFIG_FILE = {}",
        config_file
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(not set)".to_string())
    );
    println!(
        "  RUST_LOG    = {}",
        rust_log.as_deref().unwrap_or("(not set)")
    );

    // Config source
    let config_source = match config_file {
        Some(path) if path.exists() => path.display().to_string(),
        Some(_) => "defaults (file not found)".to_string(),
        None => "defaults".to_string(),
    };
    println!("\nConfig:    {config_source}");

    let styles: Vec<&str> = DitherStyle::ALL.iter().map(|s| s.as_str()).collect();
    println!("Styles:    {}", styles.join(", "));

    // Commands section
    println!("\nCommands:");
    println!("  dithertone serve    Start the HTTP server");
    println!("  dithertone render   Render a PNG file to another PNG file");
    println!("  dithertone styles   List supported dither styles");
    println!("\nRun 'dithertone --help' for more details.");
}

/// Run the HTTP server
async fn run_server(config_file: Option<&Path>) -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dithertone=debug,tone_dither=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load(config_file).with_env_overrides();
    let bind_addr = config.bind_addr.clone();

    tracing::info!(
        config = %config_file.map(|p| p.display().to_string()).unwrap_or_else(|| "defaults".to_string()),
        max_upload_bytes = config.max_upload_bytes,
        max_pixels = config.max_pixels,
        max_sessions = config.max_sessions,
        optimize_png = config.optimize_png,
        "Configuration loaded"
    );

    // Create application state using shared server module
    let state = server::create_app_state(config);

    // Build router: start with shared API routes, add production-only routes
    let app = server::build_router(state)
        // OpenAPI documentation (production only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Dithertone server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
