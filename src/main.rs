use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use cvdsim::api;
use cvdsim::models::{AppConfig, SimulationParams};
use cvdsim::rendering::{ExportTarget, SizeLimit};
use cvdsim::server;
use cvdsim::services::SimulationService;

#[derive(Parser)]
#[command(name = "cvdsim")]
#[command(about = "Color vision deficiency simulator for PNG images and live frames")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Simulate a deficiency on a PNG file
    Simulate {
        /// Input PNG file
        #[arg(short, long)]
        input: PathBuf,

        /// protanopia, deuteranopia, tritanopia (or p/d/t), or none
        #[arg(short, long)]
        deficiency: Option<String>,

        /// Blend factor 0.0..=1.0 toward the simulated color
        #[arg(long)]
        intensity: Option<f64>,

        /// Blend factor as a whole percentage 0..=100; ignored when --intensity is given
        #[arg(long)]
        percent: Option<u32>,

        /// "linear" (decode gamma 2.2 first) or "encoded"
        #[arg(short, long)]
        gamma: Option<String>,

        /// Output PNG file path
        #[arg(short, long, conflicts_with = "output_dir")]
        output: Option<PathBuf>,

        /// Directory for an automatically named output file
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Run the output through oxipng
        #[arg(long)]
        optimize: bool,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "cvdsim API",
        description = "Color vision deficiency simulator",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_simulate,
        api::handle_submit_frame,
        api::handle_latest_frame,
        api::handle_frame_status,
        api::handle_stop_frames,
    ),
    components(schemas(
        api::ErrorResponse,
        api::FrameSubmitResponse,
        api::FrameStatusResponse,
    )),
    tags(
        (name = "Simulation", description = "One-shot image simulation"),
        (name = "Frames", description = "Live sources, latest frame wins")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Simulate {
            input,
            deficiency,
            intensity,
            percent,
            gamma,
            output,
            output_dir,
            optimize,
        }) => run_simulate_command(
            input,
            SimulationParams {
                deficiency,
                intensity,
                percent,
                gamma,
            },
            output,
            output_dir,
            optimize,
        ),
        Some(Commands::Serve) => run_server().await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Simulate a PNG file and write the result (no server needed)
fn run_simulate_command(
    input: PathBuf,
    params: SimulationParams,
    output: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    optimize: bool,
) -> anyhow::Result<()> {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cvdsim=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config = AppConfig::from_env();
    let selection = params.resolve(&config.simulation)?;

    let limit = SizeLimit {
        max_width: config.server.max_width,
        max_height: config.server.max_height,
    };
    let service = SimulationService::new(limit, optimize || config.export.optimize);

    let target = match (output, output_dir) {
        (Some(file), _) => ExportTarget::File(file),
        (None, Some(dir)) => ExportTarget::Directory(dir),
        (None, None) => ExportTarget::Directory(config.export.output_dir.clone()),
    };

    let written = service.simulate_file(&input, selection, &target)?;
    let size = std::fs::metadata(&written)?.len();
    println!(
        "Simulated {} as {} ({} bytes)",
        written.display(),
        selection.label(),
        size
    );

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();

    println!("cvdsim v{VERSION} - color vision deficiency simulator\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );

    let config_source = match config_file {
        Some(ref path) if PathBuf::from(path).exists() => path.to_string(),
        Some(_) => "defaults (file not found)".to_string(),
        None => "defaults".to_string(),
    };
    println!("\nConfiguration: {config_source}");

    println!("\nCommands:");
    println!("  cvdsim serve      Start the HTTP server");
    println!("  cvdsim simulate   Simulate a deficiency on a PNG file");
    println!("\nRun 'cvdsim --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cvdsim=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let config = AppConfig::from_env();

    tracing::info!(
        deficiency = %config.simulation.deficiency,
        intensity = config.simulation.intensity,
        gamma = %config.simulation.gamma,
        max_width = config.server.max_width,
        max_height = config.server.max_height,
        "Simulation defaults configured"
    );

    let state = server::create_app_state(config);

    // Build router: start with shared API routes, add production-only routes
    let app = server::build_router(state)
        // OpenAPI documentation (production only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "cvdsim server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
