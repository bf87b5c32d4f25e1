use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use publish_version::cli::{run_workflow, WorkflowArgs};
use publish_version::config::{self, RegistrySources};
use publish_version::registry::HttpRegistry;
use publish_version::ui;

#[derive(clap::Parser)]
#[command(
    name = "publish-version",
    version,
    about = "Decide which version a CI run should publish to an npm registry"
)]
struct Args {
    #[arg(long, env = "NPM_TOKEN", hide_env_values = true, help = "Registry bearer token")]
    token: Option<String>,

    #[arg(long, env = "NPM_REGISTRY", help = "Registry base URL")]
    registry: Option<String>,

    #[arg(short, long, help = "Package manifest path, relative to the project directory")]
    manifest: Option<PathBuf>,

    #[arg(long, default_value = ".", help = "Directory containing the package")]
    project_dir: PathBuf,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose)?;

    let config = match config::load_config(args.config.as_deref(), &args.project_dir) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(e.exit_code());
        }
    };

    let settings = config::resolve_registry_settings(RegistrySources {
        explicit: args.registry,
        npmrc: config::read_npmrc_registry(&args.project_dir),
        config_file: config.registry.url.clone(),
        token: args.token,
        timeout_secs: config.registry.timeout_secs,
    });
    tracing::debug!(?settings, "resolved registry settings");

    let registry = match HttpRegistry::new(&settings) {
        Ok(registry) => registry,
        Err(e) => {
            ui::display_error(&format!("Could not initialize registry client: {}", e));
            std::process::exit(e.exit_code());
        }
    };

    let workflow_args = WorkflowArgs {
        project_dir: args.project_dir,
        manifest_path: args
            .manifest
            .unwrap_or_else(|| PathBuf::from(&config.manifest.path)),
    };

    match run_workflow(&workflow_args, &registry) {
        Ok(result) => {
            // The bumped version is reported, never written back to the manifest.
            println!("{}", result.outcome.version());
            Ok(())
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(e.exit_code());
        }
    }
}

fn init_tracing(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("publish_version=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}
