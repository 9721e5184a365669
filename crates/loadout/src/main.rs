mod builtin;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use log::{debug, error};

use loadout_core::kernel::constants::{APP_NAME, APP_VERSION, DEFAULT_CONFIG_NAME, DEFAULT_PLUGIN_LIST_KEY};
use loadout_core::storage::{LocalStorageProvider, StorageProvider};
use loadout_core::{
    ConfigData, ConfigFormat, ConfigManager, KernelComponent, PluginManager, Result,
    SharedPluginManager,
};

use builtin::BuiltinPlugin;

/// Loadout: load configured plugins and report on them
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Print "pong" and exit
    #[arg(long)]
    ping: bool,

    /// Configuration file (JSON, YAML or TOML). Defaults to ./loadout.json
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Configuration key holding the plugin name list
    #[arg(long, short, default_value = DEFAULT_PLUGIN_LIST_KEY)]
    key: String,

    /// Log at info level unless RUST_LOG says otherwise
    #[arg(long, short)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load the configured plugins and list them in load order
    List,
    /// Load the configured plugins and summarize what was skipped
    Check,
    /// List the plugin types this binary can build
    Catalog,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    if args.ping {
        println!("pong");
        return ExitCode::SUCCESS;
    }

    let level = if args.verbose { "info" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).try_init();
    debug!("{} {} starting", APP_NAME, APP_VERSION);

    let Some(command) = args.command else {
        eprintln!("No command given; try `loadout --help`");
        return ExitCode::from(2);
    };

    match command {
        Commands::Catalog => {
            for plugin_type in builtin::catalog().types() {
                println!("{}", plugin_type);
            }
            ExitCode::SUCCESS
        }
        Commands::List => match open_plugins(args.config.as_deref(), args.key) {
            Some(plugins) => list(&plugins).await,
            None => ExitCode::from(2),
        },
        Commands::Check => match open_plugins(args.config.as_deref(), args.key) {
            Some(plugins) => check(&plugins).await,
            None => ExitCode::from(2),
        },
    }
}

/// Build the shared manager over the built-in catalog, or report why the
/// configuration could not be read.
fn open_plugins(config: Option<&Path>, key: String) -> Option<SharedPluginManager<dyn BuiltinPlugin>> {
    let config = match read_config(config) {
        Ok(config) => Arc::new(config),
        Err(e) => {
            error!("Failed to read configuration: {}", e);
            eprintln!("Error: {}", e);
            return None;
        }
    };

    let manager = PluginManager::new(key, builtin::catalog(), builtin::initializer, config);
    Some(SharedPluginManager::new(manager))
}

/// Read the configuration named on the command line, or the default one in
/// the working directory. A missing default file reads as empty.
fn read_config(path: Option<&Path>) -> Result<ConfigData> {
    let provider = Arc::new(LocalStorageProvider::new(PathBuf::from("."))) as Arc<dyn StorageProvider>;
    match path {
        Some(path) => {
            // The format follows the file extension
            let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
            ConfigManager::new(provider, dir, ConfigFormat::Json).load_file(path)
        }
        None => ConfigManager::new(provider, PathBuf::new(), ConfigFormat::Json)
            .load_config(DEFAULT_CONFIG_NAME),
    }
}

async fn list(plugins: &SharedPluginManager<dyn BuiltinPlugin>) -> ExitCode {
    if let Err(e) = plugins.initialize().await {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }
    if let Err(e) = plugins.start().await {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    for entry in plugins.entries().await {
        println!("{}\t{}\t{}", entry.name, entry.plugin_type, entry.instance.describe());
    }

    match plugins.stop().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn check(plugins: &SharedPluginManager<dyn BuiltinPlugin>) -> ExitCode {
    match plugins.load().await {
        Ok(report) => {
            println!(
                "loaded {} of {} configured plugins",
                report.loaded.len(),
                report.configured
            );
            for skipped in &report.skipped {
                println!("skipped '{}': {}", skipped.name, skipped.reason);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
