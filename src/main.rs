mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use maxlaunchpad::MacosVersion;

use commands::config::ConfigAction;

#[derive(Parser)]
#[command(name = "maxlaunchpad", version, about = "Install MaxLaunchpad and register it as a login item")]
struct Cli {
    /// Config file (default: ~/.config/maxlaunchpad/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// macOS version to assume instead of asking sw_vers (e.g. 14.2 or sonoma)
    #[arg(long, global = true, env = "MAXLAUNCHPAD_MACOS", value_name = "VERSION")]
    macos: Option<MacosVersion>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download and verify the disk image, printing its cached path
    Download,
    /// Install the application and register the login item
    Install,
    /// Remove the login item and the application
    Uninstall,
    /// Uninstall and delete preferences, support files and caches
    Zap,
    /// Check that the installation is intact
    Test,
    /// Print post-install instructions for this macOS version
    Caveats,
    /// Manage installer configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("maxlaunchpad={default}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let session = commands::Session {
        config_path: cli.config,
        macos: cli.macos,
    };

    match cli.command {
        Commands::Download => commands::lifecycle::cmd_download(&session)?,
        Commands::Install => commands::lifecycle::cmd_install(&session)?,
        Commands::Uninstall => commands::lifecycle::cmd_uninstall(&session)?,
        Commands::Zap => commands::lifecycle::cmd_zap(&session)?,
        Commands::Test => commands::lifecycle::cmd_test(&session)?,
        Commands::Caveats => commands::lifecycle::cmd_caveats(&session)?,
        Commands::Config { action } => commands::config::cmd_config(&session, action)?,
    }

    Ok(())
}
