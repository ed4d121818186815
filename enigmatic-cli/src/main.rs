use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;
mod output;

#[derive(Parser)]
#[command(name = "enigmatic")]
#[command(about = "Rotor machine cipher over arbitrary Unicode alphabets")]
#[command(version)]
struct Cli {
    /// Output format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug instrumentation (detailed logs)
    #[arg(long, global = true, env = "ENIGMATIC_DEBUG")]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt text with a key file, preset or generated settings
    Encrypt(commands::encrypt::EncryptArgs),
    /// Decrypt text with a key file or preset
    Decrypt(commands::decrypt::DecryptArgs),
    /// Generate a new key file
    Keygen(commands::keygen::KeygenArgs),
    /// Browse built-in machine presets
    Preset {
        #[command(subcommand)]
        action: commands::preset::PresetCommand,
    },
    /// Inspect and test key files
    Key {
        #[command(subcommand)]
        action: commands::key::KeyCommand,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigCommand,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("enigmatic=debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("enigmatic=warn"))
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::uptime())
        .with_writer(std::io::stderr)
        .init();

    let ctx = commands::Context {
        json_output: cli.json,
        verbose: cli.verbose,
        config_path: None,
    };

    let result = match cli.command {
        Commands::Encrypt(args) => commands::encrypt::run(args, &ctx),
        Commands::Decrypt(args) => commands::decrypt::run(args, &ctx),
        Commands::Keygen(args) => commands::keygen::run(args, &ctx),
        Commands::Preset { action } => commands::preset::run(action, &ctx),
        Commands::Key { action } => commands::key::run(action, &ctx),
        Commands::Config { action } => commands::config::run(action, &ctx),
    };

    if let Err(err) = result {
        tracing::debug!(error = ?err, "command failed");
        output::print_error(format!("{err:#}"));
        std::process::exit(1);
    }
    Ok(())
}
