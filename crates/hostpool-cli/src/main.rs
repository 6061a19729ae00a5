use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "hostpoolctl",
    about = "hostpool — auto-scale rules for container host pools",
    version,
    propagate_version = true,
)]
struct Cli {
    /// TOML configuration file. Without it every key reads as unset.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Data directory holding the rule database.
    #[arg(long, global = true, default_value = "/var/lib/hostpool")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List effective rules, including the one from legacy config keys
    List {
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Show the effective rule for a metadata filter
    Get {
        filter: String,
    },
    /// Create or replace the rule for a metadata filter.
    ///
    /// Omitted values are stored as unset; the whole rule is replaced.
    Set {
        filter: String,
        #[arg(long, default_value = "0")]
        max_container_count: i64,
        /// Must be greater than 1.0. 0 applies the default.
        #[arg(long, default_value = "0")]
        scale_down_ratio: f64,
        /// 0 applies docker:scheduler:max-used-memory.
        #[arg(long, default_value = "0")]
        max_memory_ratio: f64,
        /// Store the rule disabled.
        #[arg(long)]
        disabled: bool,
        #[arg(long)]
        prevent_rebalance: bool,
    },
    /// Delete the stored rule for a metadata filter
    Delete {
        filter: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("hostpool=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let repo = commands::open_repository(cli.config.as_deref(), &cli.data_dir)?;

    match cli.command {
        Commands::List { format } => commands::rules::list(&repo, &format),
        Commands::Get { filter } => commands::rules::get(&repo, &filter),
        Commands::Set {
            filter,
            max_container_count,
            scale_down_ratio,
            max_memory_ratio,
            disabled,
            prevent_rebalance,
        } => {
            let rule = hostpool_state::AutoScaleRule {
                metadata_filter: filter,
                max_container_count,
                scale_down_ratio,
                max_memory_ratio,
                enabled: !disabled,
                prevent_rebalance,
            };
            commands::rules::set(&repo, rule)
        }
        Commands::Delete { filter } => commands::rules::delete(&repo, &filter),
    }
}
