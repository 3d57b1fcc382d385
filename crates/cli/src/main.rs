//! `hydrator` command-line entry point.

use clap::Parser;

mod commands;
mod handlers;

use commands::Commands;

#[derive(Parser)]
#[command(name = "hydrator")]
#[command(author, version, about = "Plugin property and output schema tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Reconcile { node, root } => handlers::reconcile(&node, &root)?,
        Commands::Schema { node, root } => handlers::schema(&node, &root)?,
        Commands::Validate { schema } => {
            if !handlers::validate(&schema)? {
                std::process::exit(1);
            }
        }
        Commands::Edge {
            nodes,
            source,
            root,
        } => handlers::edge(&nodes, &source, &root)?,
    }

    Ok(())
}

/// Logs go to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
