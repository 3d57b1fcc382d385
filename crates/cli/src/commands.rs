//! CLI command definitions.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Group a node's backend properties using its widget configuration
    Reconcile {
        /// Path to the node JSON file
        #[arg(long)]
        node: PathBuf,

        /// Project root containing `.hydrator/`
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },

    /// Print the output schema a node ends up with once configured
    Schema {
        /// Path to the node JSON file
        #[arg(long)]
        node: PathBuf,

        /// Project root containing `.hydrator/`
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },

    /// Check a serialized output schema
    Validate {
        /// Path to the schema JSON file
        #[arg(long)]
        schema: PathBuf,
    },

    /// Print the schema flowing out of a node onto its connections
    Edge {
        /// Path to a JSON array of nodes
        #[arg(long)]
        nodes: PathBuf,

        /// Id of the source node
        #[arg(long)]
        source: String,

        /// Project root containing `.hydrator/`
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
}
