use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::datasource;

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a Kubernetes manifest from a configuration file
    Render(RenderArguments),

    /// Print the CustomResourceDefinition matching the generated manifests
    Crd,
}

#[derive(Parser, Debug)]
pub struct RenderArguments {
    /// Path of the YAML configuration describing the manifest
    #[arg(long)]
    pub config: PathBuf,

    /// Write the manifest to this path instead of standard output
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Type name of the data source to render with
    #[arg(long, default_value = datasource::kafka::TYPE_NAME)]
    pub source: String,
}
