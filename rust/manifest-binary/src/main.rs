use std::fs;

use clap::Parser;
use cli_args::{Cli, Command, RenderArguments};
use kube::CustomResourceExt;
use snafu::{whatever, ResultExt};
use strimzi_manifest_crd::Kafka;
use tracing::{info, level_filters::LevelFilter};

mod cli_args;
mod datasource;

#[snafu::report]
pub fn main() -> Result<(), snafu::Whatever> {
    let filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env()
        .whatever_context("failed to create tracing subscriber EnvFilter")?;
    tracing_subscriber::fmt()
        // Short running tool does not need any complex output
        .with_target(false)
        .without_time()
        .with_env_filter(filter)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Render(args) => render_manifest(args)?,
        Command::Crd => print_crd()?,
    }

    Ok(())
}

fn render_manifest(args: RenderArguments) -> Result<(), snafu::Whatever> {
    if args.source != datasource::kafka::TYPE_NAME {
        whatever!(
            "unknown data source {:?}, available data sources: {}",
            args.source,
            datasource::TYPE_NAMES.join(", ")
        );
    }

    let config = fs::read_to_string(&args.config).with_whatever_context(|_| {
        format!(
            "failed to read configuration from {path:?}",
            path = args.config
        )
    })?;
    let config: datasource::kafka::KafkaManifestConfig = serde_yaml::from_str(&config)
        .with_whatever_context(|_| {
            format!(
                "failed to parse configuration from {path:?}",
                path = args.config
            )
        })?;

    let manifest =
        datasource::kafka::render(config).whatever_context("failed to render manifest")?;
    info!(
        id = %manifest.id,
        source = datasource::kafka::TYPE_NAME,
        "Rendered manifest"
    );

    match &args.out {
        Some(out) => fs::write(out, &manifest.yaml)
            .with_whatever_context(|_| format!("failed to write manifest to {out:?}"))?,
        None => print!("{}", manifest.yaml),
    }

    Ok(())
}

fn print_crd() -> Result<(), snafu::Whatever> {
    let crd = serde_yaml::to_string(&Kafka::crd())
        .whatever_context("failed to serialize the CustomResourceDefinition")?;
    print!("{crd}");
    Ok(())
}
