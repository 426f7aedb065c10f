mod submit;

use std::path::PathBuf;

use anyhow::Context;
use clap::{crate_description, crate_version, Parser, Subcommand};
use databricks_pipelines_crd::resource_op::{ResourceAction, ResourceOp};
use databricks_pipelines_crd::run::RunSpec;
use databricks_pipelines_crd::{DatabricksKind, DEFAULT_NAMESPACE};
use tracing_subscriber::EnvFilter;

mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

const ENV_LOG: &str = "DATABRICKS_SUBMITTER_LOG";

#[derive(Parser)]
#[clap(about, author)]
struct Opts {
    #[clap(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a resource operation as YAML without touching the cluster
    Manifest(ManifestArgs),
    /// Submit a one-time Run custom object and exit
    SubmitRun(SubmitRunArgs),
}

#[derive(clap::Args)]
struct ManifestArgs {
    #[arg(long, default_value = "create")]
    action: ResourceAction,
    /// Custom resource kind, e.g. Dcluster or Djob
    #[arg(long)]
    kind: DatabricksKind,
    /// Name of the resource
    #[arg(long)]
    name: String,
    /// Path to a JSON file holding the resource spec
    #[arg(long)]
    spec: Option<PathBuf>,
}

#[derive(clap::Args)]
struct SubmitRunArgs {
    /// Name of the Run object
    #[arg(long)]
    run_name: String,
    /// Namespace the Databricks operator watches
    #[arg(long, default_value = DEFAULT_NAMESPACE)]
    namespace: String,
    /// Path to a JSON file holding the run spec
    #[arg(long)]
    spec: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();
    initialize_logging();

    match opts.cmd {
        Command::Manifest(args) => {
            let spec = args.spec.map(read_json).transpose()?;
            let op = ResourceOp::build(args.action, args.kind, &args.name, spec)?;
            print!("{}", serde_yaml::to_string(&op)?);
        }
        Command::SubmitRun(args) => {
            tracing::info!(
                "Starting {} {} ({}, rustc {}, built {})",
                crate_description!(),
                crate_version!(),
                built_info::TARGET,
                built_info::RUSTC_VERSION,
                built_info::BUILT_TIME_UTC,
            );

            // Parsing into the typed spec rejects malformed component input
            // before anything reaches the cluster.
            let spec: RunSpec = read_json(args.spec)?;
            let op = ResourceOp::create_with(DatabricksKind::Run, &args.run_name, &spec)?;

            let client = kube::Client::try_default()
                .await
                .context("failed to initialize the Kubernetes client")?;
            submit::create_resource(client, &args.namespace, &op).await?;
        }
    }

    Ok(())
}

fn initialize_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

fn read_json<T: serde::de::DeserializeOwned>(path: PathBuf) -> anyhow::Result<T> {
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("invalid JSON in {}", path.display()))
}
