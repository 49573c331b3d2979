mod api_doc;
mod cli;
mod cluster;
mod config;
mod handlers;
mod routes;
mod server;
mod state;
mod variant;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;
use cluster::{ReplicaCommand, Role};
use config::Config;
use server::Server;
use variant::Variant;

// Every process, primary or replica, drives a single-threaded event loop.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.print_openapi {
        let doc = api_doc::for_variant(cli.variant);
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    match (cli.variant, cli.role) {
        (Variant::Cluster, Role::Primary) => {
            config.log_startup();
            cluster::run_primary(ReplicaCommand::current_exe()?).await
        }
        (Variant::Cluster, Role::Replica) => {
            if let Err(e) = cluster::run_replica(config).await {
                // Returning would block on the uncancellable stdin read.
                tracing::error!("Worker {} failed: {:#}", std::process::id(), e);
                std::process::exit(1);
            }
            Ok(())
        }
        (variant, role) => {
            if role == Role::Replica {
                tracing::warn!("--role replica only applies to the cluster variant, ignoring");
            }
            config.log_startup();
            Server::bind(config, variant, false).await?.run().await
        }
    }
}
