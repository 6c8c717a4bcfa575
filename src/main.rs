use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use nms_apicontroller::{config::Config, directory::Directory, state::AppState};

#[derive(Parser, Debug)]
#[command(name = "nms-apicontroller", version, about = "Tenant-scoping gateway for the network controller API")]
struct Cli {
    /// Address to listen on (overrides HOST/PORT)
    #[arg(long)]
    listen: Option<String>,

    /// Users and organizations file (overrides DIRECTORY_PATH)
    #[arg(long)]
    directory: Option<String>,

    /// Print the SHA-256 digest of an API key for the directory file and exit
    #[arg(long, value_name = "API_KEY")]
    hash_key: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nms_apicontroller=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    if let Some(key) = cli.hash_key {
        println!("{}", nms_apicontroller::directory::hash_api_key(&key));
        return Ok(());
    }

    let mut config = Config::from_env();
    if let Some(path) = cli.directory {
        config.directory_path = path;
    }
    let addr = cli.listen.unwrap_or_else(|| config.addr());

    let directory = Directory::load(&config.directory_path)
        .with_context(|| format!("loading directory {}", config.directory_path))?;
    let state = AppState::from_config(&config, directory).context("building app state")?;

    if !config.multi_tenant {
        tracing::warn!("Multi-tenancy disabled: network scoping is bypassed");
    }
    if !config.network_fallback.is_empty() {
        tracing::info!(
            networks = config.network_fallback.len(),
            "Network fallback list configured"
        );
    }

    let app = nms_apicontroller::app(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    tracing::info!(
        "Listening on {} (upstream {})",
        addr,
        config.upstream.api_host
    );

    axum::serve(listener, app).await?;
    Ok(())
}
