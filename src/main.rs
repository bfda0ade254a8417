use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use storefront_client::application::storefront::Storefront;
use storefront_client::config::{ClientConfig, DEFAULT_API_URL};
use storefront_client::domain::ports::StoreGatewayBox;
use storefront_client::infrastructure::http::HttpGateway;
use storefront_client::infrastructure::in_memory::InMemoryGateway;
use storefront_client::interfaces::console::renderer::ConsoleRenderer;
use storefront_client::interfaces::console::shell;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the store API
    #[arg(long, env = "STOREFRONT_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Accept self-signed TLS certificates (local development APIs)
    #[arg(long, env = "STOREFRONT_INSECURE")]
    insecure: bool,

    /// Use a built-in in-memory store with sample data instead of the API
    #[arg(long)]
    demo: bool,

    /// Read commands from this file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "storefront_client=info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let gateway: StoreGatewayBox = if cli.demo {
        info!("using in-memory demo store");
        Box::new(InMemoryGateway::with_demo_data().await)
    } else {
        let config = ClientConfig::new(&cli.api_url, cli.insecure).into_diagnostic()?;
        let gateway = HttpGateway::new(&config).into_diagnostic()?;
        info!(api_url = %gateway.base_url(), "using remote store API");
        Box::new(gateway)
    };

    let mut storefront =
        Storefront::new(gateway).with_observer(Box::new(ConsoleRenderer::new(io::stdout())));

    let input: Box<dyn BufRead> = match cli.script {
        Some(path) => Box::new(BufReader::new(File::open(path).into_diagnostic()?)),
        None => Box::new(io::stdin().lock()),
    };

    shell::run(&mut storefront, input, io::stdout())
        .await
        .into_diagnostic()?;

    Ok(())
}
