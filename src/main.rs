use clap::Parser;
use hyper::body::Incoming;
use path_router::{config, logger, server};
use std::sync::Arc;
use tokio::sync::Notify;

/// Minimal HTTP router serving a fixed (method, path) route set
#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    /// Configuration file, extension optional
    #[arg(long, default_value = "config")]
    config: String,

    /// Server port, overrides `server.port`
    #[arg(long)]
    port: Option<u16>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let cfg = config::Config::load_from(&cli.config, cli.port)?;
    logger::init(&cfg)?;

    // Worker threads default to the number of CPU cores
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;
    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;

    // All routes are registered here; the router is frozen inside `AppState`
    let router = cfg.build_router::<Incoming>()?;
    let listener = server::create_reusable_listener(addr)?;
    logger::log_server_start(&addr, &cfg, router.route_count());

    let state = Arc::new(config::AppState::new(cfg, router));
    let shutdown = Arc::new(Notify::new());
    server::start_signal_handler(Arc::clone(&shutdown))?;

    server::start_server_loop(listener, state, shutdown).await;
    Ok(())
}
