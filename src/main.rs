use std::sync::Arc;
use tokio::sync::Notify;

mod config;
mod engine;
mod error;
mod handler;
mod http;
mod logger;
mod server;

use engine::RegexEvaluator;
use handler::static_files::StaticAssets;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load_from("config")?;
    logger::init(&cfg)?;

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
    let listener = server::create_listener(addr, cfg.performance.backlog)?;

    let assets = StaticAssets::load(&cfg.static_files).await;
    logger::log_server_start(&addr, &cfg, &assets.paths());

    let state = Arc::new(config::AppState::new(
        cfg,
        assets,
        Arc::new(RegexEvaluator::new()),
    ));

    let shutdown = Arc::new(Notify::new());
    server::start_signal_handler(Arc::clone(&shutdown));

    // Connection tasks use spawn_local
    let local = tokio::task::LocalSet::new();
    local
        .run_until(server::run_server_loop(listener, state, shutdown))
        .await
}
