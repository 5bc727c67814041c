use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::time::Duration;

use skinscan::{config, logger, server};

/// How long in-flight requests may run after shutdown is requested
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;
    logger::init(&cfg)?;

    // Worker count from config, CPU cores otherwise
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
    let listener = server::create_listener(addr)?;

    let state = Arc::new(config::AppState::new(&cfg));
    let active_connections = Arc::new(AtomicUsize::new(0));

    logger::log_server_start(&addr, &cfg);
    server::start_signal_handler(Arc::clone(&state));

    // Use LocalSet for spawn_local support
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async move {
            let remaining =
                server::start_server_loop(listener, state, Arc::clone(&active_connections)).await;
            logger::log_shutdown(remaining);
            let abandoned = server::drain_connections(&active_connections, SHUTDOWN_GRACE).await;
            if abandoned > 0 {
                logger::log_warning(&format!(
                    "[Shutdown] {abandoned} connection(s) closed after the grace period"
                ));
            }
        })
        .await;

    Ok(())
}
