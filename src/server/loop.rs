// Server loop module
// Accepts connections until shutdown is requested

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Run the accept loop on the current `LocalSet`.
///
/// Returns the number of connections still in flight when shutdown was
/// requested; those finish in their own tasks.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    active_connections: Arc<AtomicUsize>,
) -> usize {
    loop {
        if state.is_shutting_down() {
            break;
        }
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }
            () = state.shutdown_signal.notified() => break,
        }
    }

    drop(listener);
    active_connections.load(Ordering::SeqCst)
}

/// Wait until in-flight connections finish or `grace` elapses.
///
/// Returns the number of connections abandoned at the deadline.
pub async fn drain_connections(active_connections: &AtomicUsize, grace: Duration) -> usize {
    let deadline = tokio::time::Instant::now() + grace;
    loop {
        let remaining = active_connections.load(Ordering::SeqCst);
        if remaining == 0 || tokio::time::Instant::now() >= deadline {
            return remaining;
        }
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::server::listener::create_listener;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[tokio::test(start_paused = true)]
    async fn test_drain_gives_up_at_deadline() {
        let counter = AtomicUsize::new(2);
        assert_eq!(drain_connections(&counter, Duration::from_secs(1)).await, 2);
        counter.store(0, Ordering::SeqCst);
        assert_eq!(drain_connections(&counter, Duration::from_secs(1)).await, 0);
    }

    #[tokio::test]
    async fn test_serves_then_stops() {
        let site = tempfile::tempdir().unwrap();
        std::fs::write(site.path().join("index.html"), "hello").unwrap();

        let mut config = Config::load_from(site.path().join("absent").to_str().unwrap()).unwrap();
        config.assets.public_dir = site.path().to_string_lossy().into_owned();
        config.logging.access_log = false;
        let state = Arc::new(AppState::new(&config));

        let listener = create_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let counter = Arc::new(AtomicUsize::new(0));

        let local = tokio::task::LocalSet::new();
        local
            .run_until(async move {
                let server = tokio::task::spawn_local(start_server_loop(
                    listener,
                    Arc::clone(&state),
                    counter,
                ));

                let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
                stream
                    .write_all(b"GET / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
                    .await
                    .unwrap();
                let mut response = Vec::new();
                stream.read_to_end(&mut response).await.unwrap();
                let text = String::from_utf8_lossy(&response);
                assert!(text.starts_with("HTTP/1.1 200 OK"));
                assert!(text.ends_with("hello"));

                state.request_shutdown();
                server.await.unwrap();
            })
            .await;
    }
}
