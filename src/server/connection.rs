// Connection handling module
// Accepts a single TCP connection and serves it on the local task set

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// One slot in the active-connection count, released on drop
///
/// Dropping also runs when the connection task unwinds or is cancelled.
pub struct ConnectionGuard {
    counter: Arc<AtomicUsize>,
}

impl ConnectionGuard {
    /// Take a slot, or return the count already in use when `limit` is reached
    pub fn acquire(counter: &Arc<AtomicUsize>, limit: Option<u64>) -> Result<Self, usize> {
        // Increment first, then check, so concurrent accepts cannot both slip under the limit
        let prev_count = counter.fetch_add(1, Ordering::SeqCst);
        let guard = Self {
            counter: Arc::clone(counter),
        };
        match limit {
            Some(max) if prev_count >= usize::try_from(max).unwrap_or(usize::MAX) => {
                drop(guard);
                Err(prev_count)
            }
            _ => Ok(guard),
        }
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Accept a connection unless `max_connections` is reached.
///
/// Returns false when the connection was rejected.
pub fn accept_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    state: &Arc<AppState>,
    conn_counter: &Arc<AtomicUsize>,
) -> bool {
    let max_conn = state.config.performance.max_connections;
    let guard = match ConnectionGuard::acquire(conn_counter, max_conn) {
        Ok(guard) => guard,
        Err(in_use) => {
            logger::log_warning(&format!(
                "Max connections reached: {in_use}/{}. Connection from {peer_addr} rejected.",
                max_conn.unwrap_or_default()
            ));
            drop(stream);
            return false;
        }
    };

    logger::log_connection_accepted(&peer_addr);
    handle_connection(stream, peer_addr, Arc::clone(state), guard);
    true
}

/// Serve one connection with HTTP/1.1 in a spawned local task
fn handle_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
    guard: ConnectionGuard,
) {
    tokio::task::spawn_local(async move {
        let _guard = guard;
        let io = TokioIo::new(stream);

        let performance = &state.config.performance;
        let timeout_duration = Duration::from_secs(std::cmp::max(
            performance.read_timeout,
            performance.write_timeout,
        ));

        let mut builder = http1::Builder::new();
        builder.keep_alive(performance.keep_alive_timeout > 0);

        let service_state = Arc::clone(&state);
        let conn = builder.serve_connection(
            io,
            service_fn(move |req| {
                handler::handle_request(req, Arc::clone(&service_state), Some(peer_addr))
            }),
        );

        match tokio::time::timeout(timeout_duration, conn).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => logger::log_connection_error(&err),
            Err(_) => {
                logger::log_warning(&format!(
                    "Connection from {peer_addr} timed out after {} seconds",
                    timeout_duration.as_secs()
                ));
            }
        }
    });
}
