//! Minimal HTTP delivery surface for the synthetic measurement API.
//!
//! # Protocol
//!
//! One TCP connection carries exactly one exchange: a single bounded read,
//! one routed response, close. There is no keep-alive, no partial-read
//! handling, and no status code other than 200 (see `http`).
//!
//! | Marker | Response |
//! |---|---|
//! | `GET` + `/api/servers`  | JSON fixture list (8 entries) |
//! | `GET` + `/api/info`     | `{ip, server, location, isp}` |
//! | `GET` + `/api/ping`     | `{ping, jitter}` |
//! | `GET` + `/api/download` | `{speed}` |
//! | `GET` + `/api/upload`   | `{speed}` |
//! | anything else           | embedded HTML page |
//!
//! Dispatch is serial by default: a connection is fully served before the
//! next accept. `DispatchMode::PerConnection` opts into one worker thread
//! per connection; the sampler is mutex-guarded so both modes share it.

use crate::config::{DispatchMode, ModelConfig, ServerConfig};
use crate::host;
use crate::http;
use crate::router::{route, Route};
use crate::sampler::SpeedModel;
use crate::servers::SERVER_LIST;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde_json::json;
use socket2::{Domain, Protocol, Socket, Type};
use std::io::{Read, Write};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Idle sleep between accept polls while the running flag is set.
const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// The presentation asset served for all non-API traffic.
const INDEX_PAGE: &str = include_str!("../assets/index.html");

/// Everything a connection handler needs, shared with worker threads.
struct ServerState {
    model: Arc<SpeedModel>,
    models: ModelConfig,
    read_buffer: usize,
}

pub struct HttpServer {
    listener: TcpListener,
    dispatch: DispatchMode,
    state: Arc<ServerState>,
}

impl HttpServer {
    /// Create the listening socket: address reuse, bind, listen.
    /// Any failure here is fatal for the process.
    pub fn bind(config: ServerConfig, models: ModelConfig, model: Arc<SpeedModel>) -> Result<Self> {
        let socket = Socket::new(Domain::IPV4, Type::STREAM, Some(Protocol::TCP))
            .context("Failed to create socket")?;
        socket.set_reuse_address(true)?;

        let addr = SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, config.port);
        socket
            .bind(&addr.into())
            .with_context(|| format!("Failed to bind to port {}", config.port))?;
        socket
            .listen(config.backlog)
            .context("Failed to listen")?;

        let listener: TcpListener = socket.into();
        // Polled under the running flag so ctrl-c can stop the loop.
        listener.set_nonblocking(true)?;

        info!(
            "[Server] Listening on http://localhost:{}",
            listener.local_addr()?.port()
        );

        Ok(HttpServer {
            listener,
            dispatch: config.dispatch,
            state: Arc::new(ServerState {
                model,
                models,
                read_buffer: config.read_buffer,
            }),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept loop. In `Serial` mode each connection is fully served before
    /// the next accept; `PerConnection` hands the stream to a worker thread.
    pub fn run(&self, running: Arc<AtomicBool>) -> Result<()> {
        while running.load(Ordering::SeqCst) {
            match self.listener.accept() {
                Ok((stream, peer)) => {
                    debug!("[Server] Connection from {}", peer);
                    match self.dispatch {
                        DispatchMode::Serial => handle_client(stream, &self.state),
                        DispatchMode::PerConnection => {
                            let state = Arc::clone(&self.state);
                            thread::spawn(move || handle_client(stream, &state));
                        }
                    }
                }
                Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(ACCEPT_POLL_INTERVAL);
                }
                Err(e) => {
                    warn!("[Server] Accept error: {}", e);
                }
            }
        }

        info!("[Server] Shutting down.");
        Ok(())
    }
}

/// Serve one connection: a single bounded read, one response, close.
/// A zero-byte or failed read drops the connection with no response.
fn handle_client(mut stream: TcpStream, state: &ServerState) {
    // The accepted stream inherits non-blocking from the listener.
    if let Err(e) = stream.set_nonblocking(false) {
        debug!("[Server] Failed to reset stream mode: {}", e);
        return;
    }

    let mut buf = vec![0u8; state.read_buffer];
    let n = match stream.read(&mut buf) {
        Ok(0) => {
            debug!("[Server] Empty read, dropping connection");
            return;
        }
        Ok(n) => n,
        Err(e) => {
            debug!("[Server] Read failed: {}", e);
            return;
        }
    };

    let request = String::from_utf8_lossy(&buf[..n]);
    let response = respond(route(&request), state);

    if let Err(e) = stream.write_all(&response) {
        debug!("[Server] Write failed: {}", e);
    }
}

fn respond(handler: Route, state: &ServerState) -> Vec<u8> {
    let models = &state.models;
    match handler {
        Route::Servers => {
            let body =
                serde_json::to_string(SERVER_LIST).unwrap_or_else(|_| "[]".to_string());
            http::json_response(&body)
        }
        Route::Info => {
            // Regenerated per request; nothing is cached across connections.
            let info = host::detect();
            let body = json!({
                "ip": info.ip_address,
                "server": info.server_name,
                "location": info.location,
                "isp": info.isp,
            });
            http::json_response(&body.to_string())
        }
        Route::Ping => {
            let ping = state.model.sample(models.api_ping.base, models.api_ping.variance);
            let jitter = state
                .model
                .sample(models.api_jitter.base, models.api_jitter.variance);
            http::json_response(&json!({ "ping": ping, "jitter": jitter }).to_string())
        }
        Route::Download => {
            let speed = state
                .model
                .sample(models.api_download.base, models.api_download.variance);
            http::json_response(&json!({ "speed": speed }).to_string())
        }
        Route::Upload => {
            let speed = state
                .model
                .sample(models.api_upload.base, models.api_upload.variance);
            http::json_response(&json!({ "speed": speed }).to_string())
        }
        Route::Index => http::opaque_response(INDEX_PAGE.as_bytes(), "text/html"),
    }
}
