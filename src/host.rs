//! Host environment discovery: where is this machine, what is its public IP.
//!
//! Both lookups shell out to external tools and are best-effort only. Any
//! failure substitutes a fixed fallback value so the rest of the system
//! never sees an error from here.

use log::debug;
use serde::Serialize;
use std::process::Command;

pub const FALLBACK_IP: &str = "127.0.0.1";
pub const FALLBACK_SERVER_NAME: &str = "Local Server";
pub const LOCATION: &str = "Local Network";
pub const ISP: &str = "Development Environment";

/// Display-only identity of the "server" we are testing against.
/// Immutable once captured; the HTTP front end regenerates it per request
/// instead of caching.
#[derive(Debug, Clone, Serialize)]
pub struct ServerInfo {
    pub server_name: String,
    pub location: String,
    pub isp: String,
    pub ip_address: String,
}

impl ServerInfo {
    pub fn fallback() -> Self {
        ServerInfo {
            server_name: FALLBACK_SERVER_NAME.to_string(),
            location: LOCATION.to_string(),
            isp: ISP.to_string(),
            ip_address: FALLBACK_IP.to_string(),
        }
    }
}

/// Capture the host environment, substituting fallbacks on any failure.
pub fn detect() -> ServerInfo {
    ServerInfo {
        server_name: hostname().unwrap_or_else(|| FALLBACK_SERVER_NAME.to_string()),
        location: LOCATION.to_string(),
        isp: ISP.to_string(),
        ip_address: public_ip().unwrap_or_else(|| FALLBACK_IP.to_string()),
    }
}

/// Public IP via an external lookup. None on any failure; the timeout keeps
/// a dead network from stalling session start.
fn public_ip() -> Option<String> {
    run_trimmed("curl", &["-s", "--max-time", "2", "ifconfig.me"])
}

/// Local hostname. None on any failure.
fn hostname() -> Option<String> {
    run_trimmed("hostname", &[])
}

fn run_trimmed(program: &str, args: &[&str]) -> Option<String> {
    let output = match Command::new(program).args(args).output() {
        Ok(o) => o,
        Err(e) => {
            debug!("[Host] {} unavailable: {}", program, e);
            return None;
        }
    };

    if !output.status.success() {
        debug!("[Host] {} exited with {}", program, output.status);
        return None;
    }

    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
