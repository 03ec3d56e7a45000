use anyhow::Result;
use clap::Parser;
use log::info;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use netpulse::config::{DispatchMode, ModelConfig, ServerConfig};
use netpulse::sampler::SpeedModel;
use netpulse::server::HttpServer;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Serve each connection on its own thread instead of sequentially
    #[arg(long)]
    threaded: bool,

    /// Seed the measurement model for reproducible responses
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    let args = Args::parse();

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        info!("Ctrl+C received. Shutting down...");
        r.store(false, Ordering::SeqCst);
    })?;

    let config = ServerConfig {
        port: args.port,
        dispatch: if args.threaded {
            DispatchMode::PerConnection
        } else {
            DispatchMode::Serial
        },
        ..ServerConfig::default()
    };

    let model = Arc::new(SpeedModel::new(args.seed));
    let server = HttpServer::bind(config, ModelConfig::default(), model)?;

    println!();
    println!("  ╔═══════════════════════════════════════════════════════╗");
    println!("  ║              ⚡ SPEED TEST SERVER ⚡                   ║");
    println!("  ╚═══════════════════════════════════════════════════════╝");
    println!();
    println!("  🌐 Server running at: http://localhost:{}", args.port);
    println!("  📋 Press Ctrl+C to stop\n");

    server.run(running)?;

    Ok(())
}
