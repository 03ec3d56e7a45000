use anyhow::Result;
use clap::Parser;

use netpulse::config::{ModelConfig, UiConfig};
use netpulse::runner::SpeedTest;
use netpulse::ui;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed the measurement model for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Skip the animation delays (useful for scripting)
    #[arg(long)]
    fast: bool,
}

fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    let args = Args::parse();

    let ui_config = if args.fast {
        UiConfig {
            step_delay_ms: 0,
            ping_delay_ms: 0,
        }
    } else {
        UiConfig::default()
    };

    ui::print_header();
    println!("  Connecting to server...\n");

    let test = SpeedTest::new(ModelConfig::default(), ui_config, args.seed);
    let result = test.run_full_test();

    ui::print_result(&result);

    Ok(())
}
