//! Terminal presentation: carriage-return redraws, progress bar, spinner,
//! and the framed header/result boxes.

use crate::host::ServerInfo;
use crate::runner::SpeedResult;
use crate::traits::ProgressSink;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

const BAR_WIDTH: usize = 30;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Render one progress bar frame; `speed` below zero hides the figure.
pub fn render_bar(label: &str, progress: f64, speed: f64) -> String {
    let filled = (progress * BAR_WIDTH as f64) as usize;

    let mut bar = String::new();
    for i in 0..BAR_WIDTH {
        if i < filled {
            bar.push('█');
        } else if i == filled {
            bar.push('▓');
        } else {
            bar.push('░');
        }
    }

    let mut line = format!("\r  {:<12} [{}] {:>3.0}%", label, bar, progress * 100.0);
    if speed >= 0.0 {
        line.push_str(&format!("  {:.2} Mbps", speed));
    }
    line.push_str("   ");
    line
}

fn flush() {
    let _ = io::stdout().flush();
}

pub fn clear_line() {
    print!("\r{}\r", " ".repeat(70));
    flush();
}

/// Replace the animated bar with the settled figure.
pub fn complete_line(label: &str, final_value: f64, unit: &str) {
    println!("\r  {:<12} {:.2} {}{}", label, final_value, unit, " ".repeat(30));
}

pub struct Spinner {
    frame: usize,
}

impl Spinner {
    pub fn new() -> Self {
        Spinner { frame: 0 }
    }

    pub fn spin(&mut self, message: &str) {
        print!("\r  {} {}", SPINNER_FRAMES[self.frame % SPINNER_FRAMES.len()], message);
        flush();
        self.frame += 1;
    }

    pub fn stop(&mut self) {
        print!("\r{}\r", " ".repeat(60));
        flush();
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}

/// Progress sink that redraws a labelled bar and paces the animation with a
/// fixed sleep per step.
pub struct TerminalSink {
    label: String,
    step_delay: Duration,
}

impl TerminalSink {
    pub fn new(label: &str, step_delay: Duration) -> Self {
        TerminalSink {
            label: label.to_string(),
            step_delay,
        }
    }
}

impl ProgressSink for TerminalSink {
    fn report(&mut self, progress: f64, value: f64) {
        print!("{}", render_bar(&self.label, progress, value));
        flush();
        if !self.step_delay.is_zero() {
            thread::sleep(self.step_delay);
        }
    }
}

/// Spinner-driven sink for the ping stage.
pub struct SpinnerSink {
    spinner: Spinner,
    message: String,
    step_delay: Duration,
}

impl SpinnerSink {
    pub fn new(message: &str, step_delay: Duration) -> Self {
        SpinnerSink {
            spinner: Spinner::new(),
            message: message.to_string(),
            step_delay,
        }
    }

    pub fn finish(&mut self) {
        self.spinner.stop();
    }
}

impl ProgressSink for SpinnerSink {
    fn report(&mut self, _progress: f64, _value: f64) {
        self.spinner.spin(&self.message);
        if !self.step_delay.is_zero() {
            thread::sleep(self.step_delay);
        }
    }
}

pub fn print_header() {
    println!(
        r"
   ╔═══════════════════════════════════════════════════════╗
   ║                                                       ║
   ║              ⚡ SPEED TEST ⚡                          ║
   ║                                                       ║
   ╚═══════════════════════════════════════════════════════╝
"
    );
}

pub fn print_server_info(info: &ServerInfo) {
    println!("\n   ┌─────────────────────────────────────────────────────┐");
    println!("   │  SERVER INFO                                        │");
    println!("   ├─────────────────────────────────────────────────────┤");
    println!("   │  Server:   {:<40} │", info.server_name);
    println!("   │  Location: {:<40} │", info.location);
    println!("   │  ISP:      {:<40} │", info.isp);
    println!("   │  IP:       {:<40} │", info.ip_address);
    println!("   └─────────────────────────────────────────────────────┘\n");
}

pub fn print_result(result: &SpeedResult) {
    println!(
        r"
   ┌─────────────────────────────────────────────────────┐
   │                    RESULTS                          │
   ├─────────────────────────────────────────────────────┤"
    );
    println!("   │  PING      {:>8.2} ms                               │", result.ping_ms);
    println!("   │  JITTER    {:>8.2} ms                               │", result.jitter_ms);
    println!("   ├─────────────────────────────────────────────────────┤");
    println!("   │  ↓ DOWNLOAD {:>7.2} Mbps                            │", result.download_mbps);
    println!("   │  ↑ UPLOAD   {:>7.2} Mbps                            │", result.upload_mbps);
    println!("   └─────────────────────────────────────────────────────┘\n");
}
