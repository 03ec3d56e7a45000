pub mod config;
pub mod host;
pub mod http;
pub mod router;
pub mod runner;
pub mod sampler;
pub mod series;
pub mod server;
pub mod servers;
pub mod traits;
pub mod ui;
