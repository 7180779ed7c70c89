//! # Hummingbird Runner
//!
//! Runs headless episodes in a procedurally built arena and logs per-episode
//! nectar and reward. Set `RUST_LOG=debug` for per-episode spawn details.

mod app;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let args = app::Args::parse();
    app::run(&args)
}
