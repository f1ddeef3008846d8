//! Random-matrix statistics walkthrough
//!
//! Run with:
//!   cargo run --release --example demo

use numbench::DemoConfig;

fn main() -> std::io::Result<()> {
    let config = DemoConfig {
        seed: Some(2024),
        ..DemoConfig::default()
    };
    numbench::run_demo(&mut std::io::stdout().lock(), &config)?;
    Ok(())
}
