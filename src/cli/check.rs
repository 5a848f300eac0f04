use std::path::Path;

use crate::config::Config;
use crate::error::Result;

/// Validate configuration file without serving anything.
pub fn execute_config<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    println!("Checking configuration: {}", path.display());
    println!();

    let config = Config::load(path)?;

    println!("✓ Configuration file is valid");
    println!();
    println!("Summary:");
    println!("  Model: {}", config.miner.model);
    println!("  Max tokens: {}", config.miner.max_tokens);
    println!("  Temperature: {}", config.miner.temperature);
    println!("  Telemetry: {}", config.telemetry.enabled);
    println!(
        "  Stop on forward exception: {}",
        config.miner.stop_on_forward_exception
    );
    println!();

    if std::env::var("OPENAI_API_KEY").is_ok() {
        println!("✓ API key found (from OPENAI_API_KEY env var)");
    } else {
        println!("⚠ No API key configured");
        println!("  Set the OPENAI_API_KEY environment variable to serve requests");
    }

    println!();
    println!("Configuration is ready to use.");

    Ok(())
}
