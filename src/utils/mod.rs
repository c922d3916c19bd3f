use anyhow::Result;
use tracing::Level;

use crate::core::config::{ConfigManager, ConfigProvider};
use crate::core::engine::{DemoEngine, DemoKind};

pub fn initialize_config() -> Result<()> {
    let config_manager = get_config_manager()?;
    config_manager.initialize()?;
    println!(
        "✓ Initialized {}",
        config_manager.get_config_path()?.display()
    );
    println!("Run 'pattern-gallery run --all' to play every enabled demo");
    Ok(())
}

pub fn list_demos() -> Result<()> {
    let config = get_config_manager()?.load_config()?;
    for kind in DemoKind::ALL {
        let marker = if config.demos.contains(&kind.to_string()) {
            "●"
        } else {
            "○"
        };
        println!("{marker} {kind:<16} {}", kind.summary());
    }
    Ok(())
}

/// Runs the named demos, or every enabled one when `all` is set or no name
/// was given.
pub fn run_demos(names: &[String], all: bool) -> Result<()> {
    let config_manager = get_config_manager()?;
    let mut engine = DemoEngine::new(&config_manager)?;

    if all || names.is_empty() {
        return engine.run_enabled();
    }
    for name in names {
        engine.run_named(name)?;
    }
    Ok(())
}

pub fn validate_config() -> Result<()> {
    get_config_manager()?.validate_config()
}

pub fn export_config(output: &str, format: &str) -> Result<()> {
    get_config_manager()?.export_config(output, format)?;
    println!("✓ Exported configuration to {output}");
    Ok(())
}

/// Installs the global `tracing` subscriber. `--verbose` or `verbose = true`
/// in the config turns on debug events.
pub fn init_logging(verbose: bool) {
    let config_verbose = get_config_manager()
        .and_then(|manager| manager.load_config())
        .map(|config| config.global_settings.verbose)
        .unwrap_or(false);
    let level = if verbose || config_verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// Helper function to create ConfigManager instance
fn get_config_manager() -> Result<ConfigManager> {
    ConfigManager::new()
}
