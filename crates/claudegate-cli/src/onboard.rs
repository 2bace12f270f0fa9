//! `claudegate onboard` — initialize the configuration file.
//!
//! Creates `~/.claudegate/config.json` with defaults so the provider can be
//! configured by editing the file or via environment variables.

use anyhow::Result;
use colored::Colorize;

use claudegate_core::config::{get_config_path, load_config, save_config};

/// Run the onboard command.
pub fn run() -> Result<()> {
    println!();
    println!("{}", "Claudegate — Setup".cyan().bold());
    println!();

    let config_path = get_config_path();

    if config_path.exists() {
        println!(
            "  {} config already exists at {}",
            "✓".green(),
            config_path.display()
        );
    } else {
        let config = load_config(None); // defaults + env overrides
        save_config(&config, Some(&config_path))?;
        println!(
            "  {} created config at {}",
            "✓".green(),
            config_path.display()
        );
    }

    println!();
    println!(
        "  Set your API key in the config file ({}) or via {}.",
        "provider.apiKey".bold(),
        "CLAUDEGATE_PROVIDER__API_KEY".bold()
    );
    println!(
        "{}",
        "  Setup complete! Run `claudegate status` to verify.".green()
    );
    println!();

    Ok(())
}
