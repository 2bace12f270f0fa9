//! `claudegate status` — show configuration and provider status.

use anyhow::Result;
use colored::Colorize;

use claudegate_core::config::{get_config_path, load_config};
use claudegate_core::types::ActionKind;
use claudegate_provider::models;

/// Run the status command.
pub fn run() -> Result<()> {
    let config = load_config(None);
    let config_path = get_config_path();

    println!();
    println!("{}", "Claudegate Status".cyan().bold());
    println!();

    // Config
    let config_exists = config_path.exists();
    println!(
        "  {:<18} {} {}",
        "Config:".bold(),
        config_path.display(),
        if config_exists {
            "✓".green().to_string()
        } else {
            "(not found)".red().to_string()
        }
    );

    // API key
    let key_status = if config.provider.is_configured() {
        format!("{} (key set)", "✓".green())
    } else {
        format!("{}", "· not configured".dimmed())
    };
    println!("  {:<18} {}", "API key:".bold(), key_status);

    // Rate limits
    println!(
        "  {:<18} user: {} | global: {}",
        "Rate limits:".bold(),
        limit_status(
            config.provider.enable_user_rate_limit,
            config.provider.user_rate_limit
        ),
        limit_status(
            config.provider.enable_global_rate_limit,
            config.provider.global_rate_limit
        ),
    );

    // Actions
    println!();
    println!("  {}", "Actions:".bold());
    for kind in ActionKind::all() {
        let settings = config.actions.get(*kind);
        let model = match models::find_by_name(&settings.model) {
            Some(spec) => format!(
                "{} {}",
                spec.display_name,
                format!("({})", spec.name).dimmed()
            ),
            None => format!("{} {}", settings.model, "(custom)".dimmed()),
        };
        println!(
            "    {:<18} {} {}",
            kind.as_str(),
            model,
            format!("max_tokens: {}", settings.max_tokens).dimmed()
        );
    }

    println!();

    Ok(())
}

/// Render one rate limit as "N/hour" or "off".
fn limit_status(enabled: bool, limit: u32) -> String {
    if enabled {
        format!("{}/hour", limit).green().to_string()
    } else {
        "off".dimmed().to_string()
    }
}
