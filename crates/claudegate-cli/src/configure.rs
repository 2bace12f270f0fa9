//! `claudegate configure` — edit and validate per-action settings.
//!
//! Flags are entered as strings, exactly like a settings form: an empty
//! value clears the field, omitted flags keep the stored value. Everything
//! is validated through `RawActionSettings::resolve` before anything is
//! written; on error, nothing is saved.

use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;

use claudegate_core::config::{get_config_path, load_config, save_config};
use claudegate_core::types::ActionKind;
use claudegate_provider::settings::RawActionSettings;

#[derive(Args)]
pub struct ConfigureArgs {
    /// Action to configure: generate_text, summarise_text, or explain_text.
    action: String,

    /// Model template name, or "custom" together with --custom-model.
    #[arg(long)]
    model: Option<String>,

    /// Full model name when the custom template is selected.
    #[arg(long)]
    custom_model: Option<String>,

    /// Messages API endpoint URL (empty resets to the default).
    #[arg(long)]
    endpoint: Option<String>,

    /// System instruction (empty resets to the action's built-in default).
    #[arg(long)]
    system_instruction: Option<String>,

    /// Maximum tokens to generate (empty resets to the model's default).
    #[arg(long)]
    max_tokens: Option<String>,

    /// Sampling temperature, 0.0 to 1.0 (empty unsets).
    #[arg(long)]
    temperature: Option<String>,

    /// Nucleus sampling threshold, 0.0 to 1.0 (empty unsets).
    #[arg(long)]
    top_p: Option<String>,

    /// Sample from the top K most likely tokens (empty unsets).
    #[arg(long)]
    top_k: Option<String>,

    /// Extra request parameters as a JSON object (empty unsets).
    #[arg(long)]
    extra_params: Option<String>,
}

/// Run the configure command.
pub fn run(args: ConfigureArgs) -> Result<()> {
    let Some(kind) = parse_kind(&args.action) else {
        bail!(
            "Unknown action '{}'. Expected one of: generate_text, summarise_text, explain_text",
            args.action
        );
    };

    let mut config = load_config(None);
    let raw = apply_overrides(
        RawActionSettings::from_settings(config.actions.get(kind)),
        &args,
    );

    let settings = match raw.resolve() {
        Ok(settings) => settings,
        Err(errors) => {
            eprintln!("{}", "Invalid settings, nothing saved:".red().bold());
            for error in &errors {
                eprintln!("  {} {}", "✗".red(), error);
            }
            std::process::exit(1);
        }
    };

    *config.actions.get_mut(kind) = settings;
    save_config(&config, None)?;

    println!(
        "  {} updated {} settings in {}",
        "✓".green(),
        kind.as_str(),
        get_config_path().display()
    );
    Ok(())
}

/// Resolve an action name as entered on the command line.
fn parse_kind(name: &str) -> Option<ActionKind> {
    ActionKind::all()
        .iter()
        .copied()
        .find(|kind| kind.as_str() == name)
}

/// Overlay the provided flags on the stored raw settings.
fn apply_overrides(mut raw: RawActionSettings, args: &ConfigureArgs) -> RawActionSettings {
    if let Some(ref v) = args.model {
        raw.model_template = v.clone();
    }
    if let Some(ref v) = args.custom_model {
        raw.custom_model = v.clone();
    }
    if let Some(ref v) = args.endpoint {
        raw.endpoint = v.clone();
    }
    if let Some(ref v) = args.system_instruction {
        raw.system_instruction = v.clone();
    }
    if let Some(ref v) = args.max_tokens {
        raw.max_tokens = v.clone();
    }
    if let Some(ref v) = args.temperature {
        raw.temperature = v.clone();
    }
    if let Some(ref v) = args.top_p {
        raw.top_p = v.clone();
    }
    if let Some(ref v) = args.top_k {
        raw.top_k = v.clone();
    }
    if let Some(ref v) = args.extra_params {
        raw.extra_params = v.clone();
    }
    raw
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use claudegate_core::config::ActionSettings;

    fn no_overrides(action: &str) -> ConfigureArgs {
        ConfigureArgs {
            action: action.to_string(),
            model: None,
            custom_model: None,
            endpoint: None,
            system_instruction: None,
            max_tokens: None,
            temperature: None,
            top_p: None,
            top_k: None,
            extra_params: None,
        }
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!(parse_kind("summarise_text"), Some(ActionKind::SummariseText));
        assert_eq!(parse_kind("explain_text"), Some(ActionKind::ExplainText));
        assert_eq!(parse_kind("translate"), None);
    }

    #[test]
    fn test_omitted_flags_keep_stored_values() {
        let stored = ActionSettings {
            temperature: Some(0.3),
            ..Default::default()
        };
        let raw = apply_overrides(
            RawActionSettings::from_settings(&stored),
            &no_overrides("generate_text"),
        );

        let resolved = raw.resolve().unwrap();
        assert_eq!(resolved, stored);
    }

    #[test]
    fn test_override_replaces_field() {
        let mut args = no_overrides("generate_text");
        args.temperature = Some("0.9".to_string());

        let raw = apply_overrides(
            RawActionSettings::from_settings(&ActionSettings::default()),
            &args,
        );

        assert_eq!(raw.resolve().unwrap().temperature, Some(0.9));
    }

    #[test]
    fn test_empty_flag_clears_field() {
        let stored = ActionSettings {
            temperature: Some(0.3),
            ..Default::default()
        };
        let mut args = no_overrides("generate_text");
        args.temperature = Some(String::new());

        let raw = apply_overrides(RawActionSettings::from_settings(&stored), &args);

        assert_eq!(raw.resolve().unwrap().temperature, None);
    }

    #[test]
    fn test_invalid_entry_is_rejected() {
        let mut args = no_overrides("generate_text");
        args.model = Some("gpt-4o".to_string());
        args.temperature = Some("7.0".to_string());

        let raw = apply_overrides(
            RawActionSettings::from_settings(&ActionSettings::default()),
            &args,
        );

        let errors = raw.resolve().unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_custom_model_entry() {
        let mut args = no_overrides("generate_text");
        args.model = Some("custom".to_string());
        args.custom_model = Some("claude-opus-5-20260101".to_string());

        let raw = apply_overrides(
            RawActionSettings::from_settings(&ActionSettings::default()),
            &args,
        );

        let resolved = raw.resolve().unwrap();
        assert_eq!(resolved.model, "claude-opus-5-20260101");
        // Everything else keeps its default
        assert_eq!(resolved.endpoint, ActionSettings::default().endpoint);
    }
}
