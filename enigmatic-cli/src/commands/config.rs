use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use enigmatic_core::{alphabets, SecurityLevel};

use super::helpers::Format;
use super::Context;
use crate::output::{print_json, print_success};

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },
}

pub fn run(action: ConfigCommand, ctx: &Context) -> Result<()> {
    match action {
        ConfigCommand::Show => show(ctx),
        ConfigCommand::Set { key, value } => set(key, value, ctx),
    }
}

fn show(ctx: &Context) -> Result<()> {
    let config = ctx.config()?;

    if ctx.json_output {
        return print_json(&config);
    }

    println!("{}", "Configuration:".bold());
    println!(
        "  {}: {}",
        "default_security".dimmed(),
        config.default_security.as_deref().unwrap_or("medium")
    );
    println!("    {}", "Valid: low, medium, high, extreme".bright_black());

    println!(
        "  {}: {}",
        "default_alphabet".dimmed(),
        config.default_alphabet.as_deref().unwrap_or("latin")
    );
    let names: Vec<&str> = alphabets::NAMED.iter().map(|(name, _)| *name).collect();
    println!("    {}", format!("Valid: {}", names.join(", ")).bright_black());

    println!(
        "  {}: {}",
        "output_format".dimmed(),
        config.output_format.as_deref().unwrap_or("text")
    );
    println!("    {}", "Valid: text, hex, base64".bright_black());

    println!();
    println!("{}", "To set a value:".dimmed());
    println!("  enigmatic config set <key> <value>");

    Ok(())
}

fn set(key: String, value: String, ctx: &Context) -> Result<()> {
    use clap::ValueEnum;

    let mut config = ctx.config()?;
    let value = value.trim().to_lowercase();

    match key.as_str() {
        "default_security" => {
            value.parse::<SecurityLevel>()?;
            config.default_security = Some(value.clone());
        }
        "default_alphabet" => {
            alphabets::by_name(&value)?;
            config.default_alphabet = Some(value.clone());
        }
        "output_format" => {
            if Format::from_str(&value, true).is_err() {
                anyhow::bail!("Invalid output_format '{value}'. Valid values: text, hex, base64");
            }
            config.output_format = Some(value.clone());
        }
        _ => {
            anyhow::bail!(
                "Unknown config key '{key}'.\n\n\
                Valid keys:\n  \
                  default_security    (low, medium, high, extreme)\n  \
                  default_alphabet    (e.g., latin, greek, ascii)\n  \
                  output_format       (text, hex or base64)"
            );
        }
    }

    config.save(ctx.config_path.as_deref())?;

    print_success(format!("Set {key} = {value}"));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_persists_and_validates() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = crate::commands::test_context(dir.path());

        set("default_security".into(), "HIGH".into(), &ctx).unwrap();
        set("default_alphabet".into(), "cyrillic".into(), &ctx).unwrap();
        set("output_format".into(), "hex".into(), &ctx).unwrap();

        let config = ctx.config().unwrap();
        assert_eq!(config.default_security.as_deref(), Some("high"));
        assert_eq!(config.default_alphabet.as_deref(), Some("cyrillic"));
        assert_eq!(config.output_format.as_deref(), Some("hex"));

        assert!(set("default_security".into(), "paranoid".into(), &ctx).is_err());
        assert!(set("default_alphabet".into(), "klingon".into(), &ctx).is_err());
        assert!(set("output_format".into(), "morse".into(), &ctx).is_err());
        assert!(set("server".into(), "x".into(), &ctx).is_err());
        assert!(show(&ctx).is_ok());
    }
}
