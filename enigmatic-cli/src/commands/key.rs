use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use enigmatic_core::{Machine, Settings};
use serde::Serialize;

use super::helpers::load_key;
use super::Context;
use crate::output::{print_info, print_json, print_success};

#[derive(Subcommand)]
pub enum KeyCommand {
    /// Check that a key file loads
    Validate {
        /// Key file
        file: PathBuf,
    },
    /// Show the settings stored in a key file
    Show {
        /// Key file
        file: PathBuf,
    },
    /// Encrypt and decrypt sample text with a key file
    Test {
        /// Key file
        file: PathBuf,
        /// Sample text; symbols outside the key's alphabet are dropped
        #[arg(short, long, default_value = "Hello World")]
        text: String,
    },
}

#[derive(Debug, Serialize)]
struct Summary {
    alphabet_size: usize,
    rotors: usize,
    plugboard_pairs: usize,
    positions: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    created_at: Option<String>,
}

impl Summary {
    fn new(machine: &Machine, settings: &Settings) -> Self {
        let metadata = settings.metadata.as_ref();
        Self {
            alphabet_size: machine.alphabet_size(),
            rotors: machine.rotor_count(),
            plugboard_pairs: machine.plugboard_pair_count(),
            positions: machine.current_rotor_positions(),
            description: metadata.and_then(|m| m.description.clone()),
            created_at: metadata.and_then(|m| m.created_at.clone()),
        }
    }

    fn print(&self) {
        println!("  {}: {}", "alphabet size".dimmed(), self.alphabet_size);
        println!("  {}: {}", "rotors".dimmed(), self.rotors);
        println!("  {}: {}", "plugboard pairs".dimmed(), self.plugboard_pairs);
        println!("  {}: {:?}", "positions".dimmed(), self.positions);
        if let Some(ref description) = self.description {
            println!("  {}: {}", "description".dimmed(), description);
        }
        if let Some(ref created_at) = self.created_at {
            println!("  {}: {}", "created".dimmed(), created_at);
        }
    }
}

pub fn run(action: KeyCommand, ctx: &Context) -> Result<()> {
    match action {
        KeyCommand::Validate { file } => validate(&file, ctx),
        KeyCommand::Show { file } => show(&file, ctx),
        KeyCommand::Test { file, text } => test(&file, &text, ctx),
    }
}

fn load_with_settings(path: &Path) -> Result<(Machine, Settings)> {
    let machine = load_key(path)?;
    let json = std::fs::read_to_string(path)?;
    Ok((machine, Settings::from_json(&json)?))
}

fn validate(path: &Path, ctx: &Context) -> Result<()> {
    let machine = load_key(path)?;

    if ctx.json_output {
        #[derive(Serialize)]
        struct Output {
            valid: bool,
            rotors: usize,
            alphabet_size: usize,
        }
        return print_json(&Output {
            valid: true,
            rotors: machine.rotor_count(),
            alphabet_size: machine.alphabet_size(),
        });
    }

    print_success(format!(
        "{} is valid ({} rotors, {} symbols)",
        path.display(),
        machine.rotor_count(),
        machine.alphabet_size()
    ));
    Ok(())
}

fn show(path: &Path, ctx: &Context) -> Result<()> {
    let (machine, settings) = load_with_settings(path)?;

    if ctx.json_output {
        return print_json(&settings);
    }

    println!("{} {}", "Key file:".bold(), path.display());
    Summary::new(&machine, &settings).print();

    if ctx.verbose {
        println!("  {}: {}", "alphabet".dimmed(), settings.alphabet);
        for spec in &settings.rotor_specs {
            let notches: String = spec.notches.iter().collect();
            println!(
                "    {} {} {}",
                spec.id.cyan(),
                spec.forward_mapping,
                format!("notches={notches} ring={}", spec.ring_setting).bright_black()
            );
        }
        println!(
            "    {} {}",
            settings.reflector_spec.id.cyan(),
            settings.reflector_spec.mapping
        );
        let pairs: Vec<String> = settings
            .plugboard_pairs
            .iter()
            .filter(|(a, b)| a < b)
            .map(|(a, b)| format!("{a}{b}"))
            .collect();
        println!("  {}: {}", "plugboard".dimmed(), pairs.join(" "));
    }

    Ok(())
}

/// Keep only the symbols `machine` can encrypt, upper-casing when that keeps more
fn sample_for(machine: &Machine, text: &str) -> String {
    let alphabet = machine.alphabet();
    let as_is: String = text.chars().filter(|&c| alphabet.contains(c)).collect();
    let upper: String = text
        .to_uppercase()
        .chars()
        .filter(|&c| alphabet.contains(c))
        .collect();
    if upper.chars().count() > as_is.chars().count() {
        upper
    } else {
        as_is
    }
}

fn test(path: &Path, text: &str, ctx: &Context) -> Result<()> {
    let (mut machine, settings) = load_with_settings(path)?;
    let sample = sample_for(&machine, text);
    if sample.is_empty() {
        anyhow::bail!("None of the sample text is in this key's alphabet; pass --text");
    }

    let ciphertext = machine.encrypt(&sample)?;
    machine.reset();
    let roundtrip = machine.decrypt(&ciphertext)?;
    let ok = roundtrip == sample;
    machine.reset();
    tracing::debug!(symbols = sample.chars().count(), ok, "key round trip");

    if ctx.json_output {
        #[derive(Serialize)]
        struct Output {
            sample: String,
            ciphertext: String,
            roundtrip_ok: bool,
            #[serde(flatten)]
            summary: Summary,
        }
        print_json(&Output {
            sample: sample.clone(),
            ciphertext,
            roundtrip_ok: ok,
            summary: Summary::new(&machine, &settings),
        })?;
    } else {
        println!("{} {}", "Key file:".bold(), path.display());
        Summary::new(&machine, &settings).print();
        print_info(format!("{sample} → {ciphertext}"));
    }

    if !ok {
        anyhow::bail!("Round trip failed: decrypted '{roundtrip}', expected '{sample}'");
    }
    if !ctx.json_output {
        print_success("Round trip succeeded");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_context;
    use enigmatic_core::historical;

    fn write_m3(dir: &Path) -> PathBuf {
        let path = dir.join("m3.json");
        std::fs::write(&path, historical::enigma_m3().unwrap().to_json().unwrap()).unwrap();
        path
    }

    #[test]
    fn test_validate_good_and_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path());
        let good = write_m3(dir.path());
        assert!(validate(&good, &ctx).is_ok());

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{ not json").unwrap();
        assert!(validate(&bad, &ctx).is_err());
        assert!(validate(&dir.path().join("missing.json"), &ctx).is_err());
    }

    #[test]
    fn test_sample_is_restricted_to_alphabet() {
        let m3 = historical::enigma_m3().unwrap();
        assert_eq!(sample_for(&m3, "Hello World"), "HELLOWORLD");
        assert_eq!(sample_for(&m3, "ABC 123"), "ABC");
    }

    #[test]
    fn test_key_test_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path());
        let path = write_m3(dir.path());
        assert!(test(&path, "Hello World", &ctx).is_ok());
        assert!(test(&path, "12345", &ctx).is_err());
        assert!(show(&path, &ctx).is_ok());
    }
}
