use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use enigmatic_core::{alphabets, historical, Machine, RandomSource, SecurityLevel};
use serde::Serialize;

use super::helpers::{key_metadata, write_output};
use super::Context;
use crate::output::{print_json, print_success};

#[derive(Subcommand)]
pub enum PresetCommand {
    /// List available presets
    List,
    /// Describe a preset in detail
    Describe {
        /// Preset name, or "all"
        name: String,
    },
    /// Generate a key file from a preset
    Export {
        /// Preset name
        name: String,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Serialize)]
pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    pub use_case: &'static str,
    /// `None` for historical machines with fixed wiring
    pub security: Option<SecurityLevel>,
    pub alphabet: &'static str,
    pub notes: &'static str,
}

impl Preset {
    /// Fixed presets decrypt without a key file
    pub fn is_fixed(&self) -> bool {
        self.security.is_none()
    }

    pub fn build<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<Machine> {
        let machine = match self.name {
            "m3" => historical::enigma_m3()?,
            "m4" => historical::enigma_m4()?,
            "classic" => Machine::classic(rng)?,
            "simple" => {
                let symbols: Vec<char> = alphabets::LATIN_UPPER.chars().collect();
                Machine::simple(&symbols, rng)?
            }
            _ => {
                let level = self.security.unwrap_or_default();
                let alphabet = alphabets::by_name(self.alphabet)?;
                Machine::builder()
                    .alphabet(alphabet.symbols())?
                    .random_settings(level, rng)?
                    .build()?
            }
        };
        tracing::debug!(preset = self.name, rotors = machine.rotor_count(), "built preset");
        Ok(machine)
    }
}

pub const PRESETS: &[Preset] = &[
    Preset {
        name: "classic",
        description: "Historical-size Enigma with random wiring",
        use_case: "Educational, historical simulation",
        security: Some(SecurityLevel::Low),
        alphabet: "latin",
        notes: "Three rotors and two plugboard pairs, like an early Wehrmacht machine",
    },
    Preset {
        name: "simple",
        description: "Basic Enigma with standard settings",
        use_case: "General purpose, moderate security",
        security: Some(SecurityLevel::Medium),
        alphabet: "latin",
        notes: "Good balance of security and performance",
    },
    Preset {
        name: "high",
        description: "High-security configuration",
        use_case: "Sensitive data, strong obfuscation",
        security: Some(SecurityLevel::High),
        alphabet: "latin",
        notes: "Plugboard pairs are capped at 13 by the 26-letter alphabet",
    },
    Preset {
        name: "extreme",
        description: "Maximum security configuration",
        use_case: "Maximum complexity, research",
        security: Some(SecurityLevel::Extreme),
        alphabet: "latin",
        notes: "Extremely large keyspace, slower but most secure",
    },
    Preset {
        name: "m3",
        description: "Enigma I / M3: rotors I-II-III, reflector B, positions AAA",
        use_case: "Reproducing historical known-answer traffic",
        security: None,
        alphabet: "latin",
        notes: "Fixed wiring; adjust the start with --positions",
    },
    Preset {
        name: "m4",
        description: "Naval M4: Beta-I-II-III, thin reflector B, positions AAAA",
        use_case: "Reproducing four-rotor naval traffic",
        security: None,
        alphabet: "latin",
        notes: "Fixed wiring; the Beta rotor sits leftmost",
    },
];

pub fn find(name: &str) -> Result<&'static Preset> {
    PRESETS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| {
            let names: Vec<&str> = PRESETS.iter().map(|p| p.name).collect();
            anyhow::anyhow!("Unknown preset '{name}'. Valid presets: {}", names.join(", "))
        })
}

pub fn run(action: PresetCommand, ctx: &Context) -> Result<()> {
    match action {
        PresetCommand::List => list(ctx),
        PresetCommand::Describe { name } => describe(&name, ctx),
        PresetCommand::Export { name, output } => export(&name, output, ctx),
    }
}

fn list(ctx: &Context) -> Result<()> {
    if ctx.json_output {
        return print_json(&PRESETS);
    }

    println!("{}", "Available presets:".bold());
    for preset in PRESETS {
        println!("  {:<10} {}", preset.name.cyan(), preset.description);
    }
    println!();
    println!("{}", "Details:".dimmed());
    println!("  enigmatic preset describe <name>");
    Ok(())
}

fn describe(name: &str, ctx: &Context) -> Result<()> {
    let selected: Vec<&Preset> = if name.eq_ignore_ascii_case("all") {
        PRESETS.iter().collect()
    } else {
        vec![find(name)?]
    };

    if ctx.json_output {
        return print_json(&selected);
    }

    for (i, preset) in selected.iter().enumerate() {
        if i > 0 {
            println!();
        }
        let security = preset
            .security
            .map(|level| {
                format!(
                    "{level} ({} rotors, {} plugboard pairs)",
                    level.rotor_count(),
                    level.plugboard_pairs()
                )
            })
            .unwrap_or_else(|| "fixed historical wiring".to_string());

        println!("{} {}", "Preset:".bold(), preset.name.cyan());
        println!("  {}: {}", "description".dimmed(), preset.description);
        println!("  {}: {}", "use case".dimmed(), preset.use_case);
        println!("  {}: {}", "security".dimmed(), security);
        println!("  {}: {}", "alphabet".dimmed(), preset.alphabet);
        println!("  {}: {}", "notes".dimmed(), preset.notes);
        if ctx.verbose {
            println!(
                "    {}",
                format!(
                    "enigmatic encrypt --text \"HELLO WORLD\" --preset {} --save-key {}-key.json",
                    preset.name, preset.name
                )
                .bright_black()
            );
        }
    }
    Ok(())
}

fn export(name: &str, output: Option<PathBuf>, ctx: &Context) -> Result<()> {
    let preset = find(name)?;
    let machine = preset.build(&mut enigmatic_core::SecureRandom)?;
    let metadata = key_metadata(
        Some(preset.description.to_string()),
        Some(preset.name),
        Vec::new(),
    );
    let json = machine.settings().with_metadata(metadata).to_json()?;

    write_output(output.as_deref(), &json)?;
    if let Some(path) = output {
        if !ctx.json_output {
            print_success(format!("Preset '{}' saved to {}", preset.name, path.display()));
        }
    }
    Ok(())
}
