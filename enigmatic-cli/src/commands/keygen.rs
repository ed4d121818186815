use std::path::PathBuf;

use anyhow::{Context as AnyhowContext, Result};
use clap::Args;
use enigmatic_core::{alphabets, Machine, SecureRandom, SeededRandom};
use serde::Serialize;

use super::helpers::{key_metadata, write_output};
use super::Context;
use crate::output::{print_json, print_success};

#[derive(Args, Debug, Default)]
pub struct KeygenArgs {
    /// Security level (low, medium, high, extreme)
    #[arg(short, long)]
    pub security: Option<String>,
    /// Named alphabet
    #[arg(short, long)]
    pub alphabet: Option<String>,
    /// Number of rotors (overrides the security level)
    #[arg(short, long)]
    pub rotors: Option<usize>,
    /// Number of plugboard pairs (overrides the security level)
    #[arg(long)]
    pub plugboard_pairs: Option<usize>,
    /// Seed for reproducible starting positions; wiring stays random
    #[arg(long)]
    pub seed: Option<u64>,
    /// Free-form description stored in the key file
    #[arg(short, long)]
    pub description: Option<String>,
    /// Comma-separated tags stored in the key file
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,
    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

fn generate(args: &KeygenArgs, ctx: &Context) -> Result<Machine> {
    let level = ctx.resolve_security(args.security.as_deref())?;
    let name = ctx.resolve_alphabet_name(args.alphabet.as_deref())?;
    let alphabet = alphabets::by_name(&name)?;

    let rotors = args.rotors.unwrap_or_else(|| level.rotor_count());
    let pairs = args
        .plugboard_pairs
        .unwrap_or_else(|| level.plugboard_pairs().min(alphabet.size() / 2));
    tracing::debug!(%level, alphabet = %name, rotors, pairs, "generating key");

    let mut builder = Machine::builder()
        .alphabet(alphabet.symbols())?
        .random_components(rotors, pairs, &mut SecureRandom)
        .context("Cannot generate components")?;
    if let Some(seed) = args.seed {
        builder = builder.random_rotor_positions(&mut SeededRandom::new(seed))?;
    }
    Ok(builder.build()?)
}

pub fn run(args: KeygenArgs, ctx: &Context) -> Result<()> {
    let machine = generate(&args, ctx)?;
    let metadata = key_metadata(args.description.clone(), None, args.tags.clone());
    let json = machine.settings().with_metadata(metadata).to_json()?;

    match args.output {
        Some(ref path) => {
            write_output(Some(path.as_path()), &json)?;
            if ctx.json_output {
                #[derive(Serialize)]
                struct Output {
                    output: String,
                    alphabet_size: usize,
                    rotors: usize,
                    plugboard_pairs: usize,
                }
                print_json(&Output {
                    output: path.display().to_string(),
                    alphabet_size: machine.alphabet_size(),
                    rotors: machine.rotor_count(),
                    plugboard_pairs: machine.plugboard_pair_count(),
                })?;
            } else {
                print_success(format!(
                    "Key saved to {} ({} rotors, {} plugboard pairs, {} symbols)",
                    path.display(),
                    machine.rotor_count(),
                    machine.plugboard_pair_count(),
                    machine.alphabet_size()
                ));
            }
        }
        None => write_output(None, &json)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_context;
    use enigmatic_core::Settings;

    #[test]
    fn test_level_defaults_capped_by_alphabet() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path());
        let machine = generate(
            &KeygenArgs {
                security: Some("extreme".into()),
                alphabet: Some("digits".into()),
                ..KeygenArgs::default()
            },
            &ctx,
        )
        .unwrap();
        assert_eq!(machine.rotor_count(), 12);
        assert_eq!(machine.plugboard_pair_count(), 5);
    }

    #[test]
    fn test_explicit_counts_override_level() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path());
        let machine = generate(
            &KeygenArgs {
                rotors: Some(6),
                plugboard_pairs: Some(0),
                ..KeygenArgs::default()
            },
            &ctx,
        )
        .unwrap();
        assert_eq!(machine.rotor_count(), 6);
        assert_eq!(machine.plugboard_pair_count(), 0);

        let too_many = generate(
            &KeygenArgs {
                plugboard_pairs: Some(14),
                ..KeygenArgs::default()
            },
            &ctx,
        );
        assert!(too_many.is_err());
    }

    #[test]
    fn test_seed_fixes_positions_only() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path());
        let args = KeygenArgs {
            seed: Some(42),
            ..KeygenArgs::default()
        };
        let a = generate(&args, &ctx).unwrap();
        let b = generate(&args, &ctx).unwrap();
        assert_eq!(a.current_rotor_positions(), b.current_rotor_positions());
    }

    #[test]
    fn test_writes_key_with_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path());
        let path = dir.path().join("greek.json");
        run(
            KeygenArgs {
                alphabet: Some("greek".into()),
                description: Some("field key".into()),
                tags: vec!["greek".into(), "test".into()],
                output: Some(path.clone()),
                ..KeygenArgs::default()
            },
            &ctx,
        )
        .unwrap();

        let settings = Settings::from_json(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(settings.alphabet, enigmatic_core::alphabets::GREEK);
        let metadata = settings.metadata.unwrap();
        assert_eq!(metadata.description.as_deref(), Some("field key"));
        assert_eq!(metadata.tags, vec!["greek", "test"]);
        assert!(metadata.created_at.is_some());
    }
}
