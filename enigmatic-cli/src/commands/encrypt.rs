use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use enigmatic_core::{alphabets, detect::normalize, Machine, SecureRandom};
use serde::Serialize;

use super::helpers::{
    apply_positions, key_metadata, load_key, resolve_format, save_key, write_output, Format,
    InputArgs,
};
use super::{preset, Context};
use crate::output::{print_json, print_success};

#[derive(Args, Debug, Default)]
pub struct EncryptArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Key file to load the machine from
    #[arg(short, long, env = "ENIGMATIC_KEY")]
    pub key: Option<PathBuf>,
    /// Build the machine from a preset (see `enigmatic preset list`)
    #[arg(short, long)]
    pub preset: Option<String>,
    /// Derive the alphabet from the input text
    #[arg(long)]
    pub auto: bool,
    /// Named alphabet (latin, lower, digits, alphanumeric, ascii, greek, cyrillic, portuguese)
    #[arg(short, long)]
    pub alphabet: Option<String>,
    /// Security level (low, medium, high, extreme)
    #[arg(short, long)]
    pub security: Option<String>,
    /// Starting rotor positions, leftmost first (e.g. 1,5,12)
    #[arg(long)]
    pub positions: Option<String>,
    /// Output encoding
    #[arg(long, value_enum)]
    pub format: Option<Format>,
    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Save the settings used, before encrypting, as a key file
    #[arg(long)]
    pub save_key: Option<PathBuf>,
}

/// Machine chosen for an encryption, plus the text it should process
struct Prepared {
    machine: Machine,
    text: String,
    source: String,
}

/// Priority: --key, then --preset, then --auto, then alphabet + security
fn prepare(args: &EncryptArgs, input: String, ctx: &Context) -> Result<Prepared> {
    if let Some(ref path) = args.key {
        return Ok(Prepared {
            machine: load_key(path)?,
            text: input,
            source: format!("key {}", path.display()),
        });
    }

    if let Some(ref name) = args.preset {
        let preset = preset::find(name)?;
        return Ok(Prepared {
            machine: preset.build(&mut SecureRandom)?,
            text: input,
            source: format!("preset {}", preset.name),
        });
    }

    let level = ctx.resolve_security(args.security.as_deref())?;

    if args.auto {
        let text = normalize(&input);
        let machine = Machine::from_text(&text, level, &mut SecureRandom)?;
        return Ok(Prepared {
            machine,
            text,
            source: format!("auto-detected alphabet, {level}"),
        });
    }

    let name = ctx.resolve_alphabet_name(args.alphabet.as_deref())?;
    let alphabet = alphabets::by_name(&name)?;
    let machine = Machine::builder()
        .alphabet(alphabet.symbols())?
        .random_settings(level, &mut SecureRandom)?
        .build()?;
    Ok(Prepared {
        machine,
        text: input,
        source: format!("{name} alphabet, {level}"),
    })
}

pub fn run(args: EncryptArgs, ctx: &Context) -> Result<()> {
    let config = ctx.config()?;
    let format = resolve_format(args.format, config.output_format.as_deref())?;
    let input = args.input.read()?;

    let Prepared {
        mut machine,
        text,
        source,
    } = prepare(&args, input, ctx)?;
    apply_positions(&mut machine, args.positions.as_deref())?;
    tracing::debug!(
        %source,
        rotors = machine.rotor_count(),
        alphabet_size = machine.alphabet_size(),
        "machine ready"
    );

    if let Some(ref path) = args.save_key {
        let metadata = key_metadata(None, args.preset.as_deref(), Vec::new());
        save_key(&machine, metadata, path)?;
    }

    let ciphertext = machine.encrypt(&text)?;
    let encoded = format.encode(&ciphertext);

    if ctx.json_output {
        #[derive(Serialize)]
        struct Output {
            ciphertext: String,
            format: String,
            source: String,
            alphabet_size: usize,
            rotors: usize,
            plugboard_pairs: usize,
            #[serde(skip_serializing_if = "Option::is_none")]
            key_file: Option<String>,
        }
        let out = Output {
            ciphertext: encoded.clone(),
            format: format!("{format:?}").to_lowercase(),
            source,
            alphabet_size: machine.alphabet_size(),
            rotors: machine.rotor_count(),
            plugboard_pairs: machine.plugboard_pair_count(),
            key_file: args.save_key.as_ref().map(|p| p.display().to_string()),
        };
        if args.output.is_some() {
            write_output(args.output.as_deref(), &encoded)?;
        }
        return print_json(&out);
    }

    write_output(args.output.as_deref(), &encoded)?;

    if ctx.verbose {
        print_success(format!(
            "Encrypted {} symbols with {source}",
            text.chars().count()
        ));
    }
    if let Some(ref path) = args.save_key {
        print_success(format!("Key saved to {}", path.display()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_context;

    fn read(path: &std::path::Path) -> String {
        std::fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_encrypt_with_saved_key_decrypts() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path());
        let key = dir.path().join("key.json");
        let out = dir.path().join("cipher.txt");

        run(
            EncryptArgs {
                input: InputArgs {
                    text: Some("ATTACKATDAWN".into()),
                    file: None,
                },
                security: Some("high".into()),
                output: Some(out.clone()),
                save_key: Some(key.clone()),
                ..EncryptArgs::default()
            },
            &ctx,
        )
        .unwrap();

        let mut machine = load_key(&key).unwrap();
        assert_eq!(machine.rotor_count(), 8);
        assert_eq!(machine.decrypt(&read(&out)).unwrap(), "ATTACKATDAWN");
    }

    #[test]
    fn test_m3_preset_with_positions_and_hex() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path());
        let out = dir.path().join("cipher.hex");

        run(
            EncryptArgs {
                input: InputArgs {
                    text: Some("AAAAA".into()),
                    file: None,
                },
                preset: Some("m3".into()),
                positions: Some("0,0,0".into()),
                format: Some(Format::Hex),
                output: Some(out.clone()),
                ..EncryptArgs::default()
            },
            &ctx,
        )
        .unwrap();

        assert_eq!(read(&out), hex::encode("BDZGO"));
    }

    #[test]
    fn test_auto_detects_alphabet_from_input() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path());
        let key = dir.path().join("key.json");
        let out = dir.path().join("cipher.txt");

        run(
            EncryptArgs {
                input: InputArgs {
                    text: Some("  Привет, мир!\r\n".into()),
                    file: None,
                },
                auto: true,
                output: Some(out.clone()),
                save_key: Some(key.clone()),
                ..EncryptArgs::default()
            },
            &ctx,
        )
        .unwrap();

        let mut machine = load_key(&key).unwrap();
        assert_eq!(machine.decrypt(&read(&out)).unwrap(), "Привет, мир!");
    }

    #[test]
    fn test_symbol_outside_alphabet_fails() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path());
        let result = run(
            EncryptArgs {
                input: InputArgs {
                    text: Some("lowercase".into()),
                    file: None,
                },
                alphabet: Some("latin".into()),
                output: Some(dir.path().join("out.txt")),
                ..EncryptArgs::default()
            },
            &ctx,
        );
        assert!(result.is_err());
    }
}
