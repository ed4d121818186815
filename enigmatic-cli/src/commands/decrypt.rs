use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use enigmatic_core::{Machine, SecureRandom};
use serde::Serialize;

use super::helpers::{apply_positions, load_key, resolve_format, write_output, Format, InputArgs};
use super::{preset, Context};
use crate::output::{print_json, print_success};

#[derive(Args, Debug, Default)]
pub struct DecryptArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Key file saved when the text was encrypted
    #[arg(short, long, env = "ENIGMATIC_KEY")]
    pub key: Option<PathBuf>,
    /// Fixed-wiring preset (m3, m4)
    #[arg(short, long)]
    pub preset: Option<String>,
    /// Starting rotor positions, leftmost first (e.g. 1,5,12)
    #[arg(long)]
    pub positions: Option<String>,
    /// Input encoding
    #[arg(long, value_enum)]
    pub format: Option<Format>,
    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

fn machine_for(args: &DecryptArgs) -> Result<Machine> {
    if let Some(ref path) = args.key {
        return load_key(path);
    }

    if let Some(ref name) = args.preset {
        let preset = preset::find(name)?;
        if !preset.is_fixed() {
            anyhow::bail!(
                "Preset '{}' generates random wiring and cannot decrypt on its own.\n\
                 Encrypt with --save-key and decrypt with --key instead.",
                preset.name
            );
        }
        return preset.build(&mut SecureRandom);
    }

    anyhow::bail!("Decryption needs a key file (--key or ENIGMATIC_KEY) or a fixed preset (m3, m4)")
}

pub fn run(args: DecryptArgs, ctx: &Context) -> Result<()> {
    let config = ctx.config()?;
    let format = resolve_format(args.format, config.output_format.as_deref())?;
    let ciphertext = format.decode(&args.input.read()?)?;

    let mut machine = machine_for(&args)?;
    apply_positions(&mut machine, args.positions.as_deref())?;
    tracing::debug!(
        rotors = machine.rotor_count(),
        positions = ?machine.current_rotor_positions(),
        "decrypting"
    );

    let plaintext = machine.decrypt(&ciphertext)?;

    if ctx.json_output {
        #[derive(Serialize)]
        struct Output<'a> {
            plaintext: &'a str,
            symbols: usize,
        }
        if args.output.is_some() {
            write_output(args.output.as_deref(), &plaintext)?;
        }
        return print_json(&Output {
            plaintext: &plaintext,
            symbols: plaintext.chars().count(),
        });
    }

    write_output(args.output.as_deref(), &plaintext)?;
    if ctx.verbose {
        print_success(format!("Decrypted {} symbols", plaintext.chars().count()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::encrypt::{self, EncryptArgs};
    use crate::commands::test_context;

    fn text(value: &str) -> InputArgs {
        InputArgs {
            text: Some(value.into()),
            file: None,
        }
    }

    #[test]
    fn test_m3_preset_decrypts_known_answer() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path());
        let out = dir.path().join("plain.txt");

        run(
            DecryptArgs {
                input: text("ILBDAAMTAZ"),
                preset: Some("m3".into()),
                output: Some(out.clone()),
                ..DecryptArgs::default()
            },
            &ctx,
        )
        .unwrap();
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "HELLOWORLD");
    }

    #[test]
    fn test_base64_roundtrip_through_key_file() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path());
        let key = dir.path().join("key.json");
        let cipher = dir.path().join("cipher.b64");
        let plain = dir.path().join("plain.txt");

        encrypt::run(
            EncryptArgs {
                input: text("Meet me at 10:30!"),
                alphabet: Some("ascii".into()),
                security: Some("extreme".into()),
                format: Some(Format::Base64),
                output: Some(cipher.clone()),
                save_key: Some(key.clone()),
                ..EncryptArgs::default()
            },
            &ctx,
        )
        .unwrap();

        run(
            DecryptArgs {
                input: InputArgs {
                    text: None,
                    file: Some(cipher),
                },
                key: Some(key),
                format: Some(Format::Base64),
                output: Some(plain.clone()),
                ..DecryptArgs::default()
            },
            &ctx,
        )
        .unwrap();
        assert_eq!(std::fs::read_to_string(&plain).unwrap(), "Meet me at 10:30!");
    }

    #[test]
    fn test_random_preset_is_rejected() {
        let err = machine_for(&DecryptArgs {
            preset: Some("extreme".into()),
            ..DecryptArgs::default()
        })
        .unwrap_err();
        assert!(err.to_string().contains("--save-key"));
    }

    #[test]
    fn test_needs_a_machine_source() {
        assert!(machine_for(&DecryptArgs::default()).is_err());
    }
}
