// Common helper functions

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context as AnyhowContext, Result};
use base64::Engine;
use clap::{Args, ValueEnum};
use enigmatic_core::{Machine, Metadata};

/// Where the text to process comes from
#[derive(Args, Debug, Default)]
pub struct InputArgs {
    /// Text to process
    #[arg(short, long, conflicts_with = "file")]
    pub text: Option<String>,
    /// File to process (default: stdin)
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

impl InputArgs {
    /// Read the input; text from a file or stdin loses one trailing line ending
    pub fn read(&self) -> Result<String> {
        if let Some(ref text) = self.text {
            return Ok(text.clone());
        }

        let raw = match self.file {
            Some(ref path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
            None => {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("Failed to read stdin")?;
                buf
            }
        };
        Ok(strip_line_ending(&raw).to_string())
    }
}

fn strip_line_ending(text: &str) -> &str {
    text.strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text)
}

/// Ciphertext transport encoding
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Text,
    Hex,
    Base64,
}

impl Format {
    pub fn encode(self, ciphertext: &str) -> String {
        match self {
            Format::Text => ciphertext.to_string(),
            Format::Hex => hex::encode(ciphertext.as_bytes()),
            Format::Base64 => base64::engine::general_purpose::STANDARD.encode(ciphertext),
        }
    }

    pub fn decode(self, input: &str) -> Result<String> {
        let bytes = match self {
            Format::Text => return Ok(input.to_string()),
            Format::Hex => hex::decode(input.trim()).context("Input is not valid hex")?,
            Format::Base64 => base64::engine::general_purpose::STANDARD
                .decode(input.trim())
                .context("Input is not valid base64")?,
        };
        String::from_utf8(bytes).context("Decoded input is not valid UTF-8")
    }
}

/// Resolve the output format: --format flag, then config output_format, then text
pub fn resolve_format(flag: Option<Format>, configured: Option<&str>) -> Result<Format> {
    if let Some(format) = flag {
        return Ok(format);
    }
    match configured {
        Some(name) => Format::from_str(name, true)
            .map_err(|_| anyhow::anyhow!("Invalid output_format '{name}' in config")),
        None => Ok(Format::Text),
    }
}

/// Parse "1,5,12" into rotor positions, leftmost first
pub fn parse_positions(list: &str) -> Result<Vec<i64>> {
    list.split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<i64>()
                .with_context(|| format!("Invalid rotor position '{part}'"))
        })
        .collect()
}

pub fn apply_positions(machine: &mut Machine, positions: Option<&str>) -> Result<()> {
    if let Some(list) = positions {
        let positions = parse_positions(list)?;
        machine.set_rotor_positions(&positions)?;
        tracing::debug!(?positions, "applied rotor positions");
    }
    Ok(())
}

pub fn load_key(path: &Path) -> Result<Machine> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read key file {}", path.display()))?;
    let machine = Machine::from_json(&json)
        .with_context(|| format!("Invalid key file {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        rotors = machine.rotor_count(),
        alphabet_size = machine.alphabet_size(),
        "loaded key file"
    );
    Ok(machine)
}

/// Metadata stamped on every key file this tool writes
pub fn key_metadata(description: Option<String>, preset: Option<&str>, tags: Vec<String>) -> Metadata {
    Metadata {
        created_at: Some(chrono::Utc::now().to_rfc3339()),
        created_by: Some(format!("enigmatic {}", env!("CARGO_PKG_VERSION"))),
        description,
        preset: preset.map(str::to_string),
        tags,
    }
}

pub fn save_key(machine: &Machine, metadata: Metadata, path: &Path) -> Result<()> {
    let json = machine.settings().with_metadata(metadata).to_json()?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write key file {}", path.display()))?;
    tracing::debug!(path = %path.display(), "saved key file");
    Ok(())
}

/// Write `contents` to `path`, or stdout when no path is given
pub fn write_output(path: Option<&Path>, contents: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, contents)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote output");
        }
        None => println!("{contents}"),
    }
    Ok(())
}
